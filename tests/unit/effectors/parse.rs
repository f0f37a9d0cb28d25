use super::*;
use crate::effectors::effector::{DataType, EffectorKind};
use serde_json::json;

fn spec(kind: &str, params: serde_json::Value) -> EffectorSpec {
    EffectorSpec::new(kind, params)
}

#[test]
fn kinds_map_to_variants() {
    let cases = [
        ("brightness", json!({ "value": 10 }), EffectorKind::Filter),
        ("Contrast", json!({ "fraction": 0.5 }), EffectorKind::Filter),
        ("sepia", json!(null), EffectorKind::Filter),
        ("stretch-contrast", json!(null), EffectorKind::Effect),
        ("rotate90", json!(null), EffectorKind::Manipulation),
        ("grid", json!({ "columns": 2, "rows": 3 }), EffectorKind::Cutter),
        ("gaussian_blur", json!({ "radius": 2 }), EffectorKind::Kernel),
        ("edge_detect", json!(null), EffectorKind::Kernel),
    ];
    for (kind, params, expected) in cases {
        let e = parse_effector(&spec(kind, params)).unwrap();
        assert_eq!(e.kind(), expected, "{kind}");
    }
}

#[test]
fn invalid_params_are_config_errors() {
    let bad = [
        spec("", json!(null)),
        spec("sparkle", json!(null)),
        spec("brightness", json!(null)),
        spec("brightness", json!({ "value": 300 })),
        spec("contrast", json!({ "value": "high" })),
        spec("grid", json!({ "columns": 0, "rows": 1 })),
        spec("gaussian_blur", json!({ "radius": 1, "sigma": -1.0 })),
        spec("gaussian_blur", json!({ "radius": 65 })),
        spec("gaussian_blur", json!({ "radius": 4_294_967_296u64 })),
        spec("box_blur", json!({ "width": -3 })),
        spec("kernel", json!({ "weights": [[1.0, 2.0], [3.0]] })),
        spec("kernel", json!({ "weights": [] })),
    ];
    for s in bad {
        let err = parse_effector(&s).unwrap_err();
        assert!(matches!(err, LumenError::Config(_)), "{s:?} gave {err}");
    }
}

#[test]
fn custom_kernel_takes_shape_from_matrix() {
    let e = parse_effector(&spec(
        "kernel",
        json!({ "name": "ridge", "weights": [[0, 1, 0], [1, 1, 1]] }),
    ))
    .unwrap();
    let Effector::Kernel(k) = e else {
        panic!("expected a kernel");
    };
    assert_eq!(k.size(), (3, 2));
    assert_eq!(k.name(), "ridge");
}

#[test]
fn shorthand_splits_kind_and_params() {
    assert_eq!(
        EffectorSpec::from_shorthand("negative").unwrap(),
        spec("negative", serde_json::Value::Null)
    );
    assert_eq!(
        EffectorSpec::from_shorthand("box_blur:{\"width\":5}").unwrap(),
        spec("box_blur", json!({ "width": 5 }))
    );
    assert!(EffectorSpec::from_shorthand("box_blur:{width").is_err());
}

#[test]
fn chain_json_keeps_order_and_reports_index() {
    let chain = parse_chain_json(
        r#"[{"kind":"grayscale"},{"kind":"box_blur","params":{"width":3}},{"kind":"grid","params":{"columns":2,"rows":2}}]"#,
    )
    .unwrap();
    let names: Vec<_> = chain.iter().map(|e| e.name().to_owned()).collect();
    assert_eq!(names, ["grayscale", "box_blur", "grid"]);
    assert_eq!(chain[2].output_type(), DataType::Masks);

    let err = parse_chain_json(r#"[{"kind":"negative"},{"kind":"nope"}]"#).unwrap_err();
    assert!(err.to_string().contains("effector 1"));
    assert!(parse_chain_json("{}").is_err());
}

#[test]
fn param_errors_name_the_key_and_expected_type() {
    let err = parse_effector(&spec("grid", json!({ "columns": 2 }))).unwrap_err();
    assert!(err.to_string().contains("missing effector param 'rows'"), "{err}");

    let err = parse_effector(&spec("brightness", json!({ "fraction": "half" }))).unwrap_err();
    assert!(err.to_string().contains("'fraction' must be a finite number"), "{err}");

    let err = parse_effector(&spec("brightness", json!({ "value": 1.5 }))).unwrap_err();
    assert!(err.to_string().contains("'value' must be a 32-bit integer"), "{err}");
}

#[test]
fn optional_params_fall_back_to_defaults() {
    let Effector::Kernel(k) = parse_effector(&spec("box_blur", json!(null))).unwrap() else {
        panic!("expected a kernel");
    };
    assert_eq!(k.size(), (3, 3));

    let Effector::Kernel(k) = parse_effector(&spec("box_blur", json!({ "width": 5 }))).unwrap()
    else {
        panic!("expected a kernel");
    };
    assert_eq!(k.size(), (5, 5));
}
