use crate::{
    effectors::{
        cutters::GridCutter,
        effector::{Effector, PixelFilter},
        effects::StretchContrast,
        filters::{BrightnessFilter, ContrastFilter, GrayscaleFilter, NegativeFilter, SepiaFilter},
        manipulations::{FlipHorizontal, FlipVertical, Rotate90},
    },
    foundation::error::{LumenError, LumenResult},
    kernels::kernel::Kernel,
};

/// Data-driven description of one effector, e.g. `{"kind": "brightness", "params": {"value": 40}}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectorSpec {
    pub kind: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl EffectorSpec {
    pub fn new(kind: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }

    /// Parse `kind` or `kind:{json params}`.
    pub fn from_shorthand(s: &str) -> LumenResult<Self> {
        let (kind, params) = match s.split_once(':') {
            Some((kind, json)) => {
                let params = serde_json::from_str(json).map_err(|e| {
                    LumenError::config(format!("invalid params for effector '{kind}': {e}"))
                })?;
                (kind, params)
            }
            None => (s, serde_json::Value::Null),
        };
        Ok(Self::new(kind.trim(), params))
    }
}

pub fn parse_effector(spec: &EffectorSpec) -> LumenResult<Effector> {
    let kind = spec.kind.trim().to_ascii_lowercase().replace('-', "_");
    if kind.is_empty() {
        return Err(LumenError::config("effector kind must be non-empty"));
    }
    let p = &spec.params;

    match kind.as_str() {
        "brightness" => Ok(match optional_param(p, "fraction")? {
            Some(f) => BrightnessFilter::from_fraction(f)?,
            None => BrightnessFilter::new(param(p, "value")?)?,
        }
        .into_effector()),
        "contrast" => Ok(match optional_param(p, "fraction")? {
            Some(f) => ContrastFilter::from_fraction(f)?,
            None => ContrastFilter::new(param(p, "value")?)?,
        }
        .into_effector()),
        "grayscale" | "greyscale" => Ok(GrayscaleFilter.into_effector()),
        "negative" | "invert" => Ok(NegativeFilter.into_effector()),
        "sepia" => Ok(SepiaFilter.into_effector()),
        "stretch_contrast" => Ok(Effector::effect(StretchContrast)),
        "flip_horizontal" => Ok(Effector::manipulation(FlipHorizontal)),
        "flip_vertical" => Ok(Effector::manipulation(FlipVertical)),
        "rotate90" | "rotate_90" => Ok(Effector::manipulation(Rotate90)),
        "grid" => {
            let cutter = GridCutter::new(param(p, "columns")?, param(p, "rows")?)?;
            Ok(Effector::cutter(cutter))
        }
        "box_blur" => {
            let width = param_or(p, "width", 3u32)?;
            let height = param_or(p, "height", width)?;
            Ok(Kernel::box_blur(width, height)?.into())
        }
        "gaussian_blur" | "gaussian" => {
            let radius: u32 = param(p, "radius")?;
            let sigma = param_or(p, "sigma", (radius as f32 / 2.0).max(0.5))?;
            Ok(Kernel::gaussian(radius, sigma)?.into())
        }
        "sharpen" => Ok(Kernel::sharpen()?.into()),
        "edge_detect" => Ok(Kernel::edge_detect()?.into()),
        "emboss" => Ok(Kernel::emboss()?.into()),
        "kernel" => parse_custom_kernel(p),
        _ => Err(LumenError::config(format!(
            "unknown effector kind '{kind}'"
        ))),
    }
}

/// Parse a JSON array of [`EffectorSpec`]s.
pub fn parse_chain_json(json: &str) -> LumenResult<Vec<Effector>> {
    let specs: Vec<EffectorSpec> = serde_json::from_str(json)
        .map_err(|e| LumenError::config(format!("invalid effector chain json: {e}")))?;
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            parse_effector(spec).map_err(|e| match e {
                LumenError::Config(msg) => LumenError::config(format!("effector {i}: {msg}")),
                other => other,
            })
        })
        .collect()
}

fn parse_custom_kernel(p: &serde_json::Value) -> LumenResult<Effector> {
    let Some(rows) = p.get("weights").and_then(|v| v.as_array()) else {
        return Err(LumenError::config(
            "kernel.weights must be an array of rows",
        ));
    };
    let mut matrix = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(row) = row.as_array() else {
            return Err(LumenError::config("kernel.weights rows must be arrays"));
        };
        let row = row
            .iter()
            .map(|v| {
                v.as_f64()
                    .map(|w| w as f32)
                    .ok_or_else(|| LumenError::config("kernel.weights entries must be numbers"))
            })
            .collect::<LumenResult<Vec<f32>>>()?;
        matrix.push(row);
    }
    let height = u32::try_from(matrix.len())
        .map_err(|_| LumenError::config("kernel.weights has too many rows"))?;
    let width = matrix.first().map_or(0, |r| r.len());
    let width =
        u32::try_from(width).map_err(|_| LumenError::config("kernel.weights rows are too long"))?;

    let mut kernel = Kernel::new(width, height, matrix)?;
    if let Some(name) = p.get("name").and_then(|v| v.as_str()) {
        kernel = kernel.with_name(name);
    }
    Ok(kernel.into())
}

/// A scalar that can be read out of an effector's `params` object.
trait ParamValue: Sized {
    const EXPECTED: &'static str;
    fn from_value(v: &serde_json::Value) -> Option<Self>;
}

impl ParamValue for i32 {
    const EXPECTED: &'static str = "a 32-bit integer";
    fn from_value(v: &serde_json::Value) -> Option<Self> {
        v.as_i64().and_then(|n| i32::try_from(n).ok())
    }
}

impl ParamValue for u32 {
    const EXPECTED: &'static str = "a non-negative 32-bit integer";
    fn from_value(v: &serde_json::Value) -> Option<Self> {
        v.as_u64().and_then(|n| u32::try_from(n).ok())
    }
}

impl ParamValue for f32 {
    const EXPECTED: &'static str = "a finite number";
    fn from_value(v: &serde_json::Value) -> Option<Self> {
        v.as_f64().map(|n| n as f32).filter(|n| n.is_finite())
    }
}

fn optional_param<T: ParamValue>(obj: &serde_json::Value, key: &str) -> LumenResult<Option<T>> {
    obj.get(key)
        .map(|v| {
            T::from_value(v).ok_or_else(|| {
                LumenError::config(format!("effector param '{key}' must be {}", T::EXPECTED))
            })
        })
        .transpose()
}

fn param<T: ParamValue>(obj: &serde_json::Value, key: &str) -> LumenResult<T> {
    optional_param(obj, key)?
        .ok_or_else(|| LumenError::config(format!("missing effector param '{key}'")))
}

fn param_or<T: ParamValue>(obj: &serde_json::Value, key: &str, default: T) -> LumenResult<T> {
    Ok(optional_param(obj, key)?.unwrap_or(default))
}

#[cfg(test)]
#[path = "../../tests/unit/effectors/parse.rs"]
mod tests;
