use super::*;
use crate::{
    effectors::{
        cutters::GridCutter,
        effector::PixelFilter,
        filters::{GrayscaleFilter, NegativeFilter},
    },
    kernels::kernel::Kernel,
};

fn grid() -> Effector {
    Effector::cutter(GridCutter::new(2, 2).unwrap())
}

#[test]
fn compatible_effectors_append_in_order() {
    let mut chain = EffectorChain::new();
    chain
        .extend([
            GrayscaleFilter.into_effector(),
            Kernel::sharpen().unwrap().into(),
            grid(),
        ])
        .unwrap();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.output_type(), DataType::Masks);
    let names: Vec<_> = chain.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["grayscale", "sharpen", "grid"]);
}

#[test]
fn mismatch_is_atomic_and_positioned() {
    let mut chain = EffectorChain::new();
    chain.push(NegativeFilter.into_effector()).unwrap();

    let err = chain
        .extend([grid(), NegativeFilter.into_effector()])
        .unwrap_err();
    assert_eq!(err.position(), Some(2));
    assert!(matches!(err, LumenError::Chain { .. }));
    assert!(err.to_string().contains("negative expects PixelBuffer but grid produces Vec<Mask>"));
    assert_eq!(chain.len(), 1);
}

#[test]
fn nothing_may_follow_a_cutter() {
    let mut chain = EffectorChain::new();
    chain.push(grid()).unwrap();
    let err = chain.push(grid()).unwrap_err();
    assert_eq!(err.position(), Some(1));
    assert_eq!(chain.len(), 1);

    chain.clear();
    assert!(chain.is_empty());
    assert_eq!(chain.output_type(), DataType::Pixels);
    chain.push(NegativeFilter.into_effector()).unwrap();
}
