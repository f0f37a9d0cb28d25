//! Lumen is a composable image-transformation pipeline.
//!
//! An image is decoded into a [`PixelBuffer`], run through an ordered chain of
//! [`Effector`]s and encoded again. Adjacent effectors are type-checked when they are
//! chained, not when the chain runs.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `path | bytes -> PixelBuffer` via the `image` crate (plus a native WBMP codec)
//! 2. **Chain**: append filters, effects, manipulations, kernels and cutters
//! 3. **Run**: thread the buffer through every stage; the last output becomes the buffer of record
//! 4. **Save**: encode in the buffer's declared [`ImageFormat`]
//!
//! The convolution engine ([`Kernel`]) splits output rows across rayon workers and exposes
//! three hooks (`preprocess_color`, `preprocess_weight`, `postprocess_color`) so variants such
//! as sharpen or edge detection reuse one loop.
//!
//! Effector chains can also be described as JSON ([`EffectorSpec`], [`parse_chain_json`]).
#![forbid(unsafe_code)]

mod codec;
mod effectors;
mod foundation;
mod kernels;
mod pipeline;
mod storage;

pub use codec::image_io::{decode_bytes, decode_file, encode_bytes, encode_file, format_for_path};
pub use effectors::cutters::GridCutter;
pub use effectors::effector::{
    BufferOp, BufferTransform, Cutter, DataType, Effector, EffectorKind, Filter, ImageCutter,
    PixelFilter, StageData, chain_compatible,
};
pub use effectors::effects::StretchContrast;
pub use effectors::filters::{
    BrightnessFilter, ContrastFilter, GrayscaleFilter, NegativeFilter, SepiaFilter,
};
pub use effectors::manipulations::{FlipHorizontal, FlipVertical, Rotate90};
pub use effectors::parse::{EffectorSpec, parse_chain_json, parse_effector};
pub use foundation::config::RowThreading;
pub use foundation::core::{ImageFormat, Rgba8};
pub use foundation::error::{LumenError, LumenResult};
pub use kernels::kernel::{Kernel, Tap};
pub use kernels::presets::{MAX_BOX_SIDE, MAX_GAUSSIAN_RADIUS};
pub use pipeline::chain::EffectorChain;
pub use pipeline::runner::{Pipeline, PipelineState};
pub use storage::buffer::PixelBuffer;
pub use storage::guarded::GuardedCell;
pub use storage::mask::Mask;
