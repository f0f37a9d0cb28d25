use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    foundation::{
        config::RowThreading,
        core::Rgba8,
        error::{LumenError, LumenResult},
    },
    kernels::kernel::Kernel,
    storage::{buffer::PixelBuffer, mask::Mask},
};

/// The closed set of stage variants a chain can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectorKind {
    /// Pointwise color function, no spatial dependency.
    Filter,
    /// May read many pixels, keeps geometry.
    Effect,
    /// May restructure the buffer (flip, rotate).
    Manipulation,
    /// Partitions the buffer into masks without touching pixels.
    Cutter,
    /// Windowed convolution.
    Kernel,
}

/// Data type tag flowing between stages; chain compatibility is checked against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Pixels,
    Masks,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DataType::Pixels => "PixelBuffer",
            DataType::Masks => "Vec<Mask>",
        })
    }
}

/// The value threaded from one stage to the next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageData {
    Pixels(PixelBuffer),
    /// Output of a cutter, alongside the buffer it was cut from.
    Masks {
        image: PixelBuffer,
        masks: Vec<Mask>,
    },
}

impl StageData {
    pub fn data_type(&self) -> DataType {
        match self {
            StageData::Pixels(_) => DataType::Pixels,
            StageData::Masks { .. } => DataType::Masks,
        }
    }
}

/// A per-pixel color function.
pub trait PixelFilter: Send + Sync {
    fn name(&self) -> &'static str;

    fn map_pixel(&self, px: Rgba8) -> Rgba8;

    /// Apply this filter to a buffer outside of any pipeline.
    fn run(&self, buf: &mut PixelBuffer) {
        buf.pixels_mut()
            .par_iter_mut()
            .for_each(|px| *px = self.map_pixel(Rgba8::from_argb(*px)).to_argb());
    }

    fn into_effector(self) -> Effector
    where
        Self: Sized + 'static,
    {
        Effector::filter(self)
    }
}

/// A whole-buffer transform, used for both effects and manipulations.
pub trait BufferTransform: Send + Sync {
    fn name(&self) -> &'static str;

    fn transform(&self, buf: PixelBuffer) -> LumenResult<PixelBuffer>;
}

/// Splits a buffer into regions.
pub trait ImageCutter: Send + Sync {
    fn name(&self) -> &'static str;

    fn cut(&self, buf: &PixelBuffer) -> Vec<Mask>;
}

type PixelFn = dyn Fn(Rgba8) -> Rgba8 + Send + Sync;
type BufferFn = dyn Fn(PixelBuffer) -> LumenResult<PixelBuffer> + Send + Sync;
type CutFn = dyn Fn(&PixelBuffer) -> Vec<Mask> + Send + Sync;

/// Filter stage: a named per-pixel closure.
#[derive(Clone)]
pub struct Filter {
    name: &'static str,
    op: Arc<PixelFn>,
}

impl Filter {
    pub fn new(name: &'static str, op: impl Fn(Rgba8) -> Rgba8 + Send + Sync + 'static) -> Self {
        Self {
            name,
            op: Arc::new(op),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn map_pixel(&self, px: Rgba8) -> Rgba8 {
        (self.op)(px)
    }

    pub fn apply(&self, buf: &mut PixelBuffer) {
        buf.pixels_mut()
            .par_iter_mut()
            .for_each(|px| *px = (self.op)(Rgba8::from_argb(*px)).to_argb());
    }
}

/// Effect or manipulation stage: a named buffer-to-buffer closure.
#[derive(Clone)]
pub struct BufferOp {
    name: &'static str,
    op: Arc<BufferFn>,
}

impl BufferOp {
    pub fn new(
        name: &'static str,
        op: impl Fn(PixelBuffer) -> LumenResult<PixelBuffer> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            op: Arc::new(op),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, buf: PixelBuffer) -> LumenResult<PixelBuffer> {
        (self.op)(buf)
    }
}

/// Cutter stage: a named region splitter.
#[derive(Clone)]
pub struct Cutter {
    name: &'static str,
    op: Arc<CutFn>,
}

impl Cutter {
    pub fn new(
        name: &'static str,
        op: impl Fn(&PixelBuffer) -> Vec<Mask> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            op: Arc::new(op),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cut(&self, buf: &PixelBuffer) -> Vec<Mask> {
        (self.op)(buf)
    }
}

/// One stage of an effector chain.
///
/// Each variant carries the closure for its own typed `apply`; callers dispatch by matching
/// on the variant rather than by inspecting runtime types.
#[derive(Clone)]
pub enum Effector {
    Filter(Filter),
    Effect(BufferOp),
    Manipulation(BufferOp),
    Cutter(Cutter),
    Kernel(Kernel),
}

impl Effector {
    pub fn filter<F: PixelFilter + 'static>(f: F) -> Self {
        let name = f.name();
        Effector::Filter(Filter::new(name, move |px| f.map_pixel(px)))
    }

    pub fn effect<T: BufferTransform + 'static>(t: T) -> Self {
        Effector::Effect(buffer_op(t))
    }

    pub fn manipulation<T: BufferTransform + 'static>(t: T) -> Self {
        Effector::Manipulation(buffer_op(t))
    }

    pub fn cutter<C: ImageCutter + 'static>(c: C) -> Self {
        let name = c.name();
        Effector::Cutter(Cutter::new(name, move |buf| c.cut(buf)))
    }

    pub fn kernel(k: Kernel) -> Self {
        Effector::Kernel(k)
    }

    pub fn kind(&self) -> EffectorKind {
        match self {
            Effector::Filter(_) => EffectorKind::Filter,
            Effector::Effect(_) => EffectorKind::Effect,
            Effector::Manipulation(_) => EffectorKind::Manipulation,
            Effector::Cutter(_) => EffectorKind::Cutter,
            Effector::Kernel(_) => EffectorKind::Kernel,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Effector::Filter(f) => f.name(),
            Effector::Effect(op) | Effector::Manipulation(op) => op.name(),
            Effector::Cutter(c) => c.name(),
            Effector::Kernel(k) => k.name(),
        }
    }

    pub fn input_type(&self) -> DataType {
        DataType::Pixels
    }

    pub fn output_type(&self) -> DataType {
        match self {
            Effector::Cutter(_) => DataType::Masks,
            _ => DataType::Pixels,
        }
    }

    /// Run this stage on `data`, outside or inside a pipeline.
    pub fn apply(&self, data: StageData) -> LumenResult<StageData> {
        match (self, data) {
            (Effector::Filter(f), StageData::Pixels(mut buf)) => {
                f.apply(&mut buf);
                Ok(StageData::Pixels(buf))
            }
            (Effector::Effect(op) | Effector::Manipulation(op), StageData::Pixels(buf)) => {
                op.apply(buf).map(StageData::Pixels)
            }
            (Effector::Cutter(c), StageData::Pixels(image)) => {
                let masks = c.cut(&image);
                Ok(StageData::Masks { image, masks })
            }
            (Effector::Kernel(k), StageData::Pixels(buf)) => k.apply(&buf).map(StageData::Pixels),
            (effector, data) => Err(LumenError::image(format!(
                "{} expects {} input but received {}",
                effector.name(),
                effector.input_type(),
                data.data_type()
            ))),
        }
    }

    /// Replace the worker configuration of kernel stages; other stages are returned as is.
    pub fn with_row_threading(self, threading: RowThreading) -> LumenResult<Self> {
        match self {
            Effector::Kernel(k) => Ok(Effector::Kernel(k.with_threading(threading)?)),
            other => Ok(other),
        }
    }
}

impl std::fmt::Debug for Effector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effector")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("input", &self.input_type())
            .field("output", &self.output_type())
            .finish()
    }
}

impl From<Filter> for Effector {
    fn from(f: Filter) -> Self {
        Effector::Filter(f)
    }
}

impl From<Kernel> for Effector {
    fn from(k: Kernel) -> Self {
        Effector::Kernel(k)
    }
}

/// `true` when `next` can consume what `prev` produces.
pub fn chain_compatible(prev: &Effector, next: &Effector) -> bool {
    prev.output_type() == next.input_type()
}

fn buffer_op<T: BufferTransform + 'static>(t: T) -> BufferOp {
    let name = t.name();
    BufferOp::new(name, move |buf| t.transform(buf))
}

#[cfg(test)]
#[path = "../../tests/unit/effectors/effector.rs"]
mod tests;
