use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    foundation::{
        config::RowThreading,
        core::Rgba8,
        error::{LumenError, LumenResult},
    },
    storage::buffer::PixelBuffer,
};

/// Position of one in-bounds kernel tap, passed to the pre-processing hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tap {
    /// Source pixel column.
    pub sx: u32,
    /// Source pixel row.
    pub sy: u32,
    /// Kernel cell column.
    pub kx: u32,
    /// Kernel cell row.
    pub ky: u32,
}

type ColorHook = dyn Fn(Rgba8, Tap) -> Rgba8 + Send + Sync;
type WeightHook = dyn Fn(f32, Tap) -> f32 + Send + Sync;
type PostHook = dyn Fn([f32; 4], u32, u32) -> Rgba8 + Send + Sync;

/// A `width` x `height` convolution with pluggable per-tap and per-pixel hooks.
///
/// Taps that fall outside the source are skipped, so edge pixels are reduced over fewer
/// samples than interior ones. Sums are kept in `f32` and clamped to `[0, 255]` once,
/// just before `postprocess_color`.
#[derive(Clone)]
pub struct Kernel {
    name: String,
    width: u32,
    height: u32,
    /// Row-major, `width * height` long.
    weights: Vec<f32>,
    preprocess_color: Arc<ColorHook>,
    preprocess_weight: Arc<WeightHook>,
    postprocess_color: Arc<PostHook>,
    threading: RowThreading,
    /// Built once by `with_threading`; clones share it.
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Kernel {
    /// Build from a `height`-row matrix of `width`-long rows.
    pub fn new(width: u32, height: u32, weights: Vec<Vec<f32>>) -> LumenResult<Self> {
        check_size(width, height)?;
        if weights.len() != height as usize {
            return Err(LumenError::config(format!(
                "kernel declared {width}x{height} but weight matrix has {} rows",
                weights.len()
            )));
        }
        if let Some((row, r)) = weights
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != width as usize)
        {
            return Err(LumenError::config(format!(
                "kernel declared {width}x{height} but weight row {row} has {} entries",
                r.len()
            )));
        }
        Self::from_flat(width, height, weights.into_iter().flatten().collect())
    }

    /// Build from row-major weights.
    pub fn from_flat(width: u32, height: u32, weights: Vec<f32>) -> LumenResult<Self> {
        check_size(width, height)?;
        if weights.len() != width as usize * height as usize {
            return Err(LumenError::config(format!(
                "kernel declared {width}x{height} but has {} weights",
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(LumenError::config("kernel weights must be finite"));
        }
        Ok(Self {
            name: "kernel".to_owned(),
            width,
            height,
            weights,
            preprocess_color: Arc::new(|c, _| c),
            preprocess_weight: Arc::new(|w, _| w),
            postprocess_color: Arc::new(|c, _, _| truncate_color(c)),
            threading: RowThreading::default(),
            pool: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_preprocess_color(
        mut self,
        hook: impl Fn(Rgba8, Tap) -> Rgba8 + Send + Sync + 'static,
    ) -> Self {
        self.preprocess_color = Arc::new(hook);
        self
    }

    pub fn with_preprocess_weight(
        mut self,
        hook: impl Fn(f32, Tap) -> f32 + Send + Sync + 'static,
    ) -> Self {
        self.preprocess_weight = Arc::new(hook);
        self
    }

    /// `hook` receives the clamped channel sums `[r, g, b, a]` and the output coordinates.
    pub fn with_postprocess_color(
        mut self,
        hook: impl Fn([f32; 4], u32, u32) -> Rgba8 + Send + Sync + 'static,
    ) -> Self {
        self.postprocess_color = Arc::new(hook);
        self
    }

    /// Set the worker configuration, building its dedicated pool (if any) up front.
    ///
    /// `threads == Some(0)` is rejected here rather than on the first `apply`.
    pub fn with_threading(mut self, threading: RowThreading) -> LumenResult<Self> {
        self.pool = threading.build_pool()?;
        self.threading = threading;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn threading(&self) -> &RowThreading {
        &self.threading
    }

    /// Convolve `src` into a new buffer of the same size and format.
    ///
    /// Output rows are independent, so they are split across rayon workers unless the
    /// kernel is configured as sequential. `src` is only read.
    #[tracing::instrument(skip(self, src), fields(kernel = %self.name, width = src.width(), height = src.height()))]
    pub fn apply(&self, src: &PixelBuffer) -> LumenResult<PixelBuffer> {
        let (w, h) = src.dimensions();
        let mut out = vec![0u32; src.pixels().len()];
        if out.is_empty() {
            return PixelBuffer::new(w, h, out, src.format());
        }

        let convolve_row = |(y, row): (usize, &mut [u32])| {
            for (x, px) in row.iter_mut().enumerate() {
                *px = self.convolve_at(src, x as u32, y as u32).to_argb();
            }
        };
        let rows = w as usize;
        match (&self.pool, self.threading.parallel) {
            (Some(pool), _) => pool.install(|| {
                out.par_chunks_mut(rows)
                    .enumerate()
                    .for_each(convolve_row)
            }),
            (None, true) => out
                .par_chunks_mut(rows)
                .enumerate()
                .for_each(convolve_row),
            (None, false) => out.chunks_mut(rows).enumerate().for_each(convolve_row),
        }

        PixelBuffer::new(w, h, out, src.format())
    }

    fn convolve_at(&self, src: &PixelBuffer, x: u32, y: u32) -> Rgba8 {
        let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));
        let (cx, cy) = (i64::from(self.width / 2), i64::from(self.height / 2));
        let pixels = src.pixels();
        let mut acc = [0f32; 4];

        for ky in 0..self.height {
            let sy = i64::from(y) + i64::from(ky) - cy;
            if sy < 0 || sy >= sh {
                continue;
            }
            for kx in 0..self.width {
                let sx = i64::from(x) + i64::from(kx) - cx;
                if sx < 0 || sx >= sw {
                    continue;
                }
                let tap = Tap {
                    sx: sx as u32,
                    sy: sy as u32,
                    kx,
                    ky,
                };
                let color = (self.preprocess_color)(
                    Rgba8::from_argb(pixels[(sy * sw + sx) as usize]),
                    tap,
                );
                let weight = (self.preprocess_weight)(
                    self.weights[(ky * self.width + kx) as usize],
                    tap,
                );
                acc[0] += f32::from(color.r) * weight;
                acc[1] += f32::from(color.g) * weight;
                acc[2] += f32::from(color.b) * weight;
                acc[3] += f32::from(color.a) * weight;
            }
        }

        (self.postprocess_color)(acc.map(|v| v.clamp(0.0, 255.0)), x, y)
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.name)
            .field("size", &(self.width, self.height))
            .field("weights", &self.weights)
            .field("threading", &self.threading)
            .field("pooled", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}

fn check_size(width: u32, height: u32) -> LumenResult<()> {
    if width == 0 || height == 0 {
        return Err(LumenError::config(format!(
            "kernel dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

/// Drop the fractional part of clamped channel sums.
pub(crate) fn truncate_color(c: [f32; 4]) -> Rgba8 {
    Rgba8::new(c[0] as u8, c[1] as u8, c[2] as u8, c[3] as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/kernel.rs"]
mod tests;
