//! Ready-made kernels built on [`Kernel`]'s hooks.

use crate::{
    foundation::{
        core::Rgba8,
        error::{LumenError, LumenResult},
    },
    kernels::kernel::Kernel,
};

/// Largest radius `Kernel::gaussian` accepts; a 129x129 window.
pub const MAX_GAUSSIAN_RADIUS: u32 = 64;

/// Largest side `Kernel::box_blur` accepts, matching the biggest Gaussian window.
pub const MAX_BOX_SIDE: u32 = 2 * MAX_GAUSSIAN_RADIUS + 1;

impl Kernel {
    /// Mean over a `width` x `height` window; every weight is `1 / (width * height)`.
    pub fn box_blur(width: u32, height: u32) -> LumenResult<Self> {
        if width > MAX_BOX_SIDE || height > MAX_BOX_SIDE {
            return Err(LumenError::config(format!(
                "box blur sides must be <= {MAX_BOX_SIDE}, was {width}x{height}"
            )));
        }
        let len = width as usize * height as usize;
        let weight = 1.0 / len.max(1) as f32;
        Ok(Self::from_flat(width, height, vec![weight; len])?.with_name("box_blur"))
    }

    /// Normalized 2D Gaussian of size `2 * radius + 1`.
    ///
    /// `radius` is capped at [`MAX_GAUSSIAN_RADIUS`].
    pub fn gaussian(radius: u32, sigma: f32) -> LumenResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(LumenError::config("gaussian sigma must be > 0"));
        }
        if radius > MAX_GAUSSIAN_RADIUS {
            return Err(LumenError::config(format!(
                "gaussian radius must be <= {MAX_GAUSSIAN_RADIUS}, was {radius}"
            )));
        }
        let r = radius as i64;
        let size = 2 * radius + 1;
        let denom = 2.0 * f64::from(sigma) * f64::from(sigma);

        let mut weights = Vec::with_capacity(size as usize * size as usize);
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = (dx * dx + dy * dy) as f64;
                weights.push((-d2 / denom).exp());
            }
        }
        let sum: f64 = weights.iter().sum();
        let weights = weights.into_iter().map(|w| (w / sum) as f32).collect();
        Ok(Self::from_flat(size, size, weights)?.with_name("gaussian_blur"))
    }

    pub fn sharpen() -> LumenResult<Self> {
        preset(
            "sharpen",
            [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]],
        )
    }

    /// Laplacian over luma; output is opaque gray.
    pub fn edge_detect() -> LumenResult<Self> {
        Ok(preset(
            "edge_detect",
            [[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]],
        )?
        .with_preprocess_color(|c, _| Rgba8::gray(c.luma()))
        .with_postprocess_color(|c, _, _| opaque(c)))
    }

    pub fn emboss() -> LumenResult<Self> {
        Ok(preset(
            "emboss",
            [[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]],
        )?
        .with_postprocess_color(|c, _, _| opaque(c)))
    }
}

fn preset(name: &'static str, rows: [[f32; 3]; 3]) -> LumenResult<Kernel> {
    let weights = rows.iter().flatten().copied().collect();
    Ok(Kernel::from_flat(3, 3, weights)?.with_name(name))
}

fn opaque(c: [f32; 4]) -> Rgba8 {
    Rgba8::opaque(c[0] as u8, c[1] as u8, c[2] as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/presets.rs"]
mod tests;
