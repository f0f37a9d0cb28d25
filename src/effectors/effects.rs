use crate::{
    effectors::effector::BufferTransform,
    foundation::{core::Rgba8, error::LumenResult},
    storage::buffer::PixelBuffer,
};

/// Linearly stretches each of r, g, b so its observed range spans `[0, 255]`.
///
/// Channels with a flat histogram (min == max) are left untouched; alpha is preserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StretchContrast;

impl BufferTransform for StretchContrast {
    fn name(&self) -> &'static str {
        "stretch_contrast"
    }

    fn transform(&self, mut buf: PixelBuffer) -> LumenResult<PixelBuffer> {
        if buf.is_empty() {
            return Ok(buf);
        }

        let mut lo = [u8::MAX; 3];
        let mut hi = [u8::MIN; 3];
        for &px in buf.pixels() {
            let c = Rgba8::from_argb(px);
            for (i, v) in [c.r, c.g, c.b].into_iter().enumerate() {
                lo[i] = lo[i].min(v);
                hi[i] = hi[i].max(v);
            }
        }

        let luts: [[u8; 256]; 3] = std::array::from_fn(|i| stretch_lut(lo[i], hi[i]));
        for px in buf.pixels_mut() {
            let c = Rgba8::from_argb(*px);
            *px = Rgba8::new(
                luts[0][c.r as usize],
                luts[1][c.g as usize],
                luts[2][c.b as usize],
                c.a,
            )
            .to_argb();
        }
        Ok(buf)
    }
}

fn stretch_lut(lo: u8, hi: u8) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (v, slot) in lut.iter_mut().enumerate() {
        *slot = if hi <= lo {
            v as u8
        } else {
            let t = (v as f32 - f32::from(lo)) / f32::from(hi - lo);
            (t * 255.0).round().clamp(0.0, 255.0) as u8
        };
    }
    lut
}
