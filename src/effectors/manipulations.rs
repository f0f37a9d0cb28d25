//! Geometric manipulations. These move pixels without changing their values.

use crate::{
    effectors::effector::BufferTransform, foundation::error::LumenResult,
    storage::buffer::PixelBuffer,
};

/// Mirrors each row left to right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlipHorizontal;

impl BufferTransform for FlipHorizontal {
    fn name(&self) -> &'static str {
        "flip_horizontal"
    }

    fn transform(&self, mut buf: PixelBuffer) -> LumenResult<PixelBuffer> {
        let w = buf.width() as usize;
        if w > 0 {
            for row in buf.pixels_mut().chunks_exact_mut(w) {
                row.reverse();
            }
        }
        Ok(buf)
    }
}

/// Mirrors the row order top to bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlipVertical;

impl BufferTransform for FlipVertical {
    fn name(&self) -> &'static str {
        "flip_vertical"
    }

    fn transform(&self, buf: PixelBuffer) -> LumenResult<PixelBuffer> {
        let (w, h, format) = (buf.width(), buf.height(), buf.format());
        let mut rows: Vec<&[u32]> = buf.rows().collect();
        rows.reverse();
        let pixels = rows.concat();
        PixelBuffer::new(w, h, pixels, format)
    }
}

/// Rotates a quarter turn clockwise; width and height swap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rotate90;

impl BufferTransform for Rotate90 {
    fn name(&self) -> &'static str {
        "rotate90"
    }

    fn transform(&self, buf: PixelBuffer) -> LumenResult<PixelBuffer> {
        let (w, h) = (buf.width() as usize, buf.height() as usize);
        let src = buf.pixels();
        let mut out = vec![0u32; src.len()];
        // (x, y) -> (h - 1 - y, x) in a buffer `h` wide.
        for y in 0..h {
            for x in 0..w {
                out[x * h + (h - 1 - y)] = src[y * w + x];
            }
        }
        PixelBuffer::new(buf.height(), buf.width(), out, buf.format())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effectors/manipulations.rs"]
mod tests;
