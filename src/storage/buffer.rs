use crate::foundation::{
    core::{ImageFormat, Rgba8},
    error::{LumenError, LumenResult},
};

/// Row-major, packed `A:R:G:B` pixel storage.
///
/// `pixels.len() == width * height` always holds; every constructor checks it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    format: ImageFormat,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<u32>, format: ImageFormat) -> LumenResult<Self> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(LumenError::image(format!(
                "pixel array length {} does not match {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
            format,
        })
    }

    /// A buffer where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8, format: ImageFormat) -> LumenResult<Self> {
        let len = pixel_count(width, height)?;
        Self::new(width, height, vec![color.to_argb(); len], format)
    }

    /// Build from tightly packed straight RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8], format: ImageFormat) -> LumenResult<Self> {
        let expected = pixel_count(width, height)?
            .checked_mul(4)
            .ok_or_else(|| LumenError::image("pixel buffer size overflow"))?;
        if rgba.len() != expected {
            return Err(LumenError::image(
                "rgba byte length must equal width*height*4",
            ));
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| Rgba8::new(px[0], px[1], px[2], px[3]).to_argb())
            .collect();
        Self::new(width, height, pixels, format)
    }

    /// Tightly packed straight RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &px in &self.pixels {
            let c = Rgba8::from_argb(px);
            out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        out
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Change the format used when this buffer is encoded.
    pub fn set_format(&mut self, format: ImageFormat) {
        self.format = format;
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.index_of(x, y).map(|i| Rgba8::from_argb(self.pixels[i]))
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgba8) -> LumenResult<()> {
        let i = self.index_of(x, y).ok_or_else(|| {
            LumenError::image(format!(
                "pixel coordinates out of bounds: ({x}, {y}) in {}x{}",
                self.width, self.height
            ))
        })?;
        self.pixels[i] = color.to_argb();
        Ok(())
    }

    /// Iterate rows as slices of packed pixels.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // chunks_exact(0) panics; an empty buffer simply has no rows.
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }
}

fn pixel_count(width: u32, height: u32) -> LumenResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| LumenError::image("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/storage/buffer.rs"]
mod tests;
