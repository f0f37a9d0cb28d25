//! Type 0 WBMP: a 1-bit, uncompressed bitmap with a uintvar header.
//!
//! Layout: `type (uintvar) = 0`, `fix header (u8) = 0`, `width (uintvar)`,
//! `height (uintvar)`, then rows padded to whole bytes, most significant bit first,
//! where a set bit is white.

use crate::{
    foundation::{
        core::{ImageFormat, Rgba8},
        error::{LumenError, LumenResult},
    },
    storage::buffer::PixelBuffer,
};

/// Luma at or above this is written as white.
const WHITE_THRESHOLD: u8 = 128;

pub(crate) fn decode(bytes: &[u8]) -> LumenResult<PixelBuffer> {
    let mut cursor = 0usize;
    let ty = read_uintvar(bytes, &mut cursor)?;
    if ty != 0 {
        return Err(LumenError::codec(format!("unsupported wbmp type {ty}")));
    }
    let fix = *bytes
        .get(cursor)
        .ok_or_else(|| LumenError::codec("truncated wbmp header"))?;
    cursor += 1;
    if fix & 0x80 != 0 {
        return Err(LumenError::codec("wbmp extension headers are not supported"));
    }
    let width = read_uintvar(bytes, &mut cursor)?;
    let height = read_uintvar(bytes, &mut cursor)?;

    let stride = (width as usize).div_ceil(8);
    let data = &bytes[cursor..];
    let needed = stride
        .checked_mul(height as usize)
        .ok_or_else(|| LumenError::codec("wbmp dimensions overflow"))?;
    if data.len() < needed {
        return Err(LumenError::codec(format!(
            "truncated wbmp data: expected {needed} bytes, found {}",
            data.len()
        )));
    }

    let white = Rgba8::gray(255).to_argb();
    let black = Rgba8::gray(0).to_argb();
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    if stride > 0 {
        for row in data[..needed].chunks_exact(stride) {
            for x in 0..width as usize {
                let bit = row[x / 8] & (0x80 >> (x % 8));
                pixels.push(if bit != 0 { white } else { black });
            }
        }
    }
    PixelBuffer::new(width, height, pixels, ImageFormat::Wbmp)
}

pub(crate) fn encode(buf: &PixelBuffer) -> Vec<u8> {
    let (width, height) = buf.dimensions();
    let stride = (width as usize).div_ceil(8);

    let mut out = Vec::with_capacity(12 + stride * height as usize);
    write_uintvar(&mut out, 0);
    out.push(0);
    write_uintvar(&mut out, width);
    write_uintvar(&mut out, height);

    for row in buf.rows() {
        let mut packed = vec![0u8; stride];
        for (x, &px) in row.iter().enumerate() {
            if Rgba8::from_argb(px).luma() >= WHITE_THRESHOLD {
                packed[x / 8] |= 0x80 >> (x % 8);
            }
        }
        out.extend_from_slice(&packed);
    }
    out
}

fn read_uintvar(bytes: &[u8], cursor: &mut usize) -> LumenResult<u32> {
    let mut value: u32 = 0;
    // 5 groups of 7 bits cover u32.
    for _ in 0..5 {
        let b = *bytes
            .get(*cursor)
            .ok_or_else(|| LumenError::codec("truncated wbmp header"))?;
        *cursor += 1;
        value = value
            .checked_mul(128)
            .ok_or_else(|| LumenError::codec("wbmp header value overflows u32"))?
            | u32::from(b & 0x7f);
        if b & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(LumenError::codec("wbmp header value overflows u32"))
}

fn write_uintvar(out: &mut Vec<u8>, mut value: u32) {
    let mut groups = [0u8; 5];
    let mut n = 0;
    loop {
        groups[n] = (value & 0x7f) as u8;
        n += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for i in (0..n).rev() {
        let cont = if i > 0 { 0x80 } else { 0 };
        out.push(groups[i] | cont);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/wbmp.rs"]
mod tests;
