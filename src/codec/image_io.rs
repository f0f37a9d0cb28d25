use std::{io::Cursor, path::Path};

use crate::{
    codec::wbmp,
    foundation::{
        core::ImageFormat,
        error::{LumenError, LumenResult},
    },
    storage::buffer::PixelBuffer,
};

/// Decode a file, choosing the codec from its extension.
///
/// The extension is checked before the file is touched, so an unsupported name fails with
/// [`LumenError::UnsupportedFormat`] even when the file does not exist.
#[tracing::instrument]
pub fn decode_file(path: &Path) -> LumenResult<PixelBuffer> {
    let format = format_for_path(path)?;
    if !path.is_file() {
        return Err(LumenError::io(format!(
            "'{}' does not exist or is not a file",
            path.display()
        )));
    }
    let bytes = std::fs::read(path)
        .map_err(|e| LumenError::io(format!("read '{}': {e}", path.display())))?;
    decode_bytes(&bytes, Some(format))
}

/// Decode in-memory bytes. Without a hint the format is sniffed from the content.
pub fn decode_bytes(bytes: &[u8], hint: Option<ImageFormat>) -> LumenResult<PixelBuffer> {
    let format = match hint {
        Some(f) => f,
        None => sniff(bytes)?,
    };
    let Some(codec) = format.to_image_format() else {
        return wbmp::decode(bytes);
    };

    let img = image::load_from_memory_with_format(bytes, codec)
        .map_err(|e| LumenError::codec(format!("decode {format}: {e}")))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_rgba8(width, height, rgba.as_raw(), format)
}

/// Encode `buf` as `format`. JPEG drops alpha; WBMP thresholds to black and white.
pub fn encode_bytes(buf: &PixelBuffer, format: ImageFormat) -> LumenResult<Vec<u8>> {
    let Some(codec) = format.to_image_format() else {
        return Ok(wbmp::encode(buf));
    };

    let (width, height) = buf.dimensions();
    let rgba = image::RgbaImage::from_raw(width, height, buf.to_rgba8())
        .ok_or_else(|| LumenError::image("pixel buffer does not match its dimensions"))?;
    let img = match format {
        ImageFormat::Jpeg => {
            image::DynamicImage::ImageRgb8(image::DynamicImage::ImageRgba8(rgba).to_rgb8())
        }
        _ => image::DynamicImage::ImageRgba8(rgba),
    };

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), codec)
        .map_err(|e| LumenError::codec(format!("encode {format}: {e}")))?;
    Ok(out)
}

/// Encode `buf` as `format` and write it to `path`.
#[tracing::instrument(skip(buf), fields(width = buf.width(), height = buf.height()))]
pub fn encode_file(buf: &PixelBuffer, format: ImageFormat, path: &Path) -> LumenResult<()> {
    let bytes = encode_bytes(buf, format)?;
    std::fs::write(path, bytes)
        .map_err(|e| LumenError::io(format!("write '{}': {e}", path.display())))
}

/// Resolve the format for `path`, or report the extension as unsupported.
pub fn format_for_path(path: &Path) -> LumenResult<ImageFormat> {
    ImageFormat::from_path(path).map_err(|extension| LumenError::UnsupportedFormat {
        extension,
        supported: ImageFormat::supported_list(),
    })
}

fn sniff(bytes: &[u8]) -> LumenResult<ImageFormat> {
    match image::guess_format(bytes) {
        Ok(f) => ImageFormat::from_image_format(f).ok_or_else(|| LumenError::UnsupportedFormat {
            extension: f.extensions_str().first().copied().unwrap_or("").to_owned(),
            supported: ImageFormat::supported_list(),
        }),
        // WBMP has no magic number; a leading type-0 byte is the best signal available.
        Err(_) if bytes.first() == Some(&0) => Ok(ImageFormat::Wbmp),
        Err(_) => Err(LumenError::codec("unrecognized image data")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/image_io.rs"]
mod tests;
