use super::*;
use crate::foundation::core::Rgba8;

fn sample() -> PixelBuffer {
    let mut buf = PixelBuffer::filled(4, 3, Rgba8::new(30, 60, 90, 255), ImageFormat::Png).unwrap();
    buf.set(1, 2, Rgba8::new(200, 10, 0, 128)).unwrap();
    buf
}

#[test]
fn png_keeps_every_channel() {
    let bytes = encode_bytes(&sample(), ImageFormat::Png).unwrap();
    let out = decode_bytes(&bytes, None).unwrap();
    assert_eq!(out, sample());
}

#[test]
fn jpeg_is_opaque_and_close() {
    let src = PixelBuffer::filled(8, 8, Rgba8::new(120, 80, 40, 10), ImageFormat::Jpeg).unwrap();
    let bytes = encode_bytes(&src, ImageFormat::Jpeg).unwrap();
    let out = decode_bytes(&bytes, Some(ImageFormat::Jpeg)).unwrap();
    assert_eq!(out.format(), ImageFormat::Jpeg);
    let c = out.get(4, 4).unwrap();
    assert_eq!(c.a, 255);
    assert!((i32::from(c.r) - 120).abs() <= 8, "{c:?}");
}

#[test]
fn sniffing_detects_bmp_and_wbmp() {
    let bmp = encode_bytes(&sample(), ImageFormat::Bmp).unwrap();
    assert_eq!(decode_bytes(&bmp, None).unwrap().format(), ImageFormat::Bmp);

    let wbmp = encode_bytes(&sample(), ImageFormat::Wbmp).unwrap();
    let out = decode_bytes(&wbmp, None).unwrap();
    assert_eq!(out.format(), ImageFormat::Wbmp);
    assert_eq!(out.dimensions(), (4, 3));
}

#[test]
fn garbage_is_codec_error() {
    assert!(matches!(
        decode_bytes(b"definitely not an image", None),
        Err(LumenError::Codec(_))
    ));
    assert!(matches!(
        decode_bytes(b"\x89PNG\r\n\x1a\nbroken", Some(ImageFormat::Png)),
        Err(LumenError::Codec(_))
    ));
}

#[test]
fn file_errors_are_typed() {
    let err = decode_file(Path::new("target/nowhere/picture.tiff")).unwrap_err();
    assert!(matches!(err, LumenError::UnsupportedFormat { ref extension, .. } if extension == "tiff"));

    let err = decode_file(Path::new("target/nowhere/picture.png")).unwrap_err();
    assert!(matches!(err, LumenError::Io(_)));

    assert_eq!(
        format_for_path(Path::new("x/y.JFIF")).unwrap(),
        ImageFormat::Jpeg
    );
}
