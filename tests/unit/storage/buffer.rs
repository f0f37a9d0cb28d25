use super::*;

#[test]
fn new_rejects_length_mismatch() {
    let err = PixelBuffer::new(2, 2, vec![0; 3], ImageFormat::Png).unwrap_err();
    assert!(matches!(err, LumenError::Image(_)));
    assert!(PixelBuffer::new(0, 0, vec![], ImageFormat::Png).is_ok());
}

#[test]
fn get_set_address_row_major() {
    let mut buf = PixelBuffer::filled(3, 2, Rgba8::gray(0), ImageFormat::Png).unwrap();
    buf.set(2, 1, Rgba8::new(1, 2, 3, 4)).unwrap();
    assert_eq!(buf.index_of(2, 1), Some(5));
    assert_eq!(buf.pixels()[5], Rgba8::new(1, 2, 3, 4).to_argb());
    assert_eq!(buf.get(2, 1), Some(Rgba8::new(1, 2, 3, 4)));
    assert_eq!(buf.get(3, 0), None);
    assert!(buf.set(0, 2, Rgba8::gray(1)).is_err());
}

#[test]
fn rgba8_bytes_convert_both_ways() {
    let bytes = [10u8, 20, 30, 40, 50, 60, 70, 80];
    let buf = PixelBuffer::from_rgba8(2, 1, &bytes, ImageFormat::Bmp).unwrap();
    assert_eq!(buf.get(1, 0), Some(Rgba8::new(50, 60, 70, 80)));
    assert_eq!(buf.to_rgba8(), bytes);
    assert!(PixelBuffer::from_rgba8(2, 1, &bytes[..7], ImageFormat::Bmp).is_err());
}

#[test]
fn rows_of_empty_buffer_is_empty() {
    let buf = PixelBuffer::new(0, 5, vec![], ImageFormat::Png).unwrap();
    assert_eq!(buf.rows().count(), 0);
    let buf = PixelBuffer::filled(2, 3, Rgba8::gray(9), ImageFormat::Png).unwrap();
    assert_eq!(buf.rows().count(), 3);
}
