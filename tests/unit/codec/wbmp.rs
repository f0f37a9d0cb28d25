use super::*;

#[test]
fn uintvar_uses_seven_bit_groups() {
    let mut out = Vec::new();
    write_uintvar(&mut out, 0);
    write_uintvar(&mut out, 127);
    write_uintvar(&mut out, 128);
    write_uintvar(&mut out, 300);
    assert_eq!(out, [0x00, 0x7f, 0x81, 0x00, 0x82, 0x2c]);

    let mut cursor = 0;
    let decoded: Vec<u32> = (0..4)
        .map(|_| read_uintvar(&out, &mut cursor).unwrap())
        .collect();
    assert_eq!(decoded, [0, 127, 128, 300]);
    assert_eq!(cursor, out.len());
}

#[test]
fn encodes_header_and_packed_rows() {
    // 10x1: white, black, then white for the rest
    let mut buf = PixelBuffer::filled(10, 1, Rgba8::gray(255), ImageFormat::Png).unwrap();
    buf.set(1, 0, Rgba8::gray(0)).unwrap();
    let bytes = encode(&buf);
    assert_eq!(bytes, [0, 0, 10, 1, 0b1011_1111, 0b1100_0000]);
}

#[test]
fn decode_thresholds_back_to_black_and_white() {
    let mut buf = PixelBuffer::filled(9, 2, Rgba8::gray(200), ImageFormat::Png).unwrap();
    buf.set(3, 1, Rgba8::gray(127)).unwrap();
    buf.set(8, 0, Rgba8::new(10, 10, 10, 0)).unwrap();

    let out = decode(&encode(&buf)).unwrap();
    assert_eq!(out.dimensions(), (9, 2));
    assert_eq!(out.format(), ImageFormat::Wbmp);
    assert_eq!(out.get(0, 0), Some(Rgba8::gray(255)));
    assert_eq!(out.get(3, 1), Some(Rgba8::gray(0)));
    assert_eq!(out.get(8, 0), Some(Rgba8::gray(0)));
}

#[test]
fn malformed_input_is_codec_error() {
    for bytes in [
        &[][..],
        &[1, 0, 1, 1, 0][..],
        &[0, 0x80, 1, 1, 0][..],
        &[0, 0, 16, 2, 0xff][..],
        &[0, 0, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f][..],
    ] {
        assert!(
            matches!(decode(bytes), Err(LumenError::Codec(_))),
            "{bytes:?}"
        );
    }
}
