use super::*;
use crate::foundation::core::ImageFormat;

// 3x2:
// 1 2 3
// 4 5 6
fn sample() -> PixelBuffer {
    PixelBuffer::new(3, 2, vec![1, 2, 3, 4, 5, 6], ImageFormat::Png).unwrap()
}

#[test]
fn flip_horizontal_reverses_rows() {
    let out = FlipHorizontal.transform(sample()).unwrap();
    assert_eq!(out.pixels(), &[3, 2, 1, 6, 5, 4]);
}

#[test]
fn flip_vertical_reverses_row_order() {
    let out = FlipVertical.transform(sample()).unwrap();
    assert_eq!(out.pixels(), &[4, 5, 6, 1, 2, 3]);
    assert_eq!(out.dimensions(), (3, 2));
}

#[test]
fn rotate90_is_clockwise_and_swaps_dimensions() {
    let out = Rotate90.transform(sample()).unwrap();
    assert_eq!(out.dimensions(), (2, 3));
    // 4 1
    // 5 2
    // 6 3
    assert_eq!(out.pixels(), &[4, 1, 5, 2, 6, 3]);

    let mut buf = sample();
    for _ in 0..4 {
        buf = Rotate90.transform(buf).unwrap();
    }
    assert_eq!(buf, sample());
}
