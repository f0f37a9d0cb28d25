use super::*;
use crate::foundation::core::{ImageFormat, Rgba8};

fn buf(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::filled(w, h, Rgba8::gray(0), ImageFormat::Png).unwrap()
}

#[test]
fn zero_counts_are_rejected() {
    assert!(matches!(GridCutter::new(0, 2), Err(LumenError::Config(_))));
    assert!(GridCutter::new(2, 0).is_err());
}

#[test]
fn even_grid_is_row_major() {
    let masks = GridCutter::new(2, 2).unwrap().cut(&buf(4, 4));
    let origins: Vec<_> = masks.iter().map(|m| (m.x, m.y, m.width, m.height)).collect();
    assert_eq!(
        origins,
        vec![(0, 0, 2, 2), (2, 0, 2, 2), (0, 2, 2, 2), (2, 2, 2, 2)]
    );
}

#[test]
fn remainder_goes_to_last_tile_and_covers_once() {
    let image = buf(7, 5);
    let masks = GridCutter::new(3, 2).unwrap().cut(&image);
    assert_eq!(masks.len(), 6);
    assert_eq!((masks[2].x, masks[2].width), (4, 3));
    assert_eq!((masks[5].y, masks[5].height), (2, 3));

    for y in 0..5 {
        for x in 0..7 {
            let hits = masks.iter().filter(|m| m.contains(x, y)).count();
            assert_eq!(hits, 1, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn counts_clamp_to_image_size() {
    let masks = GridCutter::new(10, 10).unwrap().cut(&buf(3, 2));
    assert_eq!(masks.len(), 6);
    assert!(masks.iter().all(|m| m.area() == 1));
    assert!(GridCutter::new(2, 2).unwrap().cut(&buf(0, 0)).is_empty());
}
