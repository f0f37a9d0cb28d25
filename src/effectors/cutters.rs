use crate::{
    effectors::effector::ImageCutter,
    foundation::error::{LumenError, LumenResult},
    storage::{buffer::PixelBuffer, mask::Mask},
};

/// Splits a buffer into a `columns` x `rows` grid of fully included masks.
///
/// Tiles are emitted row-major. The last column and row absorb any remainder, so the masks
/// always cover the whole image exactly once. Counts larger than the image are clamped so
/// no tile is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCutter {
    columns: u32,
    rows: u32,
}

impl GridCutter {
    pub fn new(columns: u32, rows: u32) -> LumenResult<Self> {
        if columns == 0 || rows == 0 {
            return Err(LumenError::config(format!(
                "grid cutter needs at least one column and one row, got {columns}x{rows}"
            )));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }
}

impl ImageCutter for GridCutter {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn cut(&self, buf: &PixelBuffer) -> Vec<Mask> {
        let (w, h) = buf.dimensions();
        if w == 0 || h == 0 {
            return Vec::new();
        }
        let cols = self.columns.min(w);
        let rows = self.rows.min(h);
        let (tile_w, tile_h) = (w / cols, h / rows);

        let mut masks = Vec::with_capacity(cols as usize * rows as usize);
        for r in 0..rows {
            let y = r * tile_h;
            let mh = if r + 1 == rows { h - y } else { tile_h };
            for c in 0..cols {
                let x = c * tile_w;
                let mw = if c + 1 == cols { w - x } else { tile_w };
                masks.push(Mask::new(x, y, mw, mh));
            }
        }
        masks
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effectors/cutters.rs"]
mod tests;
