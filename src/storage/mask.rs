/// A rectangular region of an image with a per-pixel inclusion bitmap.
///
/// Produced by cutters; `(x, y)` is the top-left corner in image coordinates.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Mask {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// A fully included (all bits set) region.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            bits: vec![true; width as usize * height as usize],
        }
    }

    pub fn set_all(&mut self, value: bool) {
        self.bits.fill(value);
    }

    /// Inclusion bit at mask-local coordinates.
    pub fn bit(&self, local_x: u32, local_y: u32) -> Option<bool> {
        self.local_index(local_x, local_y).map(|i| self.bits[i])
    }

    /// Returns `false` when the coordinates fall outside the mask.
    pub fn set_bit(&mut self, local_x: u32, local_y: u32, value: bool) -> bool {
        match self.local_index(local_x, local_y) {
            Some(i) => {
                self.bits[i] = value;
                true
            }
            None => false,
        }
    }

    /// Whether image coordinates `(x, y)` fall inside the region and are included.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        let (Some(lx), Some(ly)) = (x.checked_sub(self.x), y.checked_sub(self.y)) else {
            return false;
        };
        self.bit(lx, ly).unwrap_or(false)
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    fn local_index(&self, lx: u32, ly: u32) -> Option<usize> {
        (lx < self.width && ly < self.height)
            .then(|| ly as usize * self.width as usize + lx as usize)
    }
}
