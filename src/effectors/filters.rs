//! Pointwise color filters.
//!
//! Every filter here preserves alpha and clamps each channel to `[0, 255]`.

use crate::{
    effectors::effector::PixelFilter,
    foundation::{
        core::Rgba8,
        error::{LumenError, LumenResult},
    },
};

/// Adds a constant to r, g and b.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrightnessFilter {
    value: i32,
}

impl BrightnessFilter {
    /// `value` must lie in `[-255, 255]`.
    pub fn new(value: i32) -> LumenResult<Self> {
        if !(-255..=255).contains(&value) {
            return Err(LumenError::config(format!(
                "brightness value must be between -255 and 255, was {value}"
            )));
        }
        Ok(Self { value })
    }

    /// Fractional brightness; `1.0` adds 255, `-0.5` subtracts 127.
    pub fn from_fraction(fraction: f32) -> LumenResult<Self> {
        if !fraction.is_finite() {
            return Err(LumenError::config("brightness fraction must be finite"));
        }
        Self::new((255.0 * fraction) as i32)
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

impl PixelFilter for BrightnessFilter {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn map_pixel(&self, px: Rgba8) -> Rgba8 {
        let shift = |c: u8| Rgba8::clamp_channel(i32::from(c) + self.value);
        Rgba8::new(shift(px.r), shift(px.g), shift(px.b), px.a)
    }
}

/// Scales r, g and b away from (or towards) mid-gray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContrastFilter {
    value: i32,
    factor: f32,
}

impl ContrastFilter {
    /// `value` must lie in `[-255, 255]`; `0` is the identity.
    pub fn new(value: i32) -> LumenResult<Self> {
        if !(-255..=255).contains(&value) {
            return Err(LumenError::config(format!(
                "contrast value must be between -255 and 255, was {value}"
            )));
        }
        let factor = (259 * (value + 255)) as f32 / (255 * (259 - value)) as f32;
        Ok(Self { value, factor })
    }

    /// Fractional contrast; `1.0` maps to a value of 128.
    pub fn from_fraction(fraction: f32) -> LumenResult<Self> {
        if !fraction.is_finite() {
            return Err(LumenError::config("contrast fraction must be finite"));
        }
        Self::new((128.0 * fraction) as i32)
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

impl PixelFilter for ContrastFilter {
    fn name(&self) -> &'static str {
        "contrast"
    }

    fn map_pixel(&self, px: Rgba8) -> Rgba8 {
        let adjust = |c: u8| Rgba8::clamp_channel((self.factor * (f32::from(c) - 128.0) + 128.0) as i32);
        Rgba8::new(adjust(px.r), adjust(px.g), adjust(px.b), px.a)
    }
}

/// Replaces r, g and b with their integer mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrayscaleFilter;

impl PixelFilter for GrayscaleFilter {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn map_pixel(&self, px: Rgba8) -> Rgba8 {
        let avg = (u16::from(px.r) + u16::from(px.g) + u16::from(px.b)) / 3;
        let avg = avg as u8;
        Rgba8::new(avg, avg, avg, px.a)
    }
}

/// Inverts r, g and b.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NegativeFilter;

impl PixelFilter for NegativeFilter {
    fn name(&self) -> &'static str {
        "negative"
    }

    fn map_pixel(&self, px: Rgba8) -> Rgba8 {
        Rgba8::new(255 - px.r, 255 - px.g, 255 - px.b, px.a)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SepiaFilter;

impl PixelFilter for SepiaFilter {
    fn name(&self) -> &'static str {
        "sepia"
    }

    fn map_pixel(&self, px: Rgba8) -> Rgba8 {
        let (r, g, b) = (f64::from(px.r), f64::from(px.g), f64::from(px.b));
        let mix = |wr: f64, wg: f64, wb: f64| Rgba8::clamp_channel((r * wr + g * wg + b * wb) as i32);
        Rgba8::new(
            mix(0.393, 0.769, 0.189),
            mix(0.349, 0.686, 0.168),
            mix(0.272, 0.534, 0.131),
            px.a,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effectors/filters.rs"]
mod tests;
