//! Color space conversion utilities
//!
//! Provides the two conversions the pixel heuristics need:
//! - 8-bit RGB to perceptual brightness (BT.601 luma)
//! - mean RGB to HSV, with hue in degrees

use palette::{FromColor, Hsv, Srgb};

use crate::constants::pixel::{LUMA_BLUE, LUMA_GREEN, LUMA_RED};

/// HSV triple with hue in degrees and saturation/value in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvColor {
    /// Hue in degrees, `[0, 360)`
    pub hue: f64,
    /// Saturation, `[0, 1]`
    pub saturation: f64,
    /// Value, `[0, 1]`
    pub value: f64,
}

/// Color converter for the analysis pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    /// Create a new color converter
    pub fn new() -> Self {
        Self
    }

    /// Perceptual brightness of an 8-bit RGB pixel, in `[0, 255]`
    pub fn brightness(&self, r: u8, g: u8, b: u8) -> f64 {
        LUMA_RED * r as f64 + LUMA_GREEN * g as f64 + LUMA_BLUE * b as f64
    }

    /// Convert RGB channel values in `[0, 255]` to HSV
    ///
    /// Accepts fractional channels so channel means can be converted
    /// directly. A neutral gray has hue 0.
    pub fn rgb_to_hsv(&self, r: f64, g: f64, b: f64) -> HsvColor {
        let srgb = Srgb::new(r / 255.0, g / 255.0, b / 255.0);
        let hsv: Hsv<palette::encoding::Srgb, f64> = Hsv::from_color(srgb);
        HsvColor {
            hue: hsv.hue.into_positive_degrees(),
            saturation: hsv.saturation,
            value: hsv.value,
        }
    }
}
