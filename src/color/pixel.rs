//! Per-pixel color buckets
//!
//! Each sample is tested against six independent rules using only its own
//! channel values and brightness. The buckets are not exclusive: a dark
//! orange pixel can be leaf-brown, yellow and skin-toned at once.

use crate::color::ColorConverter;
use crate::constants::pixel::*;

/// One sample from the analysis grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelSample {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels packed as `0xRRGGBB`, for distinct-color counting
    pub fn packed(&self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

impl From<image::Rgb<u8>> for PixelSample {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self { r, g, b }
    }
}

/// Bucket membership of a single sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelClass {
    pub green: bool,
    pub leaf_brown: bool,
    pub yellow: bool,
    pub white: bool,
    pub skin: bool,
    /// Near pure black or near pure white
    pub pure: bool,
}

impl PixelClass {
    /// Classify one sample
    pub fn classify(converter: &ColorConverter, sample: PixelSample) -> Self {
        let brightness = converter.brightness(sample.r, sample.g, sample.b);
        let (r, g, b) = (sample.r as i32, sample.g as i32, sample.b as i32);

        Self {
            green: g > r + GREEN_MARGIN && g > b + GREEN_MARGIN && brightness > GREEN_MIN_BRIGHTNESS,
            leaf_brown: r > g + BROWN_MARGIN && r > b + BROWN_MARGIN && brightness < BROWN_MAX_BRIGHTNESS,
            yellow: r > b + YELLOW_RED_OVER_BLUE && g > b + YELLOW_GREEN_OVER_BLUE,
            white: r > WHITE_MIN_CHANNEL
                && g > WHITE_MIN_CHANNEL
                && b > WHITE_MIN_CHANNEL
                && (r - g).abs() < WHITE_MAX_SPREAD
                && (g - b).abs() < WHITE_MAX_SPREAD,
            skin: r > g + SKIN_RED_OVER_GREEN
                && g > b
                && r > SKIN_MIN_RED
                && r < SKIN_MAX_RED
                && brightness < SKIN_MAX_BRIGHTNESS,
            pure: (r < PURE_BLACK_MAX && g < PURE_BLACK_MAX && b < PURE_BLACK_MAX)
                || (r > PURE_WHITE_MIN && g > PURE_WHITE_MIN && b > PURE_WHITE_MIN),
        }
    }

    /// Plausible foliage: green or leaf-brown
    pub fn is_plant(&self) -> bool {
        self.green || self.leaf_brown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(r: u8, g: u8, b: u8) -> PixelClass {
        PixelClass::classify(&ColorConverter::new(), PixelSample::new(r, g, b))
    }

    #[test]
    fn test_packed_color() {
        assert_eq!(PixelSample::new(0x12, 0x34, 0x56).packed(), 0x123456);
        assert_eq!(PixelSample::new(255, 255, 255).packed(), 0xFFFFFF);
    }

    #[test]
    fn test_leaf_green() {
        let class = classify(60, 180, 60);
        assert!(class.green);
        assert!(class.is_plant());
        assert!(!class.leaf_brown && !class.yellow && !class.white && !class.skin && !class.pure);
    }

    #[test]
    fn test_green_margin_is_strict() {
        // g must exceed r + 2, not equal it
        assert!(!classify(100, 102, 50).green);
        assert!(classify(100, 103, 50).green);
    }

    #[test]
    fn test_dark_green_fails_brightness() {
        // brightness = 0.587 * 30 + 0.299 * 5 + 0.114 * 5 < 20
        assert!(!classify(5, 30, 5).green);
    }

    #[test]
    fn test_leaf_brown() {
        let class = classify(130, 50, 55);
        assert!(class.leaf_brown);
        assert!(class.is_plant());
        // g < b keeps it out of skin and yellow
        assert!(!class.skin && !class.yellow);
    }

    #[test]
    fn test_bright_brown_is_not_leaf_brown() {
        // brightness above 160
        assert!(!classify(250, 200, 100).leaf_brown);
    }

    #[test]
    fn test_yellow() {
        let class = classify(200, 190, 60);
        assert!(class.yellow);
        assert!(!class.green && !class.leaf_brown && !class.skin);
    }

    #[test]
    fn test_white_requires_neutral_channels() {
        assert!(classify(205, 200, 198).white);
        assert!(!classify(200, 220, 200).white);
        assert!(!classify(150, 150, 150).white);
    }

    #[test]
    fn test_skin_tone() {
        let class = classify(200, 140, 110);
        assert!(class.skin);
        // skin tones also satisfy the brown rule when dark enough
        assert!(classify(150, 100, 80).leaf_brown);
        assert!(classify(150, 100, 80).skin);
    }

    #[test]
    fn test_pure_extremes() {
        assert!(classify(0, 0, 0).pure);
        assert!(classify(1, 1, 1).pure);
        assert!(!classify(2, 2, 2).pure);
        assert!(classify(255, 255, 255).pure);
        assert!(classify(254, 254, 254).pure);
        assert!(!classify(253, 253, 253).pure);
    }

    #[test]
    fn test_pure_white_is_also_white() {
        let class = classify(255, 255, 255);
        assert!(class.pure && class.white);
    }
}
