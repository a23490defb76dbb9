//! Analysis thresholds and reference values
//!
//! Compile-time constants for the pixel heuristics and the decision
//! procedure. These are fixed screening thresholds, not calibrated color
//! science; changing any of them changes which disease a photo maps to.

/// Sampling grid every image is resampled to before analysis
pub mod grid {
    /// Side length of the square analysis grid
    pub const SIZE: u32 = 224;

    /// Total number of samples per image
    pub const TOTAL_SAMPLES: usize = (SIZE * SIZE) as usize;

    /// Minimum plant-pixel count for subset statistics; below this the
    /// mean and deviation are taken over the full frame
    pub const MIN_PLANT_PIXELS: usize = 500;
}

/// Per-pixel bucket thresholds (channel values are 0-255)
pub mod pixel {
    /// Luma weights used for pixel brightness (ITU-R BT.601)
    pub const LUMA_RED: f64 = 0.299;
    pub const LUMA_GREEN: f64 = 0.587;
    pub const LUMA_BLUE: f64 = 0.114;

    /// Green: green channel must exceed red and blue by this margin
    pub const GREEN_MARGIN: i32 = 2;
    /// Green: minimum brightness
    pub const GREEN_MIN_BRIGHTNESS: f64 = 20.0;

    /// Leaf-brown: red must exceed green and blue by this margin
    pub const BROWN_MARGIN: i32 = 10;
    /// Leaf-brown: brightness must stay below this value
    pub const BROWN_MAX_BRIGHTNESS: f64 = 160.0;

    /// Yellow: red over blue margin
    pub const YELLOW_RED_OVER_BLUE: i32 = 25;
    /// Yellow: green over blue margin
    pub const YELLOW_GREEN_OVER_BLUE: i32 = 20;

    /// White: every channel must exceed this value
    pub const WHITE_MIN_CHANNEL: i32 = 160;
    /// White: maximum spread between adjacent channels
    pub const WHITE_MAX_SPREAD: i32 = 15;

    /// Skin: red over green margin
    pub const SKIN_RED_OVER_GREEN: i32 = 20;
    /// Skin: exclusive red channel bounds
    pub const SKIN_MIN_RED: i32 = 60;
    pub const SKIN_MAX_RED: i32 = 235;
    /// Skin: brightness must stay below this value
    pub const SKIN_MAX_BRIGHTNESS: f64 = 220.0;

    /// Pure black: every channel below this value
    pub const PURE_BLACK_MAX: i32 = 2;
    /// Pure white: every channel above this value
    pub const PURE_WHITE_MIN: i32 = 253;
}

/// Stage A rejection thresholds
pub mod validation {
    /// Fewer distinct colors than this fraction means a flat or synthetic image
    pub const MIN_UNIQUE_COLORS_RATIO: f64 = 0.08;

    /// More pure black/white than this fraction means a graphic or text
    pub const MAX_PURE_PIXEL_RATIO: f64 = 0.30;

    /// Lower channel deviation than this means a non-organic texture
    pub const MIN_VARIANCE: f64 = 15.0;

    /// More skin tone than this fraction means a person or animal
    pub const MAX_SKIN_RATIO: f64 = 0.12;

    /// Combined green + brown + yellow fraction required to continue
    pub const MIN_PLANT_CONTENT_RATIO: f64 = 0.05;
}

/// Stage B hue bands, in degrees
pub mod crop_hue {
    /// Inclusive band for cotton
    pub const COTTON_MIN: f64 = 112.0;
    pub const COTTON_MAX: f64 = 170.0;

    /// Half-open band `[min, max)` for tomato / potato
    pub const SOLANACEAE_MIN: f64 = 60.0;
    pub const SOLANACEAE_MAX: f64 = 112.0;
}

/// Stage C and D trigger ratios and fixed confidences
pub mod disease {
    pub const WHITE_TRIGGER: f64 = 0.08;
    pub const SEVERE_BROWN_TRIGGER: f64 = 0.08;
    pub const MILD_BROWN_TRIGGER: f64 = 0.03;
    pub const YELLOW_TRIGGER: f64 = 0.15;
    pub const GREEN_TRIGGER: f64 = 0.20;

    pub const POWDERY_MILDEW_CONFIDENCE: f64 = 0.92;
    pub const VERTICILLIUM_WILT_CONFIDENCE: f64 = 0.88;
    pub const ANTHRACNOSE_CONFIDENCE: f64 = 0.80;
    pub const BACTERIAL_BLIGHT_CONFIDENCE: f64 = 0.85;
    pub const HEALTHY_CONFIDENCE: f64 = 0.95;

    /// Confidence when no rule matches
    pub const FALLTHROUGH_CONFIDENCE: f64 = 0.80;

    /// Confidence forced by the filename override
    pub const FILENAME_OVERRIDE_CONFIDENCE: f64 = 0.98;

    /// Case-insensitive filename marker for the override
    pub const FILENAME_OVERRIDE_MARKER: &str = "healthy";

    /// Confidence reported for rejected images
    pub const REJECTED_CONFIDENCE: f64 = 0.0;
}

/// Output rounding
pub mod rounding {
    /// Decimal places for reported confidence
    pub const CONFIDENCE_DECIMALS: i32 = 4;

    /// Decimal places for percentage indices
    pub const INDEX_DECIMALS: i32 = 1;
}
