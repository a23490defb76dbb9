//! Rejection gate for images that are not plant tissue
//!
//! Checks run in a fixed order and stop at the first failure. A rejected
//! image is still a successful analysis; it is reported as "Not a Crop".

use serde::{Deserialize, Serialize};

use crate::color::ImageAnalysis;
use crate::config::ValidationThresholds;

/// Why an image was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Flat or synthetic image
    FewUniqueColors,
    /// Graphic or text with large pure black/white areas
    ExcessPurePixels,
    /// Texture too uniform to be organic
    LowVariance,
    /// Likely a person or animal
    SkinTone,
    /// Too little green, brown or yellow content
    LowPlantContent,
}

impl RejectionReason {
    pub fn description(&self) -> &'static str {
        match self {
            RejectionReason::FewUniqueColors => "too few distinct colors",
            RejectionReason::ExcessPurePixels => "too much pure black or white",
            RejectionReason::LowVariance => "texture too uniform",
            RejectionReason::SkinTone => "skin tones detected",
            RejectionReason::LowPlantContent => "too little plant-colored content",
        }
    }
}

/// Stage A of the decision procedure
#[derive(Debug, Clone, Default)]
pub struct RejectionGate {
    thresholds: ValidationThresholds,
}

impl RejectionGate {
    pub fn new(thresholds: ValidationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ValidationThresholds {
        &self.thresholds
    }

    /// Return the first failed check, or `None` if the image looks like a plant
    pub fn check(&self, analysis: &ImageAnalysis) -> Option<RejectionReason> {
        let t = &self.thresholds;

        if analysis.unique_colors_ratio < t.min_unique_colors_ratio {
            Some(RejectionReason::FewUniqueColors)
        } else if analysis.pure_pixel_ratio > t.max_pure_pixel_ratio {
            Some(RejectionReason::ExcessPurePixels)
        } else if analysis.variance < t.min_variance {
            Some(RejectionReason::LowVariance)
        } else if analysis.skin_ratio > t.max_skin_ratio {
            Some(RejectionReason::SkinTone)
        } else if analysis.plant_content_ratio() < t.min_plant_content_ratio {
            Some(RejectionReason::LowPlantContent)
        } else {
            None
        }
    }
}
