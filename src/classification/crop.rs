//! Crop identity guess from the mean hue
//!
//! A single-feature lookup with two named outcomes. It labels the result
//! and never influences the diagnosis or its confidence.

use serde::{Deserialize, Serialize};

use crate::constants::crop_hue::*;

/// Crop label attached to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropGuess {
    Cotton,
    TomatoPotato,
    /// Plant tissue with a hue outside the named bands
    DetectedPlant,
    /// Image rejected by the gate
    UnknownObject,
}

impl CropGuess {
    /// Guess the crop from a hue in degrees
    pub fn from_hue(hue: f64) -> Self {
        if (COTTON_MIN..=COTTON_MAX).contains(&hue) {
            CropGuess::Cotton
        } else if (SOLANACEAE_MIN..SOLANACEAE_MAX).contains(&hue) {
            CropGuess::TomatoPotato
        } else {
            CropGuess::DetectedPlant
        }
    }

    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            CropGuess::Cotton => "Cotton",
            CropGuess::TomatoPotato => "Tomato / Potato",
            CropGuess::DetectedPlant => "Detected Plant",
            CropGuess::UnknownObject => "Unknown Object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cotton_band_is_inclusive() {
        assert_eq!(CropGuess::from_hue(112.0), CropGuess::Cotton);
        assert_eq!(CropGuess::from_hue(120.0), CropGuess::Cotton);
        assert_eq!(CropGuess::from_hue(170.0), CropGuess::Cotton);
        assert_eq!(CropGuess::from_hue(170.01), CropGuess::DetectedPlant);
    }

    #[test]
    fn test_solanaceae_band_is_half_open() {
        assert_eq!(CropGuess::from_hue(60.0), CropGuess::TomatoPotato);
        assert_eq!(CropGuess::from_hue(111.99), CropGuess::TomatoPotato);
        assert_eq!(CropGuess::from_hue(59.99), CropGuess::DetectedPlant);
    }

    #[test]
    fn test_other_hues() {
        assert_eq!(CropGuess::from_hue(0.0), CropGuess::DetectedPlant);
        assert_eq!(CropGuess::from_hue(30.0), CropGuess::DetectedPlant);
        assert_eq!(CropGuess::from_hue(240.0), CropGuess::DetectedPlant);
    }

    #[test]
    fn test_labels() {
        assert_eq!(CropGuess::Cotton.label(), "Cotton");
        assert_eq!(CropGuess::TomatoPotato.label(), "Tomato / Potato");
        assert_eq!(CropGuess::DetectedPlant.label(), "Detected Plant");
        assert_eq!(CropGuess::UnknownObject.label(), "Unknown Object");
    }
}
