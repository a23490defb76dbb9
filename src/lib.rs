//! # Crop Doctor
//!
//! A Rust crate for diagnosing crop leaf diseases from photographs using
//! color heuristics.
//!
//! The pipeline is deterministic and needs no trained model:
//! - Decode the image and resample it to a fixed 224×224 grid
//! - Bucket every sample into non-exclusive color classes (green, leaf
//!   brown, yellow, white, skin, pure black/white)
//! - Reject images that do not look like plant tissue
//! - Guess the crop from the mean hue and pick a disease with an ordered
//!   rule chain
//! - Attach the disease record and remediation advice from a static table
//!
//! ## Example
//!
//! ```rust,no_run
//! use crop_doctor::analyze_crop_image;
//!
//! let bytes = std::fs::read("leaf.jpg")?;
//! let result = analyze_crop_image(&bytes, Some("leaf.jpg"))?;
//! println!("{} ({:.0}%)", result.disease, result.confidence * 100.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

pub mod api;
pub mod classification;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod knowledge;

pub use classification::{ClassificationResult, Classifier, CropGuess, RejectionReason};
pub use color::{FeatureExtractor, ImageAnalysis, VarianceScope};
pub use config::{AnalyzerConfig, ResampleFilter, ValidationThresholds};
pub use error::{AnalysisError, Result};
pub use knowledge::{DiseaseKey, DiseaseRecord, Severity};

/// Reusable analysis pipeline built from one configuration
#[derive(Debug, Clone)]
pub struct CropAnalyzer {
    config: AnalyzerConfig,
    extractor: FeatureExtractor,
    classifier: Classifier,
}

impl CropAnalyzer {
    /// Build an analyzer, validating the configuration first
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor: FeatureExtractor::from_config(&config),
            classifier: Classifier::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Analyze encoded image bytes
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::DecodeError` if the bytes are not a supported
    /// image. Non-plant images are not errors; they come back as "Not a Crop".
    pub fn analyze_bytes(&self, bytes: &[u8], filename: Option<&str>) -> Result<ClassificationResult> {
        self.analyze_bytes_debug(bytes, filename).map(|(result, _)| result)
    }

    /// Analyze encoded image bytes and also return the extracted features
    pub fn analyze_bytes_debug(
        &self,
        bytes: &[u8],
        filename: Option<&str>,
    ) -> Result<(ClassificationResult, ImageAnalysis)> {
        let grid = image_loader::load_image_bytes(bytes, &self.config)?;
        let analysis = self.extractor.extract(&grid);
        let result = self.classifier.classify(&analysis, filename);
        Ok((result, analysis))
    }

    /// Analyze an image file; its file name feeds the override stage
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` if:
    /// - The extension is not a supported image format
    /// - The file cannot be read
    /// - The contents cannot be decoded
    pub fn analyze_file(&self, path: &Path) -> Result<ClassificationResult> {
        let grid = image_loader::load_image(path, &self.config)?;
        let analysis = self.extractor.extract(&grid);
        let filename = path.file_name().and_then(|name| name.to_str());
        Ok(self.classifier.classify(&analysis, filename))
    }
}

impl Default for CropAnalyzer {
    fn default() -> Self {
        let config = AnalyzerConfig::default();
        Self {
            extractor: FeatureExtractor::from_config(&config),
            classifier: Classifier::from_config(&config),
            config,
        }
    }
}

/// Analyze encoded image bytes with the default configuration
///
/// This is the main entry point. `filename` is the original upload name,
/// if any.
pub fn analyze_crop_image(bytes: &[u8], filename: Option<&str>) -> Result<ClassificationResult> {
    CropAnalyzer::default().analyze_bytes(bytes, filename)
}

/// Like [`analyze_crop_image`], also returning the extracted features
pub fn analyze_crop_image_debug(
    bytes: &[u8],
    filename: Option<&str>,
) -> Result<(ClassificationResult, ImageAnalysis)> {
    CropAnalyzer::default().analyze_bytes_debug(bytes, filename)
}

/// Analyze an image file with the default configuration
pub fn analyze_crop_file(path: &Path) -> Result<ClassificationResult> {
    CropAnalyzer::default().analyze_file(path)
}
