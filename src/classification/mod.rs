//! Disease classification
//!
//! Turns an [`ImageAnalysis`] into a [`ClassificationResult`] in five stages:
//!
//! 1. Rejection gate ([`validation`]): non-plant images short-circuit to
//!    "Not a Crop" with zero confidence
//! 2. Crop guess from the mean hue ([`crop`])
//! 3. Ordered disease rules, first match wins ([`disease`])
//! 4. Optional "healthy" filename override ([`disease`])
//! 5. Result assembly with rounding ([`result`])
//!
//! Classification never fails. Uncertainty ends up in the confidence score
//! or in the "Not a Crop" sentinel.

pub mod crop;
pub mod disease;
pub mod result;
pub mod validation;

pub use crop::CropGuess;
pub use disease::{select_disease, Diagnosis, DiagnosisSource, DiseaseRule, DISEASE_RULES};
pub use result::{AnalysisSummary, ClassificationResult, Recommendations};
pub use validation::{RejectionGate, RejectionReason};

use crate::color::ImageAnalysis;
use crate::config::AnalyzerConfig;
use crate::constants::disease::REJECTED_CONFIDENCE;
use crate::knowledge::DiseaseKey;

/// Runs the decision procedure over extracted features
#[derive(Debug, Clone)]
pub struct Classifier {
    gate: RejectionGate,
    filename_override: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }
}

impl Classifier {
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            gate: RejectionGate::new(config.validation.clone()),
            filename_override: config.filename_override,
        }
    }

    pub fn gate(&self) -> &RejectionGate {
        &self.gate
    }

    pub fn filename_override_enabled(&self) -> bool {
        self.filename_override
    }

    /// Classify one image
    ///
    /// `filename` is only consulted by the override stage.
    pub fn classify(&self, analysis: &ImageAnalysis, filename: Option<&str>) -> ClassificationResult {
        if let Some(reason) = self.gate.check(analysis) {
            tracing::info!(
                reason = ?reason,
                "rejected image: {}",
                reason.description()
            );
            return ClassificationResult::build(
                DiseaseKey::NotACrop,
                REJECTED_CONFIDENCE,
                CropGuess::UnknownObject.label(),
                analysis,
            );
        }

        let crop = CropGuess::from_hue(analysis.hue);
        let mut diagnosis = select_disease(analysis);

        if self.filename_override {
            if let Some(name) = filename {
                let overridden = disease::apply_filename_override(diagnosis, name);
                if overridden.source == DiagnosisSource::FilenameOverride {
                    tracing::warn!(
                        filename = name,
                        replaced = %diagnosis.key,
                        "filename override forced a healthy result"
                    );
                }
                diagnosis = overridden;
            }
        }

        tracing::debug!(
            disease = %diagnosis.key,
            confidence = diagnosis.confidence,
            source = ?diagnosis.source,
            crop = crop.label(),
            "classified image"
        );

        ClassificationResult::build(diagnosis.key, diagnosis.confidence, crop.label(), analysis)
    }
}
