//! Result assembly
//!
//! Copies the table record for the resolved disease, attaches the crop
//! guess and rounds the reported numbers.

use serde::{Deserialize, Serialize};

use crate::color::ImageAnalysis;
use crate::constants::rounding::{CONFIDENCE_DECIMALS, INDEX_DECIMALS};
use crate::knowledge::{DiseaseKey, RecommendationBundle, Severity};

/// Pathogen label used when a record does not name one
pub const DEFAULT_PATHOGEN: &str = "Biological";

/// Remediation advice in the response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub pesticides: Vec<String>,
    pub preventive_steps: Vec<String>,
    pub organic_solutions: Vec<String>,
}

impl From<&RecommendationBundle> for Recommendations {
    fn from(bundle: &RecommendationBundle) -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            pesticides: owned(bundle.pesticides),
            preventive_steps: owned(bundle.preventive_steps),
            organic_solutions: owned(bundle.organic_solutions),
        }
    }
}

/// Percentages of green, yellow and brown samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub health_index: f64,
    pub chlorosis_index: f64,
    pub necrosis_index: f64,
}

impl AnalysisSummary {
    pub fn from_analysis(analysis: &ImageAnalysis) -> Self {
        Self {
            health_index: percentage(analysis.pixel_healthy_ratio),
            chlorosis_index: percentage(analysis.pixel_yellow_ratio),
            necrosis_index: percentage(analysis.pixel_brown_ratio),
        }
    }
}

/// Final answer for one image, serialised as-is by the HTTP layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Display name of the disease
    pub disease: String,
    pub scientific_name: String,
    pub pathogen: String,
    pub crop: String,
    pub severity: Severity,
    pub confidence: f64,
    pub recommendations: Recommendations,
    pub analysis: AnalysisSummary,
}

impl ClassificationResult {
    /// Assemble a result from a table key and the crop label
    pub fn build(key: DiseaseKey, confidence: f64, crop: &str, analysis: &ImageAnalysis) -> Self {
        let record = key.record();
        Self {
            disease: record.name.to_string(),
            scientific_name: record.scientific_name.unwrap_or_default().to_string(),
            pathogen: record.pathogen.unwrap_or(DEFAULT_PATHOGEN).to_string(),
            crop: crop.to_string(),
            severity: record.severity,
            confidence: round_to(confidence.clamp(0.0, 1.0), CONFIDENCE_DECIMALS),
            recommendations: Recommendations::from(&record.recommendations),
            analysis: AnalysisSummary::from_analysis(analysis),
        }
    }

    /// Table key for the reported disease name
    pub fn disease_key(&self) -> Option<DiseaseKey> {
        DiseaseKey::from_display_name(&self.disease)
    }

    pub fn is_rejected(&self) -> bool {
        self.disease_key() == Some(DiseaseKey::NotACrop)
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Ratio in `[0, 1]` as a percentage with one decimal
pub fn percentage(ratio: f64) -> f64 {
    round_to(ratio.clamp(0.0, 1.0) * 100.0, INDEX_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::tests::plant_analysis;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(0.95, 4), 0.95);
        assert_eq!(round_to(12.34, 1), 12.3);
        assert_eq!(round_to(12.35001, 1), 12.4);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0.0), 0.0);
        assert_eq!(percentage(1.0), 100.0);
        assert_eq!(percentage(0.12345), 12.3);
        assert_eq!(percentage(0.6789), 67.9);
    }

    #[test]
    fn test_build_copies_record() {
        let analysis = plant_analysis();
        let result = ClassificationResult::build(DiseaseKey::VerticilliumWilt, 0.88, "Cotton", &analysis);

        assert_eq!(result.disease, "Verticillium Wilt");
        assert_eq!(result.scientific_name, "Verticillium dahliae");
        assert_eq!(result.pathogen, "Soil-borne Fungal");
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.confidence, 0.88);
        // Crop comes from the guess, not the table
        assert_eq!(result.crop, "Cotton");
        assert_eq!(result.recommendations.preventive_steps.len(), 4);
        assert_eq!(result.disease_key(), Some(DiseaseKey::VerticilliumWilt));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let result = ClassificationResult::build(DiseaseKey::Healthy, 0.95, "Detected Plant", &plant_analysis());
        assert_eq!(result.scientific_name, "");
        assert_eq!(result.pathogen, "Biological");
        assert!(result.recommendations.pesticides.is_empty());
    }

    #[test]
    fn test_summary_indices() {
        let analysis = ImageAnalysis {
            pixel_healthy_ratio: 0.71234,
            pixel_yellow_ratio: 0.05,
            pixel_brown_ratio: 0.1266,
            ..plant_analysis()
        };
        let summary = AnalysisSummary::from_analysis(&analysis);
        assert_eq!(summary.health_index, 71.2);
        assert_eq!(summary.chlorosis_index, 5.0);
        assert_eq!(summary.necrosis_index, 12.7);
    }

    #[test]
    fn test_json_shape() {
        let result = ClassificationResult::build(DiseaseKey::PowderyMildew, 0.92, "Cotton", &plant_analysis());
        let json = serde_json::to_value(&result).unwrap();

        let object = json.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "analysis",
                "confidence",
                "crop",
                "disease",
                "pathogen",
                "recommendations",
                "scientific_name",
                "severity",
            ]
        );
        assert_eq!(json["severity"], "Medium");
        assert_eq!(json["disease"], "Powdery Mildew");
        assert!(json["analysis"]["health_index"].is_number());
        assert!(json["recommendations"]["organic_solutions"].is_array());
    }

    #[test]
    fn test_rejected_flag() {
        let result = ClassificationResult::build(DiseaseKey::NotACrop, 0.0, "Unknown Object", &plant_analysis());
        assert!(result.is_rejected());
        assert_eq!(result.confidence, 0.0);
    }
}
