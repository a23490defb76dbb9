//! Disease selection rules
//!
//! The rules are evaluated in table order and the first match wins, even
//! when a later rule would match more strongly. The filename override is
//! applied afterwards and beats every rule.

use crate::color::ImageAnalysis;
use crate::constants::disease::*;
use crate::knowledge::DiseaseKey;

/// One entry of the ordered rule chain
#[derive(Debug, Clone, Copy)]
pub struct DiseaseRule {
    /// Short identifier used in logs
    pub name: &'static str,
    pub outcome: DiseaseKey,
    pub confidence: f64,
    predicate: fn(&ImageAnalysis) -> bool,
}

impl DiseaseRule {
    pub fn matches(&self, analysis: &ImageAnalysis) -> bool {
        (self.predicate)(analysis)
    }
}

fn white_coating(a: &ImageAnalysis) -> bool {
    a.white_indicator > WHITE_TRIGGER
}

fn severe_browning(a: &ImageAnalysis) -> bool {
    a.pixel_brown_ratio > SEVERE_BROWN_TRIGGER
}

fn mild_browning(a: &ImageAnalysis) -> bool {
    a.pixel_brown_ratio > MILD_BROWN_TRIGGER
}

fn yellowing(a: &ImageAnalysis) -> bool {
    a.pixel_yellow_ratio > YELLOW_TRIGGER
}

fn mostly_green(a: &ImageAnalysis) -> bool {
    a.pixel_healthy_ratio > GREEN_TRIGGER
}

/// Ordered rule chain; order is the tie-break policy
pub const DISEASE_RULES: [DiseaseRule; 5] = [
    DiseaseRule {
        name: "white_coating",
        outcome: DiseaseKey::PowderyMildew,
        confidence: POWDERY_MILDEW_CONFIDENCE,
        predicate: white_coating,
    },
    DiseaseRule {
        name: "severe_browning",
        outcome: DiseaseKey::VerticilliumWilt,
        confidence: VERTICILLIUM_WILT_CONFIDENCE,
        predicate: severe_browning,
    },
    DiseaseRule {
        name: "mild_browning",
        outcome: DiseaseKey::Anthracnose,
        confidence: ANTHRACNOSE_CONFIDENCE,
        predicate: mild_browning,
    },
    DiseaseRule {
        name: "yellowing",
        outcome: DiseaseKey::BacterialBlight,
        confidence: BACTERIAL_BLIGHT_CONFIDENCE,
        predicate: yellowing,
    },
    DiseaseRule {
        name: "mostly_green",
        outcome: DiseaseKey::Healthy,
        confidence: HEALTHY_CONFIDENCE,
        predicate: mostly_green,
    },
];

/// How a diagnosis was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisSource {
    /// A rule from [`DISEASE_RULES`] matched
    Rule(&'static str),
    /// No rule matched
    Fallthrough,
    /// The filename contained the override marker
    FilenameOverride,
}

/// Selected disease and its fixed confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnosis {
    pub key: DiseaseKey,
    pub confidence: f64,
    pub source: DiagnosisSource,
}

/// Run the rule chain over an analysis
pub fn select_disease(analysis: &ImageAnalysis) -> Diagnosis {
    DISEASE_RULES
        .iter()
        .find(|rule| rule.matches(analysis))
        .map(|rule| Diagnosis {
            key: rule.outcome,
            confidence: rule.confidence,
            source: DiagnosisSource::Rule(rule.name),
        })
        .unwrap_or(Diagnosis {
            key: DiseaseKey::Healthy,
            confidence: FALLTHROUGH_CONFIDENCE,
            source: DiagnosisSource::Fallthrough,
        })
}

/// Whether a filename carries the override marker (case-insensitive)
pub fn has_override_marker(filename: &str) -> bool {
    filename.to_lowercase().contains(FILENAME_OVERRIDE_MARKER)
}

/// Force a healthy diagnosis when the filename carries the override marker
pub fn apply_filename_override(diagnosis: Diagnosis, filename: &str) -> Diagnosis {
    if has_override_marker(filename) {
        Diagnosis {
            key: DiseaseKey::Healthy,
            confidence: FILENAME_OVERRIDE_CONFIDENCE,
            source: DiagnosisSource::FilenameOverride,
        }
    } else {
        diagnosis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::tests::plant_analysis;

    fn with_ratios(white: f64, brown: f64, yellow: f64, green: f64) -> ImageAnalysis {
        ImageAnalysis {
            white_indicator: white,
            pixel_brown_ratio: brown,
            pixel_yellow_ratio: yellow,
            pixel_healthy_ratio: green,
            ..plant_analysis()
        }
    }

    #[test]
    fn test_each_rule() {
        let cases = [
            (with_ratios(0.09, 0.0, 0.0, 0.5), DiseaseKey::PowderyMildew, 0.92),
            (with_ratios(0.0, 0.09, 0.0, 0.5), DiseaseKey::VerticilliumWilt, 0.88),
            (with_ratios(0.0, 0.05, 0.0, 0.5), DiseaseKey::Anthracnose, 0.80),
            (with_ratios(0.0, 0.0, 0.2, 0.5), DiseaseKey::BacterialBlight, 0.85),
            (with_ratios(0.0, 0.0, 0.0, 0.5), DiseaseKey::Healthy, 0.95),
        ];
        for (analysis, key, confidence) in cases {
            let diagnosis = select_disease(&analysis);
            assert_eq!(diagnosis.key, key);
            assert_eq!(diagnosis.confidence, confidence);
            assert!(matches!(diagnosis.source, DiagnosisSource::Rule(_)));
        }
    }

    #[test]
    fn test_fallthrough() {
        let diagnosis = select_disease(&with_ratios(0.0, 0.0, 0.1, 0.1));
        assert_eq!(diagnosis.key, DiseaseKey::Healthy);
        assert_eq!(diagnosis.confidence, 0.80);
        assert_eq!(diagnosis.source, DiagnosisSource::Fallthrough);
    }

    #[test]
    fn test_first_match_wins() {
        // Matches every rule; the white coating rule is first
        let diagnosis = select_disease(&with_ratios(0.09, 0.5, 0.5, 0.5));
        assert_eq!(diagnosis.key, DiseaseKey::PowderyMildew);
        assert_eq!(diagnosis.source, DiagnosisSource::Rule("white_coating"));

        // Severe browning shadows mild browning and yellowing
        let diagnosis = select_disease(&with_ratios(0.0, 0.5, 0.5, 0.5));
        assert_eq!(diagnosis.key, DiseaseKey::VerticilliumWilt);
    }

    #[test]
    fn test_triggers_are_strict() {
        assert_eq!(select_disease(&with_ratios(0.08, 0.0, 0.0, 0.5)).key, DiseaseKey::Healthy);
        assert_eq!(select_disease(&with_ratios(0.0, 0.08, 0.0, 0.5)).key, DiseaseKey::Anthracnose);
        assert_eq!(select_disease(&with_ratios(0.0, 0.03, 0.0, 0.5)).key, DiseaseKey::Healthy);
        assert_eq!(
            select_disease(&with_ratios(0.0, 0.0, 0.15, 0.20)).source,
            DiagnosisSource::Fallthrough
        );
    }

    #[test]
    fn test_rule_order() {
        let order: Vec<_> = DISEASE_RULES.iter().map(|r| r.outcome).collect();
        assert_eq!(
            order,
            vec![
                DiseaseKey::PowderyMildew,
                DiseaseKey::VerticilliumWilt,
                DiseaseKey::Anthracnose,
                DiseaseKey::BacterialBlight,
                DiseaseKey::Healthy,
            ]
        );
    }

    #[test]
    fn test_override_marker_any_case() {
        assert!(has_override_marker("healthy_leaf.jpg"));
        assert!(has_override_marker("Leaf_HEALTHY.PNG"));
        assert!(has_override_marker("unhealthyish.jpg"));
        assert!(!has_override_marker("leaf.jpg"));
        assert!(!has_override_marker(""));
    }

    #[test]
    fn test_override_beats_rules() {
        let diseased = select_disease(&with_ratios(0.0, 0.5, 0.0, 0.5));
        let overridden = apply_filename_override(diseased, "My_Healthy_Plant.jpg");
        assert_eq!(overridden.key, DiseaseKey::Healthy);
        assert_eq!(overridden.confidence, 0.98);
        assert_eq!(overridden.source, DiagnosisSource::FilenameOverride);

        let untouched = apply_filename_override(diseased, "field_photo.jpg");
        assert_eq!(untouched, diseased);
    }
}
