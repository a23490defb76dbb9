//! Configuration structures for the crop analysis pipeline.
//!
//! The defaults reproduce the fixed thresholds in [`crate::constants`].
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use crop_doctor::AnalyzerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalyzerConfig::from_json_file(Path::new("analyzer.json"))?;
//!
//! // Or use defaults
//! let config = AnalyzerConfig::default();
//! # Ok::<(), crop_doctor::AnalysisError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{grid, validation};
use crate::error::{AnalysisError, Result};

/// Complete analyzer configuration.
///
/// Serializable to/from JSON so a deployment can pin its thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Side length of the square sampling grid
    pub grid_size: u32,

    /// Minimum plant-pixel count before statistics switch to the full frame
    pub min_plant_pixels: usize,

    /// Resampling filter used to reach the grid size
    #[serde(default)]
    pub resample: ResampleFilter,

    /// Stage A rejection thresholds
    pub validation: ValidationThresholds,

    /// Honor the "healthy" filename override.
    ///
    /// The override trusts a user-supplied filename over pixel evidence.
    /// It is on by default for compatibility with existing clients.
    #[serde(default = "default_filename_override")]
    pub filename_override: bool,
}

/// Resampling filter applied when the decoded image is not grid-sized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResampleFilter {
    Nearest,
    #[default]
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl From<ResampleFilter> for image::imageops::FilterType {
    fn from(filter: ResampleFilter) -> Self {
        use image::imageops::FilterType;
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Bilinear => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Thresholds for the rejection gate.
///
/// All ratios are fractions of the total sample count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationThresholds {
    /// Reject below this distinct-color ratio
    pub min_unique_colors_ratio: f64,

    /// Reject above this pure black/white ratio
    pub max_pure_pixel_ratio: f64,

    /// Reject below this mean channel deviation
    pub min_variance: f64,

    /// Reject above this skin-tone ratio
    pub max_skin_ratio: f64,

    /// Reject below this combined green + brown + yellow ratio
    pub min_plant_content_ratio: f64,
}

fn default_filename_override() -> bool {
    true
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            min_unique_colors_ratio: validation::MIN_UNIQUE_COLORS_RATIO,
            max_pure_pixel_ratio: validation::MAX_PURE_PIXEL_RATIO,
            min_variance: validation::MIN_VARIANCE,
            max_skin_ratio: validation::MAX_SKIN_RATIO,
            min_plant_content_ratio: validation::MIN_PLANT_CONTENT_RATIO,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            grid_size: grid::SIZE,
            min_plant_pixels: grid::MIN_PLANT_PIXELS,
            resample: ResampleFilter::default(),
            validation: ValidationThresholds::default(),
            filename_override: default_filename_override(),
        }
    }
}

impl AnalyzerConfig {
    /// Total number of samples on the configured grid
    pub fn total_samples(&self) -> usize {
        (self.grid_size as usize) * (self.grid_size as usize)
    }

    /// Check that every parameter is in its meaningful range
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(AnalysisError::config("grid_size must be positive"));
        }

        let v = &self.validation;
        let ratios = [
            ("min_unique_colors_ratio", v.min_unique_colors_ratio),
            ("max_pure_pixel_ratio", v.max_pure_pixel_ratio),
            ("max_skin_ratio", v.max_skin_ratio),
            ("min_plant_content_ratio", v.min_plant_content_ratio),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if !v.min_variance.is_finite() || v.min_variance < 0.0 {
            return Err(AnalysisError::config(format!(
                "min_variance must be a non-negative number, got {}",
                v.min_variance
            )));
        }

        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config(format!("cannot serialize config: {}", e)))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("cannot write {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}
