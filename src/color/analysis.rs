//! Aggregate color features of a sampled image
//!
//! Runs the per-pixel bucket rules over every grid sample, then summarises:
//! - bucket counts as fractions of the sample count
//! - distinct colors as a fraction of the sample count
//! - channel means and RMS deviation over the plant pixels, or over the
//!   whole frame when too few plant pixels exist
//! - hue and saturation of the channel means
//!
//! The full-frame fallback also changes what "variance" measures for
//! non-plant images; the rejection gate relies on that.

use std::collections::HashSet;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::{ColorConverter, PixelClass, PixelSample};
use crate::config::AnalyzerConfig;
use crate::constants::grid::MIN_PLANT_PIXELS;

/// Which samples the mean and deviation were computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceScope {
    /// Green or leaf-brown samples only
    PlantPixels,
    /// Every sample in the grid
    FullFrame,
}

/// Color features of one image, consumed by the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// Hue of the mean color, degrees `[0, 360)`
    pub hue: f64,
    /// Saturation of the mean color, `[0, 1]`
    pub saturation: f64,
    /// Mean of the three per-channel RMS deviations
    pub variance: f64,
    pub pure_pixel_ratio: f64,
    pub unique_colors_ratio: f64,
    /// Fraction of green samples
    pub pixel_healthy_ratio: f64,
    /// Fraction of leaf-brown samples
    pub pixel_brown_ratio: f64,
    pub pixel_yellow_ratio: f64,
    /// Fraction of neutral white samples
    pub white_indicator: f64,
    pub skin_ratio: f64,
    /// Number of green or leaf-brown samples
    pub plant_pixel_count: usize,
    pub variance_scope: VarianceScope,
    /// Channel means the hue was derived from
    pub mean_rgb: [f64; 3],
}

impl ImageAnalysis {
    /// Combined green, brown and yellow fraction
    pub fn plant_content_ratio(&self) -> f64 {
        self.pixel_healthy_ratio + self.pixel_brown_ratio + self.pixel_yellow_ratio
    }
}

/// Per-channel mean and RMS deviation over a set of samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStatistics {
    pub mean: [f64; 3],
    pub rms_deviation: [f64; 3],
}

impl ChannelStatistics {
    /// Average of the three channel deviations
    pub fn variance(&self) -> f64 {
        self.rms_deviation.iter().sum::<f64>() / 3.0
    }
}

/// Compute channel statistics over the samples selected by `indices`
///
/// Returns all zeros for an empty selection.
pub fn channel_statistics(samples: &[PixelSample], indices: &[usize]) -> ChannelStatistics {
    if indices.is_empty() {
        return ChannelStatistics {
            mean: [0.0; 3],
            rms_deviation: [0.0; 3],
        };
    }

    let n = indices.len() as f64;
    let mut sum = [0.0f64; 3];
    for &i in indices {
        let s = samples[i];
        sum[0] += s.r as f64;
        sum[1] += s.g as f64;
        sum[2] += s.b as f64;
    }
    let mean = sum.map(|c| c / n);

    let mut sum_sq = [0.0f64; 3];
    for &i in indices {
        let s = samples[i];
        sum_sq[0] += (s.r as f64 - mean[0]).powi(2);
        sum_sq[1] += (s.g as f64 - mean[1]).powi(2);
        sum_sq[2] += (s.b as f64 - mean[2]).powi(2);
    }

    ChannelStatistics {
        mean,
        rms_deviation: sum_sq.map(|s| (s / n).sqrt()),
    }
}

#[derive(Debug, Default)]
struct BucketCounts {
    green: usize,
    leaf_brown: usize,
    yellow: usize,
    white: usize,
    skin: usize,
    pure: usize,
}

impl BucketCounts {
    fn add(&mut self, class: &PixelClass) {
        self.green += class.green as usize;
        self.leaf_brown += class.leaf_brown as usize;
        self.yellow += class.yellow as usize;
        self.white += class.white as usize;
        self.skin += class.skin as usize;
        self.pure += class.pure as usize;
    }
}

/// Feature extractor turning a sampled image into an [`ImageAnalysis`]
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    converter: ColorConverter,
    min_plant_pixels: usize,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    /// Create an extractor with the default plant-pixel minimum
    pub fn new() -> Self {
        Self::with_min_plant_pixels(MIN_PLANT_PIXELS)
    }

    /// Create an extractor with a custom plant-pixel minimum
    pub fn with_min_plant_pixels(min_plant_pixels: usize) -> Self {
        Self {
            converter: ColorConverter::new(),
            min_plant_pixels,
        }
    }

    /// Create an extractor from analyzer configuration
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::with_min_plant_pixels(config.min_plant_pixels)
    }

    /// Extract features from a grid-sized RGB image
    pub fn extract(&self, image: &RgbImage) -> ImageAnalysis {
        let samples: Vec<PixelSample> = image.pixels().map(|p| PixelSample::from(*p)).collect();
        self.extract_samples(&samples)
    }

    /// Extract features from samples in row-major order
    pub fn extract_samples(&self, samples: &[PixelSample]) -> ImageAnalysis {
        let total = samples.len();
        let mut counts = BucketCounts::default();
        let mut unique_colors = HashSet::with_capacity(total);
        let mut plant_indices = Vec::with_capacity(total);

        for (i, &sample) in samples.iter().enumerate() {
            unique_colors.insert(sample.packed());

            let class = PixelClass::classify(&self.converter, sample);
            counts.add(&class);
            if class.is_plant() {
                plant_indices.push(i);
            }
        }

        let (stats, variance_scope) = if plant_indices.len() >= self.min_plant_pixels {
            (
                channel_statistics(samples, &plant_indices),
                VarianceScope::PlantPixels,
            )
        } else {
            let all: Vec<usize> = (0..total).collect();
            (channel_statistics(samples, &all), VarianceScope::FullFrame)
        };

        let hsv = self
            .converter
            .rgb_to_hsv(stats.mean[0], stats.mean[1], stats.mean[2]);

        let ratio = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };

        let analysis = ImageAnalysis {
            hue: hsv.hue,
            saturation: hsv.saturation,
            variance: stats.variance(),
            pure_pixel_ratio: ratio(counts.pure),
            unique_colors_ratio: ratio(unique_colors.len()),
            pixel_healthy_ratio: ratio(counts.green),
            pixel_brown_ratio: ratio(counts.leaf_brown),
            pixel_yellow_ratio: ratio(counts.yellow),
            white_indicator: ratio(counts.white),
            skin_ratio: ratio(counts.skin),
            plant_pixel_count: plant_indices.len(),
            variance_scope,
            mean_rgb: stats.mean,
        };

        tracing::debug!(
            hue = analysis.hue,
            variance = analysis.variance,
            unique = analysis.unique_colors_ratio,
            green = analysis.pixel_healthy_ratio,
            brown = analysis.pixel_brown_ratio,
            yellow = analysis.pixel_yellow_ratio,
            white = analysis.white_indicator,
            scope = ?analysis.variance_scope,
            "extracted image features"
        );

        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn mixed_samples() -> Vec<PixelSample> {
        vec![
            PixelSample::new(60, 180, 60),
            PixelSample::new(80, 200, 80),
            PixelSample::new(100, 100, 100),
            PixelSample::new(100, 100, 100),
        ]
    }

    #[test]
    fn test_channel_statistics() {
        let samples = vec![PixelSample::new(0, 0, 0), PixelSample::new(2, 4, 6)];
        let stats = channel_statistics(&samples, &[0, 1]);
        assert_eq!(stats.mean, [1.0, 2.0, 3.0]);
        assert_eq!(stats.rms_deviation, [1.0, 2.0, 3.0]);
        assert_close(stats.variance(), 2.0);
    }

    #[test]
    fn test_channel_statistics_respects_indices() {
        let samples = mixed_samples();
        let stats = channel_statistics(&samples, &[2, 3]);
        assert_eq!(stats.mean, [100.0, 100.0, 100.0]);
        assert_eq!(stats.variance(), 0.0);
    }

    #[test]
    fn test_channel_statistics_empty_selection() {
        let stats = channel_statistics(&mixed_samples(), &[]);
        assert_eq!(stats.mean, [0.0; 3]);
        assert_eq!(stats.variance(), 0.0);
    }

    #[test]
    fn test_plant_subset_statistics() {
        let analysis = FeatureExtractor::with_min_plant_pixels(2).extract_samples(&mixed_samples());

        assert_eq!(analysis.variance_scope, VarianceScope::PlantPixels);
        assert_eq!(analysis.plant_pixel_count, 2);
        assert_eq!(analysis.mean_rgb, [70.0, 190.0, 70.0]);
        assert_close(analysis.variance, 10.0);
        assert_close(analysis.hue, 120.0);
    }

    #[test]
    fn test_full_frame_fallback() {
        let analysis = FeatureExtractor::with_min_plant_pixels(3).extract_samples(&mixed_samples());

        assert_eq!(analysis.variance_scope, VarianceScope::FullFrame);
        assert_eq!(analysis.plant_pixel_count, 2);
        assert_eq!(analysis.mean_rgb, [85.0, 145.0, 85.0]);
        let expected = (2.0 * 275.0f64.sqrt() + 2075.0f64.sqrt()) / 3.0;
        assert_close(analysis.variance, expected);
    }

    #[test]
    fn test_bucket_ratios() {
        let samples = vec![
            PixelSample::new(60, 180, 60),   // green
            PixelSample::new(130, 50, 55),   // leaf-brown
            PixelSample::new(200, 190, 60),  // yellow
            PixelSample::new(205, 200, 198), // white
            PixelSample::new(230, 180, 170), // skin
            PixelSample::new(0, 0, 0),       // pure
            PixelSample::new(0, 0, 0),       // pure, duplicate color
            PixelSample::new(40, 40, 200),   // none
        ];
        let analysis = FeatureExtractor::with_min_plant_pixels(0).extract_samples(&samples);

        assert_close(analysis.pixel_healthy_ratio, 1.0 / 8.0);
        assert_close(analysis.pixel_brown_ratio, 1.0 / 8.0);
        assert_close(analysis.pixel_yellow_ratio, 1.0 / 8.0);
        assert_close(analysis.white_indicator, 1.0 / 8.0);
        assert_close(analysis.skin_ratio, 1.0 / 8.0);
        assert_close(analysis.pure_pixel_ratio, 2.0 / 8.0);
        assert_close(analysis.unique_colors_ratio, 7.0 / 8.0);
        assert_close(analysis.plant_content_ratio(), 3.0 / 8.0);
    }

    #[test]
    fn test_uniform_gray_image() {
        let image = RgbImage::from_pixel(224, 224, image::Rgb([128, 128, 128]));
        let analysis = FeatureExtractor::new().extract(&image);

        assert_eq!(analysis.variance_scope, VarianceScope::FullFrame);
        assert_eq!(analysis.variance, 0.0);
        assert_close(analysis.unique_colors_ratio, 1.0 / 50_176.0);
        assert_eq!(analysis.saturation, 0.0);
        assert_eq!(analysis.plant_content_ratio(), 0.0);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let mut image = RgbImage::new(224, 224);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            *pixel = image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8]);
        }
        let extractor = FeatureExtractor::new();
        assert_eq!(extractor.extract(&image), extractor.extract(&image));
    }

    #[test]
    fn test_empty_samples() {
        let analysis = FeatureExtractor::new().extract_samples(&[]);
        assert_eq!(analysis.unique_colors_ratio, 0.0);
        assert_eq!(analysis.variance, 0.0);
        assert_eq!(analysis.variance_scope, VarianceScope::FullFrame);
    }
}
