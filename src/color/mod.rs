//! Color feature extraction module
//!
//! This module handles color space conversions, per-pixel bucket rules
//! and the aggregate statistics the classifier consumes.

pub mod conversion;
pub mod pixel;
pub mod analysis;

pub use conversion::{ColorConverter, HsvColor};
pub use pixel::{PixelClass, PixelSample};
pub use analysis::{channel_statistics, ChannelStatistics, FeatureExtractor, ImageAnalysis, VarianceScope};
