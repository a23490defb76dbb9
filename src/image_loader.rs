//! Image decoding and resampling onto the analysis grid
//!
//! Accepts raw bytes (an HTTP upload) or a path on disk, decodes them with
//! the `image` crate and resamples to the square analysis grid.
//!
//! ## Supported Formats
//!
//! JPEG, PNG, GIF (first frame), WebP, TIFF and BMP. The format is sniffed
//! from the buffer's magic bytes, so uploads with missing or misleading
//! filenames still decode.
//!
//! Alpha is discarded. An image that already has grid dimensions is copied
//! without resampling.

use image::{DynamicImage, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::Path;

use crate::config::{AnalyzerConfig, ResampleFilter};
use crate::error::{AnalysisError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    /// Detect format from the leading magic bytes of a buffer
    pub fn from_bytes(bytes: &[u8]) -> Option<ImageFormat> {
        match image::guess_format(bytes).ok()? {
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::Png => Some(ImageFormat::Png),
            image::ImageFormat::Gif => Some(ImageFormat::Gif),
            image::ImageFormat::WebP => Some(ImageFormat::WebP),
            image::ImageFormat::Tiff => Some(ImageFormat::Tiff),
            image::ImageFormat::Bmp => Some(ImageFormat::Bmp),
            _ => None,
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// Decode an in-memory image buffer
///
/// # Errors
///
/// Returns `AnalysisError::DecodeError` if the buffer is empty, its format
/// is not one of [`ImageFormat`], or the decoder rejects the data.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(AnalysisError::DecodeError {
            message: "image buffer is empty".to_string(),
            source: None,
        });
    }

    let format = ImageFormat::from_bytes(bytes).ok_or_else(|| AnalysisError::DecodeError {
        message: "unrecognised or unsupported image format".to_string(),
        source: None,
    })?;

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format.into());

    reader
        .decode()
        .map_err(|e| AnalysisError::decode(format!("invalid {:?} data", format), e))
}

/// Resample a decoded image onto a `size × size` RGB grid
pub fn resample_to_grid(image: &DynamicImage, size: u32, filter: ResampleFilter) -> RgbImage {
    if image.width() == size && image.height() == size {
        return image.to_rgb8();
    }
    image.resize_exact(size, size, filter.into()).to_rgb8()
}

/// Decode bytes and resample them onto the configured analysis grid
///
/// # Example
///
/// ```rust,no_run
/// use crop_doctor::{image_loader::load_image_bytes, AnalyzerConfig};
///
/// let bytes = std::fs::read("leaf.jpg").unwrap();
/// let grid = load_image_bytes(&bytes, &AnalyzerConfig::default())?;
/// assert_eq!(grid.dimensions(), (224, 224));
/// # Ok::<(), crop_doctor::AnalysisError>(())
/// ```
pub fn load_image_bytes(bytes: &[u8], config: &AnalyzerConfig) -> Result<RgbImage> {
    let decoded = decode_image(bytes)?;
    tracing::debug!(
        width = decoded.width(),
        height = decoded.height(),
        grid = config.grid_size,
        "decoded image"
    );
    Ok(resample_to_grid(&decoded, config.grid_size, config.resample))
}

/// Load an image file from disk and resample it onto the analysis grid
///
/// # Errors
///
/// Returns `AnalysisError::UnsupportedFormat` if the extension is not
/// recognised, `AnalysisError::Io` if the file cannot be read and
/// `AnalysisError::DecodeError` if its content cannot be decoded.
pub fn load_image(path: &Path, config: &AnalyzerConfig) -> Result<RgbImage> {
    if ImageFormat::from_extension(path).is_none() {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        return Err(AnalysisError::UnsupportedFormat { extension });
    }

    let bytes = std::fs::read(path).map_err(|e| {
        AnalysisError::io(format!("Failed to open image file: {}", path.display()), e)
    })?;

    load_image_bytes(&bytes, config)
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &["jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp"]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
