//! Error types for the crop_doctor library

use thiserror::Error;

/// Result type alias for crop_doctor operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for crop image analysis
///
/// Classification itself never fails: ambiguous or non-plant images come
/// back as ordinary results. Errors only arise before a pixel raster exists.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image bytes could not be decoded
    #[error("Failed to decode image: {message}")]
    DecodeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File extension is not a supported raster format
    #[error("Unsupported image format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// Image file could not be read from disk
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Analyzer configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl AnalysisError {
    /// Create a decode error with context
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DecodeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Check if this error was caused by the caller's input
    ///
    /// HTTP callers answer these with a 4xx status.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::DecodeError { .. } | AnalysisError::UnsupportedFormat { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::DecodeError { .. } => {
                "Could not read the image. Please upload a valid JPEG or PNG photo of a crop leaf.".to_string()
            }
            AnalysisError::UnsupportedFormat { extension } => {
                format!(
                    "Files of type .{} are not supported. Please upload a JPEG or PNG photo.",
                    extension
                )
            }
            AnalysisError::Io { .. } => {
                "The image file could not be opened. Please check the path and try again.".to_string()
            }
            AnalysisError::ConfigError { .. } => {
                "The analyzer is misconfigured. Please contact the administrator.".to_string()
            }
        }
    }
}
