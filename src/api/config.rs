//! Server configuration

use std::env;
use std::path::PathBuf;

use crate::config::AnalyzerConfig;
use crate::error::Result;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Optional AnalyzerConfig JSON file
    pub analyzer_config_path: Option<PathBuf>,

    /// Overrides the analyzer's filename override flag when set
    pub filename_override: Option<bool>,

    /// Upload size limit in bytes
    pub max_upload_bytes: usize,

    /// Predictions kept in memory before the oldest are dropped
    pub max_stored_predictions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            analyzer_config_path: None,
            filename_override: None,
            max_upload_bytes: 10 * 1024 * 1024,
            max_stored_predictions: 1000,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            analyzer_config_path: env::var("CROP_DOCTOR_CONFIG")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),

            filename_override: env::var("CROP_DOCTOR_FILENAME_OVERRIDE")
                .ok()
                .and_then(|v| parse_flag(&v)),

            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),

            max_stored_predictions: env::var("MAX_STORED_PREDICTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.max_stored_predictions),
        }
    }

    /// Resolve the analyzer configuration for this server
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let mut config = match &self.analyzer_config_path {
            Some(path) => AnalyzerConfig::from_json_file(path)?,
            None => AnalyzerConfig::default(),
        };
        if let Some(flag) = self.filename_override {
            config.filename_override = flag;
        }
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
