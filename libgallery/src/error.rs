//! Error types for the gallery core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("View error: {0}")]
    View(String),
}

impl GalleryError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GalleryError::Config(_) => 2,
            GalleryError::Storage(_) => 1,
            GalleryError::Api(_) => 1,
            GalleryError::View(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage IO failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed value under key '{key}': {message}")]
    Malformed { key: String, message: String },

    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors surfaced by item sources
///
/// `Clone` so views can keep the last failure around for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, url: &str) -> Self {
        ApiError::Network(format!("HTTP {} from {}", status, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_config_error() {
        let error = GalleryError::Config(ConfigError::MissingField("api.base_url".to_string()));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_api_error() {
        let error = GalleryError::Api(ApiError::Network("connection refused".to_string()));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_not_found() {
        let error = GalleryError::Api(ApiError::NotFound("42".to_string()));
        assert_eq!(format!("{}", error), "API error: Item not found: 42");
    }

    #[test]
    fn test_error_message_formatting_malformed_storage() {
        let error = StorageError::Malformed {
            key: "gallery-favorites".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Malformed value under key 'gallery-favorites': expected value"
        );
    }

    #[test]
    fn test_status_is_network_error() {
        let error = ApiError::from_status(503, "https://example.test/list");
        assert_eq!(
            error,
            ApiError::Network("HTTP 503 from https://example.test/list".to_string())
        );
    }

    #[test]
    fn test_error_conversion_from_storage_error() {
        let storage_error = StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let error: GalleryError = storage_error.into();

        match error {
            GalleryError::Storage(_) => {}
            _ => panic!("Expected GalleryError::Storage"),
        }
    }
}
