//! Typed error handling for the catalog
//!
//! This module provides the error hierarchy shared by the API server, the
//! storage backends, the table view engine and the API client, so callers can
//! match on specific failures instead of a generic `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`ProductError`]: lookups that found nothing
//! - [`ConfigError`]: configuration parsing and validation
//! - [`ValidationError`]: invalid input (path parameters, view operations)
//! - [`StorageError`]: storage backend failures
//! - [`FetchError`]: client-side API fetch failures
//! - [`ExportError`]: CSV / printable export failures
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get(id).await? {
//!     Some(product) => Ok(product),
//!     None => Err(CatalogError::Product(ProductError::NotFound { id })),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::client::FetchError;
pub use crate::engine::export::ExportError;

/// The main error type for the catalog crate
#[derive(Debug)]
pub enum CatalogError {
    /// Product lookups
    Product(ProductError),

    /// Configuration errors
    Config(ConfigError),

    /// Validation errors
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// API client errors
    Fetch(FetchError),

    /// Export errors
    Export(ExportError),

    /// Failure whose message is safe to show; the cause has already been logged
    Internal(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Product(e) => write!(f, "{}", e),
            CatalogError::Config(e) => write!(f, "{}", e),
            CatalogError::Validation(e) => write!(f, "{}", e),
            CatalogError::Storage(e) => write!(f, "{}", e),
            CatalogError::Fetch(e) => write!(f, "{}", e),
            CatalogError::Export(e) => write!(f, "{}", e),
            CatalogError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Product(e) => Some(e),
            CatalogError::Config(e) => Some(e),
            CatalogError::Validation(e) => Some(e),
            CatalogError::Storage(e) => Some(e),
            CatalogError::Fetch(e) => Some(e),
            CatalogError::Export(e) => Some(e),
            CatalogError::Internal(_) => None,
        }
    }
}

/// Error envelope returned by the HTTP API
///
/// Mirrors the success envelope: `{ "success": false, "message": ... }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Product(e) => e.status_code(),
            CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Fetch(e) => e.status_code(),
            CatalogError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Product(e) => e.error_code(),
            CatalogError::Config(_) => "CONFIG_ERROR",
            CatalogError::Validation(_) => "VALIDATION_ERROR",
            CatalogError::Storage(_) => "STORAGE_ERROR",
            CatalogError::Fetch(e) => e.error_code(),
            CatalogError::Export(_) => "EXPORT_ERROR",
            CatalogError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message exposed to API consumers
    ///
    /// Storage details never leave the server.
    pub fn public_message(&self) -> String {
        match self {
            CatalogError::Internal(msg) => msg.clone(),
            CatalogError::Storage(_) => "Storage backend error".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            code: self.error_code().to_string(),
            message: self.public_message(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Product Errors
// =============================================================================

#[derive(Debug)]
pub enum ProductError {
    /// No product with this id
    NotFound { id: i64 },
}

impl fmt::Display for ProductError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The API contract fixes this exact message
            ProductError::NotFound { .. } => write!(f, "Product not found"),
        }
    }
}

impl std::error::Error for ProductError {}

impl ProductError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProductError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ProductError::NotFound { .. } => "PRODUCT_NOT_FOUND",
        }
    }
}

impl From<ProductError> for CatalogError {
    fn from(err: ProductError) -> Self {
        CatalogError::Product(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for CatalogError {
    fn from(err: ConfigError) -> Self {
        CatalogError::Config(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Path parameter is not a product id
    InvalidId { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::InvalidId { value } => {
                write!(f, "Invalid product id: '{}'", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Connection error
    ConnectionError { backend: String, message: String },

    /// Query execution error
    QueryError { backend: String, message: String },

    /// A lock guarding in-memory state was poisoned
    LockPoisoned { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
            StorageError::LockPoisoned { message } => {
                write!(f, "Failed to acquire lock: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        CatalogError::Storage(err)
    }
}

// =============================================================================
// Leaf conversions
// =============================================================================

impl From<FetchError> for CatalogError {
    fn from(err: FetchError) -> Self {
        CatalogError::Fetch(err)
    }
}

impl From<ExportError> for CatalogError {
    fn from(err: ExportError) -> Self {
        CatalogError::Export(err)
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(err: serde_yaml::Error) -> Self {
        CatalogError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
