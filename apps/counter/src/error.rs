//! # API Error Type
//!
//! Unified error type for counter-sale commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Counter App                        │
//! │                                                                         │
//! │  Command Function  ──►  Result<T, ApiError>                             │
//! │         │                                                               │
//! │         ├── CoreError::DuplicateProduct ───► CART_ERROR                 │
//! │         ├── CoreError::EmptyCart / NoClient ► SALE_ERROR                │
//! │         ├── CoreError::ClientNotFound ──────► NOT_FOUND                 │
//! │         ├── CatalogError::* ────────────────► CATALOG_ERROR             │
//! │         ▼                                                               │
//! │  Terminal shows a one-line notification; the session goes on.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Startup failures (config, catalog files) are [`AppError`]s instead: they
//! stop the program before the screen opens.

use std::path::PathBuf;

use comptoir_catalog::CatalogError;
use comptoir_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// Error returned from counter-sale commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CART_ERROR",
///   "message": "Product already in cart: Laptop Dell XPS 13"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for the notification line
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown client, or a search result that does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation refused (duplicate, selection, size)
    CartError,

    /// Sale cannot be validated yet
    SaleError,

    /// Catalog unreachable or returned garbage
    CatalogError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::DuplicateProduct { .. }
            | CoreError::NoSelection
            | CoreError::NotSelected { .. }
            | CoreError::RowOutOfRange { .. }
            | CoreError::CartTooLarge { .. } => ApiError::new(ErrorCode::CartError, message),
            CoreError::EmptyCart | CoreError::NoClient => {
                ApiError::new(ErrorCode::SaleError, message)
            }
            CoreError::ClientNotFound(id) => ApiError::not_found("Client", &id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(code) => ApiError::not_found("Product", &code),
            CatalogError::InvalidQuery(e) => ApiError::validation(e.to_string()),
            CatalogError::Transport(_) | CatalogError::Decode(_) | CatalogError::Io { .. } => {
                tracing::error!("Catalog access failed: {}", err);
                ApiError::new(ErrorCode::CatalogError, "Catalog unavailable")
            }
            other => ApiError::new(ErrorCode::CatalogError, other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Startup errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for startup.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_core_error_codes() {
        let dup: ApiError = CoreError::DuplicateProduct {
            designation: "Laptop Dell XPS 13".to_string(),
        }
        .into();
        assert_eq!(dup.code, ErrorCode::CartError);
        assert_eq!(dup.message, "Product already in cart: Laptop Dell XPS 13");

        let empty: ApiError = CoreError::EmptyCart.into();
        assert_eq!(empty.code, ErrorCode::SaleError);

        let missing: ApiError = CoreError::ClientNotFound("c-9".to_string()).into();
        assert_eq!(missing.code, ErrorCode::NotFound);
        assert_eq!(missing.message, "Client not found: c-9");
    }

    #[test]
    fn test_catalog_error_codes() {
        let transport: ApiError = CatalogError::Transport("refused".to_string()).into();
        assert_eq!(transport.code, ErrorCode::CatalogError);
        assert_eq!(transport.message, "Catalog unavailable");

        let timeout: ApiError = CatalogError::Timeout(Duration::from_secs(3)).into();
        assert_eq!(timeout.code, ErrorCode::CatalogError);
    }

    #[test]
    fn test_serialization() {
        let err = ApiError::new(ErrorCode::SaleError, "No client selected");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"SALE_ERROR","message":"No client selected"}"#);
    }

    #[test]
    fn test_display() {
        let err = ApiError::not_found("Client", "c-1");
        assert_eq!(err.to_string(), "[NotFound] Client not found: c-1");
    }
}
