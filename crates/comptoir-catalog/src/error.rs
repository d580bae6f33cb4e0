//! # Catalog Error Types
//!
//! Everything that can go wrong while talking to the catalog.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest / serde_json / io / timeout                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module)                                            │
//! │       │                                                                 │
//! │       ├──► CatalogResolver: any lookup failure → filtered search       │
//! │       │                                                                 │
//! │       └──► ApiError (counter app) when loading fails at startup        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use comptoir_core::ValidationError;
use thiserror::Error;

/// Catalog access errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product carries this barcode.
    #[error("No product with barcode '{0}'")]
    NotFound(String),

    /// The provider answered with `success: false`.
    #[error("Catalog provider error: {0}")]
    Provider(String),

    /// The lookup did not finish in time.
    #[error("Catalog lookup timed out after {0:?}")]
    Timeout(Duration),

    /// A newer lookup replaced this one.
    #[error("Catalog lookup cancelled")]
    Cancelled,

    /// Network or HTTP-level failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The search term was rejected before reaching the provider.
    #[error("Invalid search query: {0}")]
    InvalidQuery(#[source] ValidationError),

    /// A record failed validation while loading.
    ///
    /// ## When This Occurs
    /// - Empty id or designation
    /// - Negative price
    /// - Duplicate barcode or client id
    #[error("Invalid entry '{id}': {source}")]
    InvalidEntry {
        id: String,
        #[source]
        source: ValidationError,
    },

    /// A catalog or client file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CatalogError::NotFound("6111".to_string()).to_string(),
            "No product with barcode '6111'"
        );
        assert_eq!(
            CatalogError::Timeout(Duration::from_millis(3000)).to_string(),
            "Catalog lookup timed out after 3s"
        );
    }

    #[test]
    fn test_invalid_entry_keeps_source() {
        let err = CatalogError::InvalidEntry {
            id: "p-9".to_string(),
            source: ValidationError::Required {
                field: "designation".to_string(),
            },
        };
        assert!(err.to_string().starts_with("Invalid entry 'p-9'"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_serde_json() {
        let err: CatalogError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
