//! # Catalog Provider
//!
//! The seam between the counter-sale screen and whatever stores products.
//!
//! Providers answer two questions: "which product has this barcode?" and
//! "what is in the catalog?". Search is derived from the second unless a
//! provider can do better.

use async_trait::async_trait;
use comptoir_core::CatalogEntry;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Read-only access to the product catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Exact barcode lookup. `Ok(None)` means the code is unknown.
    async fn get_by_barcode(&self, code: &str) -> CatalogResult<Option<CatalogEntry>>;

    /// The whole catalog, in its native order.
    async fn get_all(&self) -> CatalogResult<Vec<CatalogEntry>>;

    /// Case-insensitive substring search over designation, category and
    /// barcode. An empty term returns the whole catalog.
    async fn search(&self, term: &str) -> CatalogResult<Vec<CatalogEntry>> {
        let needle = term.trim().to_lowercase();
        let all = self.get_all().await?;
        Ok(all.into_iter().filter(|e| e.matches(&needle)).collect())
    }
}

/// Response envelope of the data-access layer.
///
/// ```text
/// { "success": true,  "data": { ... } }
/// { "success": false, "error": "message" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ProviderResponse<T> {
    /// `success: false` becomes [`CatalogError::Provider`]; otherwise the
    /// (possibly absent) payload is returned.
    pub fn into_result(self) -> CatalogResult<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(CatalogError::Provider(
                self.error
                    .unwrap_or_else(|| "unspecified provider error".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptoir_core::Money;

    struct Fixed(Vec<CatalogEntry>);

    #[async_trait]
    impl CatalogProvider for Fixed {
        async fn get_by_barcode(&self, _code: &str) -> CatalogResult<Option<CatalogEntry>> {
            Ok(None)
        }

        async fn get_all(&self) -> CatalogResult<Vec<CatalogEntry>> {
            Ok(self.0.clone())
        }
    }

    fn entry(designation: &str, category: &str, barcode: Option<&str>) -> CatalogEntry {
        CatalogEntry {
            id: designation.to_string(),
            designation: designation.to_string(),
            unit_price: Money::from_major(10),
            stock_quantity: 1,
            category: category.to_string(),
            barcode: barcode.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_default_search_is_case_insensitive() {
        let provider = Fixed(vec![
            entry("Laptop Dell XPS 13", "Informatique", Some("6111000000017")),
            entry("Smartphone Samsung Galaxy S24", "Téléphonie", None),
            entry("Souris Logitech", "Informatique", Some("6111000000024")),
        ]);

        let by_name = provider.search("DELL").await.unwrap();
        assert_eq!(by_name.len(), 1);

        let by_category = provider.search("informatique").await.unwrap();
        assert_eq!(by_category.len(), 2);

        let by_barcode = provider.search("000024").await.unwrap();
        assert_eq!(by_barcode[0].designation, "Souris Logitech");

        assert_eq!(provider.search("  ").await.unwrap().len(), 3);
    }

    #[test]
    fn test_envelope_success() {
        let json = r#"{"success":true,"data":{"id":"p-1","designation":"Clé USB","unitPrice":180000}}"#;
        let resp: ProviderResponse<CatalogEntry> = serde_json::from_str(json).unwrap();

        let entry = resp.into_result().unwrap().unwrap();
        assert_eq!(entry.unit_price, Money::from_major(1_800));
        assert_eq!(entry.barcode, None);
    }

    #[test]
    fn test_envelope_failure() {
        let json = r#"{"success":false,"error":"database locked"}"#;
        let resp: ProviderResponse<CatalogEntry> = serde_json::from_str(json).unwrap();

        match resp.into_result() {
            Err(CatalogError::Provider(msg)) => assert_eq!(msg, "database locked"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_envelope_success_without_data() {
        let resp: ProviderResponse<CatalogEntry> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.into_result().unwrap().is_none());
    }
}
