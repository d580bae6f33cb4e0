//! In-memory catalog, loaded once from JSON or built in code.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use comptoir_core::{CatalogEntry, ValidationError};

use crate::error::{CatalogError, CatalogResult};
use crate::provider::CatalogProvider;

/// A catalog held entirely in memory.
///
/// Entries are validated on construction; barcode lookups go through an
/// index built at the same time.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Vec<CatalogEntry>,
    by_barcode: HashMap<String, usize>,
}

impl InMemoryCatalog {
    /// Builds a catalog, rejecting invalid records, duplicate ids and
    /// duplicate barcodes.
    pub fn new(entries: Vec<CatalogEntry>) -> CatalogResult<Self> {
        let mut ids = HashSet::new();
        let mut by_barcode = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            entry.validate().map_err(|source| CatalogError::InvalidEntry {
                id: entry.id.clone(),
                source,
            })?;

            if !ids.insert(entry.id.clone()) {
                return Err(duplicate(&entry.id, "id", &entry.id));
            }

            if let Some(code) = &entry.barcode {
                let code = code.trim().to_string();
                if by_barcode.insert(code.clone(), index).is_some() {
                    return Err(duplicate(&entry.id, "barcode", &code));
                }
            }
        }

        Ok(InMemoryCatalog {
            entries,
            by_barcode,
        })
    }

    /// Parses a JSON array of catalog entries.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), entries = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn duplicate(id: &str, field: &str, value: &str) -> CatalogError {
    CatalogError::InvalidEntry {
        id: id.to_string(),
        source: ValidationError::Duplicate {
            field: field.to_string(),
            value: value.to_string(),
        },
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn get_by_barcode(&self, code: &str) -> CatalogResult<Option<CatalogEntry>> {
        Ok(self
            .by_barcode
            .get(code.trim())
            .map(|&index| self.entries[index].clone()))
    }

    async fn get_all(&self) -> CatalogResult<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptoir_core::Money;

    const CATALOG: &str = r#"[
        {"id":"p-1","designation":"Laptop Dell XPS 13","unitPrice":12500000,
         "stockQuantity":4,"category":"Informatique","barcode":"6111000000017"},
        {"id":"p-2","designation":"Smartphone Samsung Galaxy S24","unitPrice":8900000,
         "stockQuantity":7,"category":"Téléphonie","barcode":"6111000000024"},
        {"id":"p-3","designation":"Câble HDMI 2m","unitPrice":90000}
    ]"#;

    #[tokio::test]
    async fn test_lookup_by_barcode() {
        let catalog = InMemoryCatalog::from_json_str(CATALOG).unwrap();

        let hit = catalog.get_by_barcode("6111000000024").await.unwrap().unwrap();
        assert_eq!(hit.designation, "Smartphone Samsung Galaxy S24");
        assert_eq!(hit.unit_price, Money::from_major(89_000));

        assert!(catalog.get_by_barcode("0000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_keeps_order() {
        let catalog = InMemoryCatalog::from_json_str(CATALOG).unwrap();
        let all = catalog.get_all().await.unwrap();

        let ids: Vec<_> = all.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["p-1", "p-2", "p-3"]);
        assert_eq!(all[2].stock_quantity, 0);
    }

    #[test]
    fn test_rejects_duplicate_barcode() {
        let json = r#"[
            {"id":"a","designation":"A","unitPrice":100,"barcode":"42"},
            {"id":"b","designation":"B","unitPrice":100,"barcode":"42"}
        ]"#;
        let err = InMemoryCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEntry { ref id, .. } if id == "b"));
    }

    #[test]
    fn test_rejects_negative_price() {
        let json = r#"[{"id":"a","designation":"A","unitPrice":-1}]"#;
        assert!(matches!(
            InMemoryCatalog::from_json_str(json),
            Err(CatalogError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            InMemoryCatalog::from_json_str("{not json"),
            Err(CatalogError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = InMemoryCatalog::from_json_file("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
