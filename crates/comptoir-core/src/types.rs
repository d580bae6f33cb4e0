//! # Domain Types
//!
//! Records shared by every layer of the counter-sale screen.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogEntry   │   │     Client      │   │  DiscountRate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  bps (u32)      │       │
//! │  │  designation    │   │  name           │   │  500 = 5%       │       │
//! │  │  unit_price     │   │  balance        │   └─────────────────┘       │
//! │  │  stock_quantity │   │  loyalty_points │   ┌─────────────────┐       │
//! │  │  category       │   │  discount_bps   │   │    TaxRate      │       │
//! │  │  barcode        │   │  (Divers = 0)   │   │  flat, included │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CatalogEntry` and `Client` are owned by the external data-access layer;
//! their serde shape (camelCase, money in minor units) is the wire format of
//! that layer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_barcode, validate_designation, validate_discount_bps, validate_price,
    ValidationResult,
};

// =============================================================================
// Rates
// =============================================================================

/// A client discount in basis points (1 bps = 0.01%).
///
/// Valid range is `0..=10000` (0% to 100%); see
/// [`validate_discount_bps`](crate::validation::validate_discount_bps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// 100% off.
    #[inline]
    pub const fn full() -> Self {
        DiscountRate(10_000)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Store-wide flat tax rate in basis points, treated as included in prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// A product as supplied by the external catalog.
///
/// Read-only from the engine's point of view: adding it to a cart copies
/// the designation and unit price into a [`LineItem`](crate::cart::LineItem).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogEntry {
    pub id: String,

    /// Display name, also the uniqueness key inside a cart.
    pub designation: String,

    /// Price in minor units.
    pub unit_price: Money,

    /// Stock on hand as reported by the catalog (display only).
    #[serde(default)]
    pub stock_quantity: i64,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub barcode: Option<String>,
}

impl CatalogEntry {
    /// Case-insensitive substring match on designation, category and barcode.
    ///
    /// `needle` must already be lowercase; an empty needle matches everything.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.designation.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self
                .barcode
                .as_deref()
                .is_some_and(|code| code.to_lowercase().contains(needle))
    }

    /// Checks the record before it is accepted into a catalog.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "id".to_string(),
            });
        }
        validate_designation(&self.designation)?;
        validate_price(self.unit_price)?;
        if let Some(code) = &self.barcode {
            validate_barcode(code)?;
        }
        Ok(())
    }
}

// =============================================================================
// Client
// =============================================================================

/// Id of the built-in "no specific customer" client.
pub const DIVERS_CLIENT_ID: &str = "divers";

/// Display name of the built-in "no specific customer" client.
pub const DIVERS_CLIENT_NAME: &str = "Divers";

/// A customer of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Client {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    /// Account balance in minor units; negative when the client owes the store.
    #[serde(default)]
    pub balance: Money,

    #[serde(default)]
    pub loyalty_points: u32,

    /// Discount granted on every sale, in basis points.
    #[serde(default)]
    pub discount_bps: u32,
}

impl Client {
    /// The "Divers" sentinel: a selectable client with no discount, no
    /// balance and no loyalty points.
    pub fn divers() -> Self {
        Client {
            id: DIVERS_CLIENT_ID.to_string(),
            name: DIVERS_CLIENT_NAME.to_string(),
            phone: None,
            email: None,
            address: None,
            balance: Money::zero(),
            loyalty_points: 0,
            discount_bps: 0,
        }
    }

    #[inline]
    pub fn is_divers(&self) -> bool {
        self.id == DIVERS_CLIENT_ID
    }

    #[inline]
    pub fn discount(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_bps)
    }

    /// Case-insensitive substring match on name, phone and email.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let hit = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| value.to_lowercase().contains(needle))
        };
        self.name.to_lowercase().contains(needle) || hit(&self.phone) || hit(&self.email)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "id".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }
        validate_discount_bps(self.discount_bps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> CatalogEntry {
        CatalogEntry {
            id: "p-1".to_string(),
            designation: "Laptop Dell XPS 13".to_string(),
            unit_price: Money::from_major(125_000),
            stock_quantity: 4,
            category: "Informatique".to_string(),
            barcode: Some("6111245780012".to_string()),
        }
    }

    #[test]
    fn test_discount_rate_percentage() {
        assert_eq!(DiscountRate::from_bps(500).percentage(), 5.0);
        assert!((DiscountRate::from_bps(825).percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_entry_matches_any_field() {
        let entry = entry();
        assert!(entry.matches("dell"));
        assert!(entry.matches("informatique"));
        assert!(entry.matches("78001"));
        assert!(entry.matches(""));
        assert!(!entry.matches("samsung"));
    }

    #[test]
    fn test_entry_validation() {
        assert!(entry().validate().is_ok());

        let mut bad = entry();
        bad.unit_price = Money::from_minor(-1);
        assert!(bad.validate().is_err());

        let mut bad = entry();
        bad.designation = "  ".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_divers_sentinel() {
        let divers = Client::divers();
        assert!(divers.is_divers());
        assert!(divers.discount().is_zero());
        assert!(divers.balance.is_zero());
        assert_eq!(divers.loyalty_points, 0);
    }

    #[test]
    fn test_client_wire_format() {
        let json = r#"{
            "id": "c-7",
            "name": "Karim Benali",
            "phone": "0550 12 34 56",
            "balance": -150000,
            "loyaltyPoints": 120,
            "discountBps": 500
        }"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.discount(), DiscountRate::from_bps(500));
        assert!(client.balance.is_negative());
        assert!(client.email.is_none());
        assert!(client.matches("0550"));
        assert!(client.validate().is_ok());
    }

    #[test]
    fn test_client_discount_out_of_range() {
        let mut client = Client::divers();
        client.discount_bps = 10_001;
        assert!(client.validate().is_err());
    }
}
