//! # Money Module
//!
//! Provides the `Money` type for monetary values.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  214000 × 0.95 in f64 is not guaranteed to print 203300                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (centimes)                           │
//! │    21_400_000 − round(21_400_000 × 500 / 10_000) = 20_330_000          │
//! │    → 203300.00, every time                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comptoir_core::money::Money;
//! use comptoir_core::types::DiscountRate;
//!
//! let laptop = Money::from_major(125_000);
//! let phone = Money::from_major(89_000);
//! let subtotal = laptop + phone;
//!
//! let total = subtotal.apply_discount(DiscountRate::from_bps(500)); // 5%
//! assert_eq!(total, Money::from_major(203_300));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::types::{DiscountRate, TaxRate};

/// Minor units per major unit (100 centimes = 1 dinar).
pub const MINOR_PER_MAJOR: i64 = 100;

/// Basis points in 100%.
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (centimes).
///
/// Signed so that client balances can go negative (customer owes the store).
///
/// ## Where Money is Used
/// ```text
/// CatalogEntry.unit_price ──► LineItem.unit_price ──► LineItem.line_total
///                                                           │
///                          Cart.subtotal ◄──────────────────┘
///                                │
///                  − discount(Client.discount)
///                                │
///                                ▼
///                          CartTotals.total ──► CompletedSale.total
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// let price = Money::from_minor(12_550); // 125.50
    /// assert_eq!(price.minor(), 12_550);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    ///
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(125_000).minor(), 12_500_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole major-unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor-unit remainder (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// let unit = Money::from_minor(299);
    /// assert_eq!(unit.multiply_quantity(3).minor(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Amount taken off by a discount rate, rounded half away from zero to
    /// the nearest minor unit.
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        Money(div_round_half_up(self.0 as i128 * rate.bps() as i128, BPS_SCALE))
    }

    /// The value after a discount: `self − discount_amount(rate)`.
    ///
    /// ```rust
    /// use comptoir_core::money::Money;
    /// use comptoir_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_major(100);
    /// assert_eq!(subtotal.apply_discount(DiscountRate::from_bps(1000)), Money::from_major(90));
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        *self - self.discount_amount(rate)
    }

    /// Tax contained in a tax-inclusive amount: `self × bps / (10000 + bps)`.
    ///
    /// ```rust
    /// use comptoir_core::money::Money;
    /// use comptoir_core::types::TaxRate;
    ///
    /// // 119.00 at 19% included → 19.00 of tax
    /// let total = Money::from_major(119);
    /// assert_eq!(total.included_tax(TaxRate::from_bps(1900)), Money::from_major(19));
    /// ```
    pub fn included_tax(&self, rate: TaxRate) -> Money {
        if rate.is_zero() {
            return Money::zero();
        }
        let bps = rate.bps() as i128;
        Money(div_round_half_up(self.0 as i128 * bps, BPS_SCALE + bps))
    }
}

/// Integer division rounding halves away from zero.
fn div_round_half_up(numerator: i128, denominator: i128) -> i64 {
    let half = denominator / 2;
    let rounded = if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    };
    rounded as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`203300.00`). Currency symbols and placement
/// belong to the application's display settings.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
