//! # Cart
//!
//! The ordered list of lines for the sale in progress.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Screen Action            Method                  State Change          │
//! │  ─────────────            ──────                  ────────────          │
//! │                                                                         │
//! │  Scan / pick product ───► add_item() ───────────► items.push(line)     │
//! │                           (DuplicateProduct if designation present)    │
//! │                                                                         │
//! │  Click row ─────────────► select() / toggle() ──► selected = Some(i)   │
//! │                                                                         │
//! │  Click Remove ──────────► remove_selected() ────► items.remove(i),     │
//! │                                                   selected = None       │
//! │                                                                         │
//! │  Cancel / sold ─────────► clear() ──────────────► items = [],          │
//! │                                                   selected = None       │
//! │                                                                         │
//! │  Any redraw ────────────► totals(discount) ─────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No two lines share a designation (checked on insertion)
//! - `line_total == unit_price × quantity` for every line
//! - `selected`, when set, points at an existing row
//! - every unit price lies in `0..=MAX_UNIT_PRICE`, so totals cannot overflow

use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CatalogEntry, DiscountRate};
use crate::validation::validate_cart_size;
use crate::MAX_CART_ITEMS;

// =============================================================================
// Line Item
// =============================================================================

/// One product line of the cart.
///
/// Fields are private so the line total can never disagree with the unit
/// price and quantity it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    id: String,
    product_id: String,
    designation: String,
    unit_price: Money,
    quantity: u32,
    line_total: Money,
}

impl LineItem {
    /// Creates a line for one unit of a catalog entry.
    ///
    /// The unit price is frozen at this moment; later catalog changes do
    /// not reach lines already in the cart.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        let mut line = LineItem {
            id: Uuid::new_v4().to_string(),
            product_id: entry.id.clone(),
            designation: entry.designation.clone(),
            unit_price: entry.unit_price,
            quantity: 1,
            line_total: Money::zero(),
        };
        line.recompute();
        line
    }

    fn recompute(&mut self) {
        self.line_total = self.unit_price.multiply_quantity(self.quantity);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn line_total(&self) -> Money {
        self.line_total
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart of the counter-sale session.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    selected: Option<usize>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Appends one unit of `entry` as a new line and returns its row index.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] for an entry no catalog would accept
    ///   (empty id or designation, price outside `0..=MAX_UNIT_PRICE`).
    /// - [`CoreError::DuplicateProduct`] when a line with the same
    ///   designation exists. A rescan never increments the quantity.
    /// - [`CoreError::CartTooLarge`] past [`MAX_CART_ITEMS`] lines.
    ///
    /// The cart is untouched on error.
    pub fn add_item(&mut self, entry: &CatalogEntry) -> CoreResult<usize> {
        entry.validate()?;

        if self.contains(&entry.designation) {
            return Err(CoreError::DuplicateProduct {
                designation: entry.designation.clone(),
            });
        }

        validate_cart_size(self.items.len())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_ITEMS })?;

        self.items.push(LineItem::from_entry(entry));
        Ok(self.items.len() - 1)
    }

    /// Returns true if a line with this exact designation is present.
    pub fn contains(&self, designation: &str) -> bool {
        self.items.iter().any(|line| line.designation == designation)
    }

    /// Marks `index` as the selected row.
    pub fn select(&mut self, index: usize) -> CoreResult<()> {
        self.check_index(index)?;
        self.selected = Some(index);
        Ok(())
    }

    /// Selects `index`, or clears the selection if it is already selected.
    ///
    /// Returns the selection after the toggle.
    pub fn toggle(&mut self, index: usize) -> CoreResult<Option<usize>> {
        self.check_index(index)?;
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
        Ok(self.selected)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&LineItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Removes the line at `index`, which must be the selected row.
    ///
    /// The selection is cleared afterwards; the remaining rows keep their
    /// relative order.
    pub fn remove_at(&mut self, index: usize) -> CoreResult<LineItem> {
        match self.selected {
            None => Err(CoreError::NoSelection),
            Some(selected) if selected != index => Err(CoreError::NotSelected { index }),
            Some(_) => {
                self.check_index(index)?;
                self.selected = None;
                Ok(self.items.remove(index))
            }
        }
    }

    /// Removes the selected line.
    pub fn remove_selected(&mut self) -> CoreResult<LineItem> {
        let index = self.selected.ok_or(CoreError::NoSelection)?;
        self.remove_at(index)
    }

    /// Empties the cart and clears the selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|line| line.quantity as u64).sum()
    }

    /// Σ line totals, before discount.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Grand total after `discount`. Pure; call again after every change.
    pub fn total(&self, discount: DiscountRate) -> Money {
        self.subtotal().apply_discount(discount)
    }

    /// Full breakdown for display.
    pub fn totals(&self, discount: DiscountRate) -> CartTotals {
        let subtotal = self.subtotal();
        let discount_amount = subtotal.discount_amount(discount);
        CartTotals {
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
            subtotal,
            discount_rate: discount,
            discount: discount_amount,
            total: subtotal - discount_amount,
        }
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.items.len() {
            return Err(CoreError::RowOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
    pub discount_rate: DiscountRate,
    pub discount: Money,
    pub total: Money,
}
