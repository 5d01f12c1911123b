//! # Bill Ledger
//!
//! The in-memory line-item ledger for one in-progress bill.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Bill Ledger Operations                      │
//! │                                                                 │
//! │  Operator Action            Engine Call         State Change    │
//! │  ───────────────            ───────────         ────────────    │
//! │  Pick product + qty ──────► add_item()    ────► items.push()    │
//! │  Remove a row       ──────► remove_item() ────► items.remove()  │
//! │  (after every successful mutation)                              │
//! │                     ──────► compute_totals() ── (read only)     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are never stored: `compute_totals` derives them from the item
//! list on demand, accumulating unrounded decimals. Callers re-run it
//! after every successful mutation before treating the figures as valid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{LedgerError, LedgerResult};
use crate::money::{GstRate, Money};
use crate::types::{LedgerConfig, Product, StockPolicy, TaxConvention};
use crate::validation;
use crate::MAX_BILL_ITEMS;

// =============================================================================
// Line Item
// =============================================================================

/// One product/quantity entry within a bill.
///
/// Display and pricing fields are a snapshot frozen at add time; catalog
/// edits after that never change an open bill. Each successful add creates
/// a new line item with a fresh id, even for a product already on the bill.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique within the bill; monotonic, never reused in a session.
    pub id: u64,

    /// Catalog id of the product this line was created from.
    pub product_id: i64,

    /// Product name at add time (frozen).
    pub name: String,

    /// Manufacturer at add time (frozen).
    pub company_name: Option<String>,

    /// Manufacture date at add time (frozen).
    pub mfg_date: Option<String>,

    /// Expiry date at add time (frozen).
    pub exp_date: Option<String>,

    /// Batch number at add time (frozen).
    pub batch_num: Option<String>,

    /// Pack size at add time (frozen).
    pub pack_size: Option<String>,

    /// Unit rate at add time (frozen).
    #[ts(as = "String")]
    pub rate: Money,

    /// GST percentage at add time (frozen).
    #[ts(as = "String")]
    pub gst: GstRate,

    /// Quantity; positive, whole unless the bill allows fractional.
    #[ts(as = "String")]
    pub qty: Decimal,

    /// Line amount derived per the bill's tax convention. Never an input.
    #[ts(as = "String")]
    pub amount: Money,
}

impl LineItem {
    /// Snapshots a product into a line item, deriving the amount per the
    /// given convention.
    fn from_product(product: &Product, qty: Decimal, id: u64, convention: TaxConvention) -> Self {
        let amounts = line_amounts(product.rate, product.gst, qty, convention);
        LineItem {
            id,
            product_id: product.id,
            name: product.name.clone(),
            company_name: product.company_name.clone(),
            mfg_date: product.mfg_date.clone(),
            exp_date: product.exp_date.clone(),
            batch_num: product.batch_num.clone(),
            pack_size: product.pack_size.clone(),
            rate: product.rate,
            gst: product.gst,
            qty,
            amount: amounts.total,
        }
    }

    /// Recomputes this line's before-tax / GST / total split under the
    /// given convention.
    pub fn amounts(&self, convention: TaxConvention) -> LineAmounts {
        line_amounts(self.rate, self.gst, self.qty, convention)
    }
}

/// The before-tax / GST / total split of a single line, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAmounts {
    pub base: Money,
    pub gst: Money,
    pub total: Money,
}

/// Per-line amount derivation for both tax conventions.
///
/// Exclusive: base = qty × rate, GST added on top.
/// Inclusive: total = qty × rate unchanged; the base is recovered by
/// division and the GST portion by subtraction, so base + gst == total
/// exactly.
fn line_amounts(rate: Money, gst: GstRate, qty: Decimal, convention: TaxConvention) -> LineAmounts {
    match convention {
        TaxConvention::Exclusive => {
            let base = rate * qty;
            let tax = base.calculate_gst(gst);
            LineAmounts {
                base,
                gst: tax,
                total: base + tax,
            }
        }
        TaxConvention::Inclusive => {
            let total = rate * qty;
            let base = rate.base_from_inclusive(gst) * qty;
            LineAmounts {
                base,
                gst: total - base,
                total,
            }
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Aggregate totals derived from the current line-item list.
///
/// Always recomputed, never edited directly; `grand_total` is the sum of
/// the other two by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[ts(as = "String")]
    pub total_before_tax: Money,
    #[ts(as = "String")]
    pub total_gst: Money,
    #[ts(as = "String")]
    pub grand_total: Money,
}

// =============================================================================
// Bill
// =============================================================================

/// The ledger for one in-progress bill.
///
/// A plain owned value: no process-wide state, no internal locking.
/// `add_item`/`remove_item`/`compute_totals` must not be interleaved from
/// multiple callers without external serialization.
#[derive(Debug, Clone)]
pub struct Bill {
    config: LedgerConfig,
    items: Vec<LineItem>,
    next_item_id: u64,
}

impl Bill {
    /// Creates an empty bill with the given policy.
    pub fn new(config: LedgerConfig) -> Self {
        Bill {
            config,
            items: Vec::new(),
            next_item_id: 1,
        }
    }

    /// The policy this bill was created with.
    #[inline]
    pub fn config(&self) -> LedgerConfig {
        self.config
    }

    /// Line items in insertion order (= display order).
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of line items.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the bill has no line items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line quantities.
    pub fn total_quantity(&self) -> Decimal {
        self.items.iter().map(|i| i.qty).sum()
    }

    /// Validates and appends a line item snapshotted from `product`.
    ///
    /// All checks run before any state changes: a rejected add leaves the
    /// item list and the id counter untouched.
    ///
    /// ## Errors
    /// - [`LedgerError::Validation`] for a non-positive, fractional (under
    ///   whole-unit rule) or oversized quantity, a GST percentage outside
    ///   0–100, or a negative rate
    /// - [`LedgerError::InsufficientStock`] when the policy enforces stock
    ///   and the product tracks less than the requested quantity
    /// - [`LedgerError::TooManyItems`] at the line-item cap
    pub fn add_item(&mut self, product: &Product, qty: Decimal) -> LedgerResult<&LineItem> {
        validation::validate_quantity(qty, self.config.quantity_rule)?;
        validation::validate_gst_percent(product.gst.percent())?;
        validation::validate_rate(product.rate)?;

        if self.config.stock_policy == StockPolicy::Enforce && !product.can_supply(qty) {
            return Err(LedgerError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock_qty.unwrap_or(0),
                requested: qty,
            });
        }

        if self.items.len() >= MAX_BILL_ITEMS {
            return Err(LedgerError::TooManyItems {
                max: MAX_BILL_ITEMS,
            });
        }

        let id = self.next_item_id;
        self.next_item_id += 1;
        self.items.push(LineItem::from_product(
            product,
            qty,
            id,
            self.config.tax_convention,
        ));

        let idx = self.items.len() - 1;
        Ok(&self.items[idx])
    }

    /// Removes the line item with the given id.
    ///
    /// Returns false (and changes nothing) when the id is absent; the
    /// relative order of the remaining items is preserved. Never errors.
    pub fn remove_item(&mut self, id: u64) -> bool {
        match self.items.iter().position(|i| i.id == id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Derives the aggregate totals from the current item list.
    ///
    /// Pure and side-effect free; O(n) in the item count. Accumulation is
    /// unrounded; fixing to two decimals happens only when a payload is
    /// built or a figure is displayed.
    pub fn compute_totals(&self) -> Totals {
        let mut total_before_tax = Money::zero();
        let mut total_gst = Money::zero();

        for item in &self.items {
            let amounts = item.amounts(self.config.tax_convention);
            total_before_tax += amounts.base;
            total_gst += amounts.gst;
        }

        Totals {
            total_before_tax,
            total_gst,
            grand_total: total_before_tax + total_gst,
        }
    }

    /// Removes every line item. The id counter keeps counting so ids are
    /// never reused within a session.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
