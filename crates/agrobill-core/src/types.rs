//! # Domain Types
//!
//! Core domain types for the billing ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Product        catalog row: rate, GST %, optional stock        │
//! │  ProductKind    fertilizer / pesticide / general                │
//! │  TaxConvention  how `rate` relates to GST (exclusive/inclusive) │
//! │  LedgerConfig   per-bill policy: convention, stock, quantities  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{GstRate, Money};

// =============================================================================
// Tax Convention
// =============================================================================

/// How a product's `rate` relates to GST.
///
/// Deliberately has no `Default`: the two conventions produce different
/// before-tax/GST splits from identical inputs, so every bill must declare
/// which one it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxConvention {
    /// `rate` is the price before tax; GST is added on top.
    /// amount = qty × rate × (1 + gst/100)
    Exclusive,
    /// `rate` already includes GST; the base is recovered by division.
    /// amount = qty × rate; base = rate / (1 + gst/100)
    Inclusive,
}

// =============================================================================
// Stock Policy
// =============================================================================

/// Whether adding a line item checks the product's tracked stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Reject adds whose quantity exceeds the product's `stock_qty`.
    /// Products without tracked stock are never rejected.
    Enforce,
    /// Skip the stock check entirely.
    Ignore,
}

impl Default for StockPolicy {
    fn default() -> Self {
        StockPolicy::Enforce
    }
}

// =============================================================================
// Quantity Rule
// =============================================================================

/// Whether line-item quantities may be fractional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuantityRule {
    /// Quantities must be positive whole numbers.
    WholeUnits,
    /// Positive fractional quantities are accepted (loose goods sold by
    /// weight or volume).
    AllowFractional,
}

impl Default for QuantityRule {
    fn default() -> Self {
        QuantityRule::WholeUnits
    }
}

// =============================================================================
// Ledger Config
// =============================================================================

/// Per-bill policy bundle.
///
/// The tax convention is mandatory; stock checking and fractional
/// quantities are toggles with the strictest defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LedgerConfig {
    pub tax_convention: TaxConvention,
    pub stock_policy: StockPolicy,
    pub quantity_rule: QuantityRule,
}

impl LedgerConfig {
    /// Creates a config with the given tax convention, stock enforcement
    /// on, and whole-unit quantities.
    pub fn new(tax_convention: TaxConvention) -> Self {
        LedgerConfig {
            tax_convention,
            stock_policy: StockPolicy::default(),
            quantity_rule: QuantityRule::default(),
        }
    }

    /// Replaces the stock policy.
    pub fn with_stock_policy(mut self, policy: StockPolicy) -> Self {
        self.stock_policy = policy;
        self
    }

    /// Replaces the quantity rule.
    pub fn with_quantity_rule(mut self, rule: QuantityRule) -> Self {
        self.quantity_rule = rule;
        self
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// Product category used for catalog filtering and report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Fertilizer,
    Pesticide,
    General,
}

// =============================================================================
// Product
// =============================================================================

/// A product as served by the catalog.
///
/// The ledger only ever reads products; it snapshots the display and
/// pricing fields into a [`crate::ledger::LineItem`] at add time, so later
/// catalog edits never reach into an open bill.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: i64,

    /// Display name shown to the operator and on the bill.
    pub name: String,

    /// Manufacturer, when known.
    pub company_name: Option<String>,

    /// Category (drives report filters and bill classification).
    pub kind: ProductKind,

    /// Manufacture date as printed on the packaging (free-form).
    pub mfg_date: Option<String>,

    /// Expiry date as printed on the packaging (free-form).
    pub exp_date: Option<String>,

    /// Batch number.
    pub batch_num: Option<String>,

    /// HSN tax-classification code.
    pub hsn_code: Option<String>,

    /// Pack size, e.g. "45kg" or "500ml".
    pub pack_size: Option<String>,

    /// Unit price; whether GST is folded in depends on the bill's
    /// [`TaxConvention`].
    #[ts(as = "String")]
    pub rate: Money,

    /// GST percentage (0–100).
    #[ts(as = "String")]
    pub gst: GstRate,

    /// Tracked stock. `None` means stock is not tracked for this product
    /// and no quantity check applies.
    pub stock_qty: Option<i64>,
}

impl Product {
    /// Whether stock is tracked for this product.
    #[inline]
    pub fn tracks_stock(&self) -> bool {
        self.stock_qty.is_some()
    }

    /// Checks whether the requested quantity can be supplied.
    pub fn can_supply(&self, qty: Decimal) -> bool {
        match self.stock_qty {
            None => true,
            Some(stock) => Decimal::from(stock) >= qty,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(stock: Option<i64>) -> Product {
        Product {
            id: 1,
            name: "Urea 45kg".to_string(),
            company_name: Some("IFFCO".to_string()),
            kind: ProductKind::Fertilizer,
            mfg_date: Some("2026-01".to_string()),
            exp_date: Some("2028-01".to_string()),
            batch_num: Some("B-1021".to_string()),
            hsn_code: None,
            pack_size: Some("45kg".to_string()),
            rate: Money::new(dec!(266.50)),
            gst: GstRate::from_percent(dec!(5)).unwrap(),
            stock_qty: stock,
        }
    }

    #[test]
    fn test_can_supply() {
        let tracked = product(Some(3));
        assert!(tracked.tracks_stock());
        assert!(tracked.can_supply(dec!(3)));
        assert!(!tracked.can_supply(dec!(4)));

        let untracked = product(None);
        assert!(!untracked.tracks_stock());
        assert!(untracked.can_supply(dec!(1000)));
    }

    #[test]
    fn test_config_defaults_are_strict() {
        let config = LedgerConfig::new(TaxConvention::Inclusive);
        assert_eq!(config.stock_policy, StockPolicy::Enforce);
        assert_eq!(config.quantity_rule, QuantityRule::WholeUnits);

        let loose = config
            .with_stock_policy(StockPolicy::Ignore)
            .with_quantity_rule(QuantityRule::AllowFractional);
        assert_eq!(loose.stock_policy, StockPolicy::Ignore);
        assert_eq!(loose.tax_convention, TaxConvention::Inclusive);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_value(TaxConvention::Inclusive).unwrap();
        assert_eq!(json, serde_json::json!("inclusive"));

        let json = serde_json::to_value(ProductKind::Pesticide).unwrap();
        assert_eq!(json, serde_json::json!("pesticide"));
    }
}
