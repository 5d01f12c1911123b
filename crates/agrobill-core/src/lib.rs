//! # agrobill-core: Pure Business Logic for agrobill
//!
//! The heart of the billing system: the line-item ledger, totals
//! derivation for both GST conventions, and the submission payload
//! contract — all as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      agrobill Architecture                       │
//! │                                                                  │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                    Browser Frontend                        │  │
//! │  │   Product search ─► Line-item table ─► Submit / PDF        │  │
//! │  └────────────────────────────┬───────────────────────────────┘  │
//! │                               │                                  │
//! │  ┌────────────────────────────▼───────────────────────────────┐  │
//! │  │                  agrobill-services                         │  │
//! │  │   Catalog lookups, submission gateway, session, reports    │  │
//! │  └────────────────────────────┬───────────────────────────────┘  │
//! │                               │                                  │
//! │  ┌────────────────────────────▼───────────────────────────────┐  │
//! │  │             ★ agrobill-core (THIS CRATE) ★                 │  │
//! │  │                                                            │  │
//! │  │   ┌────────┐ ┌────────┐ ┌────────┐ ┌──────────┐ ┌───────┐  │  │
//! │  │   │ types  │ │ money  │ │ ledger │ │validation│ │payload│  │  │
//! │  │   └────────┘ └────────┘ └────────┘ └──────────┘ └───────┘  │  │
//! │  │                                                            │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: `compute_totals` is a function of the item list
//!    and the declared tax convention, nothing else
//! 2. **No I/O**: catalog lookups and submission live in agrobill-services
//! 3. **Exact Decimals**: amounts accumulate unrounded; two-decimal fixing
//!    happens only at the presentation/transmission boundary
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use agrobill_core::{Bill, LedgerConfig, TaxConvention};
//! use agrobill_core::money::{GstRate, Money};
//! use agrobill_core::types::{Product, ProductKind};
//! use rust_decimal::Decimal;
//!
//! let product = Product {
//!     id: 1,
//!     name: "Neem Oil 500ml".to_string(),
//!     company_name: None,
//!     kind: ProductKind::Pesticide,
//!     mfg_date: None,
//!     exp_date: None,
//!     batch_num: None,
//!     hsn_code: None,
//!     pack_size: None,
//!     rate: Money::new(Decimal::from(118)), // GST folded in
//!     gst: GstRate::from_percent(Decimal::from(18)).unwrap(),
//!     stock_qty: None,
//! };
//!
//! // The tax convention is always declared, never inferred
//! let mut bill = Bill::new(LedgerConfig::new(TaxConvention::Inclusive));
//! bill.add_item(&product, Decimal::from(2)).unwrap();
//!
//! let totals = bill.compute_totals();
//! assert_eq!(totals.grand_total, Money::new(Decimal::from(236)));
//! assert_eq!(totals.total_before_tax, Money::new(Decimal::from(200)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod payload;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{LedgerError, LedgerResult, ValidationError};
pub use ledger::{Bill, LineAmounts, LineItem, Totals};
pub use money::{GstRate, Money};
pub use payload::{build_submission_payload, BillHeader, BillPayload, PayloadItem};
pub use types::{LedgerConfig, Product, ProductKind, QuantityRule, StockPolicy, TaxConvention};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed on a single bill.
pub const MAX_BILL_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Guards against typo quantities (1000 instead of 10) reaching a bill.
pub const MAX_ITEM_QUANTITY: i64 = 999;
