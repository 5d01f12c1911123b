//! # Billing Session
//!
//! One operator editing one bill: the session owns the [`Bill`], resolves
//! products through the catalog, recomputes totals after every successful
//! mutation, and submits through the gateway.
//!
//! ## Session Lifecycle
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Editing                              Submitted (terminal)       │
//! │  ───────                              ────────────────────       │
//! │  add_product ──► lookup + add_item                               │
//! │  remove_line ──► remove_item          submit() ok ──► bill is    │
//! │  totals      ──► compute_totals       consumed, fresh bill       │
//! │                                       started                    │
//! │  submit() failure ──► bill returns to editing UNCHANGED          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One logical thread per session: the session holds the bill by value
//! and its methods take `&mut self`, so interleaved edits require
//! external serialization by construction.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use agrobill_core::{
    build_submission_payload, Bill, BillHeader, LedgerConfig, LedgerError, LineItem, Totals,
};

use crate::catalog::{Catalog, CatalogError};
use crate::submission::{DocumentRef, SubmissionError, SubmissionGateway};

// =============================================================================
// Billing Error
// =============================================================================

/// Union of everything a session operation can fail with. All recoverable.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

// =============================================================================
// Billing Session
// =============================================================================

/// An editing session over one in-progress bill.
pub struct BillingSession {
    catalog: Arc<dyn Catalog>,
    gateway: Arc<dyn SubmissionGateway>,
    bill: Bill,
}

impl BillingSession {
    /// Starts a session with an empty bill under the given policy.
    pub fn new(
        catalog: Arc<dyn Catalog>,
        gateway: Arc<dyn SubmissionGateway>,
        config: LedgerConfig,
    ) -> Self {
        BillingSession {
            catalog,
            gateway,
            bill: Bill::new(config),
        }
    }

    /// The bill being edited.
    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    /// Current totals, derived fresh from the item list.
    pub fn totals(&self) -> Totals {
        self.bill.compute_totals()
    }

    /// Resolves a product and appends it as a line item.
    ///
    /// A failed lookup or a rejected add is recoverable: the operator is
    /// re-prompted and the bill is unchanged.
    pub async fn add_product(
        &mut self,
        product_id: i64,
        qty: Decimal,
    ) -> Result<LineItem, BillingError> {
        let product = self.catalog.lookup(product_id).await?;
        let item = self.bill.add_item(&product, qty)?.clone();

        let totals = self.bill.compute_totals();
        debug!(
            product_id,
            %qty,
            grand_total = %totals.grand_total,
            "line item added"
        );
        Ok(item)
    }

    /// Removes a line item by id. Returns false when the id is absent.
    pub fn remove_line(&mut self, item_id: u64) -> bool {
        let removed = self.bill.remove_item(item_id);
        if removed {
            let totals = self.bill.compute_totals();
            debug!(item_id, grand_total = %totals.grand_total, "line item removed");
        }
        removed
    }

    /// Submits the current bill under the given header.
    ///
    /// Totals are recomputed as the payload is built, so the transmitted
    /// figures can never be stale. On success the bill is consumed and a
    /// fresh one is started — submitted is terminal for that bill. On any
    /// failure (incomplete header, gateway rejection, transport) the bill
    /// returns to editing completely unchanged and may be retried.
    pub async fn submit(&mut self, header: &BillHeader) -> Result<DocumentRef, BillingError> {
        let payload = build_submission_payload(&self.bill, header)?;
        let doc = self.gateway.submit(&payload).await?;

        info!(
            customer = %payload.customer_name,
            grand_total = %payload.grand_total,
            filename = %doc.filename,
            "bill submitted"
        );
        self.bill = Bill::new(self.bill.config());
        Ok(doc)
    }

    /// Abandons the current bill and starts a fresh one.
    pub fn reset(&mut self) {
        self.bill = Bill::new(self.bill.config());
        debug!("session reset");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
