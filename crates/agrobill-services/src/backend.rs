//! # In-Process Backend
//!
//! [`LocalBackend`] plays the role of the PDF backend inside the process:
//! it re-validates the transmitted payload, re-checks and deducts stock,
//! assigns the bill number, archives the bill, and hands back a generated
//! document name. Tests and the demo binary run the full submission path
//! against it without a network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use agrobill_core::BillPayload;

use crate::archive::{BillArchive, BillRecord, RecordItem};
use crate::catalog::{CatalogError, InMemoryCatalog};
use crate::submission::{DocumentRef, SubmissionError, SubmissionGateway};

// =============================================================================
// Backend Error
// =============================================================================

/// Administrative operation failures (cancellation).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("bill not found: {0}")]
    BillNotFound(i64),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

// =============================================================================
// Local Backend
// =============================================================================

/// The submission service, archive and stock bookkeeping in one place.
pub struct LocalBackend {
    catalog: Arc<InMemoryCatalog>,
    archive: Mutex<BillArchive>,
}

impl LocalBackend {
    /// Creates a backend over the given catalog.
    pub fn new(catalog: Arc<InMemoryCatalog>) -> Self {
        LocalBackend {
            catalog,
            archive: Mutex::new(BillArchive::new()),
        }
    }

    /// Snapshot of all archived bills in current number order.
    pub fn bills(&self) -> Vec<BillRecord> {
        self.archive
            .lock()
            .expect("archive lock poisoned")
            .records()
            .to_vec()
    }

    /// Cancels a submitted bill: restores its stock, deletes the record,
    /// and permanently renumbers the remaining bills.
    pub fn cancel_bill(&self, bill_number: i64) -> Result<BillRecord, BackendError> {
        let removed = self
            .archive
            .lock()
            .expect("archive lock poisoned")
            .cancel(bill_number)
            .ok_or(BackendError::BillNotFound(bill_number))?;

        for item in &removed.items {
            self.catalog.restore_stock(&item.name, item.qty)?;
        }

        info!(bill_number, "bill cancelled, stock restored");
        Ok(removed)
    }

    /// Undoes stock deductions after a mid-submission rejection.
    fn roll_back_stock(&self, deducted: &[(String, Decimal)]) {
        for (name, qty) in deducted {
            if self.catalog.restore_stock(name, *qty).is_err() {
                warn!(%name, "could not restore stock while rolling back");
            }
        }
    }
}

#[async_trait]
impl SubmissionGateway for LocalBackend {
    async fn submit(&self, payload: &BillPayload) -> Result<DocumentRef, SubmissionError> {
        // the backend trusts nothing: re-validate the transmitted values
        for item in &payload.products {
            if item.qty <= Decimal::ZERO
                || item.rate < Decimal::ZERO
                || item.amount < Decimal::ZERO
                || item.gst < Decimal::ZERO
            {
                return Err(SubmissionError::Rejected(
                    "invalid product values".to_string(),
                ));
            }
        }

        // resolve every product by name, re-check stock, deduct; roll the
        // deductions back if any later line fails so a rejected submission
        // leaves stock exactly as it was
        let mut kinds = Vec::with_capacity(payload.products.len());
        let mut deducted: Vec<(String, Decimal)> = Vec::new();
        for item in &payload.products {
            let Some(product) = self.catalog.find_by_name(&item.name) else {
                self.roll_back_stock(&deducted);
                return Err(SubmissionError::Rejected(format!(
                    "product {} not found",
                    item.name
                )));
            };

            if let Err(err) = self.catalog.deduct_stock(&item.name, item.qty) {
                self.roll_back_stock(&deducted);
                return Err(SubmissionError::Rejected(err.to_string()));
            }

            kinds.push(product.kind);
            deducted.push((item.name.clone(), item.qty));
        }

        let record_items: Vec<RecordItem> = payload
            .products
            .iter()
            .zip(kinds)
            .map(|(item, kind)| RecordItem::from_payload(item, kind))
            .collect();

        let bill_number = {
            let mut archive = self.archive.lock().expect("archive lock poisoned");
            let bill_number = archive.next_number();
            archive.insert(BillRecord {
                bill_number,
                customer_name: payload.customer_name.clone(),
                village: payload.village.clone(),
                mobile_num: payload.mobile_num.clone(),
                bill_date: payload.bill_date,
                items: record_items,
                total_before_tax: payload.total_before_tax,
                total_gst: payload.total_gst,
                grand_total: payload.grand_total,
            });
            bill_number
        };

        info!(
            bill_number,
            customer = %payload.customer_name,
            grand_total = %payload.grand_total,
            "bill archived"
        );

        Ok(DocumentRef {
            filename: format!("bill_{}.pdf", Uuid::new_v4().simple()),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use agrobill_core::money::{GstRate, Money};
    use agrobill_core::types::{Product, ProductKind};
    use agrobill_core::PayloadItem;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn seeded_backend() -> LocalBackend {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.insert(Product {
            id: 1,
            name: "Urea 45kg".to_string(),
            company_name: Some("IFFCO".to_string()),
            kind: ProductKind::Fertilizer,
            mfg_date: None,
            exp_date: None,
            batch_num: None,
            hsn_code: None,
            pack_size: Some("45kg".to_string()),
            rate: Money::new(dec!(266.50)),
            gst: GstRate::from_percent(dec!(5)).unwrap(),
            stock_qty: Some(10),
        });
        LocalBackend::new(catalog)
    }

    fn payload_for(name: &str, qty: Decimal) -> BillPayload {
        BillPayload {
            customer_name: "Ramesh Patil".to_string(),
            village: "Shirpur".to_string(),
            mobile_num: "9876543210".to_string(),
            bill_date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            products: vec![PayloadItem {
                name: name.to_string(),
                company_name: None,
                mfg_date: None,
                exp_date: None,
                batch_num: None,
                rate: dec!(266.50),
                qty,
                gst: dec!(5),
                amount: dec!(533.00),
            }],
            total_before_tax: dec!(507.62),
            total_gst: dec!(25.38),
            grand_total: dec!(533.00),
        }
    }

    #[tokio::test]
    async fn test_submit_archives_and_deducts() {
        let backend = seeded_backend();
        let doc = backend.submit(&payload_for("Urea 45kg", dec!(2))).await.unwrap();

        assert!(doc.filename.starts_with("bill_"));
        assert!(doc.filename.ends_with(".pdf"));

        let bills = backend.bills();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].bill_number, 1);
        assert_eq!(bills[0].grand_total, dec!(533.00));
        assert_eq!(backend.catalog.stock_of(1), Some(8));
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_product() {
        let backend = seeded_backend();
        let err = backend.submit(&payload_for("DAP 50kg", dec!(2))).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected(_)));
        assert!(backend.bills().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_over_stock_and_rolls_back() {
        let backend = seeded_backend();
        let mut payload = payload_for("Urea 45kg", dec!(4));
        payload.products.push(PayloadItem {
            name: "Urea 45kg".to_string(),
            company_name: None,
            mfg_date: None,
            exp_date: None,
            batch_num: None,
            rate: dec!(266.50),
            qty: dec!(9),
            gst: dec!(5),
            amount: dec!(2398.50),
        });

        // first line deducts 4, second line exceeds the remaining 6
        let err = backend.submit(&payload).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected(_)));
        assert_eq!(backend.catalog.stock_of(1), Some(10));
        assert!(backend.bills().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_values() {
        let backend = seeded_backend();
        let err = backend.submit(&payload_for("Urea 45kg", dec!(0))).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected(_)));
        assert_eq!(backend.catalog.stock_of(1), Some(10));
    }

    #[tokio::test]
    async fn test_cancel_bill_restores_stock() {
        let backend = seeded_backend();
        backend.submit(&payload_for("Urea 45kg", dec!(2))).await.unwrap();
        assert_eq!(backend.catalog.stock_of(1), Some(8));

        let removed = backend.cancel_bill(1).unwrap();
        assert_eq!(removed.customer_name, "Ramesh Patil");
        assert_eq!(backend.catalog.stock_of(1), Some(10));
        assert!(backend.bills().is_empty());

        assert!(matches!(
            backend.cancel_bill(1),
            Err(BackendError::BillNotFound(1))
        ));
    }
}
