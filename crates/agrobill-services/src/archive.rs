//! # Bill Archive
//!
//! Submitted bills with their permanent, sequential bill numbers.
//!
//! Cancellation removes a bill and renumbers the remainder 1..n ordered by
//! bill date, then arrival — the numbering on printed bills stays gapless.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use agrobill_core::{PayloadItem, ProductKind};

// =============================================================================
// Record Item
// =============================================================================

/// One archived line, carrying the product kind for report filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordItem {
    pub name: String,
    pub qty: Decimal,
    pub rate: Decimal,
    pub gst: Decimal,
    pub amount: Decimal,
    pub kind: ProductKind,
}

impl RecordItem {
    /// Pairs a transmitted payload item with its catalog kind.
    pub fn from_payload(item: &PayloadItem, kind: ProductKind) -> Self {
        RecordItem {
            name: item.name.clone(),
            qty: item.qty,
            rate: item.rate,
            gst: item.gst,
            amount: item.amount,
            kind,
        }
    }
}

// =============================================================================
// Bill Record
// =============================================================================

/// A submitted, numbered bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    pub bill_number: i64,
    pub customer_name: String,
    pub village: String,
    pub mobile_num: String,
    pub bill_date: NaiveDate,
    pub items: Vec<RecordItem>,
    pub total_before_tax: Decimal,
    pub total_gst: Decimal,
    pub grand_total: Decimal,
}

impl BillRecord {
    /// Classification for the printed bill layout: a single pesticide item
    /// makes it a pesticide bill, otherwise fertilizer wins over general.
    pub fn kind(&self) -> ProductKind {
        if self.items.iter().any(|i| i.kind == ProductKind::Pesticide) {
            ProductKind::Pesticide
        } else if self.items.iter().any(|i| i.kind == ProductKind::Fertilizer) {
            ProductKind::Fertilizer
        } else {
            ProductKind::General
        }
    }
}

// =============================================================================
// Bill Archive
// =============================================================================

/// Ordered collection of submitted bills plus the numbering counter.
#[derive(Debug, Default)]
pub struct BillArchive {
    records: Vec<BillRecord>,
    last_bill_number: i64,
}

impl BillArchive {
    /// Creates an empty archive starting at bill number 1.
    pub fn new() -> Self {
        BillArchive::default()
    }

    /// Allocates the next bill number.
    pub fn next_number(&mut self) -> i64 {
        self.last_bill_number += 1;
        self.last_bill_number
    }

    /// Stores a numbered record.
    pub fn insert(&mut self, record: BillRecord) {
        self.records.push(record);
    }

    /// All records, in current number order.
    pub fn records(&self) -> &[BillRecord] {
        &self.records
    }

    /// Finds a record by bill number.
    pub fn get(&self, bill_number: i64) -> Option<&BillRecord> {
        self.records.iter().find(|r| r.bill_number == bill_number)
    }

    /// Removes a bill and permanently renumbers the remainder.
    ///
    /// Returns the removed record so the caller can restore stock.
    pub fn cancel(&mut self, bill_number: i64) -> Option<BillRecord> {
        let idx = self
            .records
            .iter()
            .position(|r| r.bill_number == bill_number)?;
        let removed = self.records.remove(idx);
        self.renumber();
        Some(removed)
    }

    /// Renumbers 1..n by bill date then arrival; the counter follows so
    /// the next bill continues the sequence.
    fn renumber(&mut self) {
        self.records.sort_by_key(|r| r.bill_date);
        for (idx, record) in self.records.iter_mut().enumerate() {
            record.bill_number = (idx + 1) as i64;
        }
        self.last_bill_number = self.records.len() as i64;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
