//! # Sales Reports
//!
//! Pure aggregation over archived bills: sales totals keyed by period
//! (day/month/year) and per product, with date-range, product-name and
//! product-kind filters. The bill ledger has no dependency on anything
//! here.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use agrobill_core::ProductKind;

use crate::archive::{BillRecord, RecordItem};

// =============================================================================
// Query Types
// =============================================================================

/// Grouping granularity for period reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Daily,
    Monthly,
    Yearly,
}

/// Optional restrictions applied before aggregation.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub product_name: Option<String>,
    pub kind: Option<ProductKind>,
}

impl ReportFilter {
    /// Filter covering an inclusive date range.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        ReportFilter {
            from: Some(from),
            to: Some(to),
            ..ReportFilter::default()
        }
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// Sales total for one period key ("2026-08-06", "2026-08" or "2026").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub period: String,
    pub total_sales: Decimal,
}

/// Quantity and sales totals for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_name: String,
    pub total_qty: Decimal,
    pub total_sales: Decimal,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Sales totals grouped by period, ascending by period key.
pub fn sales_by_period(
    records: &[BillRecord],
    period: ReportPeriod,
    filter: &ReportFilter,
) -> Vec<ReportRow> {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();

    for record in records {
        if !date_in_range(record.bill_date, filter) {
            continue;
        }
        let key = period_key(record.bill_date, period);
        for item in record.items.iter().filter(|i| item_matches(i, filter)) {
            *buckets.entry(key.clone()).or_default() += item.amount;
        }
    }

    buckets
        .into_iter()
        .map(|(period, total_sales)| ReportRow {
            period,
            total_sales,
        })
        .collect()
}

/// Quantity and sales totals grouped by product name, ascending by name.
pub fn sales_by_product(records: &[BillRecord], filter: &ReportFilter) -> Vec<ProductSales> {
    let mut buckets: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for record in records {
        if !date_in_range(record.bill_date, filter) {
            continue;
        }
        for item in record.items.iter().filter(|i| item_matches(i, filter)) {
            let entry = buckets.entry(item.name.clone()).or_default();
            entry.0 += item.qty;
            entry.1 += item.amount;
        }
    }

    buckets
        .into_iter()
        .map(|(product_name, (total_qty, total_sales))| ProductSales {
            product_name,
            total_qty,
            total_sales,
        })
        .collect()
}

fn period_key(date: NaiveDate, period: ReportPeriod) -> String {
    match period {
        ReportPeriod::Daily => date.format("%Y-%m-%d").to_string(),
        ReportPeriod::Monthly => date.format("%Y-%m").to_string(),
        ReportPeriod::Yearly => date.format("%Y").to_string(),
    }
}

fn date_in_range(date: NaiveDate, filter: &ReportFilter) -> bool {
    filter.from.map_or(true, |from| date >= from) && filter.to.map_or(true, |to| date <= to)
}

fn item_matches(item: &RecordItem, filter: &ReportFilter) -> bool {
    filter
        .product_name
        .as_deref()
        .map_or(true, |name| item.name == name)
        && filter.kind.map_or(true, |kind| item.kind == kind)
}

// =============================================================================
// Unit Tests
// =============================================================================
