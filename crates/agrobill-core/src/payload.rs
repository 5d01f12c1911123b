//! # Submission Payload
//!
//! The exact structure handed to the bill submission service. Key names
//! and nesting are a wire contract shared with the PDF backend and the
//! browser frontend: camelCase header and totals keys, snake_case item
//! keys, items under `products`. Monetary figures are fixed to two
//! decimal places here and nowhere earlier.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{Bill, LineItem};
use crate::validation;

// =============================================================================
// Bill Header
// =============================================================================

/// Operator-entered header fields for one bill.
///
/// All four fields are required at submission; `missing_fields` reports
/// the empty ones by their wire names so the operator can be re-prompted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillHeader {
    pub customer_name: String,
    pub village: String,
    pub mobile_num: String,
    #[ts(as = "Option<String>")]
    pub bill_date: Option<NaiveDate>,
}

impl BillHeader {
    /// Wire names of the header fields that are empty or missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.customer_name.trim().is_empty() {
            missing.push("customerName");
        }
        if self.village.trim().is_empty() {
            missing.push("village");
        }
        if self.mobile_num.trim().is_empty() {
            missing.push("mobileNum");
        }
        if self.bill_date.is_none() {
            missing.push("billDate");
        }
        missing
    }
}

// =============================================================================
// Payload Item
// =============================================================================

/// One line item as transmitted to the submission service.
///
/// Field names are the item-level wire contract; `rate` and `amount` are
/// fixed to two decimals, `qty` and `gst` travel as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PayloadItem {
    pub name: String,
    pub company_name: Option<String>,
    pub mfg_date: Option<String>,
    pub exp_date: Option<String>,
    pub batch_num: Option<String>,
    #[ts(as = "String")]
    pub rate: Decimal,
    #[ts(as = "String")]
    pub qty: Decimal,
    #[ts(as = "String")]
    pub gst: Decimal,
    #[ts(as = "String")]
    pub amount: Decimal,
}

impl PayloadItem {
    fn from_line(item: &LineItem) -> Self {
        PayloadItem {
            name: item.name.clone(),
            company_name: item.company_name.clone(),
            mfg_date: item.mfg_date.clone(),
            exp_date: item.exp_date.clone(),
            batch_num: item.batch_num.clone(),
            rate: item.rate.to_fixed(),
            qty: item.qty.normalize(),
            gst: item.gst.percent().normalize(),
            amount: item.amount.to_fixed(),
        }
    }
}

// =============================================================================
// Bill Payload
// =============================================================================

/// The complete submission payload: header, ordered items, totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillPayload {
    pub customer_name: String,
    pub village: String,
    pub mobile_num: String,
    #[ts(as = "String")]
    pub bill_date: NaiveDate,
    pub products: Vec<PayloadItem>,
    #[ts(as = "String")]
    pub total_before_tax: Decimal,
    #[ts(as = "String")]
    pub total_gst: Decimal,
    #[ts(as = "String")]
    pub grand_total: Decimal,
}

/// Builds the submission payload for `bill` under `header`.
///
/// Totals are recomputed here, immediately before building, so the payload
/// can never carry stale figures. The transmitted grand total is the sum
/// of the two rounded components, keeping the printed bill arithmetically
/// consistent.
///
/// ## Errors
/// - [`LedgerError::IncompleteBill`] naming every empty header field, plus
///   `products` when the bill has no line items
/// - [`LedgerError::Validation`] for a malformed mobile number
pub fn build_submission_payload(bill: &Bill, header: &BillHeader) -> LedgerResult<BillPayload> {
    let mut missing: Vec<&str> = header.missing_fields();
    if bill.is_empty() {
        missing.push("products");
    }
    if !missing.is_empty() {
        return Err(LedgerError::IncompleteBill {
            missing: missing.into_iter().map(String::from).collect(),
        });
    }

    validation::validate_customer_name(&header.customer_name)?;
    validation::validate_village(&header.village)?;
    validation::validate_mobile(&header.mobile_num)?;

    let bill_date = header.bill_date.ok_or_else(|| LedgerError::IncompleteBill {
        missing: vec!["billDate".to_string()],
    })?;

    let totals = bill.compute_totals();
    let total_before_tax = totals.total_before_tax.to_fixed();
    let total_gst = totals.total_gst.to_fixed();

    Ok(BillPayload {
        customer_name: header.customer_name.trim().to_string(),
        village: header.village.trim().to_string(),
        mobile_num: header.mobile_num.trim().to_string(),
        bill_date,
        products: bill.items().iter().map(PayloadItem::from_line).collect(),
        total_before_tax,
        total_gst,
        grand_total: total_before_tax + total_gst,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
