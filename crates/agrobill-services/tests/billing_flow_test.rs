//! End-to-end billing flow: catalog → session → in-process backend →
//! archive → reports, including the failed-submit-retry path and bill
//! cancellation.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use agrobill_core::money::{GstRate, Money};
use agrobill_core::types::{Product, ProductKind};
use agrobill_core::{BillHeader, LedgerConfig, LedgerError, TaxConvention};
use agrobill_services::{
    sales_by_period, sales_by_product, BillingError, BillingSession, InMemoryCatalog,
    LocalBackend, ReportFilter, ReportPeriod, SubmissionError,
};

fn product(
    id: i64,
    name: &str,
    kind: ProductKind,
    rate: rust_decimal::Decimal,
    gst: rust_decimal::Decimal,
    stock: i64,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        company_name: Some("AgroCorp".to_string()),
        kind,
        mfg_date: Some("2026-01".to_string()),
        exp_date: Some("2028-01".to_string()),
        batch_num: Some(format!("B-{id:04}")),
        hsn_code: None,
        pack_size: None,
        rate: Money::new(rate),
        gst: GstRate::from_percent(gst).unwrap(),
        stock_qty: Some(stock),
    }
}

fn seeded_catalog() -> Arc<InMemoryCatalog> {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.insert(product(1, "Urea 45kg", ProductKind::Fertilizer, dec!(266.50), dec!(5), 40));
    catalog.insert(product(2, "Neem Oil 500ml", ProductKind::Pesticide, dec!(118.00), dec!(18), 40));
    catalog
}

fn header(day: u32) -> BillHeader {
    BillHeader {
        customer_name: "Ramesh Patil".to_string(),
        village: "Shirpur".to_string(),
        mobile_num: "9876543210".to_string(),
        bill_date: NaiveDate::from_ymd_opt(2026, 8, day),
    }
}

fn inclusive_session(
    catalog: Arc<InMemoryCatalog>,
    backend: Arc<LocalBackend>,
) -> BillingSession {
    BillingSession::new(catalog, backend, LedgerConfig::new(TaxConvention::Inclusive))
}

#[tokio::test]
async fn full_billing_flow() {
    let catalog = seeded_catalog();
    let backend = Arc::new(LocalBackend::new(catalog.clone()));
    let mut session = inclusive_session(catalog.clone(), backend.clone());

    // build the bill: add, change mind, remove, add again
    session.add_product(1, dec!(2)).await.unwrap();
    let oil = session.add_product(2, dec!(5)).await.unwrap();
    assert!(session.remove_line(oil.id));
    session.add_product(2, dec!(2)).await.unwrap();

    // 2 × 266.50 + 2 × 118.00, rates GST-inclusive
    let totals = session.totals();
    assert_eq!(totals.grand_total, Money::new(dec!(769.00)));
    assert_eq!(
        totals.grand_total,
        totals.total_before_tax + totals.total_gst
    );

    let doc = session.submit(&header(6)).await.unwrap();
    assert!(doc.filename.starts_with("bill_"));
    assert!(doc.filename.ends_with(".pdf"));

    // session starts a fresh bill; the backend archived and deducted
    assert!(session.bill().is_empty());
    let bills = backend.bills();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].bill_number, 1);
    assert_eq!(bills[0].grand_total, dec!(769.00));
    assert_eq!(bills[0].kind(), ProductKind::Pesticide);
    assert_eq!(catalog.stock_of(1), Some(38));
    assert_eq!(catalog.stock_of(2), Some(38));
}

#[tokio::test]
async fn incomplete_bill_is_rejected_before_submission() {
    let catalog = seeded_catalog();
    let backend = Arc::new(LocalBackend::new(catalog.clone()));
    let mut session = inclusive_session(catalog, backend.clone());

    // no items at all
    let err = session.submit(&header(6)).await.unwrap_err();
    assert!(matches!(
        err,
        BillingError::Ledger(LedgerError::IncompleteBill { .. })
    ));

    // items present but header incomplete
    session.add_product(1, dec!(1)).await.unwrap();
    let mut bad_header = header(6);
    bad_header.customer_name.clear();
    let err = session.submit(&bad_header).await.unwrap_err();
    match err {
        BillingError::Ledger(LedgerError::IncompleteBill { missing }) => {
            assert_eq!(missing, vec!["customerName".to_string()]);
        }
        other => panic!("expected IncompleteBill, got {other:?}"),
    }

    // nothing reached the backend, nothing was deducted
    assert!(backend.bills().is_empty());
    assert_eq!(session.bill().item_count(), 1);
}

#[tokio::test]
async fn failed_submission_leaves_ledger_intact_and_retryable() {
    let catalog = seeded_catalog();
    let backend = Arc::new(LocalBackend::new(catalog.clone()));

    // two operators sell from the same stock of 40
    let mut first = inclusive_session(catalog.clone(), backend.clone());
    let mut second = inclusive_session(catalog.clone(), backend.clone());

    first.add_product(1, dec!(30)).await.unwrap();
    let line = second.add_product(1, dec!(30)).await.unwrap();

    first.submit(&header(6)).await.unwrap();
    assert_eq!(catalog.stock_of(1), Some(10));

    // the backend re-checks stock and refuses; the second bill is unchanged
    let err = second.submit(&header(6)).await.unwrap_err();
    assert!(matches!(
        err,
        BillingError::Submission(SubmissionError::Rejected(_))
    ));
    assert_eq!(second.bill().item_count(), 1);
    assert_eq!(catalog.stock_of(1), Some(10));

    // operator corrects the quantity and retries the same session
    assert!(second.remove_line(line.id));
    second.add_product(1, dec!(10)).await.unwrap();
    second.submit(&header(7)).await.unwrap();

    assert_eq!(catalog.stock_of(1), Some(0));
    assert_eq!(backend.bills().len(), 2);
}

#[tokio::test]
async fn cancellation_restores_stock_and_renumbers() {
    let catalog = seeded_catalog();
    let backend = Arc::new(LocalBackend::new(catalog.clone()));

    for day in [3, 6, 9] {
        let mut session = inclusive_session(catalog.clone(), backend.clone());
        session.add_product(1, dec!(5)).await.unwrap();
        session.submit(&header(day)).await.unwrap();
    }
    assert_eq!(catalog.stock_of(1), Some(25));

    backend.cancel_bill(2).unwrap();

    assert_eq!(catalog.stock_of(1), Some(30));
    let numbers: Vec<(i64, NaiveDate)> = backend
        .bills()
        .iter()
        .map(|b| (b.bill_number, b.bill_date))
        .collect();
    assert_eq!(
        numbers,
        vec![
            (1, NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()),
            (2, NaiveDate::from_ymd_opt(2026, 8, 9).unwrap()),
        ]
    );
}

#[tokio::test]
async fn reports_aggregate_submitted_bills() {
    let catalog = seeded_catalog();
    let backend = Arc::new(LocalBackend::new(catalog.clone()));

    let mut session = inclusive_session(catalog.clone(), backend.clone());
    session.add_product(1, dec!(2)).await.unwrap(); // 533.00 fertilizer
    session.add_product(2, dec!(1)).await.unwrap(); // 118.00 pesticide
    session.submit(&header(3)).await.unwrap();

    let mut session = inclusive_session(catalog.clone(), backend.clone());
    session.add_product(2, dec!(3)).await.unwrap(); // 354.00 pesticide
    session.submit(&header(20)).await.unwrap();

    let bills = backend.bills();

    let daily = sales_by_period(&bills, ReportPeriod::Daily, &ReportFilter::default());
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0].period, "2026-08-03");
    assert_eq!(daily[0].total_sales, dec!(651.00));
    assert_eq!(daily[1].total_sales, dec!(354.00));

    let monthly = sales_by_period(&bills, ReportPeriod::Monthly, &ReportFilter::default());
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].period, "2026-08");
    assert_eq!(monthly[0].total_sales, dec!(1005.00));

    let pesticides_only = ReportFilter {
        kind: Some(ProductKind::Pesticide),
        ..ReportFilter::default()
    };
    let rows = sales_by_period(&bills, ReportPeriod::Monthly, &pesticides_only);
    assert_eq!(rows[0].total_sales, dec!(472.00));

    let by_product = sales_by_product(&bills, &ReportFilter::default());
    assert_eq!(by_product.len(), 2);
    assert_eq!(by_product[0].product_name, "Neem Oil 500ml");
    assert_eq!(by_product[0].total_qty, dec!(4));
    assert_eq!(by_product[1].product_name, "Urea 45kg");
    assert_eq!(by_product[1].total_sales, dec!(533.00));
}
