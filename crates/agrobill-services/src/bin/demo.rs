//! # agrobill demo
//!
//! Seeds an in-memory catalog, rings up a bill through a session, submits
//! it to the in-process backend and prints a sales report.
//!
//! ## Usage
//! ```bash
//! cargo run -p agrobill-services --bin demo
//!
//! # with tracing output
//! RUST_LOG=debug cargo run -p agrobill-services --bin demo
//! ```

use std::sync::Arc;

use rust_decimal::Decimal;

use agrobill_core::money::{GstRate, Money};
use agrobill_core::types::{Product, ProductKind};
use agrobill_core::{BillHeader, LedgerConfig, TaxConvention};
use agrobill_services::{
    sales_by_period, BillingSession, InMemoryCatalog, LocalBackend, ReportFilter, ReportPeriod,
};

/// Seed products: name, company, kind, rate (GST-inclusive), GST %, stock.
const PRODUCTS: &[(&str, &str, ProductKind, &str, &str, i64)] = &[
    ("Urea 45kg", "IFFCO", ProductKind::Fertilizer, "266.50", "5", 120),
    ("DAP 50kg", "IFFCO", ProductKind::Fertilizer, "1350.00", "5", 80),
    ("Potash 50kg", "ICL", ProductKind::Fertilizer, "1700.00", "5", 45),
    ("Neem Oil 500ml", "GreenLeaf", ProductKind::Pesticide, "118.00", "18", 60),
    ("Chlorpyrifos 1L", "AgriShield", ProductKind::Pesticide, "590.00", "18", 30),
    ("Sprayer Nozzle", "FieldKit", ProductKind::General, "85.00", "12", 200),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("agrobill demo");
    println!("=============");

    // Seed the catalog
    let catalog = Arc::new(InMemoryCatalog::new());
    for (idx, (name, company, kind, rate, gst, stock)) in PRODUCTS.iter().enumerate() {
        catalog.insert(Product {
            id: idx as i64 + 1,
            name: (*name).to_string(),
            company_name: Some((*company).to_string()),
            kind: *kind,
            mfg_date: Some("2026-01".to_string()),
            exp_date: Some("2028-01".to_string()),
            batch_num: Some(format!("B-{:04}", idx + 1)),
            hsn_code: None,
            pack_size: None,
            rate: Money::new(rate.parse::<Decimal>()?),
            gst: GstRate::from_percent(gst.parse::<Decimal>()?)?,
            stock_qty: Some(*stock),
        });
    }
    println!("✓ Seeded {} products", catalog.len());

    // Ring up a bill: rates are GST-inclusive, stock enforced, whole units
    let backend = Arc::new(LocalBackend::new(catalog.clone()));
    let mut session = BillingSession::new(
        catalog.clone(),
        backend.clone(),
        LedgerConfig::new(TaxConvention::Inclusive),
    );

    session.add_product(1, Decimal::from(2)).await?; // 2 × Urea
    session.add_product(4, Decimal::from(3)).await?; // 3 × Neem Oil
    let extra = session.add_product(6, Decimal::from(1)).await?;
    session.remove_line(extra.id); // operator changed their mind

    println!();
    println!("Bill in progress:");
    for item in session.bill().items() {
        println!("  {:<18} x{} = {}", item.name, item.qty, item.amount);
    }
    let totals = session.totals();
    println!("  before tax {}", totals.total_before_tax);
    println!("  GST        {}", totals.total_gst);
    println!("  TOTAL      {}", totals.grand_total);

    // Submit
    let header = BillHeader {
        customer_name: "Ramesh Patil".to_string(),
        village: "Shirpur".to_string(),
        mobile_num: "9876543210".to_string(),
        bill_date: Some(chrono::Local::now().date_naive()),
    };
    let doc = session.submit(&header).await?;
    println!();
    println!("✓ Bill submitted: {}", doc.filename);
    println!(
        "  Urea stock now: {:?}, Neem Oil stock now: {:?}",
        catalog.stock_of(1),
        catalog.stock_of(4)
    );

    // Report
    let bills = backend.bills();
    let rows = sales_by_period(&bills, ReportPeriod::Monthly, &ReportFilter::default());
    println!();
    println!("Monthly sales:");
    for row in rows {
        println!("  {}  ₹{}", row.period, row.total_sales);
    }

    Ok(())
}
