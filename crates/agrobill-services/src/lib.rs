//! # agrobill-services: Service Layer for agrobill
//!
//! Async collaborators around the pure ledger in `agrobill-core`:
//!
//! - [`catalog`] - product lookup/search seam + in-memory implementation
//! - [`submission`] - the gateway a finished bill is submitted through
//!   (HTTP against the PDF backend, or in-process)
//! - [`backend`] - [`backend::LocalBackend`], an in-process stand-in for
//!   the PDF backend: validation, stock, numbering, archival
//! - [`archive`] - submitted bills, cancellation, renumbering
//! - [`report`] - sales aggregation by period and by product
//! - [`session`] - [`session::BillingSession`], one operator editing one
//!   bill
//!
//! The split mirrors the core crate's golden rule: everything that
//! suspends lives here, everything that computes lives in the core.

pub mod archive;
pub mod backend;
pub mod catalog;
pub mod report;
pub mod session;
pub mod submission;

pub use archive::{BillArchive, BillRecord, RecordItem};
pub use backend::{BackendError, LocalBackend};
pub use catalog::{Catalog, CatalogError, InMemoryCatalog};
pub use report::{sales_by_period, sales_by_product, ProductSales, ReportFilter, ReportPeriod, ReportRow};
pub use session::{BillingError, BillingSession};
pub use submission::{DocumentRef, HttpSubmissionGateway, SubmissionError, SubmissionGateway};
