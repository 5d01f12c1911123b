//! # Product Catalog
//!
//! The catalog seam the ledger session resolves products through, plus an
//! in-memory implementation backing tests, the demo binary and the
//! in-process backend.
//!
//! A failed lookup is always recoverable: the session surfaces it to the
//! operator as a validation problem and the open bill is untouched.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use agrobill_core::types::{Product, ProductKind};

// =============================================================================
// Catalog Error
// =============================================================================

/// Catalog operation failures. None of these are fatal.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product id or name no longer resolvable.
    #[error("product not found: {0}")]
    NotFound(String),

    /// Stock deduction was requested for more than is available.
    #[error("insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: Decimal,
    },
}

// =============================================================================
// Catalog Trait
// =============================================================================

/// Read access to the product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Resolves a product by catalog id.
    async fn lookup(&self, product_id: i64) -> Result<Product, CatalogError>;

    /// Case-insensitive name search, optionally restricted to a kind.
    /// Results are ordered by product name.
    async fn search(
        &self,
        query: &str,
        kind: Option<ProductKind>,
    ) -> Result<Vec<Product>, CatalogError>;
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// Catalog held in memory behind an `RwLock`.
///
/// Lookups clone the product so callers hold a snapshot, never a reference
/// into the map.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<BTreeMap<i64, Product>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        InMemoryCatalog::default()
    }

    /// Inserts or replaces a product by id.
    pub fn insert(&self, product: Product) {
        let mut products = self.products.write().expect("catalog lock poisoned");
        products.insert(product.id, product);
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.read().expect("catalog lock poisoned").len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves a product by exact name (the key the submission backend
    /// receives on the wire).
    pub fn find_by_name(&self, name: &str) -> Option<Product> {
        let products = self.products.read().expect("catalog lock poisoned");
        products.values().find(|p| p.name == name).cloned()
    }

    /// Current tracked stock of a product, if any.
    pub fn stock_of(&self, product_id: i64) -> Option<i64> {
        let products = self.products.read().expect("catalog lock poisoned");
        products.get(&product_id).and_then(|p| p.stock_qty)
    }

    /// Deducts sold quantity from a product's tracked stock.
    ///
    /// Untracked products are a no-op. After a fractional-quantity sale
    /// the remaining stock rounds down, never overselling.
    pub fn deduct_stock(&self, name: &str, qty: Decimal) -> Result<(), CatalogError> {
        self.adjust_stock(name, qty, true)
    }

    /// Returns previously deducted quantity to a product's tracked stock
    /// (bill cancellation).
    pub fn restore_stock(&self, name: &str, qty: Decimal) -> Result<(), CatalogError> {
        self.adjust_stock(name, qty, false)
    }

    fn adjust_stock(&self, name: &str, qty: Decimal, deduct: bool) -> Result<(), CatalogError> {
        let mut products = self.products.write().expect("catalog lock poisoned");
        let product = products
            .values_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        let Some(stock) = product.stock_qty else {
            return Ok(());
        };

        let stock_dec = Decimal::from(stock);
        let remaining = if deduct {
            if stock_dec < qty {
                return Err(CatalogError::InsufficientStock {
                    name: product.name.clone(),
                    available: stock,
                    requested: qty,
                });
            }
            stock_dec - qty
        } else {
            stock_dec + qty
        };

        product.stock_qty = Some(remaining.floor().to_i64().unwrap_or(0));
        Ok(())
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn lookup(&self, product_id: i64) -> Result<Product, CatalogError> {
        let products = self.products.read().expect("catalog lock poisoned");
        products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(product_id.to_string()))
    }

    async fn search(
        &self,
        query: &str,
        kind: Option<ProductKind>,
    ) -> Result<Vec<Product>, CatalogError> {
        let needle = query.trim().to_lowercase();
        let products = self.products.read().expect("catalog lock poisoned");

        let mut matches: Vec<Product> = products
            .values()
            .filter(|p| kind.map_or(true, |k| p.kind == k))
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(matches)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
