//! Catalog Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rust_decimal::Decimal;

/// Product identifier, generated by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(i64);

impl ProductId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.into_inner()
    }
}

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub is_visible: bool,
}

/// Product View — a product with its image URLs resolved, as served by
/// catalog listings.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub is_visible: bool,
    /// Ordered by insertion; empty when the product has no images.
    pub images: Vec<String>,
}
