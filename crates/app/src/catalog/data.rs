//! Catalog Data

use std::path::PathBuf;

use rust_decimal::Decimal;

/// Category sentinel that bypasses the category filter.
pub const CATEGORY_ALL: &str = "Todos";

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub is_visible: bool,
}

/// Catalog listing filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    /// Exclude products whose visibility flag is off.
    pub public_only: bool,
    /// Exact category match; `None` matches every category.
    pub category: Option<String>,
}

impl CatalogFilter {
    /// Build a filter, normalizing the "all categories" sentinel away.
    #[must_use]
    pub fn new(public_only: bool, category: Option<String>) -> Self {
        let category = category.filter(|category| category != CATEGORY_ALL);

        Self {
            public_only,
            category,
        }
    }
}

/// An uploaded image staged on disk, waiting to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub original_name: String,
    pub source: PathBuf,
}
