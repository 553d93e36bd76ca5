//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product
///
/// Deletion is a soft flip of `is_active`; committed orders keep their own
/// snapshot of name and price, so a deactivated product never disappears
/// from history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Category name, matching `Category::name`.
    pub category: String,
    /// Ordered opaque media references, delivered with the detail screen.
    pub images: Vec<String>,
    pub is_active: bool,
    /// Unix millis.
    pub created_at: i64,
}
