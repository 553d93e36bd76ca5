//! Cart Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a user's cart, joined with the product it references.
///
/// Quantity is always >= 1; removing an item deletes the row instead of
/// storing a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Sum of `price * quantity` over the cart.
pub fn cart_total(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::line_total).sum()
}
