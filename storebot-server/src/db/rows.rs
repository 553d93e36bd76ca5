//! Row types bridging SQLite storage and the domain models.
//!
//! Money travels as TEXT (exact decimal string), JSON columns decode through
//! `sqlx::types::Json`. Conversion failures surface as `RepoError::Corrupted`
//! rather than panicking on bad rows.

use rust_decimal::Decimal;
use sqlx::types::Json;

use shared::models::{Order, OrderLine, OrderStatus, Product};
use shared::models::cart::CartItem;

use super::repository::{RepoError, RepoResult};

pub(crate) fn parse_money(raw: &str) -> RepoResult<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|e| RepoError::Corrupted(format!("bad money value {raw:?}: {e}")))
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub images: Json<Vec<String>>,
    pub is_active: bool,
    pub created_at: i64,
}

impl ProductRow {
    pub fn into_product(self) -> RepoResult<Product> {
        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: parse_money(&self.price)?,
            category: self.category,
            images: self.images.0,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CartRow {
    pub product_id: i64,
    pub name: String,
    pub price: String,
    pub quantity: i64,
}

impl CartRow {
    pub fn into_item(self) -> RepoResult<CartItem> {
        Ok(CartItem {
            product_id: self.product_id,
            name: self.name,
            price: parse_money(&self.price)?,
            quantity: self.quantity,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct OrderRow {
    pub id: i64,
    pub user_id: i64,
    pub products: Json<Vec<OrderLine>>,
    pub total_amount: String,
    pub phone: String,
    pub address: String,
    pub comment: Option<String>,
    pub status: String,
    pub created_at: i64,
}

impl OrderRow {
    pub fn into_order(self) -> RepoResult<Order> {
        let status: OrderStatus = self
            .status
            .parse()
            .map_err(|e| RepoError::Corrupted(format!("order {}: {e}", self.id)))?;
        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            lines: self.products.0,
            total: parse_money(&self.total_amount)?,
            phone: self.phone,
            address: self.address,
            comment: self.comment,
            status,
            created_at: self.created_at,
        })
    }
}

/// Order joined with the buyer's profile, for the admin order feed.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct OrderWithBuyerRow {
    pub id: i64,
    pub user_id: i64,
    pub products: Json<Vec<OrderLine>>,
    pub total_amount: String,
    pub phone: String,
    pub address: String,
    pub comment: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_money_accepts_plain_and_fractional() {
        assert_eq!(parse_money("2000").unwrap(), Decimal::from(2000));
        assert_eq!(parse_money("99.50").unwrap(), "99.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn parse_money_reports_corrupted_values() {
        let err = parse_money("not-a-number").unwrap_err();
        assert!(matches!(err, RepoError::Corrupted(_)));
    }

    #[test]
    fn order_row_rejects_unknown_status() {
        let row = OrderRow {
            id: 7,
            user_id: 1,
            products: Json(vec![]),
            total_amount: "100".into(),
            phone: "+70000000000".into(),
            address: "somewhere".into(),
            comment: None,
            status: "vanished".into(),
            created_at: 0,
        };
        assert!(matches!(row.into_order(), Err(RepoError::Corrupted(_))));
    }
}
