//! Order repository.
//!
//! An order stores a snapshot of its lines as JSON, so later product edits
//! or deletions never rewrite order history. Creation and cart clearing
//! happen in one transaction.

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::types::Json;

use shared::models::{Order, OrderLine};
use shared::util::now_millis;

use super::RepoResult;
use crate::db::rows::{OrderRow, OrderWithBuyerRow, parse_money};

/// Order plus the buyer's current profile, for the admin feed.
#[derive(Debug)]
pub struct OrderWithBuyer {
    pub order: Order,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl OrderWithBuyer {
    pub fn buyer_label(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self
                .username
                .clone()
                .unwrap_or_else(|| format!("user {}", self.order.user_id)),
        }
    }
}

fn with_buyer(row: OrderWithBuyerRow) -> RepoResult<OrderWithBuyer> {
    let order = OrderRow {
        id: row.id,
        user_id: row.user_id,
        products: row.products,
        total_amount: row.total_amount,
        phone: row.phone,
        address: row.address,
        comment: row.comment,
        status: row.status,
        created_at: row.created_at,
    }
    .into_order()?;
    Ok(OrderWithBuyer {
        order,
        username: row.username,
        first_name: row.first_name,
        last_name: row.last_name,
    })
}

/// Persist the order and clear the buyer's cart in one transaction.
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    lines: &[OrderLine],
    total: &Decimal,
    phone: &str,
    address: &str,
    comment: Option<&str>,
) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO orders (user_id, products, total_amount, phone, address, comment, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, 'new', ?)",
    )
    .bind(user_id)
    .bind(Json(lines))
    .bind(total.to_string())
    .bind(phone)
    .bind(address)
    .bind(comment)
    .bind(now_millis())
    .execute(&mut *tx)
    .await?;
    let order_id = result.last_insert_rowid();

    sqlx::query("DELETE FROM cart WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(order_id)
}

pub async fn find(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(
        "SELECT id, user_id, products, total_amount, phone, address, comment, status, created_at \
         FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(OrderRow::into_order).transpose()
}

/// Latest orders first, joined with buyer profiles.
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<OrderWithBuyer>> {
    let rows = sqlx::query_as::<_, OrderWithBuyerRow>(
        "SELECT o.id, o.user_id, o.products, o.total_amount, o.phone, o.address, \
                o.comment, o.status, o.created_at, \
                u.username, u.first_name, u.last_name \
         FROM orders o JOIN users u ON u.id = o.user_id \
         ORDER BY o.created_at DESC, o.id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(with_buyer).collect()
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Sum of all order totals; orders with no rows sum to zero.
pub async fn revenue(pool: &SqlitePool) -> RepoResult<Decimal> {
    let totals = sqlx::query_scalar::<_, String>("SELECT total_amount FROM orders")
        .fetch_all(pool)
        .await?;
    let mut sum = Decimal::ZERO;
    for raw in &totals {
        sum += parse_money(raw)?;
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{cart, product, user};
    use shared::models::OrderStatus;
    use shared::models::cart::{CartItem, cart_total};

    const BUYER: i64 = 20;

    async fn seeded_pool() -> (SqlitePool, Vec<CartItem>) {
        let pool = DbService::in_memory().await.unwrap().pool;
        user::upsert(&pool, BUYER, Some("ivan"), Some("Ivan"), Some("Petrov"), false)
            .await
            .unwrap();

        let sofa = product::insert(
            &pool,
            "Sofa",
            "Two-seater sofa here",
            &Decimal::from(1000),
            "Sofas",
            &[],
        )
        .await
        .unwrap();
        let chair = product::insert(
            &pool,
            "Chair",
            "Simple chair, wood",
            &Decimal::from(500),
            "Chairs",
            &[],
        )
        .await
        .unwrap();

        cart::add(&pool, BUYER, sofa).await.unwrap();
        cart::add(&pool, BUYER, chair).await.unwrap();
        cart::add(&pool, BUYER, chair).await.unwrap();

        let items = cart::items(&pool, BUYER).await.unwrap();
        (pool, items)
    }

    #[tokio::test]
    async fn create_snapshots_lines_and_clears_the_cart() {
        let (pool, items) = seeded_pool().await;
        let lines: Vec<OrderLine> = items.iter().cloned().map(OrderLine::from).collect();
        let total = cart_total(&items);
        assert_eq!(total, Decimal::from(2000));

        let id = create(&pool, BUYER, &lines, &total, "+71234567890", "Moscow, Lenina 1, apt 5", None)
            .await
            .unwrap();

        assert!(cart::items(&pool, BUYER).await.unwrap().is_empty());

        let order = find(&pool, id).await.unwrap().unwrap();
        assert_eq!(order.user_id, BUYER);
        assert_eq!(order.total, Decimal::from(2000));
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.phone, "+71234567890");
        assert!(order.comment.is_none());
    }

    #[tokio::test]
    async fn order_lines_survive_product_deletion() {
        let (pool, items) = seeded_pool().await;
        let lines: Vec<OrderLine> = items.iter().cloned().map(OrderLine::from).collect();
        let total = cart_total(&items);
        let id = create(&pool, BUYER, &lines, &total, "+71234567890", "Moscow", Some("leave at door"))
            .await
            .unwrap();

        for item in &items {
            product::soft_delete(&pool, item.product_id).await.unwrap();
        }

        let order = find(&pool, id).await.unwrap().unwrap();
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.total, Decimal::from(2000));
        assert_eq!(order.comment.as_deref(), Some("leave at door"));
    }

    #[tokio::test]
    async fn recent_orders_carry_buyer_labels_newest_first() {
        let (pool, items) = seeded_pool().await;
        let lines: Vec<OrderLine> = items.iter().cloned().map(OrderLine::from).collect();
        let total = cart_total(&items);

        let first = create(&pool, BUYER, &lines, &total, "+71234567890", "Moscow", None)
            .await
            .unwrap();
        let second = create(&pool, BUYER, &lines, &total, "+71234567890", "Moscow", None)
            .await
            .unwrap();

        let recent = list_recent(&pool, 10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].order.id, second);
        assert_eq!(recent[1].order.id, first);
        assert_eq!(recent[0].buyer_label(), "Ivan Petrov");

        assert_eq!(list_recent(&pool, 1).await.unwrap().len(), 1);
        assert_eq!(count(&pool).await.unwrap(), 2);
        assert_eq!(revenue(&pool).await.unwrap(), Decimal::from(4000));
    }
}
