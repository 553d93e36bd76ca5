//! Cart repository.
//!
//! One row per (user, product); adding the same product again bumps the
//! quantity. Reads join `products` and skip inactive rows, so a product
//! deleted after being carted silently drops out of the cart view.

use sqlx::SqlitePool;

use shared::models::cart::CartItem;

use super::{RepoError, RepoResult};
use crate::db::rows::CartRow;

/// Add one unit of `product_id` to the user's cart.
///
/// Fails with [`RepoError::NotFound`] when the product is missing or no
/// longer active; the cart is left untouched in that case.
pub async fn add(pool: &SqlitePool, user_id: i64, product_id: i64) -> RepoResult<()> {
    let active = sqlx::query_scalar::<_, bool>("SELECT is_active FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
    if !active.unwrap_or(false) {
        return Err(RepoError::NotFound);
    }

    sqlx::query(
        "INSERT INTO cart (user_id, product_id, quantity) VALUES (?, ?, 1) \
         ON CONFLICT(user_id, product_id) DO UPDATE SET quantity = quantity + 1",
    )
    .bind(user_id)
    .bind(product_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Cart contents in insertion order, priced from the live product rows.
pub async fn items(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<CartItem>> {
    let rows = sqlx::query_as::<_, CartRow>(
        "SELECT c.product_id, p.name, p.price, c.quantity \
         FROM cart c JOIN products p ON p.id = c.product_id \
         WHERE c.user_id = ? AND p.is_active = 1 \
         ORDER BY c.rowid",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(CartRow::into_item).collect()
}

/// Drop a product from the cart. Removing something already gone is a no-op.
pub async fn remove(pool: &SqlitePool, user_id: i64, product_id: i64) -> RepoResult<()> {
    sqlx::query("DELETE FROM cart WHERE user_id = ? AND product_id = ?")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn clear(pool: &SqlitePool, user_id: i64) -> RepoResult<()> {
    sqlx::query("DELETE FROM cart WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
