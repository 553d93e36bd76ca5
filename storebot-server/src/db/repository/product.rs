//! Product and category repository.
//!
//! Products are never hard-deleted: `soft_delete` flips `is_active` so that
//! existing order snapshots and cart rows keep a row to point at. Listings
//! only ever show active products; `find` returns inactive ones too so the
//! caller can tell "gone" from "never existed".

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::types::Json;

use shared::models::{Category, Product};
use shared::util::now_millis;

use super::{RepoError, RepoResult};
use crate::db::rows::ProductRow;

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, category, images, is_active, created_at";

pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    description: &str,
    price: &Decimal,
    category: &str,
    images: &[String],
) -> RepoResult<i64> {
    let result = sqlx::query(
        "INSERT INTO products (name, description, price, category, images, is_active, created_at) \
         VALUES (?, ?, ?, ?, ?, 1, ?)",
    )
    .bind(name)
    .bind(description)
    .bind(price.to_string())
    .bind(category)
    .bind(Json(images))
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    description: &str,
    price: &Decimal,
    category: &str,
    images: &[String],
) -> RepoResult<()> {
    let result = sqlx::query(
        "UPDATE products SET name = ?, description = ?, price = ?, category = ?, images = ? \
         WHERE id = ?",
    )
    .bind(name)
    .bind(description)
    .bind(price.to_string())
    .bind(category)
    .bind(Json(images))
    .bind(id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

/// Fetch by id regardless of `is_active`; listings filter, lookups don't.
pub async fn find(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(ProductRow::into_product).transpose()
}

pub async fn list_active_by_category(
    pool: &SqlitePool,
    category: &str,
) -> RepoResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products \
         WHERE category = ? AND is_active = 1 \
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(category)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(ProductRow::into_product).collect()
}

pub async fn soft_delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("UPDATE products SET is_active = 0 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

pub async fn count_active(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE is_active = 1")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Active product counts per category, for the stats screen.
pub async fn count_by_category(pool: &SqlitePool) -> RepoResult<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT category, COUNT(*) FROM products WHERE is_active = 1 \
         GROUP BY category ORDER BY category",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn categories(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, emoji FROM categories ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn category_exists(pool: &SqlitePool, name: &str) -> RepoResult<bool> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(n > 0)
}
