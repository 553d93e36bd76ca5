//! User repository.
//!
//! Every inbound event upserts the sender first, so the rest of the system
//! can assume the user row exists. The upsert refreshes profile fields and
//! the admin flag but never touches `created_at` or a saved phone.

use sqlx::SqlitePool;

use shared::models::User;
use shared::util::now_millis;

use super::{RepoError, RepoResult};

pub async fn upsert(
    pool: &SqlitePool,
    user_id: i64,
    username: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    is_admin: bool,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, username, first_name, last_name, is_admin, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            username = excluded.username,
            first_name = excluded.first_name,
            last_name = excluded.last_name,
            is_admin = excluded.is_admin
        "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(first_name)
    .bind(last_name)
    .bind(is_admin)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, first_name, last_name, phone, is_admin, created_at \
         FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Admin flag as persisted; unknown users are not admins.
pub async fn is_admin(pool: &SqlitePool, user_id: i64) -> RepoResult<bool> {
    let flag = sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(flag.unwrap_or(false))
}

pub async fn set_phone(pool: &SqlitePool, user_id: i64, phone: &str) -> RepoResult<()> {
    let result = sqlx::query("UPDATE users SET phone = ? WHERE id = ?")
        .bind(phone)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
