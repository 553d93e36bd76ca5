//! Repositories over the SQLite pool.
//!
//! Free functions taking `&SqlitePool`, one module per table group. All of
//! them return [`RepoResult`]; callers decide which failures are user-facing.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("corrupted record: {0}")]
    Corrupted(String),
}

pub type RepoResult<T> = Result<T, RepoError>;
