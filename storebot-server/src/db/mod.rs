//! Database layer
//!
//! SQLite behind a sqlx pool. Schema and the category seed live in
//! `migrations/` and are embedded at compile time; `DbService::new` runs
//! them on every start, which makes first boot and upgrades the same path.

pub mod repository;
pub(crate) mod rows;

pub use repository::{RepoError, RepoResult};

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};

/// Shared handle to the SQLite pool.
#[derive(Debug, Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (creating if missing) the database at `db_path` and migrate it.
    pub async fn new(db_path: &str) -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        // Writers back off instead of failing fast under contention.
        sqlx::query("PRAGMA busy_timeout = 5000;").execute(&pool).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!(path = %db_path, "database ready");
        Ok(Self { pool })
    }

    /// Fresh in-memory database with the full schema. Used by tests and
    /// embedded setups; the single-connection pool keeps the one memory
    /// database alive for the pool's lifetime.
    pub async fn in_memory() -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
