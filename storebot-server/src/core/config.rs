//! Environment configuration.
//!
//! | Variable                | Default       | Meaning                              |
//! |-------------------------|---------------|--------------------------------------|
//! | `DATABASE_PATH`         | `storebot.db` | SQLite file path                     |
//! | `ADMIN_IDS`             | empty         | comma-separated admin user ids       |
//! | `LOG_LEVEL`             | `info`        | tracing level filter                 |
//! | `LOG_DIR`               | unset         | daily log files land here if set     |
//! | `NOTIFY_QUEUE_CAPACITY` | `64`          | admin notification queue size        |

use std::env;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub admin_ids: Vec<i64>,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub notify_queue_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "storebot.db".to_string());
        let admin_ids = parse_admin_ids(&env::var("ADMIN_IDS").unwrap_or_default());
        if admin_ids.is_empty() {
            warn!("⚠️ ADMIN_IDS is empty, nobody can manage the store");
        }
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_dir = env::var("LOG_DIR").ok();
        let notify_queue_capacity = env::var("NOTIFY_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64);

        Self {
            database_path,
            admin_ids,
            log_level,
            log_dir,
            notify_queue_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Tolerant parse: blanks are skipped, malformed entries are logged and
/// dropped rather than failing startup.
fn parse_admin_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            match part.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("ignoring malformed admin id {part:?}");
                    None
                }
            }
        })
        .collect()
}
