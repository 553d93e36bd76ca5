//! User Model

use serde::{Deserialize, Serialize};

/// A chat user known to the store.
///
/// `id` is the external chat-network identifier, not a generated key.
/// Profile fields follow last-write-wins on every inbound event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Captured during checkout; empty until the first order.
    pub phone: Option<String>,
    pub is_admin: bool,
    /// Unix millis of first registration.
    pub created_at: i64,
}

impl User {
    /// Human-readable name for screens and notifications.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, _) => self
                .username
                .clone()
                .unwrap_or_else(|| format!("user {}", self.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_real_name() {
        let user = User {
            id: 7,
            username: Some("shopper".into()),
            first_name: Some("Anna".into()),
            last_name: None,
            phone: None,
            is_admin: false,
            created_at: 0,
        };
        assert_eq!(user.display_name(), "Anna");
    }

    #[test]
    fn display_name_falls_back_to_username_then_id() {
        let mut user = User {
            id: 7,
            username: Some("shopper".into()),
            first_name: None,
            last_name: None,
            phone: None,
            is_admin: false,
            created_at: 0,
        };
        assert_eq!(user.display_name(), "shopper");

        user.username = None;
        assert_eq!(user.display_name(), "user 7");
    }
}
