//! In-memory transport for tests and local runs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shared::screen::Screen;

use super::{ChatTransport, TransportError};

/// Records every delivered screen instead of sending it anywhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: Arc<Mutex<Vec<(i64, Screen)>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, in order.
    pub async fn sent(&self) -> Vec<(i64, Screen)> {
        self.sent.lock().await.clone()
    }

    /// Screens delivered to one user, in order.
    pub async fn sent_to(&self, user_id: i64) -> Vec<Screen> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, screen)| screen.clone())
            .collect()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl ChatTransport for MemoryTransport {
    async fn deliver(&self, user_id: i64, screen: Screen) -> Result<(), TransportError> {
        self.sent.lock().await.push((user_id, screen));
        Ok(())
    }
}
