//! Chat transport seam.
//!
//! The engine produces [`Screen`]s; a transport turns them into messages on
//! some chat platform. Everything above this trait is platform-agnostic,
//! and tests run against the in-memory implementation.

pub mod memory;

pub use memory::MemoryTransport;

use async_trait::async_trait;
use thiserror::Error;

use shared::screen::Screen;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("transport closed")]
    Closed,
}

#[async_trait]
pub trait ChatTransport: Send + Sync + std::fmt::Debug {
    /// Deliver one screen to one user.
    async fn deliver(&self, user_id: i64, screen: Screen) -> Result<(), TransportError>;
}
