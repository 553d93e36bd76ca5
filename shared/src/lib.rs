//! Shared types for the Storebot workspace
//!
//! Domain models and the transport-facing wire types (inbound events,
//! outbound screens) used by both the server crate and out-of-tree
//! chat-network adapters.

pub mod event;
pub mod models;
pub mod screen;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use event::{EventKind, InboundEvent, Sender};
pub use models::*;
pub use screen::{Action, Screen};
