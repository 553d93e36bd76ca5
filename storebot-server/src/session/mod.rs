//! Per-user dialog sessions.
//!
//! Sessions live only in memory; a restart puts everyone back at the main
//! menu. Each user gets one session guarded by its own mutex, so events from
//! the same user are handled strictly one at a time while different users
//! proceed in parallel.

pub mod state;

pub use state::{DialogState, OrderDraft, ProductDraft};

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct DialogSession {
    pub state: DialogState,
}

impl DialogSession {
    /// Back to the main menu, dropping any draft.
    pub fn reset(&mut self) {
        self.state = DialogState::MainMenu;
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<DashMap<i64, Arc<Mutex<DialogSession>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for the user's session, created at the main menu on first use.
    pub fn session(&self, user_id: i64) -> Arc<Mutex<DialogSession>> {
        self.sessions.entry(user_id).or_default().clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
