//! Inbound events
//!
//! The single structure a chat-network adapter produces for the dialog
//! engine. Payloads stay opaque here; the engine parses button tokens into
//! typed tags on its side of the boundary.

use serde::{Deserialize, Serialize};

/// Profile data the transport captured from the sending user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Sender {
    /// Display name for notifications: real name, else username.
    pub fn display_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, _) => self.username.clone(),
        }
    }
}

/// What kind of input arrived, with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum EventKind {
    /// Slash-command style input: "start", "cancel".
    Command(String),
    /// A pressed button's action token.
    Button(String),
    /// Free text.
    Text(String),
    /// An opaque media reference (the transport owns the actual bytes).
    Media(String),
}

/// One inbound dialog event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub user_id: i64,
    #[serde(default)]
    pub sender: Sender,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn command(user_id: i64, command: impl Into<String>) -> Self {
        Self {
            user_id,
            sender: Sender::default(),
            kind: EventKind::Command(command.into()),
        }
    }

    pub fn button(user_id: i64, token: impl Into<String>) -> Self {
        Self {
            user_id,
            sender: Sender::default(),
            kind: EventKind::Button(token.into()),
        }
    }

    pub fn text(user_id: i64, text: impl Into<String>) -> Self {
        Self {
            user_id,
            sender: Sender::default(),
            kind: EventKind::Text(text.into()),
        }
    }

    pub fn media(user_id: i64, reference: impl Into<String>) -> Self {
        Self {
            user_id,
            sender: Sender::default(),
            kind: EventKind::Media(reference.into()),
        }
    }

    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = sender;
        self
    }
}
