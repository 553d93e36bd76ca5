//! Outbound screens
//!
//! The transport-agnostic render structure: a text body, rows of selectable
//! actions, and optional media references. Adapters translate this into
//! whatever their chat network calls a message with buttons.

use serde::{Deserialize, Serialize};

/// One selectable action: a visible label and the opaque token the engine
/// will receive back as a button event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub label: String,
    pub token: String,
}

impl Action {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// A renderable screen. `actions` is row-major: each inner vec is one row
/// of buttons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,
}

impl Screen {
    /// Plain text screen with no actions.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
            media: Vec::new(),
        }
    }

    /// Append one row of actions.
    pub fn row(mut self, actions: Vec<Action>) -> Self {
        self.actions.push(actions);
        self
    }

    /// Attach media references.
    pub fn with_media(mut self, media: Vec<String>) -> Self {
        self.media = media;
        self
    }

    /// All action tokens in row order.
    pub fn tokens(&self) -> Vec<&str> {
        self.actions
            .iter()
            .flatten()
            .map(|action| action.token.as_str())
            .collect()
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.tokens().contains(&token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_preserve_order() {
        let screen = Screen::text("Pick one")
            .row(vec![Action::new("A", "a"), Action::new("B", "b")])
            .row(vec![Action::new("Back", "back")]);
        assert_eq!(screen.tokens(), vec!["a", "b", "back"]);
        assert!(screen.has_token("back"));
        assert!(!screen.has_token("missing"));
    }
}
