//! Dialog engine errors.
//!
//! Variants map one-to-one onto the recovery policies in
//! `DialogEngine::error_screen`: validation re-prompts in place, missing
//! records bail to the main menu, everything unexpected logs and resets.

use thiserror::Error;

use crate::db::RepoError;

#[derive(Debug, Error)]
pub enum DialogError {
    /// User input rejected; the message is shown verbatim as a re-prompt.
    #[error("{0}")]
    Validation(String),

    #[error("record not found")]
    NotFound,

    #[error("not allowed")]
    Unauthorized,

    #[error("product unavailable")]
    ProductUnavailable,

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DialogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type DialogResult<T> = Result<T, DialogError>;
