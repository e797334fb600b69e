// File: occurrence-forms/src/error.rs
// Purpose: Environment failures (broken markup, bad config). Invalid user input is not an error.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("element #{id} not found")]
    MissingElement { id: String },

    #[error("element #{id} is not a {expected}")]
    WrongElement { id: String, expected: &'static str },

    #[error("failed to attach {event} listener on #{id}: {reason}")]
    Listener {
        id: String,
        event: &'static str,
        reason: String,
    },

    #[error("no document available")]
    NoDocument,

    #[error("invalid form config: {0}")]
    InvalidConfig(String),
}

impl FormError {
    pub fn missing(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
