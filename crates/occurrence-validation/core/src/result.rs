//! Outcome of a single rule run

use serde::Serialize;

/// Validity flag plus the message to display on failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<&'static str>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: &'static str) -> Self {
        Self {
            valid: false,
            message: Some(message),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl From<Result<(), &'static str>> for ValidationResult {
    fn from(result: Result<(), &'static str>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(message) => Self::fail(message),
        }
    }
}
