//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidRequest`] thrown when caller supplied data fails validation.
//! - [`NotFound`] thrown when an item is not found.
//! - [`Fatal`] thrown when the log and the in-memory state may have diverged,
//!   or when a balance leaves the range of [`MoneyCents`]. Once raised by a
//!   dispatch the [`Store`] refuses any further write.
//!
//!  [`InvalidRequest`]: EngineError::InvalidRequest
//!  [`NotFound`]: EngineError::NotFound
//!  [`Fatal`]: EngineError::Fatal
//!  [`Store`]: crate::Store
//!  [`MoneyCents`]: crate::MoneyCents
use thiserror::Error;

use crate::persistence::PersistenceError;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Fatal: {0}")]
    Fatal(String),
}

impl EngineError {
    /// Returns `true` for errors that poison the store.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Name of the error kind, as exposed to API clients.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "InvalidRequestError",
            Self::NotFound(_) => "NotFoundError",
            Self::Fatal(_) => "FatalError",
        }
    }
}

impl From<PersistenceError> for EngineError {
    fn from(value: PersistenceError) -> Self {
        Self::Fatal(value.to_string())
    }
}

pub(crate) fn not_found(label: &str, id: impl std::fmt::Display) -> EngineError {
    EngineError::NotFound(format!("no {label} with id: {id}"))
}

pub(crate) fn overflow(what: &str) -> EngineError {
    EngineError::Fatal(format!("{what} is out of range"))
}
