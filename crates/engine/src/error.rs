//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`NotFound`] thrown when an item does not exist for the calling user.
//! - [`Validation`] thrown when an input is malformed or out of range.
//!
//!  [`NotFound`]: EngineError::NotFound
//!  [`Validation`]: EngineError::Validation
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
///
/// `NotFound` deliberately covers both "the row does not exist" and "the row
/// belongs to another user", so callers cannot probe for foreign ids.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("atomic write failed: {0}")]
    AtomicWrite(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Reclassifies storage errors raised inside a composite write.
    ///
    /// The whole transaction rolls back, so the caller sees a single
    /// all-or-nothing failure instead of a bare storage error.
    pub(crate) fn into_atomic(self) -> Self {
        match self {
            Self::Database(err) => Self::AtomicWrite(err.to_string()),
            other => other,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::AtomicWrite(a), Self::AtomicWrite(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
