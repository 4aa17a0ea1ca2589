//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::catalog::CatalogError;
use quiz_core::model::{SessionId, SessionSummaryError};

/// Errors emitted by the session subsystem.
///
/// Every variant describes a rejected transition or lookup; a rejected
/// call never mutates session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("current card already has a guess")]
    AlreadyAnswered,

    #[error("current card has no guess yet")]
    NotAnswered,

    #[error("card must be flipped before advancing")]
    NotFlipped,

    #[error("session already completed")]
    Completed,

    #[error("session still in progress")]
    InProgress,

    #[error("unknown session: {0}")]
    UnknownSession(SessionId),

    #[error(transparent)]
    Summary(#[from] SessionSummaryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
