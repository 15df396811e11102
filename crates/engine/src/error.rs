//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] thrown when user input cannot be read as money.
//! - [`UnknownMember`] thrown when an operation names a member outside the group.
//! - [`Invalid`] thrown when the allocation cannot be submitted, see [`SplitIssue`].
//! - [`SubmissionInFlight`] thrown while a create/update request is outstanding.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`UnknownMember`]: EngineError::UnknownMember
//!  [`Invalid`]: EngineError::Invalid
//!  [`SubmissionInFlight`]: EngineError::SubmissionInFlight
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("member {0} is not part of the group")]
    UnknownMember(i64),
    #[error("{0}")]
    Invalid(#[from] SplitIssue),
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    #[error("the allocation session is closed")]
    SessionClosed,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Why the current allocation cannot be submitted.
///
/// The `Display` text is the message shown next to the form.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitIssue {
    #[error("Manual splits exceed the total amount.")]
    ManualExceedsTotal,
    #[error("Select at least one participant.")]
    NoParticipants,
    #[error("Splits must add up to the total amount.")]
    Unbalanced,
    #[error("Description is required.")]
    MissingDescription,
    #[error("Enter a valid amount.")]
    InvalidTotal,
}

/// Failures reported by the expense create/update collaborator.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Expense not found")]
    NotFound,
    #[error("{0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
}
