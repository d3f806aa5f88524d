//! Error taxonomy for the mapping workstation.
//!
//! Three classes of failure exist: transport failures from external
//! collaborators, validation failures caught before any request is
//! dispatched, and illegal state-machine usage. User cancellation is
//! deliberately not represented here; callers model it as a benign
//! outcome, never as an error.

use crate::state::Step;

#[derive(Debug, thiserror::Error)]
pub enum SmapError {
    /// A collaborator was unreachable or returned a non-success status.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Input was rejected before any request was dispatched.
    #[error("validation failure: {0}")]
    Validation(String),

    /// An operation was invoked in a step where it is not legal.
    #[error("operation '{operation}' is not valid in step {step}")]
    InvalidStep { operation: &'static str, step: Step },

    /// A step-transition call is already in flight.
    #[error("operation '{operation}' rejected: a collaborator call is in flight")]
    Busy { operation: &'static str },

    /// A record index addressed a position outside the mapped sequence.
    #[error("record index {index} out of range (have {len} records)")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SmapError>;
