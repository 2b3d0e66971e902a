//! Failures raised by actor behaviors and lifecycle hooks (spec §7).

use thiserror::Error;

use crate::message::Message;

/// A failure surfaced by an actor (spec §7 `HandlerFailure`/`LifecycleFailure`).
///
/// Carries the offending message, where applicable, so a supervisor's
/// monitoring hooks can log what caused the failure.
#[derive(Debug, Error)]
pub enum ActorError {
    /// `receive` returned an error for a user- or system-lane message.
    #[error("actor handler failed: {reason}")]
    Handler {
        /// Human-readable failure description.
        reason: String,
        /// The message being processed when the failure occurred.
        offending_message: Option<Message>,
    },
    /// `pre_start`, `pre_restart`, `post_restart`, or `post_stop` failed.
    #[error("actor lifecycle hook failed: {reason}")]
    Lifecycle {
        /// Human-readable failure description.
        reason: String,
    },
}

impl ActorError {
    /// Build a [`ActorError::Handler`] from any displayable error.
    pub fn handler(reason: impl std::fmt::Display, offending_message: Option<Message>) -> Self {
        Self::Handler {
            reason: reason.to_string(),
            offending_message,
        }
    }

    /// Build a [`ActorError::Lifecycle`] from any displayable error.
    pub fn lifecycle(reason: impl std::fmt::Display) -> Self {
        Self::Lifecycle {
            reason: reason.to_string(),
        }
    }

    /// The message in flight when the failure happened, if any.
    pub fn offending_message(&self) -> Option<&Message> {
        match self {
            Self::Handler {
                offending_message, ..
            } => offending_message.as_ref(),
            Self::Lifecycle { .. } => None,
        }
    }
}
