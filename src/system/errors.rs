//! System-level error types (spec §7).

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::util::Address;

/// System-level errors for actor lifecycle, routing, and remote operations.
#[derive(Error, Debug)]
pub enum SystemError {
    /// No actor is registered locally under this address; the message or
    /// operation becomes a dead letter instead (spec §5 "dead letters").
    #[error("actor not found: {0}")]
    ActorNotFound(Address),

    /// A named actor class was not registered for remote spawn-by-name
    /// (spec §4.7 `SpawnActor`).
    #[error("no actor class registered under name '{0}'")]
    UnknownActorClass(String),

    /// `pre_start` failed during spawn.
    #[error("actor failed to start: {0}")]
    SpawnFailed(String),

    /// The system is shutting down and refuses new operations.
    #[error("system shutdown in progress")]
    ShuttingDown,

    /// The target mailbox lane rejected the message (spec §7 `MailboxFull`).
    #[error("mailbox full for actor: {0}")]
    MailboxFull(Address),

    /// `SystemConfig` failed validation.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// `max_actors` would be exceeded by this spawn.
    #[error("actor limit exceeded: current {current}, max {max}")]
    ActorLimitExceeded { current: usize, max: usize },

    /// Graceful shutdown did not complete within the configured timeout.
    #[error("shutdown timeout exceeded after {0:?}")]
    ShutdownTimeout(Duration),

    /// A remote transport operation failed (spec §4.7, §7).
    #[error("remote error: {0}")]
    Remote(#[from] crate::remote::RemoteError),
}

impl SystemError {
    /// Transient: retrying later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, SystemError::MailboxFull(_))
    }

    /// Fatal: the system cannot continue operating.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SystemError::ShuttingDown | SystemError::ShutdownTimeout(_))
    }

    /// Not fatal.
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_not_found_display() {
        let err = SystemError::ActorNotFound(Address::local("worker-1"));
        assert!(err.to_string().contains("worker-1"));
    }

    #[test]
    fn actor_limit_exceeded_display() {
        let err = SystemError::ActorLimitExceeded { current: 100, max: 50 };
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn fatal_and_transient_classification() {
        let mailbox_err = SystemError::MailboxFull(Address::local("a"));
        assert!(mailbox_err.is_transient());
        assert!(!mailbox_err.is_fatal());

        let shutdown_err = SystemError::ShuttingDown;
        assert!(shutdown_err.is_fatal());
        assert!(!shutdown_err.is_recoverable());
    }
}
