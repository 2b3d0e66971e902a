//! Errors raised while applying a supervision directive.

use thiserror::Error;

use crate::util::Address;

/// Failure while a supervisor was applying a directive to a child.
///
/// These surface from [`crate::system::System`] when `Restart`/`Stop` fail to
/// execute, not from the strategy decision itself (a strategy function is
/// infallible by contract, §4.5).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SupervisorError {
    /// The child named by the directive is no longer registered.
    #[error("supervised actor {0} is no longer registered")]
    ChildGone(Address),

    /// Restart limit exceeded within the configured window; the directive
    /// is downgraded to `Stop` instead of being retried.
    #[error("restart limit exceeded for {address} ({restart_count} restarts)")]
    RestartLimitExceeded {
        /// Address of the actor whose restarts were throttled.
        address: Address,
        /// Number of restarts recorded within the window.
        restart_count: u32,
    },

    /// Escalation reached a root actor (no parent to escalate to).
    #[error("{0} has no parent to escalate to; terminating")]
    EscalationReachedRoot(Address),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let addr = Address::local("a1");
        let err = SupervisorError::ChildGone(addr.clone());
        assert!(err.to_string().contains("no longer registered"));

        let err = SupervisorError::RestartLimitExceeded {
            address: addr.clone(),
            restart_count: 5,
        };
        assert!(err.to_string().contains('5'));

        let err = SupervisorError::EscalationReachedRoot(addr);
        assert!(err.to_string().contains("no parent"));
    }
}
