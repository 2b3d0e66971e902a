//! Built-in supervision strategies.

use parking_lot::Mutex;

use super::backoff::RestartBackoff;
use super::traits::{Directive, StrategyContext, SupervisionStrategy};
use crate::actor::ActorError;

/// Always escalates to the parent. This is the Props default (§6): a fresh
/// actor with no explicit strategy defers the decision upward until a root
/// actor terminates on failure (§4.5).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEscalate;

impl SupervisionStrategy for AlwaysEscalate {
    fn decide(&self, _ctx: &StrategyContext, _error: &ActorError) -> Directive {
        Directive::Escalate
    }
}

/// Always resumes; the failing message is dropped and the mailbox keeps
/// draining. Suited to handlers whose failures are expected and recoverable
/// by the next message (e.g. a parse error on one malformed input).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysResume;

impl SupervisionStrategy for AlwaysResume {
    fn decide(&self, _ctx: &StrategyContext, _error: &ActorError) -> Directive {
        Directive::Resume
    }
}

/// Always stops the failed child outright, with no restart attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysStop;

impl SupervisionStrategy for AlwaysStop {
    fn decide(&self, _ctx: &StrategyContext, _error: &ActorError) -> Directive {
        Directive::Stop
    }
}

/// Always restarts the failed child, with no restart-rate limiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRestart;

impl SupervisionStrategy for AlwaysRestart {
    fn decide(&self, _ctx: &StrategyContext, _error: &ActorError) -> Directive {
        Directive::Restart
    }
}

/// Restarts the failed child, downgrading to `Stop` once the restart rate
/// exceeds the configured backoff window (§3's restart-storm carry-over).
///
/// Unlike the other strategies, this one carries mutable state: each restart
/// observed is recorded against the shared [`RestartBackoff`] window. The
/// caller is expected to actually wait out `calculate_delay()` before
/// invoking `System::restart` if it wants the backoff to have an effect on
/// timing; `decide` itself only governs whether a restart is still allowed.
#[derive(Debug)]
pub struct RestartWithBackoff {
    backoff: Mutex<RestartBackoff>,
}

impl RestartWithBackoff {
    /// Builds a strategy around an existing backoff tracker.
    pub fn new(backoff: RestartBackoff) -> Self {
        Self {
            backoff: Mutex::new(backoff),
        }
    }

    /// Returns the delay to wait before the next restart, if any was
    /// recorded by a prior `decide` call.
    pub fn next_delay(&self) -> std::time::Duration {
        self.backoff.lock().calculate_delay()
    }
}

impl SupervisionStrategy for RestartWithBackoff {
    fn decide(&self, _ctx: &StrategyContext, _error: &ActorError) -> Directive {
        let mut backoff = self.backoff.lock();
        if backoff.is_limit_exceeded() {
            return Directive::Stop;
        }
        backoff.record_restart();
        Directive::Restart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Address;
    use std::time::Duration;

    fn ctx() -> StrategyContext {
        StrategyContext {
            supervisor: Address::local("parent"),
            child: Address::local("child"),
            restart_count: 0,
        }
    }

    fn err() -> ActorError {
        ActorError::handler("boom", None)
    }

    #[test]
    fn always_escalate_escalates() {
        assert_eq!(AlwaysEscalate.decide(&ctx(), &err()), Directive::Escalate);
    }

    #[test]
    fn always_resume_resumes() {
        assert_eq!(AlwaysResume.decide(&ctx(), &err()), Directive::Resume);
    }

    #[test]
    fn always_stop_stops() {
        assert_eq!(AlwaysStop.decide(&ctx(), &err()), Directive::Stop);
    }

    #[test]
    fn always_restart_restarts() {
        assert_eq!(AlwaysRestart.decide(&ctx(), &err()), Directive::Restart);
    }

    #[test]
    fn restart_with_backoff_downgrades_to_stop_past_limit() {
        let strategy = RestartWithBackoff::new(RestartBackoff::new(2, Duration::from_secs(60)));
        assert_eq!(strategy.decide(&ctx(), &err()), Directive::Restart);
        assert_eq!(strategy.decide(&ctx(), &err()), Directive::Restart);
        assert_eq!(strategy.decide(&ctx(), &err()), Directive::Stop);
    }
}
