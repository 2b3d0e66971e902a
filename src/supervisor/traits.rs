//! The supervision strategy contract (§4.5).
//!
//! A strategy is a pure function of `(context, failed child, error) -> Directive`.
//! Strategies are value-like and may be shared across many supervised actors —
//! mirrored here as `Send + Sync` trait objects rather than a closure type so a
//! strategy can carry configuration (e.g. a restart-backoff window) without
//! becoming generic over every supervised actor type.

use crate::actor::ActorError;
use crate::util::Address;

/// Outcome of consulting a supervision strategy, applied immediately by the
/// caller (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Do nothing; the mailbox continues with the next message.
    Resume,
    /// Call `System::restart(child, error)`.
    Restart,
    /// Call `System::stop(child)`.
    Stop,
    /// Forward a synthetic `$system.failure` message to the parent.
    Escalate,
}

/// Everything a strategy needs to decide, besides the error itself.
#[derive(Debug, Clone)]
pub struct StrategyContext {
    /// The supervisor's own address (the failed actor's parent).
    pub supervisor: Address,
    /// The child that reported failure.
    pub child: Address,
    /// Restarts already recorded for this child within the strategy's window.
    pub restart_count: u32,
}

/// Pure decision function consulted on child failure.
///
/// Implementations MUST NOT block or perform IO; `decide` is called from
/// inside the failure-handling path and its result is applied synchronously.
pub trait SupervisionStrategy: Send + Sync + std::fmt::Debug {
    /// Decide what to do about a child's failure.
    fn decide(&self, ctx: &StrategyContext, error: &ActorError) -> Directive;
}
