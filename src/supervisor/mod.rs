//! Supervision (spec C7, §4.5): a pure `decide` function, applied by
//! [`crate::system::System`] against the failing actor's parent strategy.
//!
//! Unlike a BEAM-style supervision tree with its own node types, supervision
//! here is a property of each actor's [`crate::system::Props`]
//! (`supervisor_strategy`) rather than a separate tree structure — the
//! system's actor table already records parent/child relationships (spec §9
//! "two lookups ... rather than back-pointers"), so a [`SupervisionStrategy`]
//! only needs to answer one question when a failure is reported: what
//! [`Directive`] applies?
//!
//! - [`Directive`] — the four possible outcomes: Resume, Restart, Stop, Escalate.
//! - [`SupervisionStrategy`] — the trait a strategy implements.
//! - [`AlwaysEscalate`] (the Props default), [`AlwaysResume`], [`AlwaysStop`],
//!   [`AlwaysRestart`], and [`RestartWithBackoff`] (restart-storm protection
//!   built on [`RestartBackoff`]).
//! - [`spawn_health_monitor`] — the optional periodic sweep layered on top of
//!   the failure-driven path.

pub mod backoff;
pub mod error;
pub mod health_monitor;
pub mod strategy;
pub mod traits;

pub use backoff::RestartBackoff;
pub use error::SupervisorError;
pub use health_monitor::spawn_health_monitor;
pub use strategy::{AlwaysEscalate, AlwaysResume, AlwaysRestart, AlwaysStop, RestartWithBackoff};
pub use traits::{Directive, StrategyContext, SupervisionStrategy};
