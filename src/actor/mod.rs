//! Actors: isolated state driven one message at a time (spec C4 "Actor
//! runtime", C5 "Context").
//!
//! - [`Actor`] — the trait every actor implements: named behaviors plus
//!   lifecycle hooks (`pre_start`/`pre_restart`/`post_restart`/`post_stop`)
//!   around a required `receive`.
//! - [`Behaviors`] — the per-actor table of named handlers `become_`
//!   switches between.
//! - [`Context`] — an actor's view of its own address, parent, children,
//!   and the hosting [`crate::system::System`].
//! - [`ActorCell`] — the concrete runtime driving one actor instance;
//!   type-erased for the system's actor table as [`ActorHandle`].
//! - [`ActorLifecycle`]/[`LifecyclePhase`] — the 7-phase state machine
//!   (spec §4.3) tracked per actor.

pub mod behavior;
pub mod cell;
pub mod context;
pub mod error;
pub mod lifecycle;
pub mod traits;

pub use behavior::{Behaviors, DEFAULT_BEHAVIOR};
pub use cell::{ActorCell, ActorHandle, SYSTEM_FAILURE, SYSTEM_RESTART, SYSTEM_STOP};
pub use context::Context;
pub use error::ActorError;
pub use lifecycle::{ActorLifecycle, LifecyclePhase};
pub use traits::Actor;
