//! The `Actor` trait: the unit of isolated state and sequential message
//! processing (spec C4, §4.3).

use async_trait::async_trait;

use super::behavior::Behaviors;
use super::context::Context;
use super::error::ActorError;
use crate::message::Message;

/// An actor: isolated state, driven one message at a time by an
/// [`crate::actor::cell::ActorCell`] (spec §4.3).
///
/// `Self: Sized` on `initialize_behaviors` means `Actor` is never used as
/// `dyn Actor` — each concrete actor type is driven by its own
/// `ActorCell<Self>`, and the runtime erases *that* behind
/// [`crate::actor::cell::ActorHandle`] instead. This keeps behavior tables
/// (which are keyed on the concrete `Self` type) out of a vtable entirely.
#[async_trait]
pub trait Actor: Send + 'static {
    /// Register this actor's named behaviors. Called once, before
    /// `pre_start`. Registering `"default"` is optional: `ActorCell` fills
    /// it in with a handler that forwards to `receive` when this leaves it
    /// unregistered, so actors that don't use `become` can implement
    /// `receive` alone.
    fn initialize_behaviors(&self, behaviors: &mut Behaviors<Self>)
    where
        Self: Sized;

    /// Runs before the actor accepts its first message.
    async fn pre_start(&mut self, _ctx: &mut Context) -> Result<(), ActorError> {
        Ok(())
    }

    /// Runs on a supervisor-ordered restart, before the old instance is
    /// discarded. `reason` is the failure that triggered the restart.
    async fn pre_restart(&mut self, _ctx: &mut Context, _reason: &ActorError) -> Result<(), ActorError> {
        Ok(())
    }

    /// Runs on a supervisor-ordered restart, after the fresh instance's
    /// `pre_start` but before it resumes accepting messages.
    async fn post_restart(&mut self, _ctx: &mut Context, _reason: &ActorError) -> Result<(), ActorError> {
        Ok(())
    }

    /// Runs once, as the actor is stopping, whether the stop was requested
    /// or a supervisor's final directive.
    async fn post_stop(&mut self, _ctx: &mut Context) -> Result<(), ActorError> {
        Ok(())
    }

    /// Handle one message under the actor's current behavior.
    ///
    /// An `Err` here is a `HandlerFailure` (spec §7): the mailbox that
    /// delivered `message` seals itself, and the failure is reported to
    /// whichever supervisor strategy governs this actor (spec §4.5).
    async fn receive(&mut self, message: Message, ctx: &mut Context) -> Result<(), ActorError>;
}
