//! Named behaviors: an actor's current message handler, swappable at runtime
//! via `become_` (spec §4.3 "Behaviors").
//!
//! A behavior is a function from `(&mut Actor, Message, &mut Context)` to a
//! result. Actors register one or more under a name — `"default"` must
//! always exist — and may switch which one handles the next message by
//! calling [`crate::actor::Context::become_`] from inside a handler; a
//! handler is only ever given `&mut Context`, not this table, so the switch
//! is recorded on the context and [`Behaviors::become_`] is what
//! `ActorCell::dispatch` calls to actually apply it once the handler
//! returns. This mirrors the spec's `addBehavior`/`become` helpers as a
//! small per-actor function table (spec §9 design note).

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::context::Context;
use super::error::ActorError;
use super::traits::Actor;
use crate::message::Message;

/// The name every actor starts in.
pub const DEFAULT_BEHAVIOR: &str = "default";

/// A boxed future returned by a behavior handler.
pub type BehaviorFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ActorError>> + Send + 'a>>;

/// A single named handler: `Fn(&mut A, Message, &mut Context) -> BehaviorFuture`.
pub(crate) type HandlerFn<A> = dyn for<'a> Fn(&'a mut A, Message, &'a mut Context) -> BehaviorFuture<'a> + Send + Sync;

/// Per-actor table of named behaviors plus which one is current.
///
/// Concrete `Actor` implementations embed a `Behaviors<Self>` and populate it
/// from `initialize_behaviors`. Not `Send`-shared: owned exclusively by the
/// `ActorCell` driving the actor.
pub struct Behaviors<A: Actor + ?Sized> {
    current: String,
    handlers: HashMap<String, Arc<HandlerFn<A>>>,
}

impl<A: Actor> Behaviors<A> {
    /// An empty table with no current behavior set yet. Callers must `add`
    /// at least `"default"` before the actor starts receiving messages.
    pub fn new() -> Self {
        Self {
            current: DEFAULT_BEHAVIOR.to_string(),
            handlers: HashMap::new(),
        }
    }

    /// Register a named handler.
    pub fn add<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: for<'a> Fn(&'a mut A, Message, &'a mut Context) -> BehaviorFuture<'a> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    /// Switch the current behavior. Does not validate that `name` is
    /// registered yet — registration order is up to the actor — but
    /// dispatch will fail with [`ActorError::UnknownBehavior`]-equivalent
    /// if it never is.
    pub fn become_(&mut self, name: impl Into<String>) {
        self.current = name.into();
    }

    /// The name of the currently active behavior.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Look up the handler for the current behavior, if registered.
    pub fn current_handler(&self) -> Option<Arc<HandlerFn<A>>> {
        self.handlers.get(&self.current).cloned()
    }

    /// Whether a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

impl<A: Actor> Default for Behaviors<A> {
    fn default() -> Self {
        Self::new()
    }
}
