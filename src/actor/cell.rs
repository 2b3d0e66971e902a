//! `ActorCell`: the concrete runtime that owns one actor instance and drains
//! its mailbox (spec C4 "runtime", §4.1 step 2 "Invoker").
//!
//! `ActorCell<A>` is generic over the concrete actor type so behaviors (keyed
//! on `Self`) stay out of any vtable. The system's actor table instead holds
//! [`ActorHandle`] trait objects — the object-safe subset of operations a
//! supervisor or the system itself needs (stop/restart/resume, address,
//! mailbox, lifecycle phase) — which every `ActorCell<A>` implements.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;

use super::behavior::Behaviors;
use super::context::Context;
use super::error::ActorError;
use super::lifecycle::{ActorLifecycle, LifecyclePhase};
use super::traits::Actor;
use crate::dispatcher::Dispatcher;
use crate::mailbox::{InvokeError, Invoker, Mailbox};
use crate::message::Message;
use crate::system::System;
use crate::util::Address;

fn phase_to_u8(phase: LifecyclePhase) -> u8 {
    match phase {
        LifecyclePhase::Created => 0,
        LifecyclePhase::Starting => 1,
        LifecyclePhase::Running => 2,
        LifecyclePhase::Restarting => 3,
        LifecyclePhase::Stopping => 4,
        LifecyclePhase::Stopped => 5,
        LifecyclePhase::Failed => 6,
    }
}

/// Fill in `"default"` with a handler that forwards to `Actor::receive` when
/// `initialize_behaviors` left it unregistered, so an actor that never calls
/// `become` can implement `receive` alone instead of also wiring a trivial
/// default behavior by hand (spec §4.3 "receive delivers to the current
/// behavior").
fn ensure_default_behavior<A: Actor>(behaviors: &mut Behaviors<A>) {
    if !behaviors.contains(super::behavior::DEFAULT_BEHAVIOR) {
        behaviors.add(super::behavior::DEFAULT_BEHAVIOR, |actor: &mut A, message, ctx| {
            Box::pin(async move { actor.receive(message, ctx).await })
        });
    }
}

fn phase_from_u8(value: u8) -> LifecyclePhase {
    match value {
        0 => LifecyclePhase::Created,
        1 => LifecyclePhase::Starting,
        2 => LifecyclePhase::Running,
        3 => LifecyclePhase::Restarting,
        4 => LifecyclePhase::Stopping,
        5 => LifecyclePhase::Stopped,
        _ => LifecyclePhase::Failed,
    }
}

/// Reserved system-lane message type that orders an actor to stop (spec §4.3).
pub const SYSTEM_STOP: &str = "$system.stop";
/// Reserved system-lane message type that orders an actor to restart.
pub const SYSTEM_RESTART: &str = "$system.restart";
/// Reserved system-lane message type carrying an escalated child failure
/// (spec §4.5 Escalate directive).
pub const SYSTEM_FAILURE: &str = "$system.failure";

struct CellState<A: Actor> {
    actor: A,
    behaviors: Behaviors<A>,
    lifecycle: ActorLifecycle,
    context: Context,
}

/// The object-safe control surface the system and supervisors use, with the
/// concrete actor type erased (spec §4.5 "apply directive").
#[async_trait]
pub trait ActorHandle: Send + Sync {
    /// This actor's address.
    fn address(&self) -> &Address;

    /// The mailbox this actor drains from.
    fn mailbox(&self) -> Arc<dyn Mailbox>;

    /// A cheap, lock-free read of the current lifecycle phase.
    fn lifecycle_phase(&self) -> LifecyclePhase;

    /// Run `pre_start` and, on success, open the mailbox for draining.
    /// Returns `false` if `pre_start` failed.
    async fn start(&self) -> bool;

    /// Resume directive (spec §4.5): reopen the mailbox, no hooks run.
    async fn resume(&self);

    /// Restart directive: `pre_restart` on the old instance, a fresh
    /// instance via the stored producer, `pre_start`, `post_restart`, then
    /// the mailbox reopens.
    async fn restart(&self, reason: ActorError);

    /// Stop directive or user-requested shutdown: `post_stop`, then the
    /// mailbox is suspended for good.
    async fn stop(&self);
}

/// Owns one actor instance, its behavior table, lifecycle tracker, and
/// [`Context`]; implements both [`Invoker`] (what the mailbox drains into)
/// and [`ActorHandle`] (what the system controls it through).
pub struct ActorCell<A: Actor> {
    address: Address,
    mailbox: Arc<dyn Mailbox>,
    producer: Arc<dyn Fn() -> A + Send + Sync>,
    initial_behavior: String,
    phase: AtomicU8,
    state: AsyncMutex<CellState<A>>,
}

impl<A: Actor> ActorCell<A> {
    /// Construct a cell, wire it as the mailbox's invoker, and return it as
    /// an [`ActorHandle`]. Does not start the actor — call `start()`.
    pub fn spawn<F>(
        producer: F,
        address: Address,
        parent: Option<Address>,
        system: System,
        mailbox: Arc<dyn Mailbox>,
        dispatcher: Arc<dyn Dispatcher>,
        initial_behavior: &str,
    ) -> Arc<dyn ActorHandle>
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        let mut actor = producer();
        let mut behaviors = Behaviors::new();
        actor.initialize_behaviors(&mut behaviors);
        ensure_default_behavior(&mut behaviors);
        if initial_behavior != super::behavior::DEFAULT_BEHAVIOR {
            behaviors.become_(initial_behavior);
        }
        let context = Context::new(address.clone(), parent, system);

        let cell = Arc::new(ActorCell {
            address,
            mailbox: mailbox.clone(),
            producer: Arc::new(producer),
            initial_behavior: initial_behavior.to_string(),
            phase: AtomicU8::new(phase_to_u8(LifecyclePhase::Created)),
            state: AsyncMutex::new(CellState {
                actor,
                behaviors,
                lifecycle: ActorLifecycle::new(),
                context,
            }),
        });
        mailbox.bind(cell.clone(), dispatcher);
        cell
    }

    fn set_phase(&self, lifecycle: &mut ActorLifecycle, phase: LifecyclePhase) {
        lifecycle.transition_to(phase);
        self.phase.store(phase_to_u8(phase), Ordering::Release);
    }

    async fn dispatch(&self, message: Message) -> Result<(), ActorError> {
        let mut state = self.state.lock().await;
        let handler = state
            .behaviors
            .current_handler()
            .ok_or_else(|| ActorError::handler(format!("no behavior named '{}'", state.behaviors.current()), Some(message.clone())))?;
        let (result, pending) = {
            let CellState { actor, context, .. } = &mut *state;
            let result = handler(actor, message, context).await;
            (result, context.take_pending_become())
        };
        if let Some(next) = pending {
            state.behaviors.become_(next);
        }
        result
    }
}

#[async_trait]
impl<A: Actor> Invoker for ActorCell<A> {
    async fn invoke_system(&self, message: Message) -> Result<(), InvokeError> {
        match message.message_type() {
            SYSTEM_STOP => {
                self.stop().await;
                Ok(())
            }
            SYSTEM_RESTART => {
                let reason = ActorError::lifecycle("restart requested");
                self.restart(reason).await;
                Ok(())
            }
            // An escalated child failure (spec §4.5 Escalate) arrives here
            // as `$system.failure` too, but it is not special-cased: it
            // falls through to `invoke_user` like any other message, so it
            // reaches this actor's current behavior (`receive` by default)
            // instead of being silently reinterpreted as this actor's own
            // failure. An application that wants to react to an escalated
            // child failure matches on `SYSTEM_FAILURE` inside `receive`.
            _ => self.invoke_user(message).await,
        }
    }

    async fn invoke_user(&self, message: Message) -> Result<(), InvokeError> {
        match self.dispatch(message).await {
            Ok(()) => Ok(()),
            Err(error) => {
                // Seal before handing off to the supervisor (spec §4.1 step
                // 2): a `Resume`/`Restart` directive reopens the mailbox as
                // its last act, and that reopen must be the final mutation
                // of `sealed`/`suspended` — not undone afterwards by the
                // drain loop's own seal-on-error fallback. Reusing the
                // error-sentinel path keeps a single place that knows how
                // to seal a mailbox.
                let _ = self.mailbox.post_system(Message::error_sentinel());
                let system = {
                    let state = self.state.lock().await;
                    state.context.system().clone()
                };
                system.report_failure(self.address.clone(), error).await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl<A: Actor> ActorHandle for ActorCell<A> {
    fn address(&self) -> &Address {
        &self.address
    }

    fn mailbox(&self) -> Arc<dyn Mailbox> {
        self.mailbox.clone()
    }

    fn lifecycle_phase(&self) -> LifecyclePhase {
        phase_from_u8(self.phase.load(Ordering::Acquire))
    }

    async fn start(&self) -> bool {
        let mut state = self.state.lock().await;
        self.set_phase(&mut state.lifecycle, LifecyclePhase::Starting);
        let CellState { actor, context, .. } = &mut *state;
        match actor.pre_start(context).await {
            Ok(()) => {
                self.set_phase(&mut state.lifecycle, LifecyclePhase::Running);
                self.mailbox.start();
                true
            }
            Err(_) => {
                self.set_phase(&mut state.lifecycle, LifecyclePhase::Failed);
                false
            }
        }
    }

    async fn resume(&self) {
        self.mailbox.reopen();
    }

    async fn restart(&self, reason: ActorError) {
        let mut state = self.state.lock().await;
        self.set_phase(&mut state.lifecycle, LifecyclePhase::Restarting);
        {
            let CellState { actor, context, .. } = &mut *state;
            let _ = actor.pre_restart(context, &reason).await;
        }

        let mut fresh = (self.producer)();
        let mut behaviors = Behaviors::new();
        fresh.initialize_behaviors(&mut behaviors);
        ensure_default_behavior(&mut behaviors);
        if self.initial_behavior != super::behavior::DEFAULT_BEHAVIOR {
            behaviors.become_(self.initial_behavior.clone());
        }
        state.actor = fresh;
        state.behaviors = behaviors;

        let CellState { actor, context, .. } = &mut *state;
        if actor.pre_start(context).await.is_err() {
            self.set_phase(&mut state.lifecycle, LifecyclePhase::Failed);
            return;
        }
        let CellState { actor, context, .. } = &mut *state;
        let _ = actor.post_restart(context, &reason).await;
        self.set_phase(&mut state.lifecycle, LifecyclePhase::Running);
        self.mailbox.reopen();
    }

    async fn stop(&self) {
        let mut state = self.state.lock().await;
        self.set_phase(&mut state.lifecycle, LifecyclePhase::Stopping);
        let CellState { actor, context, .. } = &mut *state;
        let _ = actor.post_stop(context).await;
        self.set_phase(&mut state.lifecycle, LifecyclePhase::Stopped);
        self.mailbox.suspend();
    }
}
