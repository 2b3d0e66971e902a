//! [`Router`]: an actor whose only job is choosing where a message goes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::actor::{Actor, ActorError, Behaviors, Context, DEFAULT_BEHAVIOR};
use crate::message::Message;
use crate::system::Props;
use crate::util::Address;

/// Control message type that invokes the router's routee-factory and spawns
/// the result as a new child (spec §4.6 "add-routee").
pub const ADD_ROUTEE: &str = "router.add_routee";
/// Control message type that detaches a routee, named by address in the
/// payload's `"address"` field, without stopping it (spec §4.6 "remove-routee").
pub const REMOVE_ROUTEE: &str = "router.remove_routee";

/// How a [`Router`] picks routees for an incoming message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterKind {
    /// Forward to exactly one routee, cycling through the set in order.
    RoundRobin,
    /// Forward to every routee, independently.
    Broadcast,
}

type RouteeFactory = dyn Fn() -> Props + Send + Sync;

/// Forwards received messages to a set of routees instead of handling them
/// itself (spec C8, §4.6).
///
/// Built via [`Router::round_robin`]/[`Router::broadcast`] and wrapped in
/// [`Props`] with [`Props::from_producer`] like any other actor; the router
/// holds no state a restart can't rebuild from its initial routee list, so
/// it needs no special supervision treatment.
pub struct Router {
    kind: RouterKind,
    routees: Vec<Address>,
    next: AtomicUsize,
    factory: Option<Arc<RouteeFactory>>,
}

impl Router {
    /// A round-robin router over an initial routee set (may be empty).
    pub fn round_robin(routees: Vec<Address>) -> Self {
        Self {
            kind: RouterKind::RoundRobin,
            routees,
            next: AtomicUsize::new(0),
            factory: None,
        }
    }

    /// A broadcast router over an initial routee set (may be empty).
    pub fn broadcast(routees: Vec<Address>) -> Self {
        Self {
            kind: RouterKind::Broadcast,
            routees,
            next: AtomicUsize::new(0),
            factory: None,
        }
    }

    /// Attach a routee-factory, invoked each time an [`ADD_ROUTEE`] control
    /// message arrives.
    pub fn with_routee_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Props + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// The routees currently in the forwarding set, in order.
    pub fn routees(&self) -> &[Address] {
        &self.routees
    }

    async fn handle(&mut self, message: Message, ctx: &mut Context) -> Result<(), ActorError> {
        match message.message_type() {
            ADD_ROUTEE => self.add_routee(ctx).await,
            REMOVE_ROUTEE => {
                self.remove_routee(message.payload());
                Ok(())
            }
            _ => self.forward(message, ctx).await,
        }
    }

    async fn add_routee(&mut self, ctx: &mut Context) -> Result<(), ActorError> {
        let Some(factory) = self.factory.clone() else {
            return Err(ActorError::handler("router has no routee-factory configured", None));
        };
        let props = factory();
        let name = format!("routee-{}", self.routees.len());
        let address = ctx
            .spawn(name, props)
            .await
            .map_err(|e| ActorError::handler(format!("failed to spawn routee: {e}"), None))?;
        self.routees.push(address);
        Ok(())
    }

    fn remove_routee(&mut self, payload: &Value) {
        let Some(raw) = payload.get("address").and_then(|v| v.as_str()) else {
            return;
        };
        let target = Address::parse(raw);
        self.routees.retain(|addr| addr != &target);
    }

    async fn forward(&mut self, message: Message, ctx: &mut Context) -> Result<(), ActorError> {
        if self.routees.is_empty() {
            return Ok(());
        }
        match self.kind {
            RouterKind::RoundRobin => {
                let index = self.next.fetch_add(1, Ordering::Relaxed) % self.routees.len();
                let target = self.routees[index].clone();
                ctx.send(&target, message)
                    .await
                    .map_err(|e| ActorError::handler(format!("forward failed: {e}"), None))?;
            }
            RouterKind::Broadcast => {
                for target in self.routees.clone() {
                    ctx.send(&target, message.clone())
                        .await
                        .map_err(|e| ActorError::handler(format!("forward failed: {e}"), None))?;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Actor for Router {
    fn initialize_behaviors(&self, behaviors: &mut Behaviors<Self>) {
        behaviors.add(DEFAULT_BEHAVIOR, |actor: &mut Router, message, ctx| {
            Box::pin(async move { actor.handle(message, ctx).await })
        });
    }

    async fn receive(&mut self, message: Message, ctx: &mut Context) -> Result<(), ActorError> {
        self.handle(message, ctx).await
    }
}
