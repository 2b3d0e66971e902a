//! `Context`: an actor's view of its own address, family, and the system
//! that hosts it (spec C5, §4.3 "Context").

use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::message::Message;
use crate::system::{Props, System, SystemError};
use crate::util::Address;

/// Per-actor handle passed to every lifecycle hook and to `receive`.
///
/// Owned exclusively by the `ActorCell` driving the actor; never shared
/// across tasks, so it carries no internal synchronization beyond the
/// opaque state cell (spec §4.3 "not thread-safe against concurrent access
/// — safe because it only runs inside the actor's own serialized
/// execution").
pub struct Context {
    self_addr: Address,
    parent: Option<Address>,
    children: Vec<(String, Address)>,
    system: System,
    state: Mutex<Value>,
    pending_become: Mutex<Option<String>>,
}

impl Context {
    /// Construct a context for a freshly spawned actor. Crate-internal:
    /// only `ActorCell` builds one.
    pub(crate) fn new(self_addr: Address, parent: Option<Address>, system: System) -> Self {
        Self {
            self_addr,
            parent,
            children: Vec::new(),
            system,
            pending_become: Mutex::new(None),
            state: Mutex::new(Value::Null),
        }
    }

    /// This actor's own address.
    pub fn address(&self) -> &Address {
        &self.self_addr
    }

    /// The address of the actor that spawned this one, if any (spec §6
    /// "root actors have no parent").
    pub fn parent(&self) -> Option<&Address> {
        self.parent.as_ref()
    }

    /// Children spawned by this actor, in spawn order (spec §4.3 "ordered
    /// map id -> Address").
    pub fn children(&self) -> &[(String, Address)] {
        &self.children
    }

    /// Look up a child by the name it was spawned with.
    pub fn child(&self, name: &str) -> Option<&Address> {
        self.children.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    /// Send `message` to `target`. Local delivery enqueues synchronously;
    /// a remote target goes over the transport client (spec §4.7).
    pub async fn send(&self, target: &Address, message: Message) -> Result<(), SystemError> {
        self.system.send(target, message).await
    }

    /// Spawn a new actor as a named child of this one.
    pub async fn spawn(&mut self, name: impl Into<String>, props: Props) -> Result<Address, SystemError> {
        let name = name.into();
        let child = self.system.spawn_child(props, self.self_addr.clone()).await?;
        self.children.push((name, child.clone()));
        Ok(child)
    }

    /// Stop a specific child.
    pub async fn stop_child(&mut self, name: &str) -> Result<(), SystemError> {
        if let Some(pos) = self.children.iter().position(|(n, _)| n == name) {
            let (_, addr) = self.children.remove(pos);
            self.system.stop(&addr).await?;
        }
        Ok(())
    }

    /// Stop every child of this actor (spec §4.3 "stopAll").
    pub async fn stop_all(&mut self) -> Result<(), SystemError> {
        for (_, addr) in self.children.drain(..) {
            self.system.stop(&addr).await?;
        }
        Ok(())
    }

    /// A handle to the system hosting this actor, for advanced callers
    /// (e.g. the router) that need system-level operations beyond send/spawn/stop.
    pub fn system(&self) -> &System {
        &self.system
    }

    /// Read the opaque per-actor state cell (spec §4.3 `getState`).
    ///
    /// Auxiliary to the actor's own struct fields, which are the idiomatic
    /// place for typed state in Rust; this exists for callers (like
    /// [`crate::router::Router`]) that want to stash data without a
    /// dedicated field.
    pub fn get_state<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.state.lock().clone()).ok()
    }

    /// Write the opaque per-actor state cell (spec §4.3 `setState`).
    pub fn set_state<T: Serialize>(&self, value: &T) {
        if let Ok(encoded) = serde_json::to_value(value) {
            *self.state.lock() = encoded;
        }
    }

    /// Swap the behavior that will handle the *next* message (spec §4.3
    /// "become MUST be cheap and must not lose queued messages: queued
    /// messages are processed by whichever behavior is current at the
    /// moment each message is dequeued").
    ///
    /// A handler only ever sees `&mut Context`, not the `Behaviors` table
    /// that owns it, so this just records the request; `ActorCell::dispatch`
    /// applies it once the current handler returns, before the mailbox is
    /// allowed to hand over the next message.
    pub fn become_(&self, name: impl Into<String>) {
        *self.pending_become.lock() = Some(name.into());
    }

    /// Take (and clear) a pending `become_` request, if one was made during
    /// the last dispatch. Crate-internal: only `ActorCell` applies it.
    pub(crate) fn take_pending_become(&self) -> Option<String> {
        self.pending_become.lock().take()
    }
}
