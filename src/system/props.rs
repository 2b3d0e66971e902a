//! `Props`: the immutable recipe `System::spawn` uses to instantiate an actor
//! (spec §4.4 "instantiate the actor ... from a class constructor or a
//! producer callback", §6 Props table).
//!
//! `Context::spawn` and `System::spawn` take a `Props` value with no generic
//! type parameter on the call site, yet must eventually construct a concrete
//! `ActorCell<A>`. `Props` erases `A` at construction time by capturing a
//! factory closure that calls `ActorCell::<A>::spawn` internally — the same
//! "keep behaviors out of the vtable, erase only the control surface"
//! approach `actor::cell::ActorHandle` already uses.

use std::sync::Arc;

use crate::actor::{Actor, ActorCell, ActorHandle};
use crate::dispatcher::Dispatcher;
use crate::mailbox::{Mailbox, MailboxKind};
use crate::supervisor::{AlwaysEscalate, SupervisionStrategy};
use crate::util::{Address, NodeAddress};

use super::System;

type CellFactory =
    dyn Fn(Address, Option<Address>, System, Arc<dyn Mailbox>, Arc<dyn Dispatcher>, &str) -> Arc<dyn ActorHandle>
        + Send
        + Sync;

/// How to instantiate the actor: a local producer closure, or a named class
/// looked up in the system's actor-class registry (used for remote spawn by
/// name, spec §4.7 `SpawnActor`).
pub enum ActorSource {
    /// Build directly from a factory closure captured at `Props` construction.
    Producer(Arc<CellFactory>),
    /// Look up a registered class by name (spec §6 `actor_class`).
    Class(String),
}

impl std::fmt::Debug for ActorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorSource::Producer(_) => write!(f, "ActorSource::Producer(..)"),
            ActorSource::Class(name) => write!(f, "ActorSource::Class({name:?})"),
        }
    }
}

/// The spawn recipe passed to `System::spawn` / `Context::spawn` (spec §6
/// "Props options").
#[derive(Debug)]
pub struct Props {
    pub(crate) source: ActorSource,
    pub(crate) mailbox_kind: Option<MailboxKind>,
    pub(crate) dispatcher: Option<Arc<dyn Dispatcher>>,
    pub(crate) supervisor_strategy: Arc<dyn SupervisionStrategy>,
    pub(crate) node: Option<NodeAddress>,
    pub(crate) initial_behavior: String,
}

impl Props {
    /// Build `Props` from a local producer closure. Exactly one of
    /// `from_producer`/`from_class` is used per spawn (spec §6).
    pub fn from_producer<A, F>(producer: F) -> Self
    where
        A: Actor + 'static,
        F: Fn() -> A + Send + Sync + 'static,
    {
        let producer = Arc::new(producer);
        let factory: Arc<CellFactory> = Arc::new(move |address, parent, system, mailbox, dispatcher, behavior| {
            let producer = producer.clone();
            ActorCell::<A>::spawn(
                move || producer(),
                address,
                parent,
                system,
                mailbox,
                dispatcher,
                behavior,
            )
        });

        Self {
            source: ActorSource::Producer(factory),
            mailbox_kind: None,
            dispatcher: None,
            supervisor_strategy: Arc::new(AlwaysEscalate),
            node: None,
            initial_behavior: crate::actor::DEFAULT_BEHAVIOR.to_string(),
        }
    }

    /// Build `Props` that spawn a registered actor class by name (spec §4.7
    /// `SpawnActor`, §6 `actor_class`). Resolution happens inside
    /// `System::spawn` against the actor-class registry.
    pub fn from_class(name: impl Into<String>) -> Self {
        Self {
            source: ActorSource::Class(name.into()),
            mailbox_kind: None,
            dispatcher: None,
            supervisor_strategy: Arc::new(AlwaysEscalate),
            node: None,
            initial_behavior: crate::actor::DEFAULT_BEHAVIOR.to_string(),
        }
    }

    /// Override the mailbox kind (default: `SystemConfig::default_mailbox_kind`).
    pub fn with_mailbox_kind(mut self, kind: MailboxKind) -> Self {
        self.mailbox_kind = Some(kind);
        self
    }

    /// Override the dispatcher (default: the system's default dispatcher).
    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Override the supervision strategy (default: [`AlwaysEscalate`]).
    pub fn with_supervisor_strategy(mut self, strategy: Arc<dyn SupervisionStrategy>) -> Self {
        self.supervisor_strategy = strategy;
        self
    }

    /// Spawn on a remote node instead of locally (spec §6 `address`).
    pub fn with_node(mut self, node: NodeAddress) -> Self {
        self.node = Some(node);
        self
    }

    /// Override the initial behavior name (default: `"default"`).
    pub fn with_initial_behavior(mut self, name: impl Into<String>) -> Self {
        self.initial_behavior = name.into();
        self
    }

    pub(crate) fn build_handle(
        &self,
        address: Address,
        parent: Option<Address>,
        system: System,
        mailbox: Arc<dyn Mailbox>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Option<Arc<dyn ActorHandle>> {
        match &self.source {
            ActorSource::Producer(factory) => Some(factory(
                address,
                parent,
                system,
                mailbox,
                dispatcher,
                &self.initial_behavior,
            )),
            ActorSource::Class(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Behaviors, Context};
    use crate::message::Message;
    use async_trait::async_trait;

    struct Probe;

    #[async_trait]
    impl Actor for Probe {
        fn initialize_behaviors(&self, _behaviors: &mut Behaviors<Self>) {}

        async fn receive(
            &mut self,
            _message: Message,
            _ctx: &mut Context,
        ) -> Result<(), crate::actor::ActorError> {
            Ok(())
        }
    }

    #[test]
    fn from_producer_defaults_to_always_escalate_and_default_behavior() {
        let props = Props::from_producer(|| Probe);
        assert_eq!(props.initial_behavior, "default");
        assert!(matches!(props.source, ActorSource::Producer(_)));
    }

    #[test]
    fn from_class_carries_name() {
        let props = Props::from_class("worker");
        assert!(matches!(props.source, ActorSource::Class(ref name) if name == "worker"));
    }

    #[test]
    fn builder_methods_override_defaults() {
        let props = Props::from_producer(|| Probe)
            .with_mailbox_kind(MailboxKind::Priority)
            .with_initial_behavior("counting");
        assert_eq!(props.mailbox_kind, Some(MailboxKind::Priority));
        assert_eq!(props.initial_behavior, "counting");
    }
}
