//! The actor system (spec C6, §4.5): owns the actor table, drives spawn and
//! supervision decisions, and is the shared handle every [`crate::actor::Context`]
//! carries.
//!
//! Grounded on the teacher's `broker/registry.rs`, which keeps its actor
//! table in a `DashMap` and round-robins pool selection with a per-pool
//! counter; this system keeps the same table shape for addresses and reuses
//! that pattern inside [`crate::router::Router`]. Failure handling is
//! grounded directly on `actor::cell::ActorCell`'s `Invoker` impl: a handler
//! error there calls `system.report_failure(address, error)` with no
//! `Result` to unwrap, which is why [`System::report_failure`] returns `()`
//! rather than propagating further.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use dashmap::DashMap;
use parking_lot::Mutex;

// Layer 3: Internal module imports
use super::errors::SystemError;
use super::config::SystemConfig;
use super::props::{ActorSource, Props};
use crate::actor::{ActorError, ActorHandle, LifecyclePhase};
use crate::dispatcher::{Dispatcher, ThroughputConfig, ThroughputDispatcher};
use crate::mailbox::{LaneMailbox, Mailbox};
use crate::message::Message;
use crate::monitoring::{InMemoryMonitor, Monitor, MonitoringConfig, SystemEvent, SystemEventKind};
use crate::remote::{RemoteClient, RemoteTransportService};
use crate::supervisor::{Directive, StrategyContext, SupervisionStrategy};
use crate::util::{Address, NodeAddress};

/// How many dead letters the system keeps around for inspection (spec §4.5
/// "dead letters are observable, not silently discarded").
const DEAD_LETTER_HISTORY: usize = 1000;

type ClassFactory = dyn Fn() -> Props + Send + Sync;

/// A single recorded delivery failure: either the target wasn't registered
/// locally, or its mailbox refused the message (full or sealed).
#[derive(Debug, Clone)]
pub struct DeadLetterRecord {
    /// The address the message could not be delivered to.
    pub target: Address,
    /// The message's `message_type`, kept for triage without retaining the
    /// (possibly sensitive) payload.
    pub message_type: String,
    /// Why delivery failed, in human-readable form.
    pub reason: String,
    /// When the failure was recorded.
    pub timestamp: DateTime<Utc>,
}

struct ActorEntry {
    handle: Arc<dyn ActorHandle>,
    parent: Option<Address>,
    children: Mutex<Vec<Address>>,
    supervisor_strategy: Arc<dyn SupervisionStrategy>,
    restart_count: AtomicU32,
}

struct SystemInner {
    config: SystemConfig,
    actors: DashMap<Address, ActorEntry>,
    classes: DashMap<String, Arc<ClassFactory>>,
    dead_letters: Mutex<VecDeque<DeadLetterRecord>>,
    monitor: InMemoryMonitor<SystemEvent>,
    remote_clients: DashMap<NodeAddress, RemoteClient>,
}

/// The actor system (spec C6): owns every locally-spawned actor, applies
/// supervision decisions on failure, and is the one thing every [`Context`]
/// needs to reach another actor.
///
/// Cloning a `System` clones a handle, not the table: every clone shares the
/// same actor table, class registry and dead-letter history, the same way
/// the teacher's broker handles are `Arc`-backed.
///
/// [`Context`]: crate::actor::Context
#[derive(Clone)]
pub struct System {
    inner: Arc<SystemInner>,
}

impl System {
    /// Build a fresh, empty system from `config`. Synchronous: spawning
    /// actors, starting the health monitor, or starting the remote server
    /// are separate, explicit, async steps a caller takes afterward.
    pub fn new(config: SystemConfig) -> Self {
        let monitoring_config = MonitoringConfig {
            enabled: config.enable_metrics,
            ..MonitoringConfig::default()
        };
        let inner = SystemInner {
            config,
            actors: DashMap::new(),
            classes: DashMap::new(),
            dead_letters: Mutex::new(VecDeque::with_capacity(DEAD_LETTER_HISTORY)),
            monitor: InMemoryMonitor::new(monitoring_config),
            remote_clients: DashMap::new(),
        };
        let system = Self { inner: Arc::new(inner) };
        system.emit(SystemEventKind::Started);
        system
    }

    /// The configuration this system was built with.
    pub fn config(&self) -> &SystemConfig {
        &self.inner.config
    }

    /// Register a named actor class so remote peers (and local callers) can
    /// spawn it by name via [`Props::from_class`] (spec §4.7 "SpawnActor").
    /// `factory` must build a [`Props`] backed by [`ActorSource::Producer`];
    /// a class that resolves to another `Class` is rejected at spawn time.
    pub fn register_class<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Props + Send + Sync + 'static,
    {
        self.inner.classes.insert(name.into(), Arc::new(factory));
    }

    /// Spawn a root actor (no parent). See [`Context::spawn`] for spawning a
    /// child from inside a running actor.
    ///
    /// [`Context::spawn`]: crate::actor::Context::spawn
    pub async fn spawn(&self, props: Props) -> Result<Address, SystemError> {
        self.spawn_with_parent(props, None).await
    }

    /// Spawn a child of `parent`. `pub(crate)` because the only legitimate
    /// caller is [`Context::spawn`], which is what keeps a child's parent
    /// link trustworthy.
    ///
    /// [`Context::spawn`]: crate::actor::Context::spawn
    pub(crate) async fn spawn_child(&self, props: Props, parent: Address) -> Result<Address, SystemError> {
        self.spawn_with_parent(props, Some(parent)).await
    }

    async fn spawn_with_parent(&self, props: Props, parent: Option<Address>) -> Result<Address, SystemError> {
        let max_actors = self.inner.config.max_actors;
        if max_actors != 0 && self.inner.actors.len() >= max_actors {
            return Err(SystemError::ActorLimitExceeded {
                current: self.inner.actors.len(),
                max: max_actors,
            });
        }

        let props = self.resolve_props(props)?;

        let address = match &props.node {
            Some(node) => Address::remote(Address::new_local().id().to_string(), node.clone()),
            None => Address::new_local(),
        };

        let mailbox_kind = props.mailbox_kind.unwrap_or(self.inner.config.default_mailbox_kind);
        let mailbox: Arc<dyn Mailbox> =
            LaneMailbox::with_capacity(mailbox_kind, self.inner.config.default_mailbox_capacity);

        let dispatcher: Arc<dyn Dispatcher> = match &props.dispatcher {
            Some(dispatcher) => dispatcher.clone(),
            None => Arc::new(ThroughputDispatcher::new(ThroughputConfig {
                max_per_second: self.inner.config.default_max_per_second,
                batch_size: self.inner.config.default_batch_size,
            })),
        };

        let supervisor_strategy = props.supervisor_strategy.clone();
        let Some(handle) = props.build_handle(address.clone(), parent.clone(), self.clone(), mailbox, dispatcher) else {
            return Err(SystemError::SpawnFailed(
                "actor source did not resolve to a producer".to_string(),
            ));
        };

        self.inner.actors.insert(
            address.clone(),
            ActorEntry {
                handle: handle.clone(),
                parent: parent.clone(),
                children: Mutex::new(Vec::new()),
                supervisor_strategy,
                restart_count: AtomicU32::new(0),
            },
        );
        if let Some(parent_addr) = &parent {
            if let Some(parent_entry) = self.inner.actors.get(parent_addr) {
                parent_entry.children.lock().push(address.clone());
            }
        }

        if !handle.start().await {
            self.inner.actors.remove(&address);
            return Err(SystemError::SpawnFailed(format!(
                "actor {address} failed to start"
            )));
        }

        self.emit(SystemEventKind::ActorSpawned { address: address.to_string() });
        Ok(address)
    }

    /// Resolve `props` against the class registry when its source is
    /// [`ActorSource::Class`], merging the caller's overrides onto the
    /// registered base. A caller spawning from a [`Props::from_producer`]
    /// passes straight through unchanged.
    fn resolve_props(&self, props: Props) -> Result<Props, SystemError> {
        let ActorSource::Class(name) = &props.source else {
            return Ok(props);
        };
        let factory = self
            .inner
            .classes
            .get(name)
            .ok_or_else(|| SystemError::UnknownActorClass(name.clone()))?;
        let base = factory();
        if matches!(base.source, ActorSource::Class(_)) {
            return Err(SystemError::UnknownActorClass(name.clone()));
        }

        let mut resolved = base;
        resolved.mailbox_kind = props.mailbox_kind.or(resolved.mailbox_kind);
        resolved.dispatcher = props.dispatcher.or(resolved.dispatcher);
        resolved.supervisor_strategy = props.supervisor_strategy;
        resolved.node = props.node.or(resolved.node);
        if props.initial_behavior != crate::actor::DEFAULT_BEHAVIOR {
            resolved.initial_behavior = props.initial_behavior;
        }
        Ok(resolved)
    }

    /// Deliver `message` to `target`'s mailbox.
    ///
    /// A target that isn't registered locally, or whose mailbox refuses the
    /// message, is not a panic or a silently-dropped message: it's recorded
    /// as a dead letter (spec §4.5) and surfaced to the caller as a real
    /// error, so callers that need to react (a router picking another
    /// routee, a supervisor backing off) still can.
    pub async fn send(&self, target: &Address, message: Message) -> Result<(), SystemError> {
        let Some(entry) = self.inner.actors.get(target) else {
            self.record_dead_letter(target, &message, "actor not registered locally");
            return Err(SystemError::ActorNotFound(target.clone()));
        };
        let mailbox = entry.handle.mailbox();
        drop(entry);

        let result = if message.lane() == crate::message::MessageLane::System {
            mailbox.post_system(message.clone())
        } else {
            mailbox.post_user(message.clone())
        };

        if let Err(err) = result {
            self.record_dead_letter(target, &message, &err.to_string());
            return Err(SystemError::MailboxFull(target.clone()));
        }
        Ok(())
    }

    fn record_dead_letter(&self, target: &Address, message: &Message, reason: &str) {
        let record = DeadLetterRecord {
            target: target.clone(),
            message_type: message.message_type().to_string(),
            reason: reason.to_string(),
            timestamp: Utc::now(),
        };
        let mut dead_letters = self.inner.dead_letters.lock();
        if dead_letters.len() >= DEAD_LETTER_HISTORY {
            dead_letters.pop_front();
        }
        dead_letters.push_back(record);
        drop(dead_letters);
        self.emit(SystemEventKind::DeadLetter {
            target: target.to_string(),
            message_type: message.message_type().to_string(),
            reason: reason.to_string(),
        });
    }

    /// Stop `target`: stops every descendant first (depth-first, spec §8
    /// invariant 5 "stopping an actor stops all its descendants first"),
    /// then runs `post_stop` and removes `target` from the actor table.
    /// Idempotent: stopping an address that is no longer registered is not
    /// an error.
    pub async fn stop(&self, target: &Address) -> Result<(), SystemError> {
        self.stop_subtree(target).await;
        Ok(())
    }

    fn stop_subtree<'a>(&'a self, target: &'a Address) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let Some((_, entry)) = self.inner.actors.remove(target) else {
                return;
            };
            let children = entry.children.lock().clone();
            for child in children {
                self.stop_subtree(&child).await;
            }
            entry.handle.stop().await;
            self.emit(SystemEventKind::ActorStopped { address: target.to_string() });
        })
    }

    /// Restart `target` in place: runs `pre_restart`/fresh instance/`pre_start`/
    /// `post_restart`, then reopens its mailbox.
    pub async fn restart(&self, target: &Address, reason: ActorError) -> Result<(), SystemError> {
        let Some(entry) = self.inner.actors.get(target) else {
            return Err(SystemError::ActorNotFound(target.clone()));
        };
        let handle = entry.handle.clone();
        drop(entry);
        handle.restart(reason).await;
        Ok(())
    }

    /// Resume `target`: reopens its mailbox without rebuilding its state.
    pub async fn resume(&self, target: &Address) -> Result<(), SystemError> {
        let Some(entry) = self.inner.actors.get(target) else {
            return Err(SystemError::ActorNotFound(target.clone()));
        };
        let handle = entry.handle.clone();
        drop(entry);
        handle.resume().await;
        Ok(())
    }

    /// Apply this system's supervision strategy to a handler failure
    /// reported by `address`'s `ActorCell` (spec §4.6 "Supervision").
    ///
    /// Called from `Invoker::invoke_user` with no `Result` to propagate: a
    /// failure in supervision itself (missing entry, e.g. a race with a
    /// concurrent `stop`) is swallowed rather than surfaced, since there is
    /// no caller left to hand an error to.
    pub(crate) async fn report_failure(&self, address: Address, error: ActorError) {
        let Some(entry) = self.inner.actors.get(&address) else {
            return;
        };
        let handle = entry.handle.clone();
        let strategy = entry.supervisor_strategy.clone();
        let parent = entry.parent.clone();
        let restart_count = entry.restart_count.load(Ordering::SeqCst);
        drop(entry);

        let context = StrategyContext {
            supervisor: parent.clone().unwrap_or_else(|| address.clone()),
            child: address.clone(),
            restart_count,
        };
        let directive = strategy.decide(&context, &error);

        self.emit(SystemEventKind::FailureReported {
            address: address.to_string(),
            directive: format!("{directive:?}"),
        });

        match directive {
            Directive::Resume => handle.resume().await,
            Directive::Restart => {
                if let Some(entry) = self.inner.actors.get(&address) {
                    entry.restart_count.fetch_add(1, Ordering::SeqCst);
                }
                handle.restart(error).await;
            }
            Directive::Stop => {
                // Goes through the same subtree-stop path as `System::stop`
                // (§8 invariant 5): a failed actor with children must not
                // leave them orphaned just because it was stopped by its
                // supervisor instead of by a direct caller.
                self.stop_subtree(&address).await;
            }
            Directive::Escalate => match parent {
                Some(parent_addr) => {
                    let payload = serde_json::json!({
                        "child": address.to_string(),
                        "reason": error.to_string(),
                    });
                    let _ = self.send(&parent_addr, Message::system("failure", payload)).await;
                }
                None => {
                    // A root actor with nowhere left to escalate to is
                    // stopped outright, subtree and all.
                    self.stop_subtree(&address).await;
                }
            },
        }
    }

    /// Every address currently registered in the actor table.
    pub fn addresses(&self) -> Vec<Address> {
        self.inner.actors.iter().map(|entry| entry.key().clone()).collect()
    }

    /// `target`'s current lifecycle phase, or `None` if it isn't registered.
    pub fn lifecycle_phase(&self, target: &Address) -> Option<LifecyclePhase> {
        self.inner.actors.get(target).map(|entry| entry.handle.lifecycle_phase())
    }

    /// How many actors are currently registered.
    pub fn actor_count(&self) -> usize {
        self.inner.actors.len()
    }

    /// Dead letters recorded so far, oldest first, bounded to the most
    /// recent [`DEAD_LETTER_HISTORY`] entries.
    pub fn dead_letters(&self) -> Vec<DeadLetterRecord> {
        self.inner.dead_letters.lock().iter().cloned().collect()
    }

    /// How many dead letters have been recorded since startup, independent
    /// of how many are still retained in [`System::dead_letters`].
    pub fn dead_letter_count(&self) -> usize {
        self.inner.dead_letters.lock().len()
    }

    /// Deliver `message` to an actor on `node` by id, via the remote
    /// transport (spec §4.7). Connects lazily and caches the client per
    /// node, so repeated sends to the same peer reuse one HTTP/2 channel.
    pub async fn send_remote(
        &self,
        node: &NodeAddress,
        target_id: &str,
        message: Message,
    ) -> Result<(), SystemError> {
        let client = self.remote_client(node).await?;
        let target = Address::remote(target_id, node.clone());
        client
            .send_message(&target, &message)
            .await
            .map_err(SystemError::from)
    }

    async fn remote_client(&self, node: &NodeAddress) -> Result<RemoteClient, SystemError> {
        if let Some(client) = self.inner.remote_clients.get(node) {
            return Ok(client.clone());
        }
        let client = RemoteClient::connect(node).await?;
        self.inner.remote_clients.insert(node.clone(), client.clone());
        Ok(client)
    }

    /// Start serving the remote transport on `config.remote_bind_address`.
    /// A no-op `Ok(())` when no bind address is configured. Runs the gRPC
    /// server as a background task; the returned future resolves once the
    /// server has started listening, not once it stops.
    pub async fn start_remote(&self) -> Result<(), SystemError> {
        let Some(bind_address) = self.inner.config.remote_bind_address.clone() else {
            return Ok(());
        };
        let addr = bind_address
            .parse()
            .map_err(|e| SystemError::ConfigError(format!("invalid remote_bind_address: {e}")))?;
        let service = RemoteTransportService::new(self.clone()).into_server();
        tokio::spawn(async move {
            let _ = tonic::transport::Server::builder()
                .add_service(service)
                .serve(addr)
                .await;
        });
        Ok(())
    }

    fn emit(&self, event_kind: SystemEventKind) {
        let monitor = self.inner.monitor.clone();
        let event = SystemEvent {
            timestamp: Utc::now(),
            event_kind,
            metadata: Default::default(),
        };
        tokio::spawn(async move {
            let _ = monitor.record(event).await;
        });
    }
}
