//! # fluxrt - Local-and-Remote Actor Runtime
//!
//! An actor runtime: mailboxes with lane partitioning, a cooperative
//! dispatcher, per-actor supervision, a routing actor for pools of
//! routees, and a streaming gRPC transport that extends addressing across
//! nodes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fluxrt::prelude::*;
//! use async_trait::async_trait;
//!
//! struct Counter {
//!     count: u64,
//! }
//!
//! #[async_trait]
//! impl Actor for Counter {
//!     fn initialize_behaviors(&self, behaviors: &mut Behaviors<Self>) {
//!         behaviors.add(DEFAULT_BEHAVIOR, |actor: &mut Counter, message, ctx| {
//!             Box::pin(async move { actor.receive(message, ctx).await })
//!         });
//!     }
//!
//!     async fn receive(&mut self, message: Message, _ctx: &mut Context) -> Result<(), ActorError> {
//!         if message.message_type() == "increment" {
//!             self.count += 1;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = System::new(SystemConfig::default());
//!     let address = system.spawn(Props::from_producer(|| Counter { count: 0 })).await?;
//!     system.send(&address, Message::new("increment", serde_json::json!({}))).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`message`] — the `Message` value type and lane classification.
//! - [`mailbox`] — per-actor queues with priority lanes and error sealing.
//! - [`dispatcher`] — cooperative scheduling policy for draining mailboxes.
//! - [`actor`] — the `Actor` trait, behaviors, lifecycle, and `Context`.
//! - [`system`] — `System`, `Props`, configuration, and errors: the thing
//!   that ties everything above together.
//! - [`supervisor`] — failure-handling strategies and the health monitor.
//! - [`router`] — an actor that forwards to a pool of routees.
//! - [`remote`] — the gRPC transport extending addressing across nodes.
//! - [`monitoring`] — observability events for every layer above.
//! - [`util`] — addressing (`Address`, `NodeAddress`) and id types.

pub mod actor;
pub mod dispatcher;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod prelude;
pub mod remote;
pub mod router;
pub mod supervisor;
pub mod system;
pub mod util;

// Re-export commonly used types
pub use actor::{
    Actor, ActorCell, ActorError, ActorHandle, ActorLifecycle, Behaviors, Context, LifecyclePhase,
    DEFAULT_BEHAVIOR,
};
pub use dispatcher::{DefaultDispatcher, Dispatcher, ThroughputConfig, ThroughputDispatcher};
pub use mailbox::{InvokeError, Invoker, LaneMailbox, Mailbox, MailboxError, MailboxKind};
pub use message::{classify_lane, Message, MessageEnvelope, MessageLane};
pub use monitoring::{
    ActorEvent, ActorEventKind, EventSeverity, InMemoryMonitor, Monitor, MonitoringConfig,
    MonitoringError, MonitoringEvent, MonitoringSnapshot, RemoteEvent, RemoteEventKind,
    RouterEvent, RouterEventKind, SystemEvent, SystemEventKind,
};
pub use remote::{RemoteClient, RemoteError, RemoteTransportService};
pub use router::{Router, RouterKind};
pub use supervisor::{
    AlwaysEscalate, AlwaysResume, AlwaysRestart, AlwaysStop, Directive, RestartBackoff,
    RestartWithBackoff, StrategyContext, SupervisionStrategy, SupervisorError,
};
pub use system::{DeadLetterRecord, Props, System, SystemConfig, SystemError};
pub use util::{Address, ActorId, ChildId, MessageId, NodeAddress};
