//! Convenience re-exports for building actors with fluxrt.
//!
//! ```rust
//! use fluxrt::prelude::*;
//! ```

// Core actor system
pub use crate::actor::{
    Actor, ActorCell, ActorError, ActorHandle, ActorLifecycle, Behaviors, Context, LifecyclePhase,
    DEFAULT_BEHAVIOR,
};

// Messaging
pub use crate::message::{Message, MessageEnvelope, MessageLane};

// Mailbox
pub use crate::mailbox::{Mailbox, MailboxError, MailboxKind};

// Dispatcher
pub use crate::dispatcher::{Dispatcher, ThroughputConfig, ThroughputDispatcher};

// Supervision
pub use crate::supervisor::{
    AlwaysEscalate, AlwaysResume, AlwaysRestart, AlwaysStop, Directive, RestartWithBackoff,
    SupervisionStrategy,
};

// Routing
pub use crate::router::{Router, RouterKind};

// Remote transport
pub use crate::remote::{RemoteClient, RemoteError};

// Monitoring
pub use crate::monitoring::{
    ActorEvent, EventSeverity, InMemoryMonitor, Monitor, MonitoringEvent, SystemEvent,
    SystemEventKind,
};

// System
pub use crate::system::{Props, System, SystemConfig, SystemError};

// Utilities
pub use crate::util::{Address, ActorId, MessageId, NodeAddress};
