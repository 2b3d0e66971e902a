//! Monitoring event types and configuration structures.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::{EventSeverity, MonitoringEvent};
use crate::util::ActorId;

/// Configuration for monitoring behavior.
///
/// Controls how events are recorded, filtered, and stored in the monitor.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    /// Whether monitoring is enabled
    pub enabled: bool,

    /// Maximum number of events to keep in history
    pub max_history_size: usize,

    /// Minimum severity level to record (events below this are filtered)
    pub severity_filter: EventSeverity,

    /// Interval for snapshot generation (if using background snapshots)
    #[serde(with = "crate::util::duration_serde")]
    pub snapshot_interval: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 1000,
            severity_filter: EventSeverity::Info,
            snapshot_interval: Duration::from_secs(60),
        }
    }
}

/// Snapshot of monitoring state at a point in time.
///
/// Provides queryable access to monitoring counters and recent event history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    /// Timestamp when snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Total number of events recorded
    pub total_events: u64,

    /// Number of trace-level events
    pub trace_count: u64,

    /// Number of debug-level events
    pub debug_count: u64,

    /// Number of info-level events
    pub info_count: u64,

    /// Number of warning-level events
    pub warning_count: u64,

    /// Number of error-level events
    pub error_count: u64,

    /// Number of critical-level events
    pub critical_count: u64,

    /// Recent events (up to max_history_size)
    pub recent_events: Vec<E>,
}

// ============================================================================
// Supervision Events
// ============================================================================

/// Events related to supervisor operations and child management.
#[derive(Debug, Clone, Serialize)]
pub struct SupervisionEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// ID of the supervisor
    pub supervisor_id: String,

    /// ID of the child actor (if applicable)
    pub child_id: Option<String>,

    /// Specific supervision event type
    pub event_kind: SupervisionEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for SupervisionEvent {
    const EVENT_TYPE: &'static str = "supervision";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            SupervisionEventKind::ChildStarted => EventSeverity::Info,
            SupervisionEventKind::ChildStopped => EventSeverity::Info,
            SupervisionEventKind::ChildFailed { .. } => EventSeverity::Error,
            SupervisionEventKind::ChildRestarted { .. } => EventSeverity::Warning,
            SupervisionEventKind::RestartLimitExceeded { .. } => EventSeverity::Critical,
            SupervisionEventKind::StrategyApplied { .. } => EventSeverity::Info,
        }
    }
}

/// Specific types of supervision events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum SupervisionEventKind {
    /// Child actor successfully started
    ChildStarted,

    /// Child actor gracefully stopped
    ChildStopped,

    /// Child actor failed with error
    ChildFailed {
        /// Error message
        error: String,
        /// Current restart count
        restart_count: u32,
    },

    /// Child actor was restarted after failure
    ChildRestarted {
        /// Restart count after this restart
        restart_count: u32,
    },

    /// Restart rate limit exceeded
    RestartLimitExceeded {
        /// Number of restarts attempted
        restart_count: u32,
        /// Time window for restart limit
        #[serde(with = "crate::util::duration_serde")]
        window: Duration,
    },

    /// Supervision strategy was applied
    StrategyApplied {
        /// Name of the strategy (OneForOne, OneForAll, RestForOne)
        strategy: String,
        /// Number of children affected
        affected_count: usize,
    },
}

// ============================================================================
// Actor Events
// ============================================================================

/// Events related to actor lifecycle and message processing.
#[derive(Debug, Clone, Serialize)]
pub struct ActorEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// ID of the actor
    pub actor_id: ActorId,

    /// Specific actor event type
    pub event_kind: ActorEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for ActorEvent {
    const EVENT_TYPE: &'static str = "actor";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            ActorEventKind::Spawned => EventSeverity::Debug,
            ActorEventKind::Started => EventSeverity::Info,
            ActorEventKind::MessageReceived { .. } => EventSeverity::Trace,
            ActorEventKind::MessageProcessed { .. } => EventSeverity::Trace,
            ActorEventKind::ErrorOccurred { .. } => EventSeverity::Error,
            ActorEventKind::Stopped => EventSeverity::Info,
        }
    }
}

/// Specific types of actor events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ActorEventKind {
    /// Actor was spawned
    Spawned,

    /// Actor started execution
    Started,

    /// Actor received a message
    MessageReceived {
        /// Message type name
        message_type: String,
    },

    /// Actor finished processing a message
    MessageProcessed {
        /// Message type name
        message_type: String,
        /// Processing duration in microseconds
        duration_micros: u64,
    },

    /// Error occurred during actor execution
    ErrorOccurred {
        /// Error message
        error: String,
    },

    /// Actor stopped execution
    Stopped,
}

// ============================================================================
// System Events
// ============================================================================

/// Events related to actor system operations.
#[derive(Debug, Clone, Serialize)]
pub struct SystemEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Specific system event type
    pub event_kind: SystemEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for SystemEvent {
    const EVENT_TYPE: &'static str = "system";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            SystemEventKind::Started => EventSeverity::Info,
            SystemEventKind::Shutdown => EventSeverity::Info,
            SystemEventKind::ActorRegistered { .. } => EventSeverity::Debug,
            SystemEventKind::ActorDeregistered { .. } => EventSeverity::Debug,
            SystemEventKind::ConfigurationChanged => EventSeverity::Info,
            SystemEventKind::ActorSpawned { .. } => EventSeverity::Debug,
            SystemEventKind::ActorStopped { .. } => EventSeverity::Debug,
            SystemEventKind::DeadLetter { .. } => EventSeverity::Warning,
            SystemEventKind::FailureReported { .. } => EventSeverity::Error,
        }
    }
}

// ============================================================================
// Router Events
// ============================================================================

/// Events related to router (spec C8) routee-set membership and forwarding.
#[derive(Debug, Clone, Serialize)]
pub struct RouterEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Address of the router actor, as displayed.
    pub router: String,

    /// Specific router event type
    pub event_kind: RouterEventKind,
}

impl MonitoringEvent for RouterEvent {
    const EVENT_TYPE: &'static str = "router";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            RouterEventKind::RouteeAdded { .. } => EventSeverity::Debug,
            RouterEventKind::RouteeRemoved { .. } => EventSeverity::Debug,
            RouterEventKind::Forwarded { .. } => EventSeverity::Trace,
            RouterEventKind::NoRoutees => EventSeverity::Warning,
        }
    }
}

/// Specific types of router events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum RouterEventKind {
    /// A routee was added to the router's forwarding set.
    RouteeAdded {
        /// The new routee's address, as displayed.
        routee: String,
    },
    /// A routee was detached (not stopped) from the forwarding set.
    RouteeRemoved {
        /// The detached routee's address, as displayed.
        routee: String,
    },
    /// A message was forwarded to one or more routees.
    Forwarded {
        /// How many routees the message was forwarded to (1 for RoundRobin,
        /// the full routee count for Broadcast).
        routee_count: usize,
    },
    /// A message arrived with no routees registered; it was dropped.
    NoRoutees,
}

// ============================================================================
// Remote Events
// ============================================================================

/// Events related to the gRPC remote transport (spec C9, §4.7).
#[derive(Debug, Clone, Serialize)]
pub struct RemoteEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Peer node address, as displayed.
    pub peer: String,

    /// Specific remote event type
    pub event_kind: RemoteEventKind,
}

impl MonitoringEvent for RemoteEvent {
    const EVENT_TYPE: &'static str = "remote";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            RemoteEventKind::SendMessage { .. } => EventSeverity::Trace,
            RemoteEventKind::SpawnActor { .. } => EventSeverity::Info,
            RemoteEventKind::StopActor { .. } => EventSeverity::Info,
            RemoteEventKind::WatchStarted { .. } => EventSeverity::Debug,
            RemoteEventKind::WatchEnded { .. } => EventSeverity::Debug,
            RemoteEventKind::TransportError { .. } => EventSeverity::Error,
        }
    }
}

/// Specific types of remote transport events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum RemoteEventKind {
    /// An inbound or outbound `SendMessage` RPC completed.
    SendMessage {
        /// Target actor id carried on the wire.
        target: String,
    },
    /// An inbound `SpawnActor` RPC completed.
    SpawnActor {
        /// Registered actor class name that was spawned.
        actor_class: String,
    },
    /// An inbound `StopActor` RPC completed.
    StopActor {
        /// Target actor id carried on the wire.
        target: String,
    },
    /// A `WatchActor` stream was opened.
    WatchStarted {
        /// Watched actor id.
        target: String,
    },
    /// A `WatchActor` stream closed (client disconnect or watched actor gone).
    WatchEnded {
        /// Watched actor id.
        target: String,
    },
    /// A transport-level failure occurred (connect, decode, or RPC status error).
    TransportError {
        /// Human-readable failure description.
        reason: String,
    },
}

/// Specific types of system events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum SystemEventKind {
    /// Actor system started
    Started,

    /// Actor system shutting down
    Shutdown,

    /// Actor registered with the system
    ActorRegistered {
        /// ID of the registered actor
        actor_id: ActorId,
    },

    /// Actor deregistered from the system
    ActorDeregistered {
        /// ID of the deregistered actor
        actor_id: ActorId,
    },

    /// System configuration was changed
    ConfigurationChanged,

    /// An actor was spawned into the system's actor table.
    ActorSpawned {
        /// The new actor's address, as displayed.
        address: String,
    },

    /// An actor left the system's actor table (stopped or restarted away).
    ActorStopped {
        /// The actor's address, as displayed.
        address: String,
    },

    /// A message could not be delivered and was dropped instead (spec §5,
    /// §7 "sealed or full lane drops silently").
    DeadLetter {
        /// Intended recipient, as displayed.
        target: String,
        /// The dropped message's type discriminator.
        message_type: String,
        /// Why delivery did not happen (e.g. "no such actor", "sealed", "full").
        reason: String,
    },

    /// A failure was reported against an actor and a supervision directive
    /// was applied.
    FailureReported {
        /// The failing actor's address, as displayed.
        address: String,
        /// The directive the supervisor applied.
        directive: String,
    },
}

// ============================================================================
// Broker Events
// ============================================================================

/// Events related to message broker operations.
#[derive(Debug, Clone, Serialize)]
pub struct BrokerEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Specific broker event type
    pub event_kind: BrokerEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for BrokerEvent {
    const EVENT_TYPE: &'static str = "broker";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            BrokerEventKind::MessagePublished { .. } => EventSeverity::Trace,
            BrokerEventKind::MessageRouted { .. } => EventSeverity::Trace,
            BrokerEventKind::SubscriberAdded { .. } => EventSeverity::Debug,
            BrokerEventKind::SubscriberRemoved { .. } => EventSeverity::Debug,
            BrokerEventKind::RoutingFailed { .. } => EventSeverity::Error,
            BrokerEventKind::DeadLetter { .. } => EventSeverity::Warning,
        }
    }
}

/// Specific types of broker events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum BrokerEventKind {
    /// Message published to broker
    MessagePublished {
        /// Message type name
        message_type: String,
    },

    /// Message successfully routed to actor
    MessageRouted {
        /// Destination actor ID
        actor_id: ActorId,
        /// Message type name
        message_type: String,
    },

    /// New subscriber added
    SubscriberAdded {
        /// Subscriber identifier
        subscriber_id: String,
    },

    /// Subscriber removed
    SubscriberRemoved {
        /// Subscriber identifier
        subscriber_id: String,
    },

    /// Failed to route message
    RoutingFailed {
        /// Target actor ID
        actor_id: ActorId,
        /// Failure reason
        reason: String,
    },

    /// Message sent to dead letter queue
    DeadLetter {
        /// Message type name
        message_type: String,
        /// Reason for dead lettering
        reason: String,
    },
}

// ============================================================================
// Mailbox Events
// ============================================================================

/// Events related to mailbox operations and backpressure.
#[derive(Debug, Clone, Serialize)]
pub struct MailboxEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// ID of the actor owning the mailbox
    pub actor_id: ActorId,

    /// Specific mailbox event type
    pub event_kind: MailboxEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for MailboxEvent {
    const EVENT_TYPE: &'static str = "mailbox";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            MailboxEventKind::MessageEnqueued { .. } => EventSeverity::Trace,
            MailboxEventKind::MessageDequeued { .. } => EventSeverity::Trace,
            MailboxEventKind::BackpressureApplied { .. } => EventSeverity::Warning,
            MailboxEventKind::CapacityReached => EventSeverity::Warning,
            MailboxEventKind::MessageDropped { .. } => EventSeverity::Error,
        }
    }
}

/// Specific types of mailbox events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum MailboxEventKind {
    /// Message enqueued in mailbox
    MessageEnqueued {
        /// Current queue size
        queue_size: usize,
    },

    /// Message dequeued from mailbox
    MessageDequeued {
        /// Remaining queue size
        queue_size: usize,
    },

    /// Backpressure strategy applied
    BackpressureApplied {
        /// Strategy applied (Block, Drop, Error)
        strategy: String,
    },

    /// Mailbox capacity reached
    CapacityReached,

    /// Message dropped due to backpressure
    MessageDropped {
        /// Reason for dropping
        reason: String,
    },
}
