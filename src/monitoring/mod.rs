//! # Monitoring Module
//!
//! Universal monitoring infrastructure for observing and tracking events across all runtime components.
//!
//! ## Features
//! - **Generic Monitor<E> Trait**: Universal monitoring for any entity type
//! - **Zero-Cost Abstraction**: NoopMonitor compiles away when disabled
//! - **Lock-Free Recording**: Atomic counters for concurrent event tracking
//! - **Type Safety**: MonitoringEvent trait ensures compile-time correctness
//!
//! ## Event Types
//! - `SupervisionEvent`: Supervisor tree operations and failures
//! - `ActorEvent`: Actor lifecycle and message processing
//! - `SystemEvent`: Actor system-level events
//! - `BrokerEvent`: Message broker operations
//! - `MailboxEvent`: Mailbox operations and backpressure
//!
//! ## Examples
//! ```rust
//! use fluxrt::monitoring::{InMemoryMonitor, Monitor, MonitoringConfig, ActorEvent, ActorEventKind};
//! use std::collections::HashMap;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MonitoringConfig::default();
//! let monitor = InMemoryMonitor::<ActorEvent>::new(config);
//!
//! monitor.record(ActorEvent {
//!     timestamp: chrono::Utc::now(),
//!     actor_id: fluxrt::util::ActorId::new(),
//!     event_kind: ActorEventKind::Started,
//!     metadata: HashMap::new(),
//! }).await?;
//!
//! let snapshot = monitor.snapshot().await?;
//! assert_eq!(snapshot.total_events, 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod in_memory;
pub mod noop;
pub mod traits;
pub mod types;

pub use error::MonitoringError;
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use traits::{EventSeverity, Monitor, MonitoringEvent};
pub use types::{
    ActorEvent, ActorEventKind, BrokerEvent, BrokerEventKind, MailboxEvent, MailboxEventKind,
    MonitoringConfig, MonitoringSnapshot, RemoteEvent, RemoteEventKind, RouterEvent,
    RouterEventKind, SupervisionEvent, SupervisionEventKind, SystemEvent, SystemEventKind,
};
