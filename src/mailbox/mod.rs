//! Mailbox: per-actor message queue with lane partitioning, suspension and
//! error sealing (spec C2, §4.1).
//!
//! Two lane layouts share one implementation, [`LaneMailbox`]:
//!
//! - [`MailboxKind::Default`] — system lane + one collapsed user lane.
//! - [`MailboxKind::Priority`] — system lane + high/normal/low user lanes.
//!
//! Draining is cooperative: a mailbox schedules itself onto whatever
//! [`crate::dispatcher::Dispatcher`] it was bound to, and guarantees at most
//! one drain in flight at a time via an internal latch (spec §4.1).

pub mod error;
pub mod lane;
pub mod lane_mailbox;
pub mod traits;

pub use error::MailboxError;
pub use lane::DEFAULT_LANE_CAPACITY;
pub use lane_mailbox::LaneMailbox;
pub use traits::{InvokeError, Invoker, Mailbox, MailboxKind, MailboxSnapshot};
