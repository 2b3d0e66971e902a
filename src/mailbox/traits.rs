//! The `Mailbox` contract (spec §4.1) and the `Invoker` callback it drains into.

use async_trait::async_trait;

use super::error::MailboxError;
use crate::message::Message;

/// What a mailbox delivers into: the actor's receive entry point.
///
/// Implemented by [`crate::actor::ActorCell`]. A mailbox never inspects
/// message contents; it only knows how to hand a message to its invoker and
/// observe whether that delivery failed, which is what triggers sealing
/// (spec §4.1 step 2, §7 `HandlerFailure`).
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Deliver a system-lane message. Failure here is handled identically to
    /// a user-lane `HandlerFailure` (spec §4.1).
    async fn invoke_system(&self, message: Message) -> Result<(), InvokeError>;

    /// Deliver a user-lane message to the actor's current behavior.
    async fn invoke_user(&self, message: Message) -> Result<(), InvokeError>;
}

/// Opaque failure from a behavior handler or lifecycle hook, carrying enough
/// to let a supervisor inspect the cause (spec §4.3 step 2).
#[derive(Debug)]
pub struct InvokeError {
    /// Human-readable failure description.
    pub message: String,
}

impl InvokeError {
    /// Wrap any `std::error::Error` as an invocation failure.
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for InvokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InvokeError {}

/// Which lane layout a mailbox uses (spec §4.1 "Priority vs default").
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MailboxKind {
    /// Two lanes: system, user (priority prefixes are ignored).
    Default,
    /// Four lanes: system, high, normal, low.
    Priority,
}

/// A point-in-time, read-only view of mailbox state, for tests and metrics
/// (spec §4.1 "observable").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailboxSnapshot {
    /// `true` once sealed by an error sentinel or handler failure.
    pub sealed: bool,
    /// `true` when suspended (sealing implies suspension).
    pub suspended: bool,
    /// `true` once `start()` has been called.
    pub started: bool,
    /// Size of the system lane.
    pub system_len: usize,
    /// Size of the high-priority lane (0 for `Default` mailboxes).
    pub high_len: usize,
    /// Size of the normal/user lane.
    pub normal_len: usize,
    /// Size of the low-priority lane (0 for `Default` mailboxes).
    pub low_len: usize,
}

impl MailboxSnapshot {
    /// Total queued messages across all lanes.
    pub fn total_len(&self) -> usize {
        self.system_len + self.high_len + self.normal_len + self.low_len
    }
}

/// Per-actor message queue: system lane plus one-or-four user lanes,
/// suspension, and error sealing (spec C2, §4.1).
///
/// `post_system`/`post_user` never block the caller: they enqueue (or
/// silently drop, per spec §7) and, if the mailbox is open, arrange for a
/// drain without waiting for it. Draining itself happens on whatever
/// [`crate::dispatcher::Dispatcher`] was bound via `bind`.
pub trait Mailbox: Send + Sync {
    /// Which lane layout this mailbox uses.
    fn kind(&self) -> MailboxKind;

    /// Attach the invoker and dispatcher this mailbox drains into. Must be
    /// called before `start()`.
    fn bind(&self, invoker: std::sync::Arc<dyn Invoker>, dispatcher: std::sync::Arc<dyn crate::dispatcher::Dispatcher>);

    /// Begin accepting drains. Idempotent.
    fn start(&self);

    /// Stop draining without clearing queued messages (spec §4.1 control
    /// surface). A suspended-but-not-sealed mailbox resumes where it left
    /// off on `resume()`.
    fn suspend(&self);

    /// Resume draining after a `suspend()`. No-op if sealed.
    fn resume(&self);

    /// Clear `sealed`/`suspended` and resume draining (spec §4.5 `Resume`
    /// and `Restart` directives). Unlike `resume()`, this also lifts a
    /// seal — the lanes are already empty by the time sealing happened, so
    /// there is nothing left to replay; reopening just lets new posts in.
    fn reopen(&self);

    /// Enqueue a system-lane message. A `type == "error"` message is the
    /// sealing sentinel (spec §4.1): it clears all lanes and seals+suspends
    /// instead of being queued.
    fn post_system(&self, message: Message) -> Result<(), MailboxError>;

    /// Enqueue a user-lane message, classified into a lane by
    /// [`crate::message::classify_lane`] (ignored — collapsed to one lane —
    /// for [`MailboxKind::Default`]).
    fn post_user(&self, message: Message) -> Result<(), MailboxError>;

    /// `true` once sealed.
    fn is_sealed(&self) -> bool;

    /// `true` while suspended (sealing implies this).
    fn is_suspended(&self) -> bool;

    /// Point-in-time observable state.
    fn snapshot(&self) -> MailboxSnapshot;
}
