//! The `Dispatcher` contract: a cooperative task pump that drains mailboxes.
//!
//! A dispatcher does not own a thread of its own (spec §4.2); it accepts
//! boxed futures and decides when they run. Tasks submitted to one
//! dispatcher instance run in FIFO submission order; multiple mailboxes may
//! share a single dispatcher.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

/// A unit of work submitted to a [`Dispatcher`]: almost always a mailbox
/// drain, but the trait itself is agnostic to what it runs.
pub type DispatchTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Cooperative task pump feeding mailbox drains (spec C3, §4.2).
///
/// Implementations: [`crate::dispatcher::DefaultDispatcher`] (runs
/// immediately) and [`crate::dispatcher::ThroughputDispatcher`] (token-bucket
/// limited). The core does not mandate a single dispatcher policy — it only
/// promises that a given actor's handlers run serially (spec §4.2, §5),
/// which the mailbox's own `processing` latch already guarantees regardless
/// of dispatcher choice.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Submit a task for execution. Returns once the task has been admitted
    /// (not necessarily completed — a throughput-limited dispatcher may run
    /// it later).
    async fn schedule(&self, task: DispatchTask);
}
