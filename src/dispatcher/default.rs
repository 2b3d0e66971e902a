//! The default dispatcher: runs each task immediately, no throughput cap.

use async_trait::async_trait;

use super::traits::{DispatchTask, Dispatcher};

/// Runs submitted tasks to completion immediately, one at a time, in the
/// order they were admitted (spec §4.2 "Default").
///
/// This is the uncapped variant spec §4.2 describes as "Default"; it is not
/// what `System::spawn` hands an actor when `Props` leaves `dispatcher`
/// unset — that falls back to a [`crate::dispatcher::ThroughputDispatcher`]
/// built from `SystemConfig::default_max_per_second`/`default_batch_size`
/// (see `System::spawn_with_parent`), so that one runaway actor can't starve
/// the rest of a shared system. Pass `Props::with_dispatcher(Arc::new(
/// DefaultDispatcher::new()))` explicitly to opt an actor out of the cap.
/// Because `schedule` itself runs inside a dedicated tokio task spawned by
/// the mailbox (see [`crate::mailbox::LaneMailbox`]), awaiting the task here
/// does not block any other actor's dispatch.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDispatcher;

impl DefaultDispatcher {
    /// Construct the default dispatcher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Dispatcher for DefaultDispatcher {
    async fn schedule(&self, task: DispatchTask) {
        task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn runs_task_to_completion() {
        let dispatcher = DefaultDispatcher::new();
        let ran = Arc::new(AtomicBool::new(false));
        let ran2 = ran.clone();
        dispatcher
            .schedule(Box::pin(async move {
                ran2.store(true, Ordering::SeqCst);
            }))
            .await;
        assert!(ran.load(Ordering::SeqCst));
    }
}
