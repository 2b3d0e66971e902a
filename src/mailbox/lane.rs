//! Bounded FIFO ring buffer backing a single mailbox lane.

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::error::MailboxError;
use crate::message::Message;

/// Default per-lane capacity (spec §3): 10,000 messages.
pub const DEFAULT_LANE_CAPACITY: usize = 10_000;

/// A single FIFO lane with a fixed capacity.
///
/// Touched from two sides: any caller's `push` on the enqueue side, and the
/// single dispatcher drain task's `pop` on the dequeue side (spec §5). A
/// `parking_lot::Mutex` is sufficient since neither side ever holds the lock
/// across an `.await`.
#[derive(Debug)]
pub(crate) struct Lane {
    capacity: usize,
    queue: Mutex<VecDeque<Message>>,
}

impl Lane {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: Mutex::new(VecDeque::with_capacity(capacity.min(64))),
        }
    }

    /// Tail-drop on a full lane (spec §4.1).
    pub(crate) fn push(&self, message: Message) -> Result<(), MailboxError> {
        let mut queue = self.queue.lock();
        if queue.len() >= self.capacity {
            return Err(MailboxError::Full);
        }
        queue.push_back(message);
        Ok(())
    }

    pub(crate) fn pop(&self) -> Option<Message> {
        self.queue.lock().pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    pub(crate) fn clear(&self) {
        self.queue.lock().clear();
    }
}
