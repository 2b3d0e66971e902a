//! [`LaneMailbox`]: the one concrete `Mailbox` implementation, parameterized
//! by [`MailboxKind`] rather than duplicated per kind (spec §4.1: "Both
//! implement the same contract; the choice is a per-actor Props option").

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::error::MailboxError;
use super::lane::{Lane, DEFAULT_LANE_CAPACITY};
use super::traits::{Invoker, Mailbox, MailboxKind, MailboxSnapshot};
use crate::dispatcher::Dispatcher;
use crate::message::{classify_lane, is_error_sentinel, Message, MessageLane};

struct Bindings {
    invoker: Option<Arc<dyn Invoker>>,
    dispatcher: Option<Arc<dyn Dispatcher>>,
}

/// Concrete mailbox: a system lane plus either one collapsed user lane
/// ([`MailboxKind::Default`]) or three priority user lanes
/// ([`MailboxKind::Priority`]).
///
/// Self-referential via `Weak<Self>` so that `post_system`/`post_user` can
/// schedule their own drain without requiring callers to hand back an `Arc`
/// (spec §4.1: posting "never blocks the caller" and "requests a drain" on
/// its own).
pub struct LaneMailbox {
    kind: MailboxKind,
    system: Lane,
    high: Lane,
    normal: Lane,
    low: Lane,
    started: AtomicBool,
    suspended: AtomicBool,
    sealed: AtomicBool,
    processing: AtomicBool,
    bindings: RwLock<Bindings>,
    weak_self: Weak<LaneMailbox>,
}

impl LaneMailbox {
    /// Construct a mailbox of the given kind with the default per-lane
    /// capacity (10,000, spec §3).
    pub fn new(kind: MailboxKind) -> Arc<Self> {
        Self::with_capacity(kind, DEFAULT_LANE_CAPACITY)
    }

    /// Construct a mailbox with an explicit per-lane capacity.
    pub fn with_capacity(kind: MailboxKind, capacity: usize) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            kind,
            system: Lane::new(capacity),
            high: Lane::new(capacity),
            normal: Lane::new(capacity),
            low: Lane::new(capacity),
            started: AtomicBool::new(false),
            suspended: AtomicBool::new(false),
            sealed: AtomicBool::new(false),
            processing: AtomicBool::new(false),
            bindings: RwLock::new(Bindings {
                invoker: None,
                dispatcher: None,
            }),
            weak_self: weak.clone(),
        })
    }

    /// Convenience constructor: a two-lane `Default` mailbox.
    pub fn default_mailbox() -> Arc<Self> {
        Self::new(MailboxKind::Default)
    }

    /// Convenience constructor: a four-lane `Priority` mailbox.
    pub fn priority_mailbox() -> Arc<Self> {
        Self::new(MailboxKind::Priority)
    }

    fn lane_for_user(&self, lane: MessageLane) -> &Lane {
        if self.kind == MailboxKind::Default {
            return &self.normal;
        }
        match lane {
            MessageLane::High => &self.high,
            MessageLane::Normal => &self.normal,
            MessageLane::Low => &self.low,
            MessageLane::System => &self.system,
        }
    }

    fn seal(&self) {
        self.system.clear();
        self.high.clear();
        self.normal.clear();
        self.low.clear();
        self.sealed.store(true, Ordering::SeqCst);
        self.suspended.store(true, Ordering::SeqCst);
    }

    /// Try to become the sole scheduler of a drain. Returns `true` if this
    /// call won the race and should arrange one.
    fn try_begin_drain(&self) -> bool {
        self.started.load(Ordering::SeqCst)
            && !self.suspended.load(Ordering::SeqCst)
            && !self.processing.swap(true, Ordering::AcqRel)
    }

    fn request_drain(&self) {
        if !self.try_begin_drain() {
            return;
        }
        let Some(strong) = self.weak_self.upgrade() else {
            return;
        };
        let dispatcher = self.bindings.read().dispatcher.clone();
        tokio::spawn(async move {
            let Some(dispatcher) = dispatcher else {
                strong.processing.store(false, Ordering::SeqCst);
                return;
            };
            let drain_target = strong.clone();
            dispatcher
                .schedule(Box::pin(async move {
                    drain_target.drain_loop().await;
                }))
                .await;
        });
    }

    /// Drain every open lane, highest priority first, rechecking the system
    /// lane between every single delivery (spec §4.1 step 3).
    async fn drain_loop(self: Arc<Self>) {
        loop {
            if self.sealed.load(Ordering::SeqCst) || self.suspended.load(Ordering::SeqCst) {
                self.processing.store(false, Ordering::SeqCst);
                return;
            }

            let Some((lane, message)) = self.pop_next() else {
                // Nothing left right now. Clear the latch, then re-check:
                // a concurrent post may have raced us between the pop
                // check and the flag clear.
                self.processing.store(false, Ordering::SeqCst);
                if self.pop_would_find_message() && self.try_begin_drain() {
                    continue;
                }
                return;
            };

            let invoker = self.bindings.read().invoker.clone();
            let Some(invoker) = invoker else {
                // No invoker bound: drop on the floor rather than spin.
                continue;
            };

            let result = if lane == MessageLane::System {
                invoker.invoke_system(message).await
            } else {
                invoker.invoke_user(message).await
            };

            if result.is_err() {
                self.seal();
                self.processing.store(false, Ordering::SeqCst);
                return;
            }
        }
    }

    fn pop_would_find_message(&self) -> bool {
        !self.system.is_empty() || !self.high.is_empty() || !self.normal.is_empty() || !self.low.is_empty()
    }

    /// Pop the next message in drain order: system, then (for `Priority`)
    /// high, normal, low; for `Default`, system then the single user lane.
    fn pop_next(&self) -> Option<(MessageLane, Message)> {
        if let Some(m) = self.system.pop() {
            return Some((MessageLane::System, m));
        }
        if self.kind == MailboxKind::Priority {
            if let Some(m) = self.high.pop() {
                return Some((MessageLane::High, m));
            }
        }
        if let Some(m) = self.normal.pop() {
            return Some((MessageLane::Normal, m));
        }
        if self.kind == MailboxKind::Priority {
            if let Some(m) = self.low.pop() {
                return Some((MessageLane::Low, m));
            }
        }
        None
    }
}

impl Mailbox for LaneMailbox {
    fn kind(&self) -> MailboxKind {
        self.kind
    }

    fn bind(&self, invoker: Arc<dyn Invoker>, dispatcher: Arc<dyn Dispatcher>) {
        let mut bindings = self.bindings.write();
        bindings.invoker = Some(invoker);
        bindings.dispatcher = Some(dispatcher);
    }

    fn start(&self) {
        self.started.store(true, Ordering::SeqCst);
        if !self.sealed.load(Ordering::SeqCst) {
            self.request_drain();
        }
    }

    fn suspend(&self) {
        self.suspended.store(true, Ordering::SeqCst);
    }

    fn resume(&self) {
        if self.sealed.load(Ordering::SeqCst) {
            return;
        }
        self.suspended.store(false, Ordering::SeqCst);
        self.request_drain();
    }

    fn reopen(&self) {
        self.sealed.store(false, Ordering::SeqCst);
        self.suspended.store(false, Ordering::SeqCst);
        if self.started.load(Ordering::SeqCst) {
            self.request_drain();
        }
    }

    fn post_system(&self, message: Message) -> Result<(), MailboxError> {
        if is_error_sentinel(message.message_type()) {
            // Idempotent: sealing an already-sealed mailbox is a no-op.
            if !self.sealed.load(Ordering::SeqCst) {
                self.seal();
            }
            return Ok(());
        }
        if self.sealed.load(Ordering::SeqCst) {
            return Err(MailboxError::Sealed);
        }
        self.system.push(message)?;
        if self.started.load(Ordering::SeqCst) && !self.suspended.load(Ordering::SeqCst) {
            self.request_drain();
        }
        Ok(())
    }

    fn post_user(&self, message: Message) -> Result<(), MailboxError> {
        if self.sealed.load(Ordering::SeqCst) || self.suspended.load(Ordering::SeqCst) {
            return Err(MailboxError::Sealed);
        }
        let lane = classify_lane(message.message_type());
        self.lane_for_user(lane).push(message)?;
        self.request_drain();
        Ok(())
    }

    fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::SeqCst)
    }

    fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> MailboxSnapshot {
        MailboxSnapshot {
            sealed: self.sealed.load(Ordering::SeqCst),
            suspended: self.suspended.load(Ordering::SeqCst),
            started: self.started.load(Ordering::SeqCst),
            system_len: self.system.len(),
            high_len: self.high.len(),
            normal_len: self.normal.len(),
            low_len: self.low.len(),
        }
    }
}
