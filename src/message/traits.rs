//! Message priority/lane classification.
//!
//! The runtime dispatches messages into one of four FIFO lanes based on a
//! string prefix on the message's `message_type` (§3, §6). Lane selection is
//! a pure function of the type string — there is no per-message-kind trait
//! to implement, since message types are resolved at runtime rather than at
//! compile time.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// Reserved prefix: types under this prefix are system-lane messages.
pub const SYSTEM_PREFIX: &str = "$system.";

/// Reserved prefix: types under this prefix go to the high-priority lane.
pub const PRIORITY_HIGH_PREFIX: &str = "$priority.high";

/// Reserved prefix: types under this prefix go to the low-priority lane.
pub const PRIORITY_LOW_PREFIX: &str = "$priority.low";

/// Sentinel message type posted on the system lane that seals a mailbox.
pub const ERROR_SENTINEL_TYPE: &str = "error";

/// Which mailbox lane a message belongs to.
///
/// Drain order is always `System > High > Normal > Low` (§4.1). System
/// messages additionally preempt at the next drain boundary regardless of
/// where the dispatcher currently is within the user lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageLane {
    /// User-visible low-priority lane (lowest of the user lanes).
    Low = 0,
    /// Default lane for ordinary user messages.
    Normal = 1,
    /// User-visible high-priority lane.
    High = 2,
    /// Reserved lane for `$system.` control traffic; always drained first.
    System = 3,
}

impl MessageLane {
    /// `true` for the system lane.
    pub fn is_system(self) -> bool {
        matches!(self, Self::System)
    }
}

/// Classify a message type string into its target lane.
///
/// `$system.` takes precedence over the priority prefixes since a system
/// message cannot simultaneously be a user-lane message. The bare `error`
/// sentinel (§3 "Posting a `type == 'error'` system message is a sentinel")
/// is also a system-lane message even though it carries no `$system.`
/// prefix, so a caller routing purely on `classify_lane`/`Message::lane`
/// (e.g. `System::send`) still delivers it to `post_system` rather than
/// silently queueing it as ordinary user traffic. Anything else without a
/// recognized prefix lands in the normal lane.
///
/// # Example
/// ```rust
/// use fluxrt::message::{classify_lane, MessageLane};
///
/// assert_eq!(classify_lane("$system.ping"), MessageLane::System);
/// assert_eq!(classify_lane("error"), MessageLane::System);
/// assert_eq!(classify_lane("$priority.high.urgent"), MessageLane::High);
/// assert_eq!(classify_lane("$priority.low.cleanup"), MessageLane::Low);
/// assert_eq!(classify_lane("order.created"), MessageLane::Normal);
/// ```
pub fn classify_lane(message_type: &str) -> MessageLane {
    if message_type.starts_with(SYSTEM_PREFIX) || is_error_sentinel(message_type) {
        MessageLane::System
    } else if message_type.starts_with(PRIORITY_HIGH_PREFIX) {
        MessageLane::High
    } else if message_type.starts_with(PRIORITY_LOW_PREFIX) {
        MessageLane::Low
    } else {
        MessageLane::Normal
    }
}

/// `true` when `message_type` is the system-lane sentinel that seals a
/// mailbox (§3, §4.1): a `$system.` message whose tail is exactly `error`.
///
/// # Example
/// ```rust
/// use fluxrt::message::is_error_sentinel;
///
/// assert!(is_error_sentinel("error"));
/// assert!(!is_error_sentinel("$system.ping"));
/// assert!(!is_error_sentinel("errors"));
/// ```
pub fn is_error_sentinel(message_type: &str) -> bool {
    message_type == ERROR_SENTINEL_TYPE
}
