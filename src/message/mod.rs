//! Message system.
//!
//! Provides the runtime `Message` value type, its mailbox envelope wrapper,
//! and lane-classification for the priority mailbox. Message types are
//! resolved at runtime via string prefixes rather than compile-time
//! constants, since a single actor may handle any number of message types
//! and dynamic `become` needs a name to dispatch on.

pub mod envelope;
pub mod traits;

pub use envelope::{Message, MessageEnvelope};
pub use traits::{
    classify_lane, is_error_sentinel, MessageLane, ERROR_SENTINEL_TYPE, PRIORITY_HIGH_PREFIX,
    PRIORITY_LOW_PREFIX, SYSTEM_PREFIX,
};
