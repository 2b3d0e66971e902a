// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Layer 3: Internal module imports
use super::traits::{classify_lane, is_error_sentinel, MessageLane};
use crate::util::ids::{Address, MessageId};

/// A runtime message: `{ type, payload, sender }` (§3).
///
/// Unlike the teacher's compile-time `Message` trait, actor message types
/// here are resolved at runtime — a single actor can receive any number of
/// distinct `message_type` strings over its lifetime, and lane routing is a
/// pure function of that string (see [`classify_lane`]). This is a
/// deliberate, spec-driven departure: the runtime's value is in dynamic
/// `become`/behavior-name dispatch, which is incompatible with a
/// per-message-kind compile-time constant.
///
/// Messages are conceptually immutable once posted; the payload is an
/// opaque structured value carried as `serde_json::Value` so it can cross
/// the remote transport (§4.7) without the sender and receiver sharing a
/// Rust type.
///
/// # Example
/// ```rust
/// use fluxrt::message::Message;
/// use fluxrt::util::Address;
///
/// let msg = Message::new("order.created", serde_json::json!({ "id": 42 }))
///     .with_sender(Address::local("order-service"));
///
/// assert_eq!(msg.message_type(), "order.created");
/// assert!(msg.sender().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    message_type: String,
    payload: Value,
    sender: Option<Address>,
}

impl Message {
    /// Construct a message with the given type discriminator and payload.
    pub fn new(message_type: impl Into<String>, payload: Value) -> Self {
        Self {
            message_type: message_type.into(),
            payload,
            sender: None,
        }
    }

    /// Builder method: attach a sender address.
    pub fn with_sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    /// The `$system.error` sentinel that seals a mailbox (§3, §4.1).
    pub fn error_sentinel() -> Self {
        Self::new(super::traits::ERROR_SENTINEL_TYPE, Value::Null)
    }

    /// Construct a `$system.`-prefixed control message.
    pub fn system(suffix: impl AsRef<str>, payload: Value) -> Self {
        Self::new(format!("{}{}", super::traits::SYSTEM_PREFIX, suffix.as_ref()), payload)
    }

    /// The type discriminator.
    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    /// The opaque structured payload.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// The sender address, if one was attached.
    pub fn sender(&self) -> Option<&Address> {
        self.sender.as_ref()
    }

    /// Which mailbox lane this message routes to.
    pub fn lane(&self) -> MessageLane {
        classify_lane(&self.message_type)
    }

    /// `true` when this message is the mailbox-sealing error sentinel.
    pub fn is_error_sentinel(&self) -> bool {
        is_error_sentinel(&self.message_type)
    }
}

/// Mailbox-internal wrapper that adds delivery metadata around a [`Message`].
///
/// The envelope is what actually travels through lanes and dispatcher
/// queues; the bare `Message` is what an actor's behavior handler receives.
/// Keeping the two separate lets the mailbox attach id/timestamp bookkeeping
/// without polluting the wire-visible message shape.
///
/// # Example
/// ```rust
/// use fluxrt::message::{Message, MessageEnvelope};
///
/// let envelope = MessageEnvelope::new(Message::new("ping", serde_json::Value::Null));
/// assert_eq!(envelope.message.message_type(), "ping");
/// assert!(!envelope.is_expired());
/// ```
#[derive(Debug, Clone)]
pub struct MessageEnvelope {
    /// Unique id for metrics/dead-letter correlation.
    pub id: MessageId,

    /// The wrapped message.
    pub message: Message,

    /// Envelope creation timestamp (§3.2 chrono standard).
    pub timestamp: DateTime<Utc>,

    /// Optional time-to-live in seconds; expired envelopes are still
    /// delivered (the core does not cancel in-flight delivery, §5) but
    /// `is_expired` lets a handler or request/response helper opt out.
    pub ttl: Option<u64>,
}

impl MessageEnvelope {
    /// Wrap a message with fresh delivery metadata.
    pub fn new(message: Message) -> Self {
        Self {
            id: MessageId::new(),
            message,
            timestamp: Utc::now(), // §3.2 chrono standard
            ttl: None,
        }
    }

    /// Builder method: attach a time-to-live in seconds.
    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl = Some(ttl_seconds);
        self
    }

    /// `true` once `ttl` seconds have elapsed since enqueue.
    pub fn is_expired(&self) -> bool {
        if let Some(ttl) = self.ttl {
            let age = Utc::now()
                .signed_duration_since(self.timestamp)
                .num_seconds() as u64;
            age > ttl
        } else {
            false
        }
    }

    /// Which mailbox lane this envelope routes to.
    pub fn lane(&self) -> MessageLane {
        self.message.lane()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_new_and_accessors() {
        let msg = Message::new("order.created", serde_json::json!({ "id": 1 }));
        assert_eq!(msg.message_type(), "order.created");
        assert_eq!(msg.payload(), &serde_json::json!({ "id": 1 }));
        assert!(msg.sender().is_none());
    }

    #[test]
    fn test_message_with_sender() {
        let sender = Address::local("svc");
        let msg = Message::new("ping", Value::Null).with_sender(sender.clone());
        assert_eq!(msg.sender(), Some(&sender));
    }

    #[test]
    fn test_message_error_sentinel() {
        let msg = Message::error_sentinel();
        assert!(msg.is_error_sentinel());
        assert_eq!(msg.lane(), MessageLane::System);
    }

    #[test]
    fn test_message_system_prefix() {
        let msg = Message::system("ping", Value::Null);
        assert_eq!(msg.message_type(), "$system.ping");
        assert_eq!(msg.lane(), MessageLane::System);
    }

    #[test]
    fn test_message_lane_classification() {
        let high = Message::new("$priority.high.urgent", Value::Null);
        let low = Message::new("$priority.low.cleanup", Value::Null);
        let normal = Message::new("order.created", Value::Null);
        assert_eq!(high.lane(), MessageLane::High);
        assert_eq!(low.lane(), MessageLane::Low);
        assert_eq!(normal.lane(), MessageLane::Normal);
    }

    #[test]
    fn test_envelope_creation() {
        let envelope = MessageEnvelope::new(Message::new("test", Value::Null));
        assert_eq!(envelope.message.message_type(), "test");
        assert!(envelope.ttl.is_none());
        assert!(!envelope.is_expired());
    }

    #[test]
    fn test_envelope_ttl_not_expired() {
        let envelope = MessageEnvelope::new(Message::new("test", Value::Null)).with_ttl(60);
        assert!(!envelope.is_expired());
    }

    #[test]
    fn test_envelope_ttl_expired() {
        let mut envelope = MessageEnvelope::new(Message::new("test", Value::Null)).with_ttl(1);
        envelope.timestamp = Utc::now() - chrono::Duration::seconds(5);
        assert!(envelope.is_expired());
    }

    #[test]
    fn test_envelope_no_ttl_never_expires() {
        let mut envelope = MessageEnvelope::new(Message::new("test", Value::Null));
        envelope.timestamp = Utc::now() - chrono::Duration::seconds(1000);
        assert!(!envelope.is_expired());
    }

    #[test]
    fn test_envelope_lane_delegates_to_message() {
        let envelope = MessageEnvelope::new(Message::system("ping", Value::Null));
        assert_eq!(envelope.lane(), MessageLane::System);
    }

    #[test]
    fn test_envelope_unique_ids() {
        let e1 = MessageEnvelope::new(Message::new("a", Value::Null));
        let e2 = MessageEnvelope::new(Message::new("a", Value::Null));
        assert_ne!(e1.id, e2.id);
    }
}
