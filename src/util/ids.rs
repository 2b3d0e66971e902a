// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

/// Unique identifier for actors in the system
///
/// # Performance
/// Uses UUID v4 for globally unique identifiers with excellent collision resistance.
/// Implements cheap cloning via Copy trait.
///
/// # Example
/// ```rust
/// use fluxrt::util::ActorId;
///
/// let id1 = ActorId::new();
/// let id2 = ActorId::new();
/// assert_ne!(id1, id2); // Globally unique
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Generate a new random ActorId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create ActorId from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for messages in the system
///
/// # Example
/// ```rust
/// use fluxrt::util::MessageId;
///
/// let id = MessageId::new();
/// println!("Message ID: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generate a new random MessageId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create MessageId from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for supervised children.
///
/// Kept distinct from `ActorId` so a `ChildSpec`'s supervision identity
/// survives a restart even though the restarted actor gets a fresh `ActorId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChildId(Uuid);

impl ChildId {
    /// Generate a new random ChildId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChildId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node's network address, as used by remote transport.
///
/// Opaque as far as the core runtime is concerned; the remote module
/// interprets it as a `host:port` pair for the gRPC transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress(String);

impl NodeAddress {
    /// Wrap a raw node address string, e.g. `"127.0.0.1:7787"`.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeAddress {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for NodeAddress {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Actor address (PID) for message routing.
///
/// # Design
/// An address is an opaque id, optionally tagged with the node it lives on.
/// Addresses are plain values: freely copied, never implying ownership of the
/// actor they name. Sending to an address whose id is not registered locally
/// is not an error — the message becomes a dead letter.
///
/// # Example
/// ```rust
/// use fluxrt::util::Address;
///
/// let local = Address::local("worker-1");
/// assert!(local.is_local());
///
/// let remote = Address::remote("worker-1", "10.0.0.2:7787");
/// assert!(!remote.is_local());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    id: String,
    node: Option<NodeAddress>,
}

impl Address {
    /// Create a local address from an explicit id string.
    pub fn local(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node: None,
        }
    }

    /// Create a local address with a freshly generated unique id.
    pub fn new_local() -> Self {
        Self::local(ActorId::new().to_string())
    }

    /// Create an address tagged with a remote node.
    pub fn remote(id: impl Into<String>, node: impl Into<NodeAddress>) -> Self {
        Self {
            id: id.into(),
            node: Some(node.into()),
        }
    }

    /// The opaque id component.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The node this address is tagged with, if any.
    pub fn node(&self) -> Option<&NodeAddress> {
        self.node.as_ref()
    }

    /// `true` when this address names an actor on the local process.
    pub fn is_local(&self) -> bool {
        self.node.is_none()
    }

    /// Return a copy of this address re-tagged with `node`. Used by the
    /// remote client to stamp an outgoing sender address with the local
    /// node, so the remote side can route a reply back over the transport.
    pub fn with_node(&self, node: impl Into<NodeAddress>) -> Self {
        Self {
            id: self.id.clone(),
            node: Some(node.into()),
        }
    }

    /// Parse the `Display` format (`"id@node"` or bare `"id"`) back into an
    /// `Address`. The remote transport's wire schema carries a sender only as
    /// a single id string (spec §4.7); encoding the node into that string is
    /// how a reply can still be routed back across a `SendMessage` call.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('@') {
            Some((id, node)) => Self::remote(id, node),
            None => Self::local(raw),
        }
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Some(node) => write!(f, "{}@{}", self.id, node),
            None => write!(f, "{}", self.id),
        }
    }
}
