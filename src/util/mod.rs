//! Utility types and helpers for the actor system

pub mod ids;
pub mod serde_helpers;

pub use ids::{Address, ActorId, ChildId, MessageId, NodeAddress};
pub use serde_helpers::duration_serde;
