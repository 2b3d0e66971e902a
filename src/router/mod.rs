//! Router (spec C8, §4.6): an ordinary actor that forwards the messages it
//! receives to a set of routees instead of handling them itself.
//!
//! A router carries no handler logic of its own — its `receive` decides
//! only where a message goes, per [`RouterKind`]:
//!
//! - [`RouterKind::RoundRobin`] — one routee per message, cycling in order.
//! - [`RouterKind::Broadcast`] — every routee, independently.
//!
//! Two control message types manage the routee set at runtime: sending
//! [`ADD_ROUTEE`] invokes the router's configured routee-factory and spawns
//! the result as a new child; [`REMOVE_ROUTEE`] detaches a routee (named by
//! address in the payload) from the forwarding set without stopping it —
//! grounded on the teacher's `supervisor::strategy` idiom of a small
//! enum-of-strategies the actor applies rather than a full sub-tree of
//! router types, and its `broker::registry` pool of selectable targets.

mod router_actor;

pub use router_actor::{Router, RouterKind, ADD_ROUTEE, REMOVE_ROUTEE};
