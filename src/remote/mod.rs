//! Remote transport (spec C9, §4.7): a streaming gRPC service that lets one
//! node's [`crate::system::System`] `send`/`spawn`/`stop`/`watch` actors
//! living on another node.
//!
//! Grounded on the teacher's own `Cargo.toml`, which already earmarks
//! `tonic`/`prost` for "Remote transport: stream RPC" and `dashmap` for a
//! "remote-clients map" — this module is the thing those comments were
//! written for. The generated bindings are staged the way
//! `airssys-wasm/build.rs` stages its WIT bindings: codegen in `build.rs`,
//! `include!`d rather than checked in (see [`proto`]).
//!
//! [`RemoteClient`] is the outbound half, cached per-node by `System`;
//! [`RemoteTransportService`] is the inbound half, started by
//! `System::start_remote` when `SystemConfig::remote_bind_address` is set.

mod client;
mod error;
mod proto;
mod server;

pub use client::{RemoteClient, WatchEventStream};
pub use error::RemoteError;
pub use proto::{ActorLifecycleEvent, LifecycleEventType};
pub use server::RemoteTransportService;
