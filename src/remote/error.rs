//! Errors surfaced by the remote transport (spec C9, §4.7).

use thiserror::Error;

/// Failure modes for dialing a peer node or driving an RPC against it.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The underlying gRPC channel could not be established.
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The peer returned a gRPC status for an otherwise well-formed call.
    #[error("rpc failed: {0}")]
    Status(#[from] tonic::Status),

    /// A message payload could not be encoded or decoded as JSON.
    #[error("payload codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The peer's response carried `success: false`.
    #[error("remote call rejected: {0}")]
    Rejected(String),
}
