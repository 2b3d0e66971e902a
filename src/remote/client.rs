//! Outbound half of the remote transport: a cheap-to-clone handle to one
//! peer node, used by [`crate::system::System`] to forward `send`/`spawn`/
//! `stop`/`watch` calls across the wire (spec §4.7).

use std::pin::Pin;

use tokio_stream::{Stream, StreamExt};
use tonic::transport::{Channel, Endpoint};

use crate::mailbox::MailboxKind;
use crate::message::Message;
use crate::remote::error::RemoteError;
use crate::remote::proto::actor_transport_client::ActorTransportClient;
use crate::remote::proto::{
    ActorLifecycleEvent, SendMessageRequest, SpawnActorRequest, StopActorRequest,
    WatchActorRequest,
};
use crate::util::{Address, NodeAddress};

/// A stream of lifecycle events for an actor being watched on a remote node.
pub type WatchEventStream = Pin<Box<dyn Stream<Item = Result<ActorLifecycleEvent, RemoteError>> + Send>>;

/// Connection to one remote node's [`ActorTransport`](super::proto::actor_transport_server::ActorTransport)
/// service. Wraps the generated tonic client, which is itself a thin,
/// cheaply-`Clone`-able handle over an HTTP/2 `Channel` — mirrors how
/// `RemoteClient` is cached per-node by the system rather than reconnected
/// on every call.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    inner: ActorTransportClient<Channel>,
}

impl RemoteClient {
    /// Dial `node` and return a client ready to issue calls. Connection is
    /// lazy from the caller's point of view but eager here: by the time this
    /// returns, the HTTP/2 handshake has completed.
    pub async fn connect(node: &NodeAddress) -> Result<Self, RemoteError> {
        let endpoint = Endpoint::from_shared(format!("http://{}", node.as_str()))?;
        let channel = endpoint.connect().await?;
        Ok(Self {
            inner: ActorTransportClient::new(channel),
        })
    }

    /// Deliver `message` to `target` on this node.
    pub async fn send_message(&self, target: &Address, message: &Message) -> Result<(), RemoteError> {
        let payload_bytes = serde_json::to_vec(message.payload())?;
        let request = SendMessageRequest {
            target_id: target.id().to_string(),
            message_type: message.message_type().to_string(),
            payload_bytes,
            sender_id: message.sender().map(|addr| addr.to_string()),
        };
        let response = self.inner.clone().send_message(request).await?.into_inner();
        if response.success {
            Ok(())
        } else {
            Err(RemoteError::Rejected(response.error.unwrap_or_default()))
        }
    }

    /// Ask this node to spawn a registered actor class, returning the new
    /// actor's local address tagged with this node.
    pub async fn spawn_actor(
        &self,
        node: &NodeAddress,
        actor_class_name: &str,
        mailbox_kind: Option<MailboxKind>,
    ) -> Result<Address, RemoteError> {
        let request = SpawnActorRequest {
            actor_class_name: actor_class_name.to_string(),
            init_payload: None,
            mailbox_type: mailbox_kind.map(|kind| match kind {
                MailboxKind::Default => "default".to_string(),
                MailboxKind::Priority => "priority".to_string(),
            }),
        };
        let response = self.inner.clone().spawn_actor(request).await?.into_inner();
        if response.success {
            Ok(Address::remote(response.actor_id, node.clone()))
        } else {
            Err(RemoteError::Rejected(response.error.unwrap_or_default()))
        }
    }

    /// Ask this node to stop `target`. Idempotent: stopping an already-
    /// stopped or unknown actor still reports success.
    pub async fn stop_actor(&self, target: &Address) -> Result<(), RemoteError> {
        let request = StopActorRequest {
            actor_id: target.id().to_string(),
        };
        let response = self.inner.clone().stop_actor(request).await?.into_inner();
        if response.success {
            Ok(())
        } else {
            Err(RemoteError::Rejected(response.error.unwrap_or_default()))
        }
    }

    /// Subscribe to lifecycle events for `target` until the returned stream
    /// is dropped or the server ends it.
    pub async fn watch_actor(
        &self,
        target: &Address,
        watcher_id: impl Into<String>,
    ) -> Result<WatchEventStream, RemoteError> {
        let request = WatchActorRequest {
            actor_id: target.id().to_string(),
            watcher_id: watcher_id.into(),
        };
        let stream = self.inner.clone().watch_actor(request).await?.into_inner();
        Ok(Box::pin(stream.map(|item| item.map_err(RemoteError::from))))
    }
}
