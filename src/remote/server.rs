//! Inbound half of the remote transport: a tonic service implementation
//! that turns wire calls into ordinary [`System`] operations on this node
//! (spec §4.7).

use std::pin::Pin;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;
use tonic::{Request, Response, Status};

use crate::actor::LifecyclePhase;
use crate::mailbox::MailboxKind;
use crate::message::Message;
use crate::monitoring::{InMemoryMonitor, Monitor, MonitoringConfig, RemoteEvent, RemoteEventKind};
use crate::remote::proto::actor_transport_server::{ActorTransport, ActorTransportServer};
use crate::remote::proto::{
    ActorLifecycleEvent, LifecycleEventType, SendMessageRequest, SendMessageResponse,
    SpawnActorRequest, SpawnActorResponse, StopActorRequest, StopActorResponse, WatchActorRequest,
};
use crate::system::{Props, System, SystemError};
use crate::util::Address;

/// How often [`RemoteTransportService::watch_actor`] polls lifecycle phase
/// for changes. The wire schema streams events rather than snapshots, but
/// `System` exposes phase as a point-in-time read, so the service samples it.
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Map a sampled lifecycle phase to the wire event it corresponds to, or
/// `None` for phases a watcher isn't told about (Created/Starting/
/// Restarting — transient states between the ones §4.7 documents).
fn phase_event(actor_id: &str, phase: Option<LifecyclePhase>) -> Option<ActorLifecycleEvent> {
    match phase {
        Some(LifecyclePhase::Running) => Some(ActorLifecycleEvent {
            actor_id: actor_id.to_string(),
            event_type: LifecycleEventType::Started as i32,
            error: None,
        }),
        Some(LifecyclePhase::Failed) => Some(ActorLifecycleEvent {
            actor_id: actor_id.to_string(),
            event_type: LifecycleEventType::Error as i32,
            error: Some("actor entered Failed phase".to_string()),
        }),
        Some(LifecyclePhase::Stopped) | None => Some(ActorLifecycleEvent {
            actor_id: actor_id.to_string(),
            event_type: LifecycleEventType::Stopped as i32,
            error: None,
        }),
        _ => None,
    }
}

/// Server-side implementation of `ActorTransport`, wrapping a [`System`]
/// handle. Cheap to clone: `System` itself is `Arc`-backed.
#[derive(Clone)]
pub struct RemoteTransportService {
    system: System,
    monitor: InMemoryMonitor<RemoteEvent>,
}

impl RemoteTransportService {
    /// Wrap `system` for serving over gRPC. Remote-event recording follows
    /// the system's own `enable_metrics` setting.
    pub fn new(system: System) -> Self {
        let config = MonitoringConfig {
            enabled: system.config().enable_metrics,
            ..MonitoringConfig::default()
        };
        Self {
            system,
            monitor: InMemoryMonitor::new(config),
        }
    }

    /// Wrap this service into a tonic service ready for `Server::add_service`.
    pub fn into_server(self) -> ActorTransportServer<Self> {
        ActorTransportServer::new(self)
    }

    async fn record(&self, peer: &str, event_kind: RemoteEventKind) {
        let _ = self
            .monitor
            .record(RemoteEvent {
                timestamp: chrono::Utc::now(),
                peer: peer.to_string(),
                event_kind,
            })
            .await;
    }
}

#[tonic::async_trait]
impl ActorTransport for RemoteTransportService {
    async fn send_message(
        &self,
        request: Request<SendMessageRequest>,
    ) -> Result<Response<SendMessageResponse>, Status> {
        let req = request.into_inner();
        self.record(&req.target_id, RemoteEventKind::SendMessage { target: req.target_id.clone() })
            .await;

        let payload = serde_json::from_slice(&req.payload_bytes).unwrap_or(serde_json::Value::Null);
        let mut message = Message::new(req.message_type, payload);
        if let Some(sender_id) = req.sender_id {
            message = message.with_sender(Address::parse(&sender_id));
        }

        let target = Address::local(req.target_id);
        match self.system.send(&target, message).await {
            Ok(()) => Ok(Response::new(SendMessageResponse { success: true, error: None })),
            Err(err) => Ok(Response::new(SendMessageResponse {
                success: false,
                error: Some(err.to_string()),
            })),
        }
    }

    async fn spawn_actor(
        &self,
        request: Request<SpawnActorRequest>,
    ) -> Result<Response<SpawnActorResponse>, Status> {
        let req = request.into_inner();
        self.record(
            &req.actor_class_name,
            RemoteEventKind::SpawnActor { actor_class: req.actor_class_name.clone() },
        )
        .await;

        let mut props = Props::from_class(req.actor_class_name);
        if let Some(kind) = req.mailbox_type.as_deref() {
            if kind.eq_ignore_ascii_case("priority") {
                props = props.with_mailbox_kind(MailboxKind::Priority);
            }
        }

        match self.system.spawn(props).await {
            Ok(address) => Ok(Response::new(SpawnActorResponse {
                success: true,
                actor_id: address.id().to_string(),
                error: None,
            })),
            Err(err) => Ok(Response::new(SpawnActorResponse {
                success: false,
                actor_id: String::new(),
                error: Some(err.to_string()),
            })),
        }
    }

    async fn stop_actor(
        &self,
        request: Request<StopActorRequest>,
    ) -> Result<Response<StopActorResponse>, Status> {
        let req = request.into_inner();
        self.record(&req.actor_id, RemoteEventKind::StopActor { target: req.actor_id.clone() })
            .await;

        let target = Address::local(req.actor_id);
        match self.system.stop(&target).await {
            Ok(()) => Ok(Response::new(StopActorResponse { success: true, error: None })),
            // Stopping an already-gone actor is not a failure: stop is idempotent.
            Err(SystemError::ActorNotFound(_)) => {
                Ok(Response::new(StopActorResponse { success: true, error: None }))
            }
            Err(err) => Ok(Response::new(StopActorResponse {
                success: false,
                error: Some(err.to_string()),
            })),
        }
    }

    type WatchActorStream = Pin<Box<dyn Stream<Item = Result<ActorLifecycleEvent, Status>> + Send>>;

    async fn watch_actor(
        &self,
        request: Request<WatchActorRequest>,
    ) -> Result<Response<Self::WatchActorStream>, Status> {
        let req = request.into_inner();
        self.record(&req.actor_id, RemoteEventKind::WatchStarted { target: req.actor_id.clone() })
            .await;

        let target = Address::local(req.actor_id.clone());
        let system = self.system.clone();
        let monitor = self.monitor.clone();
        let actor_id = req.actor_id;

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            // Spec S6: the watcher's first event reflects the actor's state
            // as of the watch call, not just future transitions — a watch
            // started against an already-running actor still gets STARTED.
            let mut last = system.lifecycle_phase(&target);
            if last.is_some() {
                if let Some(event) = phase_event(&actor_id, last) {
                    if tx.send(Ok(event)).await.is_err() {
                        return;
                    }
                }
            }
            loop {
                tokio::time::sleep(WATCH_POLL_INTERVAL).await;
                let current = system.lifecycle_phase(&target);
                if current == last {
                    if current.is_none() {
                        break;
                    }
                    continue;
                }
                last = current;

                let Some(event) = phase_event(&actor_id, current) else {
                    continue;
                };
                let terminal = matches!(current, Some(LifecyclePhase::Stopped) | None);
                if tx.send(Ok(event)).await.is_err() || terminal {
                    break;
                }
            }
            let _ = monitor
                .record(RemoteEvent {
                    timestamp: chrono::Utc::now(),
                    peer: actor_id.clone(),
                    event_kind: RemoteEventKind::WatchEnded { target: actor_id },
                })
                .await;
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, Behaviors, Context as ActorContext};
    use crate::system::{Props, SystemConfig};
    use async_trait::async_trait;
    use tokio_stream::StreamExt;

    struct Noop;

    #[async_trait]
    impl Actor for Noop {
        fn initialize_behaviors(&self, _behaviors: &mut Behaviors<Self>) {}

        async fn receive(&mut self, _message: Message, _ctx: &mut ActorContext) -> Result<(), crate::actor::ActorError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn send_to_registered_actor_reports_success() {
        let system = System::new(SystemConfig::default());
        let address = system.spawn(Props::from_producer(|| Noop)).await.expect("spawn");
        let service = RemoteTransportService::new(system);

        let response = service
            .send_message(Request::new(SendMessageRequest {
                target_id: address.id().to_string(),
                message_type: "ping".to_string(),
                payload_bytes: serde_json::to_vec(&serde_json::json!({})).expect("encode"),
                sender_id: None,
            }))
            .await
            .expect("rpc")
            .into_inner();

        assert!(response.success);
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn send_to_unknown_actor_reports_not_found() {
        let system = System::new(SystemConfig::default());
        let service = RemoteTransportService::new(system);

        let response = service
            .send_message(Request::new(SendMessageRequest {
                target_id: "nobody".to_string(),
                message_type: "ping".to_string(),
                payload_bytes: b"{}".to_vec(),
                sender_id: None,
            }))
            .await
            .expect("rpc")
            .into_inner();

        assert!(!response.success);
        assert!(response.error.is_some());
    }

    #[tokio::test]
    async fn stop_actor_is_idempotent() {
        let system = System::new(SystemConfig::default());
        let address = system.spawn(Props::from_producer(|| Noop)).await.expect("spawn");
        let service = RemoteTransportService::new(system);

        let first = service
            .stop_actor(Request::new(StopActorRequest { actor_id: address.id().to_string() }))
            .await
            .expect("rpc")
            .into_inner();
        assert!(first.success);

        let second = service
            .stop_actor(Request::new(StopActorRequest { actor_id: address.id().to_string() }))
            .await
            .expect("rpc")
            .into_inner();
        assert!(second.success);
    }

    #[tokio::test]
    async fn watch_actor_reports_started_immediately_for_a_running_actor() {
        let system = System::new(SystemConfig::default());
        let address = system.spawn(Props::from_producer(|| Noop)).await.expect("spawn");
        let service = RemoteTransportService::new(system);

        let mut stream = service
            .watch_actor(Request::new(WatchActorRequest {
                actor_id: address.id().to_string(),
                watcher_id: "w1".to_string(),
            }))
            .await
            .expect("rpc")
            .into_inner();

        let first = stream.next().await.expect("stream not empty").expect("event ok");
        assert_eq!(first.event_type, LifecycleEventType::Started as i32);
    }

    #[tokio::test]
    async fn watch_actor_reports_stopped_after_the_actor_stops() {
        let system = System::new(SystemConfig::default());
        let address = system.spawn(Props::from_producer(|| Noop)).await.expect("spawn");
        let service = RemoteTransportService::new(system.clone());

        let mut stream = service
            .watch_actor(Request::new(WatchActorRequest {
                actor_id: address.id().to_string(),
                watcher_id: "w1".to_string(),
            }))
            .await
            .expect("rpc")
            .into_inner();

        let started = stream.next().await.expect("stream not empty").expect("event ok");
        assert_eq!(started.event_type, LifecycleEventType::Started as i32);

        system.stop(&address).await.expect("stop");

        let stopped = stream.next().await.expect("stream not empty").expect("event ok");
        assert_eq!(stopped.event_type, LifecycleEventType::Stopped as i32);
    }
}
