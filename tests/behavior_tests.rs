//! End-to-end "become" scenario (spec §8 S1): a behavior switch recorded
//! mid-handler takes effect starting with the next delivered message, and
//! queued messages already in flight are unaffected by a switch that
//! happens after they were dequeued.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use fluxrt::dispatcher::DefaultDispatcher;
use fluxrt::prelude::*;

struct TestActor {
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Actor for TestActor {
    fn initialize_behaviors(&self, behaviors: &mut Behaviors<Self>) {
        behaviors.add(DEFAULT_BEHAVIOR, |actor: &mut TestActor, message, ctx| {
            Box::pin(async move {
                match message.message_type() {
                    "change_behavior" => {
                        actor.log.lock().push("change_behavior".to_string());
                        ctx.become_("alternative");
                    }
                    other => {
                        actor.log.lock().push(other.to_string());
                    }
                }
                Ok(())
            })
        });
        behaviors.add("alternative", |actor: &mut TestActor, message, _ctx| {
            Box::pin(async move {
                actor.log.lock().push(format!("alternative_{}", message.message_type()));
                Ok(())
            })
        });
    }

    async fn receive(&mut self, _message: Message, _ctx: &mut Context) -> Result<(), ActorError> {
        Ok(())
    }
}

async fn settle() {
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn become_switches_behavior_starting_with_the_next_message() {
    let system = System::new(SystemConfig::default());
    let log = Arc::new(Mutex::new(Vec::new()));
    let address = system
        .spawn(Props::from_producer({
            let log = log.clone();
            move || TestActor { log: log.clone() }
        }))
        .await
        .expect("spawn");

    system
        .send(&address, Message::new("test1", serde_json::json!({})))
        .await
        .expect("send test1");
    system
        .send(&address, Message::new("change_behavior", serde_json::json!({})))
        .await
        .expect("send change_behavior");
    system
        .send(&address, Message::new("test2", serde_json::json!({})))
        .await
        .expect("send test2");

    settle().await;

    assert_eq!(
        *log.lock(),
        vec![
            "test1".to_string(),
            "change_behavior".to_string(),
            "alternative_test2".to_string(),
        ]
    );
}

#[tokio::test]
async fn become_does_not_affect_messages_already_queued_behind_it() {
    // Messages are processed one at a time in FIFO order; queueing all three
    // up front before any are drained and observing the same S1 result
    // confirms the switch takes effect by dequeue order, not enqueue order.
    let system = System::new(SystemConfig::default());
    let log = Arc::new(Mutex::new(Vec::new()));
    let props = Props::from_producer({
        let log = log.clone();
        move || TestActor { log: log.clone() }
    })
    .with_dispatcher(Arc::new(DefaultDispatcher::new()));
    let address = system.spawn(props).await.expect("spawn");

    for msg_type in ["test1", "change_behavior", "test2"] {
        system
            .send(&address, Message::new(msg_type, serde_json::json!({})))
            .await
            .expect("send");
    }

    settle().await;

    assert_eq!(
        *log.lock(),
        vec![
            "test1".to_string(),
            "change_behavior".to_string(),
            "alternative_test2".to_string(),
        ]
    );
}
