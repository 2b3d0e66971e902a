//! Basic Remote Transport - Cross-Node Send, Spawn, and Watch
//!
//! Starts one `System` serving the gRPC transport on a local port, then
//! drives it entirely from the outside through a `RemoteClient`: spawning a
//! registered actor class by name, sending it a message, watching its
//! lifecycle, and stopping it. Demonstrates the wire path an actual second
//! node would use instead of calling `System` directly.
//!
//! Run with: cargo run --example remote_basic

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fluxrt::prelude::*;
use fluxrt::util::NodeAddress;
use parking_lot::Mutex;
use tokio_stream::StreamExt;

struct Echo {
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Actor for Echo {
    fn initialize_behaviors(&self, _behaviors: &mut Behaviors<Self>) {}

    async fn receive(&mut self, message: Message, _ctx: &mut Context) -> Result<(), ActorError> {
        println!("[echo] received {}", message.message_type());
        self.log.lock().push(message.message_type().to_string());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Basic Remote Transport ===\n");

    let node = NodeAddress::new("127.0.0.1:50151");
    let log = Arc::new(Mutex::new(Vec::new()));

    let config = SystemConfig::builder().with_remote_bind_address(node.as_str()).build()?;
    let system = System::new(config);
    system.register_class("echo", {
        let log = log.clone();
        move || Props::from_producer({
            let log = log.clone();
            move || Echo { log: log.clone() }
        })
    });
    system.start_remote().await?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = RemoteClient::connect(&node).await?;

    let address = client.spawn_actor(&node, "echo", None).await?;
    println!("spawned remote actor at {address}");

    client.send_message(&address, &Message::new("ping", serde_json::json!({}))).await?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut events = client.watch_actor(&address, "demo-watcher").await?;
    if let Some(Ok(event)) = events.next().await {
        println!("lifecycle event: {event:?}");
    }

    client.stop_actor(&address).await?;
    println!("local log: {:?}", log.lock());
    Ok(())
}
