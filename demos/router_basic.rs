//! Basic Router - Round-Robin Forwarding Over a Pool
//!
//! Spawns three recorder actors as routees, wraps them in a round-robin
//! `Router`, and sends seven messages to the router's address. Each routee
//! receives every third message, in order, regardless of how many routees
//! are in the pool.
//!
//! Run with: cargo run --example router_basic

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fluxrt::prelude::*;
use parking_lot::Mutex;

struct Recorder {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Actor for Recorder {
    fn initialize_behaviors(&self, _behaviors: &mut Behaviors<Self>) {}

    async fn receive(&mut self, message: Message, _ctx: &mut Context) -> Result<(), ActorError> {
        println!("[{}] received {}", self.name, message.message_type());
        self.log.lock().push(message.message_type().to_string());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Basic Router ===\n");

    let system = System::new(SystemConfig::default());

    let mut routees = Vec::new();
    let mut logs = Vec::new();
    for name in ["r1", "r2", "r3"] {
        let log = Arc::new(Mutex::new(Vec::new()));
        let address = system
            .spawn(Props::from_producer({
                let log = log.clone();
                move || Recorder { name, log: log.clone() }
            }))
            .await?;
        routees.push(address);
        logs.push(log);
    }

    let router_address = system.spawn(Props::from_producer(move || Router::round_robin(routees.clone()))).await?;

    for i in 0..7 {
        system
            .send(&router_address, Message::new(format!("m{i}"), serde_json::json!({})))
            .await?;
    }

    tokio::time::sleep(Duration::from_millis(50)).await;

    for (name, log) in ["r1", "r2", "r3"].into_iter().zip(&logs) {
        println!("{name}: {:?}", log.lock());
    }

    system.stop(&router_address).await?;
    Ok(())
}
