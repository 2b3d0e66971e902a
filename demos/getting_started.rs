//! Getting Started - Your First Actor
//!
//! Builds a counter actor, spawns it under a `System`, and sends it a few
//! messages. Shows the minimum shape every fluxrt actor has:
//! `initialize_behaviors` registers the default handler, `receive` reacts to
//! messages, and `Props`/`System::spawn` wire it in.
//!
//! Run with: cargo run --example getting_started

use async_trait::async_trait;
use fluxrt::prelude::*;

struct Counter {
    value: i64,
}

#[async_trait]
impl Actor for Counter {
    fn initialize_behaviors(&self, behaviors: &mut Behaviors<Self>) {
        behaviors.add(DEFAULT_BEHAVIOR, |actor: &mut Counter, message, ctx| {
            Box::pin(async move { actor.receive(message, ctx).await })
        });
    }

    async fn receive(&mut self, message: Message, _ctx: &mut Context) -> Result<(), ActorError> {
        match message.message_type() {
            "increment" => {
                self.value += 1;
                println!("counter incremented to {}", self.value);
            }
            "decrement" => {
                self.value -= 1;
                println!("counter decremented to {}", self.value);
            }
            "get_value" => println!("current value: {}", self.value),
            other => println!("counter ignored unknown message type '{other}'"),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Getting Started ===\n");

    let system = System::new(SystemConfig::default());
    let address = system.spawn(Props::from_producer(|| Counter { value: 0 })).await?;

    system.send(&address, Message::new("increment", serde_json::json!({}))).await?;
    system.send(&address, Message::new("increment", serde_json::json!({}))).await?;
    system.send(&address, Message::new("decrement", serde_json::json!({}))).await?;
    system.send(&address, Message::new("get_value", serde_json::json!({}))).await?;

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    system.stop(&address).await?;
    println!("\nfinal lifecycle phase: {:?}", system.lifecycle_phase(&address));
    Ok(())
}

