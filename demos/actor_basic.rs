//! Basic Actor - Lifecycle Hooks and Supervised Failure
//!
//! Shows the full actor lifecycle beyond `receive`: `pre_start`/`post_stop`
//! hooks, and a handler failure that trips a restart directive. The counter
//! refuses to grow past `max_value`; instead of hand-checking the result it
//! returns an `ActorError`, and a `RestartWithBackoff` strategy attached at
//! spawn time decides what happens next.
//!
//! Run with: cargo run --example actor_basic

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fluxrt::prelude::*;
use fluxrt::supervisor::RestartBackoff;

struct Counter {
    value: i64,
    max_value: i64,
}

#[async_trait]
impl Actor for Counter {
    fn initialize_behaviors(&self, behaviors: &mut Behaviors<Self>) {
        behaviors.add(DEFAULT_BEHAVIOR, |actor: &mut Counter, message, ctx| {
            Box::pin(async move { actor.receive(message, ctx).await })
        });
    }

    async fn pre_start(&mut self, ctx: &mut Context) -> Result<(), ActorError> {
        println!("[{}] starting with value {}", ctx.address(), self.value);
        Ok(())
    }

    async fn post_stop(&mut self, ctx: &mut Context) -> Result<(), ActorError> {
        println!("[{}] stopping with final value {}", ctx.address(), self.value);
        Ok(())
    }

    async fn receive(&mut self, message: Message, ctx: &mut Context) -> Result<(), ActorError> {
        let Some(delta) = message.payload().get("delta").and_then(|v| v.as_i64()) else {
            return Ok(());
        };
        self.value += delta;
        if self.value > self.max_value {
            return Err(ActorError::handler(
                format!("value {} exceeds maximum {}", self.value, self.max_value),
                Some(message),
            ));
        }
        println!("[{}] new value: {}", ctx.address(), self.value);
        Ok(())
    }
}

fn bump(delta: i64) -> Message {
    Message::new("bump", serde_json::json!({ "delta": delta }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Basic Actor ===\n");

    let system = System::new(SystemConfig::default());
    let strategy = Arc::new(RestartWithBackoff::new(RestartBackoff::new(3, Duration::from_secs(30))));
    let props = Props::from_producer(|| Counter { value: 0, max_value: 100 }).with_supervisor_strategy(strategy);
    let address = system.spawn(props).await?;

    for delta in [10, 20, 15, 80] {
        system.send(&address, bump(delta)).await?;
        tokio::time::sleep(Duration::from_millis(30)).await;
    }

    println!("\nlifecycle phase after overflow: {:?}", system.lifecycle_phase(&address));
    println!("dead letters recorded: {}", system.dead_letter_count());

    system.stop(&address).await?;
    Ok(())
}
