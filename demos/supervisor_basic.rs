//! Basic Supervision - Resume, Restart, and Stop Directives
//!
//! Spawns three identical workers under three different supervision
//! strategies and sends each a `fail` message. `AlwaysResume` keeps draining
//! after the failure, `AlwaysRestart` rebuilds a fresh instance (losing
//! accumulated state), and `AlwaysStop` removes the worker from the system
//! outright. The outcome of each is visible through `System::lifecycle_phase`
//! and `System::actor_count`.
//!
//! Run with: cargo run --example supervisor_basic

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fluxrt::prelude::*;

struct Worker {
    processed: u32,
}

#[async_trait]
impl Actor for Worker {
    fn initialize_behaviors(&self, behaviors: &mut Behaviors<Self>) {
        behaviors.add(DEFAULT_BEHAVIOR, |actor: &mut Worker, message, ctx| {
            Box::pin(async move { actor.receive(message, ctx).await })
        });
    }

    async fn pre_start(&mut self, ctx: &mut Context) -> Result<(), ActorError> {
        println!("[{}] starting (processed so far: {})", ctx.address(), self.processed);
        Ok(())
    }

    async fn receive(&mut self, message: Message, ctx: &mut Context) -> Result<(), ActorError> {
        if message.message_type() == "fail" {
            return Err(ActorError::handler("simulated failure", Some(message)));
        }
        self.processed += 1;
        println!("[{}] processed message #{}", ctx.address(), self.processed);
        Ok(())
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Basic Supervision ===\n");

    let system = System::new(SystemConfig::default());

    let resumed = system
        .spawn(Props::from_producer(|| Worker { processed: 0 }).with_supervisor_strategy(Arc::new(AlwaysResume)))
        .await?;
    let restarted = system
        .spawn(Props::from_producer(|| Worker { processed: 0 }).with_supervisor_strategy(Arc::new(AlwaysRestart)))
        .await?;
    let stopped = system
        .spawn(Props::from_producer(|| Worker { processed: 0 }).with_supervisor_strategy(Arc::new(AlwaysStop)))
        .await?;

    for target in [&resumed, &restarted, &stopped] {
        system.send(target, Message::new("work", serde_json::json!({}))).await?;
    }
    settle().await;

    for target in [&resumed, &restarted, &stopped] {
        let _ = system.send(target, Message::new("fail", serde_json::json!({}))).await;
    }
    settle().await;

    println!("\nafter failure:");
    println!("  resumed:   {:?}", system.lifecycle_phase(&resumed));
    println!("  restarted: {:?}", system.lifecycle_phase(&restarted));
    println!("  stopped:   {:?}", system.lifecycle_phase(&stopped));
    println!("  actor_count: {}", system.actor_count());

    // The resumed and restarted workers are still alive and keep draining.
    for target in [&resumed, &restarted] {
        system.send(target, Message::new("work", serde_json::json!({}))).await?;
    }
    settle().await;

    system.stop(&resumed).await?;
    system.stop(&restarted).await?;
    Ok(())
}
