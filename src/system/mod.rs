//! The actor system (spec C6): configuration, errors, `Props`, and the
//! `System` handle itself.

pub mod actor_system;
pub mod config;
pub mod errors;
pub mod props;

// Re-exports
pub use actor_system::{DeadLetterRecord, System};
pub use config::{
    SystemConfig, SystemConfigBuilder, DEFAULT_BATCH_SIZE, DEFAULT_ENABLE_METRICS,
    DEFAULT_MAILBOX_CAPACITY, DEFAULT_MAILBOX_KIND, DEFAULT_MAX_ACTORS, DEFAULT_MAX_PER_SECOND,
    DEFAULT_REMOTE_ENABLED, DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_SPAWN_TIMEOUT,
};
pub use errors::SystemError;
pub use props::{ActorSource, Props};
