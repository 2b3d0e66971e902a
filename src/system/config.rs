//! System configuration with sensible defaults.

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
use serde::{Deserialize, Serialize};

// Layer 3: Internal
use crate::mailbox::{MailboxKind, DEFAULT_LANE_CAPACITY};

/// Default mailbox capacity for bounded mailboxes
pub const DEFAULT_MAILBOX_CAPACITY: usize = DEFAULT_LANE_CAPACITY;

/// Default timeout for actor spawn operations (5 seconds)
pub const DEFAULT_SPAWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for graceful system shutdown (30 seconds)
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum concurrent actors (0 = unlimited)
pub const DEFAULT_MAX_ACTORS: usize = 0;

/// Default metrics collection setting (disabled following YAGNI ยง6.1)
pub const DEFAULT_ENABLE_METRICS: bool = false;

/// Default mailbox kind for `Props` that don't specify one (spec §6 Props table).
pub const DEFAULT_MAILBOX_KIND: MailboxKind = MailboxKind::Default;

/// Default throughput dispatcher rate, messages/second.
pub const DEFAULT_MAX_PER_SECOND: u32 = 100;

/// Default throughput dispatcher batch size.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Remote transport disabled by default; a bind address must be configured
/// explicitly to expose the RPC server (spec §4.7).
pub const DEFAULT_REMOTE_ENABLED: bool = false;

/// System-wide configuration for actor runtime.
///
/// Provides sensible defaults following ยง6.1 YAGNI principles.
///
/// # Examples
///
/// ```rust
/// use fluxrt::system::{SystemConfig, DEFAULT_MAILBOX_CAPACITY};
/// use std::time::Duration;
///
/// // Use default configuration
/// let config = SystemConfig::default();
/// assert_eq!(config.default_mailbox_capacity, DEFAULT_MAILBOX_CAPACITY);
///
/// // Use builder for custom configuration
/// let config = SystemConfig::builder()
///     .with_mailbox_capacity(500)
///     .with_spawn_timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(config.default_mailbox_capacity, 500);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Default mailbox capacity for bounded mailboxes
    pub default_mailbox_capacity: usize,

    /// Default mailbox kind for `Props` that don't specify one.
    pub default_mailbox_kind: MailboxKind,

    /// Timeout for actor spawn operations
    pub spawn_timeout: Duration,

    /// Timeout for graceful system shutdown
    pub shutdown_timeout: Duration,

    /// Maximum concurrent actors (0 = unlimited)
    pub max_actors: usize,

    /// Enable system metrics collection (disabled by default - YAGNI)
    pub enable_metrics: bool,

    /// Default throughput dispatcher rate (messages/second).
    pub default_max_per_second: u32,

    /// Default throughput dispatcher batch size.
    pub default_batch_size: usize,

    /// Local node's bind address for the remote transport (`None` disables
    /// the RPC server; spec §4.7).
    pub remote_bind_address: Option<String>,

    /// Interval for the optional health-check sweep (`None` disables it;
    /// §3 "Health monitoring hook").
    #[serde(with = "crate::util::duration_serde::option")]
    pub health_check_interval: Option<Duration>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            default_mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            default_mailbox_kind: DEFAULT_MAILBOX_KIND,
            spawn_timeout: DEFAULT_SPAWN_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            max_actors: DEFAULT_MAX_ACTORS,
            enable_metrics: DEFAULT_ENABLE_METRICS,
            default_max_per_second: DEFAULT_MAX_PER_SECOND,
            default_batch_size: DEFAULT_BATCH_SIZE,
            remote_bind_address: None,
            health_check_interval: None,
        }
    }
}

impl SystemConfig {
    /// Create a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluxrt::system::SystemConfig;
    /// use std::time::Duration;
    ///
    /// let config = SystemConfig::builder()
    ///     .with_mailbox_capacity(500)
    ///     .with_max_actors(100)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> SystemConfigBuilder {
        SystemConfigBuilder::default()
    }

    /// Validate configuration values.
    ///
    /// Returns `Err` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_mailbox_capacity == 0 {
            return Err("default_mailbox_capacity must be > 0".to_string());
        }

        if self.spawn_timeout.as_secs() == 0 && self.spawn_timeout.as_millis() == 0 {
            return Err("spawn_timeout must be > 0".to_string());
        }

        if self.shutdown_timeout.as_secs() == 0 && self.shutdown_timeout.as_millis() == 0 {
            return Err("shutdown_timeout must be > 0".to_string());
        }

        Ok(())
    }
}

/// Builder for SystemConfig with fluent API.
///
/// Follows Builder Pattern for ergonomic configuration.
#[derive(Debug, Default)]
pub struct SystemConfigBuilder {
    config: SystemConfig,
}

impl SystemConfigBuilder {
    /// Set default mailbox capacity for bounded mailboxes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluxrt::system::SystemConfig;
    ///
    /// let config = SystemConfig::builder()
    ///     .with_mailbox_capacity(500)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.default_mailbox_capacity, 500);
    /// ```
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.config.default_mailbox_capacity = capacity;
        self
    }

    /// Set timeout for actor spawn operations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluxrt::system::SystemConfig;
    /// use std::time::Duration;
    ///
    /// let config = SystemConfig::builder()
    ///     .with_spawn_timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.spawn_timeout, Duration::from_secs(10));
    /// ```
    pub fn with_spawn_timeout(mut self, timeout: Duration) -> Self {
        self.config.spawn_timeout = timeout;
        self
    }

    /// Set timeout for graceful system shutdown.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluxrt::system::SystemConfig;
    /// use std::time::Duration;
    ///
    /// let config = SystemConfig::builder()
    ///     .with_shutdown_timeout(Duration::from_secs(60))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.shutdown_timeout, Duration::from_secs(60));
    /// ```
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.config.shutdown_timeout = timeout;
        self
    }

    /// Set maximum number of concurrent actors (0 = unlimited).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluxrt::system::SystemConfig;
    ///
    /// let config = SystemConfig::builder()
    ///     .with_max_actors(100)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.max_actors, 100);
    /// ```
    pub fn with_max_actors(mut self, max: usize) -> Self {
        self.config.max_actors = max;
        self
    }

    /// Enable or disable system metrics collection.
    ///
    /// Disabled by default following YAGNI principle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluxrt::system::SystemConfig;
    ///
    /// let config = SystemConfig::builder()
    ///     .with_metrics(true)
    ///     .build()
    ///     .unwrap();
    /// assert!(config.enable_metrics);
    /// ```
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.config.enable_metrics = enabled;
        self
    }

    /// Set the default mailbox kind for `Props` that don't specify one.
    pub fn with_mailbox_kind(mut self, kind: MailboxKind) -> Self {
        self.config.default_mailbox_kind = kind;
        self
    }

    /// Set the default throughput dispatcher rate and batch size.
    pub fn with_throughput_defaults(mut self, max_per_second: u32, batch_size: usize) -> Self {
        self.config.default_max_per_second = max_per_second;
        self.config.default_batch_size = batch_size;
        self
    }

    /// Enable the remote transport and bind it to the given address
    /// (`host:port`). Leaving this unset keeps remote disabled (spec §4.7).
    pub fn with_remote_bind_address(mut self, address: impl Into<String>) -> Self {
        self.config.remote_bind_address = Some(address.into());
        self
    }

    /// Enable the optional periodic health-check sweep (§3).
    pub fn with_health_check_interval(mut self, interval: Duration) -> Self {
        self.config.health_check_interval = Some(interval);
        self
    }

    /// Build and validate the configuration.
    ///
    /// Returns `Err` if configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluxrt::system::SystemConfig;
    ///
    /// // Valid configuration
    /// let config = SystemConfig::builder()
    ///     .with_mailbox_capacity(500)
    ///     .build();
    /// assert!(config.is_ok());
    ///
    /// // Invalid configuration
    /// let invalid = SystemConfig::builder()
    ///     .with_mailbox_capacity(0)
    ///     .build();
    /// assert!(invalid.is_err());
    /// ```
    pub fn build(self) -> Result<SystemConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}
