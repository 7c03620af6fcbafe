//! Configuration types

use serde::{Deserialize, Serialize};

use crate::common::channels::DEFAULT_QUEUE_CAPACITY;
use crate::common::errors::{AnalysisError, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Work queue configuration
    #[serde(default)]
    pub queue: QueueConfig,
    /// Batch worker configuration
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Input validation rules
    #[serde(default)]
    pub validation: ValidationConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

impl AppConfig {
    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.queue.capacity == 0 {
            return Err(AnalysisError::Configuration(
                "queue.capacity must be greater than 0".to_string(),
            ));
        }
        if self.worker.batch_size == 0 {
            return Err(AnalysisError::Configuration(
                "worker.batch_size must be greater than 0".to_string(),
            ));
        }
        if self.worker.worker_count == 0 {
            return Err(AnalysisError::Configuration(
                "worker.worker_count must be greater than 0".to_string(),
            ));
        }
        if self.validation.allowed_sectors.is_empty() {
            return Err(AnalysisError::Configuration(
                "validation.allowed_sectors must not be empty".to_string(),
            ));
        }
        url::Url::parse(&self.server.public_base_url).map_err(|e| {
            AnalysisError::Configuration(format!("server.public_base_url is invalid: {}", e))
        })?;
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Externally visible base URL, used to build job status links
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: default_public_base_url(),
        }
    }
}

impl ServerConfig {
    /// Get bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

/// Work queue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Maximum number of items waiting to be processed
    #[serde(default = "default_queue_capacity")]
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_queue_capacity(),
        }
    }
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

/// Batch worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Maximum items processed per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Number of consumer loops draining the queue
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            worker_count: default_worker_count(),
        }
    }
}

fn default_batch_size() -> usize {
    2
}

fn default_worker_count() -> usize {
    1
}

/// Input validation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Accepted client sectors (compared case-insensitively)
    #[serde(default = "default_allowed_sectors")]
    pub allowed_sectors: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            allowed_sectors: default_allowed_sectors(),
        }
    }
}

fn default_allowed_sectors() -> Vec<String> {
    vec!["Public".to_string(), "Private".to_string()]
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
