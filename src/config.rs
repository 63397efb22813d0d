//! Configuration System
//!
//! Hierarchical configuration with layered sources: built-in defaults,
//! the global XDG file, then the workspace file, each overriding the one
//! below. Validated after merge.

use crate::error::EngineError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BaizeConfig {
    /// System-wide settings
    #[serde(default)]
    pub system: SystemConfig,

    /// Booking delivery settings
    #[serde(default)]
    pub booking: BookingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// System-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Storage paths
    #[serde(default)]
    pub storage: StorageConfig,

    /// Ring-buffer capacity of the in-memory performance monitor
    #[serde(default = "default_perf_samples")]
    pub perf_samples: usize,
}

/// Storage paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Embedded database directory, relative to the workspace root
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
}

/// Booking delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Booking submission endpoint
    #[serde(default = "default_booking_endpoint")]
    pub endpoint: String,
}

fn default_data_path() -> PathBuf {
    PathBuf::from(".baize/data")
}

fn default_booking_endpoint() -> String {
    "http://localhost:8787/api/bookings".to_string()
}

fn default_perf_samples() -> usize {
    crate::perf::DEFAULT_CAPACITY
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            perf_samples: default_perf_samples(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_booking_endpoint(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    System(String),
    Booking(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::System(msg) => write!(f, "System: {}", msg),
            ValidationError::Booking(msg) => write!(f, "Booking: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SystemConfig {
    /// Validate system configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.storage.data_path.as_os_str().is_empty() {
            return Err("Data path cannot be empty".to_string());
        }
        if self.perf_samples == 0 {
            return Err("perf_samples must be at least 1".to_string());
        }
        Ok(())
    }
}

impl BookingConfig {
    /// Validate booking configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("Booking endpoint cannot be empty".to_string());
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!(
                "Booking endpoint must be an http(s) URL: {}",
                self.endpoint
            ));
        }
        Ok(())
    }
}

impl BaizeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.system.validate() {
            errors.push(ValidationError::System(e));
        }
        if let Err(e) = self.booking.validate() {
            errors.push(ValidationError::Booking(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration manager for runtime reloads
pub struct ConfigManager {
    config: Arc<RwLock<BaizeConfig>>,
}

impl ConfigManager {
    /// Create a new configuration manager with the given config
    pub fn new(config: BaizeConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Reload configuration from files
    pub fn reload(&self, workspace_root: &std::path::Path) -> Result<(), EngineError> {
        let new_config = ConfigLoader::load(workspace_root)
            .map_err(|e| EngineError::ConfigError(format!("Failed to load config: {}", e)))?;

        new_config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            EngineError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        *self.config.write().unwrap() = new_config;
        Ok(())
    }

    /// Get current configuration (read-only)
    pub fn get(&self) -> BaizeConfig {
        self.config.read().unwrap().clone()
    }
}
