//! Error types for the Baize personalization engine.

use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Booking transport errors
///
/// `Offline` means no delivery was attempted; everything else is a failed
/// attempt. Both queue the booking for a later sync.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Transport offline")]
    Offline,

    #[error("Delivery rejected with HTTP status {0}")]
    HttpStatus(u16),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Engine-level errors surfaced to callers and the CLI
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid content payload: {0}")]
    InvalidContent(String),

    #[error("Unknown content key: {0}")]
    UnknownContentKey(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
