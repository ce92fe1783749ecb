//! Error types for the Viewfinder engine
//!
//! This module defines the error types used throughout the engine,
//! including world handles, capture, placement and configuration.

use thiserror::Error as ThisError;

/// Result type for Viewfinder engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Viewfinder engine errors
#[derive(Debug, ThisError)]
pub enum Error {
    /// A required collaborator or parameter is not configured
    /// (no photo class, no capture volume on the owner, ...)
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// A handle (actor, component, photo, mesh asset) no longer refers to a live object
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Spawning an entity from a class template failed
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    /// The capture backend could not produce a render target
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization of configuration or records failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
