//! # Error Types
//!
//! This module defines error types used throughout the catprint library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for catprint operations
#[derive(Debug, Error)]
pub enum CatprintError {
    /// Print width of zero pixels
    #[error("Invalid print width: {0} (must be at least 1 pixel)")]
    InvalidWidth(usize),

    /// Font file could not be read or parsed
    #[error("Failed to load font {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    /// Image loading or processing error
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid command or parameter
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Malformed print message
    #[error("Message error: {0}")]
    Message(String),

    /// Transport-level errors (connection, I/O)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
