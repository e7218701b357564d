//! Error handling for the fireworks core and its terminal host

use std::io;
use thiserror::Error;

/// Errors that can occur while setting up or running the display
#[derive(Debug, Error)]
pub enum FireworksError {
    /// A drawing layer could not be created
    #[error("Cannot create {width}x{height} drawing surface: {reason}")]
    SurfaceInit {
        /// Requested width in pixels
        width: usize,
        /// Requested height in pixels
        height: usize,
        /// Why the allocation was refused
        reason: String,
    },

    /// A hex colour string could not be parsed
    #[error("Invalid hex color: {0} (expected RRGGBB, e.g. 1a1b26)")]
    InvalidColor(String),

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Type alias for Results from fireworks operations
pub type Result<T> = std::result::Result<T, FireworksError>;
