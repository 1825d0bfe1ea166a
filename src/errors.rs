//! Error Types
//!
//! The scene graph itself does not fail: hierarchy and transform operations
//! are total, and malformed renderable content is reported through
//! [`can_render`](crate::render::can_render) returning `false`. Errors only
//! surface at the asset boundary, where a [`Loader`](crate::assets::Loader)
//! hands its outcome to the caller.
//!
//! # Usage
//!
//! ```rust,ignore
//! use canopy::errors::{CanopyError, Result};
//!
//! fn load_mesh(path: &Path) -> Result<Geometry> {
//!     let text = std::fs::read_to_string(path)?;
//!     parse(&text).map_err(|message| CanopyError::Decode {
//!         path: path.to_path_buf(),
//!         message,
//!     })
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum CanopyError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested file does not exist.
    #[error("File not found '{}'", .0.display())]
    FileNotFound(PathBuf),

    /// The file exists but its contents could not be turned into a resource.
    #[error("Failed to decode '{}': {message}", path.display())]
    Decode {
        /// File being decoded
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Async & Threading Errors
    // ========================================================================
    /// A background loader thread could not be started.
    #[error("Failed to spawn loader thread: {0}")]
    LoaderThread(String),
}

/// Alias for `Result<T, CanopyError>`.
pub type Result<T> = std::result::Result<T, CanopyError>;
