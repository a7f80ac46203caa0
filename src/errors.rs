//! Error Types
//!
//! This module defines the error types used throughout the runtime.
//!
//! # Overview
//!
//! The main error type [`PantomimeError`] covers all failure modes including:
//! - Asset resolution and decoding errors
//! - glTF parsing errors
//! - Animation clip composition errors
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, PantomimeError>`.
//!
//! ```rust,ignore
//! use pantomime::errors::{PantomimeError, Result};
//!
//! fn load_asset() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the Pantomime runtime.
///
/// This enum covers all possible error conditions that can occur
/// during runtime operation. Each variant provides specific context
/// about what went wrong.
#[derive(Error, Debug)]
pub enum PantomimeError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    GltfError(String),

    /// A referenced external buffer or binary chunk is missing.
    #[error("Missing buffer data: {0}")]
    MissingBufferData(String),

    /// Data URI parsing error.
    #[error("Data URI error: {0}")]
    DataUriError(String),

    /// Base64 decoding error.
    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// An empty clip list was passed to a sequencing operation.
    #[error("Cannot sequence an empty clip list")]
    EmptySequence,

    /// Clips in a sequence could not be merged into a single clip.
    #[error("Incompatible clips in sequence: {0}")]
    IncompatibleClips(String),
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<gltf::Error> for PantomimeError {
    fn from(err: gltf::Error) -> Self {
        PantomimeError::GltfError(err.to_string())
    }
}

/// Alias for `Result<T, PantomimeError>`.
pub type Result<T> = std::result::Result<T, PantomimeError>;
