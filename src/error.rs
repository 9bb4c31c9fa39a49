//! # Errors
//!
//! Failure types of the streaming pipeline. Missing blocks are not errors: lookups
//! that miss return `BlockType::NONE`. What remains are broken store preconditions
//! and configuration problems.

use cgmath::Point3;
use thiserror::Error;

/// A precondition of the chunk store was violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamingError {
    /// A render handle was registered for an anchor that has no chunk data.
    #[error("no chunk data exists at anchor {0:?}")]
    MissingChunkData(Point3<i32>),

    /// A second render handle was registered for an anchor that is already built.
    #[error("chunk at anchor {0:?} already has a render handle")]
    AlreadyBuilt(Point3<i32>),
}

/// The world configuration could not be loaded or is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read world config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for `WorldConfig`.
    #[error("failed to parse world config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the pipeline cannot work with.
    #[error("invalid world config: {0}")]
    Invalid(String),
}

/// Failure of the headless driver.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The world could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The streaming pipeline hit a broken precondition.
    #[error(transparent)]
    Streaming(#[from] StreamingError),
}
