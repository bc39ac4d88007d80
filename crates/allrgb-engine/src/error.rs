//! Error types for the placement engine.
//!
//! [`ConfigError`] is returned at construction when the requested geometry
//! cannot hold the palette. [`InvariantViolation`] signals an internal
//! defect: the run aborts and no image is produced. Nothing here is
//! retried, since every failure reproduces for the same seed.

use thiserror::Error;

/// Smallest supported palette depth per channel.
pub const MIN_COLOR_DEPTH: u32 = 2;

/// Largest supported palette depth per channel.
pub const MAX_COLOR_DEPTH: u32 = 256;

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Color depth {0} is outside 2..=256")]
    ColorDepthOutOfRange(u32),

    #[error("Grid dimensions must be positive, got {width}x{height}")]
    EmptyGeometry { width: u32, height: u32 },

    #[error(
        "Geometry mismatch: {width}x{height} holds {cells} cells but depth {depth} yields {colors} colors"
    )]
    GeometryMismatch {
        width: u32,
        height: u32,
        depth: u32,
        cells: u64,
        colors: u64,
    },

    #[error("Color sequence has {got} entries, grid has {expected} cells")]
    ColorCountMismatch { expected: usize, got: usize },

    #[error("Thread count must be at least 1")]
    ZeroThreads,

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownOption {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// A broken engine invariant. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("Selected cell ({x}, {y}) is already filled")]
    CellNotEmpty { x: u32, y: u32 },

    #[error("Frontier is empty after {placed} placements but the grid is not full")]
    FrontierExhausted { placed: usize },

    #[error("Frontier still holds {remaining} cells after the last color")]
    FrontierNotEmpty { remaining: usize },

    #[error("{remaining} cells are still empty after the last color")]
    CellsUnfilled { remaining: usize },

    #[error("Frontier out of sync with grid at ({x}, {y}): {reason}")]
    FrontierDesync {
        x: u32,
        y: u32,
        reason: &'static str,
    },
}

/// Unified error type for the engine API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("Run aborted by caller after {placed} placements")]
    Aborted { placed: usize },
}

impl From<rayon::ThreadPoolBuildError> for ConfigError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        ConfigError::ThreadPool(e.to_string())
    }
}
