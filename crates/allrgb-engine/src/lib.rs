//! allrgb-engine: frontier-driven placement of every palette color
//!
//! Given a `width x height` grid and a palette of `depth³` evenly spaced RGB
//! colors (with `width * height == depth³`), the engine assigns each color
//! to exactly one cell. Colors arrive in a seeded random order; each goes to
//! the empty cell, among those touching a filled cell, whose filled
//! neighbors are closest to it. The result is a smooth "all colors" mosaic.
//!
//! # Quick Start
//!
//! ```
//! use allrgb_engine::{EngineConfig, PlacementEngine};
//!
//! let mut engine = PlacementEngine::new(EngineConfig::new(8, 8, 4).seed(147)).unwrap();
//! let summary = engine.run().unwrap();
//!
//! assert_eq!(summary.placed, 64);
//! assert!(engine.grid().is_full());
//! let rgb = engine.grid().to_rgb_bytes();
//! assert_eq!(rgb.len(), 8 * 8 * 3);
//! ```
//!
//! # Pieces
//!
//! - [`generate_palette`]: the `depth³` colors in red-major order
//! - [`Shuffler`]: seeded Fisher-Yates permutation
//! - [`Grid`]: cells with precomputed Moore neighborhoods
//! - [`Frontier`]: empty cells with a filled neighbor ([`IndexedFrontier`],
//!   [`ArenaFrontier`])
//! - [`FitMetric`]: how well a color suits a cell
//! - [`PlacementEngine`]: the per-color scan and commit loop
//!
//! # Determinism
//!
//! With a seed and the default [`TieBreak::Position`], output depends only
//! on `(width, height, depth, seed)`: thread count, frontier kind, and scan
//! chunking do not change the result.

mod color;
mod engine;
mod error;
mod fit;
mod frontier;
mod grid;
mod palette;
mod scan;
mod shuffle;


pub use color::Color;
pub use engine::{EngineConfig, Placement, PlacementEngine, RunSummary, DEFAULT_PARALLEL_THRESHOLD};
pub use error::{ConfigError, EngineError, InvariantViolation, MAX_COLOR_DEPTH, MIN_COLOR_DEPTH};
pub use fit::{average_fit, nearest_fit, FitMetric, NO_FIT};
pub use frontier::{ArenaFrontier, CompactionPolicy, Frontier, FrontierKind, IndexedFrontier};
pub use grid::{Cell, CellId, Grid};
pub use palette::{channel_value, generate_palette, palette_len, validate_depth};
pub use scan::{Candidate, Scan, TieBreak};
pub use shuffle::Shuffler;
