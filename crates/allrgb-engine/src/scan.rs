//! Fork-join search for the best-fitting frontier cell.
//!
//! The frontier slots are split into chunks, each chunk is reduced to its
//! own best candidate, and the partial results are reduced again with the
//! same comparator. Under [`TieBreak::Position`] the comparator is a total
//! order on `(score, cell id)`, so the winner does not depend on thread
//! count or chunk boundaries.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::color::Color;
use crate::error::ConfigError;
use crate::fit::FitMetric;
use crate::grid::{CellId, Grid};

/// Smallest chunk handed to a worker.
const MIN_CHUNK: usize = 256;

/// Chunks per worker thread, for load balancing.
const CHUNKS_PER_THREAD: usize = 4;

/// How equal scores are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Lowest row-major cell index wins, i.e. smallest `(y, x)`.
    #[default]
    Position,
    /// A random coin flip decides.
    ///
    /// The outcome depends on reduction order and on the thread RNG, so two
    /// runs with the same seed can produce different images.
    CoinFlip,
}

impl TieBreak {
    pub const NAMES: &'static str = "position, coin-flip";

    /// Whether runs are reproducible for a fixed seed.
    pub fn is_deterministic(self) -> bool {
        matches!(self, TieBreak::Position)
    }

    /// The better of two candidates.
    #[inline]
    pub fn pick(self, a: Candidate, b: Candidate) -> Candidate {
        match a.score.cmp(&b.score) {
            Ordering::Less => a,
            Ordering::Greater => b,
            Ordering::Equal => match self {
                TieBreak::Position => {
                    if a.id <= b.id {
                        a
                    } else {
                        b
                    }
                }
                TieBreak::CoinFlip => {
                    if rand::random::<bool>() {
                        a
                    } else {
                        b
                    }
                }
            },
        }
    }

    #[inline]
    fn merge(self, a: Option<Candidate>, b: Option<Candidate>) -> Option<Candidate> {
        match (a, b) {
            (Some(a), Some(b)) => Some(self.pick(a, b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

impl FromStr for TieBreak {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "position" | "positional" => Ok(TieBreak::Position),
            "coin-flip" | "coinflip" | "random" => Ok(TieBreak::CoinFlip),
            _ => Err(ConfigError::UnknownOption {
                kind: "tie-break",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Position => f.write_str("position"),
            TieBreak::CoinFlip => f.write_str("coin-flip"),
        }
    }
}

/// A scored frontier cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub id: CellId,
    pub score: u32,
}

/// Read-only scan parameters.
#[derive(Debug, Clone, Copy)]
pub struct Scan<'a> {
    pub grid: &'a Grid,
    pub metric: FitMetric,
    pub tie_break: TieBreak,
    /// Slot counts below this are scanned on the calling thread.
    pub parallel_threshold: usize,
}

impl Scan<'_> {
    /// Best candidate for `color` among `slots`, skipping vacant slots.
    ///
    /// Returns `None` only when every slot is vacant. Runs on the current
    /// rayon pool; wrap in `ThreadPool::install` to pick another.
    pub fn best(&self, slots: &[CellId], color: Color) -> Option<Candidate> {
        if slots.len() < self.parallel_threshold {
            return self.best_in_chunk(slots, color);
        }
        let chunk = chunk_len(slots.len(), rayon::current_num_threads());
        slots
            .par_chunks(chunk)
            .map(|part| self.best_in_chunk(part, color))
            .reduce(|| None, |a, b| self.tie_break.merge(a, b))
    }

    fn best_in_chunk(&self, slots: &[CellId], color: Color) -> Option<Candidate> {
        slots
            .iter()
            .filter(|id| !id.is_vacant())
            .map(|&id| Candidate {
                id,
                score: self.metric.score(self.grid, id, color),
            })
            .reduce(|a, b| self.tie_break.pick(a, b))
    }
}

fn chunk_len(slots: usize, threads: usize) -> usize {
    let parts = threads.max(1) * CHUNKS_PER_THREAD;
    slots.div_ceil(parts).max(MIN_CHUNK)
}
