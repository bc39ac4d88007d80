//! Frontier sets: the empty cells that touch at least one filled cell.
//!
//! The engine scans the frontier once per placed color, so membership must be
//! O(1) to update and cheap to walk. Two implementations are provided:
//!
//! - [`IndexedFrontier`]: a dense member vector plus a per-cell position
//!   table. Removal swaps the last member into the hole, so the vector never
//!   has gaps.
//! - [`ArenaFrontier`]: a slot arena that leaves tombstones on removal and
//!   compacts once the wasted share of its slots passes a threshold. Slot
//!   order stays stable between compactions.
//!
//! Both expose their storage through [`Frontier::slots`], where vacant slots
//! hold [`CellId::VACANT`]. Scanners skip vacant slots.

mod arena;
mod indexed;

pub use arena::ArenaFrontier;
pub use indexed::IndexedFrontier;

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::grid::CellId;

/// Sentinel in position tables for "not a member".
pub(crate) const NOT_PRESENT: u32 = u32::MAX;

/// Set of frontier cells.
///
/// Implementations are sized for a fixed grid: every `CellId` passed in must
/// be below the cell count given at construction.
pub trait Frontier: fmt::Debug + Send + Sync {
    /// Insert `id`. Returns `false` if it was already a member.
    fn try_add(&mut self, id: CellId) -> bool;

    /// Remove `id`. Returns `false` if it was not a member.
    fn try_remove(&mut self, id: CellId) -> bool;

    fn contains(&self, id: CellId) -> bool;

    /// Number of live members.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every member, keeping allocations.
    fn clear(&mut self);

    /// Backing storage. Vacant slots hold [`CellId::VACANT`].
    fn slots(&self) -> &[CellId];

    /// How many times storage was compacted since construction.
    fn compactions(&self) -> usize {
        0
    }

    /// Live members in slot order.
    fn members(&self) -> Vec<CellId> {
        self.slots()
            .iter()
            .copied()
            .filter(|id| !id.is_vacant())
            .collect()
    }
}

/// When an [`ArenaFrontier`] compacts its slots.
///
/// Compaction runs once `allocated / live` exceeds `ratio` and at least
/// `min_holes` slots are vacant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactionPolicy {
    pub ratio: f64,
    pub min_holes: usize,
}

impl CompactionPolicy {
    pub fn new(ratio: f64, min_holes: usize) -> Self {
        Self { ratio, min_holes }
    }

    /// `true` when `allocated` slots holding `live` members waste enough to
    /// be worth compacting.
    #[inline]
    pub fn should_compact(&self, allocated: usize, live: usize) -> bool {
        let holes = allocated.saturating_sub(live);
        holes > 0 && holes >= self.min_holes && allocated as f64 > live as f64 * self.ratio
    }
}

impl Default for CompactionPolicy {
    fn default() -> Self {
        Self {
            ratio: 1.05,
            min_holes: 1024,
        }
    }
}

/// Frontier implementation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierKind {
    /// [`IndexedFrontier`], swap-remove, never holes.
    #[default]
    Indexed,
    /// [`ArenaFrontier`], tombstones plus threshold compaction.
    Arena,
}

impl FrontierKind {
    pub const NAMES: &'static str = "indexed, arena";

    /// Build an empty frontier for a grid of `cells` cells.
    pub fn build(self, cells: usize, policy: CompactionPolicy) -> Box<dyn Frontier> {
        match self {
            FrontierKind::Indexed => Box::new(IndexedFrontier::new(cells)),
            FrontierKind::Arena => Box::new(ArenaFrontier::new(cells, policy)),
        }
    }
}

impl FromStr for FrontierKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indexed" => Ok(FrontierKind::Indexed),
            "arena" => Ok(FrontierKind::Arena),
            _ => Err(ConfigError::UnknownOption {
                kind: "frontier",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for FrontierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontierKind::Indexed => f.write_str("indexed"),
            FrontierKind::Arena => f.write_str("arena"),
        }
    }
}
