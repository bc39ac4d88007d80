//! Dense frontier with swap-remove.

use super::{Frontier, NOT_PRESENT};
use crate::grid::CellId;

/// Frontier backed by a gap-free member vector.
///
/// `positions[cell]` holds the member's index in `members`, or
/// `NOT_PRESENT`. Removing a member moves the last member into its slot.
#[derive(Debug, Clone)]
pub struct IndexedFrontier {
    members: Vec<CellId>,
    positions: Vec<u32>,
}

impl IndexedFrontier {
    /// Empty frontier for a grid of `cells` cells.
    pub fn new(cells: usize) -> Self {
        Self {
            members: Vec::new(),
            positions: vec![NOT_PRESENT; cells],
        }
    }
}

impl Frontier for IndexedFrontier {
    fn try_add(&mut self, id: CellId) -> bool {
        let pos = &mut self.positions[id.index()];
        if *pos != NOT_PRESENT {
            return false;
        }
        *pos = self.members.len() as u32;
        self.members.push(id);
        true
    }

    fn try_remove(&mut self, id: CellId) -> bool {
        let pos = self.positions[id.index()];
        if pos == NOT_PRESENT {
            return false;
        }
        self.positions[id.index()] = NOT_PRESENT;
        self.members.swap_remove(pos as usize);
        if let Some(&moved) = self.members.get(pos as usize) {
            self.positions[moved.index()] = pos;
        }
        true
    }

    #[inline]
    fn contains(&self, id: CellId) -> bool {
        self.positions[id.index()] != NOT_PRESENT
    }

    #[inline]
    fn len(&self) -> usize {
        self.members.len()
    }

    fn clear(&mut self) {
        for id in self.members.drain(..) {
            self.positions[id.index()] = NOT_PRESENT;
        }
    }

    #[inline]
    fn slots(&self) -> &[CellId] {
        &self.members
    }
}
