//! Slot-arena frontier with tombstones and threshold compaction.

use super::{CompactionPolicy, Frontier, NOT_PRESENT};
use crate::grid::CellId;

const MIN_CAPACITY: usize = 64;

/// Frontier backed by a slot arena.
///
/// Removal writes [`CellId::VACANT`] into the member's slot and leaves it
/// there; `positions` maps each cell to its slot. Trailing vacant slots are
/// popped immediately. Interior holes stay until the [`CompactionPolicy`]
/// says they waste enough capacity, at which point live members slide down
/// in order and are relabeled.
///
/// When an insert finds the arena full it either compacts (if the policy
/// allows) or reallocates at twice the capacity, copying and relabeling only
/// live members. Cell ids never change; only slot numbers do.
#[derive(Debug, Clone)]
pub struct ArenaFrontier {
    slots: Vec<CellId>,
    positions: Vec<u32>,
    live: usize,
    policy: CompactionPolicy,
    compactions: usize,
    grows: usize,
}

impl ArenaFrontier {
    /// Empty arena for a grid of `cells` cells.
    pub fn new(cells: usize, policy: CompactionPolicy) -> Self {
        Self {
            slots: Vec::with_capacity(MIN_CAPACITY),
            positions: vec![NOT_PRESENT; cells],
            live: 0,
            policy,
            compactions: 0,
            grows: 0,
        }
    }

    /// Allocated slot capacity.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Slots in use, including holes.
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Number of reallocations since construction.
    pub fn grows(&self) -> usize {
        self.grows
    }

    pub fn policy(&self) -> CompactionPolicy {
        self.policy
    }

    fn make_room(&mut self) {
        if self.policy.should_compact(self.slots.len(), self.live) {
            self.compact();
        }
        if self.slots.len() == self.slots.capacity() {
            self.grow();
        }
    }

    fn grow(&mut self) {
        let capacity = (self.slots.capacity() * 2).max(MIN_CAPACITY);
        let mut next = Vec::with_capacity(capacity);
        for &id in self.slots.iter().filter(|id| !id.is_vacant()) {
            self.positions[id.index()] = next.len() as u32;
            next.push(id);
        }
        self.slots = next;
        self.grows += 1;
        tracing::debug!(capacity, live = self.live, "Grew frontier arena");
    }

    fn compact(&mut self) {
        let before = self.slots.len();
        let mut write = 0;
        for read in 0..self.slots.len() {
            let id = self.slots[read];
            if id.is_vacant() {
                continue;
            }
            self.slots[write] = id;
            self.positions[id.index()] = write as u32;
            write += 1;
        }
        self.slots.truncate(write);
        self.compactions += 1;
        tracing::debug!(before, after = write, "Compacted frontier arena");
    }
}

impl Frontier for ArenaFrontier {
    fn try_add(&mut self, id: CellId) -> bool {
        if self.positions[id.index()] != NOT_PRESENT {
            return false;
        }
        if self.slots.len() == self.slots.capacity() {
            self.make_room();
        }
        self.positions[id.index()] = self.slots.len() as u32;
        self.slots.push(id);
        self.live += 1;
        true
    }

    fn try_remove(&mut self, id: CellId) -> bool {
        let pos = self.positions[id.index()];
        if pos == NOT_PRESENT {
            return false;
        }
        self.positions[id.index()] = NOT_PRESENT;
        self.slots[pos as usize] = CellId::VACANT;
        self.live -= 1;

        if self.live == 0 {
            self.slots.clear();
            return true;
        }
        while self.slots.last().is_some_and(|last| last.is_vacant()) {
            self.slots.pop();
        }
        if self.policy.should_compact(self.slots.len(), self.live) {
            self.compact();
        }
        true
    }

    #[inline]
    fn contains(&self, id: CellId) -> bool {
        self.positions[id.index()] != NOT_PRESENT
    }

    #[inline]
    fn len(&self) -> usize {
        self.live
    }

    fn clear(&mut self) {
        for &id in self.slots.iter().filter(|id| !id.is_vacant()) {
            self.positions[id.index()] = NOT_PRESENT;
        }
        self.slots.clear();
        self.live = 0;
    }

    #[inline]
    fn slots(&self) -> &[CellId] {
        &self.slots
    }

    fn compactions(&self) -> usize {
        self.compactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: u32) -> CellId {
        CellId::new(i)
    }

    /// Policy that never fires, to observe raw tombstone behavior.
    fn never() -> CompactionPolicy {
        CompactionPolicy::new(f64::INFINITY, usize::MAX)
    }

    #[test]
    fn test_removal_leaves_tombstone() {
        let mut arena = ArenaFrontier::new(10, never());
        for i in 0..4 {
            arena.try_add(id(i));
        }
        arena.try_remove(id(1));
        assert_eq!(arena.slots(), &[id(0), CellId::VACANT, id(2), id(3)]);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.allocated(), 4);
    }

    #[test]
    fn test_trailing_holes_are_popped() {
        let mut arena = ArenaFrontier::new(10, never());
        for i in 0..4 {
            arena.try_add(id(i));
        }
        arena.try_remove(id(2));
        arena.try_remove(id(3));
        assert_eq!(arena.slots(), &[id(0), id(1)]);
    }

    #[test]
    fn test_grow_keeps_members_and_drops_holes() {
        let mut arena = ArenaFrontier::new(1000, never());
        for i in 0..MIN_CAPACITY as u32 {
            arena.try_add(id(i));
        }
        arena.try_remove(id(0));
        arena.try_remove(id(10));
        assert_eq!(arena.allocated(), MIN_CAPACITY);

        // Arena is full; the next add must reallocate and relabel.
        arena.try_add(id(500));
        assert!(arena.grows() >= 1);
        assert!(arena.capacity() >= 2 * MIN_CAPACITY);
        assert_eq!(arena.len(), MIN_CAPACITY - 1);
        assert_eq!(arena.allocated(), MIN_CAPACITY - 1);
        assert!(!arena.contains(id(0)));
        assert!(!arena.contains(id(10)));
        for i in (1..MIN_CAPACITY as u32).filter(|&i| i != 10) {
            assert!(arena.contains(id(i)), "lost member {i}");
        }
        assert!(arena.contains(id(500)));

        // Relabeled members can still be removed.
        assert!(arena.try_remove(id(63)));
        assert!(arena.try_remove(id(500)));
        assert!(!arena.contains(id(63)));
    }

    #[test]
    fn test_compacts_past_threshold() {
        let mut arena = ArenaFrontier::new(200, CompactionPolicy::new(1.05, 0));
        for i in 0..100 {
            arena.try_add(id(i));
        }
        for i in 0..10 {
            arena.try_remove(id(i * 2));
        }
        assert!(arena.compactions() > 0);
        assert!(arena.allocated() as f64 <= arena.len() as f64 * 1.05);

        let members = arena.members();
        let expected: Vec<_> = (0..100)
            .filter(|&i| !(i < 20 && i % 2 == 0))
            .map(id)
            .collect();
        assert_eq!(members, expected, "compaction must keep slot order");
    }

    #[test]
    fn test_min_holes_defers_compaction() {
        let mut arena = ArenaFrontier::new(200, CompactionPolicy::new(1.05, 50));
        for i in 0..100 {
            arena.try_add(id(i));
        }
        for i in 0..20 {
            arena.try_remove(id(i));
        }
        assert_eq!(arena.compactions(), 0);
        assert_eq!(arena.allocated(), 100);
    }

    #[test]
    fn test_emptying_resets_slots() {
        let mut arena = ArenaFrontier::new(10, never());
        arena.try_add(id(3));
        arena.try_add(id(4));
        arena.try_remove(id(3));
        arena.try_remove(id(4));
        assert!(arena.is_empty());
        assert_eq!(arena.allocated(), 0);
    }
}
