//! Bounded LRU transposition table.
//!
//! Keyed by the 48-bit Code hash. Capacity is bounded at
//! [`crate::config::MAX_TRANSPOSITIONS`]; a lookup moves its entry to
//! the front of an intrusive doubly-linked list threaded through a
//! slab, and insertion past capacity evicts the tail -- true
//! least-recently-used eviction.

use std::collections::HashMap;

use crate::moves::Move;
use crate::piece::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    Exact,
    LowerBound,
    UpperBound,
}

/// Score and best move found for a position, stored from the
/// perspective of the side to move at the time it was stored.
#[derive(Clone, Copy, Debug)]
pub struct TranspositionEntry {
    pub hash: u64,
    pub score: i32,
    pub depth_searched: u32,
    pub bound: Bound,
    pub best_move: Option<Move>,
    pub stored_for: Color,
}

struct Slot {
    entry: TranspositionEntry,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A thread-confined bounded LRU cache of [`TranspositionEntry`].
/// Each search worker owns one; they are never shared across threads.
pub struct TranspositionTable {
    capacity: usize,
    slots: Vec<Slot>,
    index: HashMap<u64, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Vec<usize>,
}

impl TranspositionTable {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        TranspositionTable {
            capacity: capacity.max(1),
            slots: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            free: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.slots[idx].prev = None;
        self.slots[idx].next = None;
    }

    fn push_front(&mut self, idx: usize) {
        self.slots[idx].prev = None;
        self.slots[idx].next = self.head;
        if let Some(h) = self.head {
            self.slots[h].prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn touch(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.detach(idx);
        self.push_front(idx);
    }

    /// Looks up `hash`, moving it to the front on a hit. If the
    /// requested perspective differs from the perspective it was
    /// stored under, the score is negated to the requester's point of
    /// view.
    #[must_use]
    pub fn lookup(&mut self, hash: u64, for_color: Color) -> Option<TranspositionEntry> {
        let idx = *self.index.get(&hash)?;
        self.touch(idx);
        let mut entry = self.slots[idx].entry;
        if entry.stored_for != for_color {
            entry.score = -entry.score;
            entry.stored_for = for_color;
        }
        Some(entry)
    }

    /// Inserts or replaces the entry for `entry.hash`, evicting the
    /// least-recently-used entry if the table is at capacity.
    pub fn store(&mut self, entry: TranspositionEntry) {
        if let Some(&idx) = self.index.get(&entry.hash) {
            self.slots[idx].entry = entry;
            self.touch(idx);
            return;
        }

        let idx = if let Some(free_idx) = self.free.pop() {
            self.slots[free_idx] = Slot {
                entry,
                prev: None,
                next: None,
            };
            free_idx
        } else if self.slots.len() < self.capacity {
            self.slots.push(Slot {
                entry,
                prev: None,
                next: None,
            });
            self.slots.len() - 1
        } else {
            let evict = self.tail.expect("capacity > 0 implies a tail exists");
            self.detach(evict);
            let evicted_hash = self.slots[evict].entry.hash;
            self.index.remove(&evicted_hash);
            self.slots[evict] = Slot {
                entry,
                prev: None,
                next: None,
            };
            evict
        };

        self.index.insert(entry.hash, idx);
        self.push_front(idx);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hash: u64, score: i32) -> TranspositionEntry {
        TranspositionEntry {
            hash,
            score,
            depth_searched: 4,
            bound: Bound::Exact,
            best_move: None,
            stored_for: Color::White,
        }
    }

    #[test]
    fn stores_and_retrieves() {
        let mut tt = TranspositionTable::new(4);
        tt.store(entry(1, 100));
        let found = tt.lookup(1, Color::White).unwrap();
        assert_eq!(found.score, 100);
    }

    #[test]
    fn negates_score_for_opposite_perspective() {
        let mut tt = TranspositionTable::new(4);
        tt.store(entry(1, 100));
        let found = tt.lookup(1, Color::Black).unwrap();
        assert_eq!(found.score, -100);
    }

    #[test]
    fn evicts_least_recently_used_past_capacity() {
        let mut tt = TranspositionTable::new(2);
        tt.store(entry(1, 1));
        tt.store(entry(2, 2));
        // touch 1 so 2 becomes the LRU entry
        tt.lookup(1, Color::White);
        tt.store(entry(3, 3));
        assert!(tt.lookup(2, Color::White).is_none());
        assert!(tt.lookup(1, Color::White).is_some());
        assert!(tt.lookup(3, Color::White).is_some());
        assert_eq!(tt.len(), 2);
    }

    #[test]
    fn overwriting_an_existing_key_does_not_grow_table() {
        let mut tt = TranspositionTable::new(4);
        tt.store(entry(1, 1));
        tt.store(entry(1, 2));
        assert_eq!(tt.len(), 1);
        assert_eq!(tt.lookup(1, Color::White).unwrap().score, 2);
    }
}
