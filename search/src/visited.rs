//! State-key index recording the shallowest confirmed depth per key.
//!
//! `BTreeMap` rather than `HashMap` so any iteration over the index is
//! deterministic.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use wayfinder_kernel::StateKey;

/// Outcome of offering a key to [`VisitedIndex::observe_shallowest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revisit {
    /// Key was absent; now stored at the offered depth.
    New,
    /// Key was stored deeper; the stored depth dropped to the offered one.
    Improved { previous: u32 },
    /// Key was stored at the same or a shallower depth. Nothing changed.
    Duplicate { stored: u32 },
}

/// Mapping from state key to the shallowest depth it was reached at.
///
/// Owned by one traversal call and discarded with it.
#[derive(Debug, Default)]
pub struct VisitedIndex {
    depths: BTreeMap<StateKey, u32>,
}

impl VisitedIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First-seen-wins registration.
    ///
    /// Returns `false` if the key was already present; the stored depth is
    /// never updated.
    pub fn register_first_seen(&mut self, key: StateKey, depth: u32) -> bool {
        match self.depths.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(depth);
                true
            }
        }
    }

    /// Shortest-seen-wins registration.
    ///
    /// A strictly smaller depth replaces the stored one. Equal or greater
    /// depths are reported as duplicates.
    pub fn observe_shallowest(&mut self, key: StateKey, depth: u32) -> Revisit {
        match self.depths.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(depth);
                Revisit::New
            }
            Entry::Occupied(mut slot) => {
                let stored = *slot.get();
                if depth < stored {
                    slot.insert(depth);
                    Revisit::Improved { previous: stored }
                } else {
                    Revisit::Duplicate { stored }
                }
            }
        }
    }

    #[must_use]
    pub fn contains(&self, key: &StateKey) -> bool {
        self.depths.contains_key(key)
    }

    #[must_use]
    pub fn depth_of(&self, key: &StateKey) -> Option<u32> {
        self.depths.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}
