//! Subtraction game: take one, two or three from a pile.
//!
//! The position is terminal when the pile is empty. This world declares the
//! terminal sentinel instead of a goal predicate, so a search stops at the
//! first empty pile it reaches.

use wayfinder_kernel::{
    Capabilities, GoalCapability, SearchState, StateKey, Successor, SuccessorCapability,
};

/// Largest number of items a single move may take.
pub const MAX_TAKE: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subtraction {
    pub pile: u32,
}

impl Subtraction {
    #[must_use]
    pub fn new(pile: u32) -> Self {
        Self { pile }
    }
}

impl SearchState for Subtraction {
    /// Items taken.
    type Move = u32;
    const CAPABILITIES: Capabilities =
        Capabilities::new(GoalCapability::TerminalSentinel, SuccessorCapability::Generator);

    fn state_key(&self) -> StateKey {
        StateKey::new(format!("pile:{}", self.pile))
    }

    fn is_terminal(&self) -> bool {
        self.pile == 0
    }

    fn next_states(&self) -> Vec<Successor<Self>> {
        (1..=MAX_TAKE.min(self.pile))
            .map(|take| Successor::new(take, Self::new(self.pile - take)))
            .collect()
    }
}
