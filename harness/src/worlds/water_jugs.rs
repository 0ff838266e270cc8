//! Two-jug measuring puzzle.
//!
//! Jugs hold `capacity_a` and `capacity_b` units; the goal is to have
//! exactly `target` units in either jug. Successors come from move
//! enumeration: every move is offered and `apply_move` rejects the ones
//! that would not change the state.

use std::fmt;

use wayfinder_kernel::{
    Capabilities, GoalCapability, MoveRejected, SearchState, StateKey, SuccessorCapability,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JugMove {
    FillA,
    FillB,
    EmptyA,
    EmptyB,
    PourAIntoB,
    PourBIntoA,
}

impl JugMove {
    pub const ALL: [Self; 6] = [
        Self::FillA,
        Self::FillB,
        Self::EmptyA,
        Self::EmptyB,
        Self::PourAIntoB,
        Self::PourBIntoA,
    ];
}

impl fmt::Display for JugMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FillA => "fill A",
            Self::FillB => "fill B",
            Self::EmptyA => "empty A",
            Self::EmptyB => "empty B",
            Self::PourAIntoB => "pour A into B",
            Self::PourBIntoA => "pour B into A",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterJugs {
    pub capacity_a: u32,
    pub capacity_b: u32,
    pub target: u32,
    pub a: u32,
    pub b: u32,
}

impl WaterJugs {
    /// Both jugs empty.
    #[must_use]
    pub fn new(capacity_a: u32, capacity_b: u32, target: u32) -> Self {
        Self {
            capacity_a,
            capacity_b,
            target,
            a: 0,
            b: 0,
        }
    }

    /// The classic 3- and 5-unit jugs measuring 4.
    #[must_use]
    pub fn classic() -> Self {
        Self::new(3, 5, 4)
    }
}

impl SearchState for WaterJugs {
    type Move = JugMove;
    const CAPABILITIES: Capabilities =
        Capabilities::new(GoalCapability::Predicate, SuccessorCapability::MoveEnumeration);

    fn state_key(&self) -> StateKey {
        StateKey::new(format!("jugs:{},{}", self.a, self.b))
    }

    fn apply_move(&mut self, mv: &JugMove) -> Result<(), MoveRejected> {
        let (a, b) = match mv {
            JugMove::FillA => (self.capacity_a, self.b),
            JugMove::FillB => (self.a, self.capacity_b),
            JugMove::EmptyA => (0, self.b),
            JugMove::EmptyB => (self.a, 0),
            JugMove::PourAIntoB => {
                let poured = self.a.min(self.capacity_b.saturating_sub(self.b));
                (self.a - poured, self.b + poured)
            }
            JugMove::PourBIntoA => {
                let poured = self.b.min(self.capacity_a.saturating_sub(self.a));
                (self.a + poured, self.b - poured)
            }
        };
        if (a, b) == (self.a, self.b) {
            return Err(MoveRejected::new(format!("{mv} changes nothing")));
        }
        self.a = a;
        self.b = b;
        Ok(())
    }

    fn is_goal(&self) -> bool {
        self.a == self.target || self.b == self.target
    }

    fn valid_moves(&self) -> Vec<JugMove> {
        JugMove::ALL.to_vec()
    }
}
