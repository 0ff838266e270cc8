//! `Sealed`: a state that declares no way to produce successors.
//!
//! Every node of this type is a dead end. Traversals treat the missing
//! capability as zero children and carry on.

use wayfinder_kernel::{
    Capabilities, GoalCapability, SearchState, StateKey, SuccessorCapability,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub name: String,
    pub goal: bool,
}

impl Sealed {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goal: false,
        }
    }

    #[must_use]
    pub fn goal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goal: true,
        }
    }
}

impl SearchState for Sealed {
    type Move = String;
    const CAPABILITIES: Capabilities =
        Capabilities::new(GoalCapability::Predicate, SuccessorCapability::None);

    fn state_key(&self) -> StateKey {
        StateKey::new(format!("sealed:{}", self.name))
    }

    fn is_goal(&self) -> bool {
        self.goal
    }
}
