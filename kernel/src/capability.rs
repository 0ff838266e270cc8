//! The state capability contract consumed by every traversal.
//!
//! A state type declares up front which optional members it supports through
//! [`SearchState::CAPABILITIES`]. Traversals read that declaration once, via
//! [`ResolvedCapabilities::resolve`], and never probe the state again.
//!
//! # Contract
//!
//! - `clone()` must produce a value with no aliasing back to the original.
//!   Shared interior mutability between clones corrupts duplicate and goal
//!   detection and is not detected at runtime.
//! - `state_key()` must be injective over state identity: equal states give
//!   equal keys, distinct reachable states give distinct keys.
//! - Successor enumeration must be bounded and must not mutate anything
//!   outside the returned states.

use std::fmt;

use crate::proof::hash::{canonical_hash, ContentHash, DOMAIN_STATE_KEY};

/// Stable identity string for a state, used for duplicate suppression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(String);

impl StateKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fixed-width content hash of the key, for artifact consumers.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        canonical_hash(DOMAIN_STATE_KEY, self.0.as_bytes())
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StateKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for StateKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// A move together with the state it produces.
#[derive(Debug, Clone)]
pub struct Successor<S: SearchState> {
    pub mv: S::Move,
    pub state: S,
}

impl<S: SearchState> Successor<S> {
    #[must_use]
    pub fn new(mv: S::Move, state: S) -> Self {
        Self { mv, state }
    }
}

/// A move the state refused to apply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("move rejected: {reason}")]
pub struct MoveRejected {
    pub reason: String,
}

impl MoveRejected {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// How a state signals that the traversal can stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalCapability {
    /// [`SearchState::is_goal`] is implemented.
    Predicate,
    /// No goal predicate; [`SearchState::is_terminal`] is the agreed sentinel.
    TerminalSentinel,
}

/// How a state enumerates its successors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessorCapability {
    /// [`SearchState::next_states`] yields `(move, state)` pairs directly.
    Generator,
    /// [`SearchState::valid_moves`] lists moves; each is applied to a clone
    /// with [`SearchState::apply_move`]. Rejected moves are dropped.
    MoveEnumeration,
    /// The state cannot be expanded. Every node is a dead end.
    None,
}

/// The capability declaration of a state type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub goal: GoalCapability,
    pub successors: SuccessorCapability,
}

impl Capabilities {
    #[must_use]
    pub const fn new(goal: GoalCapability, successors: SuccessorCapability) -> Self {
        Self { goal, successors }
    }
}

/// A discrete state that can be searched.
///
/// Only [`state_key`](Self::state_key) is mandatory. The optional members
/// have neutral defaults and are called only when
/// [`CAPABILITIES`](Self::CAPABILITIES) declares them.
pub trait SearchState: Clone + Send + Sync {
    /// Label of a transition between two states.
    type Move: Clone + fmt::Display + fmt::Debug + Send + Sync;

    /// Which optional members this type implements.
    const CAPABILITIES: Capabilities;

    /// Identity key for duplicate suppression.
    fn state_key(&self) -> StateKey;

    /// Apply `mv` in place.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejected`] if the move is not legal in this state. The
    /// state must be left unchanged in that case.
    fn apply_move(&mut self, mv: &Self::Move) -> Result<(), MoveRejected> {
        Err(MoveRejected::new(format!("{mv} is not applicable")))
    }

    fn is_goal(&self) -> bool {
        false
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn next_states(&self) -> Vec<Successor<Self>> {
        Vec::new()
    }

    fn valid_moves(&self) -> Vec<Self::Move> {
        Vec::new()
    }
}

/// Goal test and successor dispatch fixed for one traversal.
pub struct ResolvedCapabilities<S: SearchState> {
    declared: Capabilities,
    goal: fn(&S) -> bool,
    successors: fn(&S) -> Vec<Successor<S>>,
}

impl<S: SearchState> ResolvedCapabilities<S> {
    /// Read `S::CAPABILITIES` and bind the matching members.
    #[must_use]
    pub fn resolve() -> Self {
        let declared = S::CAPABILITIES;
        let goal: fn(&S) -> bool = match declared.goal {
            GoalCapability::Predicate => S::is_goal,
            GoalCapability::TerminalSentinel => S::is_terminal,
        };
        let successors: fn(&S) -> Vec<Successor<S>> = match declared.successors {
            SuccessorCapability::Generator => S::next_states,
            SuccessorCapability::MoveEnumeration => by_move_enumeration::<S>,
            SuccessorCapability::None => no_successors::<S>,
        };
        Self {
            declared,
            goal,
            successors,
        }
    }

    #[must_use]
    pub fn declared(&self) -> Capabilities {
        self.declared
    }

    /// `false` when the state type declares no successor capability.
    #[must_use]
    pub fn can_expand(&self) -> bool {
        self.declared.successors != SuccessorCapability::None
    }

    #[must_use]
    pub fn is_goal(&self, state: &S) -> bool {
        (self.goal)(state)
    }

    #[must_use]
    pub fn successors(&self, state: &S) -> Vec<Successor<S>> {
        (self.successors)(state)
    }
}

fn by_move_enumeration<S: SearchState>(state: &S) -> Vec<Successor<S>> {
    state
        .valid_moves()
        .into_iter()
        .filter_map(|mv| {
            let mut next = state.clone();
            next.apply_move(&mv).ok()?;
            Some(Successor::new(mv, next))
        })
        .collect()
}

fn no_successors<S: SearchState>(_state: &S) -> Vec<Successor<S>> {
    Vec::new()
}
