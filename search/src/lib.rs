//! Wayfinder Search: breadth-first / depth-first state-space traversal.
//!
//! This crate provides the traversal layer. It depends only on
//! `wayfinder_kernel` and does NOT depend on `wayfinder_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfinder_kernel  ←  wayfinder_search  ←  wayfinder_harness
//! (state contract)     (engine, tree)        (stepwise controller, worlds)
//! ```
//!
//! # Key types
//!
//! - [`GraphSearchEngine`] -- goal search with first-seen-wins dedup and a per-node hook
//! - [`SearchTreeBuilder`] -- full tree materialization with shortest-seen-wins dedup
//! - [`Frontier`] -- FIFO/LIFO deque selected at construction
//! - [`VisitedIndex`] -- state key → shallowest depth
//! - [`VisitHook`] -- awaitable per-node suspension point
//! - [`LogPolicy`] -- injected per-domain diagnostic thresholds

#![forbid(unsafe_code)]

pub mod artifact;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod hook;
pub mod node;
pub mod policy;
pub mod tree;
pub mod visited;

pub use diagnostics::{init_tracing, LogDomain, LogPolicy, Severity};
pub use engine::{GraphSearchEngine, SolveOutcome, SuccessorOrder, Termination};
pub use error::SearchError;
pub use frontier::Frontier;
pub use hook::{Visit, VisitControl, VisitHook};
pub use node::SearchNode;
pub use policy::{SearchPolicy, Strategy, TreePolicy, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING};
pub use tree::{Annotation, SearchTree, SearchTreeBuilder, TreeNode, TreeStats};
pub use visited::{Revisit, VisitedIndex};
