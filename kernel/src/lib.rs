//! Wayfinder Kernel: the state contract every traversal consumes.
//!
//! # API Surface
//!
//! - [`capability::SearchState`] -- the collaborator contract a domain state implements
//! - [`capability::ResolvedCapabilities`] -- goal/successor dispatch fixed once per traversal
//! - [`proof::canon::canonical_json_bytes`] -- canonical JSON for digested artifacts
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256
//!
//! # Module Dependency Direction
//!
//! `proof` ← `capability`
//!
//! One-way only. `capability` uses `proof` to fingerprint state keys.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod capability;
pub mod proof;

pub use capability::{
    Capabilities, GoalCapability, MoveRejected, ResolvedCapabilities, SearchState, StateKey,
    Successor, SuccessorCapability,
};
