//! Wayfinder Harness: paced execution and reference worlds.
//!
//! [`StepwiseController`] wraps a [`GraphSearchEngine`] and turns its visit
//! hook into an observable, pausable run: every visited node is reported to
//! a [`StepObserver`]. In automatic mode the controller sleeps for the
//! configured delay after each report; in manual mode it holds each node
//! until a trigger releases it. [`ControllerHandle`] stops, re-paces and
//! steps the run from another task.
//!
//! The harness does not search on its own; traversal order, duplicate
//! handling and depth limits all belong to `wayfinder-search`.
//!
//! [`GraphSearchEngine`]: wayfinder_search::GraphSearchEngine

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod policy;
pub mod runner;
pub mod worlds;

pub use contract::{RunReport, RunStatus, StepEvent, StepObserver};
pub use policy::{ControllerConfig, Pacing, MANUAL_LEVEL, SPEED_DELAYS_MS};
pub use runner::{ControllerError, ControllerHandle, RunPhase, StepwiseController};
