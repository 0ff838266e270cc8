//! Observer contract: what a stepwise run reports to the outside.
//!
//! The observer is the per-step UI update. Its `on_step` future is a
//! suspension point: the controller does not pop the next frontier node
//! until it resolves.

use async_trait::async_trait;
use wayfinder_kernel::SearchState;
use wayfinder_search::{SolveOutcome, VisitControl};

/// One visited node, as seen by the observer.
#[derive(Debug)]
pub struct StepEvent<'a, S: SearchState> {
    /// 1-based step index within the run.
    pub index: u64,
    pub state: &'a S,
    pub depth: u32,
    /// Frontier size after this node was popped.
    pub frontier_len: usize,
}

/// How a run ended, from the observer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The search found a goal or ran out of nodes.
    Completed,
    /// `stop()` or the observer cancelled the run.
    Stopped,
}

/// Final payload of a run.
#[derive(Debug, Clone)]
pub struct RunReport<S: SearchState> {
    pub status: RunStatus,
    pub outcome: SolveOutcome<S>,
    /// Observer steps taken.
    pub steps: u64,
}

#[async_trait]
pub trait StepObserver<S: SearchState>: Send {
    /// Called once per visited node, in traversal order.
    ///
    /// Returning [`VisitControl::Stop`] cancels the run.
    async fn on_step(&mut self, event: StepEvent<'_, S>) -> VisitControl;

    /// Called exactly once when the run ends.
    async fn on_complete(&mut self, _report: &RunReport<S>) {}
}
