//! Per-node suspension hook.

use async_trait::async_trait;
use wayfinder_kernel::SearchState;

/// What the traversal should do after a hook resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitControl {
    Continue,
    /// In-band cancellation. The traversal returns with `stopped = true`.
    Stop,
}

/// The node being visited, as reported to a [`VisitHook`].
#[derive(Debug)]
pub struct Visit<'a, S: SearchState> {
    pub state: &'a S,
    pub depth: u32,
    /// Frontier size after this node was removed.
    pub frontier_len: usize,
    /// 1-based count of nodes visited so far, this one included.
    pub nodes_visited: u64,
}

/// Awaited once per visited node, before the goal test.
///
/// The traversal does not touch the frontier again until the returned
/// future resolves, so the hook for node *n + 1* never starts before the hook
/// for node *n* has finished.
#[async_trait]
pub trait VisitHook<S: SearchState>: Send {
    async fn on_visit(&mut self, visit: Visit<'_, S>) -> VisitControl;
}
