//! Graph search entry point and traversal loop.

use std::cmp::Ordering;

use tracing::{debug, info, trace};
use wayfinder_kernel::{ResolvedCapabilities, SearchState, Successor};

use crate::diagnostics::{LogDomain, LogPolicy, Severity};
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::hook::{Visit, VisitControl, VisitHook};
use crate::node::SearchNode;
use crate::policy::SearchPolicy;
use crate::visited::VisitedIndex;

/// Comparator applied to a node's successors before they are enqueued.
/// Successors that compare `Less` are expanded first.
pub type SuccessorOrder<S> = Box<dyn Fn(&Successor<S>, &Successor<S>) -> Ordering + Send + Sync>;

/// Why a solve returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A node passed the goal test.
    GoalReached { depth: u32 },
    /// Frontier emptied and no node was cut off by `max_depth`.
    FrontierExhausted,
    /// Frontier emptied after at least one node was cut off by `max_depth`.
    DepthLimitReached,
    /// The hook returned [`VisitControl::Stop`].
    Stopped,
}

/// Result of [`GraphSearchEngine::solve`].
///
/// Absence of a solution is an ordinary outcome, never an error.
#[derive(Debug, Clone)]
pub struct SolveOutcome<S: SearchState> {
    pub success: bool,
    /// Moves from the start state to the goal (empty unless `success`).
    pub path: Vec<S::Move>,
    pub nodes_visited: u64,
    pub stopped: bool,
    pub termination: Termination,
    /// The state that passed the goal test.
    pub goal_state: Option<S>,
    pub frontier_high_water: usize,
    /// Successors skipped because their key was already indexed.
    pub duplicates_suppressed: u64,
    /// Nodes popped at `max_depth` and not expanded.
    pub depth_cutoffs: u64,
    /// Nodes below `max_depth` that produced no successors.
    pub dead_ends: u64,
}

impl<S: SearchState> SolveOutcome<S> {
    /// Number of moves in the returned path.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.path.len()
    }
}

#[derive(Debug, Default)]
struct Counters {
    nodes_visited: u64,
    duplicates_suppressed: u64,
    depth_cutoffs: u64,
    dead_ends: u64,
}

/// Breadth-first / depth-first graph search with duplicate suppression.
///
/// Duplicate suppression is first-seen-wins: a key's stored depth never
/// shrinks. Under breadth-first order the first sighting is already the
/// shallowest, which is what makes the returned path shortest.
pub struct GraphSearchEngine<S: SearchState> {
    policy: SearchPolicy,
    log: LogPolicy,
    successor_order: Option<SuccessorOrder<S>>,
}

impl<S: SearchState> GraphSearchEngine<S> {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    pub fn new(policy: SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self {
            policy,
            log: LogPolicy::default(),
            successor_order: None,
        })
    }

    #[must_use]
    pub fn with_log_policy(mut self, log: LogPolicy) -> Self {
        self.log = log;
        self
    }

    /// Install a successor comparator (e.g. fewest onward moves first).
    ///
    /// Sorting is stable, so successors that compare equal keep their
    /// declared order.
    #[must_use]
    pub fn with_successor_order<F>(mut self, order: F) -> Self
    where
        F: Fn(&Successor<S>, &Successor<S>) -> Ordering + Send + Sync + 'static,
    {
        self.successor_order = Some(Box::new(order));
        self
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    #[must_use]
    pub fn log_policy(&self) -> &LogPolicy {
        &self.log
    }

    /// Run the traversal to a goal, exhaustion, or a hook-requested stop.
    ///
    /// When `hook` is supplied it is awaited once per popped node, before the
    /// goal test.
    pub async fn solve(
        &self,
        start: &S,
        mut hook: Option<&mut dyn VisitHook<S>>,
    ) -> SolveOutcome<S> {
        let caps = ResolvedCapabilities::<S>::resolve();
        let max_depth = self.policy.max_depth;
        let check_duplicates = self.policy.check_duplicates;

        if self.log.enabled(LogDomain::Engine, Severity::Info) {
            info!(
                target: "wayfinder::engine",
                strategy = self.policy.strategy.as_str(),
                max_depth,
                check_duplicates,
                start = %start.state_key(),
                "solve started"
            );
        }
        if !caps.can_expand() && self.log.enabled(LogDomain::Engine, Severity::Debug) {
            debug!(
                target: "wayfinder::engine",
                "state type declares no successor capability; every node is a dead end"
            );
        }

        let mut frontier = Frontier::new(self.policy.strategy);
        let mut visited = VisitedIndex::new();
        let mut counters = Counters::default();

        if check_duplicates {
            visited.register_first_seen(start.state_key(), 0);
        }
        frontier.push(SearchNode::root(start.clone()));

        while let Some(node) = frontier.pop() {
            counters.nodes_visited += 1;

            if self.log.enabled(LogDomain::Engine, Severity::Trace) {
                trace!(
                    target: "wayfinder::engine",
                    visit = counters.nodes_visited,
                    depth = node.depth,
                    frontier = frontier.len(),
                    key = %node.state.state_key(),
                    "visit"
                );
            }

            if let Some(hook) = hook.as_deref_mut() {
                let visit = Visit {
                    state: &node.state,
                    depth: node.depth,
                    frontier_len: frontier.len(),
                    nodes_visited: counters.nodes_visited,
                };
                if hook.on_visit(visit).await == VisitControl::Stop {
                    return self.finish(Termination::Stopped, None, &counters, &frontier);
                }
            }

            if caps.is_goal(&node.state) {
                let depth = node.depth;
                return self.finish(
                    Termination::GoalReached { depth },
                    Some(node),
                    &counters,
                    &frontier,
                );
            }

            if node.depth >= max_depth {
                counters.depth_cutoffs += 1;
                continue;
            }

            let mut successors = caps.successors(&node.state);
            if successors.is_empty() {
                counters.dead_ends += 1;
                continue;
            }
            if let Some(order) = &self.successor_order {
                successors.sort_by(|a, b| order(a, b));
            }

            let child_depth = node.depth + 1;
            let mut children = Vec::with_capacity(successors.len());
            for Successor { mv, state } in successors {
                if check_duplicates && !visited.register_first_seen(state.state_key(), child_depth)
                {
                    counters.duplicates_suppressed += 1;
                    continue;
                }
                children.push(node.child(mv, state));
            }
            frontier.push_prioritized(children);
        }

        let termination = if counters.depth_cutoffs > 0 {
            Termination::DepthLimitReached
        } else {
            Termination::FrontierExhausted
        };
        self.finish(termination, None, &counters, &frontier)
    }

    /// [`solve`](Self::solve) without a hook, driven to completion on the
    /// calling thread.
    pub fn solve_blocking(&self, start: &S) -> SolveOutcome<S> {
        futures::executor::block_on(self.solve(start, None))
    }

    fn finish(
        &self,
        termination: Termination,
        goal: Option<SearchNode<S>>,
        counters: &Counters,
        frontier: &Frontier<SearchNode<S>>,
    ) -> SolveOutcome<S> {
        if self.log.enabled(LogDomain::Engine, Severity::Info) {
            info!(
                target: "wayfinder::engine",
                termination = ?termination,
                nodes_visited = counters.nodes_visited,
                duplicates_suppressed = counters.duplicates_suppressed,
                depth_cutoffs = counters.depth_cutoffs,
                frontier_high_water = frontier.high_water(),
                "solve finished"
            );
        }

        let (path, goal_state) = match goal {
            Some(node) => (node.path, Some(node.state)),
            None => (Vec::new(), None),
        };
        SolveOutcome {
            success: matches!(termination, Termination::GoalReached { .. }),
            path,
            nodes_visited: counters.nodes_visited,
            stopped: termination == Termination::Stopped,
            termination,
            goal_state,
            frontier_high_water: frontier.high_water(),
            duplicates_suppressed: counters.duplicates_suppressed,
            depth_cutoffs: counters.depth_cutoffs,
            dead_ends: counters.dead_ends,
        }
    }
}
