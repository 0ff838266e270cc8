//! Full search-tree materialization for visualization.
//!
//! Unlike [`crate::engine::GraphSearchEngine`], the builder does not stop at
//! the first goal. Every generated transition becomes a [`TreeNode`],
//! duplicates included, so the result can be rendered as-is.
//!
//! Duplicate handling is shortest-seen-wins: a child whose key was already
//! reached at the same or a smaller depth is kept as a flagged leaf, while a
//! child that reaches a known key strictly shallower lowers the stored depth
//! and is expanded again.

use std::fmt;

use tracing::{debug, info};
use wayfinder_kernel::{ResolvedCapabilities, SearchState, Successor};

use crate::diagnostics::{LogDomain, LogPolicy, Severity};
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::policy::{Strategy, TreePolicy};
use crate::visited::{Revisit, VisitedIndex};

/// Display label attached to a node at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Goal,
    Duplicate { first_depth: u32 },
    /// A goal reached again; pruned as a duplicate.
    DuplicateGoal { first_depth: u32 },
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Goal => f.write_str("goal"),
            Self::Duplicate { first_depth } => {
                write!(f, "duplicate (seen at depth {first_depth})")
            }
            Self::DuplicateGoal { first_depth } => {
                write!(f, "goal, duplicate (seen at depth {first_depth})")
            }
        }
    }
}

/// One explored transition.
///
/// `depth` is the parent's depth plus one. `children` keep generation order.
#[derive(Debug, Clone)]
pub struct TreeNode<S: SearchState> {
    /// Unique within one tree, assigned when the node is created.
    ///
    /// Siblings are created together when their parent is expanded, so ids
    /// follow visitation order only under breadth-first. Under depth-first
    /// siblings are created in reverse declared order: the first child
    /// visited carries the largest id of its siblings.
    pub id: usize,
    pub state: S,
    pub depth: u32,
    /// `None` only for the root.
    pub parent_move: Option<S::Move>,
    pub children: Vec<TreeNode<S>>,
    pub is_duplicate: bool,
    pub is_solution: bool,
    pub annotation: Option<Annotation>,
}

impl<S: SearchState> TreeNode<S> {
    /// Pre-order walk over this node and its descendants.
    #[must_use]
    pub fn iter(&self) -> PreOrder<'_, S> {
        PreOrder { stack: vec![self] }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn find(&self, id: usize) -> Option<&TreeNode<S>> {
        self.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Move sequences from this node to every solution node below it, in
    /// pre-order.
    #[must_use]
    pub fn solution_paths(&self) -> Vec<Vec<S::Move>> {
        let mut paths = Vec::new();
        let mut trail = Vec::new();
        collect_solutions(self, &mut trail, &mut paths);
        paths
    }
}

fn collect_solutions<S: SearchState>(
    node: &TreeNode<S>,
    trail: &mut Vec<S::Move>,
    paths: &mut Vec<Vec<S::Move>>,
) {
    if node.is_solution {
        paths.push(trail.clone());
    }
    for child in &node.children {
        if let Some(mv) = &child.parent_move {
            trail.push(mv.clone());
            collect_solutions(child, trail, paths);
            trail.pop();
        }
    }
}

/// Pre-order iterator returned by [`TreeNode::iter`].
pub struct PreOrder<'a, S: SearchState> {
    stack: Vec<&'a TreeNode<S>>,
}

impl<'a, S: SearchState> Iterator for PreOrder<'a, S> {
    type Item = &'a TreeNode<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Aggregate counters for one generated tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total `TreeNode` count, duplicates and goals included.
    pub nodes_visited: usize,
    pub duplicates: usize,
    pub solutions: usize,
    /// Revisits that lowered a stored depth and were expanded again.
    pub improved_revisits: usize,
    pub deepest: u32,
}

/// The generated tree together with the policy that produced it.
#[derive(Debug, Clone)]
pub struct SearchTree<S: SearchState> {
    pub root: TreeNode<S>,
    pub policy: TreePolicy,
    pub stats: TreeStats,
}

/// Materializes every explored node up to `max_depth`.
pub struct SearchTreeBuilder {
    policy: TreePolicy,
    log: LogPolicy,
}

impl SearchTreeBuilder {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    pub fn new(policy: TreePolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self {
            policy,
            log: LogPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_log_policy(mut self, log: LogPolicy) -> Self {
        self.log = log;
        self
    }

    #[must_use]
    pub fn policy(&self) -> &TreePolicy {
        &self.policy
    }

    /// Explore from `start` and return the full tree rooted at a clone of it.
    pub fn generate_tree<S: SearchState>(&self, start: &S) -> SearchTree<S> {
        let caps = ResolvedCapabilities::<S>::resolve();
        let policy = &self.policy;

        // Breadth-first keeps declared order. Depth-first generates in
        // reverse so the stack still pops the first declared move first.
        let arrange: fn(&mut [Successor<S>]) = match policy.strategy {
            Strategy::BreadthFirst => keep_declared_order,
            Strategy::DepthFirst => reverse_declared_order,
        };

        if self.log.enabled(LogDomain::Tree, Severity::Info) {
            info!(
                target: "wayfinder::tree",
                strategy = policy.strategy.as_str(),
                max_depth = policy.max_depth,
                check_duplicates = policy.check_duplicates,
                continue_after_goal = policy.continue_after_goal,
                "tree generation started"
            );
        }

        let mut visited = VisitedIndex::new();
        let mut stats = TreeStats::default();

        if policy.check_duplicates {
            visited.observe_shallowest(start.state_key(), 0);
        }
        let root_is_goal = caps.is_goal(start);
        let mut arena = Arena::new(PendingNode {
            state: start.clone(),
            depth: 0,
            parent_move: None,
            children: Vec::new(),
            is_duplicate: false,
            is_solution: root_is_goal,
            annotation: root_is_goal.then_some(Annotation::Goal),
        });
        stats.nodes_visited = 1;
        stats.solutions = usize::from(root_is_goal);

        let mut frontier: Frontier<usize> = Frontier::new(policy.strategy);
        if self.expandable(0, root_is_goal, false) {
            frontier.push(0);
        }

        while let Some(parent_id) = frontier.pop() {
            let parent = arena.get(parent_id);
            let child_depth = parent.depth + 1;
            let mut successors = caps.successors(&parent.state);
            arrange(&mut successors);

            for Successor { mv, state } in successors {
                let is_solution = caps.is_goal(&state);
                let revisit = if policy.check_duplicates {
                    visited.observe_shallowest(state.state_key(), child_depth)
                } else {
                    Revisit::New
                };

                let (is_duplicate, annotation) = match (revisit, is_solution) {
                    (Revisit::Duplicate { stored }, true) => {
                        (true, Some(Annotation::DuplicateGoal { first_depth: stored }))
                    }
                    (Revisit::Duplicate { stored }, false) => {
                        (true, Some(Annotation::Duplicate { first_depth: stored }))
                    }
                    (_, true) => (false, Some(Annotation::Goal)),
                    (_, false) => (false, None),
                };

                if let Revisit::Improved { previous } = revisit {
                    stats.improved_revisits += 1;
                    if self.log.enabled(LogDomain::Tree, Severity::Debug) {
                        debug!(
                            target: "wayfinder::tree",
                            key = %state.state_key(),
                            previous,
                            depth = child_depth,
                            "shorter route to known state"
                        );
                    }
                }

                stats.nodes_visited += 1;
                stats.duplicates += usize::from(is_duplicate);
                stats.solutions += usize::from(is_solution);
                stats.deepest = stats.deepest.max(child_depth);

                let expand = self.expandable(child_depth, is_solution, is_duplicate);
                let child_id = arena.push(
                    parent_id,
                    PendingNode {
                        state,
                        depth: child_depth,
                        parent_move: Some(mv),
                        children: Vec::new(),
                        is_duplicate,
                        is_solution,
                        annotation,
                    },
                );
                if expand {
                    frontier.push(child_id);
                }
            }
        }

        if self.log.enabled(LogDomain::Tree, Severity::Info) {
            info!(
                target: "wayfinder::tree",
                nodes = stats.nodes_visited,
                duplicates = stats.duplicates,
                solutions = stats.solutions,
                frontier_high_water = frontier.high_water(),
                "tree generation finished"
            );
        }

        SearchTree {
            root: arena.into_tree(),
            policy: policy.clone(),
            stats,
        }
    }

    fn expandable(&self, depth: u32, is_solution: bool, is_duplicate: bool) -> bool {
        !is_duplicate
            && (self.policy.continue_after_goal || !is_solution)
            && depth < self.policy.max_depth
    }
}

fn keep_declared_order<T>(_successors: &mut [T]) {}

fn reverse_declared_order<T>(successors: &mut [T]) {
    successors.reverse();
}

/// A node whose children are still being generated.
struct PendingNode<S: SearchState> {
    state: S,
    depth: u32,
    parent_move: Option<S::Move>,
    children: Vec<usize>,
    is_duplicate: bool,
    is_solution: bool,
    annotation: Option<Annotation>,
}

impl<S: SearchState> PendingNode<S> {
    fn finish(self, id: usize, built: &mut [Option<TreeNode<S>>]) -> TreeNode<S> {
        let children = self
            .children
            .iter()
            .filter_map(|&child| built[child - 1].take())
            .collect();
        TreeNode {
            id,
            state: self.state,
            depth: self.depth,
            parent_move: self.parent_move,
            children,
            is_duplicate: self.is_duplicate,
            is_solution: self.is_solution,
            annotation: self.annotation,
        }
    }
}

/// Flat node table indexed by id. The root is id 0; `rest[i]` is id `i + 1`.
struct Arena<S: SearchState> {
    root: PendingNode<S>,
    rest: Vec<PendingNode<S>>,
}

impl<S: SearchState> Arena<S> {
    fn new(root: PendingNode<S>) -> Self {
        Self {
            root,
            rest: Vec::new(),
        }
    }

    fn get(&self, id: usize) -> &PendingNode<S> {
        if id == 0 {
            &self.root
        } else {
            &self.rest[id - 1]
        }
    }

    fn get_mut(&mut self, id: usize) -> &mut PendingNode<S> {
        if id == 0 {
            &mut self.root
        } else {
            &mut self.rest[id - 1]
        }
    }

    /// Append `node` under `parent` and return its id.
    fn push(&mut self, parent: usize, node: PendingNode<S>) -> usize {
        self.rest.push(node);
        let id = self.rest.len();
        self.get_mut(parent).children.push(id);
        id
    }

    /// Nest the flat table. Children always carry larger ids than their
    /// parent, so a single descending pass sees every child before its parent.
    fn into_tree(self) -> TreeNode<S> {
        let mut built: Vec<Option<TreeNode<S>>> =
            std::iter::repeat_with(|| None).take(self.rest.len()).collect();
        for (index, pending) in self.rest.into_iter().enumerate().rev() {
            let node = pending.finish(index + 1, &mut built);
            built[index] = Some(node);
        }
        self.root.finish(0, &mut built)
    }
}
