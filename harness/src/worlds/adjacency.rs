//! `AdjacencyWorld`: a position on a fixed, labelled digraph.
//!
//! The graph is immutable and shared behind an `Arc`; a state is only the
//! index of the current vertex, so clones never alias anything mutable.
//! Successors follow edge declaration order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use wayfinder_kernel::{
    Capabilities, GoalCapability, SearchState, StateKey, Successor, SuccessorCapability,
};

#[derive(Debug, Default)]
struct Graph {
    labels: Vec<String>,
    index: BTreeMap<String, usize>,
    edges: Vec<Vec<usize>>,
    goals: BTreeSet<usize>,
}

impl Graph {
    fn vertex(&mut self, label: &str) -> usize {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        self.edges.push(Vec::new());
        id
    }

    fn with_vertices(count: usize, prefix: &str) -> Self {
        let mut graph = Self::default();
        for i in 0..count {
            graph.vertex(&format!("{prefix}{i}"));
        }
        graph
    }
}

/// Incremental graph construction by label.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a vertex with no edges (no-op if it exists).
    #[must_use]
    pub fn vertex(mut self, label: &str) -> Self {
        self.graph.vertex(label);
        self
    }

    /// Add `from -> to`, declaring either endpoint if needed.
    #[must_use]
    pub fn edge(mut self, from: &str, to: &str) -> Self {
        let from = self.graph.vertex(from);
        let to = self.graph.vertex(to);
        self.graph.edges[from].push(to);
        self
    }

    #[must_use]
    pub fn goal(mut self, label: &str) -> Self {
        let id = self.graph.vertex(label);
        self.graph.goals.insert(id);
        self
    }

    /// Freeze the graph and place a state on `label`.
    ///
    /// Returns `None` if no vertex has that label.
    #[must_use]
    pub fn start_at(self, label: &str) -> Option<AdjacencyWorld> {
        let at = *self.graph.index.get(label)?;
        Some(AdjacencyWorld {
            graph: Arc::new(self.graph),
            at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AdjacencyWorld {
    graph: Arc<Graph>,
    at: usize,
}

impl AdjacencyWorld {
    /// `S → A, S → B, A → C, B → C`; goal `C`. Starts at `S`.
    #[must_use]
    pub fn diamond() -> Self {
        let mut graph = Graph::default();
        let s = graph.vertex("S");
        let a = graph.vertex("A");
        let b = graph.vertex("B");
        let c = graph.vertex("C");
        graph.edges[s] = vec![a, b];
        graph.edges[a] = vec![c];
        graph.edges[b] = vec![c];
        graph.goals.insert(c);
        Self::place(graph, s)
    }

    /// `n0 → n1 → … → n{len-1}`; goal is the last vertex. Starts at `n0`.
    ///
    /// `len == 0` is treated as 1.
    #[must_use]
    pub fn linear(len: usize) -> Self {
        let len = len.max(1);
        let mut graph = Graph::with_vertices(len, "n");
        for i in 1..len {
            graph.edges[i - 1].push(i);
        }
        graph.goals.insert(len - 1);
        Self::place(graph, 0)
    }

    /// `r0 → r1 → … → r{len-1} → r0` with no goal. Starts at `r0`.
    #[must_use]
    pub fn ring(len: usize) -> Self {
        let len = len.max(1);
        let mut graph = Graph::with_vertices(len, "r");
        for i in 0..len {
            graph.edges[i].push((i + 1) % len);
        }
        Self::place(graph, 0)
    }

    /// Every vertex has an edge to every other; no goal. Starts at `k0`.
    #[must_use]
    pub fn complete(len: usize) -> Self {
        let len = len.max(1);
        let mut graph = Graph::with_vertices(len, "k");
        for from in 0..len {
            graph.edges[from] = (0..len).filter(|&to| to != from).collect();
        }
        Self::place(graph, 0)
    }

    fn place(graph: Graph, at: usize) -> Self {
        Self {
            graph: Arc::new(graph),
            at,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.graph.labels[self.at]
    }

    /// Another position on the same graph.
    #[must_use]
    pub fn at(&self, label: &str) -> Option<Self> {
        let at = *self.graph.index.get(label)?;
        Some(Self {
            graph: Arc::clone(&self.graph),
            at,
        })
    }

    #[must_use]
    pub fn out_degree(&self) -> usize {
        self.graph.edges[self.at].len()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.labels.len()
    }
}

/// Successor comparator: fewest onward edges first.
///
/// Meant for `GraphSearchEngine::with_successor_order`.
#[must_use]
pub fn fewest_onward_edges(
    a: &Successor<AdjacencyWorld>,
    b: &Successor<AdjacencyWorld>,
) -> Ordering {
    a.state.out_degree().cmp(&b.state.out_degree())
}

impl SearchState for AdjacencyWorld {
    type Move = String;
    const CAPABILITIES: Capabilities =
        Capabilities::new(GoalCapability::Predicate, SuccessorCapability::Generator);

    fn state_key(&self) -> StateKey {
        StateKey::new(self.label())
    }

    fn is_goal(&self) -> bool {
        self.graph.goals.contains(&self.at)
    }

    fn next_states(&self) -> Vec<Successor<Self>> {
        let from = self.label();
        self.graph.edges[self.at]
            .iter()
            .map(|&to| {
                let next = Self {
                    graph: Arc::clone(&self.graph),
                    at: to,
                };
                Successor::new(format!("{from}->{}", next.label()), next)
            })
            .collect()
    }
}
