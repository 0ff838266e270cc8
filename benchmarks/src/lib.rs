//! Shared regimes for wayfinder benchmark suites.

use wayfinder_harness::worlds::{AdjacencyWorld, Slide, SlidingTiles};
use wayfinder_search::{
    GraphSearchEngine, LogPolicy, SearchPolicy, SearchTreeBuilder, Strategy, TreePolicy,
};

/// A named start state with the depth ceiling it is benchmarked under.
pub struct Regime<S> {
    pub name: &'static str,
    pub start: S,
    pub max_depth: u32,
}

/// Eight-puzzle scrambles of increasing length.
#[must_use]
pub fn tile_regimes() -> Vec<Regime<SlidingTiles>> {
    use Slide::{Down, Left, Right, Up};
    vec![
        Regime {
            name: "tiles_scramble_4",
            start: SlidingTiles::scrambled(&[Up, Left, Up, Right]),
            max_depth: 8,
        },
        Regime {
            name: "tiles_scramble_8",
            start: SlidingTiles::scrambled(&[Up, Left, Up, Left, Down, Right, Down, Left]),
            max_depth: 12,
        },
        Regime {
            name: "tiles_scramble_12",
            start: SlidingTiles::scrambled(&[
                Up, Up, Left, Down, Left, Up, Right, Right, Down, Left, Down, Right,
            ]),
            max_depth: 16,
        },
    ]
}

/// Synthetic graphs that stress duplicate suppression and the depth ceiling.
#[must_use]
pub fn graph_regimes() -> Vec<Regime<AdjacencyWorld>> {
    vec![
        Regime {
            name: "ring_256",
            start: AdjacencyWorld::ring(256),
            max_depth: 512,
        },
        Regime {
            name: "complete_48_ceiling_3",
            start: AdjacencyWorld::complete(48),
            max_depth: 3,
        },
        Regime {
            name: "linear_1024",
            start: AdjacencyWorld::linear(1024),
            max_depth: 2048,
        },
    ]
}

/// A silent engine for timing.
///
/// # Panics
///
/// Panics if `max_depth` exceeds the policy ceiling. Benchmark setup
/// failures are fatal.
#[must_use]
pub fn silent_engine<S: wayfinder_kernel::SearchState>(
    strategy: Strategy,
    max_depth: u32,
) -> GraphSearchEngine<S> {
    GraphSearchEngine::new(SearchPolicy {
        strategy,
        max_depth,
        check_duplicates: true,
    })
    .expect("benchmark policy is valid")
    .with_log_policy(LogPolicy::quiet())
}

/// A silent tree builder for timing.
///
/// # Panics
///
/// Panics if `max_depth` exceeds the policy ceiling.
#[must_use]
pub fn silent_tree_builder(strategy: Strategy, max_depth: u32) -> SearchTreeBuilder {
    SearchTreeBuilder::new(TreePolicy {
        strategy,
        max_depth,
        ..TreePolicy::default()
    })
    .expect("benchmark policy is valid")
    .with_log_policy(LogPolicy::quiet())
}
