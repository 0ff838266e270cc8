//! Termination and safety-ceiling lock tests.
//!
//! Proves:
//! 1. Both strategies terminate on cyclic graphs with duplicate suppression
//! 2. Exhaustion and the depth ceiling are ordinary outcomes
//!    (`success=false`, `stopped=false`), told apart by `termination`
//! 3. On a fully connected graph with no goal, `max_depth=3` bounds the
//!    visit count by the reachable node count
//! 4. States without a successor capability are dead ends, not errors

use lock_tests::engine;
use wayfinder_harness::worlds::{AdjacencyWorld, GraphBuilder, Sealed, Subtraction};
use wayfinder_search::{Strategy, Termination};

const STRATEGIES: [Strategy; 2] = [Strategy::BreadthFirst, Strategy::DepthFirst];

// ---------------------------------------------------------------------------
// 1. Cycles
// ---------------------------------------------------------------------------

#[test]
fn ring_without_goal_exhausts_under_both_strategies() {
    for strategy in STRATEGIES {
        let outcome =
            engine::<AdjacencyWorld>(strategy, 64).solve_blocking(&AdjacencyWorld::ring(7));
        assert!(!outcome.success, "{strategy:?}");
        assert!(!outcome.stopped, "{strategy:?}");
        assert_eq!(outcome.termination, Termination::FrontierExhausted);
        assert_eq!(outcome.nodes_visited, 7, "{strategy:?}");
        assert_eq!(outcome.duplicates_suppressed, 1, "{strategy:?}");
    }
}

#[test]
fn cyclic_graph_with_goal_is_solved_under_both_strategies() {
    // Two interlocked cycles; the goal hangs off the second.
    let start = GraphBuilder::new()
        .edge("a", "b")
        .edge("b", "c")
        .edge("c", "a")
        .edge("c", "d")
        .edge("d", "b")
        .edge("d", "goal")
        .goal("goal")
        .start_at("a")
        .expect("start exists");
    for strategy in STRATEGIES {
        let outcome = engine::<AdjacencyWorld>(strategy, 64).solve_blocking(&start);
        assert!(outcome.success, "{strategy:?}");
        assert_eq!(outcome.path_len(), 4, "{strategy:?}");
    }
}

#[test]
fn complete_graph_exhausts_without_ceiling_pressure() {
    for strategy in STRATEGIES {
        let outcome =
            engine::<AdjacencyWorld>(strategy, 64).solve_blocking(&AdjacencyWorld::complete(6));
        assert_eq!(outcome.termination, Termination::FrontierExhausted);
        assert_eq!(outcome.nodes_visited, 6);
    }
}

// ---------------------------------------------------------------------------
// 2–3. Safety ceiling
// ---------------------------------------------------------------------------

#[test]
fn fully_connected_no_goal_depth_three_is_bounded() {
    let world = AdjacencyWorld::complete(8);
    for strategy in STRATEGIES {
        let outcome = engine::<AdjacencyWorld>(strategy, 3).solve_blocking(&world);
        assert!(!outcome.success, "{strategy:?}");
        assert!(!outcome.stopped, "{strategy:?}");
        assert!(outcome.path.is_empty());
        assert!(
            outcome.nodes_visited <= world.vertex_count() as u64,
            "{strategy:?} visited {}",
            outcome.nodes_visited
        );
    }
}

#[test]
fn depth_ceiling_reports_depth_limit() {
    // Goal sits at depth 6; the ceiling is 3.
    let outcome = engine::<AdjacencyWorld>(Strategy::BreadthFirst, 3)
        .solve_blocking(&AdjacencyWorld::linear(7));
    assert!(!outcome.success);
    assert!(!outcome.stopped);
    assert_eq!(outcome.termination, Termination::DepthLimitReached);
    assert_eq!(outcome.nodes_visited, 4);
    assert_eq!(outcome.depth_cutoffs, 1);
}

// ---------------------------------------------------------------------------
// 4. Capability fallbacks
// ---------------------------------------------------------------------------

#[test]
fn sealed_state_is_a_dead_end() {
    let outcome = engine::<Sealed>(Strategy::DepthFirst, 64).solve_blocking(&Sealed::new("lid"));
    assert!(!outcome.success);
    assert_eq!(outcome.termination, Termination::FrontierExhausted);
    assert_eq!(outcome.nodes_visited, 1);
    assert_eq!(outcome.dead_ends, 1);

    let outcome = engine::<Sealed>(Strategy::DepthFirst, 64).solve_blocking(&Sealed::goal("lid"));
    assert!(outcome.success);
}

#[test]
fn terminal_sentinel_ends_the_search() {
    let outcome =
        engine::<Subtraction>(Strategy::BreadthFirst, 64).solve_blocking(&Subtraction::new(7));
    assert!(outcome.success);
    // 7 = 3 + 3 + 1.
    assert_eq!(outcome.path_len(), 3);
    assert_eq!(outcome.goal_state, Some(Subtraction::new(0)));
}
