//! Search-tree duplicate handling lock tests.
//!
//! Proves:
//! 1. On the diamond (`S → A`, `S → B`, `A → C`, `B → C`) with
//!    `max_depth=2`, the second arrival at `C` is the duplicate and both
//!    `A` and `B` are not
//! 2. When `C` is reached at equal depth through both parents, exactly one
//!    `C` instance is expanded
//! 3. A strictly shorter route to a known state replaces the stored depth
//!    and is expanded again

use lock_tests::tree_builder;
use wayfinder_harness::worlds::{AdjacencyWorld, GraphBuilder};
use wayfinder_search::{Annotation, Strategy, TreeNode, TreePolicy};

fn nodes_labelled<'a>(
    root: &'a TreeNode<AdjacencyWorld>,
    label: &str,
) -> Vec<&'a TreeNode<AdjacencyWorld>> {
    root.iter().filter(|n| n.state.label() == label).collect()
}

fn policy(strategy: Strategy, max_depth: u32) -> TreePolicy {
    TreePolicy {
        strategy,
        max_depth,
        ..TreePolicy::default()
    }
}

// ---------------------------------------------------------------------------
// 1. Diamond at max_depth=2
// ---------------------------------------------------------------------------

#[test]
fn diamond_second_arrival_is_the_duplicate() {
    let tree =
        tree_builder(policy(Strategy::BreadthFirst, 2)).generate_tree(&AdjacencyWorld::diamond());

    for label in ["A", "B"] {
        let found = nodes_labelled(&tree.root, label);
        assert_eq!(found.len(), 1, "{label}");
        assert!(!found[0].is_duplicate, "{label}");
    }

    let cs = nodes_labelled(&tree.root, "C");
    assert_eq!(cs.len(), 2);
    let (first, second) = if cs[0].id < cs[1].id {
        (cs[0], cs[1])
    } else {
        (cs[1], cs[0])
    };
    assert!(!first.is_duplicate);
    assert_eq!(first.annotation, Some(Annotation::Goal));
    assert!(second.is_duplicate);
    assert_eq!(
        second.annotation,
        Some(Annotation::DuplicateGoal { first_depth: 2 })
    );
    assert_eq!(first.parent_move.as_deref(), Some("A->C"));
    assert_eq!(second.parent_move.as_deref(), Some("B->C"));

    assert_eq!(tree.stats.nodes_visited, 5);
    assert_eq!(tree.stats.duplicates, 1);
    assert_eq!(tree.stats.solutions, 2);
}

#[test]
fn diamond_depth_first_keeps_first_declared_parent() {
    let tree =
        tree_builder(policy(Strategy::DepthFirst, 2)).generate_tree(&AdjacencyWorld::diamond());
    let originals: Vec<_> = nodes_labelled(&tree.root, "C")
        .into_iter()
        .filter(|n| !n.is_duplicate)
        .collect();
    assert_eq!(originals.len(), 1);
    assert_eq!(originals[0].parent_move.as_deref(), Some("A->C"));
}

// ---------------------------------------------------------------------------
// 2. Exactly one expandable instance
// ---------------------------------------------------------------------------

#[test]
fn equal_depth_arrivals_expand_once() {
    let start = GraphBuilder::new()
        .edge("S", "A")
        .edge("S", "B")
        .edge("A", "C")
        .edge("B", "C")
        .edge("C", "D")
        .goal("D")
        .start_at("S")
        .expect("start exists");
    for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
        let tree = tree_builder(policy(strategy, 3)).generate_tree(&start);
        let cs = nodes_labelled(&tree.root, "C");
        assert_eq!(cs.len(), 2, "{strategy:?}");
        let expanded: Vec<_> = cs.iter().filter(|n| !n.is_leaf()).collect();
        assert_eq!(expanded.len(), 1, "{strategy:?}");
        assert!(!expanded[0].is_duplicate);
        assert_eq!(nodes_labelled(&tree.root, "D").len(), 1, "{strategy:?}");
    }
}

// ---------------------------------------------------------------------------
// 3. Shortest-seen wins
// ---------------------------------------------------------------------------

#[test]
fn shorter_route_is_expanded_again() {
    // Depth-first dives S → A → B → C → D before it expands E, so C is
    // first generated at depth 3.
    let start = GraphBuilder::new()
        .edge("S", "A")
        .edge("S", "E")
        .edge("A", "B")
        .edge("B", "C")
        .edge("E", "C")
        .edge("C", "D")
        .goal("D")
        .start_at("S")
        .expect("start exists");
    let tree = tree_builder(policy(Strategy::DepthFirst, 5)).generate_tree(&start);

    let cs = nodes_labelled(&tree.root, "C");
    assert_eq!(cs.len(), 2);
    assert!(cs.iter().all(|n| !n.is_duplicate));
    // Both C and D are reached again one level shallower.
    assert_eq!(tree.stats.improved_revisits, 2);
    assert_eq!(nodes_labelled(&tree.root, "D").len(), 2);
}
