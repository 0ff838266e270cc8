//! Canonical JSON rendering of a [`SearchTree`].
//!
//! This is the hand-off format for external renderers. Each node carries its
//! state key and key fingerprint rather than the state itself; renderers that
//! need board pixels resolve the key against their own domain.

use wayfinder_kernel::proof::canon::canonical_json_bytes;
use wayfinder_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_TREE};
use wayfinder_kernel::SearchState;

use crate::error::SearchError;
use crate::policy::TreePolicy;
use crate::tree::{SearchTree, TreeNode, TreeStats};

impl<S: SearchState> SearchTree<S> {
    /// Serialize to canonical JSON bytes (sorted keys, compact).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Canon`] if canonicalization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, SearchError> {
        Ok(canonical_json_bytes(&self.to_json_value())?)
    }

    /// Content hash of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Canon`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, SearchError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_TREE, &bytes))
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "policy": policy_to_json(&self.policy),
            "root": node_to_json(&self.root),
            "stats": stats_to_json(&self.stats),
        })
    }
}

fn node_to_json<S: SearchState>(node: &TreeNode<S>) -> serde_json::Value {
    let key = node.state.state_key();
    serde_json::json!({
        "annotation": node.annotation.as_ref().map(ToString::to_string),
        "children": node.children.iter().map(node_to_json).collect::<Vec<_>>(),
        "depth": node.depth,
        "id": node.id,
        "is_duplicate": node.is_duplicate,
        "is_solution": node.is_solution,
        "parent_move": node.parent_move.as_ref().map(ToString::to_string),
        "state_fingerprint": key.fingerprint().as_str(),
        "state_key": key.as_str(),
    })
}

fn policy_to_json(p: &TreePolicy) -> serde_json::Value {
    serde_json::json!({
        "check_duplicates": p.check_duplicates,
        "continue_after_goal": p.continue_after_goal,
        "max_depth": p.max_depth,
        "strategy": p.strategy.as_str(),
    })
}

fn stats_to_json(s: &TreeStats) -> serde_json::Value {
    serde_json::json!({
        "deepest": s.deepest,
        "duplicates": s.duplicates,
        "improved_revisits": s.improved_revisits,
        "nodes_visited": s.nodes_visited,
        "solutions": s.solutions,
    })
}
