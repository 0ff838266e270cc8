//! Search policy types.
//!
//! Policies are plain data with serde support so a host can load them from
//! JSON. Call `validate()` before handing one to a traversal; the traversal
//! constructors do this themselves.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Hard upper bound on `max_depth` accepted by any policy.
pub const MAX_DEPTH_CEILING: u32 = 4096;

/// Default depth ceiling when a policy does not set one.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Frontier removal discipline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// FIFO frontier. Shortest path when duplicates are suppressed.
    #[default]
    BreadthFirst,
    /// LIFO frontier. Terminates on finite spaces, no length guarantee.
    DepthFirst,
}

impl Strategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
        }
    }
}

/// Configuration for [`crate::engine::GraphSearchEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    pub strategy: Strategy,
    /// Nodes at this depth are goal-tested but never expanded.
    pub max_depth: u32,
    /// First-seen-wins duplicate suppression on state keys.
    pub check_duplicates: bool,
}

impl SearchPolicy {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_depth` exceeds
    /// [`MAX_DEPTH_CEILING`].
    pub fn validate(&self) -> Result<(), SearchError> {
        validate_depth(self.max_depth)
    }

    /// Parse a policy from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] on malformed JSON or an
    /// out-of-range field.
    pub fn from_json_str(json: &str) -> Result<Self, SearchError> {
        let policy: Self = serde_json::from_str(json).map_err(|e| SearchError::InvalidPolicy {
            detail: format!("malformed search policy JSON: {e}"),
        })?;
        policy.validate()?;
        Ok(policy)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            strategy: Strategy::BreadthFirst,
            max_depth: DEFAULT_MAX_DEPTH,
            check_duplicates: true,
        }
    }
}

/// Configuration for [`crate::tree::SearchTreeBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreePolicy {
    pub strategy: Strategy,
    pub max_depth: u32,
    /// Shortest-seen-wins duplicate marking on state keys.
    pub check_duplicates: bool,
    /// When `false`, goal nodes are recorded but never expanded.
    pub continue_after_goal: bool,
}

impl TreePolicy {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_depth` exceeds
    /// [`MAX_DEPTH_CEILING`].
    pub fn validate(&self) -> Result<(), SearchError> {
        validate_depth(self.max_depth)
    }

    /// Parse a policy from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] on malformed JSON or an
    /// out-of-range field.
    pub fn from_json_str(json: &str) -> Result<Self, SearchError> {
        let policy: Self = serde_json::from_str(json).map_err(|e| SearchError::InvalidPolicy {
            detail: format!("malformed tree policy JSON: {e}"),
        })?;
        policy.validate()?;
        Ok(policy)
    }
}

impl Default for TreePolicy {
    fn default() -> Self {
        Self {
            strategy: Strategy::BreadthFirst,
            max_depth: DEFAULT_MAX_DEPTH,
            check_duplicates: true,
            continue_after_goal: false,
        }
    }
}

fn validate_depth(max_depth: u32) -> Result<(), SearchError> {
    if max_depth > MAX_DEPTH_CEILING {
        return Err(SearchError::InvalidPolicy {
            detail: format!("max_depth {max_depth} exceeds ceiling {MAX_DEPTH_CEILING}"),
        });
    }
    Ok(())
}
