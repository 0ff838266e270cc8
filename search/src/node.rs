//! Frontier node for the plain graph search.

use wayfinder_kernel::SearchState;

/// A state together with the moves that reached it.
///
/// Created when its parent is expanded and never mutated afterwards. The
/// frontier owns it until it is popped; after expansion it is dropped unless
/// its path is returned.
#[derive(Debug, Clone)]
pub struct SearchNode<S: SearchState> {
    /// Owned clone of the domain state.
    pub state: S,
    /// Moves from the root, in application order.
    pub path: Vec<S::Move>,
    /// Root = 0.
    pub depth: u32,
}

impl<S: SearchState> SearchNode<S> {
    #[must_use]
    pub fn root(state: S) -> Self {
        Self {
            state,
            path: Vec::new(),
            depth: 0,
        }
    }

    /// Child reached from `self` by `mv`.
    #[must_use]
    pub fn child(&self, mv: S::Move, state: S) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().cloned());
        path.push(mv);
        Self {
            state,
            path,
            depth: self.depth + 1,
        }
    }
}
