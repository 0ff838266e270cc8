//! Strategy-selected frontier over a double-ended queue.
//!
//! The removal discipline is bound once, at construction, to a function
//! pointer: `pop_front` for breadth-first, `pop_back` for depth-first. The
//! traversal loops never branch on strategy.

use std::collections::VecDeque;

use crate::policy::Strategy;

type Take<T> = fn(&mut VecDeque<T>) -> Option<T>;
type EnqueueBatch<T> = fn(&mut VecDeque<T>, Vec<T>);

/// Discovered-but-not-yet-expanded nodes.
///
/// Both ends are O(1). Tracks the largest size it ever reached.
pub struct Frontier<T> {
    queue: VecDeque<T>,
    strategy: Strategy,
    take: Take<T>,
    enqueue_batch: EnqueueBatch<T>,
    high_water: usize,
}

impl<T> Frontier<T> {
    /// Create an empty frontier with the removal order of `strategy`.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        let (take, enqueue_batch): (Take<T>, EnqueueBatch<T>) = match strategy {
            Strategy::BreadthFirst => (VecDeque::pop_front, enqueue_in_order),
            Strategy::DepthFirst => (VecDeque::pop_back, enqueue_reversed),
        };
        Self {
            queue: VecDeque::new(),
            strategy,
            take,
            enqueue_batch,
            high_water: 0,
        }
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Append one item at the back.
    pub fn push(&mut self, item: T) {
        self.queue.push_back(item);
        self.note_size();
    }

    /// Enqueue siblings so that `items[0]` is removed before `items[1]`, and
    /// so on, whatever the strategy.
    ///
    /// Depth-first stacks get the batch reversed; breadth-first queues get it
    /// as-is.
    pub fn push_prioritized(&mut self, items: Vec<T>) {
        (self.enqueue_batch)(&mut self.queue, items);
        self.note_size();
    }

    /// Remove the next item per strategy order.
    #[must_use]
    pub fn pop(&mut self) -> Option<T> {
        (self.take)(&mut self.queue)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    fn note_size(&mut self) {
        self.high_water = self.high_water.max(self.queue.len());
    }
}

fn enqueue_in_order<T>(queue: &mut VecDeque<T>, items: Vec<T>) {
    queue.extend(items);
}

fn enqueue_reversed<T>(queue: &mut VecDeque<T>, items: Vec<T>) {
    queue.extend(items.into_iter().rev());
}
