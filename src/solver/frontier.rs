use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::common::SearchError;
use crate::solver::Strategy;

/// One pending frontier entry. `g` is the node's accumulated cost at push
/// time; if the node has been relaxed since, the entry is stale and gets
/// dropped on pop instead of being removed eagerly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FrontierEntry {
    pub(crate) node: usize,
    pub(crate) g: usize,
    key: usize,
    seq: usize,
}

// BinaryHeap is a max-heap; invert so the smallest key surfaces first,
// breaking ties by insertion order.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
enum Queue {
    Fifo(VecDeque<FrontierEntry>),
    Priority(BinaryHeap<FrontierEntry>),
}

/// Multiset of discovered-but-unexpanded nodes, ordered by the strategy's
/// key. BFS gets a plain FIFO queue, Dijkstra and A* a priority heap.
#[derive(Debug)]
pub(crate) struct Frontier {
    queue: Queue,
    seq: usize,
}

impl Frontier {
    pub(crate) fn new(strategy: Strategy) -> Self {
        let queue = if strategy.is_fifo() {
            Queue::Fifo(VecDeque::new())
        } else {
            Queue::Priority(BinaryHeap::new())
        };
        Frontier { queue, seq: 0 }
    }

    pub(crate) fn push(&mut self, node: usize, g: usize, key: usize) {
        let entry = FrontierEntry {
            node,
            g,
            key,
            seq: self.seq,
        };
        self.seq += 1;
        match &mut self.queue {
            Queue::Fifo(queue) => queue.push_back(entry),
            Queue::Priority(heap) => heap.push(entry),
        }
    }

    pub(crate) fn pop_min(&mut self) -> Result<FrontierEntry, SearchError> {
        match &mut self.queue {
            Queue::Fifo(queue) => queue.pop_front(),
            Queue::Priority(heap) => heap.pop(),
        }
        .ok_or(SearchError::EmptyFrontier)
    }

    pub(crate) fn is_empty(&self) -> bool {
        match &self.queue {
            Queue::Fifo(queue) => queue.is_empty(),
            Queue::Priority(heap) => heap.is_empty(),
        }
    }

    /// Remaining entries in no particular order.
    pub(crate) fn entries(&self) -> Vec<&FrontierEntry> {
        match &self.queue {
            Queue::Fifo(queue) => queue.iter().collect(),
            Queue::Priority(heap) => heap.iter().collect(),
        }
    }
}
