//! Min-priority queues backing the A* open set.
//!
//! [PriorityQueue] is a binary heap ordered by a comparator closure with a linear-scan
//! decrease-key. [IndexedPriorityQueue] keeps a key to heap-position map so that updating a
//! priority is logarithmic. Both are exposed to the search through [OpenSet].
use std::cmp::Ordering;
use std::hash::Hash;

mod binary_heap;
mod indexed;

pub use binary_heap::PriorityQueue;
pub use indexed::IndexedPriorityQueue;

/// Priority of a node in the open set: estimated total cost first, then accumulated cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Priority<C> {
    pub estimated_cost: C,
    pub cost: C,
}

impl<C: Ord> PartialOrd for Priority<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for Priority<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first; among equal estimates the node with the larger cost
        // (closer to the goal) goes first.
        match self.estimated_cost.cmp(&other.estimated_cost) {
            Ordering::Equal => other.cost.cmp(&self.cost),
            s => s,
        }
    }
}

/// A node in the open set together with its f-score (`estimated_cost`) and g-score (`cost`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode<N, C> {
    pub node: N,
    pub estimated_cost: C,
    pub cost: C,
}

impl<N, C: Copy + Ord> SearchNode<N, C> {
    pub fn new(node: N, estimated_cost: C, cost: C) -> Self {
        SearchNode {
            node,
            estimated_cost,
            cost,
        }
    }

    pub fn priority(&self) -> Priority<C> {
        Priority {
            estimated_cost: self.estimated_cost,
            cost: self.cost,
        }
    }

    /// Comparator used for the open set.
    pub fn compare(a: &Self, b: &Self) -> Ordering {
        a.priority().cmp(&b.priority())
    }
}

/// Open set operations needed by the search loop.
pub trait OpenSet<N, C> {
    fn with_capacity(capacity: usize) -> Self;
    /// Inserts a node that is not yet present.
    fn push(&mut self, node: SearchNode<N, C>);
    /// Removes the node with the smallest priority.
    fn pop(&mut self) -> Option<SearchNode<N, C>>;
    /// Lowers the priority of a node already present. Does nothing if the node is absent.
    fn update(&mut self, node: SearchNode<N, C>);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type NodeComparator<N, C> = fn(&SearchNode<N, C>, &SearchNode<N, C>) -> Ordering;

/// Open set using [PriorityQueue] with the linear-scan decrease-key.
pub type LinearOpenSet<N, C> = PriorityQueue<SearchNode<N, C>, NodeComparator<N, C>>;

/// Open set using [IndexedPriorityQueue].
pub type IndexedOpenSet<N, C> = IndexedPriorityQueue<N, Priority<C>>;

impl<N: PartialEq, C: Copy + Ord> OpenSet<N, C> for LinearOpenSet<N, C> {
    fn with_capacity(capacity: usize) -> Self {
        PriorityQueue::with_capacity(
            capacity,
            SearchNode::<N, C>::compare as NodeComparator<N, C>,
        )
    }
    fn push(&mut self, node: SearchNode<N, C>) {
        self.insert(node);
    }
    fn pop(&mut self) -> Option<SearchNode<N, C>> {
        self.extract_min()
    }
    fn update(&mut self, node: SearchNode<N, C>) {
        self.decrease_key(node, |a, b| a.node == b.node);
    }
    fn len(&self) -> usize {
        PriorityQueue::len(self)
    }
}

impl<N: Hash + Eq + Clone, C: Copy + Ord> OpenSet<N, C> for IndexedOpenSet<N, C> {
    fn with_capacity(capacity: usize) -> Self {
        IndexedPriorityQueue::with_capacity(capacity)
    }
    fn push(&mut self, node: SearchNode<N, C>) {
        let priority = node.priority();
        IndexedPriorityQueue::push(self, node.node, priority);
    }
    fn pop(&mut self) -> Option<SearchNode<N, C>> {
        IndexedPriorityQueue::pop(self).map(|(node, priority)| {
            SearchNode::new(node, priority.estimated_cost, priority.cost)
        })
    }
    fn update(&mut self, node: SearchNode<N, C>) {
        let priority = node.priority();
        self.decrease_key(&node.node, priority);
    }
    fn len(&self) -> usize {
        IndexedPriorityQueue::len(self)
    }
}
