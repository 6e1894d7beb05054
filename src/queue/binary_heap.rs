use std::cmp::Ordering;
use std::fmt;

/// Binary min-heap ordered by a comparator closure.
///
/// The comparator must be a strict weak ordering. Elements comparing equal leave the heap in an
/// unspecified relative order. The comparator is fixed at construction.
#[derive(Clone)]
pub struct PriorityQueue<T, F> {
    heap: Vec<T>,
    compare: F,
}

impl<T, F> PriorityQueue<T, F> {
    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Iterates over the elements in heap order, which is not sorted order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.heap.iter()
    }
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(compare: F) -> Self {
        PriorityQueue {
            heap: Vec::new(),
            compare,
        }
    }

    pub fn with_capacity(capacity: usize, compare: F) -> Self {
        PriorityQueue {
            heap: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Adds an element, sifting it up from the last position.
    pub fn insert(&mut self, element: T) {
        self.heap.push(element);
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the minimum, or [None] once the queue is exhausted.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        // The last element takes the place of the root.
        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// The minimum without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Overwrites the first stored element equal to `target` under `equal` with `target` and
    /// restores heap order by sifting it up. Returns whether a match was found; without one
    /// the queue is left untouched.
    ///
    /// The lookup is a linear scan. `target` must not compare greater than the element it
    /// replaces.
    pub fn decrease_key<E>(&mut self, target: T, equal: E) -> bool
    where
        E: Fn(&T, &T) -> bool,
    {
        match self.heap.iter().position(|e| equal(e, &target)) {
            Some(ix) => {
                self.heap[ix] = target;
                self.sift_up(ix);
                true
            }
            None => false,
        }
    }

    fn sift_up(&mut self, mut ix: usize) {
        while ix > 0 {
            let parent = (ix - 1) / 2;
            if (self.compare)(&self.heap[parent], &self.heap[ix]) != Ordering::Greater {
                break;
            }
            self.heap.swap(parent, ix);
            ix = parent;
        }
    }

    fn sift_down(&mut self, mut ix: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * ix + 1;
            let right = left + 1;
            let mut smallest = ix;
            if left < n && (self.compare)(&self.heap[left], &self.heap[smallest]) == Ordering::Less
            {
                smallest = left;
            }
            if right < n
                && (self.compare)(&self.heap[right], &self.heap[smallest]) == Ordering::Less
            {
                smallest = right;
            }
            if smallest == ix {
                break;
            }
            self.heap.swap(ix, smallest);
            ix = smallest;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for PriorityQueue<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("heap", &self.heap)
            .finish()
    }
}
