use fxhash::FxHashMap;
use std::hash::Hash;

/// Binary min-heap of keys ordered by priority, with a key to heap-position index that is kept
/// current on every swap. Each key is stored at most once.
#[derive(Clone, Debug)]
pub struct IndexedPriorityQueue<K, P> {
    heap: Vec<(K, P)>,
    positions: FxHashMap<K, usize>,
}

impl<K, P> Default for IndexedPriorityQueue<K, P> {
    fn default() -> Self {
        IndexedPriorityQueue {
            heap: Vec::new(),
            positions: FxHashMap::default(),
        }
    }
}

impl<K, P> IndexedPriorityQueue<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        IndexedPriorityQueue {
            heap: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Current priority of `key`, if present.
    pub fn priority(&self, key: &K) -> Option<&P> {
        self.positions.get(key).map(|&ix| &self.heap[ix].1)
    }

    /// Inserts `key`. A key that is already present has its priority replaced instead and the
    /// old priority is returned.
    pub fn push(&mut self, key: K, priority: P) -> Option<P> {
        if let Some(&ix) = self.positions.get(&key) {
            let old = std::mem::replace(&mut self.heap[ix].1, priority);
            let ix = self.sift_up(ix);
            self.sift_down(ix);
            return Some(old);
        }
        let ix = self.heap.len();
        self.positions.insert(key.clone(), ix);
        self.heap.push((key, priority));
        self.sift_up(ix);
        None
    }

    pub fn peek(&self) -> Option<(&K, &P)> {
        self.heap.first().map(|(k, p)| (k, p))
    }

    /// Removes and returns the key with the smallest priority.
    pub fn pop(&mut self) -> Option<(K, P)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (key, priority) = self.heap.pop()?;
        self.positions.remove(&key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((key, priority))
    }

    /// Sets the priority of `key` and sifts it up. `priority` must not be greater than the
    /// current one. Returns false if `key` is not present.
    pub fn decrease_key(&mut self, key: &K, priority: P) -> bool {
        match self.positions.get(key) {
            Some(&ix) => {
                self.heap[ix].1 = priority;
                self.sift_up(ix);
                true
            }
            None => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        if let Some(pos) = self.positions.get_mut(&self.heap[a].0) {
            *pos = a;
        }
        if let Some(pos) = self.positions.get_mut(&self.heap[b].0) {
            *pos = b;
        }
    }

    fn sift_up(&mut self, mut ix: usize) -> usize {
        while ix > 0 {
            let parent = (ix - 1) / 2;
            if self.heap[parent].1 <= self.heap[ix].1 {
                break;
            }
            self.swap(parent, ix);
            ix = parent;
        }
        ix
    }

    fn sift_down(&mut self, mut ix: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * ix + 1;
            let right = left + 1;
            let mut smallest = ix;
            if left < n && self.heap[left].1 < self.heap[smallest].1 {
                smallest = left;
            }
            if right < n && self.heap[right].1 < self.heap[smallest].1 {
                smallest = right;
            }
            if smallest == ix {
                break;
            }
            self.swap(ix, smallest);
            ix = smallest;
        }
    }
}
