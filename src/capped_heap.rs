use std::{cmp::Reverse, collections::BinaryHeap};

/// Keeps the `limit` entries with the greatest keys seen so far.
///
/// Backed by a min-heap: once full, a new entry replaces the smallest one only
/// if its key is strictly greater.
pub struct CappedHeap<K, V> {
    heap: BinaryHeap<Reverse<(K, V)>>,
    limit: usize,
}

impl<K: Ord, V: Ord> CappedHeap<K, V> {
    pub fn new(limit: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(limit),
            limit,
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.heap.len() < self.limit {
            self.heap.push(Reverse((key, value)));
        } else if let Some(Reverse((min_key, _))) = self.heap.peek() {
            if key > *min_key {
                self.heap.pop();
                self.heap.push(Reverse((key, value)));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Entries sorted by key, greatest first.
    pub fn into_top(self) -> Vec<(K, V)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(entry)| entry)
            .collect()
    }
}
