use crate::error::HeapError;
use core::fmt;

/// Binary heap ordered by an arbitrary predicate instead of [Ord].
///
/// `better(a, b)` returns [true] if `a` belongs closer to the root than `b`. Using
/// `|a, b| a.score < b.score` gives a min-heap on `score`. There is no decrease-key:
/// callers that find a better value simply insert again.
pub struct Heap<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    nodes: Vec<T>,
    better: F,
}

impl<T, F> Heap<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn new(better: F) -> Heap<T, F> {
        Heap {
            nodes: Vec::new(),
            better,
        }
    }

    pub fn with_capacity(capacity: usize, better: F) -> Heap<T, F> {
        Heap {
            nodes: Vec::with_capacity(capacity),
            better,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The element that the next [extract](Self::extract) would return.
    pub fn peek(&self) -> Option<&T> {
        self.nodes.first()
    }

    /// Iterates the elements in storage order, not in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.nodes.iter()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Appends the value and sifts it up until its parent is better.
    pub fn insert(&mut self, value: T) {
        let mut index = self.nodes.len();
        self.nodes.push(value);
        while index > 0 {
            let parent = parent(index);
            if (self.better)(&self.nodes[parent], &self.nodes[index]) {
                return;
            }
            self.nodes.swap(index, parent);
            index = parent;
        }
    }

    /// Removes the root. The last element takes its place and sinks towards the better
    /// of its children until it is better than the child it would swap with.
    pub fn extract(&mut self) -> Result<T, HeapError> {
        if self.nodes.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        let value = self.nodes.swap_remove(0);
        let len = self.nodes.len();
        let mut index = 0;
        loop {
            let left = left(index);
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right >= len || (self.better)(&self.nodes[left], &self.nodes[right]) {
                left
            } else {
                right
            };
            if (self.better)(&self.nodes[index], &self.nodes[child]) {
                break;
            }
            self.nodes.swap(index, child);
            index = child;
        }
        Ok(value)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Heap<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Heap").field("nodes", &self.nodes).finish()
    }
}

fn left(index: usize) -> usize {
    2 * index + 1
}

fn parent(index: usize) -> usize {
    (index - 1) / 2
}
