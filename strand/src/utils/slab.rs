/// A simple slab allocator.
///
/// A `Slab` stores values of type `T` in a contiguous array and returns
/// stable indices that can be reused after removal.
///
/// Internally, it keeps track of:
/// - occupied slots (`Some`),
/// - free indices available for reuse.
///
/// Indices are handed to wakers, so a stale index may outlive its value.
/// Lookups on a freed index return `None` instead of panicking.
pub(crate) struct Slab<T> {
    /// Storage for items; `None` marks a free slot.
    items: Vec<Option<T>>,
    /// Stack of free indices that can be reused.
    free: Vec<usize>,
}

impl<T> Slab<T> {
    /// Creates a new `Slab` with a fixed initial capacity.
    ///
    /// All slots are initially free.
    pub(crate) fn new(size: usize) -> Self {
        let items = (0..size).map(|_| None).collect();
        let free = (0..size).rev().collect();

        Self { items, free }
    }

    /// Inserts a value into the slab and returns its index.
    ///
    /// If a free slot is available, it is reused.
    /// Otherwise, the slab grows exponentially.
    pub(crate) fn insert(&mut self, item: T) -> usize {
        let index = if let Some(i) = self.free.pop() {
            i
        } else {
            let len = self.items.len();
            let new_len = if len == 0 { 1 } else { 2 * len };

            self.items.extend((len..new_len).map(|_| None));
            self.free.extend(((len + 1)..new_len).rev());

            len
        };

        self.items[index] = Some(item);

        index
    }

    /// Removes and returns the value stored at `index`.
    ///
    /// The slot becomes free and may be reused by future insertions.
    /// Returns `None` if the slot was already free or out of range.
    pub(crate) fn remove(&mut self, index: usize) -> Option<T> {
        let item = self.items.get_mut(index)?.take()?;
        self.free.push(index);

        Some(item)
    }

    /// Returns a mutable reference to the value at `index`, if occupied.
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)?.as_mut()
    }

    /// Returns the number of occupied slots.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.items.len() - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Slab;

    #[test]
    fn reuses_freed_slots() {
        let mut slab = Slab::new(1);
        let a = slab.insert("a");
        let b = slab.insert("b");

        assert_ne!(a, b);
        assert_eq!(slab.len(), 2);
        assert_eq!(slab.remove(a), Some("a"));

        let c = slab.insert("c");
        assert_eq!(c, a);
        assert_eq!(slab.get_mut(c).copied(), Some("c"));
    }

    #[test]
    fn stale_index_is_ignored() {
        let mut slab = Slab::new(0);
        let a = slab.insert(1);

        assert_eq!(slab.remove(a), Some(1));
        assert_eq!(slab.remove(a), None);
        assert!(slab.get_mut(a).is_none());
        assert!(slab.get_mut(42).is_none());
        assert_eq!(slab.len(), 0);
    }
}
