use super::core::Job;

use std::cmp::Ordering;

/// An entry in one of the runtime's keyed job queues.
///
/// Timers are keyed by the tick at which they fire. End-of-turn jobs are
/// keyed by the id of the task they settle, so a job deciding an older
/// task runs before one deciding a task built on top of it. Entries live
/// in a `BinaryHeap` ordered so that the lowest key pops first, and among
/// equal keys the entry that was scheduled first pops first.
pub(crate) struct Scheduled {
    /// Deadline tick for timers, task rank for end-of-turn jobs.
    pub(crate) key: u64,

    /// Insertion order, used to keep equal keys FIFO.
    pub(crate) sequence: u64,

    pub(crate) job: Job,
}

impl Eq for Scheduled {}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.sequence == other.sequence
    }
}

impl Ord for Scheduled {
    /// Orders entries by `(key, sequence)`.
    ///
    /// The comparison is **reversed** so that a `BinaryHeap<Scheduled>`
    /// behaves as a min-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.key, other.sequence).cmp(&(self.key, self.sequence))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::Scheduled;
    use std::collections::BinaryHeap;

    fn entry(key: u64, sequence: u64) -> Scheduled {
        Scheduled {
            key,
            sequence,
            job: Box::new(|| {}),
        }
    }

    #[test]
    fn pops_lowest_key_then_insertion_order() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(3, 0));
        heap.push(entry(1, 2));
        heap.push(entry(1, 1));
        heap.push(entry(2, 3));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|t| (t.key, t.sequence))
            .collect();

        assert_eq!(order, vec![(1, 1), (1, 2), (2, 3), (3, 0)]);
    }
}
