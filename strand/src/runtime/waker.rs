use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::Wake;

/// Waker payload for a future spawned with `spawn_local`.
///
/// Waking pushes the future's slab index onto the runtime's wake queue;
/// the loop polls it again during the next drain. The queue is behind a
/// mutex only because [`Wake`] requires `Send + Sync`; every access still
/// happens on the runtime thread.
pub(crate) struct LocalWaker {
    /// Slab index of the future to re-poll.
    index: usize,

    /// Wake queue shared with the runtime core.
    woken: Arc<Mutex<VecDeque<usize>>>,
}

impl LocalWaker {
    pub(crate) fn new(index: usize, woken: Arc<Mutex<VecDeque<usize>>>) -> Self {
        Self { index, woken }
    }
}

impl Wake for LocalWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.woken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(self.index);
    }
}
