use super::Tick;
use super::core::{Core, LocalFuture};
use crate::task::TaskId;

use std::cell::Cell;
use std::rc::{Rc, Weak};

/// A non-owning reference to a [`Runtime`](super::Runtime).
///
/// Every [`Task`](crate::Task) carries a `Handle` so it can schedule its
/// continuations. Cloning a handle is cheap. A handle does not keep the
/// runtime alive: once the runtime is dropped, work submitted through a
/// handle is silently discarded.
#[derive(Clone)]
pub struct Handle {
    core: Weak<Core>,
}

impl Handle {
    pub(crate) fn new(core: Weak<Core>) -> Self {
        Self { core }
    }

    fn core(&self) -> Option<Rc<Core>> {
        self.core.upgrade()
    }

    /// Returns `true` while the runtime behind this handle is alive.
    pub fn is_alive(&self) -> bool {
        self.core.strong_count() > 0
    }

    /// Returns the current tick of the runtime clock.
    ///
    /// A detached handle reports tick `0`.
    pub fn now(&self) -> Tick {
        self.core().map(|core| core.now()).unwrap_or_default()
    }

    /// Schedules `job` to run on the next drain of the continuation queue.
    ///
    /// The job never runs synchronously inside this call.
    pub fn defer(&self, job: impl FnOnce() + 'static) {
        if let Some(core) = self.core() {
            core.defer(Box::new(job));
        }
    }

    /// Schedules `job` to run once `ticks` ticks have elapsed.
    ///
    /// Timers due at the same tick fire in the order they were scheduled,
    /// within a single turn.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use strand::Runtime;
    ///
    /// let runtime = Runtime::new();
    /// let fired = Rc::new(Cell::new(0));
    ///
    /// let seen = fired.clone();
    /// let handle = runtime.handle();
    /// runtime.handle().after(3, move || seen.set(handle.now()));
    ///
    /// runtime.run().unwrap();
    /// assert_eq!(fired.get(), 3);
    /// ```
    pub fn after(&self, ticks: Tick, job: impl FnOnce() + 'static) {
        if let Some(core) = self.core() {
            core.schedule_timer(ticks, Box::new(job));
        }
    }

    /// Schedules `job` to run after the continuation queue of the current
    /// turn has been drained.
    ///
    /// Pending end-of-turn jobs run one by one in ascending `rank`, each
    /// followed by a full drain of the continuations it caused.
    pub(crate) fn at_turn_end(&self, rank: TaskId, job: impl FnOnce() + 'static) {
        if let Some(core) = self.core() {
            core.at_turn_end(rank, Box::new(job));
        }
    }

    pub(crate) fn next_task_id(&self) -> TaskId {
        self.core()
            .map(|core| core.next_task_id())
            .unwrap_or(TaskId(0))
    }

    pub(crate) fn track_rejection(
        &self,
        id: TaskId,
        observed: Rc<Cell<bool>>,
        error_type: &'static str,
    ) {
        if let Some(core) = self.core() {
            core.track_rejection(id, observed, error_type);
        }
    }

    pub(crate) fn spawn_local(&self, future: LocalFuture) {
        if let Some(core) = self.core() {
            core.spawn_local(future);
        }
    }
}
