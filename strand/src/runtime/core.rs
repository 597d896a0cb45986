use super::error::RuntimeError;
use super::handle::Handle;
use super::timer::Scheduled;
use super::waker::LocalWaker;
use super::Tick;
use crate::task::{Task, TaskId};
use crate::utils::Slab;

use std::cell::{Cell, RefCell};
use std::collections::{BinaryHeap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll, Waker};
use std::thread;
use std::time::Duration;

use tracing::{debug, trace, warn};

/// A unit of deferred work run by the loop.
pub(crate) type Job = Box<dyn FnOnce()>;

/// A future spawned onto the loop with [`crate::spawn_local`].
pub(crate) type LocalFuture = Pin<Box<dyn Future<Output = ()>>>;

/// A rejected task that had no continuation when it settled.
struct Rejection {
    id: TaskId,
    observed: Rc<Cell<bool>>,
    error_type: &'static str,
}

/// Shared state of the cooperative loop.
///
/// Everything here is touched from a single thread. Borrows of the
/// queues are always released before a job runs, so jobs are free to
/// schedule more work through a [`Handle`].
pub(crate) struct Core {
    /// Current value of the virtual clock.
    now: Cell<Tick>,

    /// Monotonic counter used to keep same-tick timers FIFO.
    sequence: Cell<u64>,

    /// Monotonic counter used for task identifiers.
    next_task_id: Cell<u64>,

    /// Continuations waiting for the next drain.
    continuations: RefCell<VecDeque<Job>>,

    /// Jobs run once the continuation queue has been drained, lowest
    /// rank first.
    turn_end: RefCell<BinaryHeap<Scheduled>>,

    /// Min-heap of pending timers.
    timers: RefCell<BinaryHeap<Scheduled>>,

    /// Futures spawned with `spawn_local`. A slot holds `None` while
    /// its future is being polled.
    locals: RefCell<Slab<Option<LocalFuture>>>,

    /// Indices of local futures whose waker fired.
    woken: Arc<Mutex<VecDeque<usize>>>,

    /// Rejections settled during the current turn with no observer yet.
    rejections: RefCell<Vec<Rejection>>,

    /// Rejections that were never observed.
    unhandled: RefCell<Vec<TaskId>>,
}

impl Core {
    pub(crate) fn new() -> Self {
        Self {
            now: Cell::new(0),
            sequence: Cell::new(0),
            next_task_id: Cell::new(1),
            continuations: RefCell::new(VecDeque::new()),
            turn_end: RefCell::new(BinaryHeap::new()),
            timers: RefCell::new(BinaryHeap::new()),
            locals: RefCell::new(Slab::new(16)),
            woken: Arc::new(Mutex::new(VecDeque::new())),
            rejections: RefCell::new(Vec::new()),
            unhandled: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn now(&self) -> Tick {
        self.now.get()
    }

    pub(crate) fn next_task_id(&self) -> TaskId {
        let id = self.next_task_id.get();
        self.next_task_id.set(id + 1);
        TaskId(id)
    }

    pub(crate) fn defer(&self, job: Job) {
        self.continuations.borrow_mut().push_back(job);
    }

    fn next_sequence(&self) -> u64 {
        let sequence = self.sequence.get();
        self.sequence.set(sequence + 1);
        sequence
    }

    pub(crate) fn at_turn_end(&self, rank: TaskId, job: Job) {
        let sequence = self.next_sequence();
        self.turn_end.borrow_mut().push(Scheduled {
            key: rank.0,
            sequence,
            job,
        });
    }

    pub(crate) fn schedule_timer(&self, ticks: Tick, job: Job) {
        let sequence = self.next_sequence();
        let deadline = self.now.get().saturating_add(ticks);
        self.timers.borrow_mut().push(Scheduled {
            key: deadline,
            sequence,
            job,
        });
    }

    pub(crate) fn track_rejection(
        &self,
        id: TaskId,
        observed: Rc<Cell<bool>>,
        error_type: &'static str,
    ) {
        self.rejections.borrow_mut().push(Rejection {
            id,
            observed,
            error_type,
        });
    }

    pub(crate) fn unhandled(&self) -> Vec<TaskId> {
        self.unhandled.borrow().clone()
    }

    /// Registers a local future and polls it once right away.
    pub(crate) fn spawn_local(&self, future: LocalFuture) {
        let index = self.locals.borrow_mut().insert(Some(future));
        self.poll_local(index);
    }

    /// Polls the local future stored at `index`.
    ///
    /// The future is taken out of its slot for the duration of the poll
    /// so it can spawn further futures without a borrow conflict.
    fn poll_local(&self, index: usize) {
        let future = self
            .locals
            .borrow_mut()
            .get_mut(index)
            .and_then(Option::take);

        let Some(mut future) = future else {
            return;
        };

        let waker = Waker::from(Arc::new(LocalWaker::new(index, self.woken.clone())));
        let mut cx = Context::from_waker(&waker);

        match future.as_mut().poll(&mut cx) {
            Poll::Ready(()) => {
                self.locals.borrow_mut().remove(index);
            }
            Poll::Pending => {
                if let Some(slot) = self.locals.borrow_mut().get_mut(index) {
                    *slot = Some(future);
                }
            }
        }
    }

    fn pop_woken(&self) -> Option<usize> {
        self.woken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    fn has_woken(&self) -> bool {
        !self
            .woken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Returns `true` if no job, timer or woken future is left.
    pub(crate) fn is_idle(&self) -> bool {
        !self.has_runnable() && self.timers.borrow().is_empty()
    }

    /// Returns `true` if work can run without advancing the clock.
    fn has_runnable(&self) -> bool {
        !self.continuations.borrow().is_empty()
            || !self.turn_end.borrow().is_empty()
            || self.has_woken()
    }

    /// Runs one turn of the loop.
    ///
    /// When nothing is runnable, the clock jumps to the earliest timer
    /// deadline and every timer due at that tick fires, in the order it
    /// was scheduled. The continuation queue, woken futures and
    /// end-of-turn jobs are then drained until all of them are empty.
    ///
    /// Returns `false` if the loop was idle.
    pub(crate) fn turn(&self, pacing: Duration) -> bool {
        if !self.has_runnable() {
            let Some(deadline) = self.timers.borrow().peek().map(|t| t.key) else {
                self.report_rejections();
                return false;
            };

            let elapsed = deadline.saturating_sub(self.now.get());
            if !pacing.is_zero() && elapsed > 0 {
                let ticks = u32::try_from(elapsed).unwrap_or(u32::MAX);
                thread::sleep(pacing.saturating_mul(ticks));
            }

            self.now.set(deadline);
            debug!(tick = deadline, "advancing clock");

            loop {
                let due = {
                    let mut timers = self.timers.borrow_mut();
                    match timers.peek() {
                        Some(timer) if timer.key <= deadline => timers.pop(),
                        _ => None,
                    }
                };

                match due {
                    Some(timer) => (timer.job)(),
                    None => break,
                }
            }
        }

        self.drain();
        true
    }

    fn drain(&self) {
        loop {
            let job = self.continuations.borrow_mut().pop_front();
            if let Some(job) = job {
                job();
                continue;
            }

            if let Some(index) = self.pop_woken() {
                self.poll_local(index);
                continue;
            }

            // One at a time: whatever an end-of-turn job settles must reach
            // its continuations before the next one runs.
            let entry = self.turn_end.borrow_mut().pop();
            let Some(entry) = entry else {
                break;
            };

            trace!(rank = entry.key, "running end-of-turn job");
            (entry.job)();
        }

        self.report_rejections();
    }

    /// Reports rejections that are still unobserved at the end of a turn.
    fn report_rejections(&self) {
        let rejections = std::mem::take(&mut *self.rejections.borrow_mut());

        for rejection in rejections {
            if rejection.observed.get() {
                continue;
            }

            warn!(
                task = %rejection.id,
                error = rejection.error_type,
                "task rejected without a failure continuation"
            );
            self.unhandled.borrow_mut().push(rejection.id);
        }
    }
}

/// The single-threaded cooperative runtime.
///
/// `Runtime` owns the continuation queue, the timer queue and the virtual
/// clock. Tasks, combinators and coroutine drivers only ever hold a
/// [`Handle`], so dropping the runtime drops every pending job.
///
/// Time is measured in ticks. Tests leave the tick duration at zero and
/// run instantly; demos can pace each tick with a real sleep.
pub struct Runtime {
    /// Loop state shared with every handle.
    core: Rc<Core>,

    /// Real time slept for each tick the clock advances.
    tick_duration: Duration,

    /// Maximum number of turns a single `run`/`block_on` may take.
    turn_limit: usize,
}

impl Runtime {
    /// Creates a runtime with the default configuration.
    pub fn new() -> Self {
        super::RuntimeBuilder::new().build()
    }

    pub(crate) fn with_config(tick_duration: Duration, turn_limit: usize) -> Self {
        Self {
            core: Rc::new(Core::new()),
            tick_duration,
            turn_limit,
        }
    }

    /// Returns a handle used to create tasks bound to this runtime.
    pub fn handle(&self) -> Handle {
        Handle::new(Rc::downgrade(&self.core))
    }

    /// Returns the current tick of the virtual clock.
    pub fn now(&self) -> Tick {
        self.core.now()
    }

    /// Runs a single turn. Returns `false` if there was nothing to do.
    pub fn turn(&self) -> bool {
        self.core.turn(self.tick_duration)
    }

    /// Runs the loop until no continuation, timer or woken future remains.
    ///
    /// Returns the number of turns taken.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::TurnLimitExceeded`] if the loop is still
    /// busy after the configured number of turns.
    pub fn run(&self) -> Result<usize, RuntimeError> {
        let mut turns = 0;

        loop {
            if turns >= self.turn_limit && !self.core.is_idle() {
                return Err(RuntimeError::TurnLimitExceeded(self.turn_limit));
            }

            if !self.turn() {
                return Ok(turns);
            }

            turns += 1;
        }
    }

    /// Runs the loop until `task` settles and returns its outcome.
    ///
    /// The loop stops as soon as the turn that settled the task is over;
    /// unrelated timers may still be pending afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Stalled`] if the loop goes idle while the
    /// task is still pending, and [`RuntimeError::TurnLimitExceeded`] if
    /// the turn limit is reached first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strand::{Runtime, Task};
    ///
    /// let runtime = Runtime::new();
    /// let task: Task<i32, ()> = Task::fulfilled(&runtime.handle(), 42);
    ///
    /// assert_eq!(runtime.block_on(task), Ok(Ok(42)));
    /// ```
    pub fn block_on<T, E>(&self, task: Task<T, E>) -> Result<Result<T, E>, RuntimeError>
    where
        T: Clone + 'static,
        E: Clone + 'static,
    {
        let id = task.id();
        let slot = Rc::new(RefCell::new(None));

        let outcome = slot.clone();
        task.react(move |result| *outcome.borrow_mut() = Some(result));

        let mut turns = 0;
        loop {
            if let Some(result) = slot.borrow_mut().take() {
                return Ok(result);
            }

            if turns >= self.turn_limit {
                return Err(RuntimeError::TurnLimitExceeded(self.turn_limit));
            }

            if !self.turn() {
                return Err(RuntimeError::Stalled(id));
            }

            turns += 1;
        }
    }

    /// Returns the ids of rejected tasks that had no failure continuation
    /// by the end of the turn in which they settled.
    pub fn unhandled_rejections(&self) -> Vec<TaskId> {
        self.core.unhandled()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
