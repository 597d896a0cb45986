use super::state::{State, TaskState};
use crate::runtime::Handle;

use std::any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::mem;
use std::rc::Rc;

/// Identifier of a task, unique within its runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub(crate) u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A continuation waiting for a task to settle.
type Reaction<T, E> = Box<dyn FnOnce(Result<T, E>)>;

/// Shared storage behind a [`Task`] and its [`Settler`]s.
struct Inner<T, E> {
    /// Identifier assigned by the runtime.
    id: TaskId,

    /// Current settlement state.
    state: State<T, E>,

    /// Continuations registered while pending, in registration order.
    reactions: Vec<Reaction<T, E>>,

    /// Set once any continuation has been attached.
    observed: Rc<Cell<bool>>,
}

/// A single asynchronous unit of work that settles exactly once.
///
/// A `Task` starts out pending and is settled by one of the [`Settler`]s
/// handed to its executor. Continuations attached with
/// [`subscribe`](Self::subscribe) run once, after settlement, on a later
/// drain of the runtime loop, never inside the call that registered them
/// or the call that settled the task.
///
/// Cloning a `Task` produces another handle to the same underlying state.
///
/// # Examples
///
/// ```rust
/// use strand::{Runtime, Task};
///
/// let runtime = Runtime::new();
/// let handle = runtime.handle();
///
/// let task: Task<&str, String> = Task::new(&handle, |settler| {
///     handle.after(2, move || {
///         settler.resolve("done");
///     });
/// });
///
/// assert_eq!(runtime.block_on(task), Ok(Ok("done")));
/// assert_eq!(runtime.now(), 2);
/// ```
pub struct Task<T, E> {
    inner: Rc<RefCell<Inner<T, E>>>,
    handle: Handle,
}

/// The settle capability handed to a task's executor.
///
/// Only the first call to [`resolve`](Self::resolve),
/// [`reject`](Self::reject) or [`settle`](Self::settle) across all clones
/// has an effect; later calls are silent no-ops.
pub struct Settler<T, E> {
    inner: Rc<RefCell<Inner<T, E>>>,
    handle: Handle,
}

impl<T, E> Clone for Task<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            handle: self.handle.clone(),
        }
    }
}

impl<T, E> Clone for Settler<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            handle: self.handle.clone(),
        }
    }
}

impl<T, E> Task<T, E> {
    /// Returns the identifier of this task.
    pub fn id(&self) -> TaskId {
        self.inner.borrow().id
    }

    /// Returns the handle of the runtime this task is bound to.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> TaskState {
        self.inner.borrow().state.kind()
    }

    /// Returns `true` once the task is fulfilled or rejected.
    pub fn is_settled(&self) -> bool {
        !self.inner.borrow().state.is_pending()
    }
}

impl<T, E> Task<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Creates a pending task and runs `executor` synchronously with its
    /// settle capability.
    ///
    /// The executor typically hands the [`Settler`] to an external
    /// operation (a timer, a callback) that settles the task later.
    pub fn new<X>(handle: &Handle, executor: X) -> Self
    where
        X: FnOnce(Settler<T, E>),
    {
        let task = Self::pending(handle);
        executor(task.settler());
        task
    }

    /// Creates a task that is already fulfilled with `value`.
    pub fn fulfilled(handle: &Handle, value: T) -> Self {
        Self::new(handle, |settler| {
            settler.resolve(value);
        })
    }

    /// Creates a task that is already rejected with `error`.
    pub fn rejected(handle: &Handle, error: E) -> Self {
        Self::new(handle, |settler| {
            settler.reject(error);
        })
    }

    pub(crate) fn pending(handle: &Handle) -> Self {
        let inner = Inner {
            id: handle.next_task_id(),
            state: State::Pending,
            reactions: Vec::new(),
            observed: Rc::new(Cell::new(false)),
        };

        Self {
            inner: Rc::new(RefCell::new(inner)),
            handle: handle.clone(),
        }
    }

    pub(crate) fn settler(&self) -> Settler<T, E> {
        Settler {
            inner: self.inner.clone(),
            handle: self.handle.clone(),
        }
    }

    /// Returns a copy of the outcome once the task has settled.
    pub fn peek(&self) -> Option<Result<T, E>> {
        self.inner.borrow().state.outcome()
    }

    /// Registers continuations for success and failure.
    ///
    /// Exactly one of them runs, once, after the task settles. If the task
    /// is already settled, the matching continuation is queued for the
    /// next drain of the loop. Continuations on the same task run in the
    /// order they were registered.
    pub fn subscribe<S, F>(&self, on_success: S, on_failure: F)
    where
        S: FnOnce(T) + 'static,
        F: FnOnce(E) + 'static,
    {
        self.react(move |outcome| match outcome {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        });
    }

    /// Registers a single continuation receiving the whole outcome.
    pub(crate) fn react<R>(&self, reaction: R)
    where
        R: FnOnce(Result<T, E>) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.observed.set(true);

        let outcome = inner.state.outcome();
        match outcome {
            None => inner.reactions.push(Box::new(reaction)),
            Some(outcome) => {
                drop(inner);
                self.handle.defer(move || reaction(outcome));
            }
        }
    }
}

impl<T, E> fmt::Debug for Task<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id())
            .field("state", &self.state())
            .finish()
    }
}

impl<T, E> Settler<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Fulfills the task with `value`.
    ///
    /// Returns `false` if the task had already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Rejects the task with `error`.
    ///
    /// Returns `false` if the task had already settled.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    /// Settles the task with `outcome`.
    ///
    /// Every continuation registered so far is queued, in registration
    /// order. Returns `false`, leaving the task untouched, if it had
    /// already settled.
    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        let (id, reactions, observed) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.state.is_pending() {
                return false;
            }

            inner.state = State::from(outcome.clone());
            (
                inner.id,
                mem::take(&mut inner.reactions),
                inner.observed.clone(),
            )
        };

        if outcome.is_err() && !observed.get() {
            self.handle
                .track_rejection(id, observed, any::type_name::<E>());
        }

        for reaction in reactions {
            let outcome = outcome.clone();
            self.handle.defer(move || reaction(outcome));
        }

        true
    }

    /// Returns `true` once the task behind this settler has settled.
    pub fn is_settled(&self) -> bool {
        !self.inner.borrow().state.is_pending()
    }
}
