use super::{Coroutine, Resume, Step};
use crate::runtime::Handle;
use crate::task::{Settler, Task};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::trace;

/// Lifecycle of a coroutine driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverState {
    /// The computation is being advanced.
    Running,

    /// The computation is suspended on a task.
    AwaitingTask,

    /// The computation returned a value.
    Completed,

    /// An error escaped the computation.
    Failed,
}

impl DriverState {
    /// Returns `true` for `Completed` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, DriverState::Completed | DriverState::Failed)
    }
}

/// A driven coroutine: its result task plus a view of the driver state.
pub struct Driven<T, E> {
    task: Task<T, E>,
    state: Rc<Cell<DriverState>>,
}

impl<T, E> Driven<T, E> {
    /// Returns the task that settles with the coroutine's outcome.
    pub fn task(&self) -> &Task<T, E> {
        &self.task
    }

    /// Returns the current driver state.
    pub fn state(&self) -> DriverState {
        self.state.get()
    }

    /// Discards the state view and returns the result task.
    pub fn into_task(self) -> Task<T, E> {
        self.task
    }
}

/// Steps a coroutine forward with the outcomes of the tasks it awaits.
struct Driver<C: Coroutine> {
    coroutine: C,
    state: Rc<Cell<DriverState>>,
    settler: Settler<C::Output, C::Error>,
}

impl<C> Driver<C>
where
    C: Coroutine + 'static,
    C::Yield: Clone + 'static,
    C::Output: Clone + 'static,
    C::Error: Clone + 'static,
{
    fn transition(&self, next: DriverState) {
        trace!(from = ?self.state.get(), to = ?next, "coroutine driver transition");
        self.state.set(next);
    }

    /// Advances the coroutine once and acts on the resulting step.
    ///
    /// An awaited task is subscribed to and the driver returns; the
    /// continuation re-enters `advance` from a fresh drain of the loop, so
    /// the stack depth stays constant however many suspension points the
    /// computation goes through.
    fn advance(this: &Rc<RefCell<Self>>, input: Resume<C::Yield, C::Error>) {
        let step = {
            let mut driver = this.borrow_mut();
            if driver.state.get().is_terminal() {
                trace!("coroutine resumed after completion, ignoring");
                return;
            }

            driver.transition(DriverState::Running);
            driver.coroutine.resume(input)
        };

        match step {
            Step::Await(task) => {
                this.borrow().transition(DriverState::AwaitingTask);

                let on_success = this.clone();
                let on_failure = this.clone();
                task.subscribe(
                    move |value| Self::advance(&on_success, Resume::Value(value)),
                    move |error| Self::advance(&on_failure, Resume::Error(error)),
                );
            }
            Step::Return(value) => {
                let driver = this.borrow();
                driver.transition(DriverState::Completed);
                driver.settler.resolve(value);
            }
            Step::Throw(error) => {
                let driver = this.borrow();
                driver.transition(DriverState::Failed);
                driver.settler.reject(error);
            }
        }
    }
}

/// Drives a coroutine to completion and exposes its driver state.
///
/// `factory` is called once. The first step runs synchronously inside
/// this call; every later step runs from the continuation of the task the
/// coroutine is suspended on. Exactly one task is awaited at a time.
pub fn drive<C, F>(handle: &Handle, factory: F) -> Driven<C::Output, C::Error>
where
    F: FnOnce() -> C,
    C: Coroutine + 'static,
    C::Yield: Clone + 'static,
    C::Output: Clone + 'static,
    C::Error: Clone + 'static,
{
    let task = Task::pending(handle);
    let state = Rc::new(Cell::new(DriverState::Running));

    let driver = Rc::new(RefCell::new(Driver {
        coroutine: factory(),
        state: state.clone(),
        settler: task.settler(),
    }));

    Driver::advance(&driver, Resume::Start);

    Driven { task, state }
}

/// Drives a coroutine to completion and returns its result task.
///
/// The task fulfills with the value the coroutine returns, or rejects with
/// the error that escapes it.
pub fn spawn<C, F>(handle: &Handle, factory: F) -> Task<C::Output, C::Error>
where
    F: FnOnce() -> C,
    C: Coroutine + 'static,
    C::Yield: Clone + 'static,
    C::Output: Clone + 'static,
    C::Error: Clone + 'static,
{
    drive(handle, factory).into_task()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coroutine::from_fn;
    use crate::{Runtime, time};

    #[test]
    fn first_step_runs_synchronously_then_waits() {
        let runtime = Runtime::new();
        let handle = runtime.handle();

        let driven = drive(&handle, || {
            let handle = handle.clone();
            from_fn(move |input: Resume<(), ()>| match input {
                Resume::Start => Step::Await(time::sleep(&handle, 2)),
                _ => Step::Return("done"),
            })
        });

        assert_eq!(driven.state(), DriverState::AwaitingTask);
        assert_eq!(runtime.block_on(driven.task().clone()), Ok(Ok("done")));
        assert_eq!(driven.state(), DriverState::Completed);
    }

    #[test]
    fn immediate_return_completes_without_awaiting() {
        let runtime = Runtime::new();
        let driven = drive(&runtime.handle(), || {
            from_fn(|_: Resume<(), ()>| Step::Return(5))
        });

        assert_eq!(driven.state(), DriverState::Completed);
        assert_eq!(runtime.block_on(driven.into_task()), Ok(Ok(5)));
    }

    #[test]
    fn escaped_error_marks_the_driver_failed() {
        let runtime = Runtime::new();
        let handle = runtime.handle();

        let driven = drive(&handle, || {
            let handle = handle.clone();
            from_fn(move |input: Resume<(), &str>| match input {
                Resume::Start => Step::Await(time::delay(&handle, 1, Err("nope"))),
                Resume::Value(()) => Step::Return(()),
                Resume::Error(error) => Step::Throw(error),
            })
        });

        assert_eq!(runtime.block_on(driven.task().clone()), Ok(Err("nope")));
        assert_eq!(driven.state(), DriverState::Failed);
    }

    #[test]
    fn long_await_chains_keep_a_flat_stack() {
        let runtime = Runtime::new();
        let handle = runtime.handle();

        let task = spawn(&handle, || {
            let handle = handle.clone();
            let mut count = 0u32;
            from_fn(move |input: Resume<u32, ()>| {
                if let Resume::Value(n) = input {
                    count = n;
                }

                if count == 100_000 {
                    Step::Return(count)
                } else {
                    Step::Await(Task::fulfilled(&handle, count + 1))
                }
            })
        });

        assert_eq!(runtime.block_on(task), Ok(Ok(100_000)));
    }
}
