use super::Task;
use crate::runtime::Handle;

use std::cell::RefCell;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// Outcome slot shared between a [`TaskFuture`] and its continuation.
struct Slot<T, E> {
    outcome: Option<Result<T, E>>,
    waker: Option<Waker>,
}

/// A future that resolves to the outcome of a [`Task`].
///
/// Created by `task.into_future()` or simply `task.await` inside a future
/// passed to [`spawn_local`]. A rejection surfaces as `Err` at the await
/// point, so `?` and `match` inside the future intercept it exactly as
/// inline code would.
pub struct TaskFuture<T, E> {
    task: Task<T, E>,
    slot: Option<Rc<RefCell<Slot<T, E>>>>,
}

impl<T, E> Future for TaskFuture<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    type Output = Result<T, E>;

    /// Polls the task future.
    ///
    /// The first poll subscribes to the task; the continuation stores the
    /// outcome and wakes the latest registered waker.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Some(slot) = &this.slot {
            let mut slot = slot.borrow_mut();
            if let Some(outcome) = slot.outcome.take() {
                return Poll::Ready(outcome);
            }

            slot.waker = Some(cx.waker().clone());
            return Poll::Pending;
        }

        let slot = Rc::new(RefCell::new(Slot {
            outcome: None,
            waker: Some(cx.waker().clone()),
        }));

        let shared = slot.clone();
        this.task.react(move |outcome| {
            let waker = {
                let mut slot = shared.borrow_mut();
                slot.outcome = Some(outcome);
                slot.waker.take()
            };

            if let Some(waker) = waker {
                waker.wake();
            }
        });

        this.slot = Some(slot);
        Poll::Pending
    }
}

impl<T, E> IntoFuture for Task<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    type Output = Result<T, E>;
    type IntoFuture = TaskFuture<T, E>;

    fn into_future(self) -> Self::IntoFuture {
        TaskFuture {
            task: self,
            slot: None,
        }
    }
}

/// Drives a local future on the runtime loop and exposes its result as a
/// [`Task`].
///
/// The future is polled once synchronously, then again each time one of
/// the tasks it awaits settles. It does not need to be `Send`.
///
/// # Examples
///
/// ```rust
/// use strand::{Runtime, spawn_local, time};
///
/// let runtime = Runtime::new();
/// let handle = runtime.handle();
///
/// let task = spawn_local(&handle, {
///     let handle = handle.clone();
///     async move {
///         let first = time::delay::<u32, String>(&handle, 3, Ok(20)).await?;
///         let second = time::delay::<u32, String>(&handle, 1, Ok(22)).await?;
///         Ok::<_, String>(first + second)
///     }
/// });
///
/// assert_eq!(runtime.block_on(task), Ok(Ok(42)));
/// ```
pub fn spawn_local<T, E, F>(handle: &Handle, future: F) -> Task<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
    F: Future<Output = Result<T, E>> + 'static,
{
    let task = Task::pending(handle);
    let settler = task.settler();

    handle.spawn_local(Box::pin(async move {
        settler.settle(future.await);
    }));

    task
}
