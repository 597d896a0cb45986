use crate::runtime::Handle;
use crate::task::{Settler, Task};

/// Runs task-producing steps one after another.
///
/// Step *k + 1* is not started until step *k* has fulfilled. The first
/// rejection stops the chain: no later step is started and the returned
/// task rejects with that error. Once every step has fulfilled, the
/// returned task fulfills with `Some(last value)`; an empty list fulfills
/// with `None` on the next drain.
///
/// Each step is resumed from a continuation, so long chains do not grow
/// the call stack.
///
/// # Examples
///
/// ```rust
/// use strand::{Runtime, Task, combinators::sequence, time};
///
/// let runtime = Runtime::new();
/// let handle = runtime.handle();
///
/// let steps: Vec<Box<dyn FnOnce() -> Task<&'static str, ()>>> = vec![
///     Box::new({ let h = handle.clone(); move || time::delay(&h, 3, Ok("first")) }),
///     Box::new({ let h = handle.clone(); move || time::delay(&h, 1, Ok("second")) }),
/// ];
///
/// let chain = sequence(&handle, steps);
/// assert_eq!(runtime.block_on(chain), Ok(Ok(Some("second"))));
/// assert_eq!(runtime.now(), 4);
/// ```
pub fn sequence<T, E, I, S>(handle: &Handle, steps: I) -> Task<Option<T>, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
    I: IntoIterator<Item = S>,
    I::IntoIter: 'static,
    S: FnOnce() -> Task<T, E> + 'static,
{
    let result = Task::pending(handle);
    advance(steps.into_iter(), None, result.settler());
    result
}

/// Starts the next step, or settles the chain if none is left.
fn advance<T, E, It, S>(mut steps: It, last: Option<T>, settler: Settler<Option<T>, E>)
where
    T: Clone + 'static,
    E: Clone + 'static,
    It: Iterator<Item = S> + 'static,
    S: FnOnce() -> Task<T, E> + 'static,
{
    let Some(step) = steps.next() else {
        settler.resolve(last);
        return;
    };

    let on_failure = settler.clone();
    step().subscribe(
        move |value| advance(steps, Some(value), settler),
        move |error| {
            on_failure.reject(error);
        },
    );
}
