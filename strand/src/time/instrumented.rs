use crate::Task;
use crate::runtime::Tick;

/// Wraps a task and measures how many ticks it takes to settle.
///
/// The returned task fulfills with the outcome of `task` paired with the
/// number of ticks elapsed between this call and its settlement. It never
/// rejects: a failure of `task` is reported inside the pair.
///
/// # Examples
///
/// ```rust
/// use strand::{Runtime, time};
///
/// let runtime = Runtime::new();
/// let handle = runtime.handle();
///
/// let measured = time::instrumented(&time::delay::<_, ()>(&handle, 4, Ok("late")));
///
/// assert_eq!(runtime.block_on(measured), Ok(Ok((Ok("late"), 4))));
/// ```
pub fn instrumented<T, E>(task: &Task<T, E>) -> Task<(Result<T, E>, Tick), E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    let handle = task.handle().clone();
    let start = handle.now();

    let measured = Task::pending(task.handle());
    let settler = measured.settler();

    task.react(move |outcome| {
        let elapsed = handle.now().saturating_sub(start);
        settler.resolve((outcome, elapsed));
    });

    measured
}
