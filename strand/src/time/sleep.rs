use crate::Task;
use crate::runtime::{Handle, Tick};

/// Creates a task that fulfills with `()` after `ticks` ticks.
///
/// # Examples
///
/// ```rust
/// use strand::{Runtime, time};
///
/// let runtime = Runtime::new();
/// let nap = time::sleep::<()>(&runtime.handle(), 5);
///
/// assert_eq!(runtime.block_on(nap), Ok(Ok(())));
/// assert_eq!(runtime.now(), 5);
/// ```
pub fn sleep<E>(handle: &Handle, ticks: Tick) -> Task<(), E>
where
    E: Clone + 'static,
{
    delay(handle, ticks, Ok(()))
}

/// Creates a task that settles with `outcome` after `ticks` ticks.
///
/// The timer is registered immediately; there is no way to cancel it.
pub fn delay<T, E>(handle: &Handle, ticks: Tick, outcome: Result<T, E>) -> Task<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    Task::new(handle, |settler| {
        handle.after(ticks, move || {
            settler.settle(outcome);
        });
    })
}
