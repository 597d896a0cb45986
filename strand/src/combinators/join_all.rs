use crate::runtime::Handle;
use crate::task::Task;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

/// Values collected so far by a [`join_all`] call.
struct Collected<T> {
    /// One slot per input, in input order.
    slots: Vec<Option<T>>,

    /// Inputs that have not fulfilled yet.
    remaining: usize,
}

/// Waits for every task and fulfills with their values in input order.
///
/// The tasks are expected to be running already; `join_all` only observes
/// them. The result rejects as soon as any input rejects, with that
/// input's error. Inputs still pending keep running; their later values
/// and any later rejection are dropped. An empty list fulfills with an
/// empty `Vec`.
///
/// # Examples
///
/// ```rust
/// use strand::{Runtime, combinators::join_all, time};
///
/// let runtime = Runtime::new();
/// let handle = runtime.handle();
///
/// let slow = time::delay::<_, ()>(&handle, 6, Ok("slow"));
/// let fast = time::delay::<_, ()>(&handle, 1, Ok("fast"));
///
/// let both = join_all(&handle, [slow, fast]);
/// assert_eq!(runtime.block_on(both), Ok(Ok(vec!["slow", "fast"])));
/// ```
pub fn join_all<T, E, I>(handle: &Handle, tasks: I) -> Task<Vec<T>, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
    I: IntoIterator<Item = Task<T, E>>,
{
    let tasks: Vec<_> = tasks.into_iter().collect();
    let result = Task::pending(handle);

    if tasks.is_empty() {
        result.settler().resolve(Vec::new());
        return result;
    }

    let collected = Rc::new(RefCell::new(Collected {
        slots: tasks.iter().map(|_| None).collect(),
        remaining: tasks.len(),
    }));

    for (index, task) in tasks.iter().enumerate() {
        let collected = collected.clone();
        let on_success = result.settler();
        let on_failure = result.settler();
        let input = task.id();

        task.subscribe(
            move |value| {
                let values = {
                    let mut collected = collected.borrow_mut();
                    collected.slots[index] = Some(value);
                    collected.remaining -= 1;

                    if collected.remaining > 0 {
                        return;
                    }

                    let values: Vec<T> = collected.slots.drain(..).flatten().collect();
                    values
                };

                on_success.resolve(values);
            },
            move |error| {
                if !on_failure.reject(error) {
                    trace!(task = %input, "join_all dropped a late rejection");
                }
            },
        );
    }

    result
}
