use crate::runtime::Handle;
use crate::task::{Settler, Task, TaskId};

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

/// Decision state of a single [`race`] call.
struct Standings<T, E> {
    /// Lowest-index outcome observed during the deciding turn.
    leader: Option<(usize, Result<T, E>)>,

    /// Set once the winner has been chosen.
    decided: bool,
}

/// Settles with the outcome of whichever task settles first, success or
/// failure.
///
/// Outcomes observed during the same turn are compared at the end of that
/// turn and the lowest input index wins. This holds for inputs settled by
/// other races deciding in the same turn: races decide in creation order,
/// so an input race always decides before a race built on it. Losing tasks are not cancelled;
/// their outcomes are dropped. An empty list never settles.
///
/// # Examples
///
/// ```rust
/// use strand::{Runtime, combinators::race, time};
///
/// let runtime = Runtime::new();
/// let handle = runtime.handle();
///
/// let slow = time::delay::<&str, &str>(&handle, 5, Ok("slow"));
/// let fast = time::delay::<&str, &str>(&handle, 3, Err("fast failure"));
///
/// let first = race(&handle, [slow, fast]);
/// assert_eq!(runtime.block_on(first), Ok(Err("fast failure")));
/// ```
pub fn race<T, E, I>(handle: &Handle, tasks: I) -> Task<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
    I: IntoIterator<Item = Task<T, E>>,
{
    let result = Task::pending(handle);
    let standings = Rc::new(RefCell::new(Standings {
        leader: None,
        decided: false,
    }));

    for (index, task) in tasks.into_iter().enumerate() {
        let standings = standings.clone();
        let settler = result.settler();
        let handle = handle.clone();
        let rank = result.id();

        task.react(move |outcome| offer(&handle, rank, &standings, settler, index, outcome));
    }

    result
}

/// Records an input's outcome and schedules the decision on first entry.
fn offer<T, E>(
    handle: &Handle,
    rank: TaskId,
    standings: &Rc<RefCell<Standings<T, E>>>,
    settler: Settler<T, E>,
    index: usize,
    outcome: Result<T, E>,
) where
    T: Clone + 'static,
    E: Clone + 'static,
{
    let first_entry = {
        let mut standings = standings.borrow_mut();
        if standings.decided {
            trace!(index, "race dropped a losing outcome");
            return;
        }

        let first_entry = standings.leader.is_none();
        let ahead = matches!(&standings.leader, Some((leading, _)) if *leading < index);
        if !ahead {
            standings.leader = Some((index, outcome));
        }

        first_entry
    };

    if !first_entry {
        return;
    }

    let standings = standings.clone();
    handle.at_turn_end(rank, move || {
        let winner = {
            let mut standings = standings.borrow_mut();
            standings.decided = true;
            standings.leader.take()
        };

        if let Some((index, outcome)) = winner {
            trace!(index, "race decided");
            settler.settle(outcome);
        }
    });
}
