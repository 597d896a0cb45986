/// Internal settlement state of a task.
///
/// Transitions only ever go from `Pending` to one of the terminal
/// variants; a terminal state is never left.
pub(crate) enum State<T, E> {
    /// Not settled yet.
    Pending,

    /// Settled successfully.
    Fulfilled(T),

    /// Settled with an error.
    Rejected(E),
}

impl<T: Clone, E: Clone> State<T, E> {
    /// Returns a copy of the outcome once the state is terminal.
    pub(crate) fn outcome(&self) -> Option<Result<T, E>> {
        match self {
            State::Pending => None,
            State::Fulfilled(value) => Some(Ok(value.clone())),
            State::Rejected(error) => Some(Err(error.clone())),
        }
    }
}

impl<T, E> State<T, E> {
    pub(crate) fn is_pending(&self) -> bool {
        matches!(self, State::Pending)
    }

    pub(crate) fn kind(&self) -> TaskState {
        match self {
            State::Pending => TaskState::Pending,
            State::Fulfilled(_) => TaskState::Fulfilled,
            State::Rejected(_) => TaskState::Rejected,
        }
    }
}

impl<T, E> From<Result<T, E>> for State<T, E> {
    fn from(outcome: Result<T, E>) -> Self {
        match outcome {
            Ok(value) => State::Fulfilled(value),
            Err(error) => State::Rejected(error),
        }
    }
}

/// Observable lifecycle state of a [`Task`](super::Task).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// The task has not settled yet.
    Pending,

    /// The task settled with a value.
    Fulfilled,

    /// The task settled with an error.
    Rejected,
}
