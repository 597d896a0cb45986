use crate::Task;

/// Input fed to a [`Coroutine`] when it is advanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resume<Y, E> {
    /// First advance; nothing has been awaited yet.
    Start,

    /// The awaited task fulfilled with this value.
    Value(Y),

    /// The awaited task rejected; the error is raised at the suspension
    /// point it was awaited from.
    Error(E),
}

impl<Y, E> Resume<Y, E> {
    /// Converts the input into a `Result`, mapping `Start` to `Ok(None)`.
    ///
    /// Handy for coroutines that propagate every failure:
    /// `match input.into_result() { Err(e) => Step::Throw(e), ... }`.
    pub fn into_result(self) -> Result<Option<Y>, E> {
        match self {
            Resume::Start => Ok(None),
            Resume::Value(value) => Ok(Some(value)),
            Resume::Error(error) => Err(error),
        }
    }
}

/// What a [`Coroutine`] does after being advanced.
pub enum Step<Y, T, E> {
    /// Suspend until the task settles.
    Await(Task<Y, E>),

    /// Finish with a value.
    Return(T),

    /// Finish with an error that escaped the computation.
    Throw(E),
}

/// A resumable computation over tasks.
///
/// Each call to [`resume`](Self::resume) runs the computation from its
/// current suspension point to the next one. The driver calls it with
/// [`Resume::Start`] first, then with the outcome of every task the
/// computation awaited. An error delivered as [`Resume::Error`] should be
/// treated as raised at the suspension point that awaited the failed
/// task: the computation may recover from it or let it escape with
/// [`Step::Throw`].
///
/// Implementations are usually explicit state machines keyed by their
/// current suspension point.
pub trait Coroutine {
    /// Value type of the tasks the computation awaits.
    type Yield;

    /// Value the computation finishes with.
    type Output;

    /// Error type of awaited tasks and of the computation itself.
    type Error;

    /// Advances the computation to its next suspension point.
    fn resume(
        &mut self,
        input: Resume<Self::Yield, Self::Error>,
    ) -> Step<Self::Yield, Self::Output, Self::Error>;
}
