use crate::task::TaskId;

/// Errors returned while driving the runtime loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The loop ran out of work while the awaited task was still pending.
    #[error("runtime went idle while task {0} was still pending")]
    Stalled(TaskId),

    /// The loop was still busy after the configured number of turns.
    #[error("runtime exceeded its limit of {0} turns")]
    TurnLimitExceeded(usize),
}
