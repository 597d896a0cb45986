use strand::RuntimeError;

/// Errors raised while running a scenario.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    /// A demo task failed. Carries the task label, e.g. `Task 1`.
    #[error("{0} failed")]
    Failed(String),

    /// No strategy has the requested name.
    #[error("unknown strategy `{0}` (run `strand-demo list` to see them all)")]
    UnknownStrategy(String),

    /// The runtime could not drive the scenario to completion.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
