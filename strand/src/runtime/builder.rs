use super::Runtime;

use std::time::Duration;

/// Default upper bound on the number of turns a single run may take.
const DEFAULT_TURN_LIMIT: usize = 1_000_000;

/// Builder for configuring and creating a runtime.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use strand::RuntimeBuilder;
///
/// let runtime = RuntimeBuilder::new()
///     .tick_duration(Duration::from_millis(10))
///     .turn_limit(10_000)
///     .build();
/// ```
pub struct RuntimeBuilder {
    /// Real time slept for each tick the clock advances.
    tick_duration: Duration,

    /// Maximum number of turns per `run`/`block_on` call.
    turn_limit: usize,
}

impl RuntimeBuilder {
    /// Creates a new `RuntimeBuilder` with default configuration.
    ///
    /// By default ticks take no real time and the turn limit is one
    /// million.
    pub fn new() -> Self {
        Self {
            tick_duration: Duration::ZERO,
            turn_limit: DEFAULT_TURN_LIMIT,
        }
    }

    /// Sets how long the runtime sleeps for every tick the clock advances.
    pub fn tick_duration(mut self, duration: Duration) -> Self {
        self.tick_duration = duration;
        self
    }

    /// Sets the maximum number of turns a single run may take.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn turn_limit(mut self, n: usize) -> Self {
        assert!(n > 0, "turn_limit must be > 0");

        self.turn_limit = n;
        self
    }

    /// Builds the runtime with the configured options.
    pub fn build(self) -> Runtime {
        Runtime::with_config(self.tick_duration, self.turn_limit)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
