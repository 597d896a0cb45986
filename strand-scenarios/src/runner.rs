use std::rc::Rc;
use std::time::Duration;

use strand::{RuntimeBuilder, Tick};
use tracing::{info, warn};

use crate::context::Context;
use crate::decide::Decide;
use crate::error::ScenarioError;
use crate::sink::Sink;
use crate::strategy::{Strategy, Summary};

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub summary: Summary,

    /// Virtual time when the strategy produced its summary.
    pub finished_at: Tick,

    /// Virtual time once every leftover timer had fired.
    pub drained_at: Tick,
}

/// Runs one strategy on a fresh runtime.
#[derive(Debug, Clone)]
pub struct Runner {
    strategy: Strategy,
    tick_duration: Duration,
}

impl Runner {
    /// Creates a runner whose ticks take no real time.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            tick_duration: Duration::ZERO,
        }
    }

    /// Sets how much real time each tick takes.
    pub fn tick_duration(mut self, duration: Duration) -> Self {
        self.tick_duration = duration;
        self
    }

    /// Runs the strategy until it has summarized, then lets the tasks it
    /// left behind (race losers, tasks outlived by a failure) finish.
    ///
    /// # Errors
    ///
    /// Returns the failure that escaped a strategy that does not handle
    /// failures, or the runtime error that stopped the loop.
    pub fn run(
        &self,
        sink: Rc<dyn Sink>,
        decider: Rc<dyn Decide>,
    ) -> Result<Report, ScenarioError> {
        let runtime = RuntimeBuilder::new()
            .tick_duration(self.tick_duration)
            .build();
        let ctx = Context::new(runtime.handle(), sink, decider);

        info!(strategy = %self.strategy, "starting");

        let summary = runtime.block_on(self.strategy.start(&ctx))??;
        let finished_at = runtime.now();

        runtime.run()?;

        for id in runtime.unhandled_rejections() {
            warn!(task = %id, "task failed without a handler");
        }

        info!(strategy = %self.strategy, ?summary, finished_at, "finished");

        Ok(Report {
            summary,
            finished_at,
            drained_at: runtime.now(),
        })
    }
}
