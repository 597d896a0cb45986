use std::fmt;
use std::rc::Rc;

use strand::{Handle, Task, Tick};
use tracing::trace;

use crate::decide::Decide;
use crate::error::ScenarioError;
use crate::sink::Sink;
use crate::strategy::Summary;

/// Everything a strategy needs: the runtime handle, where to narrate, and
/// where failures come from.
#[derive(Clone)]
pub struct Context {
    handle: Handle,
    sink: Rc<dyn Sink>,
    decider: Rc<dyn Decide>,
}

impl Context {
    pub fn new(handle: Handle, sink: Rc<dyn Sink>, decider: Rc<dyn Decide>) -> Self {
        Self {
            handle,
            sink,
            decider,
        }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Narrates one line.
    pub fn say(&self, line: impl AsRef<str>) {
        self.sink.line(line.as_ref());
    }

    /// Starts demo task `n`, which settles after `ticks`.
    ///
    /// Narrates `Task n started` immediately. When the timer fires, the
    /// task fulfills with `Task n completed`, or, if `may_fail` is set and
    /// the decider says so, rejects with [`ScenarioError::Failed`].
    pub fn timed_task(&self, n: u32, ticks: Tick, may_fail: bool) -> Task<String, ScenarioError> {
        self.say(format!("Task {n} started"));

        let ctx = self.clone();
        Task::new(&self.handle, move |settler| {
            let handle = ctx.handle.clone();
            handle.after(ticks, move || {
                settler.settle(ctx.outcome(n, may_fail));
            });
        })
    }

    /// Callback flavor of [`timed_task`](Self::timed_task): `done` receives
    /// the outcome directly from the timer, without a task in between.
    pub fn timed_callback<F>(&self, n: u32, ticks: Tick, may_fail: bool, done: F)
    where
        F: FnOnce(Result<String, ScenarioError>) + 'static,
    {
        self.say(format!("Task {n} started"));

        let ctx = self.clone();
        self.handle.after(ticks, move || done(ctx.outcome(n, may_fail)));
    }

    /// Narrates the closing line for `summary` and returns it.
    pub(crate) fn finish(&self, summary: Summary) -> Summary {
        self.say(summary.to_string());
        summary
    }

    /// Narrates `error` followed by the failure summary.
    pub(crate) fn report_failure(&self, error: &ScenarioError) -> Summary {
        self.say(error.to_string());
        self.finish(Summary::SomeFailed)
    }

    fn outcome(&self, n: u32, may_fail: bool) -> Result<String, ScenarioError> {
        let succeeds = !may_fail || self.decider.decide();
        trace!(task = n, succeeds, tick = self.handle.now(), "demo task settles");

        if succeeds {
            Ok(format!("Task {n} completed"))
        } else {
            Err(ScenarioError::Failed(format!("Task {n}")))
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("now", &self.handle.now())
            .finish_non_exhaustive()
    }
}
