//! Explicit coroutines driven by the task driver.
//!
//! Strategies that expect failures catch them at the suspension point and
//! finish normally. The others let a failure escape, which rejects the
//! strategy's task.

use strand::coroutine::{self, Coroutine, Resume, Step};
use strand::{Task, Tick, combinators};

use crate::context::Context;
use crate::error::ScenarioError;
use crate::strategy::Summary;

enum Point {
    Start,
    First,
    Second,
}

struct Serial {
    ctx: Context,
    ticks: (Tick, Tick),
    may_fail: bool,
    point: Point,
}

impl Coroutine for Serial {
    type Yield = String;
    type Output = Summary;
    type Error = ScenarioError;

    fn resume(
        &mut self,
        input: Resume<String, ScenarioError>,
    ) -> Step<String, Summary, ScenarioError> {
        let message = match input {
            Resume::Error(error) if self.may_fail => {
                return Step::Return(self.ctx.report_failure(&error));
            }
            Resume::Error(error) => return Step::Throw(error),
            Resume::Value(message) => Some(message),
            Resume::Start => None,
        };

        if let Some(message) = message {
            self.ctx.say(&message);
        }

        match self.point {
            Point::Start => {
                self.point = Point::First;
                Step::Await(self.ctx.timed_task(1, self.ticks.0, self.may_fail))
            }
            Point::First => {
                self.point = Point::Second;
                Step::Await(self.ctx.timed_task(2, self.ticks.1, self.may_fail))
            }
            Point::Second => Step::Return(self.ctx.finish(Summary::AllCompleted)),
        }
    }
}

struct Parallel {
    ctx: Context,
    ticks: (Tick, Tick),
    may_fail: bool,
}

impl Coroutine for Parallel {
    type Yield = Vec<String>;
    type Output = Summary;
    type Error = ScenarioError;

    fn resume(
        &mut self,
        input: Resume<Vec<String>, ScenarioError>,
    ) -> Step<Vec<String>, Summary, ScenarioError> {
        match input {
            Resume::Start => {
                let tasks = [
                    self.ctx.timed_task(1, self.ticks.0, self.may_fail),
                    self.ctx.timed_task(2, self.ticks.1, self.may_fail),
                ];
                Step::Await(combinators::join_all(self.ctx.handle(), tasks))
            }
            Resume::Value(messages) => {
                for message in &messages {
                    self.ctx.say(message);
                }
                Step::Return(self.ctx.finish(Summary::AllCompleted))
            }
            Resume::Error(error) if self.may_fail => Step::Return(self.ctx.report_failure(&error)),
            Resume::Error(error) => Step::Throw(error),
        }
    }
}

pub(crate) fn serial(
    ctx: &Context,
    ticks: (Tick, Tick),
    may_fail: bool,
) -> Task<Summary, ScenarioError> {
    coroutine::spawn(ctx.handle(), || Serial {
        ctx: ctx.clone(),
        ticks,
        may_fail,
        point: Point::Start,
    })
}

pub(crate) fn parallel(
    ctx: &Context,
    ticks: (Tick, Tick),
    may_fail: bool,
) -> Task<Summary, ScenarioError> {
    coroutine::spawn(ctx.handle(), || Parallel {
        ctx: ctx.clone(),
        ticks,
        may_fail,
    })
}
