//! Task chains built from the combinators.

use strand::{Task, Tick, combinators};

use crate::context::Context;
use crate::error::ScenarioError;
use crate::strategy::Summary;

type Step = Box<dyn FnOnce() -> Task<(), ScenarioError>>;

/// Turns the outcome of a chain into its closing narration.
fn conclude(ctx: &Context, body: Task<(), ScenarioError>) -> Task<Summary, ScenarioError> {
    let done = ctx.clone();
    let failed = ctx.clone();

    body.map(move |()| done.finish(Summary::AllCompleted))
        .or_else(move |error| {
            let summary = failed.report_failure(&error);
            Task::fulfilled(failed.handle(), summary)
        })
}

pub(crate) fn serial(
    ctx: &Context,
    (first, second): (Tick, Tick),
    may_fail: bool,
) -> Task<Summary, ScenarioError> {
    let steps: Vec<Step> = [(1, first), (2, second)]
        .into_iter()
        .map(|(n, ticks)| {
            let ctx = ctx.clone();
            Box::new(move || {
                let narrator = ctx.clone();
                ctx.timed_task(n, ticks, may_fail)
                    .map(move |message| narrator.say(&message))
            }) as Step
        })
        .collect();

    let chain = combinators::sequence(ctx.handle(), steps).map(|_| ());
    conclude(ctx, chain)
}

pub(crate) fn parallel(
    ctx: &Context,
    (first, second): (Tick, Tick),
    may_fail: bool,
) -> Task<Summary, ScenarioError> {
    let tasks = [
        ctx.timed_task(1, first, may_fail),
        ctx.timed_task(2, second, may_fail),
    ];

    let narrator = ctx.clone();
    let body = combinators::join_all(ctx.handle(), tasks).map(move |messages| {
        for message in &messages {
            narrator.say(message);
        }
    });

    conclude(ctx, body)
}

pub(crate) fn race(
    ctx: &Context,
    (first, second): (Tick, Tick),
    may_fail: bool,
) -> Task<Summary, ScenarioError> {
    let tasks = [
        ctx.timed_task(1, first, may_fail),
        ctx.timed_task(2, second, may_fail),
    ];

    let narrator = ctx.clone();
    let body = combinators::race(ctx.handle(), tasks)
        .map(move |message| narrator.say(&message));

    conclude(ctx, body)
}
