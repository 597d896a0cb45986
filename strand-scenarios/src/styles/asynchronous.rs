//! `async` blocks awaiting tasks on the local executor.

use strand::{Task, Tick, combinators, spawn_local};

use crate::context::Context;
use crate::error::ScenarioError;
use crate::strategy::Summary;

pub(crate) fn serial(
    ctx: &Context,
    (first, second): (Tick, Tick),
    may_fail: bool,
) -> Task<Summary, ScenarioError> {
    let handle = ctx.handle().clone();
    let ctx = ctx.clone();

    spawn_local(&handle, async move {
        let body = async {
            let message = ctx.timed_task(1, first, may_fail).await?;
            ctx.say(&message);

            let message = ctx.timed_task(2, second, may_fail).await?;
            ctx.say(&message);

            Ok::<_, ScenarioError>(())
        };

        Ok(match body.await {
            Ok(()) => ctx.finish(Summary::AllCompleted),
            Err(error) => ctx.report_failure(&error),
        })
    })
}

pub(crate) fn parallel(
    ctx: &Context,
    (first, second): (Tick, Tick),
    may_fail: bool,
) -> Task<Summary, ScenarioError> {
    let handle = ctx.handle().clone();
    let ctx = ctx.clone();

    spawn_local(&handle, async move {
        let tasks = [
            ctx.timed_task(1, first, may_fail),
            ctx.timed_task(2, second, may_fail),
        ];

        match combinators::join_all(ctx.handle(), tasks).await {
            Ok(messages) => {
                for message in &messages {
                    ctx.say(message);
                }
                Ok(ctx.finish(Summary::AllCompleted))
            }
            Err(error) => Ok(ctx.report_failure(&error)),
        }
    })
}
