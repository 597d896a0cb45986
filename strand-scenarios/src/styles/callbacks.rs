//! Nested callbacks straight on the runtime's timers.

use std::cell::Cell;
use std::rc::Rc;

use strand::{Task, Tick};

use crate::context::Context;
use crate::error::ScenarioError;
use crate::strategy::Summary;

pub(crate) fn serial(
    ctx: &Context,
    (first, second): (Tick, Tick),
    may_fail: bool,
) -> Task<Summary, ScenarioError> {
    Task::new(ctx.handle(), |settler| {
        let ctx1 = ctx.clone();
        ctx.timed_callback(1, first, may_fail, move |outcome| match outcome {
            Ok(message) => {
                ctx1.say(&message);

                let ctx2 = ctx1.clone();
                ctx1.timed_callback(2, second, may_fail, move |outcome| {
                    let summary = match outcome {
                        Ok(message) => {
                            ctx2.say(&message);
                            ctx2.finish(Summary::AllCompleted)
                        }
                        Err(error) => ctx2.report_failure(&error),
                    };
                    settler.resolve(summary);
                });
            }
            Err(error) => {
                settler.resolve(ctx1.report_failure(&error));
            }
        });
    })
}

pub(crate) fn parallel(
    ctx: &Context,
    (first, second): (Tick, Tick),
    may_fail: bool,
) -> Task<Summary, ScenarioError> {
    Task::new(ctx.handle(), |settler| {
        let reported = Rc::new(Cell::new(0));
        let failed = Rc::new(Cell::new(false));

        for (n, ticks) in [(1, first), (2, second)] {
            let ctx = ctx.clone();
            let settler = settler.clone();
            let reported = reported.clone();
            let failed = failed.clone();

            ctx.clone().timed_callback(n, ticks, may_fail, move |outcome| {
                match outcome {
                    Ok(message) => ctx.say(&message),
                    Err(error) => {
                        ctx.say(error.to_string());
                        failed.set(true);
                    }
                }

                reported.set(reported.get() + 1);
                if reported.get() == 2 {
                    let summary = if failed.get() {
                        Summary::SomeFailed
                    } else {
                        Summary::AllCompleted
                    };
                    settler.resolve(ctx.finish(summary));
                }
            });
        }
    })
}
