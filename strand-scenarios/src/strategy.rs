use std::fmt;
use std::str::FromStr;

use strand::{Task, Tick};

use crate::context::Context;
use crate::error::ScenarioError;
use crate::styles::{asynchronous, callbacks, coroutines, tasks};

/// How the two demo tasks are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// The second task starts only after the first one completed.
    Serial,
    /// Both tasks start together; the outcome waits for both.
    Parallel,
    /// Both tasks start together; the first to settle decides.
    Race,
}

/// Which programming style the strategy is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Callbacks,
    Tasks,
    Async,
    Coroutine,
}

/// Final outcome of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Summary {
    AllCompleted,
    SomeFailed,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::AllCompleted => f.write_str("All tasks completed"),
            Summary::SomeFailed => f.write_str("Some task(s) failed"),
        }
    }
}

/// One of the demo strategies, e.g. `parallel-coroutine-with-fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strategy {
    shape: Shape,
    style: Style,
    failures: bool,
}

impl Strategy {
    /// Every strategy, in presentation order.
    pub const ALL: [Strategy; 18] = [
        Strategy::new(Shape::Serial, Style::Callbacks, false),
        Strategy::new(Shape::Serial, Style::Tasks, false),
        Strategy::new(Shape::Parallel, Style::Callbacks, false),
        Strategy::new(Shape::Parallel, Style::Tasks, false),
        Strategy::new(Shape::Serial, Style::Callbacks, true),
        Strategy::new(Shape::Serial, Style::Tasks, true),
        Strategy::new(Shape::Parallel, Style::Callbacks, true),
        Strategy::new(Shape::Parallel, Style::Tasks, true),
        Strategy::new(Shape::Race, Style::Tasks, false),
        Strategy::new(Shape::Race, Style::Tasks, true),
        Strategy::new(Shape::Serial, Style::Async, false),
        Strategy::new(Shape::Serial, Style::Async, true),
        Strategy::new(Shape::Parallel, Style::Async, false),
        Strategy::new(Shape::Parallel, Style::Async, true),
        Strategy::new(Shape::Serial, Style::Coroutine, false),
        Strategy::new(Shape::Parallel, Style::Coroutine, false),
        Strategy::new(Shape::Serial, Style::Coroutine, true),
        Strategy::new(Shape::Parallel, Style::Coroutine, true),
    ];

    const fn new(shape: Shape, style: Style, failures: bool) -> Self {
        Self {
            shape,
            style,
            failures,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Whether the demo tasks may fail.
    pub fn failures(&self) -> bool {
        self.failures
    }

    /// Durations of the first and second demo task.
    pub fn durations(&self) -> (Tick, Tick) {
        use Shape::*;
        use Style::*;

        match (self.shape, self.style, self.failures) {
            (Serial, Callbacks | Tasks | Async, _) => (3, 1),
            (Serial, Coroutine, false) => (3, 3),
            (Serial, Coroutine, true) => (3, 1),
            (Parallel, Callbacks, _) => (3, 2),
            (Parallel, Tasks, false) => (6, 1),
            (Parallel, Tasks, true) => (1, 3),
            (Parallel, Async, false) => (7, 1),
            (Parallel, Async | Coroutine, true) => (3, 6),
            (Parallel, Coroutine, false) => (7, 5),
            (Race, _, false) => (3, 4),
            (Race, _, true) => (5, 3),
        }
    }

    /// Starts the strategy on `ctx`.
    ///
    /// The returned task fulfills with the summary once the strategy has
    /// narrated its closing line. It only rejects when a failure escapes
    /// a strategy that does not handle failures.
    pub fn start(&self, ctx: &Context) -> Task<Summary, ScenarioError> {
        let ticks = self.durations();
        let may_fail = self.failures;

        match (self.shape, self.style) {
            (Shape::Race, _) => tasks::race(ctx, ticks, may_fail),
            (Shape::Serial, Style::Callbacks) => callbacks::serial(ctx, ticks, may_fail),
            (Shape::Parallel, Style::Callbacks) => callbacks::parallel(ctx, ticks, may_fail),
            (Shape::Serial, Style::Tasks) => tasks::serial(ctx, ticks, may_fail),
            (Shape::Parallel, Style::Tasks) => tasks::parallel(ctx, ticks, may_fail),
            (Shape::Serial, Style::Async) => asynchronous::serial(ctx, ticks, may_fail),
            (Shape::Parallel, Style::Async) => asynchronous::parallel(ctx, ticks, may_fail),
            (Shape::Serial, Style::Coroutine) => coroutines::serial(ctx, ticks, may_fail),
            (Shape::Parallel, Style::Coroutine) => coroutines::parallel(ctx, ticks, may_fail),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self.shape {
            Shape::Serial => "serial",
            Shape::Parallel => "parallel",
            Shape::Race => "race",
        };
        let style = match self.style {
            Style::Callbacks => "callbacks",
            Style::Tasks => "tasks",
            Style::Async => "async",
            Style::Coroutine => "coroutine",
        };

        write!(f, "{shape}-{style}")?;
        if self.failures {
            f.write_str("-with-fail")?;
        }
        Ok(())
    }
}

impl FromStr for Strategy {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.to_string() == s)
            .ok_or_else(|| ScenarioError::UnknownStrategy(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_parse_back() {
        let names: HashSet<String> = Strategy::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names.len(), Strategy::ALL.len());

        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            "serial-telepathy".parse::<Strategy>(),
            Err(ScenarioError::UnknownStrategy("serial-telepathy".into()))
        );
    }

    #[test]
    fn naming_scheme() {
        let strategy = Strategy::new(Shape::Parallel, Style::Coroutine, true);
        assert_eq!(strategy.to_string(), "parallel-coroutine-with-fail");
        assert_eq!(Strategy::ALL[0].to_string(), "serial-callbacks");
    }
}
