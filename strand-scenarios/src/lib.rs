//! # Strand Scenarios
//!
//! Narrated demonstrations built on the [`strand`] orchestration core.
//!
//! Two timer-backed tasks are run serially, in parallel, or raced, using
//! plain callbacks, task combinators, `async` blocks, or explicit
//! coroutines, with and without randomized failures. Each strategy
//! narrates what happens through a [`Sink`] and draws its failures from an
//! injected [`Decide`] source, so every run can be replayed exactly in
//! tests.
//!
//! ```rust
//! use std::rc::Rc;
//! use strand_scenarios::{Always, Runner, Strategy, Summary, Transcript};
//!
//! let strategy: Strategy = "serial-tasks".parse().unwrap();
//! let transcript = Transcript::new();
//!
//! let report = Runner::new(strategy)
//!     .run(Rc::new(transcript.clone()), Rc::new(Always(true)))
//!     .unwrap();
//!
//! assert_eq!(report.summary, Summary::AllCompleted);
//! assert_eq!(transcript.lines().last().unwrap(), "All tasks completed");
//! ```

mod context;
mod decide;
mod error;
mod runner;
mod sink;
mod strategy;
mod styles;

pub mod config;

pub use context::Context;
pub use decide::{Always, Decide, RandomDecider, Scripted};
pub use error::ScenarioError;
pub use runner::{Report, Runner};
pub use sink::{Console, Sink, Transcript};
pub use strategy::{Shape, Strategy, Style, Summary};
