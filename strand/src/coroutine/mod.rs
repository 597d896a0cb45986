//! Sequential-looking computations over tasks, without native suspension.
//!
//! A [`Coroutine`] is advanced step by step: each step either awaits a
//! task, returns, or throws. The driver started by [`spawn`] (or
//! [`drive`]) feeds every awaited task's value back in, or injects its
//! error at the same suspension point so the computation can recover from
//! it like inline code would.
//!
//! For code that prefers `async` blocks, the same behaviour is available
//! through [`crate::spawn_local`] and `task.await`.

mod driver;
mod from_fn;
mod step;

pub use driver::{DriverState, Driven, drive, spawn};
pub use from_fn::{FromFn, from_fn};
pub use step::{Coroutine, Resume, Step};
