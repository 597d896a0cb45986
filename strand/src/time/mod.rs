//! Timer-backed task producers.
//!
//! This module exposes the runtime timer queue through the task vocabulary.
//!
//! It includes:
//! - [`sleep`] and [`delay`] for tasks that settle after a number of ticks,
//! - [`instrumented`] for measuring how many ticks a task took to settle.

mod instrumented;
mod sleep;

#[doc(inline)]
pub use instrumented::instrumented;

#[doc(inline)]
pub use sleep::{delay, sleep};
