//! One module per programming style. Every entry point takes the context,
//! the durations of the two demo tasks, and whether they may fail.

pub(crate) mod asynchronous;
pub(crate) mod callbacks;
pub(crate) mod coroutines;
pub(crate) mod tasks;
