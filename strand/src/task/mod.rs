//! The settle-once task primitive.
//!
//! This module defines [`Task`], the deferred result every other part of
//! the crate is built on:
//! - creation with an executor receiving a [`Settler`],
//! - continuations registered with [`Task::subscribe`],
//! - chaining helpers (`map`, `and_then`, `or_else`, ...),
//! - a bridge to `async` code through [`IntoFuture`](std::future::IntoFuture)
//!   and [`spawn_local`].

mod chain;
mod core;
mod future;
mod state;

pub use core::{Settler, Task, TaskId};
pub use future::{TaskFuture, spawn_local};
pub use state::TaskState;
