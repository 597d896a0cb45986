//! # Strand
//!
//! **Strand** is a small single-threaded orchestration core for the **Nebula**
//! ecosystem. It composes independently completing units of work without
//! threads: everything runs on one cooperative loop driven by a virtual clock.
//!
//! It provides:
//!
//! - A settle-once [`Task`] with continuations that never run re-entrantly
//! - **Combinators** for serial chaining ([`sequence`]), wait-for-all
//!   ([`join_all`]) and first-to-settle ([`race`])
//! - A **coroutine driver** ([`coroutine::spawn`]) that resumes explicit
//!   state machines with task values, or re-injects task errors at the
//!   suspension point that awaited them
//! - **Timer-backed producers** in [`time`]
//! - An `async` bridge: tasks are awaitable inside [`spawn_local`]
//!
//! Nothing is ever cancelled. A task whose outcome no longer matters to a
//! combinator still runs to completion; its result is simply dropped.
//!
//! ## Quick Start
//!
//! ```rust
//! use strand::{Runtime, combinators::join_all, time};
//!
//! let runtime = Runtime::new();
//! let handle = runtime.handle();
//!
//! let first = time::delay::<_, String>(&handle, 3, Ok("Task 1 completed"));
//! let second = time::delay::<_, String>(&handle, 1, Ok("Task 2 completed"));
//!
//! let both = join_all(&handle, [first, second]);
//!
//! assert_eq!(
//!     runtime.block_on(both),
//!     Ok(Ok(vec!["Task 1 completed", "Task 2 completed"]))
//! );
//! ```
//!
//! ## Modules
//!
//! - [`task`]: The task primitive, chaining, and the `async` bridge
//! - [`combinators`]: `sequence`, `join_all`, `race`
//! - [`coroutine`]: Resumable computations and their driver
//! - [`time`]: Tasks that settle after a number of ticks

mod runtime;
mod utils;

pub mod combinators;
pub mod coroutine;
pub mod task;
pub mod time;

pub use combinators::{join_all, race, sequence};
pub use runtime::{Handle, Runtime, RuntimeBuilder, RuntimeError, Tick};
pub use task::{Settler, Task, TaskId, TaskState, spawn_local};
