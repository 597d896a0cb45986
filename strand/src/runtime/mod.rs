//! Core runtime components.
//!
//! This module contains the cooperative loop every task runs on:
//! - the continuation queue that delivers task outcomes,
//! - the timer queue and its virtual clock,
//! - local futures spawned with [`crate::spawn_local`],
//! - end-of-turn bookkeeping (race decisions, unobserved rejections).
//!
//! Most users only touch [`Runtime`], [`RuntimeBuilder`] and [`Handle`].

mod core;
mod timer;
mod waker;

pub(crate) mod builder;
pub(crate) mod error;
pub(crate) mod handle;

pub use builder::RuntimeBuilder;
pub use core::Runtime;
pub use error::RuntimeError;
pub use handle::Handle;

/// A point on the runtime's virtual clock.
pub type Tick = u64;
