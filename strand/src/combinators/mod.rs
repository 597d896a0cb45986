//! Composition of independently settling tasks.
//!
//! - [`sequence`] starts steps one at a time and stops at the first failure.
//! - [`join_all`] waits for every task and fails fast on the first rejection.
//! - [`race`] settles with whichever task settles first.
//!
//! None of them cancels anything: inputs whose outcome no longer matters
//! keep running and their results are dropped.

mod join_all;
mod race;
mod sequence;

#[doc(inline)]
pub use join_all::join_all;

#[doc(inline)]
pub use race::race;

#[doc(inline)]
pub use sequence::sequence;
