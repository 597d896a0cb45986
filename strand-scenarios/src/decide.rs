use std::cell::RefCell;
use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of success/failure decisions for demo tasks.
pub trait Decide {
    /// Returns `true` if the next task should succeed.
    fn decide(&self) -> bool;
}

/// Always returns the same decision.
#[derive(Debug, Clone, Copy)]
pub struct Always(pub bool);

impl Decide for Always {
    fn decide(&self) -> bool {
        self.0
    }
}

/// Replays a fixed list of decisions, then succeeds forever.
#[derive(Debug, Default)]
pub struct Scripted {
    decisions: RefCell<VecDeque<bool>>,
}

impl Scripted {
    pub fn new(decisions: impl IntoIterator<Item = bool>) -> Self {
        Self {
            decisions: RefCell::new(decisions.into_iter().collect()),
        }
    }
}

impl Decide for Scripted {
    fn decide(&self) -> bool {
        self.decisions.borrow_mut().pop_front().unwrap_or(true)
    }
}

/// Fails with a fixed probability, optionally from a seeded generator.
#[derive(Debug)]
pub struct RandomDecider {
    rng: RefCell<StdRng>,
    failure_rate: f64,
}

impl RandomDecider {
    /// Creates a decider failing with probability `failure_rate`.
    ///
    /// The rate is clamped to `[0, 1]`. Without a seed the generator is
    /// seeded from the operating system.
    pub fn new(seed: Option<u64>, failure_rate: f64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng: RefCell::new(rng),
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

impl Decide for RandomDecider {
    fn decide(&self) -> bool {
        !self.rng.borrow_mut().gen_bool(self.failure_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_replays_then_succeeds() {
        let decider = Scripted::new([false, true, false]);
        let decisions: Vec<_> = (0..5).map(|_| decider.decide()).collect();

        assert_eq!(decisions, vec![false, true, false, true, true]);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = RandomDecider::new(Some(7), 0.5);
        let b = RandomDecider::new(Some(7), 0.5);

        let left: Vec<_> = (0..32).map(|_| a.decide()).collect();
        let right: Vec<_> = (0..32).map(|_| b.decide()).collect();

        assert_eq!(left, right);
    }

    #[test]
    fn extreme_rates() {
        let never = RandomDecider::new(Some(1), 0.0);
        let always = RandomDecider::new(Some(1), 3.0);

        assert!((0..16).all(|_| never.decide()));
        assert!((0..16).all(|_| !always.decide()));
    }
}
