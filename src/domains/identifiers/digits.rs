//! Random digit sources.
//!
//! Every identifier generator draws its randomness through the
//! [`RandomDigitSource`] trait, so tests can substitute a seeded or fixed
//! source without touching any global RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of uniformly distributed random digits and choices.
pub trait RandomDigitSource: Send + Sync {
    /// Produce `length` decimal digit characters, each drawn uniformly from 0-9.
    fn random_digits(&self, length: usize) -> String;

    /// Pick an index uniformly from `0..bound`.
    ///
    /// `bound` must be at least 1.
    fn choose(&self, bound: usize) -> usize;
}

/// Live source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngDigitSource;

impl ThreadRngDigitSource {
    pub fn new() -> Self {
        Self
    }
}

impl RandomDigitSource for ThreadRngDigitSource {
    fn random_digits(&self, length: usize) -> String {
        let mut rng = rand::thread_rng();
        digits_from(&mut rng, length)
    }

    fn choose(&self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Deterministic source seeded from a `u64`.
///
/// Two sources built from the same seed yield the same sequence of digits
/// and choices.
#[derive(Debug)]
pub struct SeededDigitSource {
    rng: Mutex<StdRng>,
}

impl SeededDigitSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }
}

impl RandomDigitSource for SeededDigitSource {
    fn random_digits(&self, length: usize) -> String {
        self.with_rng(|rng| digits_from(rng, length))
    }

    fn choose(&self, bound: usize) -> usize {
        self.with_rng(|rng| rng.gen_range(0..bound))
    }
}

/// Source that always yields the same digit and the same choice.
///
/// The choice is clamped to `bound - 1`, so a choice of `0` always selects
/// the first alternative and `usize::MAX` always the last.
#[derive(Debug, Clone, Copy)]
pub struct FixedDigitSource {
    digit: u8,
    choice: usize,
}

impl FixedDigitSource {
    /// Create a fixed source. `digit` is taken modulo 10.
    pub fn new(digit: u8, choice: usize) -> Self {
        Self {
            digit: digit % 10,
            choice,
        }
    }

    /// All zeros, always choosing the first alternative.
    pub fn zeros() -> Self {
        Self::new(0, 0)
    }
}

impl RandomDigitSource for FixedDigitSource {
    fn random_digits(&self, length: usize) -> String {
        let c = char::from(b'0' + self.digit);
        std::iter::repeat_n(c, length).collect()
    }

    fn choose(&self, bound: usize) -> usize {
        self.choice.min(bound.saturating_sub(1))
    }
}

fn digits_from<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
