//! Injectable randomness.
//!
//! Offer draws and verification codes both reduce to "give me a uniform
//! value in `[0, 1)`". [`ThreadRandom`] backs production; [`SequenceRandom`]
//! replays a scripted list so tests can hit exact branches.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::Rng;

/// A source of uniform values in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }
}

/// Thread-local RNG from the `rand` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    queue: Mutex<VecDeque<f64>>,
}

impl SequenceRandom {
    /// Values outside `[0, 1)` are clamped into range.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let values: Vec<f64> = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self {
            queue: Mutex::new(values.iter().copied().collect()),
            values,
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&self) -> f64 {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.is_empty() {
            queue.extend(self.values.iter().copied());
        }
        queue.pop_front().unwrap_or(0.0)
    }
}
