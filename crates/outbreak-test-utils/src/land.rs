//! Land oracles for exercising placement fallbacks.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use outbreak_core::LandOracle;

/// Returns queued answers in order, then `fallback` forever.
///
/// Lets a test decide exactly which placement candidates are accepted.
pub struct ScriptedLand {
    answers: Mutex<VecDeque<bool>>,
    fallback: bool,
    calls: AtomicUsize,
}

impl ScriptedLand {
    pub fn new(answers: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every query is answered `false`.
    pub fn never() -> Self {
        Self::new([], false)
    }

    /// Number of queries answered so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl LandOracle for ScriptedLand {
    fn is_land(&self, _x: f64, _y: f64) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let mut answers = self.answers.lock().unwrap_or_else(|e| e.into_inner());
        answers.pop_front().unwrap_or(self.fallback)
    }
}

/// Wraps another oracle and counts queries.
pub struct CountingLand<L> {
    inner: L,
    calls: AtomicUsize,
}

impl<L: LandOracle> CountingLand<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<L: LandOracle> LandOracle for CountingLand<L> {
    fn is_land(&self, x: f64, y: f64) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.is_land(x, y)
    }
}
