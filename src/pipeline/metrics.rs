//! Per-stage timings.
//!
//! Collected on every run; cheap enough (a few `Instant::now` calls) that the
//! plain and verbose paths share one implementation.

use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageTimings {
    pub normalize: Duration,
    pub amount: Duration,
    pub tokenize: Duration,
    pub matching: Duration,
    pub describe: Duration,
    /// Wall time of the whole classification.
    pub total: Duration,
}

/// Run `f` and return its output with the elapsed time.
pub(crate) fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}
