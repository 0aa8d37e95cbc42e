//! Monotonic latency measurement with carry correction.

use std::sync::OnceLock;
use std::time::Instant;

use serde::{Deserialize, Serialize};

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Process-wide monotonic anchor; samples are offsets from first use.
static ANCHOR: OnceLock<Instant> = OnceLock::new();

/// One reading of the monotonic clock, split into whole seconds and the
/// sub-second nanosecond remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonotonicSample {
    pub seconds: i64,
    pub nanos: i64,
}

/// Take a monotonic sample. Never goes backwards.
pub fn monotonic_sample() -> MonotonicSample {
    let elapsed = ANCHOR.get_or_init(Instant::now).elapsed();
    MonotonicSample {
        seconds: elapsed.as_secs() as i64,
        nanos: i64::from(elapsed.subsec_nanos()),
    }
}

/// Elapsed duration between two samples.
///
/// Invariant after normalization: `nanos ∈ [0, 1e9)` for any pair taken in
/// order from the monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Latency {
    pub seconds: i64,
    pub nanos: i64,
}

impl Latency {
    /// Componentwise difference of two samples, carry-corrected.
    pub fn between(start: MonotonicSample, end: MonotonicSample) -> Self {
        Self {
            seconds: end.seconds - start.seconds,
            nanos: end.nanos - start.nanos,
        }
        .normalized()
    }

    /// Borrow one second when the components disagree in sign, without ever
    /// turning a positive total negative (or vice versa).
    pub fn normalized(mut self) -> Self {
        if self.seconds > 0 && self.nanos < 0 {
            self.seconds -= 1;
            self.nanos += NANOS_PER_SEC;
        } else if self.seconds < 0 && self.nanos > 0 {
            self.seconds += 1;
            self.nanos -= NANOS_PER_SEC;
        }
        self
    }

    /// Total elapsed nanoseconds; unaffected by normalization.
    pub fn total_nanos(self) -> i128 {
        i128::from(self.seconds) * i128::from(NANOS_PER_SEC) + i128::from(self.nanos)
    }

    /// Milliseconds as a float, for line rendering.
    pub fn as_millis_f64(self) -> f64 {
        self.seconds as f64 * 1e3 + self.nanos as f64 / 1e6
    }
}
