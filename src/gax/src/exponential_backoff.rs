// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Truncated [exponential backoff] with optional jitter.
//!
//! One policy type serves both loops in this crate. Between retry attempts
//! the delay is fully jittered, so concurrent clients spread their retries.
//! Between operation polls the delay is deterministic, polls from a single
//! client do not contend with each other.
//!
//! [exponential backoff]: https://en.wikipedia.org/wiki/Exponential_backoff

use crate::backoff_policy::BackoffPolicy;
use crate::polling_backoff_policy::PollingBackoffPolicy;
use std::time::{Duration, Instant};

/// The bounds enforced by [ExponentialBackoffBuilder::clamp].
const MINIMUM_INITIAL_DELAY: Duration = Duration::from_millis(1);
const MINIMUM_MAXIMUM_DELAY: Duration = Duration::from_secs(1);
const LARGEST_MAXIMUM_DELAY: Duration = Duration::from_secs(24 * 60 * 60);
const SCALING_RANGE: std::ops::RangeInclusive<f64> = 1.0..=32.0;

/// The configuration rejected by [ExponentialBackoffBuilder::build].
#[derive(thiserror::Error, Debug)]
#[error("invalid exponential backoff configuration: {0}")]
pub struct Error(String);

/// Configures [ExponentialBackoff] policies.
///
/// # Example
/// ```
/// # use aiplatform_gax::exponential_backoff::{Error, ExponentialBackoffBuilder};
/// use std::time::Duration;
///
/// let policy = ExponentialBackoffBuilder::new()
///         .with_initial_delay(Duration::from_millis(100))
///         .with_maximum_delay(Duration::from_secs(5))
///         .with_scaling(4.0)
///         .build()?;
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ExponentialBackoffBuilder {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: f64,
}

impl ExponentialBackoffBuilder {
    /// Creates a builder with the default parameters: a one second initial
    /// delay, doubling up to one minute.
    pub fn new() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            maximum_delay: Duration::from_secs(60),
            scaling: 2.0,
        }
    }

    /// The delay before the first retry.
    pub fn with_initial_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.initial_delay = v.into();
        self
    }

    /// The ceiling for the delay between attempts.
    pub fn with_maximum_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.maximum_delay = v.into();
        self
    }

    /// The factor applied to the delay after each attempt.
    pub fn with_scaling<V: Into<f64>>(mut self, v: V) -> Self {
        self.scaling = v.into();
        self
    }

    /// Builds the policy, rejecting configurations where the delay would
    /// stall at zero, shrink, or start above its own ceiling.
    pub fn build(self) -> Result<ExponentialBackoff, Error> {
        if self.initial_delay.is_zero() {
            return Err(Error("the initial delay must be positive".into()));
        }
        if self.maximum_delay < self.initial_delay {
            return Err(Error(format!(
                "the maximum delay ({:?}) must not be below the initial delay ({:?})",
                self.maximum_delay, self.initial_delay
            )));
        }
        // Also rejects NaN.
        if !(self.scaling >= 1.0) {
            return Err(Error(format!(
                "the scaling factor ({}) must be at least 1.0",
                self.scaling
            )));
        }
        Ok(ExponentialBackoff {
            initial_delay: self.initial_delay,
            maximum_delay: self.maximum_delay,
            scaling: self.scaling,
        })
    }

    /// Builds the policy, forcing each parameter into a safe range instead
    /// of failing.
    ///
    /// The maximum delay is limited to one second through one day, the
    /// initial delay to one millisecond through the maximum delay, and the
    /// scaling factor to the `[1.0, 32.0]` range.
    pub fn clamp(self) -> ExponentialBackoff {
        let maximum_delay = self
            .maximum_delay
            .clamp(MINIMUM_MAXIMUM_DELAY, LARGEST_MAXIMUM_DELAY);
        ExponentialBackoff {
            initial_delay: self.initial_delay.clamp(MINIMUM_INITIAL_DELAY, maximum_delay),
            maximum_delay,
            scaling: self
                .scaling
                .clamp(*SCALING_RANGE.start(), *SCALING_RANGE.end()),
        }
    }
}

impl Default for ExponentialBackoffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Implements truncated exponential backoff.
///
/// The full delay for attempt `n` is `initial_delay * scaling^(n - 1)`,
/// capped at the maximum delay.
#[derive(Debug)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: f64,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        ExponentialBackoffBuilder::new().clamp()
    }
}

impl ExponentialBackoff {
    /// The full delay for the given attempt, without jitter.
    fn nth_delay(&self, attempt_count: u32) -> Duration {
        let mut delay = self.initial_delay;
        for _ in 1..attempt_count {
            // The early return keeps `delay * scaling` below the cap, the
            // multiplication cannot overflow.
            if delay >= self.maximum_delay.div_f64(self.scaling) {
                return self.maximum_delay;
            }
            delay = delay.mul_f64(self.scaling);
        }
        delay.min(self.maximum_delay)
    }

    fn jittered(&self, attempt_count: u32, rng: &mut impl rand::Rng) -> Duration {
        rng.random_range(Duration::ZERO..=self.nth_delay(attempt_count))
    }
}

impl BackoffPolicy for ExponentialBackoff {
    fn on_failure(&self, _loop_start: Instant, attempt_count: u32) -> Duration {
        self.jittered(attempt_count, &mut rand::rng())
    }
}

impl PollingBackoffPolicy for ExponentialBackoff {
    fn wait_period(&self, _loop_start: Instant, attempt_count: u32) -> Duration {
        self.nth_delay(attempt_count)
    }
}
