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

//! Error handling for the operation polling loop.
//!
//! Polling a long-running operation can fail in two distinct ways. The poll
//! request itself may fail, or the poll may succeed and report an operation
//! that is not done yet. The types in this module decide whether a failed
//! poll is worth repeating, and bound how long a loop may keep polling an
//! operation that remains in progress.
//!
//! # Example
//! ```
//! # use aiplatform_gax::polling_error_policy::*;
//! use std::time::Duration;
//! // Stop polling after 15 minutes or 50 attempts, whichever comes first.
//! let policy = Aip194Strict
//!     .with_time_limit(Duration::from_secs(15 * 60))
//!     .with_attempt_limit(50);
//! ```

use crate::error::Error;
use crate::retry_result::RetryResult;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Decides whether the polling loop keeps going.
pub trait PollingErrorPolicy: Send + Sync + std::fmt::Debug {
    /// Classifies the error from a failed poll.
    ///
    /// `loop_start` is when the polling loop began. `attempt_count` includes
    /// the attempt that started the operation, it is never zero here.
    fn on_error(&self, loop_start: Instant, attempt_count: u32, error: Error) -> RetryResult;

    /// Runs after a successful poll found the operation still in progress.
    ///
    /// Returning an error stops the loop and reports the operation as
    /// unfinished to the application.
    fn on_in_progress(
        &self,
        _loop_start: Instant,
        _attempt_count: u32,
        _operation_name: &str,
    ) -> Option<Error> {
        None
    }
}

/// A helper type to use [PollingErrorPolicy] in client and request options.
#[derive(Clone)]
pub struct PollingErrorPolicyArg(pub(crate) Arc<dyn PollingErrorPolicy>);

impl<T: PollingErrorPolicy + 'static> From<T> for PollingErrorPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl From<Arc<dyn PollingErrorPolicy>> for PollingErrorPolicyArg {
    fn from(value: Arc<dyn PollingErrorPolicy>) -> Self {
        Self(value)
    }
}

/// Adds the limit decorators to any [PollingErrorPolicy].
pub trait PollingErrorPolicyExt: PollingErrorPolicy + Sized {
    /// Stops the polling loop once it has run for `limit`.
    fn with_time_limit(self, limit: Duration) -> LimitedElapsedTime<Self> {
        LimitedElapsedTime::custom(self, limit)
    }

    /// Stops the polling loop after `limit` attempts.
    ///
    /// The count includes the attempt that started the operation, so a limit
    /// of zero or one stops the loop before the first poll.
    fn with_attempt_limit(self, limit: u32) -> LimitedAttemptCount<Self> {
        LimitedAttemptCount::custom(self, limit)
    }
}

impl<T: PollingErrorPolicy> PollingErrorPolicyExt for T {}

/// Repeats polls only when [AIP-194] requires it.
///
/// The policy treats interrupted connections, authentication hiccups, and
/// `UNAVAILABLE` responses as resolvable. Everything else stops the loop.
/// Always decorate this policy with a time or attempt limit.
///
/// [AIP-194]: https://google.aip.dev/194
#[derive(Clone, Debug)]
pub struct Aip194Strict;

impl Aip194Strict {
    fn may_resolve(error: &Error) -> bool {
        if error.is_transient_and_before_rpc() || error.is_io() {
            return true;
        }
        error
            .status()
            .is_some_and(|status| status.canonical_code() == rpc::Code::Unavailable)
    }
}

impl PollingErrorPolicy for Aip194Strict {
    fn on_error(&self, _loop_start: Instant, _attempt_count: u32, error: Error) -> RetryResult {
        if Self::may_resolve(&error) {
            RetryResult::Continue(error)
        } else {
            RetryResult::Permanent(error)
        }
    }
}

/// Keeps polling through any error.
///
/// Useful because an operation keeps running on the service even when polls
/// for it fail. Always decorate this policy with a time or attempt limit.
#[derive(Clone, Debug)]
pub struct AlwaysContinue;

impl PollingErrorPolicy for AlwaysContinue {
    fn on_error(&self, _loop_start: Instant, _attempt_count: u32, error: Error) -> RetryResult {
        RetryResult::Continue(error)
    }
}

/// Downgrades a `Continue` decision once the decorator's limit is reached.
///
/// `Permanent` and `Exhausted` decisions from the inner policy pass through
/// untouched.
fn cap_continue(inner: RetryResult, over_limit: bool) -> RetryResult {
    match inner {
        RetryResult::Continue(e) if over_limit => RetryResult::Exhausted(e),
        other => other,
    }
}

/// Bounds the total time spent in the polling loop.
///
/// The inner policy (by default [Aip194Strict]) is consulted first, both for
/// errors and for in-progress polls. Once the limit elapses, the decorator
/// converts `Continue` decisions to `Exhausted` and stops loops whose
/// operation has not finished.
#[derive(Debug)]
pub struct LimitedElapsedTime<P = Aip194Strict>
where
    P: PollingErrorPolicy,
{
    inner: P,
    limit: Duration,
}

impl LimitedElapsedTime {
    /// Creates a new instance, with the default inner policy.
    pub fn new(limit: Duration) -> Self {
        Self::custom(Aip194Strict, limit)
    }
}

impl<P> LimitedElapsedTime<P>
where
    P: PollingErrorPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, limit: Duration) -> Self {
        Self { inner, limit }
    }

    fn expired(&self, loop_start: Instant) -> bool {
        Instant::now() >= loop_start + self.limit
    }
}

impl<P> PollingErrorPolicy for LimitedElapsedTime<P>
where
    P: PollingErrorPolicy + 'static,
{
    fn on_error(&self, loop_start: Instant, attempt_count: u32, error: Error) -> RetryResult {
        let inner = self.inner.on_error(loop_start, attempt_count, error);
        cap_continue(inner, self.expired(loop_start))
    }

    fn on_in_progress(
        &self,
        loop_start: Instant,
        attempt_count: u32,
        operation_name: &str,
    ) -> Option<Error> {
        if let Some(e) = self
            .inner
            .on_in_progress(loop_start, attempt_count, operation_name)
        {
            return Some(e);
        }
        self.expired(loop_start).then(|| {
            Error::exhausted(Exhausted::ElapsedTime {
                operation_name: operation_name.to_string(),
                spent: Instant::now().saturating_duration_since(loop_start),
                limit: self.limit,
            })
        })
    }
}

/// Bounds the number of attempts in the polling loop.
///
/// The inner policy (by default [Aip194Strict]) is consulted first, both for
/// errors and for in-progress polls. Once `attempt_count` reaches the limit,
/// the decorator converts `Continue` decisions to `Exhausted` and stops
/// loops whose operation has not finished.
#[derive(Debug)]
pub struct LimitedAttemptCount<P = Aip194Strict>
where
    P: PollingErrorPolicy,
{
    inner: P,
    limit: u32,
}

impl LimitedAttemptCount {
    /// Creates a new instance, with the default inner policy.
    pub fn new(limit: u32) -> Self {
        Self::custom(Aip194Strict, limit)
    }
}

impl<P> LimitedAttemptCount<P>
where
    P: PollingErrorPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, limit: u32) -> Self {
        Self { inner, limit }
    }
}

impl<P> PollingErrorPolicy for LimitedAttemptCount<P>
where
    P: PollingErrorPolicy,
{
    fn on_error(&self, loop_start: Instant, attempt_count: u32, error: Error) -> RetryResult {
        let inner = self.inner.on_error(loop_start, attempt_count, error);
        cap_continue(inner, attempt_count >= self.limit)
    }

    fn on_in_progress(
        &self,
        loop_start: Instant,
        attempt_count: u32,
        operation_name: &str,
    ) -> Option<Error> {
        if let Some(e) = self
            .inner
            .on_in_progress(loop_start, attempt_count, operation_name)
        {
            return Some(e);
        }
        (attempt_count >= self.limit).then(|| {
            Error::exhausted(Exhausted::AttemptCount {
                operation_name: operation_name.to_string(),
                count: attempt_count,
                limit: self.limit,
            })
        })
    }
}

/// The error produced when a limit decorator stops an unfinished operation.
///
/// The operation may still complete on the service. Applications can resume
/// polling it by name.
#[derive(Debug)]
pub enum Exhausted {
    /// The loop reached its attempt limit.
    AttemptCount {
        operation_name: String,
        count: u32,
        limit: u32,
    },
    /// The loop reached its elapsed time limit.
    ElapsedTime {
        operation_name: String,
        spent: Duration,
        limit: Duration,
    },
}

impl std::fmt::Display for Exhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exhausted::AttemptCount {
                operation_name,
                count,
                limit,
            } => write!(
                f,
                "stopped polling {operation_name} after {count} attempts, the limit is {limit}"
            ),
            Exhausted::ElapsedTime {
                operation_name,
                spent,
                limit,
            } => write!(
                f,
                "stopped polling {operation_name} after {spent:?}, the limit is {limit:?}"
            ),
        }
    }
}

impl std::error::Error for Exhausted {}
