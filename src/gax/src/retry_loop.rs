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

use super::Result;
use super::backoff_policy::BackoffPolicy;
use super::retry_policy::RetryPolicy;
use super::retry_result::RetryResult;
use std::sync::Arc;

/// Runs the retry loop for a given function.
///
/// This function calls an inner function as long as (1) the retry policy has
/// not expired, and (2) the inner function has not returned a successful
/// request.
///
/// In between calls the function waits the amount of time prescribed by the
/// backoff policy, using `sleep` to implement any wait periods.
pub async fn retry_loop<F, FFut, B, BFut, Response>(
    inner: F,
    sleep: B,
    idempotent: bool,
    retry_policy: Arc<dyn RetryPolicy>,
    backoff_policy: Arc<dyn BackoffPolicy>,
) -> Result<Response>
where
    F: Fn(Option<std::time::Duration>) -> FFut + Send,
    FFut: Future<Output = Result<Response>> + Send,
    B: Fn(std::time::Duration) -> BFut + Send,
    BFut: Future<Output = ()> + Send,
{
    let loop_start = std::time::Instant::now();
    let mut attempt_count = 0;
    loop {
        let remaining_time = retry_policy.remaining_time(loop_start, attempt_count);
        attempt_count += 1;
        match inner(remaining_time).await {
            Ok(r) => return Ok(r),
            Err(e) => {
                let flow = retry_policy.on_error(loop_start, attempt_count, idempotent, e);
                let delay = backoff_policy.on_failure(loop_start, attempt_count);
                on_error(&sleep, flow, delay).await?;
            }
        };
    }
}

async fn on_error<B, BFut>(
    sleep: &B,
    retry_flow: RetryResult,
    backoff_delay: std::time::Duration,
) -> Result<()>
where
    B: Fn(std::time::Duration) -> BFut,
    BFut: Future<Output = ()>,
{
    match retry_flow {
        RetryResult::Permanent(e) | RetryResult::Exhausted(e) => Err(e),
        RetryResult::Continue(_e) => Ok(sleep(backoff_delay).await),
    }
}

/// Computes the per-attempt timeout from the remaining time in the loop and
/// the configured attempt timeout, whichever is smaller.
pub fn effective_timeout(
    remaining_time: Option<std::time::Duration>,
    attempt_timeout: Option<std::time::Duration>,
) -> Option<std::time::Duration> {
    match (remaining_time, attempt_timeout) {
        (None, None) => None,
        (Some(t), None) | (None, Some(t)) => Some(t),
        (Some(r), Some(a)) => Some(std::cmp::min(r, a)),
    }
}
