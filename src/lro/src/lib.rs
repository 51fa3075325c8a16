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

//! Types and functions to make long-running operations easier to use.
//!
//! Some methods return a [longrunning::model::Operation]: the service accepts
//! the request and completes the work in the background. The client libraries
//! wrap such methods in a [Poller], which tracks the operation name, converts
//! the `Any` payloads to their typed response and metadata messages, and
//! drives the polling loop.

use gax::Result;
use gax::error::Error;
use gax::polling_backoff_policy::PollingBackoffPolicy;
use gax::polling_error_policy::PollingErrorPolicy;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The result of polling a Long-Running Operation (LRO).
///
/// # Parameters
/// * `R` - the response type. This is the type returned when the LRO completes
///   successfully.
/// * `M` - the metadata type. While operations are in progress the LRO may
///   return values of this type.
#[derive(Debug)]
pub enum PollingResult<R, M> {
    /// The operation is still in progress.
    InProgress(Option<M>),
    /// The operation completed. This includes the result.
    Completed(Result<R>),
    /// An error trying to poll the LRO.
    ///
    /// Not all errors indicate that the operation failed. For example, polling
    /// may fail because it was not possible to connect to the service. Such
    /// transient errors may disappear in the next polling attempt.
    ///
    /// Other errors will never recover. For example, an error with a
    /// [NotFound][rpc::Code::NotFound], [Aborted][rpc::Code::Aborted], or
    /// [PermissionDenied][rpc::Code::PermissionDenied] status will never
    /// recover. The polling error policy decides which errors stop the loop.
    PollingError(Error),
}

/// A wrapper around [longrunning::model::Operation] with typed responses.
///
/// This is intended as an implementation detail of the generated clients.
/// Applications should have no need to create or use this struct.
#[doc(hidden)]
pub struct Operation<R, M> {
    inner: longrunning::model::Operation,
    response: PhantomData<R>,
    metadata: PhantomData<M>,
}

impl<R, M> Operation<R, M> {
    pub fn new(inner: longrunning::model::Operation) -> Self {
        Self {
            inner,
            response: PhantomData,
            metadata: PhantomData,
        }
    }

    fn name(&self) -> String {
        self.inner.name.clone()
    }
    fn done(&self) -> bool {
        self.inner.done
    }
    fn metadata(&self) -> Option<&wkt::Any> {
        self.inner.metadata.as_ref()
    }
    fn response(&self) -> Option<&wkt::Any> {
        use longrunning::model::operation::Result;
        self.inner.result.as_ref().and_then(|r| match r {
            Result::Error(_) => None,
            Result::Response(r) => Some(r),
        })
    }
    fn error(&self) -> Option<&rpc::Status> {
        use longrunning::model::operation::Result;
        self.inner.result.as_ref().and_then(|r| match r {
            Result::Error(status) => Some(status),
            Result::Response(_) => None,
        })
    }
}

/// The trait implemented by LRO helpers.
///
/// # Parameters
/// * `R` - the response type, that is, the type of response included when the
///   long-running operation completes successfully.
/// * `M` - the metadata type, that is, the type returned by the service when
///   the long-running operation is still in progress.
pub trait Poller<R, M>: Send {
    /// Query the current status of the long-running operation.
    fn poll(&mut self) -> impl Future<Output = Option<PollingResult<R, M>>> + Send;

    /// Poll the long-running operation until it completes.
    ///
    /// Sleeps between polling attempts as prescribed by the polling backoff
    /// policy. If `timeout` is set and expires before the operation reaches
    /// its final state, this returns a [timeout][Error::is_timeout] error.
    /// The operation is not cancelled, it keeps running on the service and
    /// can be queried again through the operations methods.
    fn until_done(self, timeout: Option<Duration>) -> impl Future<Output = Result<R>> + Send;

    /// Request the service to cancel the long-running operation.
    ///
    /// Cancellation is best effort. The operation may still complete, keep
    /// polling to learn its final disposition.
    fn cancel(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Convert the poller to a [futures::Stream] of polling results.
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<R, M>> + Send;
}

/// Creates a new `impl Poller<R, M>` from the closures created by the
/// generated clients.
///
/// This is intended as an implementation detail of the generated clients.
/// Applications should have no need to create or use this function.
#[doc(hidden)]
pub fn new_poller<ResponseType, MetadataType, S, SF, Q, QF, C, CF>(
    polling_error_policy: Arc<dyn PollingErrorPolicy>,
    polling_backoff_policy: Arc<dyn PollingBackoffPolicy>,
    start: S,
    query: Q,
    cancel: C,
) -> impl Poller<ResponseType, MetadataType>
where
    ResponseType: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
    MetadataType: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<Operation<ResponseType, MetadataType>>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync + Clone,
    QF: Future<Output = Result<Operation<ResponseType, MetadataType>>> + Send + 'static,
    C: Fn(String) -> CF + Send + Sync + Clone,
    CF: Future<Output = Result<()>> + Send + 'static,
{
    PollerImpl::new(polling_error_policy, polling_backoff_policy, start, query, cancel)
}

/// An implementation of `Poller` based on closures.
///
/// The generated clients provide three closures: one to start the operation,
/// one to query progress, and one to request cancellation. All the request
/// parameters and request options are captured by the closures.
///
/// # Parameters
/// * `ResponseType` - the response type. Typically this is a message
///   representing the final disposition of the long-running operation.
/// * `MetadataType` - the metadata type. The data included with partially
///   completed instances of this long-running operation.
/// * `S` - the start closure. Starts the LRO.
/// * `SF` - the type of future returned by `S`.
/// * `Q` - the query closure. Queries the status of the LRO created by
///   `start`. It receives the name of the operation as its only parameter.
/// * `QF` - the type of future returned by `Q`.
/// * `C` - the cancel closure. Requests server-side cancellation of the LRO.
///   It receives the name of the operation as its only parameter.
/// * `CF` - the type of future returned by `C`.
struct PollerImpl<ResponseType, MetadataType, S, SF, Q, QF, C, CF>
where
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<Operation<ResponseType, MetadataType>>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync + Clone,
    QF: Future<Output = Result<Operation<ResponseType, MetadataType>>> + Send + 'static,
    C: Fn(String) -> CF + Send + Sync + Clone,
    CF: Future<Output = Result<()>> + Send + 'static,
{
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    start: Option<S>,
    query: Q,
    cancel: C,
    operation: Option<String>,
    loop_start: Instant,
    attempt_count: u32,
}

impl<ResponseType, MetadataType, S, SF, Q, QF, C, CF>
    PollerImpl<ResponseType, MetadataType, S, SF, Q, QF, C, CF>
where
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<Operation<ResponseType, MetadataType>>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync + Clone,
    QF: Future<Output = Result<Operation<ResponseType, MetadataType>>> + Send + 'static,
    C: Fn(String) -> CF + Send + Sync + Clone,
    CF: Future<Output = Result<()>> + Send + 'static,
{
    pub fn new(
        error_policy: Arc<dyn PollingErrorPolicy>,
        backoff_policy: Arc<dyn PollingBackoffPolicy>,
        start: S,
        query: Q,
        cancel: C,
    ) -> Self {
        Self {
            error_policy,
            backoff_policy,
            start: Some(start),
            query,
            cancel,
            operation: None,
            loop_start: Instant::now(),
            attempt_count: 0,
        }
    }
}

impl<ResponseType, MetadataType, S, SF, Q, QF, C, CF> Poller<ResponseType, MetadataType>
    for PollerImpl<ResponseType, MetadataType, S, SF, Q, QF, C, CF>
where
    ResponseType: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
    MetadataType: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<Operation<ResponseType, MetadataType>>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync + Clone,
    QF: Future<Output = Result<Operation<ResponseType, MetadataType>>> + Send + 'static,
    C: Fn(String) -> CF + Send + Sync + Clone,
    CF: Future<Output = Result<()>> + Send + 'static,
{
    async fn poll(&mut self) -> Option<PollingResult<ResponseType, MetadataType>> {
        if let Some(start) = self.start.take() {
            let result = start().await;
            let (op, poll) = details::handle_start(result);
            self.operation = op;
            return Some(poll);
        }
        if let Some(name) = self.operation.take() {
            self.attempt_count += 1;
            let query = self.query.clone();
            let result = query(name.clone()).await;
            let (op, poll) = details::handle_poll(
                self.error_policy.clone(),
                self.loop_start,
                self.attempt_count,
                name,
                result,
            );
            self.operation = op;
            return Some(poll);
        }
        None
    }

    async fn until_done(mut self, timeout: Option<Duration>) -> Result<ResponseType> {
        let backoff = self.backoff_policy.clone();
        let loop_start = self.loop_start;
        let run = async move {
            let mut sleep_count = 0_u32;
            loop {
                match self.poll().await {
                    None => {
                        return Err(Error::other(
                            "the operation already reached its final state",
                        ));
                    }
                    Some(PollingResult::Completed(result)) => return result,
                    Some(PollingResult::InProgress(_)) | Some(PollingResult::PollingError(_)) => {
                        sleep_count += 1;
                        tokio::time::sleep(backoff.wait_period(loop_start, sleep_count)).await;
                    }
                }
            }
        };
        match timeout {
            None => run.await,
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result,
                // The operation is not abandoned. It keeps running on the
                // service and remains queryable by name.
                Err(_) => Err(Error::timeout(format!(
                    "operation did not complete within {limit:?}"
                ))),
            },
        }
    }

    async fn cancel(&mut self) -> Result<()> {
        let Some(name) = self.operation.clone() else {
            return Err(Error::other("no operation in progress to cancel"));
        };
        let cancel = self.cancel.clone();
        cancel(name).await
    }

    fn into_stream(
        self,
    ) -> impl futures::Stream<Item = PollingResult<ResponseType, MetadataType>> + Send {
        use futures::stream::unfold;
        unfold(Some(self), move |state| async move {
            if let Some(mut poller) = state {
                if let Some(pr) = poller.poll().await {
                    return Some((pr, Some(poller)));
                }
            };
            None
        })
    }
}

mod details;


#[cfg(test)]
mod tests {
    use super::testing::{FakeMetadata, FakeResponse};
    use super::*;
    use gax::polling_error_policy::{Aip194Strict, AlwaysContinue, PollingErrorPolicyExt};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type TestOperation = Operation<FakeResponse, FakeMetadata>;

    #[derive(Debug)]
    struct ConstantBackoff;
    impl PollingBackoffPolicy for ConstantBackoff {
        fn wait_period(&self, _loop_start: Instant, _attempt_count: u32) -> Duration {
            Duration::from_secs(1)
        }
    }

    fn in_progress(name: &str, percent_complete: i32) -> TestOperation {
        let op = longrunning::model::Operation::default()
            .set_name(name)
            .set_metadata(wkt::Any::from_prost(&FakeMetadata { percent_complete }));
        TestOperation::new(op)
    }

    fn done_with_response(name: &str) -> TestOperation {
        let op = longrunning::model::Operation::default()
            .set_done(true)
            .set_result(longrunning::model::operation::Result::Response(
                wkt::Any::from_prost(&FakeResponse { name: name.into() }),
            ));
        TestOperation::new(op)
    }

    fn done_with_error(code: rpc::Code, message: &str) -> TestOperation {
        let op = longrunning::model::Operation::default()
            .set_done(true)
            .set_result(longrunning::model::operation::Result::Error(
                rpc::Status::default().set_code(code).set_message(message),
            ));
        TestOperation::new(op)
    }

    fn test_poller<S, SF, Q, QF>(
        start: S,
        query: Q,
    ) -> impl Poller<FakeResponse, FakeMetadata>
    where
        S: FnOnce() -> SF + Send + Sync,
        SF: Future<Output = Result<TestOperation>> + Send + 'static,
        Q: Fn(String) -> QF + Send + Sync + Clone,
        QF: Future<Output = Result<TestOperation>> + Send + 'static,
    {
        new_poller(
            Arc::new(Aip194Strict),
            Arc::new(ConstantBackoff),
            start,
            query,
            |_: String| async move { Ok(()) },
        )
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn poll_basic_flow() {
        let start = || async move { Ok(in_progress("test-op-name", 25)) };
        let query = |name: String| async move {
            assert_eq!(name, "test-op-name");
            Ok(done_with_response("projects/p/models/m"))
        };
        let mut poller = test_poller(start, query);

        let p0 = poller.poll().await;
        match p0.unwrap() {
            PollingResult::InProgress(m) => {
                assert_eq!(
                    m,
                    Some(FakeMetadata {
                        percent_complete: 25
                    })
                );
            }
            r => panic!("{r:?}"),
        }

        let p1 = poller.poll().await;
        match p1.unwrap() {
            PollingResult::Completed(r) => {
                assert_eq!(r.unwrap().name, "projects/p/models/m");
            }
            r => panic!("{r:?}"),
        }

        let p2 = poller.poll().await;
        assert!(p2.is_none(), "{p2:?}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn poll_basic_stream() {
        use futures::StreamExt;
        let start = || async move { Ok(in_progress("test-op-name", 25)) };
        let query = |_: String| async move { Ok(done_with_response("projects/p/models/m")) };
        let stream = test_poller(start, query).into_stream();
        let mut stream = std::pin::pin!(stream);

        let p0 = stream.next().await;
        match p0.unwrap() {
            PollingResult::InProgress(m) => {
                assert_eq!(
                    m,
                    Some(FakeMetadata {
                        percent_complete: 25
                    })
                );
            }
            r => panic!("{r:?}"),
        }

        let p1 = stream.next().await;
        match p1.unwrap() {
            PollingResult::Completed(r) => {
                assert_eq!(r.unwrap().name, "projects/p/models/m");
            }
            r => panic!("{r:?}"),
        }

        let p2 = stream.next().await;
        assert!(p2.is_none(), "{p2:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_sleeps_between_polls() -> anyhow::Result<()> {
        let polls = Arc::new(AtomicUsize::new(0));
        let start = || async move { Ok(in_progress("test-op-name", 0)) };
        let query = {
            let polls = polls.clone();
            move |_: String| {
                let polls = polls.clone();
                async move {
                    if polls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Ok(in_progress("test-op-name", 50))
                    } else {
                        Ok(done_with_response("projects/p/models/m"))
                    }
                }
            }
        };
        let started = tokio::time::Instant::now();
        let response = test_poller(start, query).until_done(None).await?;
        assert_eq!(response.name, "projects/p/models/m");
        assert_eq!(polls.load(Ordering::SeqCst), 3);
        // One sleep after the start and one after each in-progress poll.
        assert!(started.elapsed() >= Duration::from_secs(3), "{:?}", started.elapsed());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_times_out_without_abandoning() {
        let polls = Arc::new(AtomicUsize::new(0));
        let start = || async move { Ok(in_progress("test-op-name", 0)) };
        let query = {
            let polls = polls.clone();
            move |_: String| {
                let polls = polls.clone();
                async move {
                    polls.fetch_add(1, Ordering::SeqCst);
                    Ok(in_progress("test-op-name", 50))
                }
            }
        };
        let err = test_poller(start, query)
            .until_done(Some(Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "{err:?}");
        // The loop was polling when the timeout hit, it never cancelled.
        assert!(polls.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_reports_operation_error() {
        let start = || async move { Ok(in_progress("test-op-name", 0)) };
        let query =
            |_: String| async move { Ok(done_with_error(rpc::Code::FailedPrecondition, "boom")) };
        let err = test_poller(start, query).until_done(None).await.unwrap_err();
        let status = err.status().expect("operation errors carry a status");
        assert_eq!(status.canonical_code(), rpc::Code::FailedPrecondition);
        assert_eq!(status.message, "boom");
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_recovers_from_transient_poll_errors() -> anyhow::Result<()> {
        let polls = Arc::new(AtomicUsize::new(0));
        let start = || async move { Ok(in_progress("test-op-name", 0)) };
        let query = {
            let polls = polls.clone();
            move |_: String| {
                let polls = polls.clone();
                async move {
                    if polls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(Error::io("connection reset"))
                    } else {
                        Ok(done_with_response("projects/p/models/m"))
                    }
                }
            }
        };
        let response = test_poller(start, query).until_done(None).await?;
        assert_eq!(response.name, "projects/p/models/m");
        assert_eq!(polls.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_stops_when_policy_is_exhausted() {
        use std::error::Error as _;
        let start = || async move { Ok(in_progress("test-op-name", 0)) };
        let query = |_: String| async move { Ok(in_progress("test-op-name", 50)) };
        let poller = new_poller(
            Arc::new(AlwaysContinue.with_attempt_limit(2)),
            Arc::new(ConstantBackoff),
            start,
            query,
            |_: String| async move { Ok(()) },
        );
        let err = poller.until_done(None).await.unwrap_err();
        assert!(
            err.source()
                .and_then(|e| e.downcast_ref::<gax::polling_error_policy::Exhausted>())
                .is_some(),
            "{err:?}"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cancel_requests_server_side_cancellation() {
        let cancelled = Arc::new(Mutex::new(Vec::<String>::new()));
        let start = || async move { Ok(in_progress("test-op-name", 0)) };
        let query = |_: String| async move { Ok(done_with_error(rpc::Code::Cancelled, "cancelled")) };
        let cancel = {
            let cancelled = cancelled.clone();
            move |name: String| {
                let cancelled = cancelled.clone();
                async move {
                    cancelled.lock().unwrap().push(name);
                    Ok(())
                }
            }
        };
        let mut poller = new_poller(
            Arc::new(Aip194Strict),
            Arc::new(ConstantBackoff),
            start,
            query,
            cancel,
        );
        let p0 = poller.poll().await;
        assert!(
            matches!(p0, Some(PollingResult::InProgress(_))),
            "{p0:?}"
        );
        poller.cancel().await.unwrap();
        assert_eq!(
            cancelled.lock().unwrap().as_slice(),
            &["test-op-name".to_string()]
        );
        // The poller keeps working, the final disposition is observable.
        let p1 = poller.poll().await;
        match p1.unwrap() {
            PollingResult::Completed(Err(e)) => {
                let status = e.status().expect("operation errors carry a status");
                assert_eq!(status.canonical_code(), rpc::Code::Cancelled);
            }
            r => panic!("{r:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cancel_before_start_fails() {
        let start = || async move { Ok(in_progress("test-op-name", 0)) };
        let query = |_: String| async move { Ok(done_with_response("projects/p/models/m")) };
        let mut poller = test_poller(start, query);
        let err = poller.cancel().await.unwrap_err();
        assert!(format!("{err}").contains("no operation"), "{err:?}");
    }
}
