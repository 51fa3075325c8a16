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

//! Simplifies the implementation of `PollerImpl`

use super::*;
use gax::polling_error_policy::PollingErrorPolicy;
use gax::retry_result::RetryResult;
use std::sync::Arc;
use std::time::Instant;

pub(crate) fn handle_start<R, M>(
    result: Result<Operation<R, M>>,
) -> (Option<String>, PollingResult<R, M>)
where
    R: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
    M: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
{
    match result {
        Err(e) => (None, PollingResult::Completed(Err(e))),
        Ok(op) => handle_common(op),
    }
}

pub(crate) fn handle_poll<R, M>(
    error_policy: Arc<dyn PollingErrorPolicy>,
    loop_start: Instant,
    attempt_count: u32,
    operation_name: String,
    result: Result<Operation<R, M>>,
) -> (Option<String>, PollingResult<R, M>)
where
    R: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
    M: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
{
    match result {
        Err(e) => {
            let state = error_policy.on_error(loop_start, attempt_count, e);
            handle_polling_error(state, operation_name)
        }
        Ok(op) => {
            let (name, result) = handle_common(op);
            match &result {
                PollingResult::Completed(_) => (name, result),
                PollingResult::InProgress(_) => {
                    match error_policy.on_in_progress(loop_start, attempt_count, &operation_name) {
                        None => (name, result),
                        Some(e) => (None, PollingResult::Completed(Err(e))),
                    }
                }
                PollingResult::PollingError(_) => {
                    unreachable!("handle_common never returns PollingResult::PollingError")
                }
            }
        }
    }
}

fn handle_polling_error<R, M>(
    state: RetryResult,
    operation_name: String,
) -> (Option<String>, PollingResult<R, M>) {
    match state {
        RetryResult::Continue(e) => (Some(operation_name), PollingResult::PollingError(e)),
        RetryResult::Exhausted(e) | RetryResult::Permanent(e) => {
            (None, PollingResult::Completed(Err(e)))
        }
    }
}

fn handle_common<R, M>(op: Operation<R, M>) -> (Option<String>, PollingResult<R, M>)
where
    R: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
    M: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
{
    if op.done() {
        let result = as_result(op);
        return (None, PollingResult::Completed(result));
    }
    let name = op.name();
    let metadata = as_metadata(op);
    (Some(name), PollingResult::InProgress(metadata))
}

fn as_result<R, M>(op: Operation<R, M>) -> Result<R>
where
    R: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
{
    // The result must set either the response *or* the error. Setting neither
    // is a deserialization error, as the incoming data does not satisfy the
    // invariants required by the receiving type.
    match (op.response(), op.error()) {
        (Some(any), None) => any.to_msg::<R>().map_err(Error::deser),
        (None, Some(e)) => Err(Error::service(e.clone())),
        (None, None) => Err(Error::deser("neither result nor error set in LRO result")),
        (Some(_), Some(_)) => unreachable!("result and error held in a oneof"),
    }
}

fn as_metadata<R, M>(op: Operation<R, M>) -> Option<M>
where
    M: wkt::message::Message + prost::Message + Default + serde::de::DeserializeOwned,
{
    op.metadata().and_then(|a| a.to_msg::<M>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeMetadata, FakeResponse};
    use gax::polling_error_policy::*;
    use std::error::Error as _;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;
    type TestOperation = Operation<FakeResponse, FakeMetadata>;

    fn metadata(percent_complete: i32) -> wkt::Any {
        wkt::Any::from_prost(&FakeMetadata { percent_complete })
    }

    fn response(name: &str) -> wkt::Any {
        wkt::Any::from_prost(&FakeResponse { name: name.into() })
    }

    #[test]
    fn typed_operation_with_metadata() {
        let op = longrunning::model::Operation::default()
            .set_name("test-only-name")
            .set_metadata(metadata(25));
        let op = TestOperation::new(op);
        assert_eq!(op.name(), "test-only-name");
        assert!(!op.done());
        assert!(op.metadata().is_some());
        assert!(op.response().is_none());
        assert!(op.error().is_none());
        let got = op
            .metadata()
            .unwrap()
            .to_msg::<FakeMetadata>()
            .expect("payload matches the metadata type");
        assert_eq!(got.percent_complete, 25);
    }

    #[test]
    fn typed_operation_with_response() {
        let op = longrunning::model::Operation::default()
            .set_name("test-only-name")
            .set_result(longrunning::model::operation::Result::Response(response(
                "projects/p/models/m",
            )));
        let op = TestOperation::new(op);
        assert_eq!(op.name(), "test-only-name");
        assert!(!op.done());
        assert!(op.metadata().is_none());
        assert!(op.response().is_some());
        assert!(op.error().is_none());
        let got = op
            .response()
            .unwrap()
            .to_msg::<FakeResponse>()
            .expect("payload matches the response type");
        assert_eq!(got.name, "projects/p/models/m");
    }

    #[test]
    fn typed_operation_with_error() {
        let status = rpc::Status::default().set_message("test only").set_code(16);
        let op = longrunning::model::Operation::default()
            .set_name("test-only-name")
            .set_result(longrunning::model::operation::Result::Error(status.clone()));
        let op = TestOperation::new(op);
        assert_eq!(op.name(), "test-only-name");
        assert!(!op.done());
        assert!(op.metadata().is_none());
        assert!(op.response().is_none());
        assert_eq!(op.error(), Some(&status));
    }

    #[test]
    fn start_success() {
        let op = longrunning::model::Operation::default()
            .set_name("test-only-name")
            .set_metadata(metadata(25));
        let op = TestOperation::new(op);
        let (name, poll) = handle_start(Ok::<TestOperation, Error>(op));
        assert_eq!(name.as_deref(), Some("test-only-name"));
        match poll {
            PollingResult::InProgress(m) => {
                assert_eq!(
                    m,
                    Some(FakeMetadata {
                        percent_complete: 25
                    })
                );
            }
            _ => panic!("{poll:?}"),
        };
    }

    #[test]
    fn start_error() {
        fn starting_error() -> Error {
            Error::service(
                rpc::Status::default()
                    .set_code(rpc::Code::AlreadyExists)
                    .set_message("model already there"),
            )
        }
        let (name, poll) = handle_start(Err::<TestOperation, Error>(starting_error()));
        assert_eq!(name, None);
        match poll {
            PollingResult::Completed(Err(e)) => {
                assert!(e.status().is_some(), "{e:?}");
                assert_eq!(e.status(), starting_error().status());
            }
            _ => panic!("{poll:?}"),
        };
    }

    #[test]
    fn poll_success() {
        let op = longrunning::model::Operation::default()
            .set_name("test-only-name")
            .set_metadata(metadata(50));
        let op = TestOperation::new(op);
        let (name, poll) = handle_poll(
            Arc::new(AlwaysContinue),
            Instant::now(),
            1,
            "test-123".to_string(),
            Ok::<TestOperation, Error>(op),
        );
        assert_eq!(name.as_deref(), Some("test-only-name"));
        match poll {
            PollingResult::InProgress(m) => {
                assert_eq!(
                    m,
                    Some(FakeMetadata {
                        percent_complete: 50
                    })
                );
            }
            _ => panic!("{poll:?}"),
        };
    }

    #[test]
    fn poll_success_exhausted() {
        let op = longrunning::model::Operation::default()
            .set_name("test-only-name")
            .set_metadata(metadata(50));
        let op = TestOperation::new(op);
        let (name, poll) = handle_poll(
            Arc::new(AlwaysContinue.with_attempt_limit(3)),
            Instant::now(),
            5,
            String::from("test-123"),
            Ok::<TestOperation, Error>(op),
        );
        assert_eq!(name, None);
        match poll {
            PollingResult::Completed(Err(error)) => {
                assert!(
                    error
                        .source()
                        .and_then(|e| e.downcast_ref::<Exhausted>())
                        .is_some(),
                    "{error:?}"
                );
            }
            _ => panic!("{poll:?}"),
        };
    }

    #[test]
    fn poll_error_continue() {
        let (name, poll) = handle_poll(
            Arc::new(AlwaysContinue),
            Instant::now(),
            1,
            String::from("test-123"),
            Err::<TestOperation, Error>(Error::io("test-only-error")),
        );
        assert_eq!(name.as_deref(), Some("test-123"));
        match poll {
            PollingResult::PollingError(e) => {
                assert!(e.is_io(), "{e:?}");
                assert!(format!("{e}").contains("test-only-error"), "{e}")
            }
            _ => panic!("{poll:?}"),
        };
    }

    #[test]
    fn poll_error_finishes() {
        fn stopping_error() -> Error {
            Error::service(
                rpc::Status::default()
                    .set_code(rpc::Code::Aborted)
                    .set_message("operation-aborted"),
            )
        }
        let (name, poll) = handle_poll(
            Arc::new(Aip194Strict),
            Instant::now(),
            1,
            String::from("test-123"),
            Err::<TestOperation, Error>(stopping_error()),
        );
        assert_eq!(name, None);
        match poll {
            PollingResult::Completed(Err(e)) => {
                assert!(e.status().is_some(), "{e:?}");
                assert_eq!(e.status(), stopping_error().status());
            }
            _ => panic!("{poll:?}"),
        };
    }

    #[test]
    fn common_done() {
        use longrunning::model::operation;
        let op = longrunning::model::Operation::default()
            .set_name("test-only-name")
            .set_done(true)
            .set_metadata(metadata(100))
            .set_result(operation::Result::Response(response("projects/p/models/m")));
        let op = TestOperation::new(op);
        let (name, polling) = handle_common(op);
        assert_eq!(name, None);
        match polling {
            PollingResult::Completed(Ok(response)) => {
                assert_eq!(response.name, "projects/p/models/m");
            }
            _ => panic!("{polling:?}"),
        };
    }

    #[test]
    fn common_not_done() {
        let op = longrunning::model::Operation::default()
            .set_name("test-only-name")
            .set_metadata(metadata(75));
        let op = TestOperation::new(op);
        let (name, polling) = handle_common(op);
        assert_eq!(name.as_deref(), Some("test-only-name"));
        match &polling {
            PollingResult::InProgress(m) => {
                assert_eq!(
                    m,
                    &Some(FakeMetadata {
                        percent_complete: 75
                    })
                );
            }
            _ => panic!("{polling:?}"),
        };
    }

    #[test]
    fn extract_result() -> TestResult {
        use longrunning::model::operation;
        let op = longrunning::model::Operation::default()
            .set_result(operation::Result::Response(response("projects/p/models/m")));
        let op = TestOperation::new(op);
        let result = as_result(op)?;
        assert_eq!(result.name, "projects/p/models/m");
        Ok(())
    }

    #[test]
    fn extract_result_with_error() {
        use longrunning::model::operation;
        let op = longrunning::model::Operation::default().set_result(operation::Result::Error(
            rpc::Status::default()
                .set_code(rpc::Code::FailedPrecondition)
                .set_message("test only"),
        ));
        let op = TestOperation::new(op);
        let err = as_result(op).unwrap_err();
        let want = rpc::Status::default()
            .set_code(rpc::Code::FailedPrecondition)
            .set_message("test only");
        assert_eq!(err.status(), Some(&want));
    }

    #[test]
    fn extract_result_bad_type() {
        use longrunning::model::operation;
        // A payload of the metadata type where the response type is expected.
        let op = longrunning::model::Operation::default()
            .set_result(operation::Result::Response(metadata(100)));
        let op = TestOperation::new(op);
        let err = as_result(op).unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
        assert!(
            matches!(
                err.source().and_then(|e| e.downcast_ref::<wkt::AnyError>()),
                Some(wkt::AnyError::TypeMismatch { .. })
            ),
            "{err:?}",
        );
    }

    #[test]
    fn extract_result_not_set() {
        let op = longrunning::model::Operation::default();
        let op = TestOperation::new(op);
        let err = as_result(op).unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
    }

    #[test]
    fn extract_metadata() {
        let op = longrunning::model::Operation::default().set_metadata(metadata(25));
        let op = TestOperation::new(op);
        let got = as_metadata(op);
        assert_eq!(
            got,
            Some(FakeMetadata {
                percent_complete: 25
            })
        );
    }

    #[test]
    fn extract_metadata_bad_type() {
        let op =
            longrunning::model::Operation::default().set_metadata(response("projects/p/models/m"));
        let op = TestOperation::new(op);
        assert_eq!(as_metadata(op), None);
    }

    #[test]
    fn extract_metadata_not_set() {
        let op = longrunning::model::Operation::default();
        let op = TestOperation::new(op);
        assert_eq!(as_metadata(op), None);
    }
}
