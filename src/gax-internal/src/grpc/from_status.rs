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

use gax::error::Error;
use prost::Message;
use rpc::Status;
use std::error::Error as _;

fn to_gax_status(status: &tonic::Status) -> Status {
    // Services attach the full `google.rpc.Status`, including its details, to
    // the `grpc-status-details-bin` trailer. The code and message on the
    // trailer win over the embedded copy.
    let decoded = Status::decode(status.details()).unwrap_or_default();
    decoded
        .set_code(status.code() as i32)
        .set_message(status.message())
}

fn as_inner<T>(status: &tonic::Status) -> Option<&T>
where
    T: std::error::Error + 'static,
{
    let mut e = status.source()?;
    // Bounded to guard against cycles in the source() chain.
    for _ in 0..32 {
        if let Some(value) = e.downcast_ref::<T>() {
            return Some(value);
        }
        e = e.source()?;
    }
    None
}

/// Converts a [tonic::Status] into the error type used by all clients.
pub(crate) fn to_gax_error(status: tonic::Status) -> Error {
    if as_inner::<tonic::TimeoutExpired>(&status).is_some() {
        return Error::timeout(status);
    }
    if as_inner::<tonic::ConnectError>(&status).is_some() {
        return Error::io(status);
    }
    if as_inner::<tonic::transport::Error>(&status).is_some() {
        return Error::io(status);
    }
    let headers = status.metadata().clone().into_headers();
    Error::service_with_http_metadata(to_gax_status(&status), None, Some(headers))
}
