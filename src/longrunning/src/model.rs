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

/// The `google.longrunning.Operation` message.
///
/// `done == false` means the job is still running and `result` is absent.
/// Once the service marks the operation done, `result` holds either the
/// typed response payload or the error that terminated the job.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct Operation {
    /// The server-assigned name, unique within the service.
    #[prost(string, tag = "1")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Service-specific progress metadata.
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<wkt::Any>,

    /// If false, the operation is still in progress.
    #[prost(bool, tag = "3")]
    pub done: bool,

    /// The final disposition of the operation.
    #[prost(oneof = "operation::Result", tags = "4, 5")]
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub result: Option<operation::Result>,
}

impl Operation {
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_metadata<T: Into<wkt::Any>>(mut self, v: T) -> Self {
        self.metadata = Some(v.into());
        self
    }

    pub fn set_done<T: Into<bool>>(mut self, v: T) -> Self {
        self.done = v.into();
        self
    }

    pub fn set_result<T: Into<operation::Result>>(mut self, v: T) -> Self {
        self.result = Some(v.into());
        self
    }
}

impl wkt::message::Message for Operation {
    fn typename() -> &'static str {
        "type.googleapis.com/google.longrunning.Operation"
    }
}

pub mod operation {
    /// The result of a terminal operation: a typed response or an error.
    #[derive(Clone, PartialEq, prost::Oneof, serde::Serialize, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub enum Result {
        /// The error that terminated the operation.
        #[prost(message, tag = "4")]
        Error(rpc::Status),
        /// The normal, successful response.
        #[prost(message, tag = "5")]
        Response(wkt::Any),
    }
}

/// The request for the get-operation method.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct GetOperationRequest {
    /// The name of the operation resource.
    #[prost(string, tag = "1")]
    pub name: String,
}

impl GetOperationRequest {
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }
}

impl wkt::message::Message for GetOperationRequest {
    fn typename() -> &'static str {
        "type.googleapis.com/google.longrunning.GetOperationRequest"
    }
}

/// The request for the cancel-operation method.
///
/// Cancellation is best effort; the operation may still complete.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct CancelOperationRequest {
    /// The name of the operation resource to cancel.
    #[prost(string, tag = "1")]
    pub name: String,
}

impl CancelOperationRequest {
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }
}

impl wkt::message::Message for CancelOperationRequest {
    fn typename() -> &'static str {
        "type.googleapis.com/google.longrunning.CancelOperationRequest"
    }
}

/// The request for the delete-operation method.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteOperationRequest {
    /// The name of the operation resource to delete.
    #[prost(string, tag = "1")]
    pub name: String,
}

impl DeleteOperationRequest {
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }
}

impl wkt::message::Message for DeleteOperationRequest {
    fn typename() -> &'static str {
        "type.googleapis.com/google.longrunning.DeleteOperationRequest"
    }
}

/// The request for the list-operations method.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct ListOperationsRequest {
    /// The name of the operation's parent resource.
    #[prost(string, tag = "4")]
    pub name: String,

    /// The standard list filter.
    #[prost(string, tag = "1")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filter: String,

    /// The standard list page size.
    #[prost(int32, tag = "2")]
    pub page_size: i32,

    /// The standard list page token.
    #[prost(string, tag = "3")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub page_token: String,
}

impl ListOperationsRequest {
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_filter<T: Into<String>>(mut self, v: T) -> Self {
        self.filter = v.into();
        self
    }

    pub fn set_page_size<T: Into<i32>>(mut self, v: T) -> Self {
        self.page_size = v.into();
        self
    }

    pub fn set_page_token<T: Into<String>>(mut self, v: T) -> Self {
        self.page_token = v.into();
        self
    }
}

impl wkt::message::Message for ListOperationsRequest {
    fn typename() -> &'static str {
        "type.googleapis.com/google.longrunning.ListOperationsRequest"
    }
}

/// The response for the list-operations method.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct ListOperationsResponse {
    /// The operations matching the request filter.
    #[prost(message, repeated, tag = "1")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,

    /// The token for the next page, empty when the listing is complete.
    #[prost(string, tag = "2")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub next_page_token: String,
}

impl ListOperationsResponse {
    pub fn set_operations<T: Into<Vec<Operation>>>(mut self, v: T) -> Self {
        self.operations = v.into();
        self
    }

    pub fn set_next_page_token<T: Into<String>>(mut self, v: T) -> Self {
        self.next_page_token = v.into();
        self
    }
}

impl wkt::message::Message for ListOperationsResponse {
    fn typename() -> &'static str {
        "type.googleapis.com/google.longrunning.ListOperationsResponse"
    }
}

impl gax::paginator::PageableResponse for ListOperationsResponse {
    type PageItem = Operation;

    fn items(self) -> Vec<Operation> {
        self.operations
    }

    fn next_page_token(&self) -> String {
        self.next_page_token.clone()
    }
}
