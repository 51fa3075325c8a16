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

//! The messages exchanged with the `google.cloud.aiplatform.v1.ModelService`
//! service.

/// A trained machine learning model.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct Model {
    /// The resource name of the model, e.g.
    /// `projects/{project}/locations/{location}/models/{model}`.
    #[prost(string, tag = "1")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The display name of the model, shown in user interfaces.
    #[prost(string, tag = "2")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    /// The description of the model.
    #[prost(string, tag = "3")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// The version of this model, populated by the service.
    #[prost(string, tag = "4")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version_id: String,

    /// The path to the directory containing the model artifact.
    #[prost(string, tag = "5")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub artifact_uri: String,

    /// Used to perform consistent read-modify-write updates.
    #[prost(string, tag = "6")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
}

impl Model {
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_display_name<T: Into<String>>(mut self, v: T) -> Self {
        self.display_name = v.into();
        self
    }

    pub fn set_description<T: Into<String>>(mut self, v: T) -> Self {
        self.description = v.into();
        self
    }

    pub fn set_version_id<T: Into<String>>(mut self, v: T) -> Self {
        self.version_id = v.into();
        self
    }

    pub fn set_artifact_uri<T: Into<String>>(mut self, v: T) -> Self {
        self.artifact_uri = v.into();
        self
    }

    pub fn set_etag<T: Into<String>>(mut self, v: T) -> Self {
        self.etag = v.into();
        self
    }
}

impl wkt::message::Message for Model {
    fn typename() -> &'static str {
        "type.googleapis.com/google.cloud.aiplatform.v1.Model"
    }
}

/// The request for the get-model method.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct GetModelRequest {
    /// The resource name of the model.
    #[prost(string, tag = "1")]
    pub name: String,
}

impl GetModelRequest {
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }
}

impl wkt::message::Message for GetModelRequest {
    fn typename() -> &'static str {
        "type.googleapis.com/google.cloud.aiplatform.v1.GetModelRequest"
    }
}

/// The request for the list-models method.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct ListModelsRequest {
    /// The resource name of the location to list models from, e.g.
    /// `projects/{project}/locations/{location}`.
    #[prost(string, tag = "1")]
    pub parent: String,

    /// The standard list filter.
    #[prost(string, tag = "2")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filter: String,

    /// The standard list page size.
    #[prost(int32, tag = "3")]
    pub page_size: i32,

    /// The standard list page token, from a previous response.
    #[prost(string, tag = "4")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub page_token: String,

    /// A comma-separated list of fields to order by, e.g.
    /// `display_name, create_time desc`.
    #[prost(string, tag = "6")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub order_by: String,
}

impl ListModelsRequest {
    pub fn set_parent<T: Into<String>>(mut self, v: T) -> Self {
        self.parent = v.into();
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

    pub fn set_order_by<T: Into<String>>(mut self, v: T) -> Self {
        self.order_by = v.into();
        self
    }
}

impl wkt::message::Message for ListModelsRequest {
    fn typename() -> &'static str {
        "type.googleapis.com/google.cloud.aiplatform.v1.ListModelsRequest"
    }
}

/// The response for the list-models method.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct ListModelsResponse {
    /// The models matching the request filter.
    #[prost(message, repeated, tag = "1")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<Model>,

    /// The token for the next page, empty when the listing is complete.
    #[prost(string, tag = "2")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub next_page_token: String,
}

impl ListModelsResponse {
    pub fn set_models<T: Into<Vec<Model>>>(mut self, v: T) -> Self {
        self.models = v.into();
        self
    }

    pub fn set_next_page_token<T: Into<String>>(mut self, v: T) -> Self {
        self.next_page_token = v.into();
        self
    }
}

impl wkt::message::Message for ListModelsResponse {
    fn typename() -> &'static str {
        "type.googleapis.com/google.cloud.aiplatform.v1.ListModelsResponse"
    }
}

impl gax::paginator::PageableResponse for ListModelsResponse {
    type PageItem = Model;

    fn items(self) -> Vec<Model> {
        self.models
    }

    fn next_page_token(&self) -> String {
        self.next_page_token.clone()
    }
}

/// The request for the upload-model method.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadModelRequest {
    /// The resource name of the location into which to upload the model.
    #[prost(string, tag = "1")]
    pub parent: String,

    /// The model to upload.
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Model>,

    /// The ID to use for the uploaded model, becoming the final component of
    /// the model resource name. Assigned by the service when empty.
    #[prost(string, tag = "5")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub model_id: String,

    /// The service account the uploaded model runs as.
    #[prost(string, tag = "6")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_account: String,
}

impl UploadModelRequest {
    pub fn set_parent<T: Into<String>>(mut self, v: T) -> Self {
        self.parent = v.into();
        self
    }

    pub fn set_model<T: Into<Model>>(mut self, v: T) -> Self {
        self.model = Some(v.into());
        self
    }

    pub fn set_model_id<T: Into<String>>(mut self, v: T) -> Self {
        self.model_id = v.into();
        self
    }

    pub fn set_service_account<T: Into<String>>(mut self, v: T) -> Self {
        self.service_account = v.into();
        self
    }
}

impl wkt::message::Message for UploadModelRequest {
    fn typename() -> &'static str {
        "type.googleapis.com/google.cloud.aiplatform.v1.UploadModelRequest"
    }
}

/// The response payload of a completed upload-model operation.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadModelResponse {
    /// The name of the uploaded model.
    #[prost(string, tag = "1")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub model: String,

    /// The version ID assigned to the uploaded model.
    #[prost(string, tag = "2")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub model_version_id: String,
}

impl UploadModelResponse {
    pub fn set_model<T: Into<String>>(mut self, v: T) -> Self {
        self.model = v.into();
        self
    }

    pub fn set_model_version_id<T: Into<String>>(mut self, v: T) -> Self {
        self.model_version_id = v.into();
        self
    }
}

impl wkt::message::Message for UploadModelResponse {
    fn typename() -> &'static str {
        "type.googleapis.com/google.cloud.aiplatform.v1.UploadModelResponse"
    }
}

/// Progress metadata shared by the long-running operations of this service.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct GenericOperationMetadata {
    /// Partial failures encountered so far. The operation keeps going
    /// despite these.
    #[prost(message, repeated, tag = "1")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partial_failures: Vec<rpc::Status>,
}

impl GenericOperationMetadata {
    pub fn set_partial_failures<T: Into<Vec<rpc::Status>>>(mut self, v: T) -> Self {
        self.partial_failures = v.into();
        self
    }
}

impl wkt::message::Message for GenericOperationMetadata {
    fn typename() -> &'static str {
        "type.googleapis.com/google.cloud.aiplatform.v1.GenericOperationMetadata"
    }
}

/// The metadata of an in-progress upload-model operation.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadModelOperationMetadata {
    /// The common operation metadata.
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_metadata: Option<GenericOperationMetadata>,
}

impl UploadModelOperationMetadata {
    pub fn set_generic_metadata<T: Into<GenericOperationMetadata>>(mut self, v: T) -> Self {
        self.generic_metadata = Some(v.into());
        self
    }
}

impl wkt::message::Message for UploadModelOperationMetadata {
    fn typename() -> &'static str {
        "type.googleapis.com/google.cloud.aiplatform.v1.UploadModelOperationMetadata"
    }
}

/// The request for the delete-model method.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteModelRequest {
    /// The resource name of the model to delete.
    #[prost(string, tag = "1")]
    pub name: String,
}

impl DeleteModelRequest {
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }
}

impl wkt::message::Message for DeleteModelRequest {
    fn typename() -> &'static str {
        "type.googleapis.com/google.cloud.aiplatform.v1.DeleteModelRequest"
    }
}

/// The metadata of an in-progress delete operation.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteOperationMetadata {
    /// The common operation metadata.
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_metadata: Option<GenericOperationMetadata>,
}

impl DeleteOperationMetadata {
    pub fn set_generic_metadata<T: Into<GenericOperationMetadata>>(mut self, v: T) -> Self {
        self.generic_metadata = Some(v.into());
        self
    }
}

impl wkt::message::Message for DeleteOperationMetadata {
    fn typename() -> &'static str {
        "type.googleapis.com/google.cloud.aiplatform.v1.DeleteOperationMetadata"
    }
}
