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

//! The method descriptors for `google.cloud.aiplatform.v1.ModelService`.

use crate::model::{
    DeleteModelRequest, GetModelRequest, ListModelsRequest, ListModelsResponse, Model,
    UploadModelRequest,
};
use gax::method::{HttpRule, MethodDescriptor, MethodKind};
use gax::retry_policy::{Aip194Strict, LimitedAttemptCount};
use longrunning::model::Operation;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

pub(crate) static GET_MODEL: MethodDescriptor<GetModelRequest, Model> = MethodDescriptor {
    name: "google.cloud.aiplatform.v1.ModelService/GetModel",
    grpc_path: "/google.cloud.aiplatform.v1.ModelService/GetModel",
    kind: MethodKind::Unary,
    idempotent: true,
    default_timeout: Some(Duration::from_secs(60)),
    default_retry: Some(|| Arc::new(LimitedAttemptCount::custom(Aip194Strict, 3))),
    routing: |req| vec![("name", req.name.clone())],
    http: HttpRule {
        method: http::Method::GET,
        path: |req| format!("/v1/{}", req.name),
        query: |_| Vec::new(),
        body: None,
    },
    marker: PhantomData,
};

pub(crate) static LIST_MODELS: MethodDescriptor<ListModelsRequest, ListModelsResponse> =
    MethodDescriptor {
        name: "google.cloud.aiplatform.v1.ModelService/ListModels",
        grpc_path: "/google.cloud.aiplatform.v1.ModelService/ListModels",
        kind: MethodKind::Pageable,
        idempotent: true,
        default_timeout: Some(Duration::from_secs(60)),
        default_retry: Some(|| Arc::new(LimitedAttemptCount::custom(Aip194Strict, 3))),
        routing: |req| vec![("parent", req.parent.clone())],
        http: HttpRule {
            method: http::Method::GET,
            path: |req| format!("/v1/{}/models", req.parent),
            query: |req| {
                let mut query = Vec::new();
                if !req.filter.is_empty() {
                    query.push(("filter", req.filter.clone()));
                }
                if !req.order_by.is_empty() {
                    query.push(("orderBy", req.order_by.clone()));
                }
                if req.page_size != 0 {
                    query.push(("pageSize", req.page_size.to_string()));
                }
                if !req.page_token.is_empty() {
                    query.push(("pageToken", req.page_token.clone()));
                }
                query
            },
            body: None,
        },
        marker: PhantomData,
    };

pub(crate) static UPLOAD_MODEL: MethodDescriptor<UploadModelRequest, Operation> =
    MethodDescriptor {
        name: "google.cloud.aiplatform.v1.ModelService/UploadModel",
        grpc_path: "/google.cloud.aiplatform.v1.ModelService/UploadModel",
        kind: MethodKind::Lro,
        idempotent: false,
        default_timeout: Some(Duration::from_secs(60)),
        default_retry: None,
        routing: |req| vec![("parent", req.parent.clone())],
        http: HttpRule {
            method: http::Method::POST,
            path: |req| format!("/v1/{}/models:upload", req.parent),
            query: |_| Vec::new(),
            body: Some(|req| {
                let mut body = serde_json::to_value(req)?;
                if let Some(fields) = body.as_object_mut() {
                    // `parent` binds to the path.
                    fields.remove("parent");
                }
                Ok(body)
            }),
        },
        marker: PhantomData,
    };

pub(crate) static DELETE_MODEL: MethodDescriptor<DeleteModelRequest, Operation> =
    MethodDescriptor {
        name: "google.cloud.aiplatform.v1.ModelService/DeleteModel",
        grpc_path: "/google.cloud.aiplatform.v1.ModelService/DeleteModel",
        kind: MethodKind::Lro,
        idempotent: true,
        default_timeout: Some(Duration::from_secs(60)),
        default_retry: None,
        routing: |req| vec![("name", req.name.clone())],
        http: HttpRule {
            method: http::Method::DELETE,
            path: |req| format!("/v1/{}", req.name),
            query: |_| Vec::new(),
            body: None,
        },
        marker: PhantomData,
    };
