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

//! A client for the `google.longrunning.Operations` mixin.
//!
//! Services returning long-running operations expose these methods alongside
//! their own. The client shares the transport, and therefore the endpoint,
//! credentials, and interceptors, with the service client that created it.

use crate::transport::Transport;
use crate::wrapper::WrapperCache;
use gax::Result;
use gax::method::{HttpRule, MethodDescriptor, MethodKind};
use gax::options::RequestOptions;
use longrunning::model::{
    CancelOperationRequest, DeleteOperationRequest, GetOperationRequest, ListOperationsRequest,
    ListOperationsResponse, Operation,
};
use std::marker::PhantomData;
use std::sync::Arc;

static GET_OPERATION: MethodDescriptor<GetOperationRequest, Operation> = MethodDescriptor {
    name: "google.longrunning.Operations/GetOperation",
    grpc_path: "/google.longrunning.Operations/GetOperation",
    kind: MethodKind::Unary,
    idempotent: true,
    default_timeout: None,
    default_retry: None,
    routing: |req| vec![("name", req.name.clone())],
    http: HttpRule {
        method: http::Method::GET,
        path: |req| format!("/v1/{}", req.name),
        query: |_| Vec::new(),
        body: None,
    },
    marker: PhantomData,
};

static CANCEL_OPERATION: MethodDescriptor<CancelOperationRequest, wkt::Empty> = MethodDescriptor {
    name: "google.longrunning.Operations/CancelOperation",
    grpc_path: "/google.longrunning.Operations/CancelOperation",
    kind: MethodKind::Unary,
    idempotent: false,
    default_timeout: None,
    default_retry: None,
    routing: |req| vec![("name", req.name.clone())],
    http: HttpRule {
        method: http::Method::POST,
        path: |req| format!("/v1/{}:cancel", req.name),
        query: |_| Vec::new(),
        // All the request fields bind to the path, the body is empty.
        body: Some(|_| Ok(serde_json::json!({}))),
    },
    marker: PhantomData,
};

static DELETE_OPERATION: MethodDescriptor<DeleteOperationRequest, wkt::Empty> = MethodDescriptor {
    name: "google.longrunning.Operations/DeleteOperation",
    grpc_path: "/google.longrunning.Operations/DeleteOperation",
    kind: MethodKind::Unary,
    idempotent: true,
    default_timeout: None,
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

static LIST_OPERATIONS: MethodDescriptor<ListOperationsRequest, ListOperationsResponse> =
    MethodDescriptor {
        name: "google.longrunning.Operations/ListOperations",
        grpc_path: "/google.longrunning.Operations/ListOperations",
        kind: MethodKind::Pageable,
        idempotent: true,
        default_timeout: None,
        default_retry: None,
        routing: |req| vec![("name", req.name.clone())],
        http: HttpRule {
            method: http::Method::GET,
            path: |req| format!("/v1/{}/operations", req.name),
            query: |req| {
                let mut query = Vec::new();
                if !req.filter.is_empty() {
                    query.push(("filter", req.filter.clone()));
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

/// Calls the operations methods through a shared transport.
#[derive(Clone, Debug)]
pub struct OperationsClient {
    transport: Transport,
    wrappers: Arc<WrapperCache>,
}

impl OperationsClient {
    /// Creates a client sharing `transport` and the wrapper cache of the
    /// originating service client.
    pub fn new(transport: Transport, wrappers: Arc<WrapperCache>) -> Self {
        Self {
            transport,
            wrappers,
        }
    }

    /// Gets the latest state of a long-running operation.
    pub async fn get_operation(
        &self,
        request: GetOperationRequest,
        options: RequestOptions,
    ) -> Result<Operation> {
        self.wrappers
            .get(&GET_OPERATION)
            .call(&self.transport, request, options)
            .await
    }

    /// Starts asynchronous cancellation of a long-running operation.
    ///
    /// Cancellation is best effort. The operation may still complete, poll
    /// it to learn its final disposition.
    pub async fn cancel_operation(
        &self,
        request: CancelOperationRequest,
        options: RequestOptions,
    ) -> Result<wkt::Empty> {
        self.wrappers
            .get(&CANCEL_OPERATION)
            .call(&self.transport, request, options)
            .await
    }

    /// Deletes a long-running operation.
    ///
    /// This does not cancel the operation, it only indicates the client is
    /// no longer interested in the result.
    pub async fn delete_operation(
        &self,
        request: DeleteOperationRequest,
        options: RequestOptions,
    ) -> Result<wkt::Empty> {
        self.wrappers
            .get(&DELETE_OPERATION)
            .call(&self.transport, request, options)
            .await
    }

    /// Lists operations matching the request filter.
    pub async fn list_operations(
        &self,
        request: ListOperationsRequest,
        options: RequestOptions,
    ) -> Result<ListOperationsResponse> {
        self.wrappers
            .get(&LIST_OPERATIONS)
            .call(&self.transport, request, options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_header::{GAPIC, XGoogApiClient};
    use crate::options::ClientConfig;
    use gax::client_builder::TransportKind;
    use httptest::{Expectation, Server, matchers::*, responders::*};
    use serde_json::json;
    use serial_test::serial;

    type TestResult = anyhow::Result<()>;

    fn test_client(server: &Server) -> OperationsClient {
        let mut config = ClientConfig::default();
        config.cred = Some(auth::credentials::anonymous::Builder::new().build());
        config.endpoint = Some(format!("http://{}", server.addr()));
        config.transport_kind = TransportKind::Json;
        let transport = Transport::new(
            config,
            "aiplatform",
            XGoogApiClient {
                version: "0.1.0",
                library_type: GAPIC,
            },
        )
        .unwrap();
        OperationsClient::new(transport, Arc::new(WrapperCache::new()))
    }

    #[tokio::test]
    #[serial]
    async fn get_operation() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/v1/projects/p/operations/123"),
                request::headers(contains((
                    "x-goog-request-params",
                    "name=projects%2Fp%2Foperations%2F123"
                ))),
            ])
            .respond_with(json_encoded(json!({
                "name": "projects/p/operations/123",
                "done": false,
            }))),
        );
        let client = test_client(&server);
        let request = GetOperationRequest::default().set_name("projects/p/operations/123");
        let operation = client
            .get_operation(request, RequestOptions::default())
            .await?;
        assert_eq!(operation.name, "projects/p/operations/123");
        assert!(!operation.done);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn cancel_operation() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/v1/projects/p/operations/123:cancel",
            ))
            .respond_with(json_encoded(json!({}))),
        );
        let client = test_client(&server);
        let request = CancelOperationRequest::default().set_name("projects/p/operations/123");
        client
            .cancel_operation(request, RequestOptions::default())
            .await?;
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn delete_operation() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "DELETE",
                "/v1/projects/p/operations/123",
            ))
            .respond_with(status_code(200)),
        );
        let client = test_client(&server);
        let request = DeleteOperationRequest::default().set_name("projects/p/operations/123");
        client
            .delete_operation(request, RequestOptions::default())
            .await?;
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn list_operations() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/v1/projects/p/operations"),
                request::query(url_decoded(contains(("pageSize", "5")))),
            ])
            .respond_with(json_encoded(json!({
                "operations": [{"name": "projects/p/operations/1", "done": true}],
                "nextPageToken": "token-1",
            }))),
        );
        let client = test_client(&server);
        let request = ListOperationsRequest::default()
            .set_name("projects/p")
            .set_page_size(5);
        let response = client
            .list_operations(request, RequestOptions::default())
            .await?;
        assert_eq!(response.operations.len(), 1);
        assert_eq!(response.next_page_token, "token-1");
        Ok(())
    }
}
