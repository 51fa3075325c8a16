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

//! Static descriptions of service methods.
//!
//! The generated clients describe each RPC with a [MethodDescriptor]. The
//! descriptors are plain data, constructed at compile time, and drive the
//! transport-independent machinery: routing headers, retry defaults, HTTP
//! transcoding, and pagination.

use crate::retry_policy::RetryPolicy;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// The shape of a method, used to select the right call machinery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    /// A single request producing a single response.
    Unary,
    /// A list method following the pagination protocol.
    Pageable,
    /// A method starting a long-running operation.
    Lro,
}

/// How a request maps onto the JSON transport.
///
/// The path and query bindings are functions of the request, matching the
/// `google.api.http` annotations of the method. A request field bound to the
/// path never appears in the query.
pub struct HttpRule<Req> {
    /// The HTTP verb.
    pub method: http::Method,
    /// Expands the path template using the bound request fields.
    pub path: fn(&Req) -> String,
    /// The query parameters, as unencoded name/value pairs.
    pub query: fn(&Req) -> Vec<(&'static str, String)>,
    /// Serializes the request body, if the method has one.
    pub body: Option<fn(&Req) -> serde_json::Result<serde_json::Value>>,
}

impl<Req> std::fmt::Debug for HttpRule<Req> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRule")
            .field("method", &self.method)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// A static record describing one service method.
///
/// The generated clients define one descriptor per RPC:
///
/// ```
/// # use aiplatform_gax::method::*;
/// # use std::time::Duration;
/// #[derive(serde::Serialize)]
/// struct GetThingRequest { name: String }
/// struct Thing;
///
/// static GET_THING: MethodDescriptor<GetThingRequest, Thing> = MethodDescriptor {
///     name: "test.v1.ThingService/GetThing",
///     grpc_path: "/test.v1.ThingService/GetThing",
///     kind: MethodKind::Unary,
///     idempotent: true,
///     default_timeout: Some(Duration::from_secs(60)),
///     default_retry: None,
///     routing: |req| vec![("name", req.name.clone())],
///     http: HttpRule {
///         method: http::Method::GET,
///         path: |req| format!("/v1/{}", req.name),
///         query: |_| Vec::new(),
///         body: None,
///     },
///     marker: std::marker::PhantomData,
/// };
/// ```
pub struct MethodDescriptor<Req, Resp> {
    /// The fully qualified method name, e.g. `package.Service/Method`.
    pub name: &'static str,
    /// The gRPC request path, e.g. `/package.Service/Method`.
    pub grpc_path: &'static str,
    /// The shape of the method.
    pub kind: MethodKind,
    /// If true, the method is safe to retry under transient failures.
    pub idempotent: bool,
    /// The default per-attempt timeout, if any.
    pub default_timeout: Option<Duration>,
    /// Creates the default retry policy for this method, if it has one.
    pub default_retry: Option<fn() -> Arc<dyn RetryPolicy>>,
    /// Extracts the routing parameters, as unencoded name/value pairs.
    ///
    /// Parameters that resolve to the empty string are preserved, the
    /// routing header reports them with empty values.
    pub routing: fn(&Req) -> Vec<(&'static str, String)>,
    /// The JSON transport binding.
    pub http: HttpRule<Req>,
    /// Anchors the response type.
    pub marker: PhantomData<fn() -> Resp>,
}

impl<Req, Resp> MethodDescriptor<Req, Resp> {
    /// Computes the routing parameters for a request.
    pub fn routing_params(&self, req: &Req) -> Vec<(&'static str, String)> {
        (self.routing)(req)
    }

    /// The default retry policy for this method, if any.
    pub fn default_retry_policy(&self) -> Option<Arc<dyn RetryPolicy>> {
        self.default_retry.map(|factory| factory())
    }
}

impl<Req, Resp> std::fmt::Debug for MethodDescriptor<Req, Resp> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("idempotent", &self.idempotent)
            .field("http", &self.http)
            .finish()
    }
}
