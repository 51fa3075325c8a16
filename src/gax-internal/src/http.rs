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

//! The protobuf-JSON transport, implemented over HTTP.

use crate::endpoint::Endpoint;
use auth::credentials::Credentials;
use gax::Result;
use gax::client_builder::ClientCertificate;
use gax::error::Error;
use http::HeaderMap;
use rpc::Code;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Sends requests encoded as protobuf-JSON over HTTP.
///
/// A single attempt is one HTTP request, the retry loop lives in the method
/// wrappers.
#[derive(Clone, Debug)]
pub struct Client {
    inner: reqwest::Client,
    origin: String,
    credentials: Credentials,
    tracing: bool,
}

impl Client {
    /// Creates a new client connecting to `endpoint`.
    pub fn new(
        credentials: Credentials,
        endpoint: &Endpoint,
        certificate: Option<ClientCertificate>,
        tracing: bool,
    ) -> gax::client_builder::Result<Self> {
        use gax::client_builder::Error as BuilderError;
        let mut builder = reqwest::Client::builder();
        if let Some(certificate) = certificate {
            let mut pem = certificate.key_pem.clone();
            pem.extend_from_slice(&certificate.cert_pem);
            let identity = reqwest::Identity::from_pem(&pem).map_err(BuilderError::transport)?;
            builder = builder.identity(identity);
        }
        let inner = builder.build().map_err(BuilderError::transport)?;
        Ok(Self {
            inner,
            origin: endpoint.http_origin(),
            credentials,
            tracing,
        })
    }

    /// Makes a single request attempt.
    pub async fn unary<Response>(
        &self,
        method: http::Method,
        path: String,
        query: &[(&'static str, String)],
        body: Option<serde_json::Value>,
        headers: HeaderMap,
        timeout: Option<Duration>,
    ) -> Result<Response>
    where
        Response: DeserializeOwned + Default,
    {
        if self.tracing {
            tracing::info!(%method, path, "sending request");
        }
        let url = format!("{}{}", self.origin, path);
        let mut builder = self.inner.request(method, url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let auth_headers = self
            .credentials
            .headers()
            .await
            .map_err(Error::authentication)?;
        builder = builder.headers(auth_headers);
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder.send().await.map_err(map_send_error)?;
        if !response.status().is_success() {
            return Err(to_http_error(response).await);
        }
        let bytes = response.bytes().await.map_err(Error::io)?;
        // Methods returning `google.protobuf.Empty` produce an empty body.
        if bytes.is_empty() {
            return Ok(Response::default());
        }
        serde_json::from_slice(&bytes).map_err(Error::deser)
    }
}

fn map_send_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        return Error::timeout(error);
    }
    Error::io(error)
}

/// The JSON error envelope returned by the services.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ErrorBody {
    message: String,
    status: String,
    details: Vec<wkt::Any>,
}

async fn to_http_error(response: reqwest::Response) -> Error {
    let status_code = response.status().as_u16();
    let headers = response.headers().clone();
    let bytes = match response.bytes().await {
        Ok(b) => b,
        Err(e) => return Error::io(e),
    };
    let status = match serde_json::from_slice::<ErrorEnvelope>(&bytes) {
        Ok(envelope) if !envelope.error.status.is_empty() => {
            let code = Code::from_name(&envelope.error.status).unwrap_or(Code::Unknown);
            rpc::Status {
                code: code as i32,
                message: envelope.error.message,
                details: envelope.error.details,
            }
        }
        _ => rpc::Status {
            code: http_status_to_code(status_code) as i32,
            message: String::from_utf8_lossy(&bytes).into_owned(),
            details: Vec::new(),
        },
    };
    Error::service_with_http_metadata(status, Some(status_code), Some(headers))
}

/// Maps an HTTP status code to the closest canonical code.
fn http_status_to_code(status: u16) -> Code {
    match status {
        400 => Code::InvalidArgument,
        401 => Code::Unauthenticated,
        403 => Code::PermissionDenied,
        404 => Code::NotFound,
        409 => Code::Aborted,
        416 => Code::OutOfRange,
        429 => Code::ResourceExhausted,
        499 => Code::Cancelled,
        500 => Code::Internal,
        501 => Code::Unimplemented,
        503 => Code::Unavailable,
        504 => Code::DeadlineExceeded,
        _ => Code::Unknown,
    }
}
