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

//! The transport facade shared by all clients.
//!
//! A [Transport] owns one of the two wire implementations and the state
//! common to both: the credentials, the universe domain validation, the
//! closed flag, the interceptor chain, and the client-wide policies. The
//! two implementations accept the same requests, produce the same responses,
//! and report errors through the same type.

use crate::api_header::{X_GOOG_API_CLIENT, XGoogApiClient};
use crate::endpoint::{EnvSnapshot, ResolveConfig};
use crate::options::ClientConfig;
use crate::universe::UniverseValidator;
use auth::credentials::Credentials;
use gax::Result;
use gax::backoff_policy::BackoffPolicy;
use gax::client_builder::{Error as BuilderError, TransportKind};
use gax::error::Error;
use gax::exponential_backoff::ExponentialBackoff;
use gax::interceptor::InterceptorChain;
use gax::method::MethodDescriptor;
use gax::options::RequestOptions;
use gax::polling_backoff_policy::PollingBackoffPolicy;
use gax::polling_error_policy::{Aip194Strict, PollingErrorPolicy};
use gax::retry_policy::RetryPolicy;
use http::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Clone, Debug)]
enum WireClient {
    Grpc(crate::grpc::Client),
    Http(crate::http::Client),
}

/// The state shared by all method wrappers of a client.
#[derive(Debug)]
struct Inner {
    wire: WireClient,
    credentials: Credentials,
    universe: UniverseValidator,
    closed: AtomicBool,
    api_client_header: HeaderValue,
    interceptors: InterceptorChain,
    retry_policy: Option<Arc<dyn RetryPolicy>>,
    backoff_policy: Option<Arc<dyn BackoffPolicy>>,
    polling_error_policy: Option<Arc<dyn PollingErrorPolicy>>,
    polling_backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
}

/// A cheaply clonable handle to the transport state.
#[derive(Clone, Debug)]
pub struct Transport {
    inner: Arc<Inner>,
}

impl Transport {
    /// Builds a transport from the client configuration.
    ///
    /// `service` is the DNS prefix of the service, e.g. `aiplatform`.
    pub fn new(
        config: ClientConfig,
        service: &str,
        api_client: XGoogApiClient,
    ) -> gax::client_builder::Result<Self> {
        if config.api_key.is_some() && (config.cred.is_some() || config.credentials_file.is_some())
        {
            return Err(BuilderError::validation(
                "an API key cannot be combined with other credentials",
            ));
        }
        let env = EnvSnapshot::from_env();
        let resolve_config = ResolveConfig {
            endpoint: config.endpoint.clone(),
            universe_domain: config.universe_domain.clone(),
            has_client_certificate: config.client_cert_source.is_some(),
        };
        let endpoint = crate::endpoint::resolve(service, &resolve_config, &env)?;
        let certificate = match (&config.client_cert_source, endpoint.is_mtls) {
            (Some(source), true) => {
                Some(source.certificate().map_err(BuilderError::transport)?)
            }
            _ => None,
        };
        let credentials = Self::make_credentials(&config)?;
        let tracing = config.tracing_enabled();
        let api_client_header = match config.transport_kind {
            TransportKind::Binary => api_client.grpc_header_value(),
            TransportKind::Json => api_client.rest_header_value(),
        };
        let api_client_header =
            HeaderValue::from_str(&api_client_header).map_err(BuilderError::transport)?;
        let wire = match config.transport_kind {
            TransportKind::Binary => WireClient::Grpc(crate::grpc::Client::new(
                credentials.clone(),
                &endpoint,
                certificate,
                tracing,
            )?),
            TransportKind::Json => WireClient::Http(crate::http::Client::new(
                credentials.clone(),
                &endpoint,
                certificate,
                tracing,
            )?),
        };
        let inner = Inner {
            wire,
            credentials,
            universe: UniverseValidator::new(endpoint.universe_domain),
            closed: AtomicBool::new(false),
            api_client_header,
            interceptors: config.interceptors.into_iter().collect(),
            retry_policy: config.retry_policy,
            backoff_policy: config.backoff_policy,
            polling_error_policy: config.polling_error_policy,
            polling_backoff_policy: config.polling_backoff_policy,
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    fn make_credentials(config: &ClientConfig) -> gax::client_builder::Result<Credentials> {
        if let Some(credentials) = config.cred.clone() {
            return Ok(credentials);
        }
        if let Some(api_key) = config.api_key.clone() {
            return Ok(auth::credentials::api_key::Builder::new(api_key).build());
        }
        let mut builder = auth::credentials::Builder::new();
        if let Some(file) = config.credentials_file.clone() {
            builder = builder.with_credentials_file(file);
        }
        if !config.scopes.is_empty() {
            builder = builder.with_scopes(config.scopes.clone());
        }
        if let Some(quota_project_id) = config.quota_project_id.clone() {
            builder = builder.with_quota_project_id(quota_project_id);
        }
        if let Some(audience) = config.api_audience.clone() {
            builder = builder.with_audience(audience);
        }
        if !config.always_use_jwt_access {
            builder = builder.with_access_token_flow();
        }
        builder.build().map_err(BuilderError::cred)
    }

    /// Closes the transport.
    ///
    /// Closing is idempotent. Requests started after the first close fail
    /// with a transport-closed error, requests already in flight are
    /// unaffected.
    pub fn close(&self) {
        self.inner.closed.swap(true, Ordering::SeqCst);
    }

    /// Returns true once [close][Self::close] has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Makes a single unary request attempt.
    pub async fn unary<Req, Resp>(
        &self,
        desc: &MethodDescriptor<Req, Resp>,
        request: Req,
        headers: HeaderMap,
        timeout: Option<Duration>,
    ) -> Result<Resp>
    where
        Req: prost::Message + 'static,
        Resp: prost::Message + DeserializeOwned + Default + 'static,
    {
        let headers = self.start_attempt(headers).await?;
        match &self.inner.wire {
            WireClient::Grpc(client) => {
                client.unary(desc.grpc_path, request, headers, timeout).await
            }
            WireClient::Http(client) => {
                let path = (desc.http.path)(&request);
                let query = (desc.http.query)(&request);
                let body = desc
                    .http
                    .body
                    .map(|f| f(&request))
                    .transpose()
                    .map_err(Error::ser)?;
                client
                    .unary(desc.http.method.clone(), path, &query, body, headers, timeout)
                    .await
            }
        }
    }

    /// Checks the preconditions shared by all attempts and returns the
    /// decorated headers.
    async fn start_attempt(&self, mut headers: HeaderMap) -> Result<HeaderMap> {
        if self.is_closed() {
            return Err(Error::transport_closed());
        }
        self.inner
            .universe
            .validate(&self.inner.credentials)
            .await?;
        headers.insert(X_GOOG_API_CLIENT, self.inner.api_client_header.clone());
        Ok(headers)
    }

    /// The interceptors registered with the client.
    pub fn interceptors(&self) -> &InterceptorChain {
        &self.inner.interceptors
    }

    /// The client-wide retry policy, if any.
    pub fn retry_policy(&self) -> Option<Arc<dyn RetryPolicy>> {
        self.inner.retry_policy.clone()
    }

    /// The effective backoff policy for a request.
    pub fn backoff_policy(&self, options: &RequestOptions) -> Arc<dyn BackoffPolicy> {
        options
            .backoff_policy()
            .clone()
            .or_else(|| self.inner.backoff_policy.clone())
            .unwrap_or_else(|| Arc::new(ExponentialBackoff::default()))
    }

    /// The effective polling error policy for a request.
    pub fn polling_error_policy(&self, options: &RequestOptions) -> Arc<dyn PollingErrorPolicy> {
        options
            .polling_error_policy()
            .clone()
            .or_else(|| self.inner.polling_error_policy.clone())
            .unwrap_or_else(|| Arc::new(Aip194Strict))
    }

    /// The effective polling backoff policy for a request.
    pub fn polling_backoff_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn PollingBackoffPolicy> {
        options
            .polling_backoff_policy()
            .clone()
            .or_else(|| self.inner.polling_backoff_policy.clone())
            .unwrap_or_else(|| Arc::new(ExponentialBackoff::default()))
    }
}
