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

//! Provides types for client construction.
//!
//! Some applications need to construct clients with custom configuration,
//! for example, they may need to override the endpoint or the authentication
//! credentials. The AI Platform clients use a generic builder type to
//! provide such functionality.
//!
//! Applications should not create builders directly, instead each client
//! type defines a `builder()` function to obtain the correct type of
//! builder.
//!
//! ## Example: create a client with a different endpoint
//!
//! ```
//! # use aiplatform_gax::client_builder::examples;
//! # use aiplatform_gax::client_builder::Result;
//! # tokio_test::block_on(async {
//! pub use examples::Client; // Placeholder for examples
//! let client = Client::builder()
//!     .with_endpoint("https://private.googleapis.com")
//!     .build().await?;
//! # Result::<()>::Ok(()) });
//! ```

use crate::backoff_policy::{BackoffPolicy, BackoffPolicyArg};
use crate::interceptor::Interceptor;
use crate::polling_backoff_policy::{PollingBackoffPolicy, PollingBackoffPolicyArg};
use crate::polling_error_policy::{PollingErrorPolicy, PollingErrorPolicyArg};
use crate::retry_policy::{RetryPolicy, RetryPolicyArg};
use std::sync::Arc;

/// The result type for this module.
pub type Result<T> = std::result::Result<T, Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Indicates a problem while constructing a client.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// If true, the client could not initialize the credentials.
    pub fn is_credentials(&self) -> bool {
        matches!(&self.0, ErrorKind::Credentials(_))
    }

    /// If true, the client could not initialize the transport.
    pub fn is_transport(&self) -> bool {
        matches!(&self.0, ErrorKind::Transport(_))
    }

    /// If true, the client configuration was invalid.
    pub fn is_validation(&self) -> bool {
        matches!(&self.0, ErrorKind::Validation(_))
    }

    /// Not part of the public API, subject to change without notice.
    #[doc(hidden)]
    pub fn cred<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Credentials(source.into()))
    }

    /// Not part of the public API, subject to change without notice.
    #[doc(hidden)]
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Transport(source.into()))
    }

    /// Not part of the public API, subject to change without notice.
    #[doc(hidden)]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self(ErrorKind::Validation(message.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("could not create the credentials")]
    Credentials(#[source] BoxError),
    #[error("could not initialize the transport")]
    Transport(#[source] BoxError),
    #[error("invalid client configuration: {0}")]
    Validation(String),
}

/// Selects the wire format used by a client.
///
/// Both transports expose identical request and response types and identical
/// error semantics. The default is the binary protobuf transport over gRPC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportKind {
    /// Binary protobuf over gRPC.
    #[default]
    Binary,
    /// Protobuf-JSON over HTTP.
    Json,
}

/// A client TLS certificate and its private key, both PEM encoded.
#[derive(Clone)]
pub struct ClientCertificate {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
}

/// A callback producing the client certificate used for mTLS connections.
///
/// The callback runs during client construction. Certificate sources are
/// only honored when client certificates are enabled via the
/// `GOOGLE_API_USE_CLIENT_CERTIFICATE` environment variable.
#[derive(Clone)]
pub struct ClientCertSource(Arc<dyn Fn() -> std::result::Result<ClientCertificate, BoxError> + Send + Sync>);

impl ClientCertSource {
    /// Creates a new certificate source from a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> std::result::Result<ClientCertificate, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the callback.
    pub fn certificate(&self) -> std::result::Result<ClientCertificate, BoxError> {
        (self.0)()
    }
}

impl std::fmt::Debug for ClientCertSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClientCertSource")
    }
}

/// A generic builder for clients.
///
/// Each client library defines one or more client types, all initialized
/// using a `ClientBuilder`. Applications obtain a builder with the correct
/// generic types using the `builder()` method on each client, and then call
/// `.build()` to construct the client:
///
/// ```
/// # use aiplatform_gax::client_builder::examples;
/// # use aiplatform_gax::client_builder::Result;
/// # tokio_test::block_on(async {
/// use examples::Client; // Placeholder for examples
/// let client = Client::builder()
///     .with_endpoint("http://private.googleapis.com")
///     .build().await?;
/// # Result::<()>::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct ClientBuilder<F, Cr> {
    config: internal::ClientConfig<Cr>,
    factory: F,
}

impl<F, Cr> ClientBuilder<F, Cr> {
    /// Creates a new client.
    pub async fn build<C>(self) -> Result<C>
    where
        F: internal::ClientFactory<Client = C, Credentials = Cr>,
    {
        self.factory.build(self.config).await
    }

    /// Sets the endpoint.
    ///
    /// When an explicit endpoint is configured the client uses it verbatim.
    /// Neither the universe domain nor the mTLS environment variables change
    /// an explicitly configured endpoint.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.endpoint = Some(v.into());
        self
    }

    /// Sets the universe domain.
    ///
    /// Most applications use the default universe (`googleapis.com`).
    /// Applications in sovereign clouds or other isolated deployments use
    /// their own universe domain. The service endpoint is derived from the
    /// universe domain, and the credentials must belong to the same
    /// universe.
    pub fn with_universe_domain<V: Into<String>>(mut self, v: V) -> Self {
        self.config.universe_domain = Some(v.into());
        self
    }

    /// Configure the authentication credentials.
    pub fn with_credentials<T: Into<Cr>>(mut self, v: T) -> Self {
        self.config.cred = Some(v.into());
        self
    }

    /// Load the credentials from a service account key file.
    ///
    /// This takes precedence over application default credentials, but an
    /// explicit [with_credentials][Self::with_credentials] call wins over
    /// both.
    pub fn with_credentials_file<V: Into<std::path::PathBuf>>(mut self, v: V) -> Self {
        self.config.credentials_file = Some(v.into());
        self
    }

    /// Configure an API key instead of full credentials.
    pub fn with_api_key<V: Into<String>>(mut self, v: V) -> Self {
        self.config.api_key = Some(v.into());
        self
    }

    /// Sets the OAuth 2.0 scopes requested for the access tokens.
    pub fn with_scopes<I, V>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.config.scopes = iter.into_iter().map(|v| v.into()).collect();
        self
    }

    /// Sets the quota project id sent with each request.
    pub fn with_quota_project_id<V: Into<String>>(mut self, v: V) -> Self {
        self.config.quota_project_id = Some(v.into());
        self
    }

    /// Sets the audience used for self-signed JWT credentials.
    pub fn with_api_audience<V: Into<String>>(mut self, v: V) -> Self {
        self.config.api_audience = Some(v.into());
        self
    }

    /// Controls the token flow for service account credentials.
    ///
    /// By default (`true`) service account credentials authenticate with
    /// [self-signed JWTs], skipping the OAuth token exchange. Set this to
    /// `false` to exchange a JWT assertion for an OAuth access token at the
    /// key's token endpoint instead.
    ///
    /// [self-signed JWTs]: https://google.aip.dev/auth/4111
    pub fn with_always_use_jwt_access(mut self, v: bool) -> Self {
        self.config.always_use_jwt_access = v;
        self
    }

    /// Sets the source for the client TLS certificate used in mTLS.
    ///
    /// The source is only used when client certificates are enabled via the
    /// `GOOGLE_API_USE_CLIENT_CERTIFICATE` environment variable.
    pub fn with_client_cert_source(mut self, v: ClientCertSource) -> Self {
        self.config.client_cert_source = Some(v);
        self
    }

    /// Selects the wire format used by the client.
    pub fn with_transport_kind(mut self, v: TransportKind) -> Self {
        self.config.transport_kind = v;
        self
    }

    /// Registers an interceptor.
    ///
    /// Interceptors run once per logical call, in registration order for the
    /// pre-call hook and reverse order for the post-call hook.
    pub fn with_interceptor<I: Interceptor + 'static>(mut self, v: I) -> Self {
        self.config.interceptors.push(Arc::new(v));
        self
    }

    /// Enables tracing.
    ///
    /// The clients can be dynamically instrumented with the Tokio [tracing]
    /// framework. Setting this flag enables this instrumentation.
    ///
    /// [tracing]: https://docs.rs/tracing/latest/tracing/
    pub fn with_tracing(mut self) -> Self {
        self.config.tracing = true;
        self
    }

    /// Configure the retry policy.
    pub fn with_retry_policy<V: Into<RetryPolicyArg>>(mut self, v: V) -> Self {
        self.config.retry_policy = Some(v.into().0);
        self
    }

    /// Configure the retry backoff policy.
    pub fn with_backoff_policy<V: Into<BackoffPolicyArg>>(mut self, v: V) -> Self {
        self.config.backoff_policy = Some(v.into().0);
        self
    }

    /// Configure the polling error policy.
    pub fn with_polling_error_policy<V: Into<PollingErrorPolicyArg>>(mut self, v: V) -> Self {
        self.config.polling_error_policy = Some(v.into().0);
        self
    }

    /// Configure the polling backoff policy.
    pub fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(mut self, v: V) -> Self {
        self.config.polling_backoff_policy = Some(v.into().0);
        self
    }
}

/// Not part of the public API, subject to change without notice.
#[doc(hidden)]
pub mod internal {
    use super::*;

    const LOGGING_VAR: &str = "GOOGLE_CLOUD_RUST_LOGGING";

    /// The trait implemented by each client to construct itself.
    pub trait ClientFactory {
        type Client;
        type Credentials;
        fn build(
            self,
            config: ClientConfig<Self::Credentials>,
        ) -> impl Future<Output = Result<Self::Client>>;
    }

    pub fn new_builder<F, Cr, C>(factory: F) -> super::ClientBuilder<F, Cr>
    where
        F: ClientFactory<Client = C, Credentials = Cr>,
    {
        super::ClientBuilder {
            factory,
            config: ClientConfig::default(),
        }
    }

    /// Configure a client.
    ///
    /// The default configuration for each client should work for most
    /// applications. But some applications may need to override the default
    /// endpoint, the credentials, the retry policies, and/or other behaviors
    /// of the client.
    #[derive(Clone, Debug)]
    pub struct ClientConfig<Cr> {
        pub endpoint: Option<String>,
        pub universe_domain: Option<String>,
        pub cred: Option<Cr>,
        pub credentials_file: Option<std::path::PathBuf>,
        pub api_key: Option<String>,
        pub scopes: Vec<String>,
        pub quota_project_id: Option<String>,
        pub api_audience: Option<String>,
        pub always_use_jwt_access: bool,
        pub client_cert_source: Option<ClientCertSource>,
        pub transport_kind: TransportKind,
        pub interceptors: Vec<Arc<dyn Interceptor>>,
        pub tracing: bool,
        pub retry_policy: Option<Arc<dyn RetryPolicy>>,
        pub backoff_policy: Option<Arc<dyn BackoffPolicy>>,
        pub polling_error_policy: Option<Arc<dyn PollingErrorPolicy>>,
        pub polling_backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
    }

    impl<Cr> ClientConfig<Cr> {
        /// Tracing is enabled by the builder or via the environment.
        pub fn tracing_enabled(&self) -> bool {
            if self.tracing {
                return true;
            }
            std::env::var(LOGGING_VAR)
                .map(|v| v == "true")
                .unwrap_or(false)
        }
    }

    impl<Cr> std::default::Default for ClientConfig<Cr> {
        fn default() -> Self {
            Self {
                endpoint: None,
                universe_domain: None,
                cred: None,
                credentials_file: None,
                api_key: None,
                scopes: Vec::new(),
                quota_project_id: None,
                api_audience: None,
                always_use_jwt_access: true,
                client_cert_source: None,
                transport_kind: TransportKind::default(),
                interceptors: Vec::new(),
                tracing: false,
                retry_policy: None,
                backoff_policy: None,
                polling_error_policy: None,
                polling_backoff_policy: None,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        // This test must run serially because `std::env::remove_var` and
        // `std::env::set_var` are unsafe otherwise.
        #[test]
        #[serial_test::serial]
        fn config_tracing() {
            unsafe {
                std::env::remove_var(LOGGING_VAR);
            }
            let config = ClientConfig::<()>::default();
            assert!(!config.tracing_enabled(), "expected tracing to be disabled");

            unsafe {
                std::env::set_var(LOGGING_VAR, "true");
            }
            let config = ClientConfig::<()>::default();
            assert!(config.tracing_enabled(), "expected tracing to be enabled");

            unsafe {
                std::env::set_var(LOGGING_VAR, "not-true");
            }
            let config = ClientConfig::<()>::default();
            assert!(!config.tracing_enabled(), "expected tracing to be disabled");

            unsafe {
                std::env::remove_var(LOGGING_VAR);
            }
        }
    }
}

#[doc(hidden)]
pub mod examples {
    //! This module contains helper types used in the rustdoc examples.

    type Config = super::internal::ClientConfig<Credentials>;
    use super::Result;

    /// A placeholder for a real client, used in examples.
    #[allow(dead_code)]
    pub struct Client(Config);
    impl Client {
        /// Create a builder to initialize new instances of this client.
        pub fn builder() -> client::Builder {
            super::internal::new_builder(client::Factory)
        }

        async fn new(config: Config) -> Result<Self> {
            Ok(Self(config))
        }
    }
    mod client {
        pub type Builder = super::super::ClientBuilder<Factory, super::Credentials>;
        pub struct Factory;
        impl super::super::internal::ClientFactory for Factory {
            type Credentials = super::Credentials;
            type Client = super::Client;
            async fn build(
                self,
                config: crate::client_builder::internal::ClientConfig<Self::Credentials>,
            ) -> super::Result<Self::Client> {
                Self::Client::new(config).await
            }
        }
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Credentials {
        pub scopes: Vec<String>,
    }

    // We use the examples as scaffolding for the tests.
    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::client_builder::TransportKind;

        #[tokio::test]
        async fn build_default() {
            let client = Client::builder().build().await.unwrap();
            let config = client.0;
            assert_eq!(config.endpoint, None);
            assert_eq!(config.universe_domain, None);
            assert_eq!(config.cred, None);
            assert_eq!(config.transport_kind, TransportKind::Binary);
            assert!(!config.tracing);
            assert!(config.retry_policy.is_none(), "{config:?}");
            assert!(config.backoff_policy.is_none(), "{config:?}");
            assert!(config.polling_error_policy.is_none(), "{config:?}");
            assert!(config.polling_backoff_policy.is_none(), "{config:?}");
        }

        #[tokio::test]
        async fn endpoint() {
            let client = Client::builder()
                .with_endpoint("http://example.com")
                .build()
                .await
                .unwrap();
            let config = client.0;
            assert_eq!(config.endpoint.as_deref(), Some("http://example.com"));
        }

        #[tokio::test]
        async fn universe_domain() {
            let client = Client::builder()
                .with_universe_domain("example.org")
                .build()
                .await
                .unwrap();
            let config = client.0;
            assert_eq!(config.universe_domain.as_deref(), Some("example.org"));
        }

        #[tokio::test]
        async fn credentials() {
            let client = Client::builder()
                .with_credentials(Credentials {
                    scopes: vec!["test-scope".to_string()],
                })
                .build()
                .await
                .unwrap();
            let config = client.0;
            let cred = config.cred.unwrap();
            assert_eq!(cred.scopes, vec!["test-scope".to_string()]);
        }

        #[tokio::test]
        async fn api_key() {
            let client = Client::builder()
                .with_api_key("test-api-key")
                .build()
                .await
                .unwrap();
            let config = client.0;
            assert_eq!(config.api_key.as_deref(), Some("test-api-key"));
        }

        #[tokio::test]
        async fn transport_kind() {
            let client = Client::builder()
                .with_transport_kind(TransportKind::Json)
                .build()
                .await
                .unwrap();
            let config = client.0;
            assert_eq!(config.transport_kind, TransportKind::Json);
        }

        #[tokio::test]
        async fn scopes_and_quota_project() {
            let client = Client::builder()
                .with_scopes(["scope-1", "scope-2"])
                .with_quota_project_id("test-project")
                .build()
                .await
                .unwrap();
            let config = client.0;
            assert_eq!(
                config.scopes,
                vec!["scope-1".to_string(), "scope-2".to_string()]
            );
            assert_eq!(config.quota_project_id.as_deref(), Some("test-project"));
        }

        #[tokio::test]
        async fn always_use_jwt_access() {
            let client = Client::builder().build().await.unwrap();
            assert!(client.0.always_use_jwt_access);

            let client = Client::builder()
                .with_always_use_jwt_access(false)
                .build()
                .await
                .unwrap();
            assert!(!client.0.always_use_jwt_access);
        }

        #[tokio::test]
        async fn interceptors() {
            use crate::interceptor::Interceptor;
            #[derive(Debug)]
            struct Noop;
            impl Interceptor for Noop {}
            let client = Client::builder()
                .with_interceptor(Noop)
                .with_interceptor(Noop)
                .build()
                .await
                .unwrap();
            let config = client.0;
            assert_eq!(config.interceptors.len(), 2);
        }

        #[tokio::test]
        async fn retry_policy() {
            use crate::retry_policy::{AlwaysRetry, RetryPolicyExt};
            let client = Client::builder()
                .with_retry_policy(AlwaysRetry.with_attempt_limit(3))
                .build()
                .await
                .unwrap();
            let config = client.0;
            assert!(config.retry_policy.is_some(), "{config:?}");
        }

        #[tokio::test]
        async fn polling_policies() {
            use crate::exponential_backoff::ExponentialBackoff;
            use crate::polling_error_policy::{AlwaysContinue, PollingErrorPolicyExt};
            let client = Client::builder()
                .with_polling_error_policy(AlwaysContinue.with_attempt_limit(3))
                .with_polling_backoff_policy(ExponentialBackoff::default())
                .build()
                .await
                .unwrap();
            let config = client.0;
            assert!(config.polling_error_policy.is_some(), "{config:?}");
            assert!(config.polling_backoff_policy.is_some(), "{config:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn error_credentials() {
        let error = Error::cred("no credentials in the environment");
        assert!(error.is_credentials(), "{error:?}");
        assert!(error.to_string().contains("credentials"), "{error}");
        assert!(error.source().is_some(), "{error:?}");
    }

    #[test]
    fn error_transport() {
        let error = Error::transport("cannot open channel");
        assert!(error.is_transport(), "{error:?}");
        assert!(error.to_string().contains("transport"), "{error}");
    }

    #[test]
    fn error_validation() {
        let error = Error::validation("bad universe domain");
        assert!(error.is_validation(), "{error:?}");
        assert!(error.to_string().contains("bad universe domain"), "{error}");
    }

    #[test]
    fn cert_source() {
        let source = ClientCertSource::new(|| {
            Ok(ClientCertificate {
                cert_pem: b"CERT".to_vec(),
                key_pem: b"KEY".to_vec(),
            })
        });
        let cert = source.certificate().unwrap();
        assert_eq!(cert.cert_pem, b"CERT");
        assert_eq!(cert.key_pem, b"KEY");
        assert_eq!(format!("{source:?}"), "ClientCertSource");
    }
}
