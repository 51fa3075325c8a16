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

//! Resolves the service endpoint from the client configuration and the
//! environment.
//!
//! The resolution is a pure function of the configuration and an environment
//! snapshot. The snapshot can be constructed directly in tests, so the
//! resolution rules are testable without mutating the process environment.

use gax::client_builder::Error as BuilderError;
use http::Uri;
use std::str::FromStr;

/// Enables client TLS certificates, `true` or `false` (the default).
pub const USE_CLIENT_CERTIFICATE_VAR: &str = "GOOGLE_API_USE_CLIENT_CERTIFICATE";

/// Controls the mTLS endpoint selection, `never`, `auto` (the default), or
/// `always`.
pub const USE_MTLS_ENDPOINT_VAR: &str = "GOOGLE_API_USE_MTLS_ENDPOINT";

/// Overrides the universe domain, normally `googleapis.com`.
pub const UNIVERSE_DOMAIN_VAR: &str = "GOOGLE_CLOUD_UNIVERSE_DOMAIN";

/// The universe domain used when neither the builder nor the environment
/// override it.
pub const DEFAULT_UNIVERSE_DOMAIN: &str = "googleapis.com";

/// A snapshot of the environment variables affecting endpoint resolution.
#[derive(Clone, Debug, Default)]
pub struct EnvSnapshot {
    pub use_client_certificate: Option<String>,
    pub use_mtls_endpoint: Option<String>,
    pub universe_domain: Option<String>,
}

impl EnvSnapshot {
    /// Captures the current process environment.
    pub fn from_env() -> Self {
        Self {
            use_client_certificate: std::env::var(USE_CLIENT_CERTIFICATE_VAR).ok(),
            use_mtls_endpoint: std::env::var(USE_MTLS_ENDPOINT_VAR).ok(),
            universe_domain: std::env::var(UNIVERSE_DOMAIN_VAR).ok(),
        }
    }
}

/// The inputs to endpoint resolution taken from the client configuration.
#[derive(Clone, Debug, Default)]
pub struct ResolveConfig {
    /// An explicit endpoint, used verbatim when present.
    pub endpoint: Option<String>,
    /// The universe domain configured via the client builder.
    pub universe_domain: Option<String>,
    /// If true, the application configured a client certificate source.
    pub has_client_certificate: bool,
}

/// The resolved endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub scheme: String,
    pub is_mtls: bool,
    /// The universe domain the endpoint was derived from. The credentials
    /// must belong to the same universe.
    pub universe_domain: String,
}

impl Endpoint {
    /// The origin used by the gRPC transport, e.g.
    /// `https://aiplatform.googleapis.com:443`.
    pub fn grpc_origin(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// The origin used by the JSON transport, e.g.
    /// `https://aiplatform.googleapis.com`.
    pub fn http_origin(&self) -> String {
        if self.port == default_port(&self.scheme) {
            return format!("{}://{}", self.scheme, self.host);
        }
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

fn default_port(scheme: &str) -> u16 {
    match scheme {
        "http" => 80,
        _ => 443,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MtlsEndpointMode {
    Never,
    Auto,
    Always,
}

fn parse_use_client_certificate(env: &EnvSnapshot) -> gax::client_builder::Result<bool> {
    match env.use_client_certificate.as_deref() {
        None => Ok(false),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(value) => Err(BuilderError::validation(format!(
            "unsupported value for {USE_CLIENT_CERTIFICATE_VAR}: `{value}`, expected `true` or `false`"
        ))),
    }
}

fn parse_mtls_endpoint_mode(env: &EnvSnapshot) -> gax::client_builder::Result<MtlsEndpointMode> {
    match env.use_mtls_endpoint.as_deref() {
        None => Ok(MtlsEndpointMode::Auto),
        Some("never") => Ok(MtlsEndpointMode::Never),
        Some("auto") => Ok(MtlsEndpointMode::Auto),
        Some("always") => Ok(MtlsEndpointMode::Always),
        Some(value) => Err(BuilderError::validation(format!(
            "unsupported value for {USE_MTLS_ENDPOINT_VAR}: `{value}`, expected `never`, `auto`, or `always`"
        ))),
    }
}

/// Resolves the endpoint for `service` (e.g. `aiplatform`).
///
/// An explicit endpoint in the configuration wins over everything else, it is
/// used verbatim and suppresses both the universe domain rewriting and the
/// mTLS endpoint rewriting. Otherwise the host is derived from the universe
/// domain, switching to the `{service}.mtls.googleapis.com` endpoint when
/// client certificates are in play.
pub fn resolve(
    service: &str,
    config: &ResolveConfig,
    env: &EnvSnapshot,
) -> gax::client_builder::Result<Endpoint> {
    let use_client_certificate = parse_use_client_certificate(env)?;
    let mtls_mode = parse_mtls_endpoint_mode(env)?;

    let universe_domain = config
        .universe_domain
        .clone()
        .or_else(|| env.universe_domain.clone())
        .unwrap_or_else(|| DEFAULT_UNIVERSE_DOMAIN.to_string());
    if universe_domain.is_empty() {
        return Err(BuilderError::validation(
            "the universe domain cannot be empty",
        ));
    }

    let client_cert_enabled = use_client_certificate && config.has_client_certificate;
    if mtls_required_without_certificate(mtls_mode, client_cert_enabled) {
        tracing::warn!(
            "{USE_MTLS_ENDPOINT_VAR}=always but no client certificate is available, \
             requests will likely fail authentication"
        );
    }
    let use_mtls = match mtls_mode {
        MtlsEndpointMode::Never => false,
        MtlsEndpointMode::Always => true,
        MtlsEndpointMode::Auto => client_cert_enabled,
    };

    if let Some(endpoint) = &config.endpoint {
        return from_explicit(endpoint, client_cert_enabled, universe_domain);
    }

    if use_mtls && universe_domain != DEFAULT_UNIVERSE_DOMAIN {
        return Err(BuilderError::validation(format!(
            "mTLS is not supported outside the default universe, the configured universe domain is `{universe_domain}`"
        )));
    }

    let host = if use_mtls {
        format!("{service}.mtls.{DEFAULT_UNIVERSE_DOMAIN}")
    } else {
        format!("{service}.{universe_domain}")
    };
    Ok(Endpoint {
        host,
        port: 443,
        scheme: "https".to_string(),
        is_mtls: client_cert_enabled,
        universe_domain,
    })
}

// The mTLS endpoint is forced but requests cannot present a certificate.
fn mtls_required_without_certificate(mode: MtlsEndpointMode, client_cert_enabled: bool) -> bool {
    mode == MtlsEndpointMode::Always && !client_cert_enabled
}

fn from_explicit(
    endpoint: &str,
    is_mtls: bool,
    universe_domain: String,
) -> gax::client_builder::Result<Endpoint> {
    // Scheme-less endpoints, e.g. `squid.clam.whelk`, get `https://`.
    let full = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    };
    let uri = Uri::from_str(&full).map_err(BuilderError::transport)?;
    let authority = uri
        .authority()
        .ok_or_else(|| BuilderError::validation(format!("missing authority in endpoint `{endpoint}`")))?;
    let scheme = uri
        .scheme_str()
        .unwrap_or("https")
        .to_string();
    let port = authority.port_u16().unwrap_or_else(|| default_port(&scheme));
    Ok(Endpoint {
        host: authority.host().to_string(),
        port,
        scheme,
        is_mtls,
        universe_domain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_env::ScopedEnv;
    use test_case::test_case;

    type TestResult = anyhow::Result<()>;

    fn env(cert: Option<&str>, mtls: Option<&str>, universe: Option<&str>) -> EnvSnapshot {
        EnvSnapshot {
            use_client_certificate: cert.map(str::to_string),
            use_mtls_endpoint: mtls.map(str::to_string),
            universe_domain: universe.map(str::to_string),
        }
    }

    #[test]
    fn default_resolution() -> TestResult {
        let got = resolve("aiplatform", &ResolveConfig::default(), &EnvSnapshot::default())?;
        assert_eq!(got.host, "aiplatform.googleapis.com");
        assert_eq!(got.universe_domain, DEFAULT_UNIVERSE_DOMAIN);
        assert!(!got.is_mtls);
        assert_eq!(got.grpc_origin(), "https://aiplatform.googleapis.com:443");
        assert_eq!(got.http_origin(), "https://aiplatform.googleapis.com");
        Ok(())
    }

    #[test_case(None, None, false, "aiplatform.googleapis.com"; "all defaults")]
    #[test_case(Some("false"), None, true, "aiplatform.googleapis.com"; "cert env disabled")]
    #[test_case(Some("true"), None, false, "aiplatform.googleapis.com"; "no cert source")]
    #[test_case(Some("true"), None, true, "aiplatform.mtls.googleapis.com"; "auto with cert")]
    #[test_case(Some("true"), Some("auto"), true, "aiplatform.mtls.googleapis.com"; "explicit auto with cert")]
    #[test_case(Some("true"), Some("never"), true, "aiplatform.googleapis.com"; "never wins over cert")]
    #[test_case(None, Some("always"), false, "aiplatform.mtls.googleapis.com"; "always without cert")]
    fn mtls_matrix(
        cert: Option<&str>,
        mtls: Option<&str>,
        has_source: bool,
        want_host: &str,
    ) -> TestResult {
        let config = ResolveConfig {
            has_client_certificate: has_source,
            ..ResolveConfig::default()
        };
        let got = resolve("aiplatform", &config, &env(cert, mtls, None))?;
        assert_eq!(got.host, want_host);
        Ok(())
    }

    #[test]
    fn universe_domain_from_env() -> TestResult {
        let got = resolve(
            "aiplatform",
            &ResolveConfig::default(),
            &env(None, None, Some("test-universe.example")),
        )?;
        assert_eq!(got.host, "aiplatform.test-universe.example");
        assert_eq!(got.universe_domain, "test-universe.example");
        Ok(())
    }

    #[test]
    fn universe_domain_from_builder_wins() -> TestResult {
        let config = ResolveConfig {
            universe_domain: Some("builder-universe.example".to_string()),
            ..ResolveConfig::default()
        };
        let got = resolve(
            "aiplatform",
            &config,
            &env(None, None, Some("env-universe.example")),
        )?;
        assert_eq!(got.host, "aiplatform.builder-universe.example");
        Ok(())
    }

    #[test]
    fn empty_universe_domain_from_builder_is_an_error() {
        let config = ResolveConfig {
            universe_domain: Some(String::new()),
            ..ResolveConfig::default()
        };
        let got = resolve("aiplatform", &config, &EnvSnapshot::default());
        assert!(matches!(&got, Err(e) if e.is_validation()), "{got:?}");
        let message = got.unwrap_err().to_string();
        assert!(message.contains("universe domain"), "{message}");
    }

    #[test]
    fn empty_universe_domain_from_env_is_an_error() {
        let got = resolve(
            "aiplatform",
            &ResolveConfig::default(),
            &env(None, None, Some("")),
        );
        assert!(matches!(&got, Err(e) if e.is_validation()), "{got:?}");
    }

    #[test]
    fn always_without_certificate_warns() {
        assert!(mtls_required_without_certificate(
            MtlsEndpointMode::Always,
            false
        ));
        assert!(!mtls_required_without_certificate(
            MtlsEndpointMode::Always,
            true
        ));
        assert!(!mtls_required_without_certificate(
            MtlsEndpointMode::Auto,
            false
        ));
    }

    #[test]
    fn mtls_outside_default_universe_is_an_error() {
        let got = resolve(
            "aiplatform",
            &ResolveConfig::default(),
            &env(None, Some("always"), Some("test-universe.example")),
        );
        assert!(matches!(&got, Err(e) if e.is_validation()), "{got:?}");
        let message = got.unwrap_err().to_string();
        assert!(message.contains("test-universe.example"), "{message}");
    }

    #[test_case("squid.clam.whelk", "https://squid.clam.whelk"; "scheme-less")]
    #[test_case("https://squid.clam.whelk", "https://squid.clam.whelk"; "https")]
    #[test_case("http://localhost:5678", "http://localhost:5678"; "emulator")]
    fn explicit_endpoint_verbatim(endpoint: &str, want_http: &str) -> TestResult {
        let config = ResolveConfig {
            endpoint: Some(endpoint.to_string()),
            ..ResolveConfig::default()
        };
        // Neither the universe domain nor mTLS rewrite an explicit endpoint.
        let got = resolve(
            "aiplatform",
            &config,
            &env(None, Some("always"), Some("test-universe.example")),
        )?;
        assert_eq!(got.http_origin(), want_http);
        assert!(!got.host.contains(".mtls."), "{got:?}");
        Ok(())
    }

    #[test]
    fn explicit_endpoint_grpc_origin_has_port() -> TestResult {
        let config = ResolveConfig {
            endpoint: Some("squid.clam.whelk".to_string()),
            ..ResolveConfig::default()
        };
        let got = resolve("aiplatform", &config, &EnvSnapshot::default())?;
        assert_eq!(got.grpc_origin(), "https://squid.clam.whelk:443");
        Ok(())
    }

    #[test]
    fn bad_client_certificate_value() {
        let got = resolve(
            "aiplatform",
            &ResolveConfig::default(),
            &env(Some("yes-please"), None, None),
        );
        assert!(matches!(&got, Err(e) if e.is_validation()), "{got:?}");
        let message = got.unwrap_err().to_string();
        assert!(message.contains(USE_CLIENT_CERTIFICATE_VAR), "{message}");
        assert!(message.contains("yes-please"), "{message}");
    }

    #[test]
    fn bad_mtls_endpoint_value() {
        let got = resolve(
            "aiplatform",
            &ResolveConfig::default(),
            &env(None, Some("sometimes"), None),
        );
        assert!(matches!(&got, Err(e) if e.is_validation()), "{got:?}");
        let message = got.unwrap_err().to_string();
        assert!(message.contains(USE_MTLS_ENDPOINT_VAR), "{message}");
        assert!(message.contains("sometimes"), "{message}");
    }

    #[test]
    fn missing_authority_is_an_error() {
        let config = ResolveConfig {
            endpoint: Some("https://".to_string()),
            ..ResolveConfig::default()
        };
        let got = resolve("aiplatform", &config, &EnvSnapshot::default());
        assert!(got.is_err(), "{got:?}");
    }

    // This test must run serially because it manipulates the environment.
    #[test]
    #[serial_test::serial]
    fn snapshot_from_env() {
        let _c = ScopedEnv::set(USE_CLIENT_CERTIFICATE_VAR, "true");
        let _m = ScopedEnv::set(USE_MTLS_ENDPOINT_VAR, "never");
        let _u = ScopedEnv::remove(UNIVERSE_DOMAIN_VAR);
        let snapshot = EnvSnapshot::from_env();
        assert_eq!(snapshot.use_client_certificate.as_deref(), Some("true"));
        assert_eq!(snapshot.use_mtls_endpoint.as_deref(), Some("never"));
        assert_eq!(snapshot.universe_domain, None);
    }
}
