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

//! [User Account] credentials.
//!
//! User accounts represent a developer, administrator, or any other person
//! who interacts with Google APIs and services.
//!
//! This module provides [Credentials] derived from user account information,
//! specifically utilizing an OAuth 2.0 refresh token. The refresh token is
//! typically obtained via the standard [Authorization Code grant], for
//! example by running `gcloud auth application-default login`. Acquiring the
//! initial refresh token is outside the scope of this library.
//!
//! [Authorization Code grant]: https://tools.ietf.org/html/rfc6749#section-1.3.1
//! [User Account]: https://cloud.google.com/docs/authentication#user-accounts

use crate::Result;
use crate::build_errors::Error as BuilderError;
use crate::credentials::dynamic::CredentialsProvider;
use crate::credentials::{BuildResult, Credentials};
use crate::errors::{self, is_retryable};
use crate::headers_util::build_bearer_headers;
use crate::token::{Token, TokenProvider};
use crate::token_cache::TokenCache;
use gax::error::CredentialsError;
use http::HeaderMap;
use http::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const OAUTH2_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// The contents of an `authorized_user` credentials file.
#[derive(Debug, PartialEq, serde::Deserialize)]
pub struct AuthorizedUser {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    #[serde(default)]
    token_uri: Option<String>,
    #[serde(default)]
    quota_project_id: Option<String>,
}

/// A builder for user account credentials.
#[derive(Debug)]
pub struct Builder {
    authorized_user: AuthorizedUser,
    scopes: Option<Vec<String>>,
    quota_project_id: Option<String>,
    token_uri: Option<String>,
}

impl Builder {
    /// Creates a new builder from a parsed `authorized_user` specification.
    pub fn new(authorized_user: AuthorizedUser) -> Self {
        Self {
            authorized_user,
            scopes: None,
            quota_project_id: None,
            token_uri: None,
        }
    }

    /// Creates a builder from the JSON contents of an `authorized_user`
    /// credentials file.
    pub fn from_json(json: serde_json::Value) -> BuildResult<Self> {
        let authorized_user =
            serde_json::from_value::<AuthorizedUser>(json).map_err(BuilderError::parsing)?;
        Ok(Self::new(authorized_user))
    }

    /// Sets the URI for the token endpoint used to fetch access tokens.
    ///
    /// A value provided here overrides a `token_uri` value from the input
    /// `authorized_user` JSON.
    pub fn with_token_uri<S: Into<String>>(mut self, token_uri: S) -> Self {
        self.token_uri = Some(token_uri.into());
        self
    }

    /// Sets the [scopes] requested for the access tokens.
    ///
    /// [scopes]: https://developers.google.com/identity/protocols/oauth2/scopes
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(|s| s.into()).collect());
        self
    }

    /// Sets the [quota project] for these credentials.
    ///
    /// A value set here overrides a `quota_project_id` value from the input
    /// `authorized_user` JSON.
    ///
    /// [quota project]: https://cloud.google.com/docs/quotas/quota-project
    pub fn with_quota_project_id<S: Into<String>>(mut self, quota_project_id: S) -> Self {
        self.quota_project_id = Some(quota_project_id.into());
        self
    }

    /// Returns a [Credentials] instance with the configured settings.
    pub fn build(self) -> BuildResult<Credentials> {
        let endpoint = self
            .token_uri
            .or(self.authorized_user.token_uri)
            .unwrap_or_else(|| OAUTH2_ENDPOINT.to_string());
        let quota_project_id = self
            .quota_project_id
            .or(self.authorized_user.quota_project_id);

        let token_provider = TokenCache::new(UserTokenProvider {
            client_id: self.authorized_user.client_id,
            client_secret: self.authorized_user.client_secret,
            refresh_token: self.authorized_user.refresh_token,
            endpoint,
            scopes: self.scopes.map(|scopes| scopes.join(" ")),
        });
        Ok(Credentials {
            inner: Arc::new(UserAccountCredentials {
                token_provider,
                quota_project_id,
            }),
        })
    }
}

struct UserTokenProvider {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    endpoint: String,
    scopes: Option<String>,
}

impl std::fmt::Debug for UserTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserTokenProvider")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[censored]")
            .field("refresh_token", &"[censored]")
            .field("endpoint", &self.endpoint)
            .field("scopes", &self.scopes)
            .finish()
    }
}

#[async_trait::async_trait]
impl TokenProvider for UserTokenProvider {
    async fn token(&self) -> Result<Token> {
        let client = Client::new();
        let request = Oauth2RefreshRequest {
            grant_type: RefreshGrantType::RefreshToken,
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            refresh_token: self.refresh_token.clone(),
            scope: self.scopes.clone(),
        };
        let response = client
            .request(Method::POST, self.endpoint.as_str())
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(errors::retryable)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| CredentialsError::from_source(is_retryable(status), e))?;
            return Err(CredentialsError::from_msg(
                is_retryable(status),
                format!("failed to fetch token: {body}"),
            ));
        }
        let response = response
            .json::<Oauth2RefreshResponse>()
            .await
            .map_err(|e| CredentialsError::from_source(!e.is_decode(), e))?;
        Ok(Token {
            token: response.access_token,
            token_type: response.token_type,
            expires_at: response
                .expires_in
                .map(|d| Instant::now() + Duration::from_secs(d)),
        })
    }
}

#[derive(Debug)]
struct UserAccountCredentials<T>
where
    T: TokenProvider,
{
    token_provider: T,
    quota_project_id: Option<String>,
}

#[async_trait::async_trait]
impl<T> CredentialsProvider for UserAccountCredentials<T>
where
    T: TokenProvider,
{
    async fn headers(&self) -> Result<HeaderMap> {
        let token = self.token_provider.token().await?;
        build_bearer_headers(&token, &self.quota_project_id)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
enum RefreshGrantType {
    #[serde(rename = "refresh_token")]
    RefreshToken,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
struct Oauth2RefreshRequest {
    grant_type: RefreshGrantType,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
struct Oauth2RefreshResponse {
    access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_in: Option<u64>,
    token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use http::header::AUTHORIZATION;
    use httptest::{Expectation, Server, matchers::*, responders::*};
    use serde_json::json;

    type TestResult = anyhow::Result<()>;

    fn authorized_user(token_uri: Option<&str>) -> AuthorizedUser {
        let mut json = json!({
            "client_id": "test-client-id",
            "client_secret": "test-client-secret",
            "refresh_token": "test-refresh-token",
        });
        if let Some(uri) = token_uri {
            json["token_uri"] = json!(uri);
        }
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn debug_censors_secrets() {
        let provider = UserTokenProvider {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            refresh_token: "test-refresh-token".to_string(),
            endpoint: OAUTH2_ENDPOINT.to_string(),
            scopes: None,
        };
        let fmt = format!("{provider:?}");
        assert!(fmt.contains("test-client-id"), "{fmt}");
        assert!(!fmt.contains("test-client-secret"), "{fmt}");
        assert!(!fmt.contains("test-refresh-token"), "{fmt}");
    }

    #[test]
    fn from_json_missing_fields() {
        let error = Builder::from_json(json!({"client_id": "test-only"})).unwrap_err();
        assert!(error.is_parsing(), "{error:?}");
    }

    #[tokio::test]
    async fn refresh_token_exchange() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/token"),
                request::body(json_decoded(eq(json!({
                    "grant_type": "refresh_token",
                    "client_id": "test-client-id",
                    "client_secret": "test-client-secret",
                    "refresh_token": "test-refresh-token",
                })))),
            ])
            .respond_with(json_encoded(json!({
                "access_token": "test-access-token",
                "token_type": "Bearer",
                "expires_in": 3600,
            }))),
        );

        let credentials = Builder::new(authorized_user(None))
            .with_token_uri(server.url_str("/token"))
            .build()?;
        let headers = credentials.headers().await?;
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap(),
            "Bearer test-access-token"
        );
        Ok(())
    }

    #[tokio::test]
    async fn scopes_are_forwarded() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/token"),
                request::body(json_decoded(eq(json!({
                    "grant_type": "refresh_token",
                    "client_id": "test-client-id",
                    "client_secret": "test-client-secret",
                    "refresh_token": "test-refresh-token",
                    "scope": "scope-1 scope-2",
                })))),
            ])
            .respond_with(json_encoded(json!({
                "access_token": "test-access-token",
                "token_type": "Bearer",
            }))),
        );

        let credentials = Builder::new(authorized_user(None))
            .with_token_uri(server.url_str("/token"))
            .with_scopes(["scope-1", "scope-2"])
            .build()?;
        credentials.headers().await?;
        Ok(())
    }

    #[tokio::test]
    async fn quota_project_header() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/token")).respond_with(
                json_encoded(json!({
                    "access_token": "test-access-token",
                    "token_type": "Bearer",
                })),
            ),
        );

        let credentials = Builder::new(authorized_user(None))
            .with_token_uri(server.url_str("/token"))
            .with_quota_project_id("test-quota-project")
            .build()?;
        let headers = credentials.headers().await?;
        assert_eq!(
            headers.get("x-goog-user-project").unwrap(),
            "test-quota-project"
        );
        Ok(())
    }

    #[tokio::test]
    async fn server_error_is_transient() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/token"))
                .respond_with(status_code(StatusCode::SERVICE_UNAVAILABLE.as_u16())),
        );

        let credentials = Builder::new(authorized_user(None))
            .with_token_uri(server.url_str("/token"))
            .build()?;
        let error = credentials.headers().await.unwrap_err();
        assert!(error.is_transient(), "{error:?}");
        Ok(())
    }

    #[tokio::test]
    async fn client_error_is_permanent() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/token")).respond_with(
                status_code(StatusCode::UNAUTHORIZED.as_u16()).body(r#"{"error": "invalid_grant"}"#),
            ),
        );

        let credentials = Builder::new(authorized_user(None))
            .with_token_uri(server.url_str("/token"))
            .build()?;
        let error = credentials.headers().await.unwrap_err();
        assert!(!error.is_transient(), "{error:?}");
        assert!(error.to_string().contains("invalid_grant"), "{error}");
        Ok(())
    }

    #[tokio::test]
    async fn token_uri_from_json_is_used() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/from-json")).respond_with(
                json_encoded(json!({
                    "access_token": "test-access-token",
                    "token_type": "Bearer",
                })),
            ),
        );

        let credentials =
            Builder::new(authorized_user(Some(&server.url_str("/from-json")))).build()?;
        credentials.headers().await?;
        Ok(())
    }
}
