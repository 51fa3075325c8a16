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

use crate::Result;
use crate::credentials::QUOTA_PROJECT_KEY;
use crate::errors;
use crate::token::Token;

use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderName, HeaderValue};

const API_KEY_HEADER_KEY: &str = "x-goog-api-key";

/// A utility function to create bearer headers.
pub(crate) fn build_bearer_headers(
    token: &Token,
    quota_project_id: &Option<String>,
) -> Result<HeaderMap> {
    build_headers(token, quota_project_id, AUTHORIZATION, |token| {
        HeaderValue::from_str(&format!("{} {}", token.token_type, token.token))
            .map_err(errors::non_retryable)
    })
}

/// A utility function to create API key headers.
pub(crate) fn build_api_key_headers(token: &Token) -> Result<HeaderMap> {
    build_headers(
        token,
        &None,
        HeaderName::from_static(API_KEY_HEADER_KEY),
        |token| HeaderValue::from_str(&token.token).map_err(errors::non_retryable),
    )
}

/// A helper to create auth headers.
fn build_headers(
    token: &Token,
    quota_project_id: &Option<String>,
    header_name: HeaderName,
    build_header_value: impl FnOnce(&Token) -> Result<HeaderValue>,
) -> Result<HeaderMap> {
    let mut value = build_header_value(token)?;
    value.set_sensitive(true);

    let mut header_map = HeaderMap::new();
    header_map.insert(header_name, value);

    if let Some(project) = quota_project_id {
        header_map.insert(
            HeaderName::from_static(QUOTA_PROJECT_KEY),
            HeaderValue::from_str(project).map_err(errors::non_retryable)?,
        );
    }

    Ok(header_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn create_test_token(token: &str, token_type: &str) -> Token {
        Token {
            token: token.to_string(),
            token_type: token_type.to_string(),
            expires_at: None,
        }
    }

    #[test]
    fn bearer_headers_basic_success() {
        let token = create_test_token("test_token", "Bearer");
        let headers = build_bearer_headers(&token, &None).unwrap();

        assert_eq!(headers.len(), 1, "{headers:?}");
        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value, HeaderValue::from_static("Bearer test_token"));
        assert!(value.is_sensitive());
    }

    #[test]
    fn bearer_headers_with_quota_project() {
        let token = create_test_token("test_token", "Bearer");
        let quota_project_id = Some("test-project-123".to_string());
        let headers = build_bearer_headers(&token, &quota_project_id).unwrap();

        assert_eq!(headers.len(), 2, "{headers:?}");
        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value, HeaderValue::from_static("Bearer test_token"));
        assert!(value.is_sensitive());
        let quota_project = headers
            .get(HeaderName::from_static(QUOTA_PROJECT_KEY))
            .unwrap();
        assert_eq!(quota_project, HeaderValue::from_static("test-project-123"));
    }

    #[test]
    fn bearer_headers_different_token_type() {
        let token = create_test_token("special_token", "MAC");
        let headers = build_bearer_headers(&token, &None).unwrap();
        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value, HeaderValue::from_static("MAC special_token"));
    }

    #[test]
    fn bearer_headers_invalid_token() {
        let token = create_test_token("token with \n invalid chars", "Bearer");
        let error = build_bearer_headers(&token, &None).unwrap_err();
        assert!(!error.is_transient(), "{error:?}");
        let source = error
            .source()
            .and_then(|e| e.downcast_ref::<http::header::InvalidHeaderValue>());
        assert!(source.is_some(), "{error:?}");
    }

    #[test]
    fn api_key_headers_success() {
        let token = create_test_token("api_key_12345", "Bearer");
        let headers = build_api_key_headers(&token).unwrap();

        assert_eq!(headers.len(), 1, "{headers:?}");
        let api_key = headers
            .get(HeaderName::from_static(API_KEY_HEADER_KEY))
            .unwrap();
        assert_eq!(api_key, HeaderValue::from_static("api_key_12345"));
        assert!(api_key.is_sensitive());
    }

    #[test]
    fn api_key_headers_invalid_key() {
        let token = create_test_token("api_key with \n invalid chars", "Bearer");
        let error = build_api_key_headers(&token).unwrap_err();
        assert!(!error.is_transient(), "{error:?}");
    }
}
