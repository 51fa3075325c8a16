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

//! [API key] credentials.
//!
//! API keys identify the calling project, not the calling user. Only some
//! services accept them, and they grant access to a restricted set of
//! operations.
//!
//! [API key]: https://cloud.google.com/docs/authentication/api-keys-use

use crate::Result;
use crate::credentials::Credentials;
use crate::credentials::dynamic::CredentialsProvider;
use crate::headers_util::build_api_key_headers;
use crate::token::Token;
use http::HeaderMap;
use std::sync::Arc;

struct ApiKeyCredentials {
    api_key: String,
}

impl std::fmt::Debug for ApiKeyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyCredentials")
            .field("api_key", &"[censored]")
            .finish()
    }
}

/// A builder for API key credentials.
#[derive(Debug)]
pub struct Builder {
    api_key: String,
}

impl Builder {
    /// Creates a new builder with the given API key.
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Returns a [Credentials] instance.
    pub fn build(self) -> Credentials {
        Credentials {
            inner: Arc::new(ApiKeyCredentials {
                api_key: self.api_key,
            }),
        }
    }
}

#[async_trait::async_trait]
impl CredentialsProvider for ApiKeyCredentials {
    async fn headers(&self) -> Result<HeaderMap> {
        let token = Token {
            token: self.api_key.clone(),
            token_type: String::new(),
            expires_at: None,
        };
        build_api_key_headers(&token)
    }
}
