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
use crate::token::{Token, TokenProvider};
use std::time::Duration;
use tokio::time::Instant;

/// Tokens older than this (relative to their expiration) are refreshed.
///
/// The slack absorbs clock skew between the client and the authorization
/// server, and the time the token spends in flight.
const EXPIRATION_SLACK: Duration = Duration::from_secs(10);

/// Caches tokens from an underlying [TokenProvider].
///
/// Fetching a token may require signing a JWT or a round-trip to an
/// authorization server. The cache returns the previous token until it is
/// close to expiration.
#[derive(Debug)]
pub(crate) struct TokenCache<T> {
    inner: T,
    cached: tokio::sync::Mutex<Option<Token>>,
}

impl<T> TokenCache<T>
where
    T: TokenProvider,
{
    pub(crate) fn new(inner: T) -> Self {
        Self {
            inner,
            cached: tokio::sync::Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl<T> TokenProvider for TokenCache<T>
where
    T: TokenProvider,
{
    async fn token(&self) -> Result<Token> {
        let mut guard = self.cached.lock().await;
        if let Some(token) = guard.as_ref() {
            let fresh = match token.expires_at {
                None => true,
                Some(expires_at) => Instant::now() + EXPIRATION_SLACK < expires_at,
            };
            if fresh {
                return Ok(token.clone());
            }
        }
        let token = self.inner.token().await?;
        *guard = Some(token.clone());
        Ok(token)
    }
}
