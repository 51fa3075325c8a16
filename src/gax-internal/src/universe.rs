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

//! Verifies the credentials belong to the configured universe domain.

use auth::credentials::Credentials;
use gax::error::Error;
use tokio::sync::OnceCell;

/// Validates, at most once, that the credentials universe domain matches the
/// one the endpoint was derived from.
///
/// The check runs on the first request and its outcome is reused for the
/// lifetime of the client. Credentials without a universe domain, such as
/// anonymous credentials, skip the check.
#[derive(Debug)]
pub struct UniverseValidator {
    configured: String,
    checked: OnceCell<Result<(), String>>,
}

impl UniverseValidator {
    pub fn new<S: Into<String>>(configured: S) -> Self {
        Self {
            configured: configured.into(),
            checked: OnceCell::new(),
        }
    }

    /// The universe domain the validator was configured with.
    pub fn configured(&self) -> &str {
        &self.configured
    }

    pub async fn validate(&self, credentials: &Credentials) -> gax::Result<()> {
        self.checked
            .get_or_init(|| async {
                match credentials.universe_domain().await {
                    None => Ok(()),
                    Some(domain) if domain == self.configured => Ok(()),
                    Some(domain) => Err(format!(
                        "the credentials universe domain (`{domain}`) does not match the client universe domain (`{}`)",
                        self.configured
                    )),
                }
            })
            .await
            .clone()
            .map_err(Error::validation)
    }
}
