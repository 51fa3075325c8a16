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

//! AI Platform runtime helpers.
//!
//! This crate contains the types and functions shared by the generated AI
//! Platform clients: error types, retry and polling policies, request
//! options, pagination adapters, method descriptors, and the generic client
//! builder. Applications rarely depend on this crate directly, it is pulled
//! in by the service clients.

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions wrapping RPCs.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by the generated clients.
pub mod error;

/// Types to initialize clients with custom configuration.
pub mod client_builder;

/// Per-request options and the builder trait implemented by all request builders.
pub mod options;

/// The result type of retry and polling loop decisions.
pub mod retry_result;

/// Traits and implementations for retry policies.
pub mod retry_policy;

/// Traits for backoff policies.
pub mod backoff_policy;

/// Truncated exponential backoff with jitter.
pub mod exponential_backoff;

/// Traits and implementations for polling error policies.
pub mod polling_error_policy;

/// Traits for polling backoff policies.
pub mod polling_backoff_policy;

/// Adapters to iterate list RPCs as async streams.
pub mod paginator;

/// The interceptor hooks invoked around each logical call.
pub mod interceptor;

/// Static descriptions of RPC methods, shared by both transports.
pub mod method;

/// Not part of the public API, subject to change without notice.
#[doc(hidden)]
pub mod retry_loop;

#[cfg(test)]
pub(crate) mod mock_rng;
