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

//! AI Platform Client Library for Rust.
//!
//! This crate contains the generated-style clients for the
//! `google.cloud.aiplatform.v1` API. Start with
//! [client::ModelService::builder] to create a client:
//!
//! ```no_run
//! # tokio_test::block_on(async {
//! use aiplatform_v1::client::ModelService;
//! let client = ModelService::builder().build().await?;
//! let mut models = client
//!     .list_models()
//!     .set_parent("projects/my-project/locations/us-central1")
//!     .by_item();
//! while let Some(model) = models.next().await {
//!     println!("{}", model?.name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(()) });
//! ```

pub mod builder;
pub mod client;
pub mod model;

pub(crate) mod methods;

/// The error type used by this crate.
pub use gax::error::Error;

/// The result type used by this crate.
pub use gax::Result;

/// The traits and types to track long-running operations.
pub use lro::{Poller, PollingResult};
