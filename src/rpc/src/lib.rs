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

//! The `google.rpc` types used by the AI Platform client libraries.
//!
//! Services report detailed errors using the [Status] message, both as the
//! body of failed JSON requests and as trailers on failed gRPC requests. The
//! long-running operation envelope also embeds a `Status` for operations that
//! finish in an error.

pub mod model;

pub use model::{Code, Status};
