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

//! The `google.longrunning` operation envelope.
//!
//! Methods that start server-side jobs return an [model::Operation]. The
//! operations subordinate client polls, cancels, deletes, and lists these by
//! name. Applications rarely use these types directly; the typed pollers in
//! the `aiplatform-lro` crate wrap them.

pub mod model;
