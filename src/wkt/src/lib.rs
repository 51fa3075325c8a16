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

//! Well-known types shared by all the AI Platform client library crates.
//!
//! The interesting type is [Any]: the long-running operation envelope stores
//! its metadata and result payloads as `google.protobuf.Any`. Because the
//! client libraries support both a protobuf transport and a JSON transport,
//! [Any] holds whichever representation arrived on the wire and converts to a
//! typed message on demand.

pub mod message;

mod any;
pub use any::{Any, AnyError};

/// The `google.protobuf.Empty` message.
#[derive(Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize)]
pub struct Empty {}

impl message::Message for Empty {
    fn typename() -> &'static str {
        "type.googleapis.com/google.protobuf.Empty"
    }
}
