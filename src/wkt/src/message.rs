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

/// A trait implemented by all messages exchanged with the service.
///
/// The typename doubles as the `Any` type URL, so implementations return the
/// fully qualified name including the `type.googleapis.com/` prefix.
pub trait Message {
    /// The fully qualified message name, e.g.
    /// `type.googleapis.com/google.protobuf.Empty`.
    fn typename() -> &'static str
    where
        Self: Sized;
}
