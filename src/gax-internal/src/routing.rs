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

//! Computes the routing header sent with each request.
//!
//! Services use the routing header to direct requests to the correct
//! backend. The header value is derived from fields in the request, as
//! directed by each method descriptor.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// The name of the routing header.
pub const ROUTING_PARAMS_HEADER: &str = "x-goog-request-params";

// Everything except unreserved characters (RFC 3986) is escaped.
const ESCAPED: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Formats the routing parameters as a header value.
///
/// Each parameter becomes a `key=value` pair with the value URL-encoded.
/// Pairs are joined with `&`. Parameters with empty values are included,
/// the service treats a present-but-empty key differently from an absent
/// one.
pub fn format_params(params: &[(&'static str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, ESCAPED)))
        .collect::<Vec<_>>()
        .join("&")
}
