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

//! Computes the value for the `x-goog-api-client` header.
//!
//! The services use this header to survey what client libraries, languages,
//! and language versions are in use.

/// The name of the telemetry header.
pub const X_GOOG_API_CLIENT: &str = "x-goog-api-client";

/// Identifies generated clients.
pub const GAPIC: &str = "gapic";

/// The value of the `x-goog-api-client` header for a given client library.
#[derive(Clone, Debug, PartialEq)]
pub struct XGoogApiClient {
    /// The version of the client library, e.g. `aiplatform-v1`.
    pub version: &'static str,
    /// The library type, normally [GAPIC].
    pub library_type: &'static str,
}

impl XGoogApiClient {
    /// The header value used in the JSON transport.
    pub fn rest_header_value(&self) -> String {
        format!(
            "gl-rust/{} gax/{} rest/{}-reqwest {}/{}",
            build_info::RUSTC_VERSION,
            build_info::GAX_VERSION,
            build_info::GAX_VERSION,
            self.library_type,
            self.version,
        )
    }

    /// The header value used in the gRPC transport.
    pub fn grpc_header_value(&self) -> String {
        format!(
            "gl-rust/{} gax/{} grpc/{}-tonic {}/{}",
            build_info::RUSTC_VERSION,
            build_info::GAX_VERSION,
            build_info::GAX_VERSION,
            self.library_type,
            self.version,
        )
    }
}

mod build_info {
    include!(concat!(env!("OUT_DIR"), "/build_env.rs"));

    pub(crate) const GAX_VERSION: &str = env!("CARGO_PKG_VERSION");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest() {
        let header = XGoogApiClient {
            version: "1.2.3",
            library_type: GAPIC,
        };
        let value = header.rest_header_value();
        assert!(value.starts_with("gl-rust/"), "{value}");
        assert!(value.contains("rest/"), "{value}");
        assert!(value.contains("-reqwest"), "{value}");
        assert!(value.ends_with("gapic/1.2.3"), "{value}");
    }

    #[test]
    fn grpc() {
        let header = XGoogApiClient {
            version: "1.2.3",
            library_type: GAPIC,
        };
        let value = header.grpc_header_value();
        assert!(value.starts_with("gl-rust/"), "{value}");
        assert!(value.contains("grpc/"), "{value}");
        assert!(value.contains("-tonic"), "{value}");
        assert!(value.ends_with("gapic/1.2.3"), "{value}");
    }
}
