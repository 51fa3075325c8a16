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

/// The canonical RPC status codes.
///
/// The numeric values match `google.rpc.Code`. The JSON error envelope spells
/// these as `SCREAMING_SNAKE_CASE` names, the gRPC transport carries the
/// numeric value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Code {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl Code {
    /// The name used by the JSON error envelope, e.g. `NOT_FOUND`.
    pub fn name(&self) -> &'static str {
        match self {
            Code::Ok => "OK",
            Code::Cancelled => "CANCELLED",
            Code::Unknown => "UNKNOWN",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Code::NotFound => "NOT_FOUND",
            Code::AlreadyExists => "ALREADY_EXISTS",
            Code::PermissionDenied => "PERMISSION_DENIED",
            Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Code::FailedPrecondition => "FAILED_PRECONDITION",
            Code::Aborted => "ABORTED",
            Code::OutOfRange => "OUT_OF_RANGE",
            Code::Unimplemented => "UNIMPLEMENTED",
            Code::Internal => "INTERNAL",
            Code::Unavailable => "UNAVAILABLE",
            Code::DataLoss => "DATA_LOSS",
            Code::Unauthenticated => "UNAUTHENTICATED",
        }
    }

    /// Parses the JSON error envelope spelling of a code.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "OK" => Some(Code::Ok),
            "CANCELLED" => Some(Code::Cancelled),
            "UNKNOWN" => Some(Code::Unknown),
            "INVALID_ARGUMENT" => Some(Code::InvalidArgument),
            "DEADLINE_EXCEEDED" => Some(Code::DeadlineExceeded),
            "NOT_FOUND" => Some(Code::NotFound),
            "ALREADY_EXISTS" => Some(Code::AlreadyExists),
            "PERMISSION_DENIED" => Some(Code::PermissionDenied),
            "RESOURCE_EXHAUSTED" => Some(Code::ResourceExhausted),
            "FAILED_PRECONDITION" => Some(Code::FailedPrecondition),
            "ABORTED" => Some(Code::Aborted),
            "OUT_OF_RANGE" => Some(Code::OutOfRange),
            "UNIMPLEMENTED" => Some(Code::Unimplemented),
            "INTERNAL" => Some(Code::Internal),
            "UNAVAILABLE" => Some(Code::Unavailable),
            "DATA_LOSS" => Some(Code::DataLoss),
            "UNAUTHENTICATED" => Some(Code::Unauthenticated),
            _ => None,
        }
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The `google.rpc.Status` message.
#[derive(
    Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct Status {
    /// The status code, a value of `google.rpc.Code`.
    #[prost(int32, tag = "1")]
    pub code: i32,

    /// A developer-facing error message in English.
    #[prost(string, tag = "2")]
    pub message: String,

    /// A list of messages that carry the error details.
    #[prost(message, repeated, tag = "3")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<wkt::Any>,
}

impl Status {
    /// The status code as a [Code], mapping unknown values to
    /// [Code::Unknown].
    pub fn canonical_code(&self) -> Code {
        Code::try_from(self.code).unwrap_or(Code::Unknown)
    }

    pub fn set_code<T: Into<i32>>(mut self, v: T) -> Self {
        self.code = v.into();
        self
    }

    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }
}

impl wkt::message::Message for Status {
    fn typename() -> &'static str {
        "type.googleapis.com/google.rpc.Status"
    }
}
