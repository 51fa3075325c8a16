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

use crate::message::Message;

/// The errors produced when converting [Any] to and from typed messages.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum AnyError {
    #[error("expected a payload of type {want}, the Any holds {got}")]
    TypeMismatch { want: String, got: String },
    #[error("cannot serialize value into an Any")]
    Serialization(#[source] BoxError),
    #[error("cannot deserialize the Any payload")]
    Deserialization(#[source] BoxError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

impl AnyError {
    fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self::Serialization(source.into())
    }
    fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self::Deserialization(source.into())
    }
}

/// The `google.protobuf.Any` message, over either wire format.
///
/// The binary transport delivers `Any` payloads as protobuf bytes, the JSON
/// transport delivers them as JSON objects with an embedded `@type` field.
/// This type preserves whichever representation arrived and defers the
/// conversion to a typed message until the application asks for it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Any {
    type_url: String,
    contents: Contents,
}

#[derive(Clone, Debug, Default, PartialEq)]
enum Contents {
    #[default]
    Empty,
    Binary(bytes::Bytes),
    Json(serde_json::Map<String, serde_json::Value>),
}

impl Any {
    /// The type URL of the payload, e.g.
    /// `type.googleapis.com/google.protobuf.Empty`.
    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    /// Creates an `Any` holding the protobuf encoding of `message`.
    pub fn from_prost<T>(message: &T) -> Self
    where
        T: Message + prost::Message,
    {
        Self {
            type_url: T::typename().to_string(),
            contents: Contents::Binary(message.encode_to_vec().into()),
        }
    }

    /// Creates an `Any` holding the proto-JSON encoding of `message`.
    pub fn from_json<T>(message: &T) -> Result<Self, AnyError>
    where
        T: Message + serde::Serialize,
    {
        let value = serde_json::to_value(message).map_err(AnyError::ser)?;
        let map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(AnyError::ser(format!(
                    "expected a JSON object, got {other}"
                )));
            }
        };
        Ok(Self {
            type_url: T::typename().to_string(),
            contents: Contents::Json(map),
        })
    }

    /// Extracts the payload as a typed message.
    ///
    /// Fails if the type URL does not match `T`, or if the payload cannot be
    /// decoded as `T`.
    pub fn to_msg<T>(&self) -> Result<T, AnyError>
    where
        T: Message + prost::Message + Default + serde::de::DeserializeOwned,
    {
        if self.type_url != T::typename() {
            return Err(AnyError::TypeMismatch {
                want: T::typename().to_string(),
                got: self.type_url.clone(),
            });
        }
        match &self.contents {
            Contents::Empty => T::decode(bytes::Bytes::new()).map_err(AnyError::deser),
            Contents::Binary(b) => T::decode(b.clone()).map_err(AnyError::deser),
            Contents::Json(map) => {
                serde_json::from_value(serde_json::Value::Object(map.clone()))
                    .map_err(AnyError::deser)
            }
        }
    }
}

const TYPE_URL_TAG: u32 = 1;
const VALUE_TAG: u32 = 2;

// `Any` cannot use the `prost::Message` derive because the JSON
// representation has no protobuf encoding. Only binary contents round-trip
// through `encode_raw()`; the clients never re-encode a JSON `Any`.
impl prost::Message for Any {
    fn encode_raw(&self, buf: &mut impl bytes::BufMut) {
        if !self.type_url.is_empty() {
            prost::encoding::string::encode(TYPE_URL_TAG, &self.type_url, buf);
        }
        if let Contents::Binary(value) = &self.contents {
            prost::encoding::bytes::encode(VALUE_TAG, value, buf);
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: prost::encoding::WireType,
        buf: &mut impl bytes::Buf,
        ctx: prost::encoding::DecodeContext,
    ) -> Result<(), prost::DecodeError> {
        match tag {
            TYPE_URL_TAG => {
                prost::encoding::string::merge(wire_type, &mut self.type_url, buf, ctx)
            }
            VALUE_TAG => {
                let mut value = bytes::Bytes::new();
                prost::encoding::bytes::merge(wire_type, &mut value, buf, ctx)?;
                self.contents = Contents::Binary(value);
                Ok(())
            }
            _ => prost::encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.type_url.is_empty() {
            len += prost::encoding::string::encoded_len(TYPE_URL_TAG, &self.type_url);
        }
        if let Contents::Binary(value) = &self.contents {
            len += prost::encoding::bytes::encoded_len(VALUE_TAG, value);
        }
        len
    }

    fn clear(&mut self) {
        self.type_url.clear();
        self.contents = Contents::Empty;
    }
}

impl serde::Serialize for Any {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{Error as _, SerializeMap};
        let fields = match &self.contents {
            Contents::Empty => serde_json::Map::new(),
            Contents::Json(map) => map.clone(),
            Contents::Binary(_) => {
                return Err(S::Error::custom(
                    "an Any holding protobuf bytes has no JSON representation",
                ));
            }
        };
        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        map.serialize_entry("@type", &self.type_url)?;
        for (k, v) in fields.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for Any {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut map = serde_json::Map::deserialize(deserializer)?;
        let type_url = match map.remove("@type") {
            Some(serde_json::Value::String(s)) => s,
            _ => String::new(),
        };
        Ok(Self {
            type_url,
            contents: Contents::Json(map),
        })
    }
}
