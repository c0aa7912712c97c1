//! Extension traits for encoding and decoding payloads.

use error_stack::ResultExt;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{CustomResult, ParsingError};

/// Serialization helpers for any [`Serialize`] type.
pub trait Encode<'e>
where
    Self: 'e + std::fmt::Debug,
{
    fn encode_to_string_of_json(&'e self) -> CustomResult<String, ParsingError>
    where
        Self: Serialize;
}

impl<'e, A> Encode<'e> for A
where
    Self: 'e + std::fmt::Debug,
{
    fn encode_to_string_of_json(&'e self) -> CustomResult<String, ParsingError>
    where
        Self: Serialize,
    {
        serde_json::to_string(self)
            .change_context(ParsingError::EncodeError("json"))
            .attach_printable_lazy(|| format!("Unable to convert {self:?} to a request"))
    }
}

/// Deserialization helpers for raw response bodies.
pub trait BytesExt {
    fn parse_struct<'de, T>(&'de self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: serde::Deserialize<'de>;
}

impl BytesExt for bytes::Bytes {
    fn parse_struct<'de, T>(&'de self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: serde::Deserialize<'de>,
    {
        serde_json::from_slice::<T>(self.as_ref())
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| format!("Unable to parse {type_name} from bytes"))
    }
}

/// Deserialization helpers for [`serde_json::Value`].
pub trait ValueExt {
    fn parse_value<T>(self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned;
}

impl ValueExt for serde_json::Value {
    fn parse_value<T>(self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value::<T>(self)
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| format!("Unable to parse {type_name} from serde_json::Value"))
    }
}
