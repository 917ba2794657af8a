use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::errors::{DataTokenError, Result};

const INDENT: &[u8] = b"    ";

/// Serializes a value to JSON indented with four spaces.
///
/// Maps are emitted in key order, so `BTreeMap` and `serde_json::Map`
/// render lexicographically.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = Vec::with_capacity(128);
    let mut ser =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut ser)
        .map_err(|err| DataTokenError::Serialization(err.to_string()))?;
    String::from_utf8(out).map_err(|err| DataTokenError::Serialization(err.to_string()))
}

/// Deserializes a JSON string into the provided type with shared error semantics.
pub fn from_json_str<T: serde::de::DeserializeOwned>(input: &str) -> Result<T> {
    serde_json::from_str(input).map_err(|err| DataTokenError::Deserialization(err.to_string()))
}

/// Deserializes JSON from a reader.
pub fn from_json_reader<R, T>(reader: R) -> Result<T>
where
    R: std::io::Read,
    T: serde::de::DeserializeOwned,
{
    Ok(serde_json::from_reader(reader)?)
}
