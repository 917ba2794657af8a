//! Caller supplied records and their JSON rendering.

use std::collections::BTreeMap;

use datatoken_core::errors::{DataTokenError, Result};
use datatoken_core::serde_utils::to_pretty_json;
use tracing::debug;

use crate::time::RandomSource;
use crate::timestamp::generate_random_timestamp;

pub const TIME_START_FIELD: &str = "time_start";
pub const TIME_END_FIELD: &str = "time_end";
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// String to string mapping written by the assembler. Keys stay sorted.
pub type Record = BTreeMap<String, String>;

fn required<'a>(record: &'a Record, field: &str) -> Result<&'a str> {
    record
        .get(field)
        .map(String::as_str)
        .ok_or_else(|| DataTokenError::MissingField(field.to_string()))
}

/// Stamps `record` with a random `timestamp` drawn between its `time_start`
/// and `time_end` fields, then renders it as four-space indented JSON.
///
/// The record is updated in place; an existing `timestamp` entry is replaced.
pub fn create_json_with_dictionary<R>(record: &mut Record, rng: &mut R) -> Result<String>
where
    R: RandomSource + ?Sized,
{
    let start = required(record, TIME_START_FIELD)?;
    let end = required(record, TIME_END_FIELD)?;

    let stamp = generate_random_timestamp(start, end, rng)?;
    debug!(timestamp = %stamp, "stamped record");
    record.insert(TIMESTAMP_FIELD.to_string(), stamp);

    to_pretty_json(record)
}
