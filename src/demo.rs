//! The demonstration run: every utility invoked once, in order.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use datatoken_core::DataTokenConfig;
use serde_json::Value;
use tracing::info;

use crate::record::{create_json_with_dictionary, Record, TIME_END_FIELD, TIME_START_FIELD};
use crate::store::{
    check_field_in_json, read_json_from_file, store_json_as_file, store_json_as_file_atomic,
    write_json,
};
use crate::time::{RandomSource, TimeProvider};
use crate::timestamp::{
    generate_random_timestamp, is_expired, timestamp_to_unix, unix_to_timestamp,
};

/// Record stamped and persisted by the demonstration.
pub fn example_record(cfg: &DataTokenConfig) -> Record {
    let mut record = Record::new();
    record.insert("event".into(), "example_event".into());
    record.insert("details".into(), "This is an example data dictionary.".into());
    record.insert(TIME_START_FIELD.into(), cfg.time_start.clone());
    record.insert(TIME_END_FIELD.into(), cfg.time_end.clone());
    record
}

/// Report line for a field lookup. A field holding JSON `null` counts as
/// absent; strings print without quotes.
pub fn describe_field(field: &str, file: &Path, value: Option<Value>) -> String {
    let shown = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    };
    match shown {
        Some(text) => format!(
            "Field '{}' exists in {} with value: {}",
            field,
            file.display(),
            text
        ),
        None => format!("Field '{}' does not exist in {}", field, file.display()),
    }
}

/// Runs the demonstration, writing its report to `out`.
///
/// Stops at the first failing step; the error's context names the step.
pub fn run<R, C, W>(
    cfg: &DataTokenConfig,
    rng: &mut R,
    clock: &C,
    mut out: W,
) -> anyhow::Result<()>
where
    R: RandomSource + ?Sized,
    C: TimeProvider + ?Sized,
    W: Write,
{
    let random_timestamp = generate_random_timestamp(&cfg.time_start, &cfg.time_end, rng)
        .context("Error generating random timestamp")?;
    writeln!(out, "Random Timestamp: {}", random_timestamp)?;

    let unix_time =
        timestamp_to_unix(&random_timestamp).context("Error converting to Unix time")?;
    writeln!(out, "Unix Time: {}", unix_time)?;

    writeln!(out, "Converted Timestamp: {}", unix_to_timestamp(unix_time))?;

    let expired = is_expired(&random_timestamp, clock).context("Error checking expiration")?;
    writeln!(out, "Is Expired: {}", expired)?;

    let file = cfg.data_file.as_path();
    let mut record = example_record(cfg);
    let data_json =
        create_json_with_dictionary(&mut record, rng).context("Error creating JSON")?;
    writeln!(out, "Updated JSON String:")?;
    writeln!(out, "{}", data_json)?;

    let stored = if cfg.atomic_writes {
        store_json_as_file_atomic(&data_json, file)
    } else {
        store_json_as_file(&data_json, file)
    };
    stored.context("Error storing JSON to file")?;
    info!(path = %file.display(), atomic = cfg.atomic_writes, "record stored");
    writeln!(out, "Data stored in {}", file.display())?;

    let recovered = read_json_from_file(file).context("Error reading JSON from file")?;

    let field = cfg.lookup_field.as_str();
    let value = check_field_in_json(file, field).context("Error checking field in JSON")?;
    writeln!(out, "{}", describe_field(field, file, value))?;

    writeln!(out, "Pretty JSON Content:")?;
    write_json(&recovered, &mut out).context("Error printing JSON")?;

    Ok(())
}
