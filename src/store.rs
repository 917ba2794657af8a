//! JSON document persistence.
//!
//! Every read opens and parses the file from scratch; nothing is cached
//! between calls.

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;

use datatoken_core::errors::{DataTokenError, Result};
use datatoken_core::serde_utils::{from_json_reader, to_pretty_json};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::debug;

/// Dynamically typed mapping read back from disk.
pub type Document = Map<String, Value>;

/// Writes `data_json` to `path`, replacing any previous content.
///
/// Not atomic: a crash mid-write can leave a truncated file.
pub fn store_json_as_file(data_json: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, data_json)?;
    debug!(path = %path.display(), bytes = data_json.len(), "stored json");
    Ok(())
}

/// Writes through a temporary file in the target directory and renames it
/// over `path`, so readers see either the old or the new content.
pub fn store_json_as_file_atomic(data_json: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data_json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| DataTokenError::Io(err.error))?;

    debug!(path = %path.display(), bytes = data_json.len(), "stored json atomically");
    Ok(())
}

fn load_document(path: &Path) -> Result<Document> {
    let file = File::open(path)?;
    let value: Value = from_json_reader(BufReader::new(file))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DataTokenError::Deserialization(format!(
            "expected a JSON object at top level of {}, found {}",
            path.display(),
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reads and parses the document stored at `path`.
pub fn read_json_from_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let document = load_document(path)?;
    debug!(path = %path.display(), fields = document.len(), "read json");
    Ok(document)
}

/// Looks up `field` in the document stored at `path`.
///
/// A missing field is `Ok(None)`; only unreadable or malformed files fail.
pub fn check_field_in_json(path: impl AsRef<Path>, field: &str) -> Result<Option<Value>> {
    let mut document = load_document(path.as_ref())?;
    Ok(document.remove(field))
}

/// Renders `document` with four-space indentation followed by a newline.
pub fn write_json<W: Write>(document: &Document, mut out: W) -> Result<()> {
    let rendered = to_pretty_json(document)?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

/// Pretty prints `document` to stdout.
pub fn print_json(document: &Document) -> Result<()> {
    write_json(document, io::stdout().lock())
}
