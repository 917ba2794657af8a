//! datatoken: random timestamps and JSON record persistence.
//!
//! # Architecture
//!
//! * `timestamp`: the `YYYY-MM-DD_HHmm_SS` layout, random sampling between
//!   two bounds, epoch conversion and expiry checks
//! * `time`: injectable clock and random source capabilities
//! * `record`: stamps a caller record and renders it as JSON
//! * `store`: writes, reads and queries the JSON file
//! * `demo`: the sequential demonstration run used by the binary
//!
//! Shared errors, configuration and logging live in `datatoken-core`.

pub mod demo;
pub mod record;
pub mod store;
pub mod time;
pub mod timestamp;

pub use datatoken_core::{DataTokenConfig, DataTokenError};
pub use record::{create_json_with_dictionary, Record};
pub use store::{
    check_field_in_json, print_json, read_json_from_file, store_json_as_file,
    store_json_as_file_atomic, Document,
};
pub use time::{RandomSource, RngSource, SystemTimeProvider, TimeProvider};
pub use timestamp::{
    generate_random_timestamp, is_expired, timestamp_to_unix, unix_to_timestamp,
};
