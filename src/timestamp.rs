//! Timestamps in the fixed `YYYY-MM-DD_HHmm_SS` layout.
//!
//! Text carries no zone designator and is read and written in the local
//! timezone of the process.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, TimeZone, Timelike, Utc};
use datatoken_core::errors::{DataTokenError, Result};
use tracing::debug;

use crate::time::{RandomSource, TimeProvider};

/// chrono pattern for the timestamp layout, e.g. `2024-01-11_1633_11`.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d_%H%M_%S";

const TIMESTAMP_LEN: usize = 18;
const SEPARATORS: [(usize, u8); 4] = [(4, b'-'), (7, b'-'), (10, b'_'), (15, b'_')];

/// chrono accepts single digit fields, the layout does not.
fn check_shape(input: &str) -> Result<()> {
    let bytes = input.as_bytes();
    if bytes.len() != TIMESTAMP_LEN {
        return Err(DataTokenError::timestamp_parse(
            input,
            format!("expected {TIMESTAMP_LEN} characters in layout YYYY-MM-DD_HHmm_SS"),
        ));
    }

    for (pos, byte) in bytes.iter().enumerate() {
        let separator = SEPARATORS
            .iter()
            .find(|(at, _)| *at == pos)
            .map(|(_, sep)| *sep);
        match separator {
            Some(sep) if *byte != sep => {
                return Err(DataTokenError::timestamp_parse(
                    input,
                    format!("expected '{}' at position {}", sep as char, pos),
                ));
            }
            None if !byte.is_ascii_digit() => {
                return Err(DataTokenError::timestamp_parse(
                    input,
                    format!("expected digit at position {pos}"),
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Parses layout text into a local instant.
///
/// Local times skipped by a DST transition are rejected; repeated ones
/// resolve to the earlier instant.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Local>> {
    check_shape(input)?;
    let naive = NaiveDateTime::parse_from_str(input, TIMESTAMP_LAYOUT)
        .map_err(|err| DataTokenError::timestamp_parse(input, err.to_string()))?;
    // `%S` accepts 60 and folds it into the nanosecond field.
    if naive.nanosecond() >= 1_000_000_000 {
        return Err(DataTokenError::timestamp_parse(input, "second out of range"));
    }

    match Local.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Ok(instant),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(DataTokenError::timestamp_parse(
            input,
            "local time does not exist in this timezone",
        )),
    }
}

/// Formats an instant with the layout. Sub-second precision is dropped.
pub fn format_timestamp(instant: &DateTime<Local>) -> String {
    instant.format(TIMESTAMP_LAYOUT).to_string()
}

/// Picks an instant uniformly in `[start, end)` at nanosecond granularity
/// and returns it in the layout.
pub fn generate_random_timestamp<R>(start: &str, end: &str, rng: &mut R) -> Result<String>
where
    R: RandomSource + ?Sized,
{
    let start_time = parse_timestamp(start)?;
    let end_time = parse_timestamp(end)?;

    let invalid_range = |reason: &str| DataTokenError::InvalidRange {
        start: start.to_string(),
        end: end.to_string(),
        reason: reason.to_string(),
    };

    let span = end_time
        .signed_duration_since(start_time)
        .num_nanoseconds()
        .ok_or_else(|| invalid_range("span exceeds the nanosecond range of i64"))?;
    if span <= 0 {
        return Err(invalid_range("end must come after start"));
    }

    let offset = rng.below(span);
    let random_time = start_time + Duration::nanoseconds(offset);
    debug!(span, offset, "sampled random timestamp");

    Ok(format_timestamp(&random_time))
}

/// Seconds since the Unix epoch for a layout timestamp.
pub fn timestamp_to_unix(timestamp: &str) -> Result<i64> {
    Ok(parse_timestamp(timestamp)?.timestamp())
}

/// Layout text for Unix seconds, in local time.
///
/// Seconds outside chrono's calendar saturate to its earliest or latest
/// representable instant.
pub fn unix_to_timestamp(unix_time: i64) -> String {
    let utc = DateTime::<Utc>::from_timestamp(unix_time, 0).unwrap_or(if unix_time < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    });
    format_timestamp(&utc.with_timezone(&Local))
}

/// True iff `timestamp` lies strictly before the clock's current instant.
pub fn is_expired<C>(timestamp: &str, clock: &C) -> Result<bool>
where
    C: TimeProvider + ?Sized,
{
    let instant = parse_timestamp(timestamp)?;
    Ok(instant < clock.now())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::time::{FixedTimeProvider, MockTimeProvider, RngSource};

    struct FixedDraw(i64);

    impl RandomSource for FixedDraw {
        fn below(&mut self, bound: i64) -> i64 {
            self.0.clamp(0, bound - 1)
        }
    }

    const START: &str = "2023-09-01_0000_00";
    const END: &str = "2024-09-01_0000_00";

    #[test]
    fn parses_and_formats_layout() {
        let t = parse_timestamp("2024-01-11_1633_11").expect("parse");
        assert_eq!(format_timestamp(&t), "2024-01-11_1633_11");
    }

    #[test_case("2024/01/11" ; "slashes")]
    #[test_case("2024-01-11 16:33:11" ; "iso like")]
    #[test_case("2024-1-11_1633_11" ; "missing leading zero")]
    #[test_case("2024-01-11_0433_11PM" ; "twelve hour suffix")]
    #[test_case("2024-13-11_1633_11" ; "month out of range")]
    #[test_case("2024-02-30_1633_11" ; "day out of range")]
    #[test_case("2024-01-11_2460_11" ; "minute out of range")]
    #[test_case("2024-01-11_1633_60" ; "leap second")]
    #[test_case("" ; "empty")]
    fn malformed_input_is_a_parse_error(input: &str) {
        let clock = FixedTimeProvider(Local::now());
        let mut rng = RngSource::seeded(1);

        assert!(parse_timestamp(input).unwrap_err().is_parse_error());
        assert!(timestamp_to_unix(input).unwrap_err().is_parse_error());
        assert!(is_expired(input, &clock).unwrap_err().is_parse_error());
        assert!(generate_random_timestamp(input, END, &mut rng)
            .unwrap_err()
            .is_parse_error());
        assert!(generate_random_timestamp(START, input, &mut rng)
            .unwrap_err()
            .is_parse_error());
    }

    #[test]
    fn generated_timestamp_lies_in_range() {
        let mut rng = RngSource::seeded(2024);
        let lo = timestamp_to_unix(START).unwrap();
        let hi = timestamp_to_unix(END).unwrap();
        for _ in 0..500 {
            let ts = generate_random_timestamp(START, END, &mut rng).expect("generate");
            let at = timestamp_to_unix(&ts).expect("generated text parses");
            assert!(lo <= at && at < hi, "{ts} outside [{START}, {END})");
        }
    }

    #[test]
    fn smallest_draw_is_start() {
        let ts = generate_random_timestamp(START, END, &mut FixedDraw(0)).unwrap();
        assert_eq!(ts, START);
    }

    #[test]
    fn largest_draw_stays_before_end() {
        let ts = generate_random_timestamp(START, END, &mut FixedDraw(i64::MAX)).unwrap();
        assert_eq!(ts, "2024-08-31_2359_59");
    }

    #[test]
    fn one_second_range_yields_start() {
        let mut rng = RngSource::seeded(3);
        let ts = generate_random_timestamp("2024-01-01_1200_00", "2024-01-01_1200_01", &mut rng)
            .unwrap();
        assert_eq!(ts, "2024-01-01_1200_00");
    }

    #[test_case(END, START ; "reversed")]
    #[test_case(START, START ; "empty")]
    fn non_positive_range_is_rejected(start: &str, end: &str) {
        let err = generate_random_timestamp(start, end, &mut RngSource::seeded(4)).unwrap_err();
        assert!(matches!(err, DataTokenError::InvalidRange { .. }));
    }

    #[test]
    fn range_beyond_i64_nanoseconds_is_rejected() {
        let err = generate_random_timestamp(
            "1000-01-01_0000_00",
            "2999-01-01_0000_00",
            &mut RngSource::seeded(5),
        )
        .unwrap_err();
        assert!(matches!(err, DataTokenError::InvalidRange { .. }));
    }

    #[test]
    fn unix_round_trip() {
        let mut rng = RngSource::seeded(11);
        for _ in 0..200 {
            let ts = generate_random_timestamp(START, END, &mut rng).unwrap();
            let unix = timestamp_to_unix(&ts).unwrap();
            assert_eq!(unix_to_timestamp(unix), ts);
        }
    }

    #[test]
    fn unix_conversion_matches_local_offset() {
        let unix = timestamp_to_unix("2024-01-11_1633_11").unwrap();
        let expected = Local
            .with_ymd_and_hms(2024, 1, 11, 16, 33, 11)
            .earliest()
            .unwrap()
            .timestamp();
        assert_eq!(unix, expected);
    }

    #[test]
    fn unix_to_timestamp_handles_epoch_and_before() {
        for unix in [0_i64, -1, -86_400 * 365] {
            let expected = Local.timestamp_opt(unix, 0).unwrap().format(TIMESTAMP_LAYOUT).to_string();
            assert_eq!(unix_to_timestamp(unix), expected);
        }
    }

    #[test]
    fn fixed_past_and_future_fixtures() {
        let clock = crate::time::SystemTimeProvider;
        assert!(is_expired("2000-01-01_0000_00", &clock).unwrap());
        assert!(!is_expired("2999-01-01_0000_00", &clock).unwrap());
    }

    #[test]
    fn expiry_is_strictly_before_now() {
        let now = parse_timestamp("2024-03-01_1000_00").unwrap();
        let mut clock = MockTimeProvider::new();
        clock.expect_now().times(3).return_const(now);

        assert!(is_expired("2024-03-01_0959_59", &clock).unwrap());
        assert!(!is_expired("2024-03-01_1000_00", &clock).unwrap());
        assert!(!is_expired("2024-03-01_1000_01", &clock).unwrap());
    }
}
