//! Strict `HH:mm` time parsing.
//!
//! Chat commands supply break times as 24-hour `HH:mm` strings. Parsing is
//! deliberately strict: exactly two digits, a colon, two digits, with
//! surrounding whitespace tolerated. `chrono`'s `%H` format accepts
//! one-digit hours, so the shape check is done by hand.

use chrono::{Duration, NaiveTime};

use crate::error::TimeParseError;

/// Parse an `HH:mm` string into a time of day.
pub fn parse_time(input: &str) -> Result<NaiveTime, TimeParseError> {
    let s = input.trim();
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(TimeParseError::BadShape(s.to_string()));
    }
    if ![bytes[0], bytes[1], bytes[3], bytes[4]]
        .iter()
        .all(u8::is_ascii_digit)
    {
        return Err(TimeParseError::BadShape(s.to_string()));
    }

    let hour = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
    let minute = u32::from(bytes[3] - b'0') * 10 + u32::from(bytes[4] - b'0');

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| TimeParseError::OutOfRange(s.to_string()))
}

/// Parse an `HH:mm` string into a span measured from midnight.
///
/// Used for break lengths: `"00:30"` is a thirty-minute break.
pub fn parse_span(input: &str) -> Result<Duration, TimeParseError> {
    use chrono::Timelike;

    let time = parse_time(input)?;
    Ok(Duration::hours(i64::from(time.hour())) + Duration::minutes(i64::from(time.minute())))
}

/// Format a time of day back to `HH:mm`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_valid_times() {
        let hms = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(parse_time("10:00").unwrap(), hms(10, 0));
        assert_eq!(parse_time("00:00").unwrap(), hms(0, 0));
        assert_eq!(parse_time("23:59").unwrap(), hms(23, 59));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert!(parse_time(" 10:00 ").is_ok());
        assert!(parse_time("\t14:30\n").is_ok());
    }

    #[test]
    fn rejects_wrong_shapes() {
        for input in ["9:00", "10:0", "1000", "10-00", "abc", "", "10:00x", "x10:00", "10:"] {
            assert!(
                matches!(parse_time(input), Err(TimeParseError::BadShape(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn rejects_out_of_range() {
        for input in ["24:00", "10:60", "99:99"] {
            assert!(
                matches!(parse_time(input), Err(TimeParseError::OutOfRange(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn span_measures_from_midnight() {
        assert_eq!(parse_span("00:05"), Ok(Duration::minutes(5)));
        assert_eq!(parse_span("00:30"), Ok(Duration::minutes(30)));
        assert_eq!(parse_span("12:30"), Ok(Duration::hours(12) + Duration::minutes(30)));
    }

    #[test]
    fn span_rejects_like_time() {
        assert!(parse_span("0:05").is_err());
        assert!(parse_span("00:60").is_err());
    }

    proptest! {
        #[test]
        fn round_trips_every_valid_time(hour in 0u32..24, minute in 0u32..60) {
            let input = format!("{hour:02}:{minute:02}");
            let parsed = parse_time(&input).unwrap();
            prop_assert_eq!(format_time(parsed), input);
        }
    }
}
