use super::*;

#[track_caller]
fn date_ok(input: &str) -> Date {
    Date::from_slice(input.as_bytes()).unwrap_or_else(|e| panic!("{input:?} failed: {e:?}"))
}

#[track_caller]
fn time_ok(input: &str) -> Time {
    Time::from_slice(input.as_bytes()).unwrap_or_else(|e| panic!("{input:?} failed: {e:?}"))
}

#[track_caller]
fn datetime_ok(input: &str) -> DateTime {
    DateTime::from_slice(input.as_bytes()).unwrap_or_else(|e| panic!("{input:?} failed: {e:?}"))
}

#[test]
fn date_basic() {
    let d = date_ok("1979-05-27");
    assert_eq!((d.year, d.month, d.day), (1979, 5, 27));
    date_ok("0000-01-01");
    date_ok("9999-12-31");
}

#[test]
fn date_all_month_lengths() {
    let days = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    for (m, &max_day) in days.iter().enumerate() {
        let month = m + 1;
        date_ok(&format!("2023-{month:02}-{max_day:02}"));
        assert_eq!(
            Date::from_slice(format!("2023-{month:02}-{:02}", max_day + 1).as_bytes()),
            Err(crate::error::ErrorKind::InvalidDay),
        );
    }
}

#[test]
fn date_leap_years() {
    date_ok("2000-02-29"); // divisible by 400
    date_ok("2024-02-29"); // divisible by 4, not by 100
    assert_eq!(
        Date::from_slice(b"1900-02-29"),
        Err(crate::error::ErrorKind::InvalidDay)
    );
    assert_eq!(
        Date::from_slice(b"2023-02-29"),
        Err(crate::error::ErrorKind::InvalidDay)
    );
}

#[test]
fn date_field_errors() {
    use crate::error::ErrorKind::*;
    assert_eq!(Date::from_slice(b"197-05-27"), Err(InvalidYear));
    assert_eq!(Date::from_slice(b"abcd-05-27"), Err(InvalidYear));
    assert_eq!(Date::from_slice(b"1979/05-27"), Err(InvalidMonth));
    assert_eq!(Date::from_slice(b"1979-00-27"), Err(InvalidMonth));
    assert_eq!(Date::from_slice(b"1979-13-27"), Err(InvalidMonth));
    assert_eq!(Date::from_slice(b"1979-05/27"), Err(InvalidDay));
    assert_eq!(Date::from_slice(b"1979-05-00"), Err(InvalidDay));
    assert_eq!(Date::from_slice(b"1979-05-32"), Err(InvalidDay));
    assert_eq!(Date::from_slice(b"1979-05-271"), Err(InvalidDay));
}

#[test]
fn time_basic() {
    let t = time_ok("07:32:00");
    assert_eq!((t.hour, t.minute, t.second, t.nanosecond), (7, 32, 0, 0));
    time_ok("00:00:00");
    time_ok("23:59:59");
}

#[test]
fn time_fractional_seconds() {
    assert_eq!(time_ok("00:00:00.5").nanosecond, 500_000_000);
    assert_eq!(time_ok("00:00:00.123").nanosecond, 123_000_000);
    assert_eq!(time_ok("00:00:00.123456789").nanosecond, 123_456_789);
    assert_eq!(time_ok("00:00:00.000000001").nanosecond, 1);
}

#[test]
fn time_field_errors() {
    use crate::error::ErrorKind::*;
    assert_eq!(Time::from_slice(b"24:00:00"), Err(InvalidHour));
    assert_eq!(Time::from_slice(b"2:00:00"), Err(InvalidHour));
    assert_eq!(Time::from_slice(b"00:60:00"), Err(InvalidMinute));
    assert_eq!(Time::from_slice(b"00:00:60"), Err(InvalidSecond));
    // Seconds are required.
    assert_eq!(Time::from_slice(b"07:32"), Err(InvalidSecond));
    // Fraction must be 1-9 digits.
    assert_eq!(Time::from_slice(b"00:00:00."), Err(InvalidNanoSecond));
    assert_eq!(
        Time::from_slice(b"00:00:00.1234567890"),
        Err(InvalidNanoSecond)
    );
    assert_eq!(Time::from_slice(b"00:00:00.12a"), Err(InvalidNanoSecond));
}

#[test]
fn datetime_separators() {
    let dt = datetime_ok("1979-05-27T07:32:00");
    assert_eq!(dt.date.year, 1979);
    assert_eq!(dt.time.hour, 7);
    assert_eq!(dt.offset, None);

    // Lowercase t and a space are accepted separators.
    datetime_ok("1979-05-27t07:32:00");
    datetime_ok("1979-05-27 07:32:00");
}

#[test]
fn datetime_offsets() {
    assert_eq!(datetime_ok("1979-05-27T07:32:00Z").offset, Some(TimeOffset::Z));
    assert_eq!(datetime_ok("1979-05-27T07:32:00z").offset, Some(TimeOffset::Z));
    assert_eq!(
        datetime_ok("1979-05-27T00:32:00-07:00").offset,
        Some(TimeOffset::Custom { minutes: -420 })
    );
    assert_eq!(
        datetime_ok("1979-05-27T00:32:00+05:30").offset,
        Some(TimeOffset::Custom { minutes: 330 })
    );
    assert_eq!(
        datetime_ok("1979-05-27T00:32:00+23:59").offset,
        Some(TimeOffset::Custom { minutes: 23 * 60 + 59 })
    );
    assert_eq!(
        datetime_ok("1979-05-27T00:32:00+00:00").offset,
        Some(TimeOffset::Custom { minutes: 0 })
    );
}

#[test]
fn datetime_offset_errors() {
    use crate::error::ErrorKind::*;
    assert_eq!(
        DateTime::from_slice(b"1979-05-27T00:32:00+24:00"),
        Err(InvalidTimeOffset)
    );
    assert_eq!(
        DateTime::from_slice(b"1979-05-27T00:32:00+00:60"),
        Err(InvalidTimeOffset)
    );
    assert_eq!(
        DateTime::from_slice(b"1979-05-27T00:32:00+0000"),
        Err(InvalidTimeOffset)
    );
    assert_eq!(
        DateTime::from_slice(b"1979-05-27T00:32:00Zx"),
        Err(InvalidTimeOffset)
    );
}

#[test]
fn datetime_with_fraction_and_offset() {
    let dt = datetime_ok("2000-12-17T00:32:00.5-07:00");
    assert_eq!(dt.time.nanosecond, 500_000_000);
    assert_eq!(dt.offset, Some(TimeOffset::Custom { minutes: -420 }));
}

#[test]
fn display_roundtrip() {
    for input in [
        "1979-05-27T07:32:00Z",
        "1979-05-27T07:32:00",
        "1979-05-27T00:32:00-07:00",
        "1979-05-27T00:32:00.999999+21:20",
        "1979-05-27T07:32:00.5",
        "1979-05-27T07:32:00.123456789",
    ] {
        assert_eq!(datetime_ok(input).to_string(), input);
    }
    assert_eq!(date_ok("1979-05-27").to_string(), "1979-05-27");
    assert_eq!(time_ok("07:32:00").to_string(), "07:32:00");
    assert_eq!(time_ok("00:32:00.5").to_string(), "00:32:00.5");
}

#[test]
fn display_normalizes_variants() {
    // Lowercase separators and space print as uppercase T.
    assert_eq!(
        datetime_ok("1987-07-05t17:45:00z").to_string(),
        "1987-07-05T17:45:00Z"
    );
    assert_eq!(
        datetime_ok("1987-07-05 17:45:00").to_string(),
        "1987-07-05T17:45:00"
    );
    // Trailing zeros in the fraction are trimmed.
    assert_eq!(time_ok("00:00:00.500").to_string(), "00:00:00.5");
}

#[test]
fn shape_detection() {
    assert!(looks_like_date(b"1979-05-27"));
    assert!(looks_like_date(b"1979-05-27T07:32:00"));
    assert!(!looks_like_date(b"1979"));
    assert!(!looks_like_date(b"19790527"));
    assert!(looks_like_time(b"07:32"));
    assert!(looks_like_time(b"07:32:00"));
    assert!(!looks_like_time(b"0732"));
    assert!(!looks_like_time(b"7:32"));
}
