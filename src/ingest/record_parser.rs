//! Turns the fields of one data line into an [`Observation`].
//!
//! Lines are laid out as
//! `location;province;maxTemperature;maxTemperatureTime;minTemperature;minTemperatureTime;precipitation`,
//! e.g. `Leciñena;Zaragoza;14.2;15:40;-1.3;7:10;0.0`.

use crate::ingest::encoding::recode_field;
use crate::ingest::error::{MalformedReason, MalformedRecordError, RecordField};
use crate::types::observation::Observation;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

/// Number of fields a data line must provide.
pub const FIELD_COUNT: usize = RecordField::ORDER.len();

/// Builds an [`Observation`] from the `;`-separated `fields` of `line`.
///
/// `date` comes from the file name and `id` from the caller, so the parser itself is
/// deterministic. Fields past the seventh are ignored.
///
/// # Errors
///
/// Returns a [`MalformedRecordError`] naming the first field that is missing, is not
/// a finite decimal number, or is not an `H:mm` time.
pub fn parse_record(
    fields: &[&str],
    date: NaiveDate,
    id: Uuid,
    line: &str,
) -> Result<Observation, MalformedRecordError> {
    let location = recode_field(field(fields, RecordField::Location, line)?).into_owned();
    let province = recode_field(field(fields, RecordField::Province, line)?).into_owned();

    Ok(Observation::builder()
        .id(id)
        .date(date)
        .location(location)
        .province(province)
        .max_temperature(number(fields, RecordField::MaxTemperature, line)?)
        .maybe_max_temperature_time(time(fields, RecordField::MaxTemperatureTime, line)?)
        .min_temperature(number(fields, RecordField::MinTemperature, line)?)
        .maybe_min_temperature_time(time(fields, RecordField::MinTemperatureTime, line)?)
        .precipitation(number(fields, RecordField::Precipitation, line)?)
        .build())
}

/// Parses a time of day written as `H:mm`: one or two hour digits, exactly two minute digits.
///
/// Returns `None` when the text is not such a time.
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let (hour, minute) = text.split_once(':')?;
    let hour_ok = (1..=2).contains(&hour.len()) && hour.bytes().all(|b| b.is_ascii_digit());
    let minute_ok = minute.len() == 2 && minute.bytes().all(|b| b.is_ascii_digit());
    if !hour_ok || !minute_ok {
        return None;
    }
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

fn field<'a>(
    fields: &[&'a str],
    which: RecordField,
    line: &str,
) -> Result<&'a str, MalformedRecordError> {
    fields
        .get(which.column())
        .copied()
        .map(str::trim)
        .ok_or_else(|| malformed(which, "", line, MalformedReason::Missing))
}

fn number(fields: &[&str], which: RecordField, line: &str) -> Result<f64, MalformedRecordError> {
    let raw = field(fields, which, line)?;
    let value: f64 = raw
        .parse()
        .map_err(|_| malformed(which, raw, line, MalformedReason::InvalidNumber))?;
    if !value.is_finite() {
        return Err(malformed(which, raw, line, MalformedReason::NonFiniteNumber));
    }
    Ok(value)
}

fn time(
    fields: &[&str],
    which: RecordField,
    line: &str,
) -> Result<Option<NaiveTime>, MalformedRecordError> {
    let raw = field(fields, which, line)?;
    if raw.is_empty() {
        return Ok(None);
    }
    parse_time_of_day(raw)
        .map(Some)
        .ok_or_else(|| malformed(which, raw, line, MalformedReason::InvalidTime))
}

fn malformed(
    field: RecordField,
    value: &str,
    line: &str,
    reason: MalformedReason,
) -> MalformedRecordError {
    MalformedRecordError {
        field,
        value: value.to_string(),
        line: line.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 2, 9).unwrap()
    }

    fn parse(line: &str) -> Result<Observation, MalformedRecordError> {
        let fields: Vec<&str> = line.split(';').collect();
        parse_record(&fields, date(), Uuid::from_u128(1), line)
    }

    #[test]
    fn test_parses_a_complete_line() -> Result<(), MalformedRecordError> {
        let observation = parse("Leciñena;Zaragoza;14.2;15:40;-1.3;7:10;0.6")?;

        assert_eq!(observation.id, Uuid::from_u128(1));
        assert_eq!(observation.date, date());
        assert_eq!(observation.location, "Leciñena");
        assert_eq!(observation.province, "Zaragoza");
        assert_eq!(observation.max_temperature, 14.2);
        assert_eq!(
            observation.max_temperature_time,
            NaiveTime::from_hms_opt(15, 40, 0)
        );
        assert_eq!(observation.min_temperature, -1.3);
        assert_eq!(
            observation.min_temperature_time,
            NaiveTime::from_hms_opt(7, 10, 0)
        );
        assert_eq!(observation.precipitation, 0.6);
        Ok(())
    }

    #[test]
    fn test_blank_times_are_absent() -> Result<(), MalformedRecordError> {
        let observation = parse("Ayerbe;Huesca;12.0;;1.0; ;0.0")?;
        assert_eq!(observation.max_temperature_time, None);
        assert_eq!(observation.min_temperature_time, None);
        Ok(())
    }

    #[test]
    fn test_location_and_province_are_recoded() -> Result<(), MalformedRecordError> {
        let observation = parse("LeciÃ±ena;MÃ¡laga;1.0;9:00;0.0;6:00;0.0")?;
        assert_eq!(observation.location, "Leciñena");
        assert_eq!(observation.province, "Málaga");
        Ok(())
    }

    #[test]
    fn test_comma_decimal_is_rejected() {
        let line = "Ayerbe;Huesca;12,5;15:00;1.0;6:00;0.0";
        let err = parse(line).unwrap_err();
        assert_eq!(err.field, RecordField::MaxTemperature);
        assert_eq!(err.value, "12,5");
        assert_eq!(err.line, line);
        assert_eq!(err.reason, MalformedReason::InvalidNumber);
    }

    #[test]
    fn test_non_finite_number_is_rejected() {
        let err = parse("Ayerbe;Huesca;12.5;15:00;1.0;6:00;NaN").unwrap_err();
        assert_eq!(err.field, RecordField::Precipitation);
        assert_eq!(err.reason, MalformedReason::NonFiniteNumber);
    }

    #[test]
    fn test_bad_time_is_rejected() {
        let err = parse("Ayerbe;Huesca;12.5;3pm;1.0;6:00;0.0").unwrap_err();
        assert_eq!(err.field, RecordField::MaxTemperatureTime);
        assert_eq!(err.reason, MalformedReason::InvalidTime);
    }

    #[test]
    fn test_missing_field_is_reported() {
        let err = parse("Ayerbe;Huesca;12.5;15:00;1.0;6:00").unwrap_err();
        assert_eq!(err.field, RecordField::Precipitation);
        assert_eq!(err.reason, MalformedReason::Missing);
    }

    #[test]
    fn test_extra_fields_are_ignored() -> Result<(), MalformedRecordError> {
        let observation = parse("Ayerbe;Huesca;12.5;15:00;1.0;6:00;0.2;extra")?;
        assert_eq!(observation.precipitation, 0.2);
        Ok(())
    }

    #[test]
    fn test_time_pattern_allows_single_digit_hours() {
        assert_eq!(parse_time_of_day("9:15"), NaiveTime::from_hms_opt(9, 15, 0));
        assert_eq!(parse_time_of_day("09:15"), NaiveTime::from_hms_opt(9, 15, 0));
        assert_eq!(parse_time_of_day("23:59"), NaiveTime::from_hms_opt(23, 59, 0));
        assert_eq!(parse_time_of_day("0:00"), NaiveTime::from_hms_opt(0, 0, 0));
    }

    #[test]
    fn test_time_pattern_rejects_other_shapes() {
        for text in ["9:5", "009:15", "24:00", "12:60", "12", "12:3a", ":15", "-1:15", "12:15:00"] {
            assert_eq!(parse_time_of_day(text), None, "'{}' should not parse", text);
        }
    }
}
