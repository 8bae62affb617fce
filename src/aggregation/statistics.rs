//! Day-level and province-day-level statistics, plus dataset-wide helpers.

use crate::aggregation::extrema::{average, max_by, min_by};
use crate::aggregation::grouping::{group_by_date, group_by_province};
use crate::types::aggregates::{DayAggregate, ProvinceDayAggregate};
use crate::types::observation::Observation;
use chrono::NaiveDate;

/// Extremes of one day's group of records.
pub fn day_aggregate<'a>(date: NaiveDate, group: &[&'a Observation]) -> DayAggregate<'a> {
    let records = || group.iter().copied();
    DayAggregate {
        date,
        max_temperature: max_by(records(), |r| r.max_temperature),
        min_temperature: min_by(records(), |r| r.min_temperature),
        max_precipitation: max_by(records(), |r| r.precipitation),
    }
}

/// One [`DayAggregate`] per date present in `records`, dates ascending.
pub fn daily_aggregates<'a, I>(records: I) -> Vec<DayAggregate<'a>>
where
    I: IntoIterator<Item = &'a Observation>,
{
    group_by_date(records)
        .iter()
        .map(|(date, group)| day_aggregate(*date, group))
        .collect()
}

/// Extremes and averages of one province's records on one day.
pub fn province_day_aggregate<'a>(
    date: NaiveDate,
    province: &str,
    group: &[&'a Observation],
) -> ProvinceDayAggregate<'a> {
    let records = || group.iter().copied();
    ProvinceDayAggregate {
        date,
        province: province.to_string(),
        max_temperature: max_by(records(), |r| r.max_temperature),
        min_temperature: min_by(records(), |r| r.min_temperature),
        avg_max_temperature: average(records(), |r| r.max_temperature),
        avg_min_temperature: average(records(), |r| r.min_temperature),
        max_precipitation: max_by(records(), |r| r.precipitation),
        avg_precipitation: average(records(), |r| r.precipitation),
    }
}

/// Daily report for a single province, matched case-insensitively. Dates ascending.
pub fn province_daily_aggregates<'a, I>(records: I, province: &str) -> Vec<ProvinceDayAggregate<'a>>
where
    I: IntoIterator<Item = &'a Observation>,
{
    group_by_province(records, province)
        .iter()
        .map(|(date, group)| province_day_aggregate(*date, province, group))
        .collect()
}

/// The record with the highest precipitation in the whole input; the first one on ties.
pub fn max_precipitation_record<'a, I>(records: I) -> Option<&'a Observation>
where
    I: IntoIterator<Item = &'a Observation>,
{
    max_by(records, |r| r.precipitation)
}

/// Locations of every record with precipitation above zero, in input order.
///
/// A location that rained on several days is listed once per record.
pub fn with_precipitation<'a, I>(records: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Observation>,
{
    records
        .into_iter()
        .filter(|record| record.precipitation > 0.0)
        .map(|record| record.location.as_str())
        .collect()
}

/// Highest `max_temperature` value, or `0.0` for no records.
pub fn max_temperature_value<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a Observation>,
{
    max_by(records, |r| r.max_temperature).map_or(0.0, |r| r.max_temperature)
}

/// Lowest `min_temperature` value, or `0.0` for no records.
pub fn min_temperature_value<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a Observation>,
{
    min_by(records, |r| r.min_temperature).map_or(0.0, |r| r.min_temperature)
}

/// Mean precipitation, or `0.0` for no records.
pub fn average_precipitation<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a Observation>,
{
    average(records, |r| r.precipitation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 2, d).unwrap()
    }

    fn obs(d: u32, location: &str, province: &str, max: f64, min: f64, rain: f64) -> Observation {
        Observation::builder()
            .date(day(d))
            .location(location)
            .province(province)
            .max_temperature(max)
            .min_temperature(min)
            .precipitation(rain)
            .build()
    }

    fn rain(location: &str, precipitation: f64) -> Observation {
        obs(1, location, "Zaragoza", 10.0, 0.0, precipitation)
    }

    fn location(record: Option<&Observation>) -> Option<&str> {
        record.map(|r| r.location.as_str())
    }

    fn sample() -> Vec<Observation> {
        vec![
            obs(9, "Leciñena", "Zaragoza", 14.2, -1.3, 0.0),
            obs(9, "Caspe", "Zaragoza", 16.8, 2.1, 1.4),
            obs(9, "Ayerbe", "Huesca", 16.8, -4.0, 1.4),
            obs(10, "Leciñena", "Zaragoza", 11.0, 0.5, 3.2),
            obs(10, "Ayerbe", "Huesca", 9.5, -2.5, 0.0),
        ]
    }

    #[test]
    fn test_with_precipitation_keeps_order_and_strictly_positive() {
        let records = vec![rain("A", 0.0), rain("B", 1.2), rain("C", 0.0), rain("D", 3.0)];
        assert_eq!(with_precipitation(&records), ["B", "D"]);
    }

    #[test]
    fn test_with_precipitation_keeps_duplicates() {
        let records = vec![rain("A", 0.1), rain("B", 0.0), rain("A", 2.0)];
        assert_eq!(with_precipitation(&records), ["A", "A"]);
    }

    #[test]
    fn test_max_precipitation_record() {
        let empty: Vec<Observation> = Vec::new();
        assert!(max_precipitation_record(&empty).is_none());

        let dry = vec![rain("X", 0.0), rain("Y", 0.0)];
        assert_eq!(location(max_precipitation_record(&dry)), Some("X"));

        assert_eq!(location(max_precipitation_record(&sample())), Some("Leciñena"));
    }

    #[test]
    fn test_day_aggregate_picks_holders_with_first_on_ties() {
        let records = sample();
        let group: Vec<&Observation> = records.iter().filter(|r| r.date == day(9)).collect();
        let aggregate = day_aggregate(day(9), &group);

        assert_eq!(aggregate.date, day(9));
        assert_eq!(location(aggregate.max_temperature), Some("Caspe"));
        assert_eq!(location(aggregate.min_temperature), Some("Ayerbe"));
        assert_eq!(location(aggregate.max_precipitation), Some("Caspe"));
    }

    #[test]
    fn test_day_aggregate_of_empty_group() {
        let aggregate = day_aggregate(day(1), &[]);
        assert!(aggregate.max_temperature.is_none());
        assert!(aggregate.min_temperature.is_none());
        assert!(aggregate.max_precipitation.is_none());
    }

    #[test]
    fn test_daily_aggregates_cover_every_date() {
        let records = sample();
        let aggregates = daily_aggregates(&records);

        let dates: Vec<NaiveDate> = aggregates.iter().map(|a| a.date).collect();
        assert_eq!(dates, [day(9), day(10)]);
        assert_eq!(location(aggregates[1].max_temperature), Some("Leciñena"));
        assert_eq!(location(aggregates[1].min_temperature), Some("Ayerbe"));
    }

    #[test]
    fn test_province_day_aggregate_averages() {
        let records = sample();
        let aggregates = province_daily_aggregates(&records, "zaragoza");

        assert_eq!(aggregates.len(), 2);
        let first = &aggregates[0];
        assert_eq!(first.date, day(9));
        assert_eq!(first.province, "zaragoza");
        assert_eq!(location(first.max_temperature), Some("Caspe"));
        assert_eq!(location(first.min_temperature), Some("Leciñena"));
        assert!((first.avg_max_temperature - 15.5).abs() < 1e-9);
        assert!((first.avg_min_temperature - 0.4).abs() < 1e-9);
        assert!((first.avg_precipitation - 0.7).abs() < 1e-9);

        let second = &aggregates[1];
        assert_eq!(location(second.max_precipitation), Some("Leciñena"));
        assert!((second.avg_precipitation - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_min_temperature_holder_is_chosen_on_min_temperature() {
        // Highest max but lowest min: a max-based selection would pick "Warm".
        let records = vec![
            obs(1, "Warm", "Teruel", 20.0, 5.0, 0.0),
            obs(1, "Cold", "Teruel", 10.0, -8.0, 0.0),
        ];
        let aggregates = province_daily_aggregates(&records, "Teruel");
        assert_eq!(location(aggregates[0].min_temperature), Some("Cold"));
    }

    #[test]
    fn test_province_daily_aggregates_for_unknown_province() {
        assert!(province_daily_aggregates(&sample(), "Teruel").is_empty());
    }

    #[test]
    fn test_scalar_helpers() {
        let records = sample();
        assert_eq!(max_temperature_value(&records), 16.8);
        assert_eq!(min_temperature_value(&records), -4.0);
        assert!((average_precipitation(&records) - 1.2).abs() < 1e-9);

        let empty: Vec<Observation> = Vec::new();
        assert_eq!(max_temperature_value(&empty), 0.0);
        assert_eq!(min_temperature_value(&empty), 0.0);
        assert_eq!(average_precipitation(&empty), 0.0);
    }
}
