//! Derived, on-demand statistics computed over groups of [`Observation`]s.
//!
//! None of these types are persisted. They borrow the observations they point at,
//! so they live only as long as the slice (or [`crate::Dataset`]) they were computed from.

use crate::types::observation::Observation;
use chrono::NaiveDate;

/// Extremes of a single day across every station.
///
/// Each holder is `None` only when the day's group is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAggregate<'a> {
    pub date: NaiveDate,
    /// Record with the highest maximum temperature.
    pub max_temperature: Option<&'a Observation>,
    /// Record with the lowest minimum temperature.
    pub min_temperature: Option<&'a Observation>,
    /// Record with the highest precipitation.
    pub max_precipitation: Option<&'a Observation>,
}

/// Extremes and averages for one province on one day.
///
/// All values are computed over exactly the records matching `date` and `province`.
/// Averages are `0.0` for an empty group.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceDayAggregate<'a> {
    pub date: NaiveDate,
    pub province: String,
    pub max_temperature: Option<&'a Observation>,
    pub min_temperature: Option<&'a Observation>,
    /// Mean of `max_temperature` over the group.
    pub avg_max_temperature: f64,
    /// Mean of `min_temperature` over the group.
    pub avg_min_temperature: f64,
    pub max_precipitation: Option<&'a Observation>,
    pub avg_precipitation: f64,
}

/// One entry of the grouped view: every record sharing a date and a province.
///
/// Records keep the order they had in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceGroup<'a> {
    pub date: NaiveDate,
    pub province: &'a str,
    pub records: Vec<&'a Observation>,
}
