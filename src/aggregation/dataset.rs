use crate::aggregation::{extrema, grouping, statistics};
use crate::types::aggregates::{DayAggregate, ProvinceDayAggregate, ProvinceGroup};
use crate::types::observation::Observation;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// An owned, immutable set of observations that aggregation results can borrow from.
///
/// Usually obtained from [`crate::MeteoService::load_dataset`], but any `Vec<Observation>`
/// converts into one.
///
/// # Examples
///
/// ```
/// use aemet_stats::{Dataset, Observation};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2017, 2, 9).unwrap();
/// let dataset = Dataset::from(vec![
///     Observation::builder()
///         .date(date)
///         .location("Caspe")
///         .province("Zaragoza")
///         .max_temperature(16.8)
///         .min_temperature(2.1)
///         .precipitation(1.4)
///         .build(),
/// ]);
///
/// let wettest = dataset.max_precipitation_record().unwrap();
/// assert_eq!(wettest.location, "Caspe");
/// assert_eq!(dataset.with_precipitation(), ["Caspe"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Observation>,
}

impl From<Vec<Observation>> for Dataset {
    fn from(records: Vec<Observation>) -> Self {
        Self { records }
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Dataset {
    pub fn records(&self) -> &[Observation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Observation> {
        self.records
    }

    pub fn max_by<F: Fn(&Observation) -> f64>(&self, key: F) -> Option<&Observation> {
        extrema::max_by(&self.records, key)
    }

    pub fn min_by<F: Fn(&Observation) -> f64>(&self, key: F) -> Option<&Observation> {
        extrema::min_by(&self.records, key)
    }

    pub fn average<F: Fn(&Observation) -> f64>(&self, key: F) -> f64 {
        extrema::average(&self.records, key)
    }

    pub fn group_by_date(&self) -> BTreeMap<NaiveDate, Vec<&Observation>> {
        grouping::group_by_date(&self.records)
    }

    pub fn group_by_date_then_province(&self) -> Vec<ProvinceGroup<'_>> {
        grouping::group_by_date_then_province(&self.records)
    }

    pub fn filter_by_province(&self, province: &str) -> Vec<&Observation> {
        grouping::filter_by_province(&self.records, province)
    }

    pub fn group_by_province(&self, province: &str) -> BTreeMap<NaiveDate, Vec<&Observation>> {
        grouping::group_by_province(&self.records, province)
    }

    pub fn daily_aggregates(&self) -> Vec<DayAggregate<'_>> {
        statistics::daily_aggregates(&self.records)
    }

    pub fn province_daily_aggregates(&self, province: &str) -> Vec<ProvinceDayAggregate<'_>> {
        statistics::province_daily_aggregates(&self.records, province)
    }

    pub fn max_precipitation_record(&self) -> Option<&Observation> {
        statistics::max_precipitation_record(&self.records)
    }

    pub fn with_precipitation(&self) -> Vec<&str> {
        statistics::with_precipitation(&self.records)
    }

    pub fn max_temperature_value(&self) -> f64 {
        statistics::max_temperature_value(&self.records)
    }

    pub fn min_temperature_value(&self) -> f64 {
        statistics::min_temperature_value(&self.records)
    }

    pub fn average_precipitation(&self) -> f64 {
        statistics::average_precipitation(&self.records)
    }
}
