//! Partitioning of observations by date and province.

use crate::types::aggregates::ProvinceGroup;
use crate::types::observation::Observation;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Partitions `records` by date.
///
/// Each group keeps its members in input order. The map iterates dates in ascending
/// order, though callers comparing groups should not depend on it.
pub fn group_by_date<'a, I>(records: I) -> BTreeMap<NaiveDate, Vec<&'a Observation>>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut groups: BTreeMap<NaiveDate, Vec<&'a Observation>> = BTreeMap::new();
    for record in records {
        groups.entry(record.date).or_default().push(record);
    }
    groups
}

/// Builds the grouped view: one [`ProvinceGroup`] per date and province present in `records`.
///
/// Dates come out ascending; within a date, provinces appear in the order they were
/// first seen. Province names are compared exactly.
pub fn group_by_date_then_province<'a, I>(records: I) -> Vec<ProvinceGroup<'a>>
where
    I: IntoIterator<Item = &'a Observation>,
{
    group_by_date(records)
        .into_iter()
        .flat_map(|(date, day)| {
            let mut provinces: Vec<ProvinceGroup<'a>> = Vec::new();
            for record in day {
                match provinces
                    .iter_mut()
                    .find(|group| group.province == record.province)
                {
                    Some(group) => group.records.push(record),
                    None => provinces.push(ProvinceGroup {
                        date,
                        province: &record.province,
                        records: vec![record],
                    }),
                }
            }
            provinces
        })
        .collect()
}

/// Keeps the records whose province equals `province`, ignoring case.
///
/// The whole string must match: `"zaragoza"` selects `"Zaragoza"` but `"Zara"` selects nothing.
pub fn filter_by_province<'a, I>(records: I, province: &str) -> Vec<&'a Observation>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let wanted = province.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.province.to_lowercase() == wanted)
        .collect()
}

/// [`filter_by_province`] followed by [`group_by_date`].
pub fn group_by_province<'a, I>(
    records: I,
    province: &str,
) -> BTreeMap<NaiveDate, Vec<&'a Observation>>
where
    I: IntoIterator<Item = &'a Observation>,
{
    group_by_date(filter_by_province(records, province))
}
