//! Extremum and mean selection over observations.
//!
//! Several stations often share an extreme value, so the tie-break matters: every
//! selector here keeps the *first* record, in input order, that holds the extreme.
//! Note that `Iterator::max_by` would keep the last one.

use crate::types::observation::Observation;
use ordered_float::OrderedFloat;

/// Returns the record with the greatest `key`, or `None` for empty input.
///
/// On ties the earliest record wins. Keys are compared as [`OrderedFloat`], so NaN
/// counts as greater than every number.
pub fn max_by<'a, I, F>(records: I, key: F) -> Option<&'a Observation>
where
    I: IntoIterator<Item = &'a Observation>,
    F: Fn(&Observation) -> f64,
{
    select_first(records, key, |candidate, best| candidate > best)
}

/// Returns the record with the smallest `key`, or `None` for empty input.
///
/// On ties the earliest record wins.
pub fn min_by<'a, I, F>(records: I, key: F) -> Option<&'a Observation>
where
    I: IntoIterator<Item = &'a Observation>,
    F: Fn(&Observation) -> f64,
{
    select_first(records, key, |candidate, best| candidate < best)
}

/// Arithmetic mean of `key` over `records`; `0.0` when there are none.
pub fn average<'a, I, F>(records: I, key: F) -> f64
where
    I: IntoIterator<Item = &'a Observation>,
    F: Fn(&Observation) -> f64,
{
    let (sum, count) = records
        .into_iter()
        .fold((0.0_f64, 0usize), |(sum, count), record| {
            (sum + key(record), count + 1)
        });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// Replaces the current best only when `better` holds strictly, which keeps the
// first of several equal keys.
fn select_first<'a, I, F, B>(records: I, key: F, better: B) -> Option<&'a Observation>
where
    I: IntoIterator<Item = &'a Observation>,
    F: Fn(&Observation) -> f64,
    B: Fn(OrderedFloat<f64>, OrderedFloat<f64>) -> bool,
{
    let mut best: Option<(&'a Observation, OrderedFloat<f64>)> = None;
    for record in records {
        let value = OrderedFloat(key(record));
        match best {
            Some((_, best_value)) if !better(value, best_value) => {}
            _ => best = Some((record, value)),
        }
    }
    best.map(|(record, _)| record)
}
