//! Plain-text rendering of aggregates for terminal output.

use crate::aggregation::dataset::Dataset;
use crate::types::aggregates::{DayAggregate, ProvinceDayAggregate, ProvinceGroup};
use crate::types::observation::Observation;
use chrono::NaiveTime;
use std::fmt;

fn holder(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    record: Option<&Observation>,
    value: fn(&Observation) -> (f64, Option<NaiveTime>),
    unit: &str,
) -> fmt::Result {
    let Some(record) = record else {
        return writeln!(f, "  {}: n/a", label);
    };
    let (amount, time) = value(record);
    write!(
        f,
        "  {}: {:.1} {} at {} ({})",
        label, amount, unit, record.location, record.province
    )?;
    match time {
        Some(time) => writeln!(f, ", {}", time.format("%H:%M")),
        None => writeln!(f),
    }
}

fn max_temperature(r: &Observation) -> (f64, Option<NaiveTime>) {
    (r.max_temperature, r.max_temperature_time)
}

fn min_temperature(r: &Observation) -> (f64, Option<NaiveTime>) {
    (r.min_temperature, r.min_temperature_time)
}

fn precipitation(r: &Observation) -> (f64, Option<NaiveTime>) {
    (r.precipitation, None)
}

impl fmt::Display for DayAggregate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        holder(f, "max temperature", self.max_temperature, max_temperature, "°C")?;
        holder(f, "min temperature", self.min_temperature, min_temperature, "°C")?;
        holder(f, "max precipitation", self.max_precipitation, precipitation, "mm")
    }
}

impl fmt::Display for ProvinceDayAggregate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.date, self.province)?;
        holder(f, "max temperature", self.max_temperature, max_temperature, "°C")?;
        writeln!(f, "  avg max temperature: {:.1} °C", self.avg_max_temperature)?;
        holder(f, "min temperature", self.min_temperature, min_temperature, "°C")?;
        writeln!(f, "  avg min temperature: {:.1} °C", self.avg_min_temperature)?;
        holder(f, "max precipitation", self.max_precipitation, precipitation, "mm")?;
        writeln!(f, "  avg precipitation: {:.1} mm", self.avg_precipitation)
    }
}

impl fmt::Display for ProvinceGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locations: Vec<&str> = self.records.iter().map(|r| r.location.as_str()).collect();
        write!(
            f,
            "{} {}: {} station(s) [{}]",
            self.date,
            self.province,
            self.records.len(),
            locations.join(", ")
        )
    }
}

/// Dataset-wide figures: the wettest record, temperature extremes, mean precipitation and
/// every location that had rain (once per rainy record, in input order).
pub fn format_overview(dataset: &Dataset) -> String {
    let mut out = String::new();
    out.push_str(&format!("Observations: {}\n", dataset.len()));
    match dataset.max_precipitation_record() {
        Some(record) => out.push_str(&format!(
            "Maximum precipitation: {:.1} mm at {} ({}) on {}\n",
            record.precipitation, record.location, record.province, record.date
        )),
        None => out.push_str("Maximum precipitation: n/a\n"),
    }
    out.push_str(&format!(
        "Highest maximum temperature: {:.1} °C\n",
        dataset.max_temperature_value()
    ));
    out.push_str(&format!(
        "Lowest minimum temperature: {:.1} °C\n",
        dataset.min_temperature_value()
    ));
    out.push_str(&format!(
        "Average precipitation: {:.2} mm\n",
        dataset.average_precipitation()
    ));
    let rainy = dataset.with_precipitation();
    if rainy.is_empty() {
        out.push_str("Locations with precipitation: none\n");
    } else {
        out.push_str(&format!(
            "Locations with precipitation ({}): {}\n",
            rainy.len(),
            rainy.join(", ")
        ));
    }
    out
}
