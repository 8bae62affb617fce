//! Defines the [`Observation`] record: one station's weather summary for a single day.

use bon::Builder;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single station's daily observation, as read from one line of a daily data file.
///
/// Observations are plain values. They are never mutated in place once built; an
/// update is expressed by building a replacement that carries the same [`id`](Self::id).
///
/// Build one with [`Observation::builder`]. When no id is supplied, a random v4 UUID
/// is assigned.
///
/// # Examples
///
/// ```
/// use aemet_stats::Observation;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2017, 2, 9).unwrap();
/// let observation = Observation::builder()
///     .date(date)
///     .location("Leciñena")
///     .province("Zaragoza")
///     .max_temperature(14.2)
///     .max_temperature_time(NaiveTime::from_hms_opt(15, 40, 0).unwrap())
///     .min_temperature(-1.3)
///     .precipitation(0.0)
///     .build();
///
/// assert_eq!(observation.province, "Zaragoza");
/// assert!(observation.min_temperature_time.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Unique identifier, assigned once when the record is created.
    #[builder(default = Uuid::new_v4())]
    pub id: Uuid,
    /// Day the observation refers to. Shared by every record of the same source file.
    pub date: NaiveDate,
    /// Station or locality name.
    #[builder(into)]
    pub location: String,
    /// Administrative region (province) the station belongs to.
    #[builder(into)]
    pub province: String,
    /// Maximum temperature of the day, in degrees Celsius.
    pub max_temperature: f64,
    /// Time of day the maximum was reached, if reported.
    pub max_temperature_time: Option<NaiveTime>,
    /// Minimum temperature of the day, in degrees Celsius.
    pub min_temperature: f64,
    /// Time of day the minimum was reached, if reported.
    pub min_temperature_time: Option<NaiveTime>,
    /// Total precipitation in millimeters.
    pub precipitation: f64,
}

impl Observation {
    /// Returns a copy of this observation carrying `id` instead of its own identifier.
    ///
    /// Used by repositories to build the replacement record of an update.
    pub fn with_id(&self, id: Uuid) -> Observation {
        Observation {
            id,
            ..self.clone()
        }
    }
}
