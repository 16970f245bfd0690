use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{AirQualityDataset, DayType, Record, Season};

// ---------------------------------------------------------------------------
// Filter criteria: one independent constraint per dimension
// ---------------------------------------------------------------------------

/// The user's current selection. A record passes when it satisfies every
/// constraint at once.
///
/// Ranges are inclusive on both ends. An empty set for a categorical
/// constraint selects nothing, it does not disable the constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub years: BTreeSet<i32>,
    pub stations: BTreeSet<String>,
    /// Hours of day, clamped to `0..=23`.
    pub hour_from: u32,
    pub hour_to: u32,
    pub pm25_min: f64,
    pub pm25_max: f64,
    pub day_types: BTreeSet<DayType>,
    pub seasons: BTreeSet<Season>,
}

impl FilterCriteria {
    /// Criteria that keep every record with a PM2.5 reading.
    pub fn unrestricted(dataset: &AirQualityDataset) -> Self {
        let (date_from, date_to) = dataset
            .date_bounds
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        let (pm25_min, pm25_max) = dataset.pm25_bounds.unwrap_or((0.0, 0.0));

        FilterCriteria {
            date_from,
            date_to,
            years: dataset.years.clone(),
            stations: dataset.stations.clone(),
            hour_from: 0,
            hour_to: 23,
            pm25_min,
            pm25_max,
            day_types: DayType::ALL.into_iter().collect(),
            seasons: Season::ALL.into_iter().collect(),
        }
    }

    /// Whether `record` satisfies every constraint.
    ///
    /// A record without a PM2.5 reading never falls inside the PM2.5 range.
    pub fn matches(&self, record: &Record) -> bool {
        let cal = &record.calendar;
        let hour_to = self.hour_to.min(23);

        self.years.contains(&cal.year)
            && self.stations.contains(record.station())
            && cal.date >= self.date_from
            && cal.date <= self.date_to
            && cal.hour >= self.hour_from
            && cal.hour <= hour_to
            && record
                .pm2_5()
                .is_some_and(|v| v >= self.pm25_min && v <= self.pm25_max)
            && self.day_types.contains(&cal.day_type)
            && self.seasons.contains(&cal.season)
    }
}

// ---------------------------------------------------------------------------
// Applying the criteria
// ---------------------------------------------------------------------------

/// Return the records that pass `criteria`, preserving their relative order.
///
/// Accepts any iterator of record references, so a previous result can be
/// filtered again.
pub fn apply_filters<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|rec| criteria.matches(rec))
        .collect()
}

/// Return indices of records that pass `criteria`.
pub fn filtered_indices(records: &[Record], criteria: &FilterCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
