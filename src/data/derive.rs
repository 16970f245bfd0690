use chrono::{Datelike, Timelike};

use super::model::{CalendarAttributes, DayType, RawRecord, Record, Season, TimePeriod};

/// Compute the calendar attributes of a single timestamp.
pub fn calendar_attributes(raw: &RawRecord) -> CalendarAttributes {
    let ts = raw.timestamp;
    let month = ts.month();
    let day_of_week = ts.weekday().num_days_from_monday();
    let hour = ts.hour();

    CalendarAttributes {
        month,
        year: ts.year(),
        date: ts.date(),
        day_of_week,
        day_type: DayType::from_day_of_week(day_of_week),
        hour,
        time_period: TimePeriod::from_hour(hour),
        season: Season::from_month(month),
    }
}

/// Augment raw readings with their calendar attributes. Order is preserved.
pub fn derive_attributes(raw_records: Vec<RawRecord>) -> Vec<Record> {
    raw_records
        .into_iter()
        .map(|raw| {
            let calendar = calendar_attributes(&raw);
            Record { raw, calendar }
        })
        .collect()
}
