use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Pollutant – the six measured species
// ---------------------------------------------------------------------------

/// The pollutants every row carries. `TEMP` is not a pollutant and lives
/// outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
    So2,
    No2,
    Co,
    O3,
}

impl Pollutant {
    /// All pollutants in column order.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Column name as it appears in the CSV header.
    pub fn column(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one parsed row
// ---------------------------------------------------------------------------

/// A single sensor reading exactly as loaded. Numeric fields are `None`
/// when the cell was empty or `NA`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub timestamp: NaiveDateTime,
    pub station: String,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub so2: Option<f64>,
    pub no2: Option<f64>,
    pub co: Option<f64>,
    pub o3: Option<f64>,
    /// Always `None` when the dataset has no `TEMP` column; see [`Schema`].
    pub temp: Option<f64>,
}

impl RawRecord {
    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm25 => self.pm2_5,
            Pollutant::Pm10 => self.pm10,
            Pollutant::So2 => self.so2,
            Pollutant::No2 => self.no2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived categorical attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub const ALL: [DayType; 2] = [DayType::Weekday, DayType::Weekend];

    /// `day_of_week` uses Monday = 0 … Sunday = 6.
    pub fn from_day_of_week(day_of_week: u32) -> Self {
        if day_of_week >= 5 {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimePeriod {
    RushHour,
    NonRushHour,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 2] = [TimePeriod::RushHour, TimePeriod::NonRushHour];

    /// Rush hour is 07–10 and 17–20, both inclusive.
    pub fn from_hour(hour: u32) -> Self {
        if (7..=10).contains(&hour) || (17..=20).contains(&hour) {
            TimePeriod::RushHour
        } else {
            TimePeriod::NonRushHour
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimePeriod::RushHour => "Rush Hour",
            TimePeriod::NonRushHour => "Non Rush Hour",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Winter,
    Summer,
    Other,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Winter, Season::Summer, Season::Other];

    /// Winter is Dec/Jan/Feb, Summer is Jun/Jul/Aug, everything else is Other.
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            6..=8 => Season::Summer,
            _ => Season::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Summer => "Summer",
            Season::Other => "Other",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_via_label!(DayType, TimePeriod, Season);

// ---------------------------------------------------------------------------
// Record – a reading augmented with its calendar attributes
// ---------------------------------------------------------------------------

/// Attributes that depend only on the timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarAttributes {
    pub month: u32,
    pub year: i32,
    pub date: NaiveDate,
    /// Monday = 0 … Sunday = 6.
    pub day_of_week: u32,
    pub day_type: DayType,
    pub hour: u32,
    pub time_period: TimePeriod,
    pub season: Season,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub raw: RawRecord,
    pub calendar: CalendarAttributes,
}

impl Record {
    pub fn station(&self) -> &str {
        &self.raw.station
    }

    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        self.raw.value(pollutant)
    }

    pub fn pm2_5(&self) -> Option<f64> {
        self.raw.pm2_5
    }

    pub fn temp(&self) -> Option<f64> {
        self.raw.temp
    }
}

// ---------------------------------------------------------------------------
// Schema – which optional columns the source provided
// ---------------------------------------------------------------------------

/// Capabilities of the loaded dataset, recorded once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schema {
    /// Whether a `TEMP` column was present in the source.
    pub has_temp: bool,
}

// ---------------------------------------------------------------------------
// AirQualityDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full augmented dataset with pre-computed filter domains.
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct AirQualityDataset {
    pub records: Vec<Record>,
    pub schema: Schema,
    /// Sorted distinct years.
    pub years: BTreeSet<i32>,
    /// Sorted distinct station names.
    pub stations: BTreeSet<String>,
    /// Earliest and latest calendar date, `None` for an empty dataset.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
    /// Minimum and maximum non-null PM2.5.
    pub pm25_bounds: Option<(f64, f64)>,
}

impl AirQualityDataset {
    /// Build the option domains from already augmented records.
    pub fn from_records(records: Vec<Record>, schema: Schema) -> Self {
        let mut years = BTreeSet::new();
        let mut stations = BTreeSet::new();
        let mut date_bounds: Option<(NaiveDate, NaiveDate)> = None;
        let mut pm25_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            years.insert(rec.calendar.year);
            if !stations.contains(rec.station()) {
                stations.insert(rec.station().to_string());
            }

            let d = rec.calendar.date;
            date_bounds = Some(match date_bounds {
                Some((lo, hi)) => (lo.min(d), hi.max(d)),
                None => (d, d),
            });

            if let Some(v) = rec.pm2_5() {
                pm25_bounds = Some(match pm25_bounds {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }

        AirQualityDataset {
            records,
            schema,
            years,
            stations,
            date_bounds,
            pm25_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow the records at `indices`, in the given order.
    pub fn view(&self, indices: &[usize]) -> Vec<&Record> {
        indices.iter().filter_map(|&i| self.records.get(i)).collect()
    }
}
