/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  timestamp → month, year, date, weekday, hour, season …
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ AirQualityDataset │  Vec<Record>, Schema, filter domains
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → order-preserving view
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  view → monthly/station/season/year tables, extremes, map
///   └───────────┘
/// ```

pub mod aggregate;
pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stations;
pub mod stats;
