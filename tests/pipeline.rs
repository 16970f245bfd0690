use std::io::Write;
use std::path::{Path, PathBuf};

use air_quality_dashboard::data::aggregate::{Aggregates, Metric};
use air_quality_dashboard::data::error::LoadError;
use air_quality_dashboard::data::filter::{apply_filters, filtered_indices, FilterCriteria};
use air_quality_dashboard::data::loader::load_file;
use air_quality_dashboard::data::model::{DayType, Pollutant, Season};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    path
}

const WITH_TEMP: [&str; 5] = [
    "datetime,station,PM2.5,PM10,SO2,NO2,CO,O3,TEMP",
    // Friday, rush hour, spring.
    "2013-03-01 08:00:00,Dongsi,10,20,4,30,500,40,0",
    // Saturday.
    "2013-03-02 12:00:00,Dongsi,50,60,6,35,900,50,10",
    // Monday in summer.
    "2013-07-01 12:00:00,Tiantan,30,40,2,20,400,120,30",
    // No PM2.5 reading: dropped by the PM2.5 range.
    "2014-01-01 18:00:00,Tiantan,NA,100,20,60,1500,10,-5",
];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

#[test]
fn load_filter_aggregate() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(dir.path(), "main_data.csv", &WITH_TEMP);

    let dataset = load_file(&path).unwrap();
    assert_eq!(dataset.len(), 4);
    assert!(dataset.schema.has_temp);
    assert_eq!(dataset.years.iter().copied().collect::<Vec<_>>(), vec![2013, 2014]);
    assert_eq!(dataset.pm25_bounds, Some((10.0, 50.0)));

    let criteria = FilterCriteria::unrestricted(&dataset);
    let view = apply_filters(&dataset.records, &criteria);
    assert_eq!(view.len(), 3);

    let agg = Aggregates::compute(&view, &dataset.schema);
    assert_eq!(agg.summary.mean_pm25, Metric::Value(30.0));
    assert_eq!(agg.summary.mean_pm10, Metric::Value(40.0));
    assert_eq!(agg.summary.station_count, 2);
    assert_eq!(agg.summary.record_count, 3);

    assert_eq!(agg.cleanest_day.value().map(|d| d.date), Some(date(2013, 3, 1)));
    assert_eq!(agg.dirtiest_day.value().map(|d| d.date), Some(date(2013, 3, 2)));

    assert_eq!(agg.monthly_pm25.get(&3), Some(&30.0));
    assert_eq!(agg.monthly_pm25.get(&7), Some(&30.0));
    assert_eq!(agg.day_type_pm25.get(&DayType::Weekend), Some(&50.0));
    assert_eq!(agg.day_type_pm25.get(&DayType::Weekday), Some(&20.0));
    assert_eq!(agg.seasonal_pm25.get(&Season::Summer), Some(&30.0));
    assert_eq!(agg.seasonal_pm25.get(&Season::Winter), None);

    // 2014 only had the row without PM2.5.
    assert_eq!(agg.annual_pm25.len(), 1);
    assert_eq!(agg.annual_pm25[0].year, 2013);
    assert_eq!(agg.annual_pm25[0].max_pm25, 50.0);

    let cold = agg.temperature_extremes.cold.value().unwrap();
    assert_eq!(cold.mean_pm25, Some(10.0));
    let hot = agg.temperature_extremes.hot.value().unwrap();
    assert_eq!(hot.mean_pm25, Some(30.0));

    assert_eq!(agg.station_levels[0].station, "Dongsi");
    assert_eq!(agg.station_map.len(), 2);
}

#[test]
fn indices_and_references_agree() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(dir.path(), "main_data.csv", &WITH_TEMP);
    let dataset = load_file(&path).unwrap();

    let mut criteria = FilterCriteria::unrestricted(&dataset);
    criteria.stations.remove("Tiantan");

    let by_ref = apply_filters(&dataset.records, &criteria);
    let by_index = dataset.view(&filtered_indices(&dataset.records, &criteria));
    assert_eq!(by_ref, by_index);
    assert!(by_ref.iter().all(|r| r.station() == "Dongsi"));
}

#[test]
fn missing_temp_column_marks_extremes_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        dir.path(),
        "no_temp.csv",
        &[
            "datetime,station,PM2.5,PM10,SO2,NO2,CO,O3",
            "2015-12-24 09:00:00,Wanliu,120,150,10,70,2000,5",
        ],
    );
    let dataset = load_file(&path).unwrap();
    assert!(!dataset.schema.has_temp);

    let view = apply_filters(&dataset.records, &FilterCriteria::unrestricted(&dataset));
    let agg = Aggregates::compute(&view, &dataset.schema);
    assert_eq!(agg.temperature_extremes.cold, Metric::Unavailable);
    assert_eq!(agg.temperature_extremes.hot, Metric::Unavailable);
    assert_eq!(agg.summary.mean_pm25, Metric::Value(120.0));
}

#[test]
fn empty_selection_reports_no_data() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(dir.path(), "main_data.csv", &WITH_TEMP);
    let dataset = load_file(&path).unwrap();

    let mut criteria = FilterCriteria::unrestricted(&dataset);
    criteria.seasons.clear();
    let view = apply_filters(&dataset.records, &criteria);
    assert!(view.is_empty());

    let agg = Aggregates::compute(&view, &dataset.schema);
    assert_eq!(agg.summary.mean_pm25, Metric::NoData);
    assert_eq!(agg.summary.record_count, 0);
    assert_eq!(agg.cleanest_day, Metric::NoData);
    assert_eq!(agg.dirtiest_day, Metric::NoData);
    assert_eq!(agg.temperature_extremes.cold, Metric::NoData);
    assert!(agg.monthly_pm25.is_empty());
    assert!(agg.station_levels.is_empty());
    assert!(agg.annual_pm25.is_empty());
    assert!(agg.station_map.is_empty());
    assert_eq!(agg.correlation.get(Pollutant::Pm25, Pollutant::Pm10), None);
}

#[test]
fn missing_column_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        dir.path(),
        "broken.csv",
        &["datetime,station,PM2.5,SO2,NO2,CO,O3", "2013-03-01 00:00:00,Dongsi,1,1,1,1,1"],
    );
    match load_file(&path) {
        Err(LoadError::MissingColumn { column }) => assert_eq!(column, "PM10"),
        other => panic!("expected a missing-column error, got {other:?}"),
    }
}
