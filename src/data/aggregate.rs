use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::model::{DayType, Pollutant, Record, Schema, Season, TimePeriod};
use super::stations;
use super::stats::{self, BoxSummary, MeanAccumulator};

// ---------------------------------------------------------------------------
// Metric – a value, or an explicit reason there is none
// ---------------------------------------------------------------------------

/// Result of a scalar aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric<T> {
    Value(T),
    /// The filtered view has nothing to aggregate.
    NoData,
    /// The dataset lacks the column the aggregate needs.
    Unavailable,
}

impl<T> Metric<T> {
    /// `None` becomes [`Metric::NoData`].
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Metric::Value(v),
            None => Metric::NoData,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Metric::Value(v) => Some(v),
            Metric::NoData | Metric::Unavailable => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate tables
// ---------------------------------------------------------------------------

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mean_pm25: Metric<f64>,
    pub mean_pm10: Metric<f64>,
    pub station_count: usize,
    pub record_count: usize,
}

/// Pairwise Pearson coefficients over [`Pollutant::ALL`].
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    values: [[Option<f64>; 6]; 6],
}

impl CorrelationMatrix {
    pub fn get(&self, a: Pollutant, b: Pollutant) -> Option<f64> {
        self.values[pollutant_index(a)][pollutant_index(b)]
    }
}

fn pollutant_index(p: Pollutant) -> usize {
    Pollutant::ALL.iter().position(|&q| q == p).unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationLevel {
    pub station: String,
    pub mean_pm25: Option<f64>,
    pub mean_pm10: Option<f64>,
}

/// Every observation of one pollutant, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    pub values: Vec<f64>,
}

impl Distribution {
    fn from_values(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        Distribution { values }
    }

    pub fn summary(&self) -> Option<BoxSummary> {
        BoxSummary::from_sorted(&self.values)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodDistribution {
    pub pm25: Distribution,
    pub pm10: Distribution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnualStats {
    pub year: i32,
    pub max_pm25: f64,
    pub mean_pm25: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyExtreme {
    pub date: NaiveDate,
    pub mean_pm25: f64,
}

/// PM2.5 among records at one tail of the temperature distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremeBand {
    /// The 5th (cold) or 95th (hot) TEMP percentile.
    pub threshold: f64,
    pub mean_pm25: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureExtremes {
    pub cold: Metric<ExtremeBand>,
    pub hot: Metric<ExtremeBand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationMarker {
    pub station: String,
    pub latitude: f64,
    pub longitude: f64,
    pub mean_pm25: Option<f64>,
}

// ---------------------------------------------------------------------------
// Individual aggregates
// ---------------------------------------------------------------------------

/// Mean of `pollutant` per group. Groups without a single observation are
/// left out rather than reported as zero.
fn group_mean<'a, K, F>(view: &[&'a Record], pollutant: Pollutant, key: F) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&'a Record) -> K,
{
    let mut groups: BTreeMap<K, MeanAccumulator> = BTreeMap::new();
    for &rec in view {
        groups
            .entry(key(rec))
            .or_default()
            .push_opt(rec.value(pollutant));
    }
    groups
        .into_iter()
        .filter_map(|(k, acc)| acc.mean().map(|m| (k, m)))
        .collect()
}

pub fn summary(view: &[&Record]) -> Summary {
    let stations: BTreeSet<&str> = view.iter().map(|r| r.station()).collect();
    Summary {
        mean_pm25: Metric::from_option(stats::mean(view.iter().map(|r| r.pm2_5()))),
        mean_pm10: Metric::from_option(stats::mean(view.iter().map(|r| r.value(Pollutant::Pm10)))),
        station_count: stations.len(),
        record_count: view.len(),
    }
}

/// Mean PM2.5 per calendar month (1–12).
pub fn monthly_pm25(view: &[&Record]) -> BTreeMap<u32, f64> {
    group_mean(view, Pollutant::Pm25, |r| r.calendar.month)
}

pub fn correlation_matrix(view: &[&Record]) -> CorrelationMatrix {
    let mut values = [[None; 6]; 6];
    for (i, &a) in Pollutant::ALL.iter().enumerate() {
        for (j, &b) in Pollutant::ALL.iter().enumerate().skip(i) {
            let r = stats::pearson(view.iter().map(|rec| (rec.value(a), rec.value(b))));
            // r(X, X) is exactly 1 whenever it is defined.
            let r = if i == j { r.map(|_| 1.0) } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix { values }
}

/// Mean PM2.5 and PM10 per station, highest PM2.5 first.
pub fn station_levels(view: &[&Record]) -> Vec<StationLevel> {
    let pm25 = group_mean(view, Pollutant::Pm25, Record::station);
    let pm10 = group_mean(view, Pollutant::Pm10, Record::station);
    let stations: BTreeSet<&str> = view.iter().map(|r| r.station()).collect();

    let mut levels: Vec<StationLevel> = stations
        .into_iter()
        .map(|s| StationLevel {
            station: s.to_string(),
            mean_pm25: pm25.get(s).copied(),
            mean_pm10: pm10.get(s).copied(),
        })
        .collect();

    // Stable sort: equal means keep alphabetical order, missing means last.
    levels.sort_by(|a, b| match (a.mean_pm25, b.mean_pm25) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    levels
}

pub fn day_type_pm25(view: &[&Record]) -> BTreeMap<DayType, f64> {
    group_mean(view, Pollutant::Pm25, |r| r.calendar.day_type)
}

/// Full PM2.5 and PM10 distributions split by rush hour.
pub fn rush_hour_distribution(view: &[&Record]) -> BTreeMap<TimePeriod, PeriodDistribution> {
    let mut raw: BTreeMap<TimePeriod, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for rec in view {
        let (pm25, pm10) = raw.entry(rec.calendar.time_period).or_default();
        pm25.extend(rec.pm2_5());
        pm10.extend(rec.value(Pollutant::Pm10));
    }
    raw.into_iter()
        .map(|(period, (pm25, pm10))| {
            (
                period,
                PeriodDistribution {
                    pm25: Distribution::from_values(pm25),
                    pm10: Distribution::from_values(pm10),
                },
            )
        })
        .collect()
}

pub fn seasonal_pm25(view: &[&Record]) -> BTreeMap<Season, f64> {
    group_mean(view, Pollutant::Pm25, |r| r.calendar.season)
}

/// Maximum and mean PM2.5 per year, ascending by year.
pub fn annual_pm25(view: &[&Record]) -> Vec<AnnualStats> {
    let mut years: BTreeMap<i32, (f64, MeanAccumulator)> = BTreeMap::new();
    for rec in view {
        let Some(v) = rec.pm2_5() else {
            continue;
        };
        let (max, acc) = years
            .entry(rec.calendar.year)
            .or_insert((f64::NEG_INFINITY, MeanAccumulator::default()));
        *max = max.max(v);
        acc.push(v);
    }
    years
        .into_iter()
        .filter_map(|(year, (max_pm25, acc))| {
            Some(AnnualStats {
                year,
                max_pm25,
                mean_pm25: acc.mean()?,
            })
        })
        .collect()
}

/// Mean PM2.5 per calendar date, ascending by date.
pub fn daily_pm25(view: &[&Record]) -> Vec<DailyExtreme> {
    group_mean(view, Pollutant::Pm25, |r| r.calendar.date)
        .into_iter()
        .map(|(date, mean_pm25)| DailyExtreme { date, mean_pm25 })
        .collect()
}

/// First date in calendar order whose mean satisfies `better` against all
/// earlier candidates.
fn pick_day(view: &[&Record], better: fn(f64, f64) -> bool) -> Metric<DailyExtreme> {
    let mut best: Option<DailyExtreme> = None;
    for day in daily_pm25(view) {
        let replace = match best {
            Some(b) => better(day.mean_pm25, b.mean_pm25),
            None => true,
        };
        if replace {
            best = Some(day);
        }
    }
    Metric::from_option(best)
}

/// Date with the lowest daily mean PM2.5; ties go to the earlier date.
pub fn cleanest_day(view: &[&Record]) -> Metric<DailyExtreme> {
    pick_day(view, |candidate, best| candidate < best)
}

/// Date with the highest daily mean PM2.5; ties go to the earlier date.
pub fn dirtiest_day(view: &[&Record]) -> Metric<DailyExtreme> {
    pick_day(view, |candidate, best| candidate > best)
}

/// Mean PM2.5 at or below the 5th and at or above the 95th TEMP percentile
/// of the view.
pub fn temperature_extremes(view: &[&Record], schema: &Schema) -> TemperatureExtremes {
    if !schema.has_temp {
        return TemperatureExtremes {
            cold: Metric::Unavailable,
            hot: Metric::Unavailable,
        };
    }

    let temps: Vec<f64> = view.iter().filter_map(|r| r.temp()).collect();
    let (Some(low), Some(high)) = (stats::quantile(&temps, 0.05), stats::quantile(&temps, 0.95))
    else {
        return TemperatureExtremes {
            cold: Metric::NoData,
            hot: Metric::NoData,
        };
    };

    TemperatureExtremes {
        cold: Metric::Value(extreme_band(view, low, |t| t <= low)),
        hot: Metric::Value(extreme_band(view, high, |t| t >= high)),
    }
}

fn extreme_band(view: &[&Record], threshold: f64, inside: impl Fn(f64) -> bool) -> ExtremeBand {
    let pm25 = view
        .iter()
        .filter(|r| r.temp().is_some_and(&inside))
        .map(|r| r.pm2_5());
    ExtremeBand {
        threshold,
        mean_pm25: stats::mean(pm25),
    }
}

/// Join per-station mean PM2.5 with the station coordinate table. Stations
/// without known coordinates are dropped.
pub fn station_map(view: &[&Record]) -> Vec<StationMarker> {
    station_markers(&station_levels(view))
}

/// Map markers from already computed station levels, in station order.
fn station_markers(levels: &[StationLevel]) -> Vec<StationMarker> {
    let mut markers: Vec<StationMarker> = levels
        .iter()
        .filter_map(|level| {
            let name = level.station.as_str();
            let Some(loc) = stations::locate(name) else {
                log::debug!("No coordinates for station '{name}', leaving it off the map");
                return None;
            };
            Some(StationMarker {
                station: level.station.clone(),
                latitude: loc.latitude,
                longitude: loc.longitude,
                mean_pm25: level.mean_pm25,
            })
        })
        .collect();
    markers.sort_by(|a, b| a.station.cmp(&b.station));
    markers
}

// ---------------------------------------------------------------------------
// Aggregates – everything the dashboard renders for one filter state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub summary: Summary,
    pub monthly_pm25: BTreeMap<u32, f64>,
    pub correlation: CorrelationMatrix,
    pub station_levels: Vec<StationLevel>,
    pub day_type_pm25: BTreeMap<DayType, f64>,
    pub rush_hour: BTreeMap<TimePeriod, PeriodDistribution>,
    pub seasonal_pm25: BTreeMap<Season, f64>,
    pub annual_pm25: Vec<AnnualStats>,
    pub cleanest_day: Metric<DailyExtreme>,
    pub dirtiest_day: Metric<DailyExtreme>,
    pub temperature_extremes: TemperatureExtremes,
    pub station_map: Vec<StationMarker>,
}

impl Aggregates {
    /// Compute every table from scratch for the given filtered view.
    pub fn compute(view: &[&Record], schema: &Schema) -> Self {
        let station_levels = station_levels(view);
        Aggregates {
            summary: summary(view),
            monthly_pm25: monthly_pm25(view),
            correlation: correlation_matrix(view),
            station_map: station_markers(&station_levels),
            station_levels,
            day_type_pm25: day_type_pm25(view),
            rush_hour: rush_hour_distribution(view),
            seasonal_pm25: seasonal_pm25(view),
            annual_pm25: annual_pm25(view),
            cleanest_day: cleanest_day(view),
            dirtiest_day: dirtiest_day(view),
            temperature_extremes: temperature_extremes(view, schema),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive::derive_attributes;
    use crate::data::model::RawRecord;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;

    struct Row {
        ts: &'static str,
        station: &'static str,
        pm25: Option<f64>,
        pm10: Option<f64>,
        temp: Option<f64>,
    }

    fn row(ts: &'static str, station: &'static str, pm25: f64) -> Row {
        Row {
            ts,
            station,
            pm25: Some(pm25),
            pm10: Some(pm25 * 2.0),
            temp: None,
        }
    }

    fn records(rows: Vec<Row>) -> Vec<Record> {
        derive_attributes(
            rows.into_iter()
                .map(|r| RawRecord {
                    timestamp: NaiveDateTime::parse_from_str(r.ts, "%Y-%m-%d %H:%M").unwrap(),
                    station: r.station.to_string(),
                    pm2_5: r.pm25,
                    pm10: r.pm10,
                    so2: r.pm25.map(|v| 100.0 - v),
                    no2: r.pm25.map(|v| v * v),
                    co: Some(1.0),
                    o3: None,
                    temp: r.temp,
                })
                .collect(),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cleanest_and_dirtiest_days() {
        let recs = records(vec![
            row("2014-01-01 00:00", "Dongsi", 8.0),
            row("2014-01-01 01:00", "Dongsi", 12.0), // mean 10
            row("2014-01-02 00:00", "Dongsi", 5.0),  // mean 5
            row("2014-01-03 00:00", "Dongsi", 20.0), // mean 20
        ]);
        let view: Vec<&Record> = recs.iter().collect();

        assert_eq!(
            cleanest_day(&view),
            Metric::Value(DailyExtreme { date: date(2014, 1, 2), mean_pm25: 5.0 })
        );
        assert_eq!(
            dirtiest_day(&view),
            Metric::Value(DailyExtreme { date: date(2014, 1, 3), mean_pm25: 20.0 })
        );
    }

    #[test]
    fn ties_go_to_the_earlier_date() {
        // Input order is deliberately not chronological.
        let recs = records(vec![
            row("2015-03-09 00:00", "Dongsi", 7.0),
            row("2015-03-04 00:00", "Dongsi", 7.0),
            row("2015-03-06 00:00", "Dongsi", 30.0),
            row("2015-03-01 00:00", "Dongsi", 30.0),
        ]);
        let view: Vec<&Record> = recs.iter().collect();

        assert_eq!(cleanest_day(&view).value().map(|d| d.date), Some(date(2015, 3, 4)));
        assert_eq!(dirtiest_day(&view).value().map(|d| d.date), Some(date(2015, 3, 1)));
    }

    #[test]
    fn missing_temp_column_is_unavailable() {
        let recs = records(vec![row("2014-01-01 00:00", "Dongsi", 8.0)]);
        let view: Vec<&Record> = recs.iter().collect();
        let extremes = temperature_extremes(&view, &Schema { has_temp: false });
        assert_eq!(extremes.cold, Metric::Unavailable);
        assert_eq!(extremes.hot, Metric::Unavailable);
    }

    #[test]
    fn temperature_extremes_average_the_tails() {
        let temps = [-10.0, 0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0];
        let rows = temps
            .iter()
            .enumerate()
            .map(|(i, &t)| Row {
                ts: "2016-05-01 12:00",
                station: "Gucheng",
                pm25: Some(i as f64 * 10.0),
                pm10: None,
                temp: Some(t),
            })
            .collect();
        let recs = records(rows);
        let view: Vec<&Record> = recs.iter().collect();

        let extremes = temperature_extremes(&view, &Schema { has_temp: true });
        let cold = *extremes.cold.value().unwrap();
        let hot = *extremes.hot.value().unwrap();
        // 5th percentile: -10 + 0.45 * 10 = -5.5; only -10 qualifies.
        assert!((cold.threshold + 5.5).abs() < 1e-9);
        assert_eq!(cold.mean_pm25, Some(0.0));
        // 95th percentile: 35 + 0.55 * 5 = 37.75; only 40 qualifies.
        assert!((hot.threshold - 37.75).abs() < 1e-9);
        assert_eq!(hot.mean_pm25, Some(90.0));
    }

    #[test]
    fn temp_present_but_no_readings_is_no_data() {
        let recs = records(vec![row("2014-01-01 00:00", "Dongsi", 8.0)]);
        let view: Vec<&Record> = recs.iter().collect();
        let extremes = temperature_extremes(&view, &Schema { has_temp: true });
        assert_eq!(extremes.cold, Metric::NoData);
        assert_eq!(extremes.hot, Metric::NoData);
    }

    #[test]
    fn empty_view_degrades_gracefully() {
        let view: Vec<&Record> = Vec::new();
        let agg = Aggregates::compute(&view, &Schema { has_temp: true });

        assert_eq!(agg.summary.mean_pm25, Metric::NoData);
        assert_eq!(agg.summary.mean_pm10, Metric::NoData);
        assert_eq!(agg.summary.record_count, 0);
        assert_eq!(agg.summary.station_count, 0);
        assert!(agg.monthly_pm25.is_empty());
        assert!(agg.station_levels.is_empty());
        assert!(agg.day_type_pm25.is_empty());
        assert!(agg.rush_hour.is_empty());
        assert!(agg.seasonal_pm25.is_empty());
        assert!(agg.annual_pm25.is_empty());
        assert_eq!(agg.cleanest_day, Metric::NoData);
        assert_eq!(agg.dirtiest_day, Metric::NoData);
        assert_eq!(agg.temperature_extremes.cold, Metric::NoData);
        assert!(agg.station_map.is_empty());
        assert_eq!(agg.correlation.get(Pollutant::Pm25, Pollutant::Pm10), None);
    }

    #[test]
    fn monthly_trend_omits_empty_months() {
        let recs = records(vec![
            row("2014-01-01 00:00", "Dongsi", 10.0),
            row("2015-01-20 00:00", "Dongsi", 30.0),
            row("2014-07-01 00:00", "Dongsi", 4.0),
        ]);
        let view: Vec<&Record> = recs.iter().collect();
        let monthly = monthly_pm25(&view);
        assert_eq!(monthly.into_iter().collect::<Vec<_>>(), vec![(1, 20.0), (7, 4.0)]);
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let recs = records(vec![
            row("2014-01-01 00:00", "Dongsi", 10.0),
            row("2014-01-01 01:00", "Dongsi", 30.0),
            row("2014-01-01 02:00", "Dongsi", 20.0),
            row("2014-01-01 03:00", "Dongsi", 50.0),
        ]);
        let view: Vec<&Record> = recs.iter().collect();
        let corr = correlation_matrix(&view);

        for a in Pollutant::ALL {
            for b in Pollutant::ALL {
                assert_eq!(corr.get(a, b), corr.get(b, a));
            }
        }
        assert_eq!(corr.get(Pollutant::Pm25, Pollutant::Pm25), Some(1.0));
        assert!((corr.get(Pollutant::Pm25, Pollutant::Pm10).unwrap() - 1.0).abs() < 1e-9);
        assert!((corr.get(Pollutant::Pm25, Pollutant::So2).unwrap() + 1.0).abs() < 1e-9);
        // CO is constant and O3 is never observed.
        assert_eq!(corr.get(Pollutant::Co, Pollutant::Co), None);
        assert_eq!(corr.get(Pollutant::O3, Pollutant::Pm25), None);
    }

    #[test]
    fn station_levels_sorted_by_pm25_descending() {
        let recs = records(vec![
            row("2014-01-01 00:00", "Aotizhongxin", 10.0),
            row("2014-01-01 00:00", "Shunyi", 90.0),
            row("2014-01-01 01:00", "Shunyi", 70.0),
            row("2014-01-01 00:00", "Dongsi", 45.0),
        ]);
        let view: Vec<&Record> = recs.iter().collect();
        let levels = station_levels(&view);

        let order: Vec<&str> = levels.iter().map(|l| l.station.as_str()).collect();
        assert_eq!(order, vec!["Shunyi", "Dongsi", "Aotizhongxin"]);
        assert_eq!(levels[0].mean_pm25, Some(80.0));
        assert_eq!(levels[0].mean_pm10, Some(160.0));
    }

    #[test]
    fn categorical_means() {
        let recs = records(vec![
            row("2017-01-07 08:00", "Dongsi", 100.0), // Sat, rush, Winter
            row("2017-01-09 12:00", "Dongsi", 40.0),  // Mon, Winter
            row("2016-07-11 18:00", "Dongsi", 20.0),  // Mon, rush, Summer
            row("2016-04-12 03:00", "Dongsi", 60.0),  // Tue, Other
        ]);
        let view: Vec<&Record> = recs.iter().collect();

        let by_day = day_type_pm25(&view);
        assert_eq!(by_day.get(&DayType::Weekend), Some(&100.0));
        assert_eq!(by_day.get(&DayType::Weekday), Some(&40.0));

        let by_season = seasonal_pm25(&view);
        assert_eq!(by_season.get(&Season::Winter), Some(&70.0));
        assert_eq!(by_season.get(&Season::Summer), Some(&20.0));
        assert_eq!(by_season.get(&Season::Other), Some(&60.0));

        let annual = annual_pm25(&view);
        assert_eq!(
            annual,
            vec![
                AnnualStats { year: 2016, max_pm25: 60.0, mean_pm25: 40.0 },
                AnnualStats { year: 2017, max_pm25: 100.0, mean_pm25: 70.0 },
            ]
        );

        let rush = rush_hour_distribution(&view);
        assert_eq!(rush[&TimePeriod::RushHour].pm25.values, vec![20.0, 100.0]);
        assert_eq!(rush[&TimePeriod::NonRushHour].pm10.values, vec![80.0, 120.0]);
    }

    #[test]
    fn map_skips_unknown_stations() {
        let recs = records(vec![
            row("2014-01-01 00:00", "Dongsi", 10.0),
            row("2014-01-01 00:00", "Atlantis", 90.0),
        ]);
        let view: Vec<&Record> = recs.iter().collect();
        let markers = station_map(&view);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].station, "Dongsi");
        assert_eq!(markers[0].mean_pm25, Some(10.0));
    }

    #[test]
    fn bundled_map_matches_station_join() {
        let recs = records(vec![
            row("2014-01-01 00:00", "Tiantan", 10.0),
            row("2014-01-01 01:00", "Dongsi", 90.0),
            row("2014-01-01 02:00", "Dongsi", 30.0),
        ]);
        let view: Vec<&Record> = recs.iter().collect();
        let agg = Aggregates::compute(&view, &Schema::default());

        assert_eq!(agg.station_map, station_map(&view));
        let names: Vec<&str> = agg.station_map.iter().map(|m| m.station.as_str()).collect();
        assert_eq!(names, vec!["Dongsi", "Tiantan"]);
        assert_eq!(agg.station_map[0].mean_pm25, Some(60.0));
    }
}
