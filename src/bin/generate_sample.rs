//! Writes a synthetic `main_data.csv` and `main_data.parquet` with hourly
//! readings for the twelve Beijing stations, for trying the dashboard
//! without the real dataset.

use std::sync::Arc;

use air_quality_dashboard::data::stations::BEIJING_STATIONS;
use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use parquet::arrow::ArrowWriter;

const HEADER: [&str; 9] = [
    "datetime", "station", "PM2.5", "PM10", "SO2", "NO2", "CO", "O3", "TEMP",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic hourly reading.
struct Reading {
    timestamp: NaiveDateTime,
    station: &'static str,
    values: [Option<f64>; 7],
}

/// Heavier winter smog, rush-hour peaks, and a few sensor dropouts.
fn reading(rng: &mut SimpleRng, timestamp: NaiveDateTime, station: &'static str, urban: f64) -> Reading {
    let day_of_year = timestamp.ordinal() as f64;
    let winter = (2.0 * std::f64::consts::PI * (day_of_year - 15.0) / 365.0).cos();
    let hour = timestamp.hour();
    let rush = if (7..=10).contains(&hour) || (17..=20).contains(&hour) { 1.25 } else { 1.0 };

    let pm25 = (urban * (70.0 + 45.0 * winter) * rush * rng.gauss(1.0, 0.35).max(0.05)).max(2.0);
    let pm10 = pm25 * rng.gauss(1.35, 0.15).max(1.0);
    let so2 = (4.0 + 12.0 * winter.max(0.0) + rng.gauss(0.0, 3.0)).max(1.0);
    let no2 = (urban * 45.0 * rush + rng.gauss(0.0, 10.0)).max(2.0);
    let co = (pm25 * 12.0 + rng.gauss(300.0, 80.0)).max(100.0);
    let temp = 13.0 - 16.0 * winter + rng.gauss(0.0, 3.0);
    let o3 = (60.0 - 40.0 * winter + 0.8 * temp + rng.gauss(0.0, 15.0)).max(1.0);

    let mut values = [pm25, pm10, so2, no2, co, o3, temp].map(|v| Some((v * 10.0).round() / 10.0));
    for v in values.iter_mut() {
        if rng.next_f64() < 0.01 {
            *v = None;
        }
    }
    Reading {
        timestamp,
        station,
        values,
    }
}

fn generate(rng: &mut SimpleRng) -> Result<Vec<Reading>> {
    let start = NaiveDate::from_ymd_opt(2013, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")?;
    let hours = 24 * 365 * 2;

    let mut readings = Vec::with_capacity(hours * BEIJING_STATIONS.len());
    for (i, station) in BEIJING_STATIONS.iter().enumerate() {
        // Suburban stations sit a little cleaner than the city core.
        let urban = 0.8 + 0.04 * i as f64;
        for h in 0..hours {
            let timestamp = start + Duration::hours(h as i64);
            readings.push(reading(rng, timestamp, station.name, urban));
        }
    }
    Ok(readings)
}

fn write_csv(path: &str, readings: &[Reading]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(HEADER)?;
    for r in readings {
        let mut row = vec![
            r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            r.station.to_string(),
        ];
        row.extend(r.values.iter().map(|v| match v {
            Some(x) => x.to_string(),
            None => "NA".to_string(),
        }));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, readings: &[Reading]) -> Result<()> {
    let mut datetime = StringBuilder::new();
    let mut station = StringBuilder::new();
    let mut columns: Vec<Float64Builder> = (0..7).map(|_| Float64Builder::new()).collect();
    for r in readings {
        datetime.append_value(r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string());
        station.append_value(r.station);
        for (builder, v) in columns.iter_mut().zip(r.values) {
            builder.append_option(v);
        }
    }

    let mut fields = vec![
        Field::new(HEADER[0], DataType::Utf8, false),
        Field::new(HEADER[1], DataType::Utf8, false),
    ];
    fields.extend(HEADER[2..].iter().map(|name| Field::new(*name, DataType::Float64, true)));
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<ArrayRef> = vec![Arc::new(datetime.finish()), Arc::new(station.finish())];
    arrays.extend(columns.iter_mut().map(|b| Arc::new(b.finish()) as ArrayRef));
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let readings = generate(&mut rng)?;

    write_csv("main_data.csv", &readings)?;
    write_parquet("main_data.parquet", &readings)?;

    println!(
        "Wrote {} hourly readings for {} stations to main_data.csv and main_data.parquet",
        readings.len(),
        BEIJING_STATIONS.len()
    );
    Ok(())
}
