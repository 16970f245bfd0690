use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Schema as ArrowSchema};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::derive::derive_attributes;
use super::error::{LoadError, Result};
use super::model::{AirQualityDataset, Pollutant, RawRecord, Schema};

pub const DATETIME_COLUMN: &str = "datetime";
pub const STATION_COLUMN: &str = "station";
pub const TEMP_COLUMN: &str = "TEMP";

/// Cell values treated as a missing measurement.
const NULL_MARKERS: [&str; 5] = ["NA", "NaN", "nan", "null", "NULL"];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the air-quality dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `datetime`, `station`, `PM2.5`, `PM10`,
///                `SO2`, `NO2`, `CO`, `O3` and an optional `TEMP`
/// * `.parquet` – the same column names; any numeric type is accepted
pub fn load_file(path: &Path) -> Result<AirQualityDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => {
            return Err(LoadError::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    };

    log::info!(
        "Loaded {} records from {} ({} stations, TEMP {})",
        dataset.len(),
        path.display(),
        dataset.stations.len(),
        if dataset.schema.has_temp { "present" } else { "absent" }
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<AirQualityDataset> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

/// Positions of the columns we care about inside a CSV header.
struct ColumnLayout {
    datetime: usize,
    station: usize,
    pollutants: [usize; 6],
    temp: Option<usize>,
}

impl ColumnLayout {
    fn locate(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| LoadError::MissingColumn {
                column: name.to_string(),
            })
        };

        let datetime = require(DATETIME_COLUMN)?;
        let station = require(STATION_COLUMN)?;
        let mut pollutants = [0usize; 6];
        for (slot, p) in pollutants.iter_mut().zip(Pollutant::ALL) {
            *slot = require(p.column())?;
        }

        Ok(ColumnLayout {
            datetime,
            station,
            pollutants,
            temp: find(TEMP_COLUMN),
        })
    }
}

/// Parse CSV text from any reader. Every row must be well formed; the first
/// bad cell aborts the load.
pub fn read_csv<R: Read>(reader: R) -> Result<AirQualityDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let layout = ColumnLayout::locate(&headers)?;
    let mut raw = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let dt_text = cell(layout.datetime);
        let timestamp = parse_timestamp(dt_text).ok_or_else(|| LoadError::InvalidTimestamp {
            row,
            value: dt_text.to_string(),
        })?;

        let mut values = [None; 6];
        for ((slot, &idx), p) in values.iter_mut().zip(&layout.pollutants).zip(Pollutant::ALL) {
            *slot = parse_number(cell(idx), row, p.column())?;
        }
        let temp = match layout.temp {
            Some(idx) => parse_number(cell(idx), row, TEMP_COLUMN)?,
            None => None,
        };

        let station = required_station(cell(layout.station), row)?;
        raw.push(raw_record(timestamp, station, values, temp));
    }

    let schema = Schema {
        has_temp: layout.temp.is_some(),
    };
    Ok(AirQualityDataset::from_records(derive_attributes(raw), schema))
}

/// Parse a timestamp cell; see `DATETIME_FORMATS` for the accepted forms.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Empty cells, the null markers and any spelling of NaN are missing
/// values. Infinities are rejected like any other non-number.
fn parse_number(s: &str, row: usize, column: &str) -> Result<Option<f64>> {
    if s.is_empty() || NULL_MARKERS.contains(&s) {
        return Ok(None);
    }
    let invalid = || LoadError::InvalidNumber {
        row,
        column: column.to_string(),
        value: s.to_string(),
    };
    let v = s.parse::<f64>().map_err(|_| invalid())?;
    if v.is_nan() {
        Ok(None)
    } else if v.is_infinite() {
        Err(invalid())
    } else {
        Ok(Some(v))
    }
}

fn required_station(name: &str, row: usize) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LoadError::MissingStation { row });
    }
    Ok(name.to_string())
}

fn raw_record(
    timestamp: NaiveDateTime,
    station: String,
    values: [Option<f64>; 6],
    temp: Option<f64>,
) -> RawRecord {
    let [pm2_5, pm10, so2, no2, co, o3] = values;
    RawRecord {
        timestamp,
        station,
        pm2_5,
        pm10,
        so2,
        no2,
        co,
        o3,
        temp,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same column names as the CSV layout.
///
/// `datetime` may be a string, date or timestamp column; it is rendered to
/// text by Arrow and parsed like a CSV cell. Numeric columns of any width
/// are widened to `f64`.
fn load_parquet(path: &Path) -> Result<AirQualityDataset> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let has_temp = check_parquet_schema(builder.schema())?;
    let reader = builder.build()?;

    let mut raw = Vec::new();
    let mut rows_seen = 0usize;

    for batch_result in reader {
        let batch = batch_result?;

        let datetime = string_column(&batch, DATETIME_COLUMN)?;
        let station = string_column(&batch, STATION_COLUMN)?;
        let pollutants = Pollutant::ALL
            .iter()
            .map(|p| float_column(&batch, p.column()))
            .collect::<Result<Vec<_>>>()?;
        let temp = if has_temp {
            Some(float_column(&batch, TEMP_COLUMN)?)
        } else {
            None
        };

        for i in 0..batch.num_rows() {
            let row = rows_seen + i + 1;

            let dt_text = if datetime.is_null(i) { "" } else { datetime.value(i) };
            let timestamp =
                parse_timestamp(dt_text).ok_or_else(|| LoadError::InvalidTimestamp {
                    row,
                    value: dt_text.to_string(),
                })?;
            let station_name = if station.is_null(i) { "" } else { station.value(i) };
            let station_name = required_station(station_name, row)?;

            let mut values = [None; 6];
            for ((slot, col), p) in values.iter_mut().zip(&pollutants).zip(Pollutant::ALL) {
                *slot = finite_f64(col, i, row, p.column())?;
            }
            let temp_value = match &temp {
                Some(col) => finite_f64(col, i, row, TEMP_COLUMN)?,
                None => None,
            };

            raw.push(raw_record(timestamp, station_name, values, temp_value));
        }
        rows_seen += batch.num_rows();
    }

    Ok(AirQualityDataset::from_records(
        derive_attributes(raw),
        Schema { has_temp },
    ))
}

/// Verify every required column exists; report whether `TEMP` does.
fn check_parquet_schema(schema: &ArrowSchema) -> Result<bool> {
    let required = [DATETIME_COLUMN, STATION_COLUMN]
        .into_iter()
        .chain(Pollutant::ALL.iter().map(|p| p.column()));
    for name in required {
        if schema.index_of(name).is_err() {
            return Err(LoadError::MissingColumn {
                column: name.to_string(),
            });
        }
    }
    Ok(schema.index_of(TEMP_COLUMN).is_ok())
}

// -- Parquet / Arrow helpers --

fn column_by_name<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn {
            column: name.to_string(),
        })
}

fn cast_column(col: &ArrayRef, name: &str, to: &DataType) -> Result<ArrayRef> {
    cast(col, to).map_err(|_| LoadError::InvalidColumnType {
        column: name.to_string(),
        data_type: format!("{:?}", col.data_type()),
    })
}

fn string_column(batch: &RecordBatch, name: &str) -> Result<StringArray> {
    let col = column_by_name(batch, name)?;
    let text = cast_column(col, name, &DataType::Utf8)?;
    Ok(text.as_string::<i32>().clone())
}

fn float_column(batch: &RecordBatch, name: &str) -> Result<Float64Array> {
    let col = column_by_name(batch, name)?;
    let floats = cast_column(col, name, &DataType::Float64)?;
    Ok(floats.as_primitive::<Float64Type>().clone())
}

/// Same rules as a CSV cell: null and NaN are missing, infinity is fatal.
fn finite_f64(col: &Float64Array, idx: usize, row: usize, column: &str) -> Result<Option<f64>> {
    if col.is_null(idx) {
        return Ok(None);
    }
    let v = col.value(idx);
    if v.is_nan() {
        Ok(None)
    } else if v.is_infinite() {
        Err(LoadError::InvalidNumber {
            row,
            column: column.to_string(),
            value: v.to_string(),
        })
    } else {
        Ok(Some(v))
    }
}
