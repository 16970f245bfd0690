use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Fatal problems detected while loading the dataset. Nothing is rendered
/// from a source that produced one of these.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet read error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Row {row}: cannot parse timestamp '{value}' in column 'datetime'")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Row {row}: column 'station' is empty")]
    MissingStation { row: usize },

    #[error("Row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Column '{column}' has unsupported type {data_type}")]
    InvalidColumnType { column: String, data_type: String },

    #[error("Unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },
}
