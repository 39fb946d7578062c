//! CSV Data Loader Module
//! Loads the source CSV into an immutable Dataset using Polars.

use polars::prelude::*;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("data file not found: {0}")]
    FileNotFound(String),
    #[error("failed to load CSV {path}: {source}")]
    CsvError {
        path: String,
        #[source]
        source: PolarsError,
    },
    #[error("column not found: {0}")]
    MissingColumn(String),
    #[error("failed to read column {column}: {source}")]
    ColumnError {
        column: String,
        #[source]
        source: PolarsError,
    },
}

/// The full property table, loaded once at startup and read-only afterwards.
#[derive(Debug)]
pub struct Dataset {
    df: DataFrame,
    path: String,
}

impl Dataset {
    /// Load a CSV file using Polars. Fails fast on a missing file or a parse
    /// error; no partial dataset is ever produced.
    pub fn load(path: &str) -> Result<Self, LoaderError> {
        if !Path::new(path).exists() {
            return Err(LoaderError::FileNotFound(path.to_string()));
        }

        // Lazy scan with schema inference, then collect into memory
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lf| lf.collect())
            .map_err(|source| LoaderError::CsvError {
                path: path.to_string(),
                source,
            })?;

        Ok(Self {
            df,
            path: path.to_string(),
        })
    }

    /// Path the dataset was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Column names in CSV order.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Number of rows, including rows with null values.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// A numeric column as row-aligned optional values. The column is cast
    /// to Float64; entries that are null or fail the cast come back as None
    /// so callers can line the column up against category columns.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let column = self
            .df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let cast = column
            .cast(&DataType::Float64)
            .map_err(|source| LoaderError::ColumnError {
                column: name.to_string(),
                source,
            })?;
        let ca = cast.f64().map_err(|source| LoaderError::ColumnError {
            column: name.to_string(),
            source,
        })?;
        Ok(ca.into_iter().collect())
    }

    /// A column rendered to text, row-aligned. Works for any dtype, so a
    /// numeric "Area" column still yields usable category labels.
    pub fn category_column(&self, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = self
            .df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let series = column.as_materialized_series();

        let values = (0..series.len())
            .map(|i| {
                let val = series.get(i).ok()?;
                if val.is_null() {
                    None
                } else {
                    Some(val.to_string().trim_matches('"').to_string())
                }
            })
            .collect();
        Ok(values)
    }

    /// Every row as a JSON object keyed by column name, in CSV order.
    /// This is the payload the data table renders client-side.
    pub fn rows_json(&self) -> Vec<Value> {
        let columns: Vec<(String, &Column)> = self
            .df
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), c))
            .collect();

        (0..self.df.height())
            .map(|i| {
                let mut row = Map::new();
                for (name, column) in &columns {
                    let value = column
                        .as_materialized_series()
                        .get(i)
                        .map(any_value_to_json)
                        .unwrap_or(Value::Null);
                    row.insert(name.clone(), value);
                }
                Value::Object(row)
            })
            .collect()
    }
}

/// Convert a Polars cell into JSON, keeping numbers numeric so the table's
/// client-side sort and filters can compare them properly.
fn any_value_to_json(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => serde_json::Number::from_f64(f64::from(v))
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::Float64(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::String(s) => Value::from(s),
        AnyValue::StringOwned(s) => Value::from(s.to_string()),
        other => Value::from(other.to_string().trim_matches('"').to_string()),
    }
}
