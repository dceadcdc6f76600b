use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

/// Required column names, as the source CSV spells them.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

/// A violation of the launch-record schema.  Wrapped in `anyhow` context by
/// the loaders; always fatal at startup.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch-record dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the `Launch Site`, `Payload Mass (kg)`,
///   `class` and `Booster Version Category` columns; extra columns ignored
/// * `.json`    – `[{ "site": ..., "payload_mass_kg": ..., "class": 0|1,
///   "booster_category": ... }, ...]`
/// * `.parquet` – flat columns named like the CSV headers
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn parse_payload(raw: &str, row: usize) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        SchemaError::InvalidField {
            row,
            column: COL_PAYLOAD,
            value: raw.to_string(),
        }
        .into()
    })
}

fn parse_class(class: i64, row: usize) -> Result<Outcome> {
    Outcome::from_class(class)
        .ok_or_else(|| {
            SchemaError::InvalidField {
                row,
                column: COL_CLASS,
                value: class.to_string(),
            }
            .into()
        })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming the four required columns.  Columns beyond
/// the required four (flight numbers, booster serials, …) are ignored.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SchemaError::MissingColumn(name).into())
    };
    let site_idx = column(COL_SITE)?;
    let payload_idx = column(COL_PAYLOAD)?;
    let class_idx = column(COL_CLASS)?;
    let booster_idx = column(COL_BOOSTER)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let raw_class = record.get(class_idx).unwrap_or("");
        let class: i64 = raw_class.trim().parse().map_err(|_| SchemaError::InvalidField {
            row: row_no,
            column: COL_CLASS,
            value: raw_class.to_string(),
        })?;

        records.push(LaunchRecord {
            site: record.get(site_idx).unwrap_or("").to_string(),
            payload_mass_kg: parse_payload(record.get(payload_idx).unwrap_or(""), row_no)?,
            outcome: parse_class(class, row_no)?,
            booster_category: record.get(booster_idx).unwrap_or("").to_string(),
        });
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct JsonRecord {
    site: String,
    payload_mass_kg: f64,
    class: i64,
    booster_category: String,
}

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "site": "CCAFS LC-40",
///     "payload_mass_kg": 2500.0,
///     "class": 1,
///     "booster_category": "FT"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<JsonRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(row_no, row)| {
            Ok(LaunchRecord {
                site: row.site,
                payload_mass_kg: row.payload_mass_kg,
                outcome: parse_class(row.class, row_no)?,
                booster_category: row.booster_category,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema: flat columns named like the CSV headers, with
/// * `Launch Site`, `Booster Version Category`: Utf8 or LargeUtf8
/// * `Payload Mass (kg)`: Float64 or Float32
/// * `class`: Int64 or Int32
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_base = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<usize> {
            schema
                .index_of(name)
                .map_err(|_| SchemaError::MissingColumn(name).into())
        };
        let site_col = batch.column(column(COL_SITE)?);
        let payload_col = batch.column(column(COL_PAYLOAD)?);
        let class_col = batch.column(column(COL_CLASS)?);
        let booster_col = batch.column(column(COL_BOOSTER)?);

        for row in 0..batch.num_rows() {
            let row_no = row_base + row;
            records.push(LaunchRecord {
                site: extract_string(site_col, row, row_no, COL_SITE)?,
                payload_mass_kg: extract_f64(payload_col, row, row_no, COL_PAYLOAD)?,
                outcome: parse_class(extract_i64(class_col, row, row_no, COL_CLASS)?, row_no)?,
                booster_category: extract_string(booster_col, row, row_no, COL_BOOSTER)?,
            });
        }
        row_base += batch.num_rows();
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn null_field(row: usize, column: &'static str) -> SchemaError {
    SchemaError::InvalidField {
        row,
        column,
        value: "<null>".to_string(),
    }
}

fn extract_string(
    col: &Arc<dyn Array>,
    row: usize,
    row_no: usize,
    column: &'static str,
) -> Result<String> {
    if col.is_null(row) {
        bail!(null_field(row_no, column));
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Column '{column}' has type {other:?}, expected Utf8"),
    }
}

fn extract_f64(
    col: &Arc<dyn Array>,
    row: usize,
    row_no: usize,
    column: &'static str,
) -> Result<f64> {
    if col.is_null(row) {
        bail!(null_field(row_no, column));
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        bail!(
            "Column '{column}' has type {:?}, expected Float64 or Float32",
            col.data_type()
        )
    }
}

fn extract_i64(
    col: &Arc<dyn Array>,
    row: usize,
    row_no: usize,
    column: &'static str,
) -> Result<i64> {
    if col.is_null(row) {
        bail!(null_field(row_no, column));
    }
    if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as i64)
    } else {
        bail!(
            "Column '{column}' has type {:?}, expected Int64 or Int32",
            col.data_type()
        )
    }
}
