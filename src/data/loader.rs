use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{EmptyDataset, Launch, LaunchDataset, LaunchSite, Outcome, UnknownSite};

/// Column headers required in every source format.
pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

/// Why a dataset could not be loaded. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: missing value in column '{column}'")]
    MissingValue { row: usize, column: &'static str },
    #[error("row {row}: '{value}' in column '{column}' is not a number")]
    NotNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: payload mass {value} must be finite and non-negative")]
    InvalidPayload { row: usize, value: f64 },
    #[error("row {row}: class {value} is not 0 or 1")]
    InvalidClass { row: usize, value: f64 },
    #[error("row {row}: {source}")]
    UnknownSite { row: usize, source: UnknownSite },
    #[error("expected a top-level JSON array of records")]
    NotARecordArray,
    #[error("row {0} is not a JSON object")]
    NotAnObject(usize),
    #[error(transparent)]
    Empty(#[from] EmptyDataset),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four required columns (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 500.0, ... }, ...]`
/// * `.parquet` – one column per field, string or numeric
pub fn load_file(path: &Path) -> Result<LaunchDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }?;

    let bounds = dataset.bounds();
    log::info!(
        "Loaded {} launches from {} (payload {}..={} kg, sites {:?})",
        dataset.len(),
        path.display(),
        bounds.min,
        bounds.max,
        dataset.sites()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row validation shared by all formats
// ---------------------------------------------------------------------------

/// One row as read from the source, before validation.
struct RawRow<'a> {
    site: Option<&'a str>,
    payload: Option<f64>,
    class: Option<f64>,
    booster: Option<&'a str>,
}

impl RawRow<'_> {
    fn validate(self, row: usize) -> Result<Launch, LoadError> {
        let site = self.site.ok_or(LoadError::MissingValue {
            row,
            column: SITE_COLUMN,
        })?;
        let site: LaunchSite = site
            .parse()
            .map_err(|source| LoadError::UnknownSite { row, source })?;

        let payload_mass = self.payload.ok_or(LoadError::MissingValue {
            row,
            column: PAYLOAD_COLUMN,
        })?;
        if !payload_mass.is_finite() || payload_mass < 0.0 {
            return Err(LoadError::InvalidPayload {
                row,
                value: payload_mass,
            });
        }

        let class = self.class.ok_or(LoadError::MissingValue {
            row,
            column: CLASS_COLUMN,
        })?;
        let outcome =
            Outcome::from_class(class).ok_or(LoadError::InvalidClass { row, value: class })?;

        let booster_category = self
            .booster
            .ok_or(LoadError::MissingValue {
                row,
                column: BOOSTER_COLUMN,
            })?
            .to_string();

        Ok(Launch {
            site,
            payload_mass,
            booster_category,
            outcome,
        })
    }
}

fn parse_number(text: &str, row: usize, column: &'static str) -> Result<Option<f64>, LoadError> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| LoadError::NotNumeric {
            row,
            column,
            value: text.to_string(),
        })
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
fn load_csv(path: &Path) -> Result<LaunchDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;
    let booster_idx = column(BOOSTER_COLUMN)?;

    let mut launches = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let raw = RawRow {
            site: non_empty(field(site_idx)),
            payload: parse_number(field(payload_idx), row_no, PAYLOAD_COLUMN)?,
            class: parse_number(field(class_idx), row_no, CLASS_COLUMN)?,
            booster: non_empty(field(booster_idx)),
        };
        launches.push(raw.validate(row_no)?);
    }

    Ok(LaunchDataset::from_launches(launches)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let records = root.as_array().ok_or(LoadError::NotARecordArray)?;

    // A column counts as present if any record carries it.
    for name in [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN, BOOSTER_COLUMN] {
        let present = records
            .iter()
            .any(|r| r.as_object().is_some_and(|o| o.contains_key(name)));
        if !present && !records.is_empty() {
            return Err(LoadError::MissingColumn(name));
        }
    }

    let mut launches = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(LoadError::NotAnObject(i))?;

        let raw = RawRow {
            site: obj.get(SITE_COLUMN).and_then(JsonValue::as_str),
            payload: json_number(obj.get(PAYLOAD_COLUMN), i, PAYLOAD_COLUMN)?,
            class: json_number(obj.get(CLASS_COLUMN), i, CLASS_COLUMN)?,
            booster: obj.get(BOOSTER_COLUMN).and_then(JsonValue::as_str),
        };
        launches.push(raw.validate(i)?);
    }

    Ok(LaunchDataset::from_launches(launches)?)
}

fn json_number(
    val: Option<&JsonValue>,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, LoadError> {
    match val {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64()),
        Some(JsonValue::String(s)) => parse_number(s, row, column),
        Some(other) => Err(LoadError::NotNumeric {
            row,
            column,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Text columns may be Utf8 or LargeUtf8; numeric columns may be any of
/// Float64 / Float32 / Int64 / Int32 (or text holding numbers).
fn load_parquet(path: &Path) -> Result<LaunchDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema = builder.schema().clone();
    let column = |name: &'static str| {
        schema
            .index_of(name)
            .map_err(|_| LoadError::MissingColumn(name))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;
    let booster_idx = column(BOOSTER_COLUMN)?;

    let reader = builder.build()?;
    let mut launches = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let offset = launches.len();

        let site_col = batch.column(site_idx);
        let payload_col = batch.column(payload_idx);
        let class_col = batch.column(class_idx);
        let booster_col = batch.column(booster_idx);

        for row in 0..batch.num_rows() {
            let row_no = offset + row;
            let raw = RawRow {
                site: extract_text(site_col, row),
                payload: extract_f64(payload_col, row, row_no, PAYLOAD_COLUMN)?,
                class: extract_f64(class_col, row, row_no, CLASS_COLUMN)?,
                booster: extract_text(booster_col, row),
            };
            launches.push(raw.validate(row_no)?);
        }
    }

    Ok(LaunchDataset::from_launches(launches)?)
}

// -- Parquet / Arrow helpers --

/// Extract a string cell; `None` for nulls and non-text columns.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> Option<&str> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row)),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row)),
        _ => None,
    }
}

/// Extract a numeric cell as `f64`.
fn extract_f64(
    col: &Arc<dyn Array>,
    row: usize,
    row_no: usize,
    column: &'static str,
) -> Result<Option<f64>, LoadError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::Utf8 | DataType::LargeUtf8 => {
            return match extract_text(col, row) {
                Some(text) => parse_number(text, row_no, column),
                None => Ok(None),
            };
        }
        other => {
            return Err(LoadError::NotNumeric {
                row: row_no,
                column,
                value: format!("{other:?}"),
            })
        }
    };
    Ok(value)
}
