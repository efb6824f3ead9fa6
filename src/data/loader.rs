use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray, BooleanArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{
    LaunchDataset, LaunchRecord, Outcome, COL_BOOSTER, COL_OUTCOME, COL_PAYLOAD, COL_SITE,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (the usual export)
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – same columns, written by Pandas or Polars
///
/// Only `Launch Site`, `Payload Mass (kg)`, `class` and
/// `Booster Version Category` are read; other columns are ignored.
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
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
}

/// Load the dataset named at startup.
///
/// A path given on the command line must load. The configured default may be
/// absent, in which case the dashboard starts without data (`Ok(None)`); if
/// it exists it must load too.
pub fn initial_dataset(path: &Path, explicit: bool) -> Result<Option<LaunchDataset>> {
    if !explicit && !path.exists() {
        log::warn!(
            "{} not found; starting without data (File → Open…)",
            path.display()
        );
        return Ok(None);
    }

    let dataset = load_file(path).with_context(|| format!("loading {}", path.display()))?;
    if dataset.is_empty() {
        log::warn!("{} contains no launches", path.display());
    } else {
        log::info!(
            "Loaded {} launches from {} sites ({})",
            dataset.len(),
            dataset.sites.len(),
            path.display()
        );
    }
    Ok(Some(dataset))
}

// ---------------------------------------------------------------------------
// Cell parsing shared by the text formats
// ---------------------------------------------------------------------------

fn parse_payload(text: &str, row: usize) -> Result<f64, DataError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .and_then(|v| checked_payload(v, row).ok())
        .ok_or_else(|| DataError::InvalidPayload {
            row,
            value: text.to_string(),
        })
}

fn checked_payload(value: f64, row: usize) -> Result<f64, DataError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DataError::InvalidPayload {
            row,
            value: value.to_string(),
        })
    }
}

/// `0`, `1`, `0.0`, `1.0`, `true` and `false` are accepted.
fn parse_outcome(text: &str, row: usize) -> Result<Outcome, DataError> {
    let t = text.trim();
    let parsed = match t {
        "true" | "True" => Some(Outcome::Success),
        "false" | "False" => Some(Outcome::Failure),
        _ => t
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0)
            .and_then(|v| Outcome::from_class(v as i64)),
    };
    parsed.ok_or_else(|| DataError::InvalidOutcome {
        row,
        value: text.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let column = |name: &'static str| -> Result<usize, DataError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(DataError::MissingColumn(name))
    };
    let site_idx = column(COL_SITE)?;
    let payload_idx = column(COL_PAYLOAD)?;
    let outcome_idx = column(COL_OUTCOME)?;
    let booster_idx = column(COL_BOOSTER)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        records.push(LaunchRecord {
            site: cell(site_idx).trim().to_string(),
            payload_mass: parse_payload(cell(payload_idx), row_no)?,
            outcome: parse_outcome(cell(outcome_idx), row_no)?,
            booster_category: cell(booster_idx).trim().to_string(),
        });
    }

    Ok(LaunchDataset::from_records(records))
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
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let field = |name: &'static str| obj.get(name).ok_or(DataError::MissingColumn(name));

        records.push(LaunchRecord {
            site: json_to_string(field(COL_SITE)?),
            payload_mass: match field(COL_PAYLOAD)? {
                JsonValue::Number(n) => checked_payload(n.as_f64().unwrap_or(f64::NAN), i)?,
                JsonValue::String(s) => parse_payload(s, i)?,
                other => return Err(invalid_payload(i, other).into()),
            },
            outcome: match field(COL_OUTCOME)? {
                JsonValue::Bool(true) => Outcome::Success,
                JsonValue::Bool(false) => Outcome::Failure,
                JsonValue::Number(n) => parse_outcome(&n.to_string(), i)?,
                JsonValue::String(s) => parse_outcome(s, i)?,
                other => {
                    return Err(DataError::InvalidOutcome {
                        row: i,
                        value: other.to_string(),
                    }
                    .into())
                }
            },
            booster_category: json_to_string(field(COL_BOOSTER)?),
        });
    }

    Ok(LaunchDataset::from_records(records))
}

fn json_to_string(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn invalid_payload(row: usize, val: &JsonValue) -> DataError {
    DataError::InvalidPayload {
        row,
        value: val.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing launch records.
///
/// Column types accepted:
/// - `Launch Site`, `Booster Version Category`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`: Int32, Int64, Float32 or Float64
/// - `class`: any of the above numeric types, or Boolean
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let site_col = batch_column(&batch, COL_SITE)?;
        let payload_col = batch_column(&batch, COL_PAYLOAD)?;
        let outcome_col = batch_column(&batch, COL_OUTCOME)?;
        let booster_col = batch_column(&batch, COL_BOOSTER)?;

        for i in 0..batch.num_rows() {
            let row = row_offset + i;
            let payload = extract_f64(payload_col, i, row, COL_PAYLOAD)?
                .ok_or_else(|| DataError::InvalidPayload {
                    row,
                    value: "null".to_string(),
                })?;

            records.push(LaunchRecord {
                site: extract_string(site_col, i, row, COL_SITE)?,
                payload_mass: checked_payload(payload, row)?,
                outcome: extract_outcome(outcome_col, i, row)?,
                booster_category: extract_string(booster_col, i, row, COL_BOOSTER)?,
            });
        }
        row_offset += batch.num_rows();
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn batch_column<'b>(
    batch: &'b RecordBatch,
    name: &'static str,
) -> Result<&'b ArrayRef, DataError> {
    batch
        .schema()
        .index_of(name)
        .map(|i| batch.column(i))
        .map_err(|_| DataError::MissingColumn(name))
}

fn unsupported(col: &ArrayRef, row: usize, column: &'static str) -> DataError {
    DataError::UnsupportedType {
        row,
        column,
        data_type: format!("{:?}", col.data_type()),
    }
}

/// Read a string cell; null becomes the empty string.
fn extract_string(
    col: &ArrayRef,
    i: usize,
    row: usize,
    column: &'static str,
) -> Result<String, DataError> {
    if col.is_null(i) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(i).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(i).to_string()),
        _ => Err(unsupported(col, row, column)),
    }
}

/// Read a numeric cell as `f64`; `None` for null.
fn extract_f64(
    col: &ArrayRef,
    i: usize,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, DataError> {
    if col.is_null(i) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int32 => col.as_primitive::<Int32Type>().value(i) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(i) as f64,
        DataType::Float32 => col.as_primitive::<Float32Type>().value(i) as f64,
        DataType::Float64 => col.as_primitive::<Float64Type>().value(i),
        _ => return Err(unsupported(col, row, column)),
    };
    Ok(Some(value))
}

fn extract_outcome(col: &ArrayRef, i: usize, row: usize) -> Result<Outcome, DataError> {
    if let DataType::Boolean = col.data_type() {
        let arr = col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .ok_or_else(|| unsupported(col, row, COL_OUTCOME))?;
        if arr.is_null(i) {
            return Err(DataError::InvalidOutcome {
                row,
                value: "null".to_string(),
            });
        }
        return Ok(if arr.value(i) {
            Outcome::Success
        } else {
            Outcome::Failure
        });
    }

    match extract_f64(col, i, row, COL_OUTCOME)? {
        Some(v) => parse_outcome(&v.to_string(), row),
        None => Err(DataError::InvalidOutcome {
            row,
            value: "null".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use arrow::array::{Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("launch-dash-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn data_error(err: anyhow::Error) -> DataError {
        err.downcast::<DataError>().expect("expected a DataError")
    }

    const CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,VAFB SLC-4E,1,9600.0,F9 B4 B1041.1,B4
4,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    #[test]
    fn loads_csv_and_ignores_extra_columns() {
        let ds = load_file(&temp_file("launches.csv", CSV)).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.records[2].payload_mass, 9600.0);
        assert_eq!(ds.records[2].outcome, Outcome::Success);
        assert_eq!(ds.records[3].booster_category, "FT");
        assert_eq!(ds.payload_bounds(), Some((0.0, 9600.0)));
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let path = temp_file(
            "no_class.csv",
            "Launch Site,Payload Mass (kg),Booster Version Category\nA,1.0,FT\n",
        );
        assert_eq!(
            data_error(load_file(&path).unwrap_err()),
            DataError::MissingColumn("class")
        );
    }

    #[test]
    fn csv_rejects_bad_outcome_and_negative_payload() {
        let header = "Launch Site,Payload Mass (kg),class,Booster Version Category\n";

        let bad_class = temp_file("bad_class.csv", &format!("{header}A,100,2,FT\n"));
        assert_eq!(
            data_error(load_file(&bad_class).unwrap_err()),
            DataError::InvalidOutcome { row: 0, value: "2".into() }
        );

        let negative = temp_file("negative.csv", &format!("{header}A,10,1,FT\nB,-5,1,FT\n"));
        assert!(matches!(
            data_error(load_file(&negative).unwrap_err()),
            DataError::InvalidPayload { row: 1, .. }
        ));
    }

    #[test]
    fn loads_records_oriented_json() {
        let json = r#"[
            {"Launch Site": "CCAFS SLC-40", "Payload Mass (kg)": 3600, "class": 1,
             "Booster Version Category": "B5"},
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 5300.5, "class": false,
             "Booster Version Category": "FT"}
        ]"#;
        let ds = load_file(&temp_file("launches.json", json)).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].payload_mass, 3600.0);
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
        assert_eq!(ds.records[1].site, "KSC LC-39A");
    }

    #[test]
    fn json_missing_field_is_reported() {
        let json = r#"[{"Launch Site": "A", "class": 1, "Booster Version Category": "FT"}]"#;
        let path = temp_file("missing.json", json);
        assert_eq!(
            data_error(load_file(&path).unwrap_err()),
            DataError::MissingColumn("Payload Mass (kg)")
        );
    }

    /// Write a four-column launch table with the given payload and class arrays.
    fn write_parquet(name: &str, payload: ArrayRef, class: ArrayRef) -> PathBuf {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, payload.data_type().clone(), true),
            Field::new(COL_OUTCOME, class.data_type().clone(), true),
            Field::new(COL_BOOSTER, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                payload,
                class,
                Arc::new(StringArray::from(vec!["v1.1", "B5"])),
            ],
        )
        .unwrap();

        let path = temp_file(name, "");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    fn payloads_and_outcomes(ds: &LaunchDataset) -> Vec<(f64, Outcome)> {
        ds.records.iter().map(|r| (r.payload_mass, r.outcome)).collect()
    }

    #[test]
    fn loads_parquet() {
        let path = write_parquet(
            "launches.parquet",
            Arc::new(Float64Array::from(vec![500.0, 9000.0])),
            Arc::new(Int64Array::from(vec![0, 1])),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].outcome, Outcome::Failure);
        assert_eq!(ds.records[1].payload_mass, 9000.0);
        assert_eq!(ds.records[1].booster_category, "B5");
    }

    #[test]
    fn parquet_boolean_class_and_int32_payload() {
        let path = write_parquet(
            "bool_class.parquet",
            Arc::new(Int32Array::from(vec![10, 20])),
            Arc::new(BooleanArray::from(vec![true, false])),
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(
            payloads_and_outcomes(&ds),
            vec![(10.0, Outcome::Success), (20.0, Outcome::Failure)]
        );
    }

    #[test]
    fn parquet_float_class_and_float32_payload() {
        let path = write_parquet(
            "float_class.parquet",
            Arc::new(Float32Array::from(vec![2.5, 4000.0])),
            Arc::new(Float64Array::from(vec![1.0, 0.0])),
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(
            payloads_and_outcomes(&ds),
            vec![(2.5, Outcome::Success), (4000.0, Outcome::Failure)]
        );
    }

    #[test]
    fn parquet_rejects_nan_payload_and_fractional_class() {
        let nan = write_parquet(
            "nan_payload.parquet",
            Arc::new(Float64Array::from(vec![100.0, f64::NAN])),
            Arc::new(Int64Array::from(vec![1, 1])),
        );
        assert!(matches!(
            data_error(load_file(&nan).unwrap_err()),
            DataError::InvalidPayload { row: 1, .. }
        ));

        let fractional = write_parquet(
            "half_class.parquet",
            Arc::new(Float64Array::from(vec![100.0, 200.0])),
            Arc::new(Float64Array::from(vec![0.5, 1.0])),
        );
        assert!(matches!(
            data_error(load_file(&fractional).unwrap_err()),
            DataError::InvalidOutcome { row: 0, .. }
        ));
    }

    #[test]
    fn csv_rejects_non_numeric_and_non_finite_payloads() {
        let header = "Launch Site,Payload Mass (kg),class,Booster Version Category\n";
        for (name, payload) in [("nan.csv", "nan"), ("heavy.csv", "heavy"), ("inf.csv", "inf")] {
            let path = temp_file(name, &format!("{header}A,{payload},1,FT\n"));
            assert_eq!(
                data_error(load_file(&path).unwrap_err()),
                DataError::InvalidPayload {
                    row: 0,
                    value: payload.to_string()
                },
                "payload {payload}"
            );
        }
    }

    #[test]
    fn missing_default_file_starts_empty() {
        let path = std::env::temp_dir().join("launch-dash-absent-default.csv");
        assert!(initial_dataset(&path, false).unwrap().is_none());
    }

    #[test]
    fn missing_explicit_file_is_fatal() {
        let path = std::env::temp_dir().join("launch-dash-absent-explicit.csv");
        assert!(initial_dataset(&path, true).is_err());
    }

    #[test]
    fn broken_default_file_is_fatal() {
        let path = temp_file("broken_default.csv", "Launch Site,class\nA,1\n");
        let err = initial_dataset(&path, false).unwrap_err();
        assert_eq!(data_error(err), DataError::MissingColumn(COL_PAYLOAD));
    }

    #[test]
    fn startup_accepts_header_only_file() {
        let header = "Launch Site,Payload Mass (kg),class,Booster Version Category\n";
        let ds = initial_dataset(&temp_file("header_only.csv", header), true)
            .unwrap()
            .expect("dataset");
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds(), None);
    }

    #[test]
    fn startup_loads_existing_file() {
        let ds = initial_dataset(&temp_file("startup.csv", CSV), true)
            .unwrap()
            .expect("dataset");
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn unsupported_extension() {
        let path = temp_file("launches.xlsx", "");
        assert_eq!(
            data_error(load_file(&path).unwrap_err()),
            DataError::UnsupportedExtension("xlsx".into())
        );
    }
}
