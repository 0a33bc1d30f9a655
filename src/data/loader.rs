use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Int64Type};
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{RentalDataset, RentalRecord, Season};
use crate::error::{DashboardError, Result};

/// Where the original dashboard reads its cleaned day-level data from.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/dMorran/Submiss/main/dashboard/main_data.csv";

pub const COL_DATE: &str = "dteday";
pub const COL_SEASON: &str = "season";
pub const COL_MONTH: &str = "mnth";
pub const COL_CASUAL: &str = "casual";
pub const COL_REGISTERED: &str = "registered";
pub const COL_TOTAL: &str = "cnt";

const REQUIRED_COLUMNS: [&str; 6] = [
    COL_DATE,
    COL_SEASON,
    COL_MONTH,
    COL_CASUAL,
    COL_REGISTERED,
    COL_TOTAL,
];

/// Largest per-row count accepted. Sums of up to 2^32 such rows fit in a
/// `u64`, so aggregation can add without overflow checks.
pub const MAX_COUNT: u64 = u32::MAX as u64;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// On-disk / on-wire layout of a source, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
    Parquet,
}

impl SourceFormat {
    /// Guess the format from a path or URL. Query strings and fragments are
    /// ignored; anything unrecognised is read as CSV.
    pub fn from_location(location: &str) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location);
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "parquet" | "pq" => SourceFormat::Parquet,
            "json" => SourceFormat::Json,
            _ => SourceFormat::Csv,
        }
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Load a rental dataset from a URL or local path.
///
/// One blocking fetch, no retries. Any failure aborts the whole load; no
/// partial dataset is ever returned.
pub fn load_source(location: &str) -> Result<RentalDataset> {
    log::info!("Loading rental data from {location}");
    let bytes = read_source(location)?;
    let dataset = parse_bytes(location, SourceFormat::from_location(location), bytes)?;

    match dataset.full_range() {
        Some(span) => log::info!("Loaded {} rows spanning {span}", dataset.len()),
        None => log::warn!("{location} contains no rows"),
    }
    Ok(dataset)
}

/// Load a local file. Convenience wrapper over [`load_source`].
pub fn load_file(path: &Path) -> Result<RentalDataset> {
    load_source(&path.to_string_lossy())
}

fn read_source(location: &str) -> Result<Bytes> {
    if is_remote(location) {
        let resp = reqwest::blocking::get(location)
            .and_then(|r| r.error_for_status())
            .map_err(|e| DashboardError::unavailable(location, e))?;
        resp.bytes().map_err(|e| DashboardError::unavailable(location, e))
    } else {
        std::fs::read(location)
            .map(Bytes::from)
            .map_err(|e| DashboardError::unavailable(location, e))
    }
}

/// Decode an in-memory source into a sorted dataset.
pub fn parse_bytes(source_name: &str, format: SourceFormat, bytes: Bytes) -> Result<RentalDataset> {
    let records = match format {
        SourceFormat::Csv => parse_csv(source_name, bytes.as_ref())?,
        SourceFormat::Json => parse_json(source_name, &bytes)?,
        SourceFormat::Parquet => parse_parquet(source_name, bytes)?,
    };
    report_quality(&records);
    Ok(RentalDataset::from_records(records))
}

/// Log rows that violate the soft invariants. `cnt` stays authoritative.
fn report_quality(records: &[RentalRecord]) {
    let total_mismatch = records.iter().filter(|r| !r.total_is_consistent()).count();
    if total_mismatch > 0 {
        log::warn!("{total_mismatch} rows have cnt != casual + registered; using cnt as-is");
    }
    let month_mismatch = records.iter().filter(|r| !r.month_matches_date()).count();
    if month_mismatch > 0 {
        log::warn!("{month_mismatch} rows have a mnth value that disagrees with dteday");
    }
}

// ---------------------------------------------------------------------------
// Shared row validation
// ---------------------------------------------------------------------------

/// Parse a `dteday` cell. Accepts plain ISO dates and the datetime forms
/// pandas writes after `to_datetime`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Cell values of one row before range checks.
struct RawRow {
    date: NaiveDate,
    season: i64,
    month: i64,
    casual: i64,
    registered: i64,
    total: i64,
}

impl RawRow {
    fn into_record(self, row: usize) -> Result<RentalRecord> {
        let season = Season::from_code(self.season).ok_or_else(|| {
            DashboardError::schema(row, COL_SEASON, format!("season code {} is not in 1..=4", self.season))
        })?;
        let month = u32::try_from(self.month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| {
                DashboardError::schema(row, COL_MONTH, format!("month {} is not in 1..=12", self.month))
            })?;

        Ok(RentalRecord {
            date: self.date,
            season,
            month,
            casual_count: non_negative(self.casual, row, COL_CASUAL)?,
            registered_count: non_negative(self.registered, row, COL_REGISTERED)?,
            total_count: non_negative(self.total, row, COL_TOTAL)?,
        })
    }
}

fn non_negative(v: i64, row: usize, column: &'static str) -> Result<u64> {
    let count =
        u64::try_from(v).map_err(|_| DashboardError::schema(row, column, format!("count {v} is negative")))?;
    if count > MAX_COUNT {
        return Err(DashboardError::schema(row, column, format!("count {v} exceeds {MAX_COUNT}")));
    }
    Ok(count)
}

/// An integral float that fits in `i64`. `i64::MAX as f64` rounds up to
/// 2^63, hence the exclusive upper bound.
fn integral_f64(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| f as i64)
}

/// Integers may arrive as `985` or, after a float round-trip, `985.0`.
fn parse_int(s: &str, row: usize, column: &'static str) -> Result<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    s.parse::<f64>()
        .ok()
        .and_then(integral_f64)
        .ok_or_else(|| DashboardError::schema(row, column, format!("'{s}' is not an integer")))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row, then one row per day. Required columns are
/// `dteday, season, mnth, casual, registered, cnt`; any others are ignored.
/// Row numbers in errors count data rows from 1.
pub fn parse_csv<R: Read>(source_name: &str, reader: R) -> Result<Vec<RentalRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| DashboardError::unavailable(source_name, e))?
        .clone();

    let index_of = |column: &'static str| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or(DashboardError::MissingColumn { column })
    };
    let date_idx = index_of(COL_DATE)?;
    let season_idx = index_of(COL_SEASON)?;
    let month_idx = index_of(COL_MONTH)?;
    let casual_idx = index_of(COL_CASUAL)?;
    let registered_idx = index_of(COL_REGISTERED)?;
    let total_idx = index_of(COL_TOTAL)?;

    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| DashboardError::unavailable(source_name, e))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let date = parse_date(cell(date_idx)).ok_or_else(|| {
            DashboardError::schema(row, COL_DATE, format!("'{}' is not a date", cell(date_idx)))
        })?;

        let raw = RawRow {
            date,
            season: parse_int(cell(season_idx), row, COL_SEASON)?,
            month: parse_int(cell(month_idx), row, COL_MONTH)?,
            casual: parse_int(cell(casual_idx), row, COL_CASUAL)?,
            registered: parse_int(cell(registered_idx), row, COL_REGISTERED)?,
            total: parse_int(cell(total_idx), row, COL_TOTAL)?,
        };
        records.push(raw.into_record(row)?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "dteday": "2011-01-01", "season": 1, "mnth": 1,
///     "casual": 331, "registered": 654, "cnt": 985 },
///   ...
/// ]
/// ```
///
/// `dteday` may also be epoch milliseconds, which is what pandas emits for
/// datetime columns by default.
pub fn parse_json(source_name: &str, bytes: &[u8]) -> Result<Vec<RentalRecord>> {
    let root: JsonValue =
        serde_json::from_slice(bytes).map_err(|e| DashboardError::unavailable(source_name, e))?;
    let rows = root
        .as_array()
        .ok_or_else(|| DashboardError::unavailable(source_name, "expected top-level JSON array"))?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, value) in rows.iter().enumerate() {
        let row = i + 1;
        let obj = value.as_object().ok_or_else(|| {
            DashboardError::unavailable(source_name, format!("row {row} is not a JSON object"))
        })?;
        let field = |column: &'static str| {
            obj.get(column)
                .ok_or(DashboardError::MissingColumn { column })
        };

        let raw = RawRow {
            date: json_date(field(COL_DATE)?, row)?,
            season: json_int(field(COL_SEASON)?, row, COL_SEASON)?,
            month: json_int(field(COL_MONTH)?, row, COL_MONTH)?,
            casual: json_int(field(COL_CASUAL)?, row, COL_CASUAL)?,
            registered: json_int(field(COL_REGISTERED)?, row, COL_REGISTERED)?,
            total: json_int(field(COL_TOTAL)?, row, COL_TOTAL)?,
        };
        records.push(raw.into_record(row)?);
    }

    Ok(records)
}

fn json_date(val: &JsonValue, row: usize) -> Result<NaiveDate> {
    let parsed = match val {
        JsonValue::String(s) => parse_date(s),
        JsonValue::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    };
    parsed.ok_or_else(|| DashboardError::schema(row, COL_DATE, format!("{val} is not a date")))
}

fn json_int(val: &JsonValue, row: usize, column: &'static str) -> Result<i64> {
    match val {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_f64))
            .ok_or_else(|| DashboardError::schema(row, column, format!("{n} is not an integer"))),
        JsonValue::String(s) => parse_int(s, row, column),
        other => Err(DashboardError::schema(row, column, format!("{other} is not an integer"))),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same column names as the CSV layout.
///
/// - `dteday`: Utf8 / LargeUtf8 text, Date32, Date64 or any Timestamp
/// - counters and codes: any integer type (floats are accepted when integral
///   after the Int64 cast)
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
pub fn parse_parquet(source_name: &str, bytes: Bytes) -> Result<Vec<RentalRecord>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)
        .map_err(|e| DashboardError::unavailable(source_name, e))?;

    // A file with no row groups yields no batches, so check the schema up front.
    let file_schema = builder.schema();
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|name| file_schema.index_of(name).is_err())
    {
        return Err(DashboardError::MissingColumn { column });
    }
    let reader = builder
        .build()
        .map_err(|e| DashboardError::unavailable(source_name, e))?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(|e| DashboardError::unavailable(source_name, e))?;
        let schema = batch.schema();
        let column = |name: &'static str| {
            schema
                .index_of(name)
                .map(|i| batch.column(i))
                .map_err(|_| DashboardError::MissingColumn { column: name })
        };

        let dates = date_column(column(COL_DATE)?, records.len())?;
        let seasons = int_column(column(COL_SEASON)?, COL_SEASON, records.len())?;
        let months = int_column(column(COL_MONTH)?, COL_MONTH, records.len())?;
        let casual = int_column(column(COL_CASUAL)?, COL_CASUAL, records.len())?;
        let registered = int_column(column(COL_REGISTERED)?, COL_REGISTERED, records.len())?;
        let totals = int_column(column(COL_TOTAL)?, COL_TOTAL, records.len())?;

        for i in 0..batch.num_rows() {
            let row = records.len() + 1;
            let raw = RawRow {
                date: dates[i],
                season: seasons[i],
                month: months[i],
                casual: casual[i],
                registered: registered[i],
                total: totals[i],
            };
            records.push(raw.into_record(row)?);
        }
    }

    Ok(records)
}

// -- Arrow helpers --

/// Cast any numeric column to Int64 and collect it. `offset` is the number
/// of rows in earlier batches, used for error row numbers.
fn int_column(col: &ArrayRef, column: &'static str, offset: usize) -> Result<Vec<i64>> {
    let casted = cast(col, &DataType::Int64).map_err(|e| {
        DashboardError::schema(offset + 1, column, format!("{:?} is not numeric: {e}", col.data_type()))
    })?;
    let ints = casted.as_primitive::<Int64Type>();

    (0..ints.len())
        .map(|i| {
            if ints.is_null(i) {
                Err(DashboardError::schema(offset + i + 1, column, "null value"))
            } else {
                Ok(ints.value(i))
            }
        })
        .collect()
}

fn date_column(col: &ArrayRef, offset: usize) -> Result<Vec<NaiveDate>> {
    let bad = |i: usize, reason: String| DashboardError::schema(offset + i + 1, COL_DATE, reason);

    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            let text = cast(col, &DataType::Utf8).map_err(|e| bad(0, e.to_string()))?;
            let strings = text.as_string::<i32>();
            (0..strings.len())
                .map(|i| {
                    if strings.is_null(i) {
                        return Err(bad(i, "null value".to_string()));
                    }
                    let s = strings.value(i);
                    parse_date(s).ok_or_else(|| bad(i, format!("'{s}' is not a date")))
                })
                .collect()
        }
        other => {
            let days = cast(col, &DataType::Date32)
                .map_err(|e| bad(0, format!("{other:?} cannot be read as a date: {e}")))?;
            let days = days.as_primitive::<Date32Type>();
            (0..days.len())
                .map(|i| {
                    if days.is_null(i) {
                        return Err(bad(i, "null value".to_string()));
                    }
                    days.value_as_date(i)
                        .ok_or_else(|| bad(i, "date out of range".to_string()))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Date32Array, Int32Array, Int64Array};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::tests::date;

    const CSV: &str = "\
instant,dteday,season,yr,mnth,casual,registered,cnt
2,2011-01-02,1,0,1,131,670,801
1,2011-01-01,1,0,1,331,654,985
32,2011-02-01,1,0,2,47,1313,1360
";

    fn load_csv_str(text: &str) -> Result<RentalDataset> {
        parse_bytes("test.csv", SourceFormat::Csv, Bytes::from(text.to_owned()))
    }

    #[test]
    fn csv_rows_are_parsed_and_sorted() {
        let ds = load_csv_str(CSV).unwrap();
        assert_eq!(ds.len(), 3);
        let first = &ds.records()[0];
        assert_eq!(first.date, date(2011, 1, 1));
        assert_eq!(first.season, Season::Winter);
        assert_eq!(
            (first.casual_count, first.registered_count, first.total_count),
            (331, 654, 985)
        );
        assert_eq!(ds.max_date(), Some(date(2011, 2, 1)));
    }

    #[test]
    fn csv_accepts_datetime_dates_and_float_ints() {
        let text = "dteday,season,mnth,casual,registered,cnt\n\
                    2012-12-31 00:00:00,1,12,439.0,2290,2729\n";
        let ds = load_csv_str(text).unwrap();
        assert_eq!(ds.records()[0].date, date(2012, 12, 31));
        assert_eq!(ds.records()[0].casual_count, 439);
    }

    #[test]
    fn csv_out_of_range_float_is_rejected() {
        let text = "dteday,season,mnth,casual,registered,cnt\n2011-01-01,1,1,1,1,1e30\n";
        assert!(matches!(
            load_csv_str(text).unwrap_err(),
            DashboardError::Schema { row: 1, column: "cnt", .. }
        ));
        assert_eq!(integral_f64(9.0e18), Some(9_000_000_000_000_000_000));
        assert_eq!(integral_f64(9.3e18), None);
        assert_eq!(integral_f64(-1.0e19), None);
    }

    #[test]
    fn json_out_of_range_float_is_rejected() {
        let text = r#"[{"dteday": "2011-01-01", "season": 1, "mnth": 1, "casual": 1, "registered": 1, "cnt": 1e30}]"#;
        assert!(matches!(
            parse_bytes("x.json", SourceFormat::Json, Bytes::from(text)).unwrap_err(),
            DashboardError::Schema { row: 1, column: "cnt", .. }
        ));
    }

    #[test]
    fn counts_above_max_are_rejected() {
        let text = format!(
            "dteday,season,mnth,casual,registered,cnt\n2011-01-01,1,1,1,{},{}\n",
            MAX_COUNT + 1,
            MAX_COUNT + 2
        );
        assert!(matches!(
            load_csv_str(&text).unwrap_err(),
            DashboardError::Schema { row: 1, column: "registered", .. }
        ));
    }

    #[test]
    fn max_counts_aggregate_without_overflow() {
        let row = format!("2011-01-01,1,1,{MAX_COUNT},{MAX_COUNT},{MAX_COUNT}\n");
        let text = format!("dteday,season,mnth,casual,registered,cnt\n{}", row.repeat(3));
        let ds = load_csv_str(&text).unwrap();

        let summary = crate::data::aggregate::summarize(ds.records());
        assert_eq!(summary.daily.len(), 1);
        assert_eq!(summary.daily[0].revenue, 3 * MAX_COUNT);
        assert_eq!(summary.monthly_totals.rent_count, 3 * MAX_COUNT);
        assert_eq!(summary.seasons[0].revenue, 3 * MAX_COUNT);
    }

    #[test]
    fn csv_missing_column_is_schema_error() {
        let text = "dteday,season,mnth,casual,registered\n2011-01-01,1,1,1,1\n";
        let err = load_csv_str(text).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { column: "cnt" }));
        assert!(err.is_schema_error());
    }

    #[test]
    fn csv_bad_season_is_schema_error() {
        let text = "dteday,season,mnth,casual,registered,cnt\n2011-01-01,7,1,1,1,2\n";
        let err = load_csv_str(text).unwrap_err();
        assert!(matches!(err, DashboardError::Schema { row: 1, column: "season", .. }));
    }

    #[test]
    fn csv_bad_date_and_negative_count_are_rejected() {
        let bad_date = "dteday,season,mnth,casual,registered,cnt\n01/02/2011,1,1,1,1,2\n";
        assert!(matches!(
            load_csv_str(bad_date).unwrap_err(),
            DashboardError::Schema { column: "dteday", .. }
        ));

        let negative = "dteday,season,mnth,casual,registered,cnt\n\
                        2011-01-01,1,1,1,1,2\n\
                        2011-01-02,1,1,-4,1,2\n";
        assert!(matches!(
            load_csv_str(negative).unwrap_err(),
            DashboardError::Schema { row: 2, column: "casual", .. }
        ));
    }

    #[test]
    fn inconsistent_total_is_kept() {
        let text = "dteday,season,mnth,casual,registered,cnt\n2011-01-01,1,1,1,1,10\n";
        let ds = load_csv_str(text).unwrap();
        assert_eq!(ds.records()[0].total_count, 10);
    }

    #[test]
    fn json_records_with_epoch_millis() {
        let text = r#"[
            {"dteday": 1293926400000, "season": 1, "mnth": 1, "casual": 131, "registered": 670, "cnt": 801},
            {"dteday": "2011-01-01", "season": 1, "mnth": 1, "casual": 331, "registered": 654, "cnt": 985}
        ]"#;
        let ds = parse_bytes("test.json", SourceFormat::Json, Bytes::from(text)).unwrap();
        let dates: Vec<_> = ds.records().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2011, 1, 1), date(2011, 1, 2)]);
    }

    #[test]
    fn json_missing_key_and_bad_root() {
        let text = r#"[{"dteday": "2011-01-01", "season": 1, "casual": 1, "registered": 1, "cnt": 2}]"#;
        assert!(matches!(
            parse_bytes("x.json", SourceFormat::Json, Bytes::from(text)).unwrap_err(),
            DashboardError::MissingColumn { column: "mnth" }
        ));
        assert!(matches!(
            parse_bytes("x.json", SourceFormat::Json, Bytes::from(r#"{"a": 1}"#)).unwrap_err(),
            DashboardError::DataUnavailable { .. }
        ));
    }

    #[test]
    fn empty_parquet_missing_columns_is_schema_error() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_DATE, DataType::Utf8, false),
            Field::new(COL_SEASON, DataType::Int64, false),
        ]));
        let mut buf = Vec::new();
        let writer = ArrowWriter::try_new(&mut buf, schema, None).unwrap();
        writer.close().unwrap();

        let err = parse_bytes("t.parquet", SourceFormat::Parquet, Bytes::from(buf)).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { column: "mnth" }));
    }

    #[test]
    fn parquet_with_date32_column() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_DATE, DataType::Date32, false),
            Field::new(COL_SEASON, DataType::Int32, false),
            Field::new(COL_MONTH, DataType::Int32, false),
            Field::new(COL_CASUAL, DataType::Int64, false),
            Field::new(COL_REGISTERED, DataType::Int64, false),
            Field::new(COL_TOTAL, DataType::Int64, false),
        ]));
        // 15156 = 2011-07-01, 15157 = 2011-07-02
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Date32Array::from(vec![15157, 15156])),
                Arc::new(Int32Array::from(vec![3, 3])),
                Arc::new(Int32Array::from(vec![7, 7])),
                Arc::new(Int64Array::from(vec![1100, 900])),
                Arc::new(Int64Array::from(vec![3000, 2800])),
                Arc::new(Int64Array::from(vec![4100, 3700])),
            ],
        )
        .unwrap();

        let mut buf = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buf, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = parse_bytes("t.parquet", SourceFormat::Parquet, Bytes::from(buf)).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].date, date(2011, 7, 1));
        assert_eq!(ds.records()[0].season, Season::Summer);
        assert_eq!(ds.records()[1].total_count, 4100);
    }

    #[test]
    fn unreadable_path_is_data_unavailable() {
        let err = load_source("/definitely/not/here/day.csv").unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable { .. }));
        assert!(!err.is_schema_error());
    }

    #[test]
    fn format_from_location() {
        assert_eq!(SourceFormat::from_location("data/day.csv"), SourceFormat::Csv);
        assert_eq!(SourceFormat::from_location("day.PARQUET"), SourceFormat::Parquet);
        assert_eq!(
            SourceFormat::from_location("https://host/x/main_data.json?raw=true"),
            SourceFormat::Json
        );
        assert_eq!(SourceFormat::from_location("https://host.io/table"), SourceFormat::Csv);
        assert_eq!(SourceFormat::from_location(DEFAULT_SOURCE), SourceFormat::Csv);
    }

    #[test]
    fn date_formats() {
        assert_eq!(parse_date("2011-01-01"), Some(date(2011, 1, 1)));
        assert_eq!(parse_date("2011-01-01T00:00:00"), Some(date(2011, 1, 1)));
        assert_eq!(parse_date("not a date"), None);
    }
}
