use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

use bike_rental_dashboard::data::loader::{
    SourceFormat, COL_CASUAL, COL_DATE, COL_MONTH, COL_REGISTERED, COL_SEASON, COL_TOTAL,
};

/// One output row, column names matching the cleaned day-level table.
#[derive(Debug, Serialize)]
struct SampleRow {
    instant: i64,
    dteday: String,
    season: i64,
    yr: i64,
    mnth: i64,
    casual: i64,
    registered: i64,
    cnt: i64,
}

/// Astronomical season code as used by the source data:
/// winter from Dec 21, spring from Mar 21, summer from Jun 21, fall from Sep 23.
fn season_code(date: NaiveDate) -> i64 {
    match (date.month(), date.day()) {
        (3, 21..=31) | (4..=5, _) | (6, 1..=20) => 2,
        (6, 21..=30) | (7..=8, _) | (9, 1..=22) => 3,
        (9, 23..=30) | (10..=11, _) | (12, 1..=20) => 4,
        _ => 1,
    }
}

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
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

/// Two years of daily rentals: a summer peak, weekend-heavy casual use and
/// year-on-year growth for registered riders.
fn generate_rows(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let first = NaiveDate::from_ymd_opt(2011, 1, 1).expect("valid start date");
    let last = NaiveDate::from_ymd_opt(2012, 12, 31).expect("valid end date");

    first
        .iter_days()
        .take_while(|d| *d <= last)
        .enumerate()
        .map(|(i, date)| {
            let yr = i64::from(date.year() - 2011);
            let phase = (f64::from(date.ordinal()) - 200.0) / 365.0 * 2.0 * std::f64::consts::PI;
            let seasonal = 0.55 + 0.45 * phase.cos();
            let weekend = date.weekday().number_from_monday() >= 6;

            let casual_base = (if weekend { 1400.0 } else { 600.0 }) * seasonal;
            let registered_base = (2500.0 + 1500.0 * yr as f64) * (0.6 + 0.4 * seasonal);

            let casual = rng.gauss(casual_base, casual_base * 0.15).max(0.0).round() as i64;
            let registered = rng
                .gauss(registered_base, registered_base * 0.1)
                .max(0.0)
                .round() as i64;

            SampleRow {
                instant: i as i64 + 1,
                dteday: date.format("%Y-%m-%d").to_string(),
                season: season_code(date),
                yr,
                mnth: i64::from(date.month()),
                casual,
                registered,
                cnt: casual + registered,
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let ints = |f: fn(&SampleRow) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_DATE, DataType::Utf8, false),
        Field::new(COL_SEASON, DataType::Int64, false),
        Field::new(COL_MONTH, DataType::Int64, false),
        Field::new(COL_CASUAL, DataType::Int64, false),
        Field::new(COL_REGISTERED, DataType::Int64, false),
        Field::new(COL_TOTAL, DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.dteday.as_str()).collect::<Vec<_>>(),
            )) as ArrayRef,
            ints(|r| r.season),
            ints(|r| r.mnth),
            ints(|r| r.casual),
            ints(|r| r.registered),
            ints(|r| r.cnt),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_rentals.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    let path = Path::new(&output_path);
    match SourceFormat::from_location(&output_path) {
        SourceFormat::Parquet => write_parquet(path, &rows)?,
        SourceFormat::Json => {
            let file = std::fs::File::create(path).context("creating JSON file")?;
            serde_json::to_writer_pretty(file, &rows).context("writing JSON")?;
        }
        SourceFormat::Csv => write_csv(path, &rows)?,
    }

    println!("Wrote {} days of rentals to {output_path}", rows.len());
    Ok(())
}
