//! CSV ingestion: turn uploaded file bytes into an ordered `Record` sequence.
//!
//! The expected layout is a header row with columns `Date`, `GPT-4`,
//! `Gemini`, `PaLM-2`, `Claude`, `LLaMA-3.1`; rows map by column name, not
//! position. Parsing is deliberately forgiving:
//!
//! - a missing column, empty cell, or non-numeric cell becomes `f64::NAN`
//! - a row whose date cannot be parsed is skipped (and logged)
//! - a header-only file yields an empty record sequence, not an error
//!
//! Only reader-level failures (I/O, malformed CSV framing) surface as
//! [`IngestError`].

use crate::models::Record;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors at the file/reader level. Row-level problems never error; they
/// degrade to NaN values or skipped rows.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read CSV input: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Raw CSV row as it appears in the file. Every field is optional so that a
/// file missing columns still deserializes; coercion happens in `to_record`.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date", default)]
    date: Option<String>,
    #[serde(rename = "GPT-4", default)]
    gpt4: Option<String>,
    #[serde(rename = "Gemini", default)]
    gemini: Option<String>,
    #[serde(rename = "PaLM-2", default)]
    palm2: Option<String>,
    #[serde(rename = "Claude", default)]
    claude: Option<String>,
    #[serde(rename = "LLaMA-3.1", default)]
    llama31: Option<String>,
}

impl RawRow {
    fn to_record(&self) -> Option<Record> {
        let raw_date = self.date.as_deref().unwrap_or("");
        let date = parse_date(raw_date)?;
        let values = [
            coerce_numeric(self.gpt4.as_deref()),
            coerce_numeric(self.gemini.as_deref()),
            coerce_numeric(self.palm2.as_deref()),
            coerce_numeric(self.claude.as_deref()),
            coerce_numeric(self.llama31.as_deref()),
        ];
        Some(Record::new(date, values))
    }
}

/// Accepted date layouts, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Numeric coercion policy: non-numeric text (including the empty string)
/// yields NaN, silently. The layout treats NaN as zero thickness later.
fn coerce_numeric(cell: Option<&str>) -> f64 {
    cell.map_or(f64::NAN, |s| s.trim().parse::<f64>().unwrap_or(f64::NAN))
}

/// Load records from a CSV file on disk.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, IngestError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = parse_csv(file)?;
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse records from any reader of CSV text.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Record>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row_no, result) in rdr.deserialize::<RawRow>().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                warn!("skipping malformed CSV row {}: {err}", row_no + 1);
                continue;
            }
        };
        match raw.to_record() {
            Some(record) => records.push(record),
            None => warn!(
                "skipping CSV row {}: unparseable date {:?}",
                row_no + 1,
                raw.date.as_deref().unwrap_or("")
            ),
        }
    }
    Ok(records)
}

/// Convenience: parse records from an in-memory CSV string.
pub fn parse_csv_str(text: &str) -> Result<Vec<Record>, IngestError> {
    parse_csv(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesKey;

    #[test]
    fn parses_all_columns_by_name() {
        let csv = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
                   2024-01-01,10,5,1,2,3\n";
        let records = parse_csv_str(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value(SeriesKey::Gpt4), 10.0);
        assert_eq!(records[0].value(SeriesKey::Llama31), 3.0);
    }

    #[test]
    fn shuffled_header_order_still_maps() {
        let csv = "Claude,Date,LLaMA-3.1,GPT-4,Gemini,PaLM-2\n\
                   7,2024-02-01,1,2,3,4\n";
        let records = parse_csv_str(csv).unwrap();
        assert_eq!(records[0].value(SeriesKey::Claude), 7.0);
        assert_eq!(records[0].value(SeriesKey::Gpt4), 2.0);
    }

    #[test]
    fn non_numeric_cell_becomes_nan() {
        let csv = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
                   2024-01-01,10,oops,1,2,3\n";
        let records = parse_csv_str(csv).unwrap();
        assert!(records[0].value(SeriesKey::Gemini).is_nan());
        assert_eq!(records[0].value(SeriesKey::Gpt4), 10.0);
    }

    #[test]
    fn missing_column_becomes_nan() {
        let csv = "Date,GPT-4\n2024-01-01,10\n";
        let records = parse_csv_str(csv).unwrap();
        assert_eq!(records[0].value(SeriesKey::Gpt4), 10.0);
        assert!(records[0].value(SeriesKey::Claude).is_nan());
    }

    #[test]
    fn header_only_is_ok_and_empty() {
        let csv = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n";
        let records = parse_csv_str(csv).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn bad_date_row_is_skipped() {
        let csv = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
                   not-a-date,1,2,3,4,5\n\
                   2024-03-01,1,2,3,4,5\n";
        let records = parse_csv_str(csv).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn source_order_is_preserved() {
        let csv = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
                   2024-03-01,1,0,0,0,0\n\
                   2024-01-01,2,0,0,0,0\n";
        let records = parse_csv_str(csv).unwrap();
        assert!(records[0].date > records[1].date);
    }

    #[test]
    fn slash_dates_parse() {
        let csv = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
                   2024/01/15,1,2,3,4,5\n\
                   01/20/2024,1,2,3,4,5\n";
        let records = parse_csv_str(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date.format("%Y-%m-%d").to_string(), "2024-01-15");
        assert_eq!(records[1].date.format("%Y-%m-%d").to_string(), "2024-01-20");
    }
}
