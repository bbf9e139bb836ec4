//! CSV preview of an uploaded file.
//!
//! The dashboard shows the first rows of the chosen file before upload and
//! pre-fills the date column. `CsvPreview` has the same JSON shape as the
//! backend's `/api/preview` response, so the CLI can also fetch it remotely.

use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Number of rows the preview keeps by default.
pub const PREVIEW_ROWS: usize = 200;

/// Number of values inspected per column when guessing the date column.
const DATE_SAMPLE: usize = 20;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Header row plus the first rows of a CSV file, all as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvPreview {
    /// Read the header and at most `limit` rows.
    pub fn from_reader<R: Read>(reader: R, limit: usize) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(DashboardError::EmptyCsv);
        }

        let mut rows = Vec::new();
        for result in rdr.records().take(limit) {
            let record = result?;
            rows.push(record.iter().map(|v| v.trim().to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn from_bytes(bytes: &[u8], limit: usize) -> Result<Self> {
        Self::from_reader(bytes, limit)
    }

    /// Values of one column; short rows yield nothing for that column.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index).map(String::as_str))
    }

    /// The first column whose sampled, non-empty values all parse as dates.
    pub fn guess_date_column(&self) -> Option<&str> {
        self.headers.iter().enumerate().find_map(|(i, header)| {
            let sample: Vec<&str> = self
                .column(i)
                .filter(|v| !v.is_empty())
                .take(DATE_SAMPLE)
                .collect();
            if !sample.is_empty() && sample.iter().all(|v| parses_as_date(v)) {
                Some(header.as_str())
            } else {
                None
            }
        })
    }
}

/// Whether a cell looks like a date or a timestamp.
pub fn parses_as_date(value: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALES_CSV: &str = "store,date,sales\nA,2024-01-01,10\nA,2024-01-02,12\nB,2024-01-03,9\n";

    #[test]
    fn test_preview_headers_and_rows() {
        let preview = CsvPreview::from_bytes(SALES_CSV.as_bytes(), PREVIEW_ROWS).unwrap();
        assert_eq!(preview.headers, vec!["store", "date", "sales"]);
        assert_eq!(preview.rows.len(), 3);
        assert_eq!(preview.rows[2], vec!["B", "2024-01-03", "9"]);
    }

    #[test]
    fn test_preview_row_limit() {
        let mut csv = String::from("d,y\n");
        for i in 0..250 {
            csv.push_str(&format!("2024-01-01,{}\n", i));
        }
        let preview = CsvPreview::from_bytes(csv.as_bytes(), PREVIEW_ROWS).unwrap();
        assert_eq!(preview.rows.len(), 200);
        assert_eq!(preview.rows[199][1], "199");
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let err = CsvPreview::from_bytes(b"", PREVIEW_ROWS).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyCsv));
    }

    #[test]
    fn test_guess_date_column() {
        let preview = CsvPreview::from_bytes(SALES_CSV.as_bytes(), PREVIEW_ROWS).unwrap();
        assert_eq!(preview.guess_date_column(), Some("date"));

        let no_dates = CsvPreview::from_bytes(b"a,b\n1,x\n2,y\n", PREVIEW_ROWS).unwrap();
        assert_eq!(no_dates.guess_date_column(), None);
    }

    #[test]
    fn test_guess_skips_partially_dated_columns() {
        let csv = "when,ds\n2024-01-01,2024-01-01 00:00:00\nsoon,2024-01-02 00:00:00\n";
        let preview = CsvPreview::from_bytes(csv.as_bytes(), PREVIEW_ROWS).unwrap();
        assert_eq!(preview.guess_date_column(), Some("ds"));
    }

    #[test]
    fn test_parses_as_date() {
        assert!(parses_as_date("2024-02-29"));
        assert!(parses_as_date("02/29/2024"));
        assert!(parses_as_date("2024-01-01T08:30:00"));
        assert!(!parses_as_date("2023-02-29"));
        assert!(!parses_as_date("12.5"));
    }
}
