//! Preview a CSV file, locally or through the backend.

use std::io;

use fcst_core::endpoints;
use fcst_core::preview::CsvPreview;
use log::info;

use crate::{client, endpoint_url, file_part};

/// Print the header, the guessed date column and the first `rows` rows.
pub async fn run_preview(server: &str, file: &str, rows: usize, remote: bool) -> anyhow::Result<()> {
    let preview = if remote {
        fetch_remote(server, file).await?
    } else {
        let bytes = tokio::fs::read(file).await?;
        CsvPreview::from_bytes(&bytes, rows)?
    };

    info!("{} preview rows for {}", preview.rows.len(), file);
    match preview.guess_date_column() {
        Some(col) => println!("Date column: {}", col),
        None => println!("Date column: none detected"),
    }
    write_table(&preview, rows, io::stdout())
}

async fn fetch_remote(server: &str, file: &str) -> anyhow::Result<CsvPreview> {
    let url = endpoint_url(server, endpoints::PREVIEW);
    let form = reqwest::multipart::Form::new().part("file", file_part(file).await?);
    let response = client()?.post(&url).multipart(form).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("Preview from {} failed: {}", url, response.status());
    }
    Ok(response.json::<CsvPreview>().await?)
}

/// Write the header and up to `rows` rows as CSV.
pub fn write_table<W: io::Write>(preview: &CsvPreview, rows: usize, out: W) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);
    wtr.write_record(&preview.headers)?;
    for row in preview.rows.iter().take(rows) {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_table_limits_rows() {
        let preview = CsvPreview {
            headers: vec!["date".to_string(), "sales".to_string()],
            rows: vec![
                vec!["2024-01-01".to_string(), "10".to_string()],
                vec!["2024-01-02".to_string(), "12, approx".to_string()],
                vec!["2024-01-03".to_string(), "9".to_string()],
            ],
        };
        let mut out = Vec::new();
        write_table(&preview, 2, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "date,sales\n2024-01-01,10\n2024-01-02,\"12, approx\"\n"
        );
    }
}
