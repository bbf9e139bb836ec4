//! Command implementations for the FCST CLI.
//!
//! Provides subcommands that talk to the same backend endpoints as the
//! dashboard: upload a CSV for forecasting, download the forecast CSV and
//! preview a file.

use std::time::Duration;

use clap::Subcommand;

pub mod download;
pub mod preview;
pub mod upload;

/// Flask development server address.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(Subcommand)]
pub enum Command {
    /// Upload a CSV and print the returned forecast
    Upload {
        /// Path to the CSV file
        #[arg(short, long)]
        file: String,

        /// Column to forecast
        #[arg(short, long)]
        target_col: String,

        /// Column holding the dates
        #[arg(short, long)]
        date_col: Option<String>,

        /// Days to forecast ahead (server default: 30)
        #[arg(long)]
        horizon: Option<u32>,

        /// Also download the forecast CSV to this path
        #[arg(long)]
        download: Option<String>,
    },

    /// Download the forecast CSV for a target column
    Download {
        /// Target column of a previous upload
        #[arg(short, long)]
        target_col: String,

        /// Output path for the forecast CSV
        #[arg(short, long)]
        output: String,
    },

    /// Show the header, guessed date column and first rows of a CSV
    Preview {
        /// Path to the CSV file
        #[arg(short, long)]
        file: String,

        /// Number of rows to show
        #[arg(short, long, default_value_t = 10)]
        rows: usize,

        /// Ask the backend's preview endpoint instead of parsing locally
        #[arg(long)]
        remote: bool,
    },
}

pub async fn run(server: &str, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Upload {
            file,
            target_col,
            date_col,
            horizon,
            download,
        } => {
            let request = upload::UploadRequest {
                file,
                target_col,
                date_col,
                horizon,
            };
            upload::run_upload(server, &request, download.as_deref()).await
        }
        Command::Download { target_col, output } => {
            download::run_download(server, &target_col, &output).await
        }
        Command::Preview { file, rows, remote } => {
            preview::run_preview(server, &file, rows, remote).await
        }
    }
}

/// HTTP client shared by the commands. Training a model can take a while.
pub(crate) fn client() -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(300))
        .build()?)
}

/// Join the server base URL and an absolute API path.
pub fn endpoint_url(server: &str, path: &str) -> String {
    format!("{}{}", server.trim_end_matches('/'), path)
}

/// Build the multipart `file` part from a path on disk.
pub(crate) async fn file_part(path: &str) -> anyhow::Result<reqwest::multipart::Part> {
    let bytes = tokio::fs::read(path).await?;
    let name = std::path::Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv")
        .to_string();
    Ok(reqwest::multipart::Part::bytes(bytes)
        .file_name(name)
        .mime_str("text/csv")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("http://localhost:5000/", "/api/upload"),
            "http://localhost:5000/api/upload"
        );
        assert_eq!(
            endpoint_url("http://localhost:5000", "/download/sales"),
            "http://localhost:5000/download/sales"
        );
    }

    #[test]
    fn test_parse_upload_args() {
        let cli = TestCli::parse_from([
            "fcst", "upload", "-f", "sales.csv", "-t", "sales", "--horizon", "14",
        ]);
        match cli.command {
            Command::Upload {
                file,
                target_col,
                date_col,
                horizon,
                download,
            } => {
                assert_eq!(file, "sales.csv");
                assert_eq!(target_col, "sales");
                assert_eq!(date_col, None);
                assert_eq!(horizon, Some(14));
                assert_eq!(download, None);
            }
            _ => panic!("expected upload"),
        }
    }

    #[test]
    fn test_parse_preview_defaults() {
        let cli = TestCli::parse_from(["fcst", "preview", "--file", "x.csv"]);
        match cli.command {
            Command::Preview { rows, remote, .. } => {
                assert_eq!(rows, 10);
                assert!(!remote);
            }
            _ => panic!("expected preview"),
        }
    }
}
