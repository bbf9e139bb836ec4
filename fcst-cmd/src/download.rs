//! Download the forecast CSV.

use fcst_core::forecast::download_url;
use log::info;

use crate::{client, endpoint_url};

/// Fetch `/download/<target_col>` and write the body to `output`.
pub async fn run_download(server: &str, target_col: &str, output: &str) -> anyhow::Result<()> {
    let client = client()?;
    let url = endpoint_url(server, &download_url(target_col));
    fetch_to_file(&client, &url, output).await
}

pub(crate) async fn fetch_to_file(
    client: &reqwest::Client,
    url: &str,
    output: &str,
) -> anyhow::Result<()> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("Download from {} failed: {}", url, response.status());
    }
    let bytes = response.bytes().await?;
    tokio::fs::write(output, &bytes).await?;
    info!("Wrote {} bytes to {}", bytes.len(), output);
    Ok(())
}
