//! Payload retrieval

use crate::error::Result;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Stream the body at `url` into `dest`, returning the number of bytes written
///
/// The body is written chunk by chunk and never held in memory as a whole.
/// `timeout` bounds the entire transfer. On error `dest` may hold a partial
/// body; removing it is the caller's job.
pub(crate) async fn stream_to_file(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    timeout: Duration,
) -> Result<u64> {
    let mut response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;

    let expected = response.content_length();
    let mut file = tokio::io::BufWriter::new(tokio::fs::File::create(dest).await?);
    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    file.into_inner().sync_all().await?;

    tracing::debug!(url, bytes = written, expected = ?expected, "payload received");
    Ok(written)
}
