use super::client::Payload;
use super::gateway::Gateway;
use super::response::ApiResponse;
use crate::error::{AuthRelayError, Result};
use crate::util::format_date;
use chrono::Local;
use futures::{Stream, StreamExt};
use regex::Regex;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Method;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// A downloaded blob saved to disk, ready to be opened
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub bytes: u64,
}

impl Gateway {
    /// POST without credentials and save the binary answer to disk.
    ///
    /// Failures are logged and returned.
    pub async fn download(&self, path: &str, payload: Option<Value>) -> Result<DownloadedFile> {
        let result = self.fetch_blob(path, payload).await;
        if let Err(e) = &result {
            error!(path, error = %e, "download failed");
        }
        result
    }

    async fn fetch_blob(&self, path: &str, payload: Option<Value>) -> Result<DownloadedFile> {
        let payload = payload.map(Payload::Json).unwrap_or(Payload::Empty);
        let response = self
            .client
            .request(Method::POST, path, &payload, None)?
            .send()
            .await?;

        if !response.status().is_success() {
            let failed = ApiResponse::from_response(response).await?;
            return Err(AuthRelayError::RequestFailed {
                status: failed.status,
                body: failed.body,
            });
        }

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(file_name_from_disposition)
            .unwrap_or_else(fallback_file_name);

        tokio::fs::create_dir_all(&self.download_dir).await?;
        let target = self.download_dir.join(file_name);
        let stream = response.bytes_stream().map(|chunk| chunk.map_err(AuthRelayError::from));
        let written = save_stream(stream, &target).await?;

        debug!(path = %target.display(), bytes = written, "download saved");
        Ok(DownloadedFile {
            path: target,
            bytes: written,
        })
    }
}

/// Write a byte stream to `target`, returning the number of bytes written.
///
/// Data goes to a `.part` sibling first and is renamed into place only once
/// the whole stream arrived; on failure the partial file is removed.
pub async fn save_stream<S, B>(stream: S, target: &Path) -> Result<u64>
where
    S: Stream<Item = Result<B>>,
    B: AsRef<[u8]>,
{
    let mut partial = target.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    match write_all_chunks(stream, &partial).await {
        Ok(written) => {
            tokio::fs::rename(&partial, target).await?;
            Ok(written)
        }
        Err(e) => {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %partial.display(), error = %cleanup, "could not remove partial download");
                }
            }
            Err(e)
        }
    }
}

async fn write_all_chunks<S, B>(stream: S, path: &Path) -> Result<u64>
where
    S: Stream<Item = Result<B>>,
    B: AsRef<[u8]>,
{
    let mut file = File::create(path).await?;
    let mut written = 0u64;
    let mut stream = std::pin::pin!(stream);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let bytes = chunk.as_ref();
        file.write_all(bytes).await?;
        written += bytes.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

fn disposition_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"filename(\*)?=(?:UTF-8'')?"?([^";]+)"?"#).ok())
        .as_ref()
}

/// Pull a bare file name out of a `Content-Disposition` header.
/// Extended `filename*=` values are percent-decoded.
pub fn file_name_from_disposition(header: &str) -> Option<String> {
    let captures = disposition_pattern()?.captures(header)?;
    let raw = captures.get(2)?.as_str().trim();
    let name = if captures.get(1).is_some() {
        urlencoding::decode(raw).ok()?.into_owned()
    } else {
        raw.to_string()
    };
    // Never let the server pick a directory
    Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

fn fallback_file_name() -> String {
    format!("download-{}-{}.xlsx", format_date(&Local::now()), Uuid::new_v4())
}
