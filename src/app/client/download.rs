//! Streaming file download with atomic writes
//!
//! The response body is streamed chunk by chunk into a `.part` file which is
//! renamed into place once the copy completes, so an interrupted download
//! never leaves a truncated file at the destination. Each failure stage maps
//! to its own [`DownloadError`] variant.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::constants::files;
use crate::errors::{DownloadError, DownloadResult, FetchError};

/// File download operations handler
pub struct Downloader<'a> {
    client: &'a Client,
}

impl<'a> Downloader<'a> {
    /// Creates a new Downloader on top of an existing HTTP client
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Downloads a playback URL to the given path.
    ///
    /// Returns the number of bytes written. Fails with
    /// [`DownloadError::DestinationExists`] when the destination is already
    /// present and `force` is false.
    pub async fn download_to_path(
        &self,
        url: &str,
        destination: &Path,
        force: bool,
    ) -> DownloadResult<u64> {
        if destination.exists() && !force {
            return Err(DownloadError::DestinationExists {
                path: destination.to_path_buf(),
            });
        }

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|source| {
                    DownloadError::CreateDestination {
                        path: destination.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        let temp_path = temp_file_path(destination);
        let result = self.copy_to_temp(url, &temp_path).await;
        let written = match result {
            Ok(written) => written,
            Err(e) => {
                // best-effort cleanup of the partial file
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };

        tokio::fs::rename(&temp_path, destination)
            .await
            .map_err(|source| DownloadError::Copy {
                path: destination.to_path_buf(),
                source,
            })?;

        tracing::info!(
            "downloaded {} bytes to {}",
            written,
            destination.display()
        );
        Ok(written)
    }

    async fn copy_to_temp(&self, url: &str, temp_path: &Path) -> DownloadResult<u64> {
        let parsed = Url::parse(url).map_err(|source| DownloadError::Request {
            url: url.to_string(),
            source: FetchError::InvalidUrl {
                url: url.to_string(),
                source,
            },
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| DownloadError::Request {
                url: url.to_string(),
                source: FetchError::Transport(source),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(DownloadError::Request {
                url: url.to_string(),
                source: FetchError::Status {
                    url: url.to_string(),
                    status,
                },
            });
        }

        let mut file =
            File::create(temp_path)
                .await
                .map_err(|source| DownloadError::CreateDestination {
                    path: temp_path.to_path_buf(),
                    source,
                })?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| DownloadError::Request {
                url: url.to_string(),
                source: FetchError::Transport(source),
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|source| DownloadError::Copy {
                    path: temp_path.to_path_buf(),
                    source,
                })?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|source| DownloadError::Copy {
            path: temp_path.to_path_buf(),
            source,
        })?;

        Ok(written)
    }
}

fn temp_file_path(destination: &Path) -> PathBuf {
    destination.with_extension(format!(
        "{}{}",
        destination
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or(""),
        files::TEMP_FILE_SUFFIX
    ))
}
