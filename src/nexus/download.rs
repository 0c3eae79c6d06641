// Single-file downloads with bounded retries

use crate::constants;
use crate::nexus::client::NexusClient;
use crate::ui;
use log::debug;
use reqwest::StatusCode;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// How a single download ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Fetched and written to the destination
    Downloaded,
    /// The destination already existed; nothing was fetched
    AlreadyPresent,
    /// The server answered 404
    Missing,
    /// Every attempt failed; holds the last error
    Failed(String),
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("file does not exist on the server (404)")]
    NotFound,
    #[error("server responded with {0}")]
    Status(StatusCode),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// A missing file stays missing; everything else may be transient
    pub fn is_retryable(&self) -> bool {
        !matches!(self, DownloadError::NotFound)
    }
}

/// `<dest>.part`, where a transfer is written before being moved into place
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(constants::PARTIAL_SUFFIX);
    PathBuf::from(name)
}

impl NexusClient {
    /// Download `url` to `dest`, trying at most `attempts` times.
    ///
    /// An existing `dest` is left alone. A 404 ends the download immediately
    /// without using up the remaining attempts.
    pub async fn fetch(&self, url: &str, dest: &Path, attempts: u32) -> DownloadOutcome {
        if dest.exists() {
            return DownloadOutcome::AlreadyPresent;
        }

        if let Some(parent) = dest.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            return DownloadOutcome::Failed(format!(
                "cannot create {}: {}",
                parent.display(),
                e
            ));
        }

        let attempts = attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.fetch_once(url, dest).await {
                Ok(()) => {
                    if attempt > 1 {
                        debug!("{} succeeded after {} attempt(s)", url, attempt);
                    }
                    return DownloadOutcome::Downloaded;
                }
                Err(DownloadError::NotFound) => {
                    discard_partial(dest).await;
                    return DownloadOutcome::Missing;
                }
                Err(e) if e.is_retryable() && attempt < attempts => {
                    debug!("Download of {} failed (attempt {}): {}", url, attempt, e);
                    ui::warning(&format!(
                        "    Download failed, retrying ({}/{}): {}",
                        attempt, attempts, e
                    ));
                }
                Err(e) => {
                    discard_partial(dest).await;
                    return DownloadOutcome::Failed(e.to_string());
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        let mut response = self
            .get(url)
            .timeout(Duration::from_secs(constants::DOWNLOAD_TIMEOUT_SECS))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DownloadError::NotFound);
        }
        if !status.is_success() {
            return Err(DownloadError::Status(status));
        }

        let partial = partial_path(dest);
        let mut file = tokio::fs::File::create(&partial).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&partial, dest).await?;
        Ok(())
    }
}

async fn discard_partial(dest: &Path) {
    let partial = partial_path(dest);
    if partial.exists() {
        if let Err(e) = tokio::fs::remove_file(&partial).await {
            debug!("Could not remove {}: {}", partial.display(), e);
        }
    }
}
