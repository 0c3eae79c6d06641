// Mirror module: search, filter snapshots, download into the local tree

use crate::asset::AssetRecord;
use crate::config::Config;
use crate::maven::latest_snapshots;
use crate::nexus::{DownloadOutcome, NexusClient, SearchQuery, search};
use crate::ui;
use anyhow::Result;
use futures::stream::{self, StreamExt};
use log::{debug, info};

/// Final per-file result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Fetched(DownloadOutcome),
    /// The record lacked a usable path or download URL
    Invalid,
}

/// Aggregate counts reported at the end of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub downloaded: usize,
    pub existing: usize,
    pub missing: usize,
    pub invalid: usize,
    pub failed: usize,
}

impl Summary {
    pub fn record(&mut self, status: &FileStatus) {
        match status {
            FileStatus::Fetched(DownloadOutcome::Downloaded) => self.downloaded += 1,
            FileStatus::Fetched(DownloadOutcome::AlreadyPresent) => self.existing += 1,
            FileStatus::Fetched(DownloadOutcome::Missing) => self.missing += 1,
            FileStatus::Fetched(DownloadOutcome::Failed(_)) => self.failed += 1,
            FileStatus::Invalid => self.invalid += 1,
        }
    }

    /// Files now present locally, fetched in this run or before
    pub fn success(&self) -> usize {
        self.downloaded + self.existing
    }

    pub fn skipped(&self) -> usize {
        self.missing + self.invalid
    }

    pub fn total(&self) -> usize {
        self.success() + self.skipped() + self.failed
    }
}

/// Run a full mirror pass.
///
/// A failed search aborts the run with an error; failed downloads are only
/// counted.
pub async fn run(config: &Config) -> Result<Summary> {
    ui::status("Nexus:", &config.base_url);
    ui::status("Repository:", &config.repository);
    ui::status("GroupId:", &config.group);
    ui::status("Output:", &format!("{}/", config.output_dir.display()));
    ui::blank();

    let client = NexusClient::from_config(config)?;
    let assets = discover(&client, config).await?;

    if assets.is_empty() {
        ui::blank();
        ui::warning("No files found");
        return Ok(Summary::default());
    }

    let found = assets.len();
    let assets = latest_snapshots(assets);
    let dropped = found - assets.len();
    if dropped > 0 {
        ui::blank();
        ui::dim(&format!("Filtered out {} stale snapshot file(s)", dropped));
    }

    ui::blank();
    if config.dry_run {
        preview(config, &assets);
        return Ok(Summary::default());
    }

    ui::header(&format!("Downloading {} file(s)...", assets.len()));
    let summary = download_all(&client, config, &assets).await;

    ui::blank();
    let message = format!(
        "Done: {} file(s): success {} ({} already present), skip {}, fail {}",
        summary.total(),
        summary.success(),
        summary.existing,
        summary.skipped(),
        summary.failed
    );
    if summary.failed > 0 {
        ui::notice(&message);
    } else {
        ui::success(&message);
    }

    Ok(summary)
}

/// Search every configured extension and combine the results in extension order
pub async fn discover(client: &NexusClient, config: &Config) -> Result<Vec<AssetRecord>> {
    let mut all = Vec::new();

    for extension in &config.extensions {
        let pb = ui::spinner(&format!("Searching {} files...", extension));
        let query = SearchQuery {
            repository: &config.repository,
            group: &config.group,
            extension: extension.as_str(),
        };

        let result = search::search(client, query, |so_far| {
            ui::update_spinner(
                &pb,
                &format!(
                    "Searching {} files... fetching next page ({} so far)",
                    extension, so_far
                ),
            )
        })
        .await;

        match result {
            Ok(assets) => {
                info!("Found {} {} asset(s)", assets.len(), extension);
                ui::finish_spinner_success(
                    &pb,
                    &format!("Found {} {} file(s)", assets.len(), extension),
                );
                all.extend(assets);
            }
            Err(e) => {
                ui::finish_spinner_error(&pb, &format!("Searching {} files failed", extension));
                return Err(e);
            }
        }
    }

    Ok(all)
}

fn preview(config: &Config, assets: &[AssetRecord]) {
    let total = assets.len();
    let mut pending = 0;

    for (i, asset) in assets.iter().enumerate() {
        let path = asset.normalized_path();
        match (usable_url(asset), asset.local_path(&config.output_dir)) {
            (Some(_), Some(local)) if local.exists() => ui::item(i + 1, total, "Exists:", path),
            (Some(_), Some(_)) => {
                pending += 1;
                ui::item(i + 1, total, "Would download:", path);
            }
            _ => ui::item(i + 1, total, "Would skip:", "missing path or download URL"),
        }
    }

    ui::blank();
    ui::status("[DRY RUN]", &format!("Would download {} of {} file(s)", pending, total));
}

async fn download_all(client: &NexusClient, config: &Config, assets: &[AssetRecord]) -> Summary {
    let total = assets.len();

    let statuses: Vec<FileStatus> = stream::iter(assets.iter().enumerate())
        .map(|(i, asset)| download_one(client, config, i + 1, total, asset))
        .buffer_unordered(config.jobs)
        .collect()
        .await;

    let mut summary = Summary::default();
    for status in &statuses {
        summary.record(status);
    }
    summary
}

async fn download_one(
    client: &NexusClient,
    config: &Config,
    index: usize,
    total: usize,
    asset: &AssetRecord,
) -> FileStatus {
    let (Some(url), Some(local)) = (usable_url(asset), asset.local_path(&config.output_dir))
    else {
        debug!("Skipping unusable asset record: {:?}", asset);
        ui::item(index, total, "Skipped:", "missing path or download URL");
        return FileStatus::Invalid;
    };

    let path = asset.normalized_path();
    if local.exists() {
        ui::item(index, total, "Exists:", path);
        return FileStatus::Fetched(DownloadOutcome::AlreadyPresent);
    }

    ui::item(index, total, "Downloading:", path);
    let outcome = client.fetch(url, &local, config.attempts).await;

    match &outcome {
        DownloadOutcome::Missing => ui::dim("    Skipped: file does not exist (404)"),
        DownloadOutcome::Failed(message) => {
            ui::failure(&format!("    Download failed: {} ({})", path, message))
        }
        DownloadOutcome::Downloaded | DownloadOutcome::AlreadyPresent => {}
    }

    FileStatus::Fetched(outcome)
}

fn usable_url(asset: &AssetRecord) -> Option<&str> {
    asset.download_url.as_deref().filter(|url| !url.is_empty())
}
