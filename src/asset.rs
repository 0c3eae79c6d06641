// Asset module for remote files discovered through the search API

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// One remote file as returned by the Nexus asset search.
///
/// Both fields are optional on the wire; a record missing either is skipped
/// at download time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl AssetRecord {
    #[cfg(test)]
    pub fn new(path: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            download_url: Some(download_url.into()),
        }
    }

    /// The path without leading or trailing slashes, empty when absent
    pub fn normalized_path(&self) -> &str {
        self.path.as_deref().unwrap_or("").trim_matches('/')
    }

    /// Where this asset lands beneath `root`, or `None` if the path is empty or
    /// would escape `root`.
    pub fn local_path(&self, root: &Path) -> Option<PathBuf> {
        let relative = Path::new(self.normalized_path());
        if relative.as_os_str().is_empty() {
            return None;
        }
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(root.join(relative))
    }
}
