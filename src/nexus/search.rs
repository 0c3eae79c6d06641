// Paginated asset search against /service/rest/v1/search/assets

use crate::asset::AssetRecord;
use crate::config::group_to_path;
use crate::constants;
use crate::nexus::client::NexusClient;
use anyhow::{Context, Result};
use futures::stream::{self, Stream, TryStreamExt};
use log::debug;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// One page of search results
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<AssetRecord>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchQuery<'a> {
    pub repository: &'a str,
    /// Maven groupId prefix; sub-groups match too
    pub group: &'a str,
    pub extension: &'a str,
}

impl NexusClient {
    /// Fetch a single page, passing the continuation token of the previous one
    pub async fn search_page(
        &self,
        query: &SearchQuery<'_>,
        continuation_token: Option<&str>,
    ) -> Result<SearchPage> {
        let mut params = vec![
            ("repository", query.repository.to_string()),
            ("group", format!("{}*", query.group)),
            ("maven.extension", query.extension.to_string()),
        ];
        if let Some(token) = continuation_token {
            params.push(("continuationToken", token.to_string()));
        }

        let search_url = self.search_url();
        let url = Url::parse_with_params(&search_url, &params)
            .with_context(|| format!("Invalid Nexus URL: {}", search_url))?;

        debug!("GET {}", url);

        let response = self
            .get(url)
            .timeout(Duration::from_secs(constants::SEARCH_TIMEOUT_SECS))
            .send()
            .await
            .with_context(|| format!("Search request to {} failed", search_url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!(
                "Search API call failed: {} ({}) for extension '{}'",
                search_url,
                status,
                query.extension
            );
        }

        let body = response
            .text()
            .await
            .context("Failed to read search response")?;
        serde_json::from_str(&body).context("Search API returned malformed JSON")
    }
}

/// Lazily walk every page of a search until the server stops returning a
/// continuation token. Tokens are single-use, so the stream cannot be resumed
/// part way through.
pub fn search_pages<'a>(
    client: &'a NexusClient,
    query: SearchQuery<'a>,
) -> impl Stream<Item = Result<Vec<AssetRecord>>> + 'a {
    // None: finished, Some(None): first page, Some(Some(token)): next page
    stream::try_unfold(Some(None::<String>), move |state| async move {
        let Some(token) = state else {
            return Ok::<_, anyhow::Error>(None);
        };

        let page = client.search_page(&query, token.as_deref()).await?;
        let next = page
            .continuation_token
            .filter(|t| !t.is_empty())
            .map(Some);

        Ok(Some((page.items, next)))
    })
}

/// Whether `path` lies inside the repository directory of `group_path`.
///
/// The search API matches groups by string prefix, so `com.acme*` also returns
/// `com.acmecorp`; this re-checks on a `/` boundary. An empty group path
/// matches every asset.
pub fn within_group(path: &str, group_path: &str) -> bool {
    let path = path.trim_start_matches('/');
    if group_path.is_empty() {
        return true;
    }
    match path.strip_prefix(group_path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Collect all assets of one extension below the query's group.
///
/// `on_next_page` is called for every page after the first, with the number of
/// assets kept before that page.
pub async fn search(
    client: &NexusClient,
    query: SearchQuery<'_>,
    mut on_next_page: impl FnMut(usize),
) -> Result<Vec<AssetRecord>> {
    let group_path = group_to_path(query.group);
    let mut assets = Vec::new();
    let mut pages = std::pin::pin!(search_pages(client, query));
    let mut page_count = 0usize;

    while let Some(items) = pages.try_next().await? {
        if page_count > 0 {
            on_next_page(assets.len());
        }
        page_count += 1;

        let before = items.len();
        assets.extend(
            items
                .into_iter()
                .filter(|item| within_group(item.path.as_deref().unwrap_or(""), &group_path)),
        );
        debug!(
            "Search page {} for '{}': {} item(s), {} kept so far",
            page_count, query.extension, before, assets.len()
        );
    }

    Ok(assets)
}
