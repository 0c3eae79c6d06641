// Shared HTTP client for talking to one Nexus instance

use crate::config::Config;
use crate::constants;
use anyhow::{Context, Result};
use reqwest::{Client, IntoUrl, RequestBuilder};

/// User-Agent string for all HTTP requests
const USER_AGENT: &str = concat!("nexus-dl/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to a Nexus base URL and its Basic credentials
#[derive(Debug, Clone)]
pub struct NexusClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl NexusClient {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url, &config.username, &config.password)
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, constants::SEARCH_ASSETS_PATH)
    }

    /// Authenticated GET request
    pub fn get<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.http
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        let client = NexusClient::new("https://nexus.example.com/", "u", "p").unwrap();
        assert_eq!(
            client.search_url(),
            "https://nexus.example.com/service/rest/v1/search/assets"
        );
    }

    #[test]
    fn test_base_url_with_context_path() {
        let client = NexusClient::new("http://host:8081/nexus", "u", "p").unwrap();
        assert_eq!(
            client.search_url(),
            "http://host:8081/nexus/service/rest/v1/search/assets"
        );
    }
}
