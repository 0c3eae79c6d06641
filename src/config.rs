// Config module for the resolved run configuration

use crate::cli::Cli;
use crate::constants;
use std::path::PathBuf;

/// Everything a mirror run needs, resolved once from the command line and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub group: String,
    pub repository: String,
    pub output_dir: PathBuf,
    pub extensions: Vec<String>,
    pub attempts: u32,
    pub jobs: usize,
    pub dry_run: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let extensions = if cli.extensions.is_empty() {
            constants::DEFAULT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect()
        } else {
            cli.extensions
        };

        Self {
            base_url: cli.url.trim_end_matches('/').to_string(),
            username: cli.user,
            password: cli.password,
            group: cli.group,
            repository: cli.repository,
            output_dir: cli.output.unwrap_or_else(default_output_dir),
            extensions,
            attempts: cli.retries.max(1),
            jobs: cli.jobs.max(1),
            dry_run: cli.dry_run,
        }
    }
}

/// The groupId as a repository path prefix (com.example -> com/example)
pub fn group_to_path(group_id: &str) -> String {
    group_id.trim_matches('.').replace('.', "/")
}

pub fn default_output_dir() -> PathBuf {
    std::env::var(constants::OUTPUT_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(constants::DEFAULT_OUTPUT_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec![
            "nexus-dl",
            "--url",
            "https://nexus.example.com/",
            "--user",
            "alice",
            "--password",
            "secret",
            "--group",
            "com.acme.common",
        ];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_group_to_path() {
        assert_eq!(group_to_path("com.example"), "com/example");
        assert_eq!(group_to_path("org"), "org");
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_cli(cli(&["-o", "mirror"]));

        assert_eq!(config.extensions, vec!["jar", "pom"]);
        assert_eq!(config.output_dir, PathBuf::from("mirror"));
        assert_eq!(config.attempts, 3);
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let config = Config::from_cli(cli(&[]));
        assert_eq!(config.base_url, "https://nexus.example.com");
        assert_eq!(config.group, "com.acme.common");
    }

    #[test]
    fn test_jobs_never_zero() {
        let config = Config::from_cli(cli(&["--jobs", "0"]));
        assert_eq!(config.jobs, 1);
    }
}
