// CLI module for handling command-line interface

use crate::constants;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nexus-dl", version)]
#[command(about = "Download every jar and pom of a Maven groupId tree from a Nexus repository")]
pub struct Cli {
    /// Nexus base URL (e.g. https://nexus.example.com)
    #[arg(short = 'u', long)]
    pub url: String,

    /// Nexus username
    #[arg(long)]
    pub user: String,

    /// Nexus password
    #[arg(long)]
    pub password: String,

    /// groupId prefix to mirror (e.g. com.example.common)
    #[arg(short = 'g', long)]
    pub group: String,

    /// Repository name
    #[arg(short = 'r', long, default_value = constants::DEFAULT_REPOSITORY)]
    pub repository: String,

    /// Local root directory [default: $NEXUS_DL_DIR or "repo"]
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// File extension to search for; may be repeated [default: jar, pom]
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Attempts per file before it is counted as failed
    #[arg(long, default_value_t = constants::DEFAULT_DOWNLOAD_ATTEMPTS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: u32,

    /// Number of downloads to run at once
    #[arg(short = 'j', long, default_value_t = constants::DEFAULT_JOBS)]
    pub jobs: usize,

    /// Search and list the files without downloading anything
    #[arg(long)]
    pub dry_run: bool,
}
