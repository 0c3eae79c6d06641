// Constants module for shared defaults

pub const DEFAULT_REPOSITORY: &str = "maven-releases";
pub const DEFAULT_OUTPUT_DIR: &str = "repo";
pub const OUTPUT_DIR_ENV: &str = "NEXUS_DL_DIR";

/// Extensions searched when none are given, in search order.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["jar", "pom"];

pub const DEFAULT_DOWNLOAD_ATTEMPTS: u32 = 3;
pub const DEFAULT_JOBS: usize = 1;

pub const SEARCH_ASSETS_PATH: &str = "/service/rest/v1/search/assets";
pub const SEARCH_TIMEOUT_SECS: u64 = 30;
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

/// Suffix of the staging file a download is streamed into before it is renamed.
pub const PARTIAL_SUFFIX: &str = ".part";
