// Maven coordinates parsed from repository asset paths

use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

lazy_static! {
    /// `-YYYYMMDD.HHMMSS-<build>.` inside a snapshot file name
    static ref FILE_TIMESTAMP: Regex =
        Regex::new(r"-(\d{8}\.\d{6})-(\d+)\.").expect("valid timestamp regex");

    /// A version directory that is itself a timestamped snapshot build
    static ref TIMESTAMPED_VERSION: Regex =
        Regex::new(r"^(.+)-\d{8}\.\d{6}-\d+$").expect("valid version regex");
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("path '{0}' has fewer than 4 segments (group/artifact/version/file)")]
    TooFewSegments(String),
}

/// Timestamp and build number of one deployed snapshot build.
///
/// Ordered by the `YYYYMMDD.HHMMSS` stamp first and then numerically by build
/// number, so build 10 sorts after build 9.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildTimestamp {
    stamp: String,
    build_number: u64,
}

impl BuildTimestamp {
    pub fn new(stamp: impl Into<String>, build_number: u64) -> Self {
        Self {
            stamp: stamp.into(),
            build_number,
        }
    }

    /// Find a build timestamp in a file name such as `lib-1.0-20230101.100000-1.jar`
    pub fn from_filename(filename: &str) -> Option<Self> {
        let captures = FILE_TIMESTAMP.captures(filename)?;
        let build_number = captures[2].parse().ok()?;
        Some(Self::new(&captures[1], build_number))
    }
}

impl Ord for BuildTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.stamp
            .cmp(&other.stamp)
            .then(self.build_number.cmp(&other.build_number))
    }
}

impl PartialOrd for BuildTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BuildTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stamp, self.build_number)
    }
}

/// Identity shared by every file of one artifact version (jar, pom, sources, metadata).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionKey(String);

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCoordinate {
    pub group_path: String,
    pub artifact_id: String,
    /// Raw version directory name
    pub version: String,
    pub filename: String,
    /// `version` with a timestamped build normalized back to `-SNAPSHOT`
    pub base_version: String,
    pub build_timestamp: Option<BuildTimestamp>,
}

impl ArtifactCoordinate {
    /// Parse `group/path/artifactId/version/filename`.
    ///
    /// Leading and trailing slashes are ignored. Anything with fewer than four
    /// segments is rejected.
    pub fn parse(path: &str) -> Result<Self, CoordinateError> {
        let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
        if parts.len() < 4 {
            return Err(CoordinateError::TooFewSegments(path.to_string()));
        }

        let n = parts.len();
        let filename = parts[n - 1];
        let version = parts[n - 2];
        let artifact_id = parts[n - 3];
        let group_path = parts[..n - 3].join("/");

        Ok(Self {
            group_path,
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            filename: filename.to_string(),
            base_version: base_version(version),
            build_timestamp: BuildTimestamp::from_filename(filename),
        })
    }

    pub fn version_key(&self) -> VersionKey {
        VersionKey(format!(
            "{}/{}/{}",
            self.group_path, self.artifact_id, self.base_version
        ))
    }
}

/// Normalize a version directory name to its `-SNAPSHOT` form.
///
/// - "1.0-SNAPSHOT" -> "1.0-SNAPSHOT"
/// - "1.0-20230101.100000-1" -> "1.0-SNAPSHOT"
/// - "1.0" -> "1.0"
pub fn base_version(version: &str) -> String {
    if version.contains("SNAPSHOT") {
        return version.to_string();
    }

    match TIMESTAMPED_VERSION.captures(version) {
        Some(captures) => format!("{}-SNAPSHOT", &captures[1]),
        None => version.to_string(),
    }
}

/// Whether a file name carries a `-YYYYMMDD.HHMMSS-<build>.` snapshot stamp
pub fn has_timestamp(filename: &str) -> bool {
    FILE_TIMESTAMP.is_match(filename)
}
