// Snapshot filtering: keep only the newest deployed build of each snapshot version

use crate::asset::AssetRecord;
use crate::maven::coordinate::{self, ArtifactCoordinate, BuildTimestamp, VersionKey};
use log::debug;
use std::collections::HashMap;

/// Whether a path belongs to a snapshot version, either by name or by a
/// timestamped file name.
pub fn is_snapshot_family(path: &str) -> bool {
    if path.contains("SNAPSHOT") {
        return true;
    }
    let filename = path.rsplit('/').next().unwrap_or(path);
    coordinate::has_timestamp(filename)
}

/// Newest build timestamp seen for every snapshot version in `assets`
pub fn latest_builds(assets: &[AssetRecord]) -> HashMap<VersionKey, BuildTimestamp> {
    let mut latest: HashMap<VersionKey, BuildTimestamp> = HashMap::new();

    for asset in assets {
        let path = asset.normalized_path();
        if !is_snapshot_family(path) {
            continue;
        }
        let Ok(coord) = ArtifactCoordinate::parse(path) else {
            continue;
        };
        let Some(timestamp) = coord.build_timestamp.clone() else {
            continue;
        };

        let key = coord.version_key();
        match latest.get(&key) {
            Some(stored) if *stored >= timestamp => {}
            _ => {
                latest.insert(key, timestamp);
            }
        }
    }

    latest
}

/// Drop every snapshot file that is not part of the newest build of its version.
///
/// Release files, files whose path cannot be parsed and snapshot files without a
/// build timestamp (such as `maven-metadata.xml`) are always kept. The result
/// lists the passthrough files first and the retained snapshot files after them,
/// each group in input order.
pub fn latest_snapshots(assets: Vec<AssetRecord>) -> Vec<AssetRecord> {
    let latest = latest_builds(&assets);

    let mut passthrough = Vec::new();
    let mut snapshots = Vec::new();

    for asset in assets {
        let path = asset.normalized_path();
        if !is_snapshot_family(path) {
            passthrough.push(asset);
            continue;
        }

        let coord = match ArtifactCoordinate::parse(path) {
            Ok(coord) => coord,
            Err(e) => {
                debug!("Keeping unparseable snapshot asset: {}", e);
                passthrough.push(asset);
                continue;
            }
        };

        let keep = match &coord.build_timestamp {
            None => true,
            Some(timestamp) => latest.get(&coord.version_key()) == Some(timestamp),
        };

        if keep {
            snapshots.push(asset);
        } else {
            debug!(
                "Dropping stale snapshot build {} of {}:{}",
                coord.filename, coord.artifact_id, coord.version
            );
        }
    }

    passthrough.extend(snapshots);
    passthrough
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(path: &str) -> AssetRecord {
        AssetRecord::new(path, format!("https://nexus/repository/maven-snapshots/{}", path))
    }

    fn paths(assets: &[AssetRecord]) -> Vec<&str> {
        assets.iter().map(|a| a.normalized_path()).collect()
    }

    #[test]
    fn test_keeps_only_latest_build() {
        let result = latest_snapshots(vec![
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230101.100000-1.jar"),
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230102.110000-2.jar"),
        ]);

        assert_eq!(
            paths(&result),
            vec!["com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230102.110000-2.jar"]
        );
    }

    #[test]
    fn test_same_build_files_kept_together() {
        let result = latest_snapshots(vec![
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230101.100000-1.pom"),
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230102.110000-2.jar"),
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230101.100000-1.jar"),
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230102.110000-2.pom"),
        ]);

        assert_eq!(
            paths(&result),
            vec![
                "com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230102.110000-2.jar",
                "com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230102.110000-2.pom",
            ]
        );
    }

    #[test]
    fn test_releases_untouched_and_first() {
        let input = vec![
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230101.100000-1.jar"),
            asset("com/acme/lib/2.0/lib-2.0.jar"),
            asset("com/acme/lib/2.0/lib-2.0.pom"),
        ];

        let result = latest_snapshots(input);

        assert_eq!(
            paths(&result),
            vec![
                "com/acme/lib/2.0/lib-2.0.jar",
                "com/acme/lib/2.0/lib-2.0.pom",
                "com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230101.100000-1.jar",
            ]
        );
    }

    #[test]
    fn test_release_only_input_is_identity() {
        let input = vec![
            asset("com/acme/b/1.1/b-1.1.pom"),
            asset("com/acme/a/1.0/a-1.0.jar"),
            asset("com/acme/a/1.0/a-1.0-sources.jar"),
        ];

        assert_eq!(latest_snapshots(input.clone()), input);
    }

    #[test]
    fn test_metadata_always_kept() {
        let result = latest_snapshots(vec![
            asset("com/acme/lib/1.0-SNAPSHOT/maven-metadata.xml"),
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230101.100000-1.jar"),
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230102.110000-2.jar"),
        ]);

        assert_eq!(
            paths(&result),
            vec![
                "com/acme/lib/1.0-SNAPSHOT/maven-metadata.xml",
                "com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230102.110000-2.jar",
            ]
        );
    }

    #[test]
    fn test_unparseable_snapshot_kept() {
        let result = latest_snapshots(vec![
            asset("lib/1.0-SNAPSHOT/lib-1.0-20230101.100000-1.jar"),
            asset("lib/1.0-SNAPSHOT/lib-1.0-20230102.110000-2.jar"),
        ]);

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_versions_filtered_independently() {
        let result = latest_snapshots(vec![
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230105.000000-7.jar"),
            asset("com/acme/lib/1.1-SNAPSHOT/lib-1.1-20230101.000000-1.jar"),
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230101.000000-1.jar"),
            asset("com/acme/other/1.0-SNAPSHOT/other-1.0-20230101.000000-1.jar"),
        ]);

        assert_eq!(
            paths(&result),
            vec![
                "com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230105.000000-7.jar",
                "com/acme/lib/1.1-SNAPSHOT/lib-1.1-20230101.000000-1.jar",
                "com/acme/other/1.0-SNAPSHOT/other-1.0-20230101.000000-1.jar",
            ]
        );
    }

    #[test]
    fn test_build_number_crossing_digit_boundary() {
        let result = latest_snapshots(vec![
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230101.100000-9.jar"),
            asset("com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230101.100000-10.jar"),
        ]);

        assert_eq!(
            paths(&result),
            vec!["com/acme/lib/1.0-SNAPSHOT/lib-1.0-20230101.100000-10.jar"]
        );
    }

    #[test]
    fn test_at_most_one_timestamp_per_version() {
        let input: Vec<AssetRecord> = (1..=5)
            .flat_map(|build| {
                ["jar", "pom"].into_iter().map(move |ext| {
                    asset(&format!(
                        "org/x/core/3.0-SNAPSHOT/core-3.0-20240101.00000{}-{}.{}",
                        build, build, ext
                    ))
                })
            })
            .collect();

        let result = latest_snapshots(input);
        let stamps: std::collections::HashSet<_> = result
            .iter()
            .filter_map(|a| {
                ArtifactCoordinate::parse(a.normalized_path())
                    .ok()
                    .and_then(|c| c.build_timestamp)
            })
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(stamps.len(), 1);
    }

    #[test]
    fn test_missing_path_passes_through() {
        let nameless = AssetRecord {
            path: None,
            download_url: Some("https://nexus/x".to_string()),
        };

        assert_eq!(latest_snapshots(vec![nameless.clone()]), vec![nameless]);
    }

    #[test]
    fn test_is_snapshot_family() {
        assert!(is_snapshot_family("com/acme/lib/1.0-SNAPSHOT/maven-metadata.xml"));
        assert!(is_snapshot_family(
            "com/acme/lib/1.0-20230101.100000-1/lib-1.0-20230101.100000-1.jar"
        ));
        assert!(!is_snapshot_family("com/acme/lib/2.0/lib-2.0.jar"));
    }
}
