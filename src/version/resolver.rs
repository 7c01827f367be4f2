// Tue Feb 10 2026 - Alex

use crate::git::{GitError, VersionControl};
use crate::version::tag::{AndroidVersion, VersionError};
use indexmap::IndexSet;
use itertools::Itertools;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Git(#[from] GitError),
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Mines tag history for the points where a set of tracked files could have
/// changed. Probing every tag costs one cross-compile per tag per
/// architecture, so the sweep only visits tags where a tracked path actually
/// differs from its predecessor.
pub struct VersionResolver {
    repo: Arc<dyn VersionControl>,
}

impl VersionResolver {
    pub fn new(repo: Arc<dyn VersionControl>) -> Self {
        Self { repo }
    }

    /// Ordered, deduplicated versions at which any of `paths` changed. The
    /// earliest eligible tag is always included; a later tag is included
    /// when at least one path's content differs from the previous eligible
    /// tag. Per-path results are unioned preserving first-seen order, which
    /// covers headers that moved between locations across history.
    pub fn resolve(&self, paths: &[&str]) -> Result<Vec<AndroidVersion>, ResolveError> {
        let mut tags: IndexSet<String> = IndexSet::new();
        for path in paths {
            for tag in self.tags_affecting(path)? {
                tags.insert(tag);
            }
        }

        let versions = tags
            .into_iter()
            .map(|tag| AndroidVersion::from_tag(&tag))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "{} version(s) selected across {} tracked path(s)",
            versions.len(),
            paths.len()
        );
        Ok(versions)
    }

    fn tags_affecting(&self, path: &str) -> Result<Vec<String>, ResolveError> {
        let eligible: Vec<String> = self
            .repo
            .tags_by_date()?
            .into_iter()
            .filter(|tag| AndroidVersion::is_eligible_tag(tag))
            .collect();

        let mut result = Vec::new();
        if let Some(first) = eligible.first() {
            result.push(first.clone());
        }

        for (previous, tag) in eligible.iter().tuple_windows() {
            let diff = self.repo.diff(previous, tag, path)?;
            if !diff.is_empty() {
                result.push(tag.clone());
            }
        }

        log::debug!("{}: {}/{} tags touch it", path, result.len(), eligible.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitError;
    use std::collections::HashSet;
    use std::path::Path;

    struct FakeRepo {
        tags: Vec<&'static str>,
        // (from, to, path) triples with a non-empty diff
        changes: HashSet<(&'static str, &'static str, &'static str)>,
    }

    impl VersionControl for FakeRepo {
        fn tags_by_date(&self) -> Result<Vec<String>, GitError> {
            Ok(self.tags.iter().map(|t| t.to_string()).collect())
        }

        fn diff(&self, from: &str, to: &str, path: &str) -> Result<String, GitError> {
            let changed = self
                .changes
                .iter()
                .any(|(f, t, p)| *f == from && *t == to && *p == path);
            Ok(if changed { "diff --git".to_string() } else { String::new() })
        }

        fn add_worktree(&self, _dest: &Path, _tag: &str) -> Result<(), GitError> {
            Ok(())
        }
    }

    fn resolver(repo: FakeRepo) -> VersionResolver {
        VersionResolver::new(Arc::new(repo))
    }

    fn tags(versions: &[AndroidVersion]) -> Vec<&str> {
        versions.iter().map(|v| v.tag.as_str()).collect()
    }

    #[test]
    fn test_includes_only_change_points() {
        let repo = FakeRepo {
            tags: vec!["android-5.0.0_r1", "android-6.0.0_r1", "android-7.0.0_r1"],
            changes: [("android-5.0.0_r1", "android-6.0.0_r1", "runtime/art_field.h")]
                .into_iter()
                .collect(),
        };
        let versions = resolver(repo).resolve(&["runtime/art_field.h"]).unwrap();
        assert_eq!(tags(&versions), vec!["android-5.0.0_r1", "android-6.0.0_r1"]);
    }

    #[test]
    fn test_first_tag_always_included() {
        let repo = FakeRepo {
            tags: vec!["android-5.0.0_r1", "android-5.1.0_r1"],
            changes: HashSet::new(),
        };
        let versions = resolver(repo).resolve(&["runtime/art_field.h"]).unwrap();
        assert_eq!(tags(&versions), vec!["android-5.0.0_r1"]);
    }

    #[test]
    fn test_ineligible_tags_are_skipped_entirely() {
        // The CTS tag is not a release tag and must not even participate in
        // the consecutive-pair walk.
        let repo = FakeRepo {
            tags: vec![
                "android-4.4_r1",
                "android-5.0.0_r1",
                "android-cts-7.0_r1",
                "android-7.0.0_r1",
            ],
            changes: [("android-5.0.0_r1", "android-7.0.0_r1", "runtime/art_field.h")]
                .into_iter()
                .collect(),
        };
        let versions = resolver(repo).resolve(&["runtime/art_field.h"]).unwrap();
        assert_eq!(tags(&versions), vec!["android-5.0.0_r1", "android-7.0.0_r1"]);
    }

    #[test]
    fn test_multi_path_union_preserves_order_and_dedupes() {
        let repo = FakeRepo {
            tags: vec!["android-5.0.0_r1", "android-6.0.0_r1", "android-7.0.0_r1"],
            changes: [
                ("android-5.0.0_r1", "android-6.0.0_r1", "runtime/mirror/art_field.h"),
                ("android-5.0.0_r1", "android-6.0.0_r1", "runtime/art_field.h"),
                ("android-6.0.0_r1", "android-7.0.0_r1", "runtime/art_field.h"),
            ]
            .into_iter()
            .collect(),
        };
        let versions = resolver(repo)
            .resolve(&["runtime/mirror/art_field.h", "runtime/art_field.h"])
            .unwrap();
        assert_eq!(
            tags(&versions),
            vec!["android-5.0.0_r1", "android-6.0.0_r1", "android-7.0.0_r1"]
        );
    }

    #[test]
    fn test_output_follows_commit_time_order() {
        let repo = FakeRepo {
            tags: vec![
                "android-5.0.0_r1",
                "android-5.1.0_r1",
                "android-6.0.0_r1",
                "android-7.0.0_r1",
            ],
            changes: [
                ("android-5.0.0_r1", "android-5.1.0_r1", "h"),
                ("android-5.1.0_r1", "android-6.0.0_r1", "h"),
                ("android-6.0.0_r1", "android-7.0.0_r1", "h"),
            ]
            .into_iter()
            .collect(),
        };
        let versions = resolver(repo).resolve(&["h"]).unwrap();
        let apis: Vec<u32> = versions.iter().map(|v| v.api_level).collect();
        assert_eq!(apis, vec![21, 22, 23, 24]);
    }
}
