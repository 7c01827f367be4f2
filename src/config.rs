// Tue Feb 10 2026 - Alex

use crate::probe::ProbeTarget;
use crate::toolchain::Arch;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Repository path components under the AOSP root, relative to `aosp_dir`.
pub const ART_REPO: &[&str] = &["platform", "art"];
pub const SYSTEM_CORE_REPO: &[&str] = &["platform", "system", "core"];
pub const GTEST_REPO: &[&str] = &["platform", "external", "gtest"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub root_dir: PathBuf,
    pub aosp_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub ndk_r21_root: Option<PathBuf>,
    pub ndk_r17b_root: Option<PathBuf>,
    pub architectures: Vec<Arch>,
    pub targets: Vec<ProbeTarget>,
    pub jobs: usize,
    pub timeout_seconds: u64,
    pub output_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let root_dir = PathBuf::from(".");
        Self {
            aosp_dir: root_dir.join("aosp"),
            cache_dir: root_dir.join("cache"),
            root_dir,
            ndk_r21_root: None,
            ndk_r17b_root: None,
            architectures: Arch::ALL.to_vec(),
            targets: ProbeTarget::art_field_chain(),
            jobs: 1,
            timeout_seconds: 300,
            output_file: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.aosp_dir = root.join("aosp");
        self.cache_dir = root.join("cache");
        self.root_dir = root;
        self
    }

    pub fn with_ndk_roots(mut self, r21: Option<PathBuf>, r17b: Option<PathBuf>) -> Self {
        self.ndk_r21_root = r21;
        self.ndk_r17b_root = r17b;
        self
    }

    pub fn with_architectures(mut self, architectures: Vec<Arch>) -> Self {
        self.architectures = architectures;
        self
    }

    pub fn with_targets(mut self, targets: Vec<ProbeTarget>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_output_file(mut self, output: Option<PathBuf>) -> Self {
        self.output_file = output;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Worker count for the probe sweep; 0 means one worker per core.
    pub fn effective_jobs(&self) -> usize {
        if self.jobs == 0 {
            num_cpus::get()
        } else {
            self.jobs
        }
    }

    pub fn art_repo_dir(&self) -> PathBuf {
        ART_REPO.iter().fold(self.aosp_dir.clone(), |p, c| p.join(c))
    }

    pub fn gtest_include_dir(&self) -> PathBuf {
        GTEST_REPO
            .iter()
            .fold(self.aosp_dir.clone(), |p, c| p.join(c))
            .join("include")
    }

    /// Headers whose history drives version selection, deduplicated in
    /// target order.
    pub fn tracked_headers(&self) -> Vec<&str> {
        let set: IndexSet<&str> = self.targets.iter().map(|t| t.header.as_str()).collect();
        set.into_iter().collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.architectures.is_empty() {
            return Err("at least one architecture must be selected".to_string());
        }
        if self.targets.is_empty() {
            return Err("at least one probe target must be configured".to_string());
        }
        for target in &self.targets {
            if target.header.is_empty() {
                return Err("probe target header must not be empty".to_string());
            }
            if target.class_name.is_empty() {
                return Err("probe target class name must not be empty".to_string());
            }
        }
        if self.timeout_seconds == 0 {
            return Err("timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_architectures() {
        let config = Config::default().with_architectures(Vec::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_targets() {
        let config = Config::default().with_targets(Vec::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tracked_headers_deduplicates_in_order() {
        let config = Config::default();
        let headers = config.tracked_headers();
        assert_eq!(
            headers,
            vec!["runtime/mirror/art_field.h", "runtime/art_field.h"]
        );
    }

    #[test]
    fn test_with_root_rebases_derived_dirs() {
        let config = Config::default().with_root(PathBuf::from("/work"));
        assert_eq!(config.aosp_dir, PathBuf::from("/work/aosp"));
        assert_eq!(config.cache_dir, PathBuf::from("/work/cache"));
        assert_eq!(
            config.art_repo_dir(),
            PathBuf::from("/work/aosp/platform/art")
        );
    }
}
