// Wed Feb 11 2026 - Alex

use crate::toolchain::Arch;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Grouping key of the final report. Multiple historical versions can share
/// an API level; their distinct observations all land under one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultKey {
    pub arch: Arch,
    pub api_level: u32,
}

impl ResultKey {
    pub fn new(arch: Arch, api_level: u32) -> Self {
        Self { arch, api_level }
    }
}

impl Ord for ResultKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.arch
            .as_str()
            .cmp(other.arch.as_str())
            .then(self.api_level.cmp(&other.api_level))
    }
}

impl PartialOrd for ResultKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.arch, self.api_level)
    }
}

/// Deduplicated measurement table: key -> sorted set of distinct
/// observations. Pre-release churn means one API level can legitimately
/// carry several layouts; all of them are preserved rather than picking one.
#[derive(Debug, Default)]
pub struct ResultTable {
    entries: BTreeMap<ResultKey, BTreeSet<String>>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the observation was new for this key.
    pub fn insert(&mut self, key: ResultKey, value: String) -> bool {
        self.entries.entry(key).or_default().insert(value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ResultKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn observation_count(&self) -> usize {
        self.entries.values().map(|set| set.len()).sum()
    }

    /// Keys ordered by architecture then API level, values sorted; ready for
    /// serialization.
    pub fn to_index_map(&self) -> IndexMap<String, Vec<String>> {
        self.entries
            .iter()
            .map(|(key, values)| (key.to_string(), values.iter().cloned().collect()))
            .collect()
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered =
            serde_json::to_string_pretty(&self.to_index_map()).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_deduplicates() {
        let mut table = ResultTable::new();
        let key = ResultKey::new(Arch::Arm, 24);
        assert!(table.insert(key, "size=12 access_flags=4".to_string()));
        assert!(!table.insert(key, "size=12 access_flags=4".to_string()));
        assert_eq!(table.observation_count(), 1);
    }

    #[test]
    fn test_keys_sorted_by_arch_then_api() {
        let mut table = ResultTable::new();
        table.insert(ResultKey::new(Arch::X86, 21), "size=12".to_string());
        table.insert(ResultKey::new(Arch::Arm, 24), "size=12".to_string());
        table.insert(ResultKey::new(Arch::Arm, 21), "size=12".to_string());
        table.insert(ResultKey::new(Arch::Arm64, 21), "size=16".to_string());

        let keys: Vec<String> = table.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["arm-21", "arm-24", "arm64-21", "x86-21"]);
    }

    #[test]
    fn test_values_sorted_within_key() {
        let mut table = ResultTable::new();
        let key = ResultKey::new(Arch::Arm64, 29);
        table.insert(key, "size=16 access_flags=8".to_string());
        table.insert(key, "size=12 access_flags=4".to_string());

        let map = table.to_index_map();
        assert_eq!(
            map["arm64-29"],
            vec!["size=12 access_flags=4", "size=16 access_flags=8"]
        );
    }
}
