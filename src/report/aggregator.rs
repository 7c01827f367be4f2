// Wed Feb 11 2026 - Alex

use crate::probe::ProbeOutcome;
use crate::report::table::{ResultKey, ResultTable};
use crate::toolchain::Arch;
use std::fmt::Write;

/// Stable key-value encoding of one probe outcome: class size first, then
/// each requested field's offset in request order. Non-measured outcomes
/// render with their sentinel in every position. Labels drop the trailing
/// underscore ART's member-naming convention carries.
pub fn render_measurement(fields: &[String], outcome: &ProbeOutcome) -> String {
    let mut rendered = String::new();
    match outcome {
        ProbeOutcome::Measured { size, offsets } => {
            let _ = write!(rendered, "size={}", size);
            for (name, offset) in fields.iter().zip(offsets) {
                let _ = write!(rendered, " {}={}", label(name), offset);
            }
        }
        other => {
            let sentinel = other.sentinel().unwrap_or_default();
            let _ = write!(rendered, "size={}", sentinel);
            for name in fields {
                let _ = write!(rendered, " {}={}", label(name), sentinel);
            }
        }
    }
    rendered
}

fn label(field_name: &str) -> &str {
    field_name.trim_end_matches('_')
}

/// Folds per-(architecture, version) outcomes into the deduplicated table
/// keyed by (architecture, API level).
#[derive(Debug, Default)]
pub struct ResultAggregator {
    table: ResultTable,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome; returns the rendered observation for progress
    /// reporting.
    pub fn record(
        &mut self,
        arch: Arch,
        api_level: u32,
        fields: &[String],
        outcome: &ProbeOutcome,
    ) -> String {
        let value = render_measurement(fields, outcome);
        self.table.insert(ResultKey::new(arch, api_level), value.clone());
        value
    }

    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    pub fn into_table(self) -> ResultTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_measured_rendering() {
        let outcome = ProbeOutcome::Measured {
            size: 12,
            offsets: vec![4],
        };
        assert_eq!(
            render_measurement(&fields(&["access_flags_"]), &outcome),
            "size=12 access_flags=4"
        );
    }

    #[test]
    fn test_absent_renders_sentinel_everywhere() {
        assert_eq!(
            render_measurement(&fields(&["access_flags_"]), &ProbeOutcome::HeaderAbsent),
            "size=-1 access_flags=-1"
        );
    }

    #[test]
    fn test_removed_renders_sentinel_everywhere() {
        assert_eq!(
            render_measurement(
                &fields(&["access_flags_", "field_dex_idx_"]),
                &ProbeOutcome::MemberRemoved
            ),
            "size=-2 access_flags=-2 field_dex_idx=-2"
        );
    }

    #[test]
    fn test_identical_observations_collapse_across_versions() {
        let mut aggregator = ResultAggregator::new();
        let outcome = ProbeOutcome::Measured {
            size: 12,
            offsets: vec![4],
        };

        // Two tags sharing an API level and agreeing on layout.
        aggregator.record(Arch::Arm, 25, &fields(&["access_flags_"]), &outcome);
        aggregator.record(Arch::Arm, 25, &fields(&["access_flags_"]), &outcome);

        assert_eq!(aggregator.table().observation_count(), 1);
    }

    #[test]
    fn test_disagreeing_observations_are_both_kept() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(
            Arch::Arm,
            29,
            &fields(&["access_flags_"]),
            &ProbeOutcome::Measured { size: 12, offsets: vec![4] },
        );
        aggregator.record(
            Arch::Arm,
            29,
            &fields(&["access_flags_"]),
            &ProbeOutcome::Measured { size: 16, offsets: vec![8] },
        );

        assert_eq!(aggregator.table().len(), 1);
        assert_eq!(aggregator.table().observation_count(), 2);
    }
}
