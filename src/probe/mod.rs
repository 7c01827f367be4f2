// Wed Feb 11 2026 - Alex

pub mod compiler;
pub mod error;
pub mod rewrite;
pub mod source;

pub use compiler::ProbeCompiler;
pub use error::ProbeError;

use crate::toolchain::Arch;
use crate::version::AndroidVersion;
use serde::{Deserialize, Serialize};

/// Sentinel codes used at the output boundary only; internally outcomes are
/// the tagged enum below.
pub const SENTINEL_ABSENT: i32 = -1;
pub const SENTINEL_REMOVED: i32 = -2;

/// One candidate header location for the probed class. The class moved (and
/// lost its namespace nesting) across history, so probes walk an ordered
/// fallback chain of targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeTarget {
    pub header: String,
    pub class_name: String,
    pub field_names: Vec<String>,
}

impl ProbeTarget {
    pub fn new(header: &str, class_name: &str, field_names: &[&str]) -> Self {
        Self {
            header: header.to_string(),
            class_name: class_name.to_string(),
            field_names: field_names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Default fallback chain: ArtField lived under runtime/mirror/ until it
    /// was hoisted out of the mirror namespace.
    pub fn art_field_chain() -> Vec<Self> {
        vec![
            Self::new(
                "runtime/mirror/art_field.h",
                "art::mirror::ArtField",
                &["access_flags_"],
            ),
            Self::new("runtime/art_field.h", "art::ArtField", &["access_flags_"]),
        ]
    }
}

/// Drives one compilation.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub header: String,
    pub class_name: String,
    pub field_names: Vec<String>,
    pub version: AndroidVersion,
    pub arch: Arch,
}

impl ProbeRequest {
    pub fn new(target: &ProbeTarget, version: &AndroidVersion, arch: Arch) -> Self {
        Self {
            header: target.header.clone(),
            class_name: target.class_name.clone(),
            field_names: target.field_names.clone(),
            version: version.clone(),
            arch,
        }
    }
}

/// What a single probe produced. Fatal conditions travel on the error
/// channel instead; these are the outcomes a sweep absorbs and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Layout facts, in request order: class size, then one offset per
    /// requested field.
    Measured { size: u32, offsets: Vec<u32> },
    /// The header does not exist in this historical state.
    HeaderAbsent,
    /// Compilation failed in a way consistent with the member or class not
    /// existing in this state.
    MemberRemoved,
}

impl ProbeOutcome {
    pub fn is_measured(&self) -> bool {
        matches!(self, ProbeOutcome::Measured { .. })
    }

    /// Output-boundary sentinel for the non-measured outcomes.
    pub fn sentinel(&self) -> Option<i32> {
        match self {
            ProbeOutcome::Measured { .. } => None,
            ProbeOutcome::HeaderAbsent => Some(SENTINEL_ABSENT),
            ProbeOutcome::MemberRemoved => Some(SENTINEL_REMOVED),
        }
    }
}
