// Wed Feb 11 2026 - Alex

use crate::config::Config;
use crate::extract::decode_section_dump;
use crate::probe::error::ProbeError;
use crate::probe::rewrite::neutralize_access;
use crate::probe::source::synthesize;
use crate::probe::{ProbeOutcome, ProbeRequest};
use crate::toolchain::{Flavor, Toolchain};
use crate::utils::process::run_with_timeout;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

/// Compiler diagnostics that mean "this member/class does not exist in this
/// historical state". Anything else nonzero is fatal by design; keep this
/// list short and centrally maintained, with a test fixture per pattern.
pub const IGNORED_ERRORS: [&str; 2] = ["is not a member of", "has no member named"];

/// Preprocessor definitions that make historical ART headers self-contained
/// enough to parse without a full build system.
const PROBE_DEFINES: [&str; 9] = [
    "-DANDROID_SMP=1",
    "-DIMT_SIZE=64",
    "-DART_STACK_OVERFLOW_GAP_arm=8192",
    "-DART_STACK_OVERFLOW_GAP_arm64=8192",
    "-DART_STACK_OVERFLOW_GAP_mips=16384",
    "-DART_STACK_OVERFLOW_GAP_mips64=16384",
    "-DART_STACK_OVERFLOW_GAP_x86=8192",
    "-DART_STACK_OVERFLOW_GAP_x86_64=8192",
    "-Wno-invalid-offsetof",
];

/// Removes the intermediate object file on every exit path.
struct RemoveOnDrop(PathBuf);

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        if self.0.exists() {
            let _ = fs::remove_file(&self.0);
        }
    }
}

/// Compiles the synthetic measurement program against one historical source
/// tree and classifies the result.
pub struct ProbeCompiler {
    config: Arc<Config>,
}

impl ProbeCompiler {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn probe(
        &self,
        request: &ProbeRequest,
        toolchain: &Toolchain,
        art_dir: &Path,
        system_core_dir: &Path,
    ) -> Result<ProbeOutcome, ProbeError> {
        let header_path = art_dir.join(&request.header);
        if !header_path.exists() {
            log::debug!(
                "{}: {} absent at {}",
                request.arch,
                request.header,
                request.version.tag
            );
            return Ok(ProbeOutcome::HeaderAbsent);
        }

        neutralize_access(&header_path)?;

        let mut probe_source = tempfile::Builder::new()
            .prefix("probe")
            .suffix(".cc")
            .tempfile()?;
        probe_source.write_all(
            synthesize(&request.header, &request.class_name, &request.field_names).as_bytes(),
        )?;
        probe_source.flush()?;

        let probe_obj = probe_source.path().with_extension("o");
        let _cleanup = RemoveOnDrop(probe_obj.clone());

        let mut command = Command::new(&toolchain.cxx);
        command.args(&toolchain.cxxflags);
        command.args(PROBE_DEFINES);

        // The system/core include layout only matters once the modern
        // toolchain era begins; earlier trees carry what they need.
        if Flavor::for_version(request.version.major) == Flavor::Clang {
            command.arg("-I").arg(system_core_dir.join("include"));
            command
                .arg("-I")
                .arg(system_core_dir.join("base").join("include"));
        }

        command
            .arg("-I")
            .arg(self.config.gtest_include_dir())
            .arg("-I")
            .arg(art_dir.join("libartbase"))
            .arg("-I")
            .arg(art_dir.join("libdexfile"))
            .arg("-I")
            .arg(art_dir.join("runtime"))
            .arg("-I")
            .arg(art_dir)
            .arg(probe_source.path())
            .arg("-c")
            .arg("-o")
            .arg(&probe_obj);

        let output = run_with_timeout(&mut command, self.config.timeout())?;
        if !output.status.success() {
            if is_ignorable_diagnostic(&output.stderr) {
                // Logged in full so misclassified failures can be audited.
                log::debug!(
                    "{} {} classified as member-removed:\n{}",
                    request.arch,
                    request.version.tag,
                    output.stderr
                );
                return Ok(ProbeOutcome::MemberRemoved);
            }
            return Err(ProbeError::CompileFailed {
                stderr: output.stderr,
            });
        }

        let values = self.extract_values(toolchain, &probe_obj)?;
        let expected = 1 + request.field_names.len();
        if values.len() < expected {
            return Err(ProbeError::TruncatedData {
                expected,
                found: values.len(),
            });
        }

        Ok(ProbeOutcome::Measured {
            size: values[0],
            offsets: values[1..expected].to_vec(),
        })
    }

    fn extract_values(
        &self,
        toolchain: &Toolchain,
        probe_obj: &Path,
    ) -> Result<Vec<u32>, ProbeError> {
        let mut command = Command::new(&toolchain.objdump);
        command.arg("-sj").arg(".data").arg(probe_obj);

        let output = run_with_timeout(&mut command, self.config.timeout())?;
        if !output.status.success() {
            return Err(ProbeError::DisassemblyFailed {
                stderr: output.stderr,
            });
        }

        Ok(decode_section_dump(&output.stdout))
    }
}

/// True when a nonzero compiler exit is consistent with the probed member
/// or class not existing in this historical state.
pub fn is_ignorable_diagnostic(stderr: &str) -> bool {
    IGNORED_ERRORS.iter().any(|pattern| stderr.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeTarget;
    use crate::toolchain::Arch;
    use crate::version::AndroidVersion;

    #[test]
    fn test_not_a_member_of_is_ignorable() {
        let stderr = "probe.cc:9:3: error: 'access_flags_' is not a member of 'art::ArtField'";
        assert!(is_ignorable_diagnostic(stderr));
    }

    #[test]
    fn test_has_no_member_named_is_ignorable() {
        let stderr =
            "probe.cc:9:45: error: no member named 'access_flags_' in 'art::mirror::ArtField'; \
             note: 'art::mirror::ArtField' has no member named 'access_flags_'";
        assert!(is_ignorable_diagnostic(stderr));
    }

    #[test]
    fn test_other_diagnostics_are_fatal() {
        let stderr = "probe.cc:3:10: fatal error: 'runtime/runtime.h' file not found";
        assert!(!is_ignorable_diagnostic(stderr));
        assert!(!is_ignorable_diagnostic(""));
    }

    #[test]
    fn test_absent_header_short_circuits_before_any_compile() {
        let art_dir = tempfile::tempdir().unwrap();
        let core_dir = tempfile::tempdir().unwrap();

        let config = Arc::new(Config::default());
        let compiler = ProbeCompiler::new(config);

        // Paths that cannot possibly execute; reaching the compiler would
        // error with Process, not return HeaderAbsent.
        let toolchain = Toolchain {
            cxx: PathBuf::from("/nonexistent/clang++"),
            cxxflags: Vec::new(),
            objdump: PathBuf::from("/nonexistent/objdump"),
        };

        let version = AndroidVersion::from_tag("android-7.0.0_r1").unwrap();
        let target = ProbeTarget::art_field_chain().remove(0);
        let request = ProbeRequest::new(&target, &version, Arch::Arm);

        let outcome = compiler
            .probe(&request, &toolchain, art_dir.path(), core_dir.path())
            .unwrap();
        assert_eq!(outcome, ProbeOutcome::HeaderAbsent);
    }
}
