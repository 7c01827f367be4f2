// Tue Feb 10 2026 - Alex

use crate::config::Config;
use crate::toolchain::error::ToolchainError;
use crate::toolchain::triplet::Arch;
use crate::toolchain::{Flavor, Toolchain};
use crate::utils::process::run_with_timeout;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

pub const NDK_R21_ENV: &str = "ANDROID_NDK_R21_ROOT";
pub const NDK_R17B_ENV: &str = "ANDROID_NDK_R17B_ROOT";

/// Resolves concrete compiler/disassembler paths and flags per
/// (architecture, flavor). Legacy standalone toolchains are generated on
/// first use and cached on disk under the cache root; resolved toolchains
/// are additionally memoized in memory so a sweep pays the lookup once.
pub struct ToolchainResolver {
    config: Arc<Config>,
    resolved: Mutex<HashMap<(Arch, Flavor), Toolchain>>,
}

impl ToolchainResolver {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    pub fn resolve(&self, arch: Arch, flavor: Flavor) -> Result<Toolchain, ToolchainError> {
        if let Some(toolchain) = self.resolved.lock().get(&(arch, flavor)) {
            return Ok(toolchain.clone());
        }

        let toolchain = self.resolve_uncached(arch, flavor)?;
        self.resolved
            .lock()
            .insert((arch, flavor), toolchain.clone());
        Ok(toolchain)
    }

    fn resolve_uncached(&self, arch: Arch, flavor: Flavor) -> Result<Toolchain, ToolchainError> {
        let api_level = arch.target_api_level();

        let (install_dir, cxx_prefix) = match flavor {
            Flavor::Clang => {
                let install_dir = self.prebuilt_llvm_dir()?;
                let prefix = format!("{}{}", arch.abi_triplet(), api_level);
                (install_dir, prefix)
            }
            Flavor::Gcc => {
                let install_dir = self.standalone_toolchain_dir(arch, flavor, api_level)?;
                (install_dir, arch.generic_triplet().to_string())
            }
        };

        let bin_dir = install_dir.join("bin");
        let cxx = bin_dir.join(format!("{}-{}", cxx_prefix, flavor.cxx_name()));
        let objdump = bin_dir.join(format!("{}-objdump", arch.generic_triplet()));

        if !cxx.is_file() {
            return Err(ToolchainError::CompilerNotFound(cxx));
        }
        if !objdump.is_file() {
            return Err(ToolchainError::DisassemblerNotFound(objdump));
        }

        let cxxflags = Self::cxxflags(arch, flavor);

        log::debug!("{}/{} toolchain: {}", arch, flavor, cxx.display());

        Ok(Toolchain {
            cxx,
            cxxflags,
            objdump,
        })
    }

    fn cxxflags(arch: Arch, flavor: Flavor) -> Vec<String> {
        let mut flags = vec![match flavor {
            Flavor::Clang => "-std=c++2a".to_string(),
            Flavor::Gcc => "-std=c++14".to_string(),
        }];

        if arch == Arch::Arm {
            flags.push("-march=armv7-a".to_string());
            flags.push("-mthumb".to_string());
        }

        // Historical headers override virtuals without the keyword; the
        // warning is expected and harmless, so mute it wholesale.
        if flavor == Flavor::Clang {
            flags.push("-Wno-inconsistent-missing-override".to_string());
        }

        flags
    }

    /// The r21 distribution ships one prebuilt host directory under
    /// `toolchains/llvm/prebuilt/`; its name varies by host OS, so take the
    /// first entry (sorted for determinism).
    fn prebuilt_llvm_dir(&self) -> Result<PathBuf, ToolchainError> {
        let root = self
            .config
            .ndk_r21_root
            .as_ref()
            .ok_or(ToolchainError::MissingRoot(NDK_R21_ENV))?;

        let prebuilt = root.join("toolchains").join("llvm").join("prebuilt");
        let mut hosts: Vec<PathBuf> = std::fs::read_dir(&prebuilt)
            .map_err(|_| ToolchainError::InstallNotFound(prebuilt.clone()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        hosts.sort();

        hosts
            .into_iter()
            .next()
            .ok_or(ToolchainError::InstallNotFound(prebuilt))
    }

    fn standalone_toolchain_dir(
        &self,
        arch: Arch,
        flavor: Flavor,
        api_level: u32,
    ) -> Result<PathBuf, ToolchainError> {
        let install_dir = self
            .config
            .cache_dir
            .join("toolchains")
            .join(format!("{}-{}", arch, flavor));

        if install_dir.is_dir() {
            return Ok(install_dir);
        }

        let root = self
            .config
            .ndk_r17b_root
            .as_ref()
            .ok_or(ToolchainError::MissingRoot(NDK_R17B_ENV))?;

        self.generate_standalone_toolchain(root, arch, api_level, &install_dir)?;
        Ok(install_dir)
    }

    fn generate_standalone_toolchain(
        &self,
        ndk_root: &Path,
        arch: Arch,
        api_level: u32,
        install_dir: &Path,
    ) -> Result<(), ToolchainError> {
        let script = ndk_root
            .join("build")
            .join("tools")
            .join("make_standalone_toolchain.py");

        log::info!("generating standalone {} toolchain (one-time)", arch);

        let mut command = Command::new(&script);
        command
            .arg("--arch")
            .arg(arch.as_str())
            .arg("--api")
            .arg(api_level.to_string())
            .arg("--stl")
            .arg("gnustl")
            .arg("--install-dir")
            .arg(install_dir);

        let output = run_with_timeout(&mut command, self.config.timeout())?;
        if !output.status.success() {
            return Err(ToolchainError::GeneratorFailed {
                stderr: output.stderr,
            });
        }
        Ok(())
    }
}
