// Tue Feb 10 2026 - Alex

use crate::toolchain::error::ToolchainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target CPU architecture of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    Arm,
    X86,
    Arm64,
    X86_64,
}

impl Arch {
    /// Sweep order of the reference run.
    pub const ALL: [Arch; 4] = [Arch::Arm, Arch::X86, Arch::Arm64, Arch::X86_64];

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Arm => "arm",
            Arch::X86 => "x86",
            Arch::Arm64 => "arm64",
            Arch::X86_64 => "x86_64",
        }
    }

    /// Triplet spelling used for disassembler executables and as the legacy
    /// flavor's host triplet.
    pub fn generic_triplet(&self) -> &'static str {
        match self {
            Arch::Arm => "arm-linux-androideabi",
            Arch::X86 => "i686-linux-android",
            Arch::Arm64 => "aarch64-linux-android",
            Arch::X86_64 => "x86_64-linux-android",
        }
    }

    /// ABI-qualified spelling; the modern compiler executable is named
    /// `<abi_triplet><api>-clang++`.
    pub fn abi_triplet(&self) -> &'static str {
        match self {
            Arch::Arm => "armv7a-linux-androideabi",
            Arch::X86 => "i686-linux-android",
            Arch::Arm64 => "aarch64-linux-android",
            Arch::X86_64 => "x86_64-linux-android",
        }
    }

    pub fn is_64bit(&self) -> bool {
        matches!(self, Arch::Arm64 | Arch::X86_64)
    }

    /// Numeric target API level for the cross-compiler. 64-bit ABIs only
    /// exist from 21 on; 32-bit ones keep the older baseline.
    pub fn target_api_level(&self) -> u32 {
        if self.is_64bit() {
            21
        } else {
            16
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = ToolchainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arm" => Ok(Arch::Arm),
            "x86" => Ok(Arch::X86),
            "arm64" | "aarch64" => Ok(Arch::Arm64),
            "x86_64" | "x64" => Ok(Arch::X86_64),
            other => Err(ToolchainError::UnknownArch(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triplet_spellings() {
        assert_eq!(Arch::Arm.generic_triplet(), "arm-linux-androideabi");
        assert_eq!(Arch::Arm.abi_triplet(), "armv7a-linux-androideabi");
        assert_eq!(Arch::X86.generic_triplet(), Arch::X86.abi_triplet());
        assert_eq!(Arch::Arm64.generic_triplet(), "aarch64-linux-android");
    }

    #[test]
    fn test_target_api_level_by_width() {
        assert_eq!(Arch::Arm.target_api_level(), 16);
        assert_eq!(Arch::X86.target_api_level(), 16);
        assert_eq!(Arch::Arm64.target_api_level(), 21);
        assert_eq!(Arch::X86_64.target_api_level(), 21);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("arm64".parse::<Arch>().unwrap(), Arch::Arm64);
        assert_eq!("x86_64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert!("riscv64".parse::<Arch>().is_err());
    }
}
