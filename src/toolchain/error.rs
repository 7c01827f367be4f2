// Tue Feb 10 2026 - Alex

use crate::utils::process::ProcessError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("unknown architecture: {0}")]
    UnknownArch(String),
    #[error("{0} is not set; cannot locate the NDK")]
    MissingRoot(&'static str),
    #[error("no prebuilt toolchain found under {0}")]
    InstallNotFound(PathBuf),
    #[error("standalone toolchain generation failed:\n{stderr}")]
    GeneratorFailed { stderr: String },
    #[error("compiler not found: {0}")]
    CompilerNotFound(PathBuf),
    #[error("disassembler not found: {0}")]
    DisassemblerNotFound(PathBuf),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
