// Wed Feb 11 2026 - Alex

use crate::git::GitError;
use crate::toolchain::ToolchainError;
use crate::utils::process::ProcessError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
    #[error(transparent)]
    Git(#[from] GitError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("compilation failed:\n{stderr}")]
    CompileFailed { stderr: String },
    #[error("disassembly failed:\n{stderr}")]
    DisassemblyFailed { stderr: String },
    #[error("expected {expected} values in the data section, found {found}")]
    TruncatedData { expected: usize, found: usize },
}
