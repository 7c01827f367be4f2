// Tue Feb 10 2026 - Alex

use crate::utils::process::ProcessError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("`{command}` failed:\n{stderr}")]
    Command { command: String, stderr: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
