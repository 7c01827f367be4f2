// Tue Feb 10 2026 - Alex

use crate::git::error::GitError;
use crate::git::VersionControl;
use crate::utils::process::run_with_timeout;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// A git repository driven through the `git` binary, rooted at a fixed
/// working directory.
pub struct GitRepo {
    dir: PathBuf,
    timeout: Duration,
}

impl GitRepo {
    pub fn new(dir: PathBuf, timeout: Duration) -> Self {
        Self { dir, timeout }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn run<I, S>(&self, args: I) -> Result<String, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new("git");
        command.current_dir(&self.dir);

        let mut rendered = String::from("git");
        for arg in args {
            rendered.push(' ');
            rendered.push_str(&arg.as_ref().to_string_lossy());
            command.arg(arg.as_ref());
        }

        log::debug!("running `{}` in {}", rendered, self.dir.display());

        let output = run_with_timeout(&mut command, self.timeout)?;
        if !output.status.success() {
            return Err(GitError::Command {
                command: rendered,
                stderr: output.stderr,
            });
        }

        Ok(output.stdout.trim().to_string())
    }
}

impl VersionControl for GitRepo {
    fn tags_by_date(&self) -> Result<Vec<String>, GitError> {
        let output = self.run(["tag", "--sort=committerdate"])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn diff(&self, from: &str, to: &str, path: &str) -> Result<String, GitError> {
        self.run(["diff", from, to, "--", path])
    }

    fn add_worktree(&self, dest: &Path, tag: &str) -> Result<(), GitError> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.run([
            OsStr::new("worktree"),
            OsStr::new("add"),
            dest.as_os_str(),
            OsStr::new(tag),
        ])?;
        Ok(())
    }
}
