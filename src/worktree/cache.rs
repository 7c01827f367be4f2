// Tue Feb 10 2026 - Alex

use crate::git::{GitError, GitRepo, VersionControl};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Materializes per-(repository, tag) source trees under the cache root.
/// A checkout is created once and reused blindly afterwards; trees are
/// handed out read/write, so reuse is only safe because the one mutation a
/// probe performs (the access rewrite) is idempotent.
pub struct WorktreeCache {
    aosp_dir: PathBuf,
    cache_dir: PathBuf,
    timeout: Duration,
    // Serializes check-then-create so two workers probing the same version
    // cannot race on checkout creation.
    creation: Mutex<()>,
}

impl WorktreeCache {
    pub fn new(aosp_dir: PathBuf, cache_dir: PathBuf, timeout: Duration) -> Self {
        Self {
            aosp_dir,
            cache_dir,
            timeout,
            creation: Mutex::new(()),
        }
    }

    /// On-disk location of the worktree for (repo, tag).
    pub fn worktree_path(&self, repo: &[&str], tag: &str) -> PathBuf {
        repo.iter()
            .fold(self.cache_dir.join(tag), |path, component| {
                path.join(component)
            })
    }

    fn repo_dir(&self, repo: &[&str]) -> PathBuf {
        repo.iter()
            .fold(self.aosp_dir.clone(), |path, component| path.join(component))
    }

    /// Return the source tree for `tag`, checking it out from the canonical
    /// clone if this is the first request for the pair.
    pub fn checkout(&self, repo: &[&str], tag: &str) -> Result<PathBuf, GitError> {
        let worktree_dir = self.worktree_path(repo, tag);

        let _guard = self.creation.lock();
        if worktree_dir.is_dir() {
            return Ok(worktree_dir);
        }

        log::info!("checking out {} at {}", repo.join("/"), tag);
        let repo = GitRepo::new(self.repo_dir(repo), self.timeout);
        repo.add_worktree(&worktree_dir, tag)?;
        Ok(worktree_dir)
    }
}
