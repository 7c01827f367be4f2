// Thu Feb 12 2026 - Alex

use crate::config::{Config, ART_REPO, SYSTEM_CORE_REPO};
use crate::probe::{ProbeCompiler, ProbeError, ProbeOutcome, ProbeRequest};
use crate::report::{ResultAggregator, ResultTable};
use crate::toolchain::{Arch, Flavor, ToolchainResolver};
use crate::version::AndroidVersion;
use crate::worktree::WorktreeCache;
use indicatif::ProgressBar;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct ProbeRow {
    arch: Arch,
    api_level: u32,
    fields: Vec<String>,
    outcome: ProbeOutcome,
}

/// Runs the (architecture x version) sweep: worktrees in, toolchains in,
/// one outcome per cell folded into the result table.
pub struct ProbeEngine {
    config: Arc<Config>,
    toolchains: ToolchainResolver,
    worktrees: WorktreeCache,
    compiler: ProbeCompiler,
    // One lock per art worktree: the access rewrite mutates the shared tree,
    // so rewrite-and-compile must not interleave across workers.
    worktree_locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
    abort: AtomicBool,
}

impl ProbeEngine {
    pub fn new(config: Arc<Config>) -> Self {
        let toolchains = ToolchainResolver::new(config.clone());
        let worktrees = WorktreeCache::new(
            config.aosp_dir.clone(),
            config.cache_dir.clone(),
            config.timeout(),
        );
        let compiler = ProbeCompiler::new(config.clone());

        Self {
            config,
            toolchains,
            worktrees,
            compiler,
            worktree_locks: Mutex::new(HashMap::new()),
            abort: AtomicBool::new(false),
        }
    }

    pub fn matrix_size(&self, versions: &[AndroidVersion]) -> usize {
        self.config.architectures.len() * versions.len()
    }

    pub fn run(
        &self,
        versions: &[AndroidVersion],
        progress: Option<&ProgressBar>,
    ) -> Result<ResultTable, ProbeError> {
        let aggregator = Mutex::new(ResultAggregator::new());

        if self.config.effective_jobs() <= 1 {
            for arch in &self.config.architectures {
                for version in versions {
                    let row = self.probe_cell(*arch, version)?;
                    Self::emit(&aggregator, row, progress);
                }
            }
        } else {
            self.run_parallel(versions, progress, &aggregator)?;
        }

        Ok(aggregator.into_inner().into_table())
    }

    fn run_parallel(
        &self,
        versions: &[AndroidVersion],
        progress: Option<&ProgressBar>,
        aggregator: &Mutex<ResultAggregator>,
    ) -> Result<(), ProbeError> {
        let mut matrix = Vec::with_capacity(self.matrix_size(versions));
        for arch in &self.config.architectures {
            for version in versions {
                matrix.push((*arch, version));
            }
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.effective_jobs())
            .build()
            .map_err(|e| ProbeError::Io(std::io::Error::other(e)))?;

        let first_error: Mutex<Option<ProbeError>> = Mutex::new(None);

        pool.install(|| {
            matrix.par_iter().for_each(|(arch, version)| {
                if self.abort.load(Ordering::SeqCst) {
                    return;
                }
                match self.probe_cell(*arch, version) {
                    Ok(row) => Self::emit(aggregator, row, progress),
                    Err(error) => {
                        self.abort.store(true, Ordering::SeqCst);
                        let mut slot = first_error.lock();
                        if slot.is_none() {
                            *slot = Some(error);
                        }
                    }
                }
            });
        });

        match first_error.into_inner() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn emit(aggregator: &Mutex<ResultAggregator>, row: ProbeRow, progress: Option<&ProgressBar>) {
        let value = aggregator
            .lock()
            .record(row.arch, row.api_level, &row.fields, &row.outcome);

        let line = format!("{}-{} => {}", row.arch, row.api_level, value);
        match progress {
            Some(bar) => {
                bar.println(line);
                bar.inc(1);
            }
            None => println!("{}", line),
        }
    }

    /// Probe one (architecture, version) cell, walking the target fallback
    /// chain until something measures.
    fn probe_cell(&self, arch: Arch, version: &AndroidVersion) -> Result<ProbeRow, ProbeError> {
        let art_dir = self.worktrees.checkout(ART_REPO, &version.tag)?;
        let system_core_dir = self.worktrees.checkout(SYSTEM_CORE_REPO, &version.tag)?;

        let flavor = Flavor::for_version(version.major);
        let toolchain = self.toolchains.resolve(arch, flavor)?;

        let lock = self.worktree_lock(&art_dir);
        let _guard = lock.lock();

        let mut fields = Vec::new();
        let mut outcome = ProbeOutcome::HeaderAbsent;
        for target in &self.config.targets {
            let request = ProbeRequest::new(target, version, arch);
            fields = target.field_names.clone();
            outcome = self
                .compiler
                .probe(&request, &toolchain, &art_dir, &system_core_dir)?;
            if outcome.is_measured() {
                break;
            }
        }

        Ok(ProbeRow {
            arch,
            api_level: version.api_level,
            fields,
            outcome,
        })
    }

    fn worktree_lock(&self, art_dir: &Path) -> Arc<Mutex<()>> {
        self.worktree_locks
            .lock()
            .entry(art_dir.to_path_buf())
            .or_default()
            .clone()
    }
}
