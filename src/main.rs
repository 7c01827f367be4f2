// Thu Feb 12 2026 - Alex

use anyhow::Context;
use art_offset_prober::{
    config::Config,
    engine::ProbeEngine,
    git::GitRepo,
    toolchain::resolver::{NDK_R17B_ENV, NDK_R21_ENV},
    toolchain::Arch,
    ui::banner::Banner,
    utils,
    version::VersionResolver,
};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "ART field layout prober across AOSP history", long_about = None)]
struct Args {
    /// Directory containing the aosp/ checkout area and cache/
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Architectures to sweep (defaults to arm, x86, arm64, x86_64)
    #[arg(short, long)]
    arch: Vec<String>,

    /// Write the final JSON report here as well as to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Probe workers; 1 = sequential reference behavior, 0 = all cores
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Per-subprocess timeout in seconds
    #[arg(long, default_value_t = 300)]
    timeout: u64,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    no_progress: bool,

    #[arg(long)]
    no_banner: bool,
}

fn main() {
    let args = Args::parse();

    if std::env::var_os("RUST_LOG").is_some() {
        utils::logging::init_from_env();
    } else {
        utils::logging::init_logger(args.verbose);
    }

    if !args.no_banner {
        Banner::print();
    }

    let start_time = Instant::now();

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }

    println!();
    println!(
        "{} Probe sweep complete in {}",
        "[+]".green(),
        utils::format_duration(start_time.elapsed())
    );
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = build_config(args)?;
    config.validate().map_err(anyhow::Error::msg)?;

    println!(
        "{} AOSP checkout: {}",
        "[*]".blue(),
        config.aosp_dir.display()
    );

    let art_repo = GitRepo::new(config.art_repo_dir(), config.timeout());
    let resolver = VersionResolver::new(Arc::new(art_repo));
    let versions = resolver
        .resolve(&config.tracked_headers())
        .context("mining version history")?;

    println!(
        "{} {} version(s) selected for probing",
        "[+]".green(),
        versions.len()
    );

    let config = Arc::new(config);
    let engine = ProbeEngine::new(config.clone());

    let progress = if args.no_progress {
        None
    } else {
        let bar = ProgressBar::new(engine.matrix_size(&versions) as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(bar)
    };

    let table = engine
        .run(&versions, progress.as_ref())
        .context("probe sweep")?;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    println!();
    println!(
        "{} {} key(s), {} distinct observation(s)",
        "[+]".green(),
        table.len(),
        table.observation_count()
    );
    println!();
    println!("{}", table);

    if let Some(output) = &config.output_file {
        std::fs::write(output, format!("{}\n", table))
            .with_context(|| format!("writing {}", output.display()))?;
        println!(
            "{} Report saved to: {}",
            "[+]".green(),
            output.display()
        );
    }

    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<Config> {
    let architectures = if args.arch.is_empty() {
        Arch::ALL.to_vec()
    } else {
        args.arch
            .iter()
            .map(|name| Arch::from_str(name))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Config::default()
        .with_root(args.root.clone())
        .with_ndk_roots(
            std::env::var_os(NDK_R21_ENV).map(PathBuf::from),
            std::env::var_os(NDK_R17B_ENV).map(PathBuf::from),
        )
        .with_architectures(architectures)
        .with_jobs(args.jobs)
        .with_timeout_seconds(args.timeout)
        .with_output_file(args.output.clone()))
}
