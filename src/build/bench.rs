//! `fargo bench` — release build, then the Google Benchmark binary with
//! its output streamed verbatim.

use std::process::Command;

use anyhow::{Context, Result};

use super::core::{artifact_path, ensure_built};
use crate::profile::EffectiveConfig;
use crate::project::Project;
use crate::state::Mode;
use crate::targets::{TargetKind, TargetRegistry};
use crate::ui;

pub fn run_benchmarks(
    project: &Project,
    cfg: &EffectiveConfig,
    args: &[String],
    verbose: bool,
) -> Result<i32> {
    ensure_built(project, cfg, Mode::Release, None, verbose)?;

    let registry = TargetRegistry::for_project(project)?;
    let target = registry.of_kind(TargetKind::Benchmark);
    let binary = artifact_path(project, Mode::Release, &target.name);
    if !binary.is_file() {
        anyhow::bail!(
            "benchmark binary not found at '{}', the build may have failed",
            binary.display()
        );
    }

    ui::status("Running benchmarks...");
    let mut cmd = Command::new(&binary);
    if args.is_empty() {
        // Profile-driven defaults; user arguments replace them entirely.
        cmd.arg(format!(
            "--benchmark_min_time={}s",
            cfg.get("BENCH_MIN_TIME")
        ));
        cmd.arg(format!(
            "--benchmark_repetitions={}",
            cfg.get("BENCH_REPETITIONS")
        ));
    } else {
        cmd.args(args);
    }

    let status = cmd
        .current_dir(project.root())
        .status()
        .with_context(|| format!("failed to execute {}", binary.display()))?;

    Ok(status.code().unwrap_or(1))
}
