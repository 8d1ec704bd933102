//! `fargo test` — debug build, then CTest (or the test binary directly
//! when the user passes their own GoogleTest arguments).

use std::process::Command;

use anyhow::{Context, Result};

use super::core::{artifact_path, ensure_built};
use crate::error::FargoError;
use crate::profile::EffectiveConfig;
use crate::project::Project;
use crate::state::Mode;
use crate::targets::{TargetKind, TargetRegistry};
use crate::ui;

pub fn run_tests(
    project: &Project,
    cfg: &EffectiveConfig,
    args: &[String],
    verbose: bool,
) -> Result<i32> {
    ensure_built(project, cfg, Mode::Debug, None, verbose)?;

    let build_dir = project.build_dir(Mode::Debug.dir_name());

    if args.is_empty() {
        ui::status("Running tests with CTest...");
        let mut cmd = Command::new("ctest");
        if cfg.get("TEST_OUTPUT_ON_FAILURE") != "OFF" {
            cmd.arg("--output-on-failure");
        }
        cmd.arg("--parallel")
            .arg(cfg.test_jobs().to_string())
            .current_dir(&build_dir);

        let status = cmd.status().context("failed to execute ctest")?;
        if !status.success() {
            return Err(FargoError::TestsFailed(status.code().unwrap_or(1)).into());
        }
        ui::ok("All tests passed");
        return Ok(0);
    }

    // Custom arguments go straight to the GoogleTest binary.
    let registry = TargetRegistry::for_project(project)?;
    let target = registry.of_kind(TargetKind::Test);
    let binary = artifact_path(project, Mode::Debug, &target.name);
    if !binary.is_file() {
        anyhow::bail!(
            "test binary not found at '{}', the build may have failed",
            binary.display()
        );
    }

    ui::status("Running tests with custom arguments...");
    let status = Command::new(&binary)
        .args(args)
        .current_dir(project.root())
        .status()
        .with_context(|| format!("failed to execute {}", binary.display()))?;
    if !status.success() {
        return Err(FargoError::TestsFailed(status.code().unwrap_or(1)).into());
    }
    Ok(0)
}
