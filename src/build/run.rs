//! `fargo run` — ensure a debug build, then execute the main binary.

use std::process::Command;

use anyhow::{Context, Result};

use super::core::{artifact_path, ensure_built};
use crate::profile::EffectiveConfig;
use crate::project::Project;
use crate::state::Mode;
use crate::targets::{TargetKind, TargetRegistry};
use crate::ui;

/// Build the debug executable and run it with the forwarded arguments.
/// Returns the binary's own exit code; fargo mirrors it.
pub fn run_binary(
    project: &Project,
    cfg: &EffectiveConfig,
    args: &[String],
    verbose: bool,
) -> Result<i32> {
    ensure_built(project, cfg, Mode::Debug, None, verbose)?;

    let registry = TargetRegistry::for_project(project)?;
    let target = registry.of_kind(TargetKind::Executable);
    let binary = artifact_path(project, Mode::Debug, &target.name);
    if !binary.is_file() {
        anyhow::bail!(
            "binary not found at '{}', the build may have failed",
            binary.display()
        );
    }

    ui::status(&format!("Running {}...", target.name));
    let status = Command::new(&binary)
        .args(args)
        .current_dir(project.root())
        .status()
        .with_context(|| format!("failed to execute {}", binary.display()))?;

    Ok(status.code().unwrap_or(1))
}
