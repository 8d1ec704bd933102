//! `fargo asan` / `fargo tsan` — build in a sanitizer mode, then run the
//! main binary under the sanitizer runtime.
//!
//! A nonzero exit here usually means the sanitizer found something; it is
//! reported and mirrored, never treated as a configure or build error.

use std::process::Command;

use anyhow::{Context, Result};

use super::core::{artifact_path, ensure_built};
use crate::profile::EffectiveConfig;
use crate::project::Project;
use crate::state::Mode;
use crate::targets::{TargetKind, TargetRegistry};
use crate::ui;

pub fn run_sanitized(
    project: &Project,
    cfg: &EffectiveConfig,
    mode: Mode,
    args: &[String],
    verbose: bool,
) -> Result<i32> {
    let (env_key, env_value, label) = match mode {
        Mode::Asan => (
            "ASAN_OPTIONS",
            "color=always:print_stats=1:check_initialization_order=1:strict_init_order=1",
            "AddressSanitizer",
        ),
        Mode::Tsan => (
            "TSAN_OPTIONS",
            "color=always:print_stats=1:halt_on_error=1",
            "ThreadSanitizer",
        ),
        _ => anyhow::bail!("not a sanitizer mode"),
    };

    ensure_built(project, cfg, mode, None, verbose)?;

    let registry = TargetRegistry::for_project(project)?;
    let target = registry.of_kind(TargetKind::Executable);
    let binary = artifact_path(project, mode, &target.name);
    if !binary.is_file() {
        anyhow::bail!("{label} binary not found at '{}'", binary.display());
    }

    ui::status(&format!("Running {} with {label}...", target.name));
    let status = Command::new(&binary)
        .args(args)
        .env(env_key, env_value)
        .current_dir(project.root())
        .status()
        .with_context(|| format!("failed to execute {}", binary.display()))?;

    let code = status.code().unwrap_or(1);
    if code != 0 {
        ui::warn(&format!("{label} reported findings (exit code {code})"));
    }
    Ok(code)
}
