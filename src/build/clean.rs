//! `fargo clean` — remove build output and per-mode state records so the
//! next build reconfigures from scratch.

use std::fs;

use anyhow::{Context, Result};

use crate::project::{BUILD_DIR, Project};
use crate::ui;

pub fn clean(project: &Project) -> Result<i32> {
    let mut cleaned = false;

    let build_dir = project.root().join(BUILD_DIR);
    if build_dir.exists() {
        ui::status(&format!("Removing '{BUILD_DIR}' directory"));
        fs::remove_dir_all(&build_dir).context("failed to remove build directory")?;
        cleaned = true;
    }

    let state_dir = project.state_dir();
    if state_dir.exists() {
        fs::remove_dir_all(&state_dir).context("failed to remove .fargo/state directory")?;
        cleaned = true;
    }

    if cleaned {
        ui::ok("Cleaned build artifacts");
    } else {
        ui::warn(&format!("Nothing to clean (no '{BUILD_DIR}' directory)"));
    }
    Ok(0)
}
