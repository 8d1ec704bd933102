//! `fargo targets` — list the buildable targets.
//!
//! The canonical three come from the registry; when a configured Ninja
//! build directory exists, the generator's own target list is shown as
//! well.

use std::process::Command;

use anyhow::Result;
use colored::*;

use crate::build::command_exists;
use crate::project::Project;
use crate::state::Mode;
use crate::targets::TargetRegistry;
use crate::ui;

pub fn list_targets(project: &Project) -> Result<i32> {
    let registry = TargetRegistry::for_project(project)?;

    ui::status("Available build targets:");
    let mut table = ui::Table::new(&["Target", "Kind"]);
    for target in registry.targets() {
        table.add_row(vec![
            target.name.cyan().to_string(),
            target.kind.describe().to_string(),
        ]);
    }
    table.print();

    // Generator-level targets, when a Ninja build dir is available.
    let debug_dir = project.build_dir(Mode::Debug.dir_name());
    if debug_dir.join("build.ninja").is_file() && command_exists("ninja") {
        let output = Command::new("ninja")
            .arg("-C")
            .arg(&debug_dir)
            .args(["-t", "targets"])
            .output();
        if let Ok(out) = output
            && out.status.success()
        {
            let stdout = String::from_utf8_lossy(&out.stdout);
            let mut names: Vec<&str> = stdout
                .lines()
                .filter(|l| !l.starts_with('#'))
                .filter_map(|l| l.split(':').next())
                .collect();
            names.sort_unstable();
            names.dedup();
            ui::status("Generator targets (ninja):");
            for name in names {
                println!("  {name}");
            }
        }
    } else {
        ui::status("Run 'fargo build' to generate the full target list.");
    }

    Ok(0)
}
