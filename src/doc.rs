//! Documentation generation via Doxygen.
//!
//! The Doxyfile is rendered from a template merged with the profile's
//! documentation options; an existing Doxyfile is left untouched so user
//! edits survive.

use std::fs;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::build::command_exists;
use crate::error::FargoError;
use crate::profile::EffectiveConfig;
use crate::project::Project;
use crate::templates;
use crate::ui;

fn ensure_doxyfile(project: &Project, cfg: &EffectiveConfig) -> Result<()> {
    let path = project.root().join("Doxyfile");
    if path.exists() {
        return Ok(());
    }
    ui::status("Creating Doxyfile configuration...");
    let content = templates::doxyfile(
        &project.name()?,
        cfg.get("DOC_EXTRACT_ALL"),
        cfg.get("DOC_GENERATE_CALL_GRAPH"),
    );
    fs::write(&path, content)?;
    ui::ok("Doxyfile created. You can customize it for your project needs.");
    Ok(())
}

fn ensure_readme(project: &Project) -> Result<()> {
    let path = project.root().join("README.md");
    if path.exists() {
        return Ok(());
    }
    fs::write(&path, templates::readme(&project.name()?))?;
    ui::ok("README.md created with basic project information.");
    Ok(())
}

pub fn generate_docs(project: &Project, cfg: &EffectiveConfig, verbose: bool) -> Result<i32> {
    if !command_exists("doxygen") {
        ui::warn("Doxygen not found. Install it to generate documentation.");
        ui::warn("Ubuntu/Debian: sudo apt install doxygen");
        ui::warn("macOS: brew install doxygen");
        return Ok(0);
    }

    ensure_doxyfile(project, cfg)?;
    ensure_readme(project)?;
    fs::create_dir_all(project.root().join("docs"))?;

    ui::status("Generating documentation with Doxygen...");
    let mut cmd = Command::new("doxygen");
    cmd.arg("Doxyfile").current_dir(project.root());

    let status = if verbose {
        cmd.status().context("failed to execute doxygen")?
    } else {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::default_spinner()
                .template("{spinner:.magenta} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Running Doxygen...");
        let output = cmd.output().context("failed to execute doxygen")?;
        pb.finish_and_clear();
        if !output.status.success() {
            eprint!("{}", String::from_utf8_lossy(&output.stderr));
        }
        output.status
    };

    if !status.success() {
        return Err(FargoError::DocGenerationFailed(status.code().unwrap_or(1)).into());
    }

    let index = project.root().join("docs").join("html").join("index.html");
    ui::ok("Documentation generated successfully");
    if index.exists() {
        ui::status(&format!(
            "Open {} in your browser to view the documentation",
            index.display()
        ));
    }
    Ok(0)
}
