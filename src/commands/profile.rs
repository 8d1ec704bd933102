//! `fargo profile` — list, create, show, and (re)initialize profiles.

use std::fs;

use anyhow::{Context, Result};
use colored::*;

use crate::error::FargoError;
use crate::profile::DEFAULT_PROFILE;
use crate::project::Project;
use crate::templates;
use crate::ui;

#[derive(Debug, Clone)]
pub enum ProfileOp {
    List,
    New { name: String },
    Show { name: Option<String> },
    Init,
}

pub fn handle(project: &Project, op: &ProfileOp) -> Result<i32> {
    match op {
        ProfileOp::List => list(project),
        ProfileOp::New { name } => create(project, name),
        ProfileOp::Show { name } => show(project, name.as_deref()),
        ProfileOp::Init => init(project),
    }
}

fn list(project: &Project) -> Result<i32> {
    let dir = project.profiles_dir();
    if !dir.is_dir() {
        ui::warn("No profiles directory found. Run 'fargo profile init' to create it.");
        return Ok(0);
    }

    let mut names: Vec<String> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let path = e.path();
            if path.extension().is_some_and(|ext| ext == "conf") {
                path.file_stem().map(|s| s.to_string_lossy().to_string())
            } else {
                None
            }
        })
        .collect();
    names.sort();

    let mut table = ui::Table::new(&["Profile", "File"]);
    for name in names {
        let label = if name == DEFAULT_PROFILE {
            format!("{} (default)", name.green())
        } else {
            name.cyan().to_string()
        };
        table.add_row(vec![label, format!(".fargo/profiles/{name}.conf")]);
    }
    ui::status("Available profiles:");
    table.print();
    Ok(0)
}

fn create(project: &Project, name: &str) -> Result<i32> {
    let dir = project.profiles_dir();
    let profile_file = dir.join(format!("{name}.conf"));
    if profile_file.exists() {
        anyhow::bail!("profile '{name}' already exists");
    }

    fs::create_dir_all(&dir).context("failed to create profiles directory")?;
    let default_file = dir.join(format!("{DEFAULT_PROFILE}.conf"));
    if !default_file.exists() {
        fs::write(&default_file, templates::default_profile())?;
    }

    // New profiles start as a copy of the default so every key is visible.
    let content = format!(
        "# Custom profile: {name}\n{}",
        fs::read_to_string(&default_file)?
    );
    fs::write(&profile_file, content)?;

    ui::ok(&format!(
        "Profile '{name}' created. Edit {} to customize.",
        profile_file.display()
    ));
    Ok(0)
}

fn show(project: &Project, name: Option<&str>) -> Result<i32> {
    let name = name.unwrap_or(DEFAULT_PROFILE);
    let file = project.profiles_dir().join(format!("{name}.conf"));
    if !file.is_file() {
        return Err(FargoError::ProfileNotFound(name.to_string()).into());
    }
    ui::status(&format!("Profile: {name}"));
    print!("{}", fs::read_to_string(&file)?);
    Ok(0)
}

fn init(project: &Project) -> Result<i32> {
    let dir = project.profiles_dir();
    fs::create_dir_all(&dir).context("failed to create profiles directory")?;
    fs::write(
        dir.join(format!("{DEFAULT_PROFILE}.conf")),
        templates::default_profile(),
    )?;
    ui::ok("Profile system initialized with default profile");
    Ok(0)
}
