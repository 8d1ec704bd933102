//! `fargo new` — scaffold a fresh C++ project.
//!
//! The scaffold fixes the target layout the rest of the tool relies on:
//! one main executable, one test binary, one benchmark binary, plus the
//! `.fargo/profiles/default.conf` every later invocation reads.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use inquire::Text;

use crate::templates;
use crate::ui;

pub fn create_project(name: Option<&str>) -> Result<i32> {
    let name = match name {
        Some(n) => n.to_string(),
        None => Text::new("What is your project name?")
            .with_default("my-app")
            .prompt()?,
    };

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    ui::status(&format!("Creating new project: {name}"));
    scaffold_at(&cwd, &name)?;

    ui::ok("Project structure created:");
    for entry in [
        "CMakeLists.txt",
        "src/main.cpp",
        "test/example_test.cpp",
        "bench/example_bench.cpp",
        ".fargo/profiles/default.conf",
        ".gitignore",
    ] {
        println!("  {}", entry.cyan());
    }
    ui::ok(&format!("Done. cd '{name}' and start hacking!"));
    Ok(0)
}

fn scaffold_at(parent: &Path, name: &str) -> Result<()> {
    let project_dir = parent.join(name);
    if project_dir.exists() {
        anyhow::bail!("directory '{name}' already exists");
    }

    fs::create_dir_all(project_dir.join("src")).context("failed to create src")?;
    fs::create_dir_all(project_dir.join("test")).context("failed to create test")?;
    fs::create_dir_all(project_dir.join("bench")).context("failed to create bench")?;
    fs::create_dir_all(project_dir.join(".fargo").join("profiles"))
        .context("failed to create .fargo")?;

    fs::write(project_dir.join("CMakeLists.txt"), templates::cmakelists(name))?;
    fs::write(project_dir.join("src").join("main.cpp"), templates::main_cpp())?;
    fs::write(
        project_dir.join("test").join("example_test.cpp"),
        templates::test_cpp(),
    )?;
    fs::write(
        project_dir.join("bench").join("example_bench.cpp"),
        templates::bench_cpp(),
    )?;
    fs::write(project_dir.join(".gitignore"), templates::gitignore())?;
    fs::write(
        project_dir
            .join(".fargo")
            .join("profiles")
            .join("default.conf"),
        templates::default_profile(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::resolve;
    use crate::project::Project;

    #[test]
    fn new_project_is_immediately_locatable_and_resolvable() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_at(tmp.path(), "shiny").unwrap();

        let project = Project::locate(&tmp.path().join("shiny")).unwrap();
        assert_eq!(project.name().unwrap(), "shiny");
        assert!(project.profiles_dir().join("default.conf").is_file());

        // The written default.conf must parse cleanly through the resolver.
        let cfg = resolve(&project, None, &[]).unwrap();
        assert_eq!(cfg.get("CMAKE_GENERATOR"), "Ninja");
    }

    #[test]
    fn refuses_existing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("taken")).unwrap();
        assert!(scaffold_at(tmp.path(), "taken").is_err());
    }
}
