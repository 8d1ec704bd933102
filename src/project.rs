//! Project location and identity.
//!
//! A fargo project is recognized by a top-level `CMakeLists.txt` that
//! declares a `project(...)` and a `.fargo` configuration directory next
//! to it. The locator walks upward from a starting directory, so every
//! verb works from any subdirectory of the project.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use regex::Regex;

use crate::error::FargoError;

pub const CMAKELISTS_FILE: &str = "CMakeLists.txt";
pub const FARGO_DIR: &str = ".fargo";
pub const PROFILES_SUBDIR: &str = "profiles";
pub const STATE_SUBDIR: &str = "state";
pub const BUILD_DIR: &str = "build";

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Walk upward from `start` looking for the project marker.
    ///
    /// No side effects; fails with `NotAProject` when the filesystem root
    /// is reached without a match.
    pub fn locate(start: &Path) -> Result<Self, FargoError> {
        let mut current = start.to_path_buf();
        loop {
            if is_project_root(&current) {
                return Ok(Self { root: current });
            }
            if !current.pop() {
                return Err(FargoError::NotAProject);
            }
        }
    }

    pub fn locate_from_cwd() -> Result<Self, FargoError> {
        let cwd = std::env::current_dir().map_err(|_| FargoError::NotAProject)?;
        Self::locate(&cwd)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build output directory for one mode, e.g. `build/debug`.
    pub fn build_dir(&self, mode_dir: &str) -> PathBuf {
        self.root.join(BUILD_DIR).join(mode_dir)
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join(FARGO_DIR).join(PROFILES_SUBDIR)
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join(FARGO_DIR).join(STATE_SUBDIR)
    }

    /// Project name as declared in `project(<name> ...)`.
    pub fn name(&self) -> Result<String> {
        let cmake = self.root.join(CMAKELISTS_FILE);
        let content = fs::read_to_string(&cmake)?;
        extract_project_name(&content)
            .ok_or_else(|| anyhow::anyhow!("could not extract project name from {}", cmake.display()))
    }
}

fn is_project_root(dir: &Path) -> bool {
    let cmake = dir.join(CMAKELISTS_FILE);
    if !cmake.is_file() || !dir.join(FARGO_DIR).is_dir() {
        return false;
    }
    fs::read_to_string(&cmake)
        .map(|c| c.contains("project("))
        .unwrap_or(false)
}

fn extract_project_name(cmake_content: &str) -> Option<String> {
    let re = Regex::new(r"project\(\s*(\w+)").ok()?;
    re.captures(cmake_content)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scaffold(root: &Path, name: &str) {
        fs::write(
            root.join(CMAKELISTS_FILE),
            format!("cmake_minimum_required(VERSION 3.18)\nproject({name} VERSION 0.1.0 LANGUAGES CXX)\n"),
        )
        .unwrap();
        fs::create_dir_all(root.join(FARGO_DIR)).unwrap();
    }

    #[test]
    fn locates_root_from_nested_subdirectory() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold(tmp.path(), "demo");
        let nested = tmp.path().join("src").join("detail");
        fs::create_dir_all(&nested).unwrap();

        let project = Project::locate(&nested).unwrap();
        assert_eq!(project.root(), tmp.path());
    }

    #[test]
    fn rejects_directory_without_marker() {
        let tmp = tempfile::tempdir().unwrap();
        // CMakeLists.txt alone is not enough without the .fargo directory.
        fs::write(tmp.path().join(CMAKELISTS_FILE), "project(orphan)").unwrap();
        let sub = tmp.path().join("deep");
        fs::create_dir_all(&sub).unwrap();

        assert!(matches!(
            Project::locate(&sub),
            Err(FargoError::NotAProject)
        ));
    }

    #[test]
    fn rejects_cmakelists_without_project_call() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(CMAKELISTS_FILE), "# just includes\n").unwrap();
        fs::create_dir_all(tmp.path().join(FARGO_DIR)).unwrap();

        assert!(Project::locate(tmp.path()).is_err());
    }

    #[test]
    fn extracts_project_name() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold(tmp.path(), "myapp");
        let project = Project::locate(tmp.path()).unwrap();
        assert_eq!(project.name().unwrap(), "myapp");
    }

    #[test]
    fn name_regex_tolerates_whitespace() {
        assert_eq!(
            extract_project_name("project(  spaced VERSION 1.0)"),
            Some("spaced".into())
        );
        assert_eq!(extract_project_name("add_library(x)"), None);
    }
}
