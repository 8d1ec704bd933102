//! Code quality tools: clang-format and the static analyzers
//! (clang-tidy, cppcheck).
//!
//! Neither verb requires a build; both operate on the source tree
//! directly. `check` runs every installed analyzer without
//! short-circuiting and fails only if findings reach the severity floor
//! configured by `STATIC_ANALYSIS_SEVERITY`.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::build::command_exists;
use crate::error::FargoError;
use crate::profile::EffectiveConfig;
use crate::project::Project;
use crate::templates;
use crate::ui;

const SOURCE_DIRS: &[&str] = &["src", "test", "bench"];
const CPP_EXTENSIONS: &[&str] = &["cpp", "cxx", "cc", "h", "hpp", "hxx"];

/// All C++ sources and headers under the scaffold's source directories.
fn find_cpp_files(project: &Project) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in SOURCE_DIRS {
        let root = project.root().join(dir);
        if !root.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| CPP_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
            {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

fn ensure_clang_format_config(project: &Project) -> Result<()> {
    let path = project.root().join(".clang-format");
    if !path.exists() {
        ui::status("Creating .clang-format configuration...");
        fs::write(&path, templates::clang_format())?;
        ui::ok(".clang-format created with sensible defaults");
    }
    Ok(())
}

/// `fargo format [--check]`. Check mode's nonzero exit means "would
/// reformat", not a tool error.
pub fn format_code(project: &Project, check_only: bool) -> Result<i32> {
    if !command_exists("clang-format") {
        ui::warn("clang-format not found. Install it to format code.");
        ui::warn("Ubuntu/Debian: sudo apt install clang-format");
        ui::warn("macOS: brew install clang-format");
        return Ok(0);
    }

    ensure_clang_format_config(project)?;

    let files = find_cpp_files(project);
    if files.is_empty() {
        ui::warn("No C++ source files found to format");
        return Ok(0);
    }

    if check_only {
        ui::status(&format!("Checking formatting of {} files...", files.len()));
        let pb = progress_bar(files.len());
        let unformatted: Vec<String> = files
            .par_iter()
            .filter_map(|path| {
                pb.inc(1);
                let out = Command::new("clang-format")
                    .args(["--dry-run", "--Werror"])
                    .arg(path)
                    .output();
                match out {
                    Ok(out) if out.status.success() => None,
                    _ => Some(path.display().to_string()),
                }
            })
            .collect();
        pb.finish_and_clear();

        if unformatted.is_empty() {
            ui::ok("All files are properly formatted");
            Ok(0)
        } else {
            for file in &unformatted {
                ui::warn(&format!("File needs formatting: {file}"));
            }
            ui::warn("Some files need formatting. Run 'fargo format' to fix them.");
            Ok(1)
        }
    } else {
        ui::status(&format!("Formatting {} C++ files...", files.len()));
        let pb = progress_bar(files.len());
        files.par_iter().for_each(|path| {
            pb.inc(1);
            let result = Command::new("clang-format").arg("-i").arg(path).output();
            if result.is_err() {
                pb.suspend(|| ui::warn(&format!("Could not format file: {}", path.display())));
            }
        });
        pb.finish_and_clear();
        ui::ok(&format!("Code formatting completed ({} files)", files.len()));
        Ok(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Warning,
    Error,
}

impl Severity {
    fn from_config(cfg: &EffectiveConfig) -> Self {
        match cfg.get("STATIC_ANALYSIS_SEVERITY") {
            "error" => Self::Error,
            _ => Self::Warning,
        }
    }
}

/// `-std=c++20` style flag, or nothing when the profile leaves the
/// standard empty (the value is opaque; an empty one means "compiler
/// default", not `-std=c++`).
fn std_flag(prefix: &str, standard: &str) -> Option<String> {
    if standard.is_empty() {
        None
    } else {
        Some(format!("{prefix}{standard}"))
    }
}

/// Count findings at or above the severity floor in analyzer output.
fn count_findings(output: &str, severity: Severity) -> usize {
    output
        .lines()
        .filter(|line| {
            line.contains("error:")
                || (severity == Severity::Warning && line.contains("warning:"))
        })
        .count()
}

fn run_clang_tidy(project: &Project, cfg: &EffectiveConfig, severity: Severity) -> usize {
    ui::status("Running clang-tidy analysis...");

    let sources: Vec<PathBuf> = find_cpp_files(project)
        .into_iter()
        .filter(|p| {
            p.extension()
                .is_some_and(|e| ["cpp", "cxx", "cc"].contains(&e.to_string_lossy().as_ref()))
        })
        .collect();
    if sources.is_empty() {
        return 0;
    }

    let std_flag = std_flag("-std=c++", cfg.cxx_standard());
    let pb = progress_bar(sources.len());
    let findings: usize = sources
        .par_iter()
        .map(|path| {
            pb.inc(1);
            let mut cmd = Command::new("clang-tidy");
            cmd.arg(path).arg("--");
            if let Some(flag) = &std_flag {
                cmd.arg(flag);
            }
            let output = cmd.current_dir(project.root()).output();
            match output {
                Ok(out) => {
                    let stdout = String::from_utf8_lossy(&out.stdout);
                    let count = count_findings(&stdout, severity);
                    if count > 0 {
                        pb.suspend(|| {
                            println!("{} Issues in {}", "!".yellow(), path.display());
                            println!("{}", stdout.trim());
                        });
                    }
                    count
                }
                Err(_) => 0,
            }
        })
        .sum();
    pb.finish_and_clear();

    if findings == 0 {
        ui::ok("clang-tidy: No issues found");
    }
    findings
}

fn run_cppcheck(project: &Project, cfg: &EffectiveConfig, severity: Severity) -> usize {
    ui::status("Running cppcheck analysis...");

    let enable = match severity {
        Severity::Warning => "warning,style,performance,portability",
        Severity::Error => "warning",
    };
    let dirs: Vec<&str> = SOURCE_DIRS
        .iter()
        .copied()
        .filter(|d| project.root().join(d).is_dir())
        .collect();

    let mut cmd = Command::new("cppcheck");
    cmd.arg(format!("--enable={enable}"));
    if let Some(flag) = std_flag("--std=c++", cfg.cxx_standard()) {
        cmd.arg(flag);
    }
    let output = cmd
        .args(["--suppress=missingIncludeSystem", "--quiet"])
        .args(&dirs)
        .current_dir(project.root())
        .output();

    match output {
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let findings = count_findings(&stderr, severity);
            if findings > 0 {
                println!("{}", stderr.trim());
            } else {
                ui::ok("cppcheck: No issues found");
            }
            findings
        }
        Err(_) => {
            ui::warn("cppcheck analysis failed");
            0
        }
    }
}

/// `fargo check`. Runs every installed analyzer in sequence and reports
/// `AnalysisFailed` if any of them found issues at the configured
/// severity.
pub fn check_code(project: &Project, cfg: &EffectiveConfig) -> Result<i32> {
    ui::status("Running static analysis...");
    let severity = Severity::from_config(cfg);

    let mut found_analyzer = false;
    let mut total_findings = 0usize;

    if command_exists("clang-tidy") {
        found_analyzer = true;
        total_findings += run_clang_tidy(project, cfg, severity);
    }
    if command_exists("cppcheck") {
        found_analyzer = true;
        total_findings += run_cppcheck(project, cfg, severity);
    }

    if !found_analyzer {
        ui::warn("No static analysis tools found. Install clang-tidy or cppcheck.");
        ui::warn("Ubuntu/Debian: sudo apt install clang-tidy cppcheck");
        ui::warn("macOS: brew install llvm cppcheck");
        return Ok(0);
    }

    if total_findings > 0 {
        return Err(FargoError::AnalysisFailed.into());
    }
    ui::ok("Static analysis completed - no issues found");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{CMAKELISTS_FILE, FARGO_DIR};

    #[test]
    fn finds_sources_across_scaffold_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(CMAKELISTS_FILE), "project(demo)").unwrap();
        fs::create_dir_all(tmp.path().join(FARGO_DIR)).unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::create_dir_all(tmp.path().join("test")).unwrap();
        fs::write(tmp.path().join("src/main.cpp"), "int main(){}").unwrap();
        fs::write(tmp.path().join("src/util.hpp"), "").unwrap();
        fs::write(tmp.path().join("test/example_test.cpp"), "").unwrap();
        fs::write(tmp.path().join("src/notes.txt"), "skip me").unwrap();

        let project = Project::locate(tmp.path()).unwrap();
        let files = find_cpp_files(&project);
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.extension().is_some()));
    }

    #[test]
    fn empty_standard_emits_no_std_flag() {
        assert_eq!(std_flag("-std=c++", "20").as_deref(), Some("-std=c++20"));
        assert_eq!(std_flag("--std=c++", "17").as_deref(), Some("--std=c++17"));
        assert_eq!(std_flag("-std=c++", ""), None);
    }

    #[test]
    fn severity_floor_filters_warnings() {
        let output = "a.cpp:1:1: warning: unused variable\nb.cpp:2:2: error: bad cast\n";
        assert_eq!(count_findings(output, Severity::Warning), 2);
        assert_eq!(count_findings(output, Severity::Error), 1);
        assert_eq!(count_findings("all clean\n", Severity::Warning), 0);
    }
}
