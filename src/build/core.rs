//! Build orchestration: the configure-or-rebuild decision and the CMake
//! invocations behind `fargo build` and friends.
//!
//! One invocation is one sequential pipeline: at most one configure step,
//! then one incremental build step. The configure step is skipped when
//! the state tracker says this mode is already configured for the current
//! effective configuration. Tool output is always inherited; `-v` only
//! adds fargo's own narration.

use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::error::FargoError;
use crate::profile::EffectiveConfig;
use crate::project::Project;
use crate::state::{self, Mode};
use crate::targets::TargetRegistry;
use crate::ui;

/// The native build-system generator handed to CMake. Ninja is preferred
/// when present; Make is the universally available fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Ninja,
    Make,
}

impl Generator {
    pub fn cmake_name(self) -> &'static str {
        match self {
            Self::Ninja => "Ninja",
            Self::Make => "Unix Makefiles",
        }
    }

    pub fn binary(self) -> &'static str {
        match self {
            Self::Ninja => "ninja",
            Self::Make => "make",
        }
    }

    pub fn from_cmake_name(name: &str) -> Option<Self> {
        match name {
            "Ninja" => Some(Self::Ninja),
            "Unix Makefiles" => Some(Self::Make),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct BuildResult {
    pub exit_code: i32,
    pub artifacts: Vec<PathBuf>,
}

pub fn command_exists(bin: &str) -> bool {
    Command::new(bin)
        .arg("--version")
        .output()
        .is_ok()
}

/// Pick the generator for a mode. The decision made at first configure is
/// pinned in the state record and reused on later reconfigures, so one
/// build directory never mixes generator output.
fn select_generator(
    project: &Project,
    mode: Mode,
    cfg: &EffectiveConfig,
) -> Result<Generator, FargoError> {
    if let Some(pinned) = state::pinned_generator(project, mode)
        && let Some(generator) = Generator::from_cmake_name(&pinned)
    {
        return Ok(generator);
    }

    let prefers_ninja = cfg.generator_preference() == "Ninja";
    if prefers_ninja && command_exists("ninja") {
        return Ok(Generator::Ninja);
    }
    if command_exists("make") {
        return Ok(Generator::Make);
    }
    if command_exists("ninja") {
        return Ok(Generator::Ninja);
    }
    Err(FargoError::NoBuildSystem)
}

/// Assemble the CMake configure arguments for one mode. Pure so the flag
/// composition is unit-testable without a toolchain on the host.
pub fn configure_args(
    build_dir: &str,
    mode: Mode,
    generator: Generator,
    cfg: &EffectiveConfig,
) -> Vec<String> {
    let mut args = vec![
        "-S".to_string(),
        ".".to_string(),
        "-B".to_string(),
        build_dir.to_string(),
        format!("-DCMAKE_BUILD_TYPE={}", mode.build_type(cfg)),
        "-G".to_string(),
        generator.cmake_name().to_string(),
    ];

    let standard = cfg.cxx_standard();
    if !standard.is_empty() {
        args.push(format!("-DCMAKE_CXX_STANDARD={standard}"));
    }

    let flags = mode.cxx_flags(cfg);
    if !flags.trim().is_empty() {
        args.push(format!("-DCMAKE_CXX_FLAGS={}", flags.trim()));
    }
    if let Some(san) = mode.sanitizer_flag() {
        args.push(format!("-DCMAKE_EXE_LINKER_FLAGS={san}"));
    }

    // Extra options are an opaque string in the profile; tokenized here.
    args.extend(
        cfg.extra_options()
            .split_whitespace()
            .map(str::to_string),
    );

    args
}

/// Path of a target's binary inside a mode's build directory.
pub fn artifact_path(project: &Project, mode: Mode, target_name: &str) -> PathBuf {
    let file = if cfg!(windows) {
        format!("{target_name}.exe")
    } else {
        target_name.to_string()
    };
    project.build_dir(mode.dir_name()).join(file)
}

/// Configure (if needed) and incrementally build one mode, optionally a
/// single named target.
pub fn ensure_built(
    project: &Project,
    cfg: &EffectiveConfig,
    mode: Mode,
    target: Option<&str>,
    verbose: bool,
) -> Result<BuildResult> {
    let registry = TargetRegistry::for_project(project)?;
    if let Some(name) = target {
        registry.find(name)?;
    }

    if !command_exists("cmake") {
        anyhow::bail!("required command 'cmake' not found, please install it");
    }

    let generator = select_generator(project, mode, cfg)?;
    let total_start = Instant::now();
    let build_dir = project.build_dir(mode.dir_name());
    let build_dir_str = build_dir.to_string_lossy().to_string();

    if !state::is_configured(project, mode, generator.cmake_name(), cfg) {
        let args = configure_args(&build_dir_str, mode, generator, cfg);
        ui::status(&format!(
            "Configuring {} build in {} (using {})",
            mode.build_type(cfg),
            build_dir.display(),
            generator.cmake_name()
        ));
        if verbose {
            ui::status(&format!("Running: cmake {}", args.join(" ")));
        }

        let status = Command::new("cmake")
            .args(&args)
            .current_dir(project.root())
            .status()
            .context("failed to execute cmake")?;
        if !status.success() {
            return Err(FargoError::ConfigureFailed(status.code().unwrap_or(1)).into());
        }

        state::record_configured(project, mode, generator.cmake_name(), cfg)?;
        ui::ok(&format!(
            "{} configuration completed ({}s)",
            mode.build_type(cfg),
            total_start.elapsed().as_secs()
        ));
    } else if verbose {
        ui::status(&format!(
            "{} already configured, skipping configure step",
            build_dir.display()
        ));
    }

    let jobs = cfg.build_jobs();
    let mut build_cmd = Command::new("cmake");
    build_cmd
        .arg("--build")
        .arg(&build_dir_str)
        .arg("--parallel")
        .arg(jobs.to_string())
        .current_dir(project.root());
    if let Some(name) = target {
        build_cmd.args(["--target", name]);
        ui::status(&format!(
            "Building target '{name}' ({}) with {jobs} parallel jobs...",
            mode.build_type(cfg)
        ));
    } else {
        ui::status(&format!(
            "Building ({}) with {jobs} parallel jobs...",
            mode.build_type(cfg)
        ));
    }
    if verbose {
        build_cmd.arg("--verbose");
    }

    let build_start = Instant::now();
    let status = build_cmd.status().context("failed to execute cmake")?;
    if !status.success() {
        return Err(FargoError::BuildFailed(status.code().unwrap_or(1)).into());
    }

    ui::ok(&format!(
        "Build finished: {} (build: {}s, total: {}s)",
        build_dir.display(),
        build_start.elapsed().as_secs(),
        total_start.elapsed().as_secs()
    ));

    let artifacts = match target {
        Some(name) => vec![artifact_path(project, mode, name)],
        None => registry
            .targets()
            .iter()
            .map(|t| artifact_path(project, mode, &t.name))
            .collect(),
    };

    Ok(BuildResult {
        exit_code: 0,
        artifacts,
    })
}
