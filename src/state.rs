//! Persisted build state, one record per build mode.
//!
//! A mode is "configured" when a state record exists under
//! `.fargo/state/<mode>.toml`, its fingerprint matches the current
//! effective configuration, and the on-disk build directory is still
//! there. Corrupt or unreadable records read as "not configured"; a
//! needless reconfigure beats trusting a stale cache.
//!
//! The record also pins the generator chosen at first configure, so later
//! builds of the same mode keep using it even if the host's tool set
//! changes in between.

use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::profile::EffectiveConfig;
use crate::project::Project;

/// Build variant, each with its own build directory and flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Debug,
    Release,
    Asan,
    Tsan,
}

impl Mode {
    pub const ALL: [Self; 4] = [Self::Debug, Self::Release, Self::Asan, Self::Tsan];

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
            Self::Asan => "debug_asan",
            Self::Tsan => "debug_tsan",
        }
    }

    /// CMake build type; sanitizer modes are debug builds with extra
    /// instrumentation.
    pub fn build_type<'a>(self, cfg: &'a EffectiveConfig) -> &'a str {
        match self {
            Self::Release => cfg.get("CMAKE_BUILD_TYPE_RELEASE"),
            _ => cfg.get("CMAKE_BUILD_TYPE_DEBUG"),
        }
    }

    pub fn sanitizer_flag(self) -> Option<&'static str> {
        match self {
            Self::Asan => Some("-fsanitize=address"),
            Self::Tsan => Some("-fsanitize=thread"),
            _ => None,
        }
    }

    /// Effective compiler flag string for this mode: the profile's
    /// per-build-type flags, plus sanitizer instrumentation on top of the
    /// debug set for asan/tsan.
    pub fn cxx_flags(self, cfg: &EffectiveConfig) -> String {
        let base = match self {
            Self::Release => cfg.get("CXX_FLAGS_RELEASE"),
            _ => cfg.get("CXX_FLAGS_DEBUG"),
        };
        match self.sanitizer_flag() {
            Some(san) if base.is_empty() => san.to_string(),
            Some(san) => format!("{base} {san}"),
            None => base.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildState {
    pub generator: String,
    pub build_type: String,
    pub config_hash: String,
    pub last_configured_at: u64,
}

/// Fingerprint of the configuration fields that alter the CMake configure
/// line: build type, generator, language standard, extra options, and the
/// mode's effective flag string.
pub fn fingerprint(mode: Mode, generator: &str, cfg: &EffectiveConfig) -> String {
    let mut hasher = Sha256::new();
    for field in [
        mode.build_type(cfg),
        generator,
        cfg.cxx_standard(),
        cfg.extra_options(),
        &mode.cxx_flags(cfg),
    ] {
        hasher.update(field.as_bytes());
        hasher.update([0u8]); // field separator
    }
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn load(project: &Project, mode: Mode) -> Option<BuildState> {
    let path = project
        .state_dir()
        .join(format!("{}.toml", mode.dir_name()));
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Generator pinned at the first configure of this mode, if any.
pub fn pinned_generator(project: &Project, mode: Mode) -> Option<String> {
    load(project, mode).map(|s| s.generator)
}

pub fn is_configured(
    project: &Project,
    mode: Mode,
    generator: &str,
    cfg: &EffectiveConfig,
) -> bool {
    if !project.build_dir(mode.dir_name()).is_dir() {
        return false;
    }
    match load(project, mode) {
        Some(state) => state.config_hash == fingerprint(mode, generator, cfg),
        None => false,
    }
}

/// Write the state record. Called only after the configure step has fully
/// completed, so an interrupted configure never reads back as configured.
pub fn record_configured(
    project: &Project,
    mode: Mode,
    generator: &str,
    cfg: &EffectiveConfig,
) -> Result<()> {
    let state = BuildState {
        generator: generator.to_string(),
        build_type: mode.build_type(cfg).to_string(),
        config_hash: fingerprint(mode, generator, cfg),
        last_configured_at: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    };

    let dir = project.state_dir();
    fs::create_dir_all(&dir).context("failed to create .fargo/state directory")?;
    let path = dir.join(format!("{}.toml", mode.dir_name()));
    let content = toml::to_string(&state).context("failed to serialize build state")?;
    fs::write(&path, content)
        .with_context(|| format!("failed to write build state to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::resolve;
    use crate::project::{CMAKELISTS_FILE, FARGO_DIR, PROFILES_SUBDIR};
    use std::path::Path;

    fn scaffold(root: &Path) -> Project {
        fs::write(root.join(CMAKELISTS_FILE), "project(demo)").unwrap();
        fs::create_dir_all(root.join(FARGO_DIR).join(PROFILES_SUBDIR)).unwrap();
        Project::locate(root).unwrap()
    }

    fn cfg(project: &Project) -> EffectiveConfig {
        resolve(project, None, &[]).unwrap()
    }

    #[test]
    fn fresh_project_is_not_configured() {
        let tmp = tempfile::tempdir().unwrap();
        let project = scaffold(tmp.path());
        assert!(!is_configured(&project, Mode::Debug, "Ninja", &cfg(&project)));
    }

    #[test]
    fn record_then_check_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let project = scaffold(tmp.path());
        let cfg = cfg(&project);

        fs::create_dir_all(project.build_dir("debug")).unwrap();
        record_configured(&project, Mode::Debug, "Ninja", &cfg).unwrap();

        assert!(is_configured(&project, Mode::Debug, "Ninja", &cfg));
        // Other modes stay unconfigured.
        assert!(!is_configured(&project, Mode::Release, "Ninja", &cfg));
    }

    #[test]
    fn changed_config_invalidates_the_record() {
        let tmp = tempfile::tempdir().unwrap();
        let project = scaffold(tmp.path());
        let base = cfg(&project);

        fs::create_dir_all(project.build_dir("debug")).unwrap();
        record_configured(&project, Mode::Debug, "Ninja", &base).unwrap();

        let changed = resolve(
            &project,
            None,
            &[("CMAKE_CXX_STANDARD".into(), "23".into())],
        )
        .unwrap();
        assert!(!is_configured(&project, Mode::Debug, "Ninja", &changed));
    }

    #[test]
    fn missing_build_dir_reads_as_unconfigured() {
        let tmp = tempfile::tempdir().unwrap();
        let project = scaffold(tmp.path());
        let cfg = cfg(&project);

        // Record exists but the build directory was removed out-of-band.
        record_configured(&project, Mode::Debug, "Ninja", &cfg).unwrap();
        assert!(!is_configured(&project, Mode::Debug, "Ninja", &cfg));
    }

    #[test]
    fn corrupt_record_reads_as_unconfigured() {
        let tmp = tempfile::tempdir().unwrap();
        let project = scaffold(tmp.path());
        let cfg = cfg(&project);

        fs::create_dir_all(project.build_dir("debug")).unwrap();
        fs::create_dir_all(project.state_dir()).unwrap();
        fs::write(project.state_dir().join("debug.toml"), "not valid toml [[[").unwrap();

        assert!(!is_configured(&project, Mode::Debug, "Ninja", &cfg));
        assert!(pinned_generator(&project, Mode::Debug).is_none());
    }

    #[test]
    fn generator_is_pinned_in_the_record() {
        let tmp = tempfile::tempdir().unwrap();
        let project = scaffold(tmp.path());
        let cfg = cfg(&project);

        record_configured(&project, Mode::Release, "Unix Makefiles", &cfg).unwrap();
        assert_eq!(
            pinned_generator(&project, Mode::Release).as_deref(),
            Some("Unix Makefiles")
        );
    }

    #[test]
    fn fingerprint_is_deterministic_and_sensitive() {
        let tmp = tempfile::tempdir().unwrap();
        let project = scaffold(tmp.path());
        let base = cfg(&project);

        assert_eq!(
            fingerprint(Mode::Debug, "Ninja", &base),
            fingerprint(Mode::Debug, "Ninja", &base)
        );
        assert_ne!(
            fingerprint(Mode::Debug, "Ninja", &base),
            fingerprint(Mode::Release, "Ninja", &base)
        );
        assert_ne!(
            fingerprint(Mode::Debug, "Ninja", &base),
            fingerprint(Mode::Debug, "Unix Makefiles", &base)
        );
    }

    #[test]
    fn sanitizer_modes_layer_over_debug_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let project = scaffold(tmp.path());
        let cfg = cfg(&project);

        assert_eq!(Mode::Asan.cxx_flags(&cfg), "-Wall -Wextra -g -fsanitize=address");
        assert_eq!(Mode::Tsan.cxx_flags(&cfg), "-Wall -Wextra -g -fsanitize=thread");
        assert_eq!(Mode::Debug.cxx_flags(&cfg), "-Wall -Wextra -g");
        assert_eq!(Mode::Asan.build_type(&cfg), "Debug");
    }
}
