//! Configuration profiles and resolution.
//!
//! Profiles live under `.fargo/profiles/<name>.conf` as flat
//! `KEY="value"` assignments with a fixed, enumerated key set. Resolution
//! layers the built-in defaults, then `default.conf`, then an optionally
//! named profile, then CLI overrides; later layers win ties and a named
//! profile can only add or override keys, never remove them.
//!
//! Parsing is strict: a malformed line or an unknown key aborts the whole
//! resolution rather than building with a partial configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::FargoError;
use crate::project::Project;

pub const DEFAULT_PROFILE: &str = "default";

/// The complete key set a profile may assign. Anything else is a parse
/// error.
pub const PROFILE_KEYS: &[&str] = &[
    "CMAKE_GENERATOR",
    "CMAKE_CXX_STANDARD",
    "CMAKE_BUILD_TYPE_DEBUG",
    "CMAKE_BUILD_TYPE_RELEASE",
    "CXX_FLAGS_DEBUG",
    "CXX_FLAGS_RELEASE",
    "CMAKE_EXTRA_OPTIONS",
    "BUILD_PARALLEL_JOBS",
    "TEST_PARALLEL_JOBS",
    "TEST_OUTPUT_ON_FAILURE",
    "BENCH_MIN_TIME",
    "BENCH_REPETITIONS",
    "DOC_EXTRACT_ALL",
    "DOC_GENERATE_CALL_GRAPH",
    "STATIC_ANALYSIS_SEVERITY",
];

/// Default values, identical to what `fargo new` writes into
/// `default.conf`. Every key has a default so resolution always yields a
/// complete mapping.
pub const PROFILE_DEFAULTS: &[(&str, &str)] = &[
    ("CMAKE_GENERATOR", "Ninja"),
    ("CMAKE_CXX_STANDARD", "20"),
    ("CMAKE_BUILD_TYPE_DEBUG", "Debug"),
    ("CMAKE_BUILD_TYPE_RELEASE", "Release"),
    ("CXX_FLAGS_DEBUG", "-Wall -Wextra -g"),
    ("CXX_FLAGS_RELEASE", "-O3 -DNDEBUG"),
    ("CMAKE_EXTRA_OPTIONS", ""),
    ("BUILD_PARALLEL_JOBS", "auto"),
    ("TEST_PARALLEL_JOBS", "auto"),
    ("TEST_OUTPUT_ON_FAILURE", "ON"),
    ("BENCH_MIN_TIME", "1"),
    ("BENCH_REPETITIONS", "3"),
    ("DOC_EXTRACT_ALL", "YES"),
    ("DOC_GENERATE_CALL_GRAPH", "YES"),
    ("STATIC_ANALYSIS_SEVERITY", "warning"),
];

/// Fully merged key-value mapping for one command invocation. Backed by a
/// `BTreeMap` so iteration order (and therefore the configure hash) is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    values: BTreeMap<String, String>,
}

impl EffectiveConfig {
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn generator_preference(&self) -> &str {
        self.get("CMAKE_GENERATOR")
    }

    pub fn cxx_standard(&self) -> &str {
        self.get("CMAKE_CXX_STANDARD")
    }

    pub fn extra_options(&self) -> &str {
        self.get("CMAKE_EXTRA_OPTIONS")
    }

    /// Build-driver job count; `auto` resolves to host parallelism at
    /// invocation time, garbage falls back to auto.
    pub fn build_jobs(&self) -> usize {
        resolve_jobs(self.get("BUILD_PARALLEL_JOBS"))
    }

    pub fn test_jobs(&self) -> usize {
        resolve_jobs(self.get("TEST_PARALLEL_JOBS"))
    }
}

fn resolve_jobs(value: &str) -> usize {
    match value.trim() {
        "" | "auto" => host_parallelism(),
        n => n.parse().unwrap_or_else(|_| host_parallelism()),
    }
}

fn host_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Resolve the effective configuration for one invocation:
/// `defaults ⊕ default.conf ⊕ named profile ⊕ CLI overrides`.
///
/// A requested named profile whose file is missing is `ProfileNotFound`;
/// the default profile file is optional (the built-in defaults stand in).
pub fn resolve(
    project: &Project,
    profile_name: Option<&str>,
    overrides: &[(String, String)],
) -> Result<EffectiveConfig, FargoError> {
    let mut values: BTreeMap<String, String> = PROFILE_DEFAULTS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let profiles_dir = project.profiles_dir();

    let default_file = profiles_dir.join(format!("{DEFAULT_PROFILE}.conf"));
    if default_file.is_file() {
        overlay_file(&default_file, &mut values)?;
    }

    if let Some(name) = profile_name
        && name != DEFAULT_PROFILE
    {
        let named_file = profiles_dir.join(format!("{name}.conf"));
        if !named_file.is_file() {
            return Err(FargoError::ProfileNotFound(name.to_string()));
        }
        overlay_file(&named_file, &mut values)?;
    }

    for (key, value) in overrides {
        values.insert(key.clone(), value.clone());
    }

    Ok(EffectiveConfig { values })
}

fn overlay_file(path: &Path, values: &mut BTreeMap<String, String>) -> Result<(), FargoError> {
    let content = fs::read_to_string(path).map_err(|e| FargoError::ProfileParse {
        file: path.to_path_buf(),
        line: 0,
        reason: format!("unreadable: {e}"),
    })?;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(FargoError::ProfileParse {
                file: path.to_path_buf(),
                line: idx + 1,
                reason: format!("expected KEY=\"value\", got '{raw}'"),
            });
        };

        let key = key.trim();
        if !PROFILE_KEYS.contains(&key) {
            return Err(FargoError::ProfileParse {
                file: path.to_path_buf(),
                line: idx + 1,
                reason: format!("unknown key '{key}'"),
            });
        }

        values.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    Ok(())
}

/// Strip one matching pair of surrounding quotes; values are otherwise
/// opaque strings interpreted by the consuming component.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
