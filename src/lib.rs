//! # fargo - Cargo-like C++ Project Manager
//!
//! fargo turns a small set of verbs into CMake, Ninja/Make, CTest,
//! clang-format, clang-tidy, cppcheck, and Doxygen invocations,
//! parameterized by layered configuration profiles.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a new project
//! fargo new myapp
//!
//! # Build and run
//! cd myapp && fargo run
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - Configure-or-rebuild orchestration and tool runners
//! - [`profile`] - Layered configuration profiles
//! - [`state`] - Per-mode persisted build state
//! - [`project`] - Project root location
//! - [`commands`] - CLI command handlers

/// Build orchestration: configure, build, run, test, bench, sanitizers.
pub mod build;

/// Code quality tools (clang-format, clang-tidy, cppcheck).
pub mod checker;

/// CLI command handlers extracted from main.
pub mod commands;

/// Documentation generation (Doxygen).
pub mod doc;

/// Error taxonomy and exit-code mapping.
pub mod error;

/// Configuration profiles and resolution.
pub mod profile;

/// Project root location and identity.
pub mod project;

/// Persisted per-mode build state.
pub mod state;

/// The fixed target registry (executable, tests, benchmarks).
pub mod targets;

/// File templates for scaffolding and generated tool configs.
pub mod templates;

/// Terminal output helpers (status lines, tables).
pub mod ui;
