//! Error taxonomy and exit-code mapping.
//!
//! Every failure in fargo is terminal for the current invocation; there
//! are no retries. External-tool failures carry the tool's own exit code
//! so the process can mirror it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FargoError {
    #[error("not inside a fargo project (no CMakeLists.txt with a .fargo directory found)")]
    NotAProject,

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("profile '{file}' line {line}: {reason}")]
    ProfileParse {
        file: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("unknown target '{0}'")]
    UnknownTarget(String),

    #[error("no build system found (install ninja or make)")]
    NoBuildSystem,

    #[error("CMake configuration failed (exit code {0})")]
    ConfigureFailed(i32),

    #[error("build failed (exit code {0})")]
    BuildFailed(i32),

    #[error("tests failed (exit code {0})")]
    TestsFailed(i32),

    #[error("static analysis found issues")]
    AnalysisFailed,

    #[error("documentation generation failed (exit code {0})")]
    DocGenerationFailed(i32),
}

impl FargoError {
    /// Process exit code for this error.
    ///
    /// Usage-level mistakes exit 2, external-tool failures mirror the
    /// tool's exit code, everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownTarget(_) => 2,
            Self::ConfigureFailed(code)
            | Self::BuildFailed(code)
            | Self::TestsFailed(code)
            | Self::DocGenerationFailed(code) => {
                if *code == 0 { 1 } else { *code }
            }
            Self::AnalysisFailed => 1,
            Self::NotAProject
            | Self::ProfileNotFound(_)
            | Self::ProfileParse { .. }
            | Self::NoBuildSystem => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_target_is_usage_error() {
        assert_eq!(FargoError::UnknownTarget("foo".into()).exit_code(), 2);
    }

    #[test]
    fn tool_failures_mirror_exit_codes() {
        assert_eq!(FargoError::BuildFailed(3).exit_code(), 3);
        assert_eq!(FargoError::TestsFailed(8).exit_code(), 8);
        assert_eq!(FargoError::ConfigureFailed(1).exit_code(), 1);
    }

    #[test]
    fn resolver_failures_are_internal_errors() {
        assert_eq!(FargoError::NotAProject.exit_code(), 1);
        assert_eq!(FargoError::ProfileNotFound("x".into()).exit_code(), 1);
        assert_eq!(FargoError::NoBuildSystem.exit_code(), 1);
    }
}
