//! Target registry.
//!
//! The scaffold always produces exactly three targets: the main
//! executable, the test binary, and the benchmark binary. The registry is
//! fixed by that convention rather than introspected from the generator;
//! kind determines which verbs may act on a target.

use crate::error::FargoError;
use crate::project::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Executable,
    Test,
    Benchmark,
}

impl TargetKind {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Executable => "main executable",
            Self::Test => "unit tests",
            Self::Benchmark => "benchmarks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub kind: TargetKind,
}

#[derive(Debug, Clone)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn for_project(project: &Project) -> anyhow::Result<Self> {
        Ok(Self::from_project_name(&project.name()?))
    }

    pub fn from_project_name(name: &str) -> Self {
        let targets = vec![
            Target {
                name: name.to_string(),
                kind: TargetKind::Executable,
            },
            Target {
                name: format!("{name}_tests"),
                kind: TargetKind::Test,
            },
            Target {
                name: format!("{name}_bench"),
                kind: TargetKind::Benchmark,
            },
        ];
        Self { targets }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Validate a user-supplied target name before handing it to the
    /// build driver.
    pub fn find(&self, name: &str) -> Result<&Target, FargoError> {
        self.targets
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| FargoError::UnknownTarget(name.to_string()))
    }

    pub fn of_kind(&self, kind: TargetKind) -> &Target {
        // The registry is constructed with one target per kind.
        self.targets
            .iter()
            .find(|t| t.kind == kind)
            .expect("registry holds one target per kind")
    }
}
