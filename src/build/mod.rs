mod bench;
mod clean;
mod core;
mod run;
mod sanitize;
mod test;

pub use bench::run_benchmarks;
pub use clean::clean;
pub use self::core::{
    BuildResult, Generator, artifact_path, command_exists, configure_args, ensure_built,
};
pub use run::run_binary;
pub use sanitize::run_sanitized;
pub use test::run_tests;
