//! # fargo CLI Entry Point
//!
//! This is the main executable for the `fargo` command-line tool.
//! It parses CLI arguments using clap and routes commands to the
//! appropriate handlers.
//!
//! ## Command Structure
//!
//! Commands are organized into categories:
//! - **Project**: `new`, `targets`, `profile`
//! - **Build**: `build`, `release`, `run`, `clean`
//! - **Verify**: `test`, `bench`, `asan`, `tsan`
//! - **Quality**: `check`, `format`, `doc`
//!
//! Every command's exit code is meaningful: 0 on success, 2 for usage
//! mistakes, the underlying tool's own code when an external tool fails,
//! and 1 for everything else.

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};

use fargo::build;
use fargo::checker;
use fargo::commands;
use fargo::doc;
use fargo::error::FargoError;
use fargo::profile::{self, EffectiveConfig};
use fargo::project::Project;
use fargo::state::Mode;
use fargo::ui;

#[derive(Parser)]
#[command(name = "fargo")]
#[command(about = "A cargo-like build manager for C++ projects", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Use a named configuration profile
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// Show the underlying tool invocations and their full output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new C++ project
    New {
        /// Project name (optional, defaults to interactive)
        name: Option<String>,
    },
    /// Compile the project in debug mode
    Build {
        /// Build a single target instead of everything
        target: Option<String>,
        /// Number of parallel build jobs
        #[arg(short, long)]
        jobs: Option<usize>,
    },
    /// Compile the project in release mode
    Release {
        /// Build a single target instead of everything
        target: Option<String>,
        /// Number of parallel build jobs
        #[arg(short, long)]
        jobs: Option<usize>,
    },
    /// Build (debug) and run the main binary
    #[command(alias = "r")]
    Run {
        /// Arguments passed to the target program
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Build (debug) and run the test suite
    Test {
        /// Arguments passed to the test binary (bypasses CTest)
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Build (release) and run the benchmarks
    Bench {
        /// Arguments passed to the benchmark binary
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Static analysis using clang-tidy / cppcheck
    Check,
    /// Format code using clang-format
    Format {
        /// Check formatting without modifying files (CI mode)
        #[arg(long)]
        check: bool,
    },
    /// Build with AddressSanitizer and run the main binary
    Asan {
        /// Arguments passed to the target program
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Build with ThreadSanitizer and run the main binary
    Tsan {
        /// Arguments passed to the target program
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Generate documentation using Doxygen
    Doc,
    /// Remove build artifacts and cached build state
    Clean,
    /// List the buildable targets
    Targets,
    /// Manage configuration profiles
    Profile {
        #[command(subcommand)]
        op: ProfileOp,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

#[derive(Subcommand)]
enum ProfileOp {
    /// List available profiles
    List,
    /// Create a new profile from the default
    New {
        /// Profile name
        name: String,
    },
    /// Print a profile's contents
    Show {
        /// Profile name (default profile if omitted)
        name: Option<String>,
    },
    /// (Re)initialize the default profile
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(&cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            ui::error(&format!("{err:#}"));
            let code = match err.downcast_ref::<FargoError>() {
                Some(e) => {
                    if matches!(e, FargoError::NotAProject) {
                        ui::warn("Run 'fargo new <name>' to create a project first.");
                    }
                    e.exit_code()
                }
                None => 1,
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn dispatch(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::New { name } => commands::new::create_project(name.as_deref()),

        Commands::Build { target, jobs } => {
            let (project, cfg) = load(cli, *jobs)?;
            build::ensure_built(&project, &cfg, Mode::Debug, target.as_deref(), cli.verbose)?;
            Ok(0)
        }

        Commands::Release { target, jobs } => {
            let (project, cfg) = load(cli, *jobs)?;
            build::ensure_built(&project, &cfg, Mode::Release, target.as_deref(), cli.verbose)?;
            Ok(0)
        }

        Commands::Run { args } => {
            let (project, cfg) = load(cli, None)?;
            build::run_binary(&project, &cfg, args, cli.verbose)
        }

        Commands::Test { args } => {
            let (project, cfg) = load(cli, None)?;
            build::run_tests(&project, &cfg, args, cli.verbose)
        }

        Commands::Bench { args } => {
            let (project, cfg) = load(cli, None)?;
            build::run_benchmarks(&project, &cfg, args, cli.verbose)
        }

        Commands::Asan { args } => {
            let (project, cfg) = load(cli, None)?;
            build::run_sanitized(&project, &cfg, Mode::Asan, args, cli.verbose)
        }

        Commands::Tsan { args } => {
            let (project, cfg) = load(cli, None)?;
            build::run_sanitized(&project, &cfg, Mode::Tsan, args, cli.verbose)
        }

        Commands::Check => {
            let (project, cfg) = load(cli, None)?;
            checker::check_code(&project, &cfg)
        }

        Commands::Format { check } => {
            let (project, _cfg) = load(cli, None)?;
            checker::format_code(&project, *check)
        }

        Commands::Doc => {
            let (project, cfg) = load(cli, None)?;
            doc::generate_docs(&project, &cfg, cli.verbose)
        }

        Commands::Clean => {
            let (project, _cfg) = load(cli, None)?;
            build::clean(&project)
        }

        Commands::Targets => {
            let (project, _cfg) = load(cli, None)?;
            commands::targets::list_targets(&project)
        }

        Commands::Profile { op } => {
            let project = Project::locate_from_cwd()?;
            let local_op = match op {
                ProfileOp::List => commands::profile::ProfileOp::List,
                ProfileOp::New { name } => {
                    commands::profile::ProfileOp::New { name: name.clone() }
                }
                ProfileOp::Show { name } => {
                    commands::profile::ProfileOp::Show { name: name.clone() }
                }
                ProfileOp::Init => commands::profile::ProfileOp::Init,
            };
            commands::profile::handle(&project, &local_op)
        }

        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(0)
        }
    }
}

/// Locate the project and resolve the effective configuration, folding
/// any `--jobs` flag in as a CLI-level override.
fn load(cli: &Cli, jobs: Option<usize>) -> Result<(Project, EffectiveConfig)> {
    let project = Project::locate_from_cwd()?;
    let mut overrides: Vec<(String, String)> = Vec::new();
    if let Some(jobs) = jobs {
        overrides.push(("BUILD_PARALLEL_JOBS".to_string(), jobs.to_string()));
    }
    let cfg = profile::resolve(&project, cli.profile.as_deref(), &overrides)?;
    Ok((project, cfg))
}
