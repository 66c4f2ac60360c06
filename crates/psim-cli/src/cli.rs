use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "psim-model - build, check and summarise input models for the PSIM phonon transport engine.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one of the prebuilt geometries from a TOML configuration and export it.
    Build(BuildArgs),
    /// Load an exported model, re-validate it and print a summary.
    Inspect(InspectArgs),
    /// Summarise the flux of a steady-state results file.
    Flux(FluxArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the build configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path for the exported model (JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to an exported model (JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `flux` subcommand.
#[derive(Args, Debug)]
pub struct FluxArgs {
    /// Path to the model the results were produced from.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub model: PathBuf,

    /// Path to the steady-state results file written by the engine.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub results: PathBuf,

    /// Write a per-sensor CSV table of position, temperature and flux.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
