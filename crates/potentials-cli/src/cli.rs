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
    author = "Tony Kan",
    version,
    about = "Potentials CLI - Inspect, build and render LAMMPS interatomic potential records into ready-to-use LAMMPS commands.",
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
    /// Print the mass, pair_style and pair_coeff commands for a potential record.
    PairInfo(GeneratorArgs),
    /// Print a script preamble that reads an atom data file and defines the potential.
    DataInfo(DataInfoArgs),
    /// Print a script preamble that reads a restart file and defines the potential.
    RestartInfo(RestartInfoArgs),
    /// Show a summary of a potential record as JSON.
    Info(InfoArgs),
    /// Build a potential record from a TOML recipe.
    Build(BuildArgs),
}

/// Arguments shared by every command that renders LAMMPS input.
#[derive(Args, Debug, Clone)]
pub struct GeneratorArgs {
    /// Path to the potential record (.json or .xml).
    #[arg(required = true, value_name = "RECORD")]
    pub record: PathBuf,

    /// Atom-model symbols in LAMMPS atom-type order, comma separated.
    /// Defaults to every symbol of the record. Use 'null' for an unset entry.
    #[arg(short, long, value_name = "SYMBOLS", value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Per-type mass overrides, comma separated and aligned with --symbols.
    /// Use '-' to keep the record's mass for a type.
    #[arg(
        short,
        long,
        value_name = "MASSES",
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    pub masses: Vec<String>,

    /// Directory holding the potential's parameter files.
    #[arg(short, long, value_name = "DIR")]
    pub pot_dir: Option<PathBuf>,

    /// Prefix the output with the record's comments.
    #[arg(long)]
    pub comments: bool,

    /// Override the LAMMPS units style of the record.
    #[arg(long, value_name = "STYLE")]
    pub units: Option<String>,

    /// Override the LAMMPS atom_style of the record.
    #[arg(long, value_name = "STYLE")]
    pub atom_style: Option<String>,

    /// Write the commands to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `data-info` subcommand.
#[derive(Args, Debug)]
pub struct DataInfoArgs {
    #[command(flatten)]
    pub generator: GeneratorArgs,

    /// Atom data file passed to read_data.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub data_file: PathBuf,

    /// Periodicity along x, y and z, comma separated (e.g. 'true,true,false').
    #[arg(
        long,
        value_name = "X,Y,Z",
        value_delimiter = ',',
        num_args = 3,
        default_values_t = [true, true, true]
    )]
    pub pbc: Vec<bool>,
}

/// Arguments for the `restart-info` subcommand.
#[derive(Args, Debug)]
pub struct RestartInfoArgs {
    #[command(flatten)]
    pub generator: GeneratorArgs,

    /// Restart file passed to read_restart.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub restart_file: PathBuf,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the potential record (.json or .xml).
    #[arg(required = true, value_name = "RECORD")]
    pub record: PathBuf,

    /// Write the summary to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the recipe file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub recipe: PathBuf,

    /// Path for the generated record. The extension selects JSON or XML.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Set a specific recipe value, overriding the recipe file.
    /// Can be used multiple times. Example: -S pair-style=eam/alloy
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
