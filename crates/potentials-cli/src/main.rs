mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 Potentials CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = match cli.command {
        Commands::PairInfo(args) => {
            info!("Dispatching to 'pair-info' command.");
            commands::generate::run_pair_info(args)
        }
        Commands::DataInfo(args) => {
            info!("Dispatching to 'data-info' command.");
            commands::generate::run_data_info(args)
        }
        Commands::RestartInfo(args) => {
            info!("Dispatching to 'restart-info' command.");
            commands::generate::run_restart_info(args)
        }
        Commands::Info(args) => {
            info!("Dispatching to 'info' command.");
            commands::info::run(args)
        }
        Commands::Build(args) => {
            info!("Dispatching to 'build' command.");
            commands::build::run(args)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pair_info_arguments_are_parsed() {
        let cli = Cli::parse_from([
            "potentials",
            "-vv",
            "pair-info",
            "record.json",
            "--symbols",
            "Fe,null,Ni",
            "--masses",
            "-,1.0,-",
            "--pot-dir",
            "pots",
            "--comments",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::PairInfo(args) => {
                assert_eq!(args.symbols, vec!["Fe", "null", "Ni"]);
                assert_eq!(args.masses, vec!["-", "1.0", "-"]);
                assert!(args.comments);
                assert_eq!(args.pot_dir.as_deref(), Some(std::path::Path::new("pots")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn data_info_defaults_to_fully_periodic() {
        let cli = Cli::parse_from(["potentials", "data-info", "r.xml", "-d", "system.dat"]);
        match cli.command {
            Commands::DataInfo(args) => assert_eq!(args.pbc, vec![true, true, true]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["potentials", "-q", "-v", "info", "r.json"]);
        assert!(result.is_err());
    }
}
