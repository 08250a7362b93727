mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::commands::Session;
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
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("mdpost CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let session = Session::new(cli.quiet);
    let command_result = match cli.command {
        Commands::Pdf(args) => {
            info!("Dispatching to 'pdf' command.");
            commands::pdf::run(args, &session)
        }
        Commands::SpPmf(args) => {
            info!("Dispatching to 'sp-pmf' command.");
            commands::sp_pmf::run(args, &session)
        }
        Commands::SpTraj(args) => {
            info!("Dispatching to 'sp-traj' command.");
            commands::sp_traj::run(args, &session)
        }
        Commands::SpPotential(args) => {
            info!("Dispatching to 'sp-potential' command.");
            commands::sp_potential::run(args, &session)
        }
        Commands::Landscape(args) => {
            info!("Dispatching to 'landscape' command.");
            commands::landscape::run(args, &session)
        }
        Commands::Fpt(args) => {
            info!("Dispatching to 'fpt' command.");
            commands::fpt::run(args, &session)
        }
        Commands::SpecificHeat(args) => {
            info!("Dispatching to 'specific-heat' command.");
            commands::specific_heat::run(args, &session)
        }
        Commands::Energy(args) => {
            info!("Dispatching to 'energy' command.");
            commands::energy::run(args, &session)
        }
        Commands::Smd(args) => {
            info!("Dispatching to 'smd' command.");
            commands::smd::run(args, &session)
        }
    };

    match &command_result {
        Ok(_) => {
            info!("✅ Command completed successfully.");
            if !cli.quiet {
                println!("✅ Command completed successfully.");
            }
        }
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
