use super::{Session, write_report};
use crate::cli::{EnergyArgs, EnergyCommandArgs, EnergyCommands};
use crate::config::builder::build_energy_config;
use crate::error::Result;
use mdpost::workflows::namd_energy;
use std::path::Path;
use tracing::info;

pub fn run(args: EnergyArgs, session: &Session) -> Result<()> {
    match args.command {
        EnergyCommands::Extract(args) => extract(args, session),
        EnergyCommands::Average(args) => average(args, session),
    }
}

fn input_paths(args: &EnergyCommandArgs) -> Vec<&Path> {
    args.inputs.iter().map(|p| p.as_path()).collect()
}

fn extract(args: EnergyCommandArgs, session: &Session) -> Result<()> {
    let app = build_energy_config(&args, false)?;
    info!(files = args.inputs.len(), "Extracting NAMD energies");

    let table = namd_energy::extract(&args.inputs, &app.core_config, &session.reporter())?;
    write_report(
        table.to_report()?,
        &input_paths(&args),
        &app.output,
        &app.report_options,
    )
}

fn average(args: EnergyCommandArgs, session: &Session) -> Result<()> {
    let app = build_energy_config(&args, true)?;
    info!(files = args.inputs.len(), "Averaging NAMD energies");

    let averages = namd_energy::average(&args.inputs, &app.core_config, &session.reporter())?;
    if let Some(means) = averages.accumulator.means() {
        for (title, mean) in averages.accumulator.titles().iter().zip(means) {
            println!("  {:<12} {:.4}", title, mean);
        }
    }
    write_report(
        averages.to_report()?,
        &input_paths(&args),
        &app.output,
        &app.report_options,
    )
}
