use super::{Session, read_input, write_report};
use crate::cli::SpPotentialArgs;
use crate::config::builder::build_sp_potential_config;
use crate::error::{CliError, Result};
use mdpost::core::io::table::TableFile;
use mdpost::core::io::trajectory::TrajectoryFile;
use mdpost::workflows;

pub fn run(args: SpPotentialArgs, session: &Session) -> Result<()> {
    let app = build_sp_potential_config(&args)?;
    let distances = read_input::<TrajectoryFile>(&args.distances, &app.read_options)?;
    let table = read_input::<TableFile>(&args.potentials, &app.read_options)?;
    let potentials = table
        .column(&app.core_config.potential_column)
        .map_err(|e| CliError::FileParsing {
            path: args.potentials.clone(),
            source: e.into(),
        })?;

    println!("Integrating the Boltzmann factor of the potential energy...");
    let result = workflows::sp_potential::run(
        &distances,
        &potentials,
        &app.core_config,
        &session.reporter(),
    )?;

    let inputs = [args.distances.as_path(), args.potentials.as_path()];
    if let Some(path) = &app.secondary_output {
        write_report(result.paired_report()?, &inputs, path, &app.report_options)?;
    }
    write_report(result.to_report()?, &inputs, &app.output, &app.report_options)
}
