use super::{Session, read_input, write_report};
use crate::cli::SpPmfArgs;
use crate::config::builder::{build_sp_pmf_config, window_output_path};
use crate::error::Result;
use mdpost::core::io::profile::DensityFile;
use mdpost::workflows;
use tracing::info;

pub fn run(args: SpPmfArgs, session: &Session) -> Result<()> {
    let app = build_sp_pmf_config(&args)?;
    let density = read_input::<DensityFile>(&args.input, &app.read_options)?;

    println!("Inverting the equilibrium density...");
    let result = workflows::sp_pmf::run(&density, &app.core_config, &session.reporter())?;
    info!(
        discarded = result.discarded,
        rows = result.full.rows.len(),
        "Boltzmann inversion finished"
    );

    let inputs = [args.input.as_path()];
    write_report(result.to_report()?, &inputs, &app.output, &app.report_options)?;
    for (index, report) in result.window_reports()? {
        write_report(
            report,
            &inputs,
            &window_output_path(&app.output, index),
            &app.report_options,
        )?;
    }
    Ok(())
}
