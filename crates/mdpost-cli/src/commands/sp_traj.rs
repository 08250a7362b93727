use super::{Session, read_input, write_report};
use crate::cli::SpTrajArgs;
use crate::config::builder::{build_sp_traj_config, window_output_path};
use crate::error::Result;
use mdpost::core::io::trajectory::TrajectoryFile;
use mdpost::workflows;
use tracing::info;

pub fn run(args: SpTrajArgs, session: &Session) -> Result<()> {
    let app = build_sp_traj_config(&args)?;
    let trajectory = read_input::<TrajectoryFile>(&args.input, &app.read_options)?;

    println!("Counting first arrivals along the trajectory...");
    let result = workflows::sp_traj::run(&trajectory, &app.core_config, &session.reporter())?;

    if result.full.dropped_count() > 0 {
        info!(
            dropped = result.full.dropped_count(),
            "Rows with undefined SP or PMF are omitted from the output"
        );
    }

    write_report(
        result.to_report()?,
        &[args.input.as_path()],
        &app.output,
        &app.report_options,
    )?;
    for (index, report) in result.window_reports()? {
        write_report(
            report,
            &[args.input.as_path()],
            &window_output_path(&app.output, index),
            &app.report_options,
        )?;
    }
    Ok(())
}
