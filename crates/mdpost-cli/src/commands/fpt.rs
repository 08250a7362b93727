use super::{Session, read_input, write_report};
use crate::cli::FptArgs;
use crate::config::builder::build_fpt_config;
use crate::error::Result;
use mdpost::core::io::trajectory::TrajectoryFile;
use mdpost::workflows;

pub fn run(args: FptArgs, session: &Session) -> Result<()> {
    let app = build_fpt_config(&args)?;
    let trajectory = read_input::<TrajectoryFile>(&args.input, &app.read_options)?;

    println!("Computing the first-passage-time distribution...");
    let result = workflows::fpt::run(&trajectory, &app.core_config, &session.reporter())?;

    write_report(
        result.to_report()?,
        &[args.input.as_path()],
        &app.output,
        &app.report_options,
    )
}
