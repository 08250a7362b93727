use super::{Session, read_input, write_report};
use crate::cli::LandscapeArgs;
use crate::config::builder::build_landscape_config;
use crate::error::Result;
use mdpost::core::io::table::TableFile;
use mdpost::workflows;

pub fn run(args: LandscapeArgs, session: &Session) -> Result<()> {
    let app = build_landscape_config(&args)?;
    let table = read_input::<TableFile>(&args.input, &app.read_options)?;

    let result = workflows::landscape::run(&table, &app.core_config, &session.reporter())?;

    write_report(
        result.to_report()?,
        &[args.input.as_path()],
        &app.output,
        &app.report_options,
    )
}
