use super::{Session, read_input, write_report};
use crate::cli::SpecificHeatArgs;
use crate::config::builder::build_specific_heat_config;
use crate::error::Result;
use mdpost::core::io::table::TableFile;
use mdpost::workflows;

pub fn run(args: SpecificHeatArgs, session: &Session) -> Result<()> {
    let app = build_specific_heat_config(&args)?;
    let table = read_input::<TableFile>(&args.input, &app.read_options)?;
    println!("Available columns: [{}]", table.headers().join(", "));

    let result = workflows::specific_heat::run(&table, &app.core_config, &session.reporter())?;
    println!(
        "Cv({}) = {:.6} kcal/(mol K)",
        app.core_config.column, result.heat.molar_kcal
    );

    write_report(
        result.to_report()?,
        &[args.input.as_path()],
        &app.output,
        &app.report_options,
    )
}
