use super::{Session, write_report};
use crate::cli::SmdArgs;
use crate::config::builder::build_smd_config;
use crate::error::Result;
use mdpost::workflows;
use std::path::Path;

pub fn run(args: SmdArgs, session: &Session) -> Result<()> {
    let app = build_smd_config(&args)?;

    println!("Reading SMD records from {} log file(s)...", args.inputs.len());
    let result = workflows::smd_pull::run(&args.inputs, &app.core_config, &session.reporter())?;

    let inputs: Vec<&Path> = args.inputs.iter().map(|p| p.as_path()).collect();
    write_report(result.to_report()?, &inputs, &app.output, &app.report_options)
}
