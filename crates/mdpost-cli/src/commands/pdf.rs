use super::{Session, read_input, write_report};
use crate::cli::PdfArgs;
use crate::config::builder::build_pdf_config;
use crate::error::Result;
use mdpost::core::io::trajectory::TrajectoryFile;
use mdpost::workflows;

pub fn run(args: PdfArgs, session: &Session) -> Result<()> {
    let app = build_pdf_config(&args)?;
    let trajectory = read_input::<TrajectoryFile>(&args.input, &app.read_options)?;

    println!("Histogramming the extension...");
    let result = workflows::ext_pdf::run(&trajectory, &app.core_config, &session.reporter())?;

    let inputs = [args.input.as_path()];
    write_report(result.to_report()?, &inputs, &app.output, &app.report_options)?;
    if let (Some(report), Some(path)) = (result.average_report()?, &app.secondary_output) {
        write_report(report, &inputs, path, &app.report_options)?;
    }
    Ok(())
}
