use crate::core::io::report::{Report, ReportError, format_float};
use crate::core::io::table::ColumnTable;
use crate::engine::config::SpecificHeatConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::thermo::{self, EnergyMoments, SpecificHeat};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct SpecificHeatResult {
    pub config: SpecificHeatConfig,
    pub moments: EnergyMoments,
    pub heat: SpecificHeat,
}

impl SpecificHeatResult {
    pub fn to_report(&self) -> Result<Report, ReportError> {
        let mut columns = vec![
            "COLUMN",
            "SAMPLES",
            "MEAN",
            "MEAN_SQUARE",
            "VARIANCE",
            "CV_KCAL_MOL_K",
            "CV_J_MOL_K",
        ];
        let mut row = vec![
            self.config.column.clone(),
            self.moments.count.to_string(),
            format_float(self.moments.mean),
            format_float(self.moments.mean_square),
            format_float(self.moments.variance()),
            format_float(self.heat.molar_kcal),
            format_float(self.heat.molar_joule),
        ];
        if let (Some(kcal), Some(joule)) = (self.heat.mass_kcal, self.heat.mass_joule) {
            columns.extend(["CV_KCAL_KG_K", "CV_J_KG_K"]);
            row.extend([format_float(kcal), format_float(joule)]);
        }

        let mut report = Report::new("Specific heat from energy fluctuations", columns)
            .with_metadata("Temperature (K)", self.config.temperature);
        if let Some(mass) = self.config.molar_mass {
            report.push_metadata("Molar mass (g/mol)", mass);
        }
        report.push_row(row)?;
        Ok(report)
    }
}

#[instrument(skip_all, name = "specific_heat_workflow")]
pub fn run(
    table: &ColumnTable,
    config: &SpecificHeatConfig,
    reporter: &ProgressReporter,
) -> Result<SpecificHeatResult, EngineError> {
    reporter.phase_start("Specific Heat");
    let energies = table.column(&config.column)?;
    let moments = EnergyMoments::from_values(&energies)?;
    let heat = thermo::specific_heat(&moments, config.temperature, config.molar_mass);
    reporter.phase_finish();

    info!(
        samples = moments.count,
        cv_kcal_mol_k = heat.molar_kcal,
        "Specific heat of '{}' computed.", config.column
    );
    Ok(SpecificHeatResult {
        config: config.clone(),
        moments,
        heat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::table::TableFile;
    use crate::core::io::traits::{DataFile, ReadOptions};
    use std::io::Cursor;

    fn table() -> ColumnTable {
        let text = "# energies\nTS TOTAL\n0 -10.0\n1 -12.0\n2 -11.0\n3 -9.0\n";
        TableFile::read_from(&mut Cursor::new(text), &ReadOptions::default()).unwrap()
    }

    #[test]
    fn mass_specific_columns_follow_the_molar_mass() {
        let config = SpecificHeatConfig::new("TOTAL", 300.0, Some(18.0)).unwrap();
        let result = run(&table(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(result.moments.count, 4);
        assert!((result.moments.variance() - 1.25).abs() < 1e-9);
        let report = result.to_report().unwrap();
        assert_eq!(report.columns().len(), 9);
        assert_eq!(report.rows()[0][0], "TOTAL");

        let molar_only = SpecificHeatConfig::new("TOTAL", 300.0, None).unwrap();
        let result = run(&table(), &molar_only, &ProgressReporter::new()).unwrap();
        assert_eq!(result.to_report().unwrap().columns().len(), 7);
    }

    #[test]
    fn unknown_energy_column_fails() {
        let config = SpecificHeatConfig::new("POTENTIAL", 300.0, None).unwrap();
        assert!(run(&table(), &config, &ProgressReporter::new()).is_err());
    }
}
