use super::config::SmdConfig;
use super::error::EngineError;
use crate::core::io::namd::SmdLog;
use nalgebra::{Unit, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmdSample {
    pub timestep: i64,
    /// Force on the SMD centre of mass (pN), along the pull if one is given.
    pub force: f64,
    /// Displacement from the first recorded position (Å), along the pull if one is given.
    pub displacement: f64,
    /// Distance to the fixed-atom centre of mass (Å).
    pub fixed_distance: Option<f64>,
}

/// Projects each SMD record onto the pull direction (or takes magnitudes),
/// relative to the first recorded position.
pub fn analyze(log: &SmdLog, config: &SmdConfig) -> Result<Vec<SmdSample>, EngineError> {
    let first = log
        .records
        .first()
        .ok_or_else(|| EngineError::NoSamples("no SMD records found".to_string()))?;
    let reference = first.position;
    let direction: Option<Unit<Vector3<f64>>> = config
        .pull_direction
        .and_then(|d| Unit::try_new(d, f64::EPSILON));

    Ok(log
        .records
        .iter()
        .map(|record| {
            let offset = record.position - reference;
            let (force, displacement) = match &direction {
                Some(unit) => (record.force.dot(unit), offset.dot(unit)),
                None => (record.force.norm(), offset.norm()),
            };
            SmdSample {
                timestep: record.timestep,
                force,
                displacement,
                fixed_distance: config.fixed_com.map(|com| (record.position - com).norm()),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::namd::SmdRecord;

    fn log() -> SmdLog {
        SmdLog {
            records: vec![
                SmdRecord {
                    timestep: 0,
                    position: Vector3::new(0.0, 0.0, 0.0),
                    force: Vector3::new(3.0, 4.0, 0.0),
                },
                SmdRecord {
                    timestep: 100,
                    position: Vector3::new(1.0, 2.0, 2.0),
                    force: Vector3::new(0.0, 0.0, 5.0),
                },
            ],
            skipped: 0,
        }
    }

    #[test]
    fn without_direction_magnitudes_are_used() {
        let samples = analyze(&log(), &SmdConfig::default()).unwrap();
        assert_eq!(samples[0].force, 5.0);
        assert_eq!(samples[0].displacement, 0.0);
        assert_eq!(samples[1].displacement, 3.0);
        assert_eq!(samples[1].fixed_distance, None);
    }

    #[test]
    fn direction_is_normalised_before_projection() {
        let config = SmdConfig {
            pull_direction: Some(Vector3::new(0.0, 0.0, 10.0)),
            fixed_com: Some(Vector3::new(1.0, 2.0, 0.0)),
        };
        let samples = analyze(&log(), &config).unwrap();
        assert!((samples[1].force - 5.0).abs() < 1e-12);
        assert!((samples[1].displacement - 2.0).abs() < 1e-12);
        assert!((samples[1].fixed_distance.unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_direction_falls_back_to_magnitudes() {
        let config = SmdConfig {
            pull_direction: Some(Vector3::zeros()),
            fixed_com: None,
        };
        let samples = analyze(&log(), &config).unwrap();
        assert_eq!(samples[0].force, 5.0);
    }

    #[test]
    fn empty_log_is_an_error() {
        assert!(analyze(&SmdLog::default(), &SmdConfig::default()).is_err());
    }
}
