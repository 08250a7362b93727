use super::error::EngineError;
use crate::core::constants::{BOLTZMANN_KCAL, kcal_to_joule};

/// First two moments of an energy series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyMoments {
    pub count: usize,
    /// `<E>`
    pub mean: f64,
    /// `<E^2>`
    pub mean_square: f64,
}

impl EnergyMoments {
    pub fn from_values(values: &[f64]) -> Result<Self, EngineError> {
        if values.is_empty() {
            return Err(EngineError::NoSamples("energy column is empty".to_string()));
        }
        let n = values.len() as f64;
        Ok(Self {
            count: values.len(),
            mean: values.iter().sum::<f64>() / n,
            mean_square: values.iter().map(|e| e * e).sum::<f64>() / n,
        })
    }

    /// `<E^2> - <E>^2`
    pub fn variance(&self) -> f64 {
        self.mean_square - self.mean * self.mean
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecificHeat {
    /// kcal/(mol K)
    pub molar_kcal: f64,
    /// J/(mol K)
    pub molar_joule: f64,
    /// kcal/(kg K)
    pub mass_kcal: Option<f64>,
    /// J/(kg K)
    pub mass_joule: Option<f64>,
}

/// Heat capacity from energy fluctuations, `Cv = Var(E) / (k_B T^2)`.
///
/// `molar_mass` is in g/mol.
pub fn specific_heat(moments: &EnergyMoments, temperature: f64, molar_mass: Option<f64>) -> SpecificHeat {
    let molar_kcal = moments.variance() / (BOLTZMANN_KCAL * temperature * temperature);
    let mass_kcal = molar_mass.map(|grams| molar_kcal * 1000.0 / grams);
    SpecificHeat {
        molar_kcal,
        molar_joule: kcal_to_joule(molar_kcal),
        mass_kcal,
        mass_joule: mass_kcal.map(kcal_to_joule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn moments_and_variance() {
        let m = EnergyMoments::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.count, 4);
        assert!((m.mean - 2.5).abs() < TOLERANCE);
        assert!((m.mean_square - 7.5).abs() < TOLERANCE);
        assert!((m.variance() - 1.25).abs() < TOLERANCE);
    }

    #[test]
    fn heat_capacity_scales_with_variance() {
        let m = EnergyMoments::from_values(&[-10.0, -12.0, -11.0, -9.0]).unwrap();
        let cv = specific_heat(&m, 300.0, Some(500.0));
        let expected = m.variance() / (BOLTZMANN_KCAL * 90_000.0);
        assert!((cv.molar_kcal - expected).abs() < TOLERANCE);
        assert!((cv.molar_joule - expected * 4184.0).abs() < 1e-6);
        assert!((cv.mass_kcal.unwrap() - expected * 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(EnergyMoments::from_values(&[]).is_err());
    }
}
