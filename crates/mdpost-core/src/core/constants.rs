//! Physical constants and unit conversions.
//!
//! Energies are in kcal/mol, distances in Å and temperatures in K throughout
//! the crate.

/// 1 cal = 4.184 J.
pub const CAL_TO_JOULE: f64 = 4.184;

/// Ideal gas constant in J/(mol K).
pub const GAS_CONSTANT_J: f64 = 8.314;

/// Ideal gas constant in kcal/(mol K).
pub const BOLTZMANN_KCAL: f64 = GAS_CONSTANT_J / (CAL_TO_JOULE * 1000.0);

pub const FS_TO_NS: f64 = 1e-6;
pub const FS_TO_S: f64 = 1e-15;

/// Thermal energy `k_B T` in kcal/mol.
#[inline]
pub fn thermal_energy(temperature: f64) -> f64 {
    BOLTZMANN_KCAL * temperature
}

/// Converts kcal to J.
#[inline]
pub fn kcal_to_joule(value: f64) -> f64 {
    value * CAL_TO_JOULE * 1000.0
}
