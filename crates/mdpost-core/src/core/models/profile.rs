/// A point estimate that may be missing.
///
/// Used wherever a quantity can be legitimately undefined (an SP bin with no
/// resolved visits, a PMF point whose gradient is non-negative) so that such
/// cases are carried explicitly instead of as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    Value(f64),
    Undefined,
}

impl Estimate {
    /// Wraps `value`, mapping any non-finite number to `Undefined`.
    pub fn from_finite(value: f64) -> Self {
        if value.is_finite() {
            Estimate::Value(value)
        } else {
            Estimate::Undefined
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Estimate::Value(v) => Some(*v),
            Estimate::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Estimate::Value(_))
    }
}

impl From<Option<f64>> for Estimate {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Estimate::Undefined, Estimate::from_finite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensitySample {
    pub coordinate: f64,
    pub density: f64,
}

/// Probability density sampled along the coordinate, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DensityProfile {
    samples: Vec<DensitySample>,
}

impl DensityProfile {
    pub fn new(samples: Vec<DensitySample>) -> Self {
        Self { samples }
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            samples: pairs
                .into_iter()
                .map(|(coordinate, density)| DensitySample {
                    coordinate,
                    density,
                })
                .collect(),
        }
    }

    pub fn samples(&self) -> &[DensitySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn coordinate_range(&self) -> Option<(f64, f64)> {
        crate::core::models::trajectory::min_max(self.samples.iter().map(|s| s.coordinate))
    }

    /// Samples with `left <= coordinate <= right`, order preserved.
    pub fn between(&self, left: f64, right: f64) -> DensityProfile {
        DensityProfile {
            samples: self
                .samples
                .iter()
                .copied()
                .filter(|s| s.coordinate >= left && s.coordinate <= right)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplittingPoint {
    pub coordinate: f64,
    /// Spatial bin the point represents, when the profile comes from a binned estimate.
    pub bin: Option<usize>,
    pub probability: Estimate,
}

/// Splitting probability as a function of the coordinate, ordered from the
/// left boundary to the right one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplittingProfile {
    points: Vec<SplittingPoint>,
}

impl SplittingProfile {
    pub fn new(points: Vec<SplittingPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SplittingPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(coordinate, sp)` pairs of the defined points only.
    pub fn defined(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.probability.value().map(|v| (p.coordinate, v)))
            .collect()
    }

    pub fn undefined_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| !p.probability.is_defined())
            .count()
    }

    /// True when no defined value increases from one point to the next.
    pub fn is_non_increasing(&self) -> bool {
        self.defined().windows(2).all(|w| w[1].1 <= w[0].1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PmfPoint {
    pub coordinate: f64,
    pub energy: Estimate,
}

/// Energy landscape reconstructed from a splitting profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PmfProfile {
    points: Vec<PmfPoint>,
}

impl PmfProfile {
    pub fn new(points: Vec<PmfPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PmfPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn finite(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.energy.value().map(|e| (p.coordinate, e)))
            .collect()
    }

    pub fn dropped_count(&self) -> usize {
        self.points.len() - self.finite().len()
    }
}
