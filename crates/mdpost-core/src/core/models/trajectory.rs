use crate::core::constants::FS_TO_NS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub frame: i64,
    pub coordinate: f64,
}

impl TrajectorySample {
    pub fn new(frame: i64, coordinate: f64) -> Self {
        Self { frame, coordinate }
    }
}

/// Half-open frame window `[start, end)`. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl FrameRange {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    #[inline]
    pub fn contains(&self, frame: i64) -> bool {
        self.start.is_none_or(|s| frame >= s) && self.end.is_none_or(|e| frame < e)
    }
}

/// A scalar reaction coordinate sampled over time.
///
/// Samples keep their insertion order, which is taken to be temporal order.
/// Duplicate frame indices are tolerated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn new(samples: Vec<TrajectorySample>) -> Self {
        Self { samples }
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        Self {
            samples: pairs
                .into_iter()
                .map(|(frame, coordinate)| TrajectorySample::new(frame, coordinate))
                .collect(),
        }
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn frames(&self) -> impl Iterator<Item = i64> + '_ {
        self.samples.iter().map(|s| s.frame)
    }

    pub fn coordinates(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.coordinate)
    }

    /// Returns the samples whose frame lies inside `range`, in original order.
    pub fn restrict(&self, range: &FrameRange) -> Trajectory {
        if range.is_unbounded() {
            return self.clone();
        }
        Trajectory {
            samples: self
                .samples
                .iter()
                .copied()
                .filter(|s| range.contains(s.frame))
                .collect(),
        }
    }

    /// Minimum and maximum coordinate, ignoring NaN values.
    pub fn coordinate_range(&self) -> Option<(f64, f64)> {
        min_max(self.coordinates())
    }

    pub fn frame_range(&self) -> Option<(i64, i64)> {
        let min = self.frames().min()?;
        let max = self.frames().max()?;
        Some((min, max))
    }

    /// Time of each sample in nanoseconds, given the time between frames in femtoseconds.
    pub fn time_axis_ns(&self, frame_step_fs: f64) -> Vec<f64> {
        self.frames()
            .map(|f| f as f64 * frame_step_fs * FS_TO_NS)
            .collect()
    }
}

pub(crate) fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| !v.is_nan()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
