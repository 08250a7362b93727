use crate::core::models::bins::{BinEdges, BinningError};
use crate::core::models::trajectory::min_max;

/// Counts of values falling in each bin of an equal-width partition.
///
/// Bins are half-open except the last one, which also holds values equal to
/// the upper edge. Values outside the edges (and NaN) are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: BinEdges,
    counts: Vec<u64>,
}

impl Histogram {
    pub fn new(values: &[f64], edges: BinEdges) -> Self {
        let mut counts = vec![0u64; edges.count()];
        for &v in values {
            if let Some(bin) = edges.locate_closed(v) {
                counts[bin] += 1;
            }
        }
        Self { edges, counts }
    }

    /// Histogram over the full range of `values`. A constant series is
    /// centred in a range of width one.
    pub fn auto(values: &[f64], bins: usize) -> Result<Self, BinningError> {
        let (mut lo, mut hi) =
            min_max(values.iter().copied()).ok_or(BinningError::EmptyInput)?;
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let edges = BinEdges::uniform(lo, hi, bins)?;
        Ok(Self::new(values, edges))
    }

    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Probability density per bin: `count / (total * width)`, so the
    /// histogram integrates to one. All zeros when nothing was counted.
    pub fn density(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.edges
            .bins()
            .zip(&self.counts)
            .map(|(bin, &count)| count as f64 / (total as f64 * bin.width()))
            .collect()
    }
}
