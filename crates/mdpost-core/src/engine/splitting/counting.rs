use crate::core::models::bins::BinEdges;
use crate::core::models::profile::{Estimate, SplittingPoint, SplittingProfile};
use tracing::{debug, warn};

/// Which boundary a visit reaches first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commitment {
    Left,
    Right,
    /// The trajectory ends before either boundary is reached.
    Unresolved,
}

/// Outcome of the forward scan started at `start` (inclusive).
pub fn hitting_outcome(bins: &[usize], start: usize, left: usize, right: usize) -> Commitment {
    for &bin in bins.iter().skip(start) {
        if bin == left {
            return Commitment::Left;
        }
        if bin == right {
            return Commitment::Right;
        }
    }
    Commitment::Unresolved
}

/// For every time index, the first index at or after it where each boundary
/// bin is occupied. Lets every visit be classified in constant time.
struct ForwardHits {
    next_left: Vec<Option<usize>>,
    next_right: Vec<Option<usize>>,
}

impl ForwardHits {
    fn new(bins: &[usize], left: usize, right: usize) -> Self {
        let n = bins.len();
        let mut next_left = vec![None; n];
        let mut next_right = vec![None; n];
        let (mut l, mut r) = (None, None);
        for t in (0..n).rev() {
            if bins[t] == left {
                l = Some(t);
            }
            if bins[t] == right {
                r = Some(t);
            }
            next_left[t] = l;
            next_right[t] = r;
        }
        Self {
            next_left,
            next_right,
        }
    }

    fn outcome(&self, t: usize) -> Commitment {
        match (self.next_left[t], self.next_right[t]) {
            (Some(l), Some(r)) if l <= r => Commitment::Left,
            (Some(_), Some(_)) => Commitment::Right,
            (Some(_), None) => Commitment::Left,
            (None, Some(_)) => Commitment::Right,
            (None, None) => Commitment::Unresolved,
        }
    }
}

/// Visit outcomes of a single spatial bin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinTally {
    pub bin: usize,
    pub visits: usize,
    pub left: usize,
    pub right: usize,
    pub unresolved: usize,
}

impl BinTally {
    pub fn resolved(&self) -> usize {
        self.left + self.right
    }

    /// Fraction of resolved visits that commit to the left boundary.
    pub fn probability(&self) -> Estimate {
        match self.resolved() {
            0 => Estimate::Undefined,
            n => Estimate::Value(self.left as f64 / n as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountingEstimate {
    pub left_bin: usize,
    pub right_bin: usize,
    /// One tally per bin in `left_bin..=right_bin`.
    pub tallies: Vec<BinTally>,
    /// Bins that were never visited.
    pub empty_bins: Vec<usize>,
}

impl CountingEstimate {
    /// Profile over the bin range, positioned at bin centres.
    pub fn profile(&self, edges: &BinEdges) -> SplittingProfile {
        SplittingProfile::new(
            self.tallies
                .iter()
                .filter_map(|t| {
                    edges.bin(t.bin).map(|bin| SplittingPoint {
                        coordinate: bin.center(),
                        bin: Some(t.bin),
                        probability: t.probability(),
                    })
                })
                .collect(),
        )
    }
}

/// Counts, for every bin between `left` and `right` inclusive, how often a
/// visit reaches `left` before `right`.
///
/// Never-visited bins and bins whose visits are all unresolved yield an
/// undefined probability and one warning each.
pub fn estimate(bins: &[usize], left: usize, right: usize) -> CountingEstimate {
    let estimate = tally(bins, left, right);
    for tally in &estimate.tallies {
        if tally.visits == 0 {
            warn!(bin = tally.bin, "EXT_BIN {} not visited; splitting probability undefined", tally.bin);
        } else if tally.resolved() == 0 {
            warn!(
                bin = tally.bin,
                visits = tally.visits,
                "EXT_BIN {} never reaches a boundary; splitting probability undefined",
                tally.bin
            );
        }
    }
    estimate
}

/// Same counts as [`estimate`] for a window of a range already estimated.
///
/// A bin never visited by the trajectory was reported by the full-range
/// estimate, so it is only logged at debug level here. Bins that never reach
/// the window's own boundaries are warned about with the window index.
pub fn estimate_window(bins: &[usize], left: usize, right: usize, window: usize) -> CountingEstimate {
    let estimate = tally(bins, left, right);
    for tally in &estimate.tallies {
        if tally.visits == 0 {
            debug!(window, bin = tally.bin, "EXT_BIN {} not visited in window {}", tally.bin, window);
        } else if tally.resolved() == 0 {
            warn!(
                window,
                bin = tally.bin,
                visits = tally.visits,
                "EXT_BIN {} never reaches a boundary of window {}; splitting probability undefined",
                tally.bin,
                window
            );
        }
    }
    estimate
}

fn tally(bins: &[usize], left: usize, right: usize) -> CountingEstimate {
    let hits = ForwardHits::new(bins, left, right);
    let (lo, hi) = (left.min(right), left.max(right));

    let mut tallies: Vec<BinTally> = (lo..=hi)
        .map(|bin| BinTally {
            bin,
            ..BinTally::default()
        })
        .collect();
    for (t, &bin) in bins.iter().enumerate() {
        if bin < lo || bin > hi {
            continue;
        }
        let tally = &mut tallies[bin - lo];
        tally.visits += 1;
        match hits.outcome(t) {
            Commitment::Left => tally.left += 1,
            Commitment::Right => tally.right += 1,
            Commitment::Unresolved => tally.unresolved += 1,
        }
    }
    let empty_bins = tallies.iter().filter(|t| t.visits == 0).map(|t| t.bin).collect();

    CountingEstimate {
        left_bin: left,
        right_bin: right,
        tallies,
        empty_bins,
    }
}

/// Outcome of every visit to `bin`, as `(time index, commitment)`.
pub fn visit_outcomes(bins: &[usize], left: usize, right: usize, bin: usize) -> Vec<(usize, Commitment)> {
    bins.iter()
        .enumerate()
        .filter(|(_, b)| **b == bin)
        .map(|(t, _)| (t, hitting_outcome(bins, t, left, right)))
        .collect()
}
