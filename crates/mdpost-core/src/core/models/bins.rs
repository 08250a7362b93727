use thiserror::Error;

/// Fraction of the data range added to the last edge so the maximum value
/// falls inside the final half-open bin.
const EDGE_PADDING: f64 = 0.001;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BinningError {
    #[error("Bin count must be at least 1")]
    ZeroBins,
    #[error("Cannot build bins over an empty set of values")]
    EmptyInput,
    #[error("Bin range [{start}, {end}] is not a finite, increasing interval")]
    InvalidRange { start: f64, end: f64 },
}

/// One interval `[start, end)` of a partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialBin {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl SpatialBin {
    #[inline]
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Monotonically increasing edges of `count()` contiguous, equal-width bins.
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Equally spaced edges over exactly `[start, end]`.
    pub fn uniform(start: f64, end: f64, count: usize) -> Result<Self, BinningError> {
        if count == 0 {
            return Err(BinningError::ZeroBins);
        }
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(BinningError::InvalidRange { start, end });
        }
        Ok(Self {
            edges: linspace(start, end, count),
        })
    }

    /// Edges spanning `[min, max]` of `values`, with the final edge pushed out by
    /// 0.1% of the range so the maximum lands in the last bin. A degenerate range
    /// (`min == max`) is first widened by 0.1% of `|min|` on each side.
    pub fn spanning(values: &[f64], count: usize) -> Result<Self, BinningError> {
        if count == 0 {
            return Err(BinningError::ZeroBins);
        }
        let (min, max) = crate::core::models::trajectory::min_max(values.iter().copied())
            .ok_or(BinningError::EmptyInput)?;
        if !(min.is_finite() && max.is_finite()) {
            return Err(BinningError::InvalidRange {
                start: min,
                end: max,
            });
        }

        if min == max {
            let pad = |v: f64| if v != 0.0 { EDGE_PADDING * v.abs() } else { EDGE_PADDING };
            return Ok(Self {
                edges: linspace(min - pad(min), max + pad(max), count),
            });
        }

        let mut edges = linspace(min, max, count);
        if let Some(last) = edges.last_mut() {
            *last += (max - min) * EDGE_PADDING;
        }
        Ok(Self { edges })
    }

    pub fn count(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn first(&self) -> f64 {
        self.edges[0]
    }

    pub fn last(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    pub fn bin(&self, index: usize) -> Option<SpatialBin> {
        if index >= self.count() {
            return None;
        }
        Some(SpatialBin {
            index,
            start: self.edges[index],
            end: self.edges[index + 1],
        })
    }

    pub fn bins(&self) -> impl Iterator<Item = SpatialBin> + '_ {
        (0..self.count()).filter_map(|i| self.bin(i))
    }

    /// Midpoint of every bin, in order.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    /// Index of the half-open bin containing `value`, or `None` outside
    /// `[first, last)`.
    pub fn locate(&self, value: f64) -> Option<usize> {
        if !(value >= self.first() && value < self.last()) {
            return None;
        }
        let above = self.edges.partition_point(|e| *e <= value);
        Some(above - 1)
    }

    /// Like [`locate`](Self::locate), but the final bin is closed so `last()`
    /// itself is counted (histogram convention).
    pub fn locate_closed(&self, value: f64) -> Option<usize> {
        if value == self.last() {
            return Some(self.count() - 1);
        }
        self.locate(value)
    }

    /// Index of the first edge `>= value`, minus one (insertion point to the
    /// left). May be `-1` or `count()` for values outside the edges.
    pub fn insertion_bin(&self, value: f64) -> isize {
        self.edges.partition_point(|e| *e < value) as isize - 1
    }
}

fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    let step = (end - start) / count as f64;
    let mut edges: Vec<f64> = (0..=count).map(|i| start + i as f64 * step).collect();
    edges[count] = end;
    edges
}
