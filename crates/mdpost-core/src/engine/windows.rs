use super::config::Boundaries;

/// A sub-range of the boundary interval analysed on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// 1-based, as used in output file names.
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl Window {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }
}

/// `2 * count - 1` windows of width `(right - left) / count`, each starting
/// half a width after the previous one.
pub fn half_overlapping(boundaries: &Boundaries, count: usize) -> Vec<Window> {
    if count == 0 {
        return Vec::new();
    }
    let width = boundaries.width() / count as f64;
    (0..2 * count - 1)
        .map(|i| {
            let start = boundaries.left + i as f64 * width / 2.0;
            Window {
                index: i + 1,
                start,
                end: start + width,
            }
        })
        .collect()
}
