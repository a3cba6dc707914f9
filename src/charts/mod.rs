//! Chart rendering: consumes reshaped tables and writes PNG panels.
//!
//! The figures follow the engine's reporting layout; everything
//! here is a thin layer over `plotters` and carries no invariants of its
//! own beyond "draw what the reshaper produced".

pub mod engine;
pub mod minkowski;
pub mod navigation;

use crate::data::reshape::LongRow;

/// Caption font used by every panel.
pub(crate) const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);

/// Value range with 5% padding; degenerate and empty inputs fall back to
/// a unit range so axes can always be built.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Collapse duplicate x values to their mean and sort by x, so repeated
/// measurements at one x draw as a single averaged point.
pub(crate) fn mean_line(points: impl IntoIterator<Item = (f64, f64)>) -> Vec<(f64, f64)> {
    let mut by_x: Vec<(f64, f64, u64)> = Vec::new();
    for (x, y) in points {
        match by_x.iter_mut().find(|(bx, _, _)| bx.to_bits() == x.to_bits()) {
            Some(entry) => {
                entry.1 += y;
                entry.2 += 1;
            }
            None => by_x.push((x, y, 1)),
        }
    }
    by_x.sort_by(|a, b| a.0.total_cmp(&b.0));
    by_x.into_iter().map(|(x, sum, n)| (x, sum / n as f64)).collect()
}

/// Group melted rows back into per-series `(id, value)` point lists,
/// preserving first-seen series order (= column declaration order).
pub(crate) fn series_groups(rows: &[LongRow]) -> Vec<(String, Vec<(f64, f64)>)> {
    let mut groups: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(label, _)| *label == row.series) {
            Some((_, points)) => points.push((row.id, row.value)),
            None => groups.push((row.series.clone(), vec![(row.id, row.value)])),
        }
    }
    groups
}
