//! Stacked streamgraph layout: wiggle baseline offset, band geometry, and the
//! hover hit test.
//!
//! `stack` is a pure function from a record sequence to per-series bands. The
//! baseline of the bottom layer is placed so that the thickness-weighted sum
//! of squared slope changes across all layers is minimized (the standard
//! streamgraph "wiggle" offset); every other layer sits directly on its
//! predecessor. Per date, the summed band thickness always equals the summed
//! (sanitized) raw values.

use crate::models::{Record, SeriesKey};
use chrono::NaiveDate;

/// One stacked band per series: `(lower, upper)` boundary pairs, one per
/// record, in record order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub key: SeriesKey,
    pub bands: Vec<(f64, f64)>,
}

impl Layer {
    /// Band thickness at one record index.
    #[inline]
    pub fn thickness(&self, idx: usize) -> f64 {
        let (lo, hi) = self.bands[idx];
        hi - lo
    }
}

/// Non-finite values contribute zero thickness so that a single bad cell
/// cannot poison the whole scene.
#[inline]
fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Stack `records` in the given fixed key order with a wiggle-minimizing
/// baseline.
///
/// Contract: stable key order in, offset + ordered bands out; at every date
/// the sum of layer thicknesses equals the sum of the sanitized raw values.
/// Zero records produce layers with empty band sequences.
pub fn stack(records: &[Record], keys: &[SeriesKey]) -> Vec<Layer> {
    let n = keys.len();
    let m = records.len();

    // Column-major value grid, sanitized.
    let values: Vec<Vec<f64>> = keys
        .iter()
        .map(|key| records.iter().map(|r| sanitize(r.value(*key))).collect())
        .collect();

    // Baseline of the bottom layer per record: each step moves it by the
    // thickness-weighted mean slope of the layer midlines.
    let mut baseline = vec![0.0f64; m];
    let mut y = 0.0f64;
    for j in 1..m {
        let mut weight = 0.0; // total thickness at j
        let mut drift = 0.0; // thickness-weighted midline slope
        for i in 0..n {
            let cur = values[i][j];
            let prev = values[i][j - 1];
            let mut slope = (cur - prev) / 2.0;
            for below in values.iter().take(i) {
                slope += below[j] - below[j - 1];
            }
            weight += cur;
            drift += slope * cur;
        }
        baseline[j - 1] = y;
        if weight != 0.0 {
            y -= drift / weight;
        }
    }
    if m > 0 {
        baseline[m - 1] = y;
    }

    // Stack every layer on top of the offset baseline.
    let mut layers: Vec<Layer> = keys
        .iter()
        .map(|key| Layer {
            key: *key,
            bands: Vec::with_capacity(m),
        })
        .collect();
    for j in 0..m {
        let mut lower = baseline[j];
        for (i, layer) in layers.iter_mut().enumerate() {
            let upper = lower + values[i][j];
            layer.bands.push((lower, upper));
            lower = upper;
        }
    }
    layers
}

/// Global `(min lower, max upper)` across all layer boundaries, or `None`
/// when there is nothing to measure.
pub fn value_extent(layers: &[Layer]) -> Option<(f64, f64)> {
    let mut extent: Option<(f64, f64)> = None;
    for layer in layers {
        for &(lo, hi) in &layer.bands {
            extent = Some(match extent {
                Some((min, max)) => (min.min(lo), max.max(hi)),
                None => (lo, hi),
            });
        }
    }
    extent
}

/// Screen-space x coordinate for a date: days from the Common Era. Monotonic
/// in the date, which is all the time scale needs.
#[inline]
pub fn date_to_x(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    date.num_days_from_ce() as f64
}

/// The full derived layout: stacked bands plus the scale domains the
/// renderers need. Owned by whoever renders; rebuilt wholesale whenever the
/// record sequence changes.
#[derive(Debug, Clone)]
pub struct StreamLayout {
    pub layers: Vec<Layer>,
    /// Per-record x coordinate (days from CE), in record order.
    pub xs: Vec<f64>,
    /// Per-record date, in record order.
    pub dates: Vec<NaiveDate>,
    /// Time scale domain, padded when degenerate.
    pub x_range: (f64, f64),
    /// Value scale domain: global min/max of layer boundaries, padded when
    /// degenerate.
    pub y_range: (f64, f64),
}

impl StreamLayout {
    /// Compute the layout for a record sequence. `None` for zero records —
    /// the recoverable "no data" state.
    pub fn compute(records: &[Record]) -> Option<StreamLayout> {
        if records.is_empty() {
            return None;
        }
        let layers = stack(records, &SeriesKey::ALL);
        let xs: Vec<f64> = records.iter().map(|r| date_to_x(r.date)).collect();
        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();

        let (mut x_min, mut x_max) = xs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        if x_min == x_max {
            x_min -= 1.0;
            x_max += 1.0;
        }

        let (mut y_min, mut y_max) = value_extent(&layers)?;
        if (y_max - y_min).abs() < f64::EPSILON {
            y_min -= 1.0;
            y_max += 1.0;
        }

        Some(StreamLayout {
            layers,
            xs,
            dates,
            x_range: (x_min, x_max),
            y_range: (y_min, y_max),
        })
    }

    /// Hover hit test: which series' band contains the point `(x, y)`?
    ///
    /// Bands are linearly interpolated between consecutive records, matching
    /// how they are drawn. Assumes record x positions ascend (the caller's
    /// responsibility, as with drawing).
    pub fn pick(&self, x: f64, y: f64) -> Option<SeriesKey> {
        let m = self.xs.len();
        if m == 0 {
            return None;
        }
        if m == 1 {
            let idx = 0;
            return self
                .layers
                .iter()
                .find(|layer| {
                    let (lo, hi) = layer.bands[idx];
                    lo <= y && y <= hi
                })
                .map(|layer| layer.key);
        }
        if x < self.xs[0] || x > self.xs[m - 1] {
            return None;
        }
        // Segment containing x, then interpolation factor within it.
        let seg = match self.xs.iter().position(|&xi| xi >= x) {
            Some(0) => 0,
            Some(i) => i - 1,
            None => m - 2,
        };
        let span = self.xs[seg + 1] - self.xs[seg];
        let t = if span == 0.0 {
            0.0
        } else {
            (x - self.xs[seg]) / span
        };
        for layer in &self.layers {
            let (lo0, hi0) = layer.bands[seg];
            let (lo1, hi1) = layer.bands[seg + 1];
            let lo = lo0 + (lo1 - lo0) * t;
            let hi = hi0 + (hi1 - hi0) * t;
            if lo <= y && y <= hi {
                return Some(layer.key);
            }
        }
        None
    }
}
