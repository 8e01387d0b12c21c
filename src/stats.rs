use crate::models::{Record, SeriesKey};
use serde::{Deserialize, Serialize};

/// Summary statistics for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub key: SeriesKey,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute per-series statistics over the finite values; NaN cells count as
/// missing. One entry per series in canonical order.
pub fn series_summary(records: &[Record]) -> Vec<Summary> {
    SeriesKey::ALL
        .iter()
        .map(|&key| {
            let mut vals: Vec<f64> = Vec::with_capacity(records.len());
            let mut missing = 0usize;
            for r in records {
                let v = r.value(key);
                if v.is_finite() {
                    vals.push(v);
                } else {
                    missing += 1;
                }
            }
            vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let count = vals.len();
            let min = vals.first().cloned();
            let max = vals.last().cloned();
            let mean = if count > 0 {
                Some(vals.iter().copied().sum::<f64>() / count as f64)
            } else {
                None
            };
            let median = if count == 0 {
                None
            } else if count % 2 == 1 {
                Some(vals[count / 2])
            } else {
                Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
            };
            Summary {
                key,
                count,
                missing,
                min,
                max,
                mean,
                median,
            }
        })
        .collect()
}
