use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The five fixed series tracked by the chart.
///
/// The variant order is the canonical stacking order; labels double as the
/// CSV column headers. Each key is bound to a fixed display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeriesKey {
    Gpt4,
    Gemini,
    Palm2,
    Claude,
    Llama31,
}

impl SeriesKey {
    /// All series in canonical stacking order.
    pub const ALL: [SeriesKey; 5] = [
        SeriesKey::Gpt4,
        SeriesKey::Gemini,
        SeriesKey::Palm2,
        SeriesKey::Claude,
        SeriesKey::Llama31,
    ];

    /// Display label; identical to the CSV column header.
    pub fn label(&self) -> &'static str {
        match self {
            SeriesKey::Gpt4 => "GPT-4",
            SeriesKey::Gemini => "Gemini",
            SeriesKey::Palm2 => "PaLM-2",
            SeriesKey::Claude => "Claude",
            SeriesKey::Llama31 => "LLaMA-3.1",
        }
    }

    /// Fixed display color as (r, g, b).
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            SeriesKey::Gpt4 => (228, 26, 28),    // #e41a1c
            SeriesKey::Gemini => (55, 126, 184), // #377eb8
            SeriesKey::Palm2 => (77, 175, 74),   // #4daf4a
            SeriesKey::Claude => (152, 78, 163), // #984ea3
            SeriesKey::Llama31 => (255, 127, 0), // #ff7f00
        }
    }

    /// Look a key up by its display label / CSV header.
    pub fn from_label(label: &str) -> Option<SeriesKey> {
        SeriesKey::ALL.into_iter().find(|k| k.label() == label)
    }

    /// Position in the canonical stacking order.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// One observation: a date plus one value per series.
///
/// Records keep the order they had in the source file; nothing re-sorts them.
/// Missing or non-numeric source cells are carried as `f64::NAN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    values: [f64; 5],
}

impl Record {
    pub fn new(date: NaiveDate, values: [f64; 5]) -> Self {
        Self { date, values }
    }

    /// Value for one series (possibly NaN).
    #[inline]
    pub fn value(&self, key: SeriesKey) -> f64 {
        self.values[key.index()]
    }

    /// Sum of all finite series values at this date.
    pub fn total(&self) -> f64 {
        self.values.iter().filter(|v| v.is_finite()).sum()
    }
}

/// `(date, value)` samples for one series across every record, in record order.
pub fn series_samples(records: &[Record], key: SeriesKey) -> Vec<(NaiveDate, f64)> {
    records.iter().map(|r| (r.date, r.value(key))).collect()
}

/// Transient hover state: the hovered series plus its full per-date value
/// sequence. Built on pointer-enter, discarded on pointer-out.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverSelection {
    pub key: SeriesKey,
    pub samples: Vec<(NaiveDate, f64)>,
}

impl HoverSelection {
    pub fn capture(records: &[Record], key: SeriesKey) -> Self {
        Self {
            key,
            samples: series_samples(records, key),
        }
    }
}
