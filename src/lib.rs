//! streamviz
//!
//! A lightweight Rust library for parsing, stacking, and visualizing
//! five-series LLM-interest time series as a streamgraph. Pairs with the
//! `streamviz-gui` interactive viewer.
//!
//! ### Features
//! - Parse a CSV upload (columns `Date`, `GPT-4`, `Gemini`, `PaLM-2`,
//!   `Claude`, `LLaMA-3.1`) into typed records, order preserved
//! - Pure wiggle-offset stacked layout with a conservation guarantee
//! - Deterministic SVG scene rendering: streamgraph, axes, legend
//! - Hover-detail mini bar chart per series
//! - Quick per-series summary statistics (min, max, mean, median)
//!
//! ### Example
//! ```no_run
//! let records = streamviz::ingest::load_csv("interest.csv")?;
//! streamviz::viz::render_streamgraph(
//!     &records,
//!     "interest.svg",
//!     streamviz::viz::CHART_WIDTH,
//!     streamviz::viz::CHART_HEIGHT,
//! )?;
//! let stats = streamviz::stats::series_summary(&records);
//! println!("{:#?}", stats);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod ingest;
pub mod layout;
pub mod models;
pub mod stats;
pub mod viz;

pub use ingest::IngestError;
pub use layout::{Layer, StreamLayout, stack};
pub use models::{HoverSelection, Record, SeriesKey};
