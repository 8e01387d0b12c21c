//! Visualization: render the streamgraph scene to **SVG**.
//!
//! - One filled band per series, wiggle-offset stacked layout
//! - Fixed series colors; legend panel in the right gutter lists all five
//!   series regardless of the data's contents
//! - Bottom time axis (`%b %Y`), left value axis
//! - Deterministic: identical records render to identical SVG text
//! - Hover detail lives in [`minichart`]; the interactive surface is the
//!   `streamviz-gui` binary
//!
//! The scene is rebuilt wholesale on every call; there is no incremental
//! update path.

pub mod legend;
pub mod minichart;
pub mod text;

use crate::layout::StreamLayout;
use crate::models::Record;
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters_svg::SVGBackend;

use std::path::Path;

use chrono::NaiveDate;
use legend::draw_legend_panel;

/// Logical chart canvas, including margins and the legend gutter.
pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 400;

/// Right gutter reserved for the legend panel.
const LEGEND_WIDTH: u32 = 150;
const MARGIN_TOP: u32 = 20;
const LABEL_AREA_LEFT: u32 = 50;
const LABEL_AREA_BOTTOM: u32 = 50;

/// Render the streamgraph scene into an SVG file.
pub fn render_streamgraph<P: AsRef<Path>>(
    records: &[Record],
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let layout = StreamLayout::compute(records).ok_or_else(|| anyhow!("no records to plot"))?;
    let path_string = out_path.as_ref().to_string_lossy().into_owned();
    let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
    draw_streamgraph(root, &layout)
}

/// Render the streamgraph scene to an SVG string.
pub fn streamgraph_svg(records: &[Record], width: u32, height: u32) -> Result<String> {
    let layout = StreamLayout::compute(records).ok_or_else(|| anyhow!("no records to plot"))?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw_streamgraph(root, &layout)?;
    }
    Ok(svg)
}

fn draw_streamgraph<DB>(root: DrawingArea<DB, Shift>, layout: &StreamLayout) -> Result<()>
where
    DB: DrawingBackend,
{
    // ----------------------------
    // 1) Split drawing areas: plot on the left, legend gutter on the right
    // ----------------------------
    let (root_w, _) = root.dim_in_pixel();
    let split_x = root_w.saturating_sub(LEGEND_WIDTH);
    let (plot_area, legend_area) = root.split_horizontally(split_x);

    plot_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    legend_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // ----------------------------
    // 2) Build chart over the time / value domains
    // ----------------------------
    let (x_min, x_max) = layout.x_range;
    let (y_min, y_max) = layout.y_range;

    let x_label_fmt = |x: &f64| {
        NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_default()
    };
    let x_label_count = layout.dates.len().clamp(2, 8);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin_top(MARGIN_TOP)
        .set_label_area_size(LabelAreaPosition::Left, LABEL_AREA_LEFT)
        .set_label_area_size(LabelAreaPosition::Bottom, LABEL_AREA_BOTTOM)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(x_label_count)
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // ----------------------------
    // 3) Draw one closed band polygon per series, in stacking order
    // ----------------------------
    for layer in &layout.layers {
        let (r, g, b) = layer.key.color();
        let color = RGBColor(r, g, b);

        // lower boundary forward, upper boundary reversed
        let mut poly: Vec<(f64, f64)> = Vec::with_capacity(layer.bands.len() * 2);
        poly.extend(
            layout
                .xs
                .iter()
                .zip(layer.bands.iter())
                .map(|(&x, &(lo, _))| (x, lo)),
        );
        poly.extend(
            layout
                .xs
                .iter()
                .zip(layer.bands.iter())
                .rev()
                .map(|(&x, &(_, hi))| (x, hi)),
        );

        chart
            .draw_series(std::iter::once(Polygon::new(poly, color.filled())))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 4) Legend panel and present
    // ----------------------------
    draw_legend_panel(&legend_area)?;

    plot_area
        .present()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    legend_area
        .present()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
