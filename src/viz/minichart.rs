//! Hover-detail mini bar chart: one bar per date for a single series.
//!
//! An independent 200×150 scene, rebuilt from scratch on every hover. Bands
//! use a fixed padding; the bottom axis carries month abbreviations, the
//! left axis a reduced tick count.

use anyhow::Result;
use chrono::NaiveDate;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontFamily, FontTransform};
use plotters_svg::SVGBackend;
use std::path::Path;

use crate::models::SeriesKey;

/// Logical mini chart canvas, including margins.
pub const MINI_WIDTH: u32 = 200;
pub const MINI_HEIGHT: u32 = 150;

const MARGIN_TOP: u32 = 10;
const MARGIN_RIGHT: u32 = 10;
const LABEL_AREA_LEFT: u32 = 40;
const LABEL_AREA_BOTTOM: u32 = 40;

/// Band width within each unit slot (the remainder is padding).
const BAND_WIDTH: f64 = 0.9;

/// Render the mini chart for one series into an SVG file.
pub fn render_mini_chart<P: AsRef<Path>>(
    key: SeriesKey,
    samples: &[(NaiveDate, f64)],
    out_path: P,
) -> Result<()> {
    let path_string = out_path.as_ref().to_string_lossy().into_owned();
    let root = SVGBackend::new(path_string.as_str(), (MINI_WIDTH, MINI_HEIGHT)).into_drawing_area();
    draw_mini_chart(root, key, samples)
}

/// Render the mini chart for one series to an SVG string.
pub fn mini_chart_svg(key: SeriesKey, samples: &[(NaiveDate, f64)]) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (MINI_WIDTH, MINI_HEIGHT)).into_drawing_area();
        draw_mini_chart(root, key, samples)?;
    }
    Ok(svg)
}

fn draw_mini_chart<DB>(
    root: DrawingArea<DB, Shift>,
    key: SeriesKey,
    samples: &[(NaiveDate, f64)],
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Nothing to draw: a blank scene, not an error.
    if samples.is_empty() {
        root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        return Ok(());
    }

    let n = samples.len();

    // Linear vertical scale over [0, max]; degenerate max falls back to 1.
    let mut y_max = samples
        .iter()
        .map(|(_, v)| *v)
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    if y_max <= 0.0 {
        y_max = 1.0;
    }

    // Banded horizontal scale: slot i is centered on x = i.
    let x_range = -0.5f64..(n as f64 - 0.5);

    let (r, g, b) = key.color();
    let color = RGBColor(r, g, b);

    let mut chart = ChartBuilder::on(&root)
        .margin_top(MARGIN_TOP)
        .margin_right(MARGIN_RIGHT)
        .set_label_area_size(LabelAreaPosition::Left, LABEL_AREA_LEFT)
        .set_label_area_size(LabelAreaPosition::Bottom, LABEL_AREA_BOTTOM)
        .build_cartesian_2d(x_range, 0.0f64..y_max)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Month abbreviation per band center; blanks between bands.
    let month_labels: Vec<String> = samples
        .iter()
        .map(|(d, _)| d.format("%b").to_string())
        .collect();
    let x_label_fmt = move |x: &f64| {
        let i = x.round();
        if (x - i).abs() > 0.25 || i < 0.0 {
            return String::new();
        }
        month_labels.get(i as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Month")
        .y_desc("Value")
        .x_labels(n)
        .y_labels(4)
        .x_label_formatter(&x_label_fmt)
        .x_label_style(
            (FontFamily::SansSerif, 10)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .label_style((FontFamily::SansSerif, 10))
        .axis_desc_style((FontFamily::SansSerif, 12))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // One bar per date; non-finite or negative values collapse to zero height.
    for (i, (_, v)) in samples.iter().enumerate() {
        let h = if v.is_finite() { v.max(0.0).min(y_max) } else { 0.0 };
        let x0 = i as f64 - BAND_WIDTH / 2.0;
        let x1 = i as f64 + BAND_WIDTH / 2.0;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x0, 0.0), (x1, h)],
                color.filled(),
            )))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
