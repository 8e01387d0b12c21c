//! Legend panel drawing for the right-hand gutter.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::truncate_to_width;
use crate::models::SeriesKey;

const SWATCH_SIZE: i32 = 15;
const ROW_STEP: i32 = 20;
const PANEL_X: i32 = 50;
const PANEL_Y: i32 = 20;
const LABEL_GAP: i32 = 20;
const FONT_PX: u32 = 12;

/// Draw the legend panel: one swatch + label per series, in stacking order,
/// listing all five series regardless of the data's contents.
pub fn draw_legend_panel<DB: DrawingBackend>(legend_area: &DrawingArea<DB, Shift>) -> Result<()> {
    let (w_u32, _) = legend_area.dim_in_pixel();
    let text_cap = (w_u32 as i32 - PANEL_X - LABEL_GAP).max(40) as u32;

    let label_style = TextStyle::from((FontFamily::SansSerif, FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (i, key) in SeriesKey::ALL.iter().enumerate() {
        let (r, g, b) = key.color();
        let color = RGBColor(r, g, b);
        let y = PANEL_Y + i as i32 * ROW_STEP;

        legend_area
            .draw(&Rectangle::new(
                [(PANEL_X, y), (PANEL_X + SWATCH_SIZE, y + SWATCH_SIZE)],
                color.filled(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        legend_area
            .draw(&Text::new(
                truncate_to_width(key.label(), FONT_PX, text_cap),
                (PANEL_X + LABEL_GAP, y + SWATCH_SIZE / 2),
                label_style.clone(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}
