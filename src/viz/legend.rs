//! Legend box in the upper-right corner of the plotting area.

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

use super::types::LineKind;
use super::util::estimate_text_width_px;

pub struct LegendItem {
    pub label: String,
    pub color: RGBColor,
    pub line: LineKind,
}

/// Draw `items` stacked vertically inside the top-right corner of `plot_px`
/// (the plotting area's pixel ranges on `root`).
pub fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot_px: (Range<i32>, Range<i32>),
    items: &[LegendItem],
    font_px: u32,
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    let pad = 8;
    let sample_w = 28;
    let gap = 8;
    let line_h = font_px as i32 + 6;

    let text_w = items
        .iter()
        .map(|it| estimate_text_width_px(&it.label, font_px) as i32)
        .max()
        .unwrap_or(0);
    let box_w = pad + sample_w + gap + text_w + pad;
    let box_h = pad * 2 + line_h * items.len() as i32;

    let (xs, ys) = plot_px;
    let x1 = xs.end - 10;
    let x0 = x1 - box_w;
    let y0 = ys.start + 10;
    let y1 = y0 + box_h;

    root.draw(&Rectangle::new([(x0, y0), (x1, y1)], WHITE.mix(0.85).filled()))
        .map_err(|e| anyhow!("{:?}", e))?;
    root.draw(&Rectangle::new([(x0, y0), (x1, y1)], BLACK.mix(0.3).stroke_width(1)))
        .map_err(|e| anyhow!("{:?}", e))?;

    let text_style = TextStyle::from((FontFamily::SansSerif, font_px))
        .pos(Pos::new(HPos::Left, VPos::Center));
    for (i, it) in items.iter().enumerate() {
        let cy = y0 + pad + line_h * i as i32 + line_h / 2;
        let sx = x0 + pad;
        let stroke = it.color.stroke_width(2);
        match it.line {
            LineKind::Solid => {
                root.draw(&PathElement::new(vec![(sx, cy), (sx + sample_w, cy)], stroke))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            LineKind::Dashed => {
                for k in 0..3 {
                    let a = sx + k * 11;
                    root.draw(&PathElement::new(vec![(a, cy), (a + 6, cy)], stroke))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
        }
        root.draw(&Text::new(
            it.label.clone(),
            (sx + sample_w + gap, cy),
            text_style.clone(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
