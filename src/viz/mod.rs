//! Visualization: render the hospital chart to **SVG**, **PNG** or an RGB buffer.
//!
//! - Left axis: hospitalized, resuscitation, discharged, cumulative deaths
//! - Right axis (shared time axis): deaths per day
//! - Peak labels, lockdown/curfew markers along the baseline, legend top-right
//!
//! [`plan::plan_chart`] decides what is drawn; this module only draws it.

pub mod legend;
pub mod plan;
pub mod types;
pub mod util;

pub use plan::{ChartPlan, plan_chart};
pub use types::{Axis, ImageFormat, LineKind};

use crate::config::{DESC_FONT_PX, LABEL_FONT_PX, TITLE_FONT_PX};
use crate::events::LabelSide;
use crate::models::{DailyAggregate, SeriesSelection};
use anyhow::{Result, anyhow};
use log::{info, warn};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::{FontFamily, FontStyle, FontTransform};
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::ops::Range;
use std::path::Path;

use legend::{LegendItem, draw_legend};
use plan::PlannedSeries;
use util::{day_offset, ensure_fonts_registered, fmt_count, fmt_day};

/// Plan and render in one go.
///
/// Returns `Ok(false)` without touching `out_path` when the selection produces
/// no figure.
pub fn plot_data<P: AsRef<Path>>(
    rows: &[DailyAggregate],
    selection: &SeriesSelection,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<bool> {
    match plan_chart(rows, selection) {
        Some(plan) => {
            render_chart(&plan, out_path, width, height)?;
            Ok(true)
        }
        None => {
            warn!("no left-axis series selected; nothing drawn");
            Ok(false)
        }
    }
}

/// Render a plan to a file; SVG when the extension is `.svg`, PNG otherwise.
pub fn render_chart<P: AsRef<Path>>(
    plan: &ChartPlan,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    ensure_fonts_registered()?;
    let out_path = out_path.as_ref();
    match ImageFormat::from_path(out_path) {
        ImageFormat::Svg => {
            let root = SVGBackend::new(out_path, (width, height)).into_drawing_area();
            draw_chart(root, plan)?;
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(out_path, (width, height)).into_drawing_area();
            draw_chart(root, plan)?;
        }
    }
    info!("wrote chart to {}", out_path.display());
    Ok(())
}

/// Render a plan into a packed RGB buffer of `width * height * 3` bytes.
pub fn render_rgb(plan: &ChartPlan, width: u32, height: u32) -> Result<Vec<u8>> {
    ensure_fonts_registered()?;
    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        draw_chart(root, plan)?;
    }
    Ok(buf)
}

/// Value range with a 5% margin on both ends, like an autoscaled axis.
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let (lo, hi) = if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    };
    let m = (hi - lo) * 0.05;
    (lo - m, hi + m)
}

fn value_range<'a>(series: impl Iterator<Item = &'a PlannedSeries>, extra: f64) -> (f64, f64) {
    let (mut lo, mut hi) = (0.0f64, 0.0f64);
    for s in series {
        for (_, v) in &s.points {
            lo = lo.min(*v as f64);
            hi = hi.max(*v as f64);
        }
    }
    padded(lo, hi + extra)
}

/// Left axis range: the drawn series, stretched up to the last planned tick.
fn primary_y_range(plan: &ChartPlan) -> (f64, f64) {
    let (lo, hi) = value_range(plan.series_on(Axis::Primary), 0.0);
    let top_tick = plan.y_ticks.values.last().map_or(0.0, |v| *v as f64);
    (lo, hi.max(top_tick))
}

/// Tick marks, grid lines and labels at the planned positions, in pixel space on `root`.
/// X labels are rotated and hang below the axis.
fn draw_ticks<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot_px: (Range<i32>, Range<i32>),
    x_ticks: &[(i32, String)],
    y_ticks: &[(i32, String)],
) -> Result<()> {
    let (xs, ys) = plot_px;
    let grid = BLACK.mix(0.12).stroke_width(1);
    let mark = BLACK.stroke_width(1);

    let x_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
        .transform(FontTransform::Rotate90)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for (px, label) in x_ticks {
        root.draw(&PathElement::new(vec![(*px, ys.start), (*px, ys.end)], grid))
            .map_err(|e| anyhow!("{:?}", e))?;
        root.draw(&PathElement::new(vec![(*px, ys.end), (*px, ys.end + 5)], mark))
            .map_err(|e| anyhow!("{:?}", e))?;
        root.draw(&Text::new(label.clone(), (*px, ys.end + 8), x_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    let y_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (py, label) in y_ticks {
        root.draw(&PathElement::new(vec![(xs.start, *py), (xs.end, *py)], grid))
            .map_err(|e| anyhow!("{:?}", e))?;
        root.draw(&PathElement::new(vec![(xs.start - 5, *py), (xs.start, *py)], mark))
            .map_err(|e| anyhow!("{:?}", e))?;
        root.draw(&Text::new(label.clone(), (xs.start - 8, *py), y_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, plan: &ChartPlan) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let origin = plan.first;
    let span = day_offset(origin, plan.last).max(1.0);
    let x_of = |d: chrono::NaiveDate| day_offset(origin, d).clamp(0.0, span);

    let (y_lo, y_hi) = primary_y_range(plan);
    let secondary_extra = plan
        .peaks
        .iter()
        .filter(|p| p.axis == Axis::Secondary)
        .map(|p| p.y_offset)
        .fold(0.0, f64::max);
    let (y2_lo, y2_hi) = value_range(plan.series_on(Axis::Secondary), secondary_extra);

    let right_area = if plan.has_secondary() { 90 } else { 0 };
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            &plan.title,
            (FontFamily::SansSerif, TITLE_FONT_PX)
                .into_font()
                .style(FontStyle::Bold),
        )
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 84)
        .set_label_area_size(LabelAreaPosition::Right, right_area)
        .build_cartesian_2d(0.0..span, y_lo..y_hi)
        .map_err(|e| anyhow!("{:?}", e))?
        .set_secondary_coord(0.0..span, y2_lo..y2_hi);

    // The mesh draws the axis lines and descriptions; ticks come from the plan.
    let no_label = |_: &f64| String::new();
    let y_label_fmt = |v: &f64| fmt_count(*v);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .set_tick_mark_size(LabelAreaPosition::Left, 0)
        .set_tick_mark_size(LabelAreaPosition::Bottom, 0)
        .x_desc(plan.x_desc)
        .y_desc(plan.y_desc)
        .x_label_formatter(&no_label)
        .y_label_formatter(&no_label)
        .label_style((FontFamily::SansSerif, LABEL_FONT_PX))
        .axis_desc_style((FontFamily::SansSerif, DESC_FONT_PX))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_ticks: Vec<(i32, String)> = plan
        .x_ticks
        .iter()
        .map(|d| {
            let x = x_of(*d);
            (chart.backend_coord(&(x, y_lo)).0, fmt_day(origin, x))
        })
        .collect();
    let y_ticks: Vec<(i32, String)> = plan
        .y_ticks
        .values
        .iter()
        .map(|v| {
            let y = *v as f64;
            (chart.backend_coord(&(0.0, y)).1, fmt_count(y))
        })
        .collect();
    draw_ticks(&root, chart.plotting_area().get_pixel_range(), &x_ticks, &y_ticks)?;

    let mut legend_items: Vec<LegendItem> = Vec::new();

    // Left axis series
    for s in plan.series_on(Axis::Primary) {
        let pts: Vec<(f64, f64)> = s.points.iter().map(|(d, v)| (x_of(*d), *v as f64)).collect();
        let style = s.color.stroke_width(2);
        match s.line {
            LineKind::Solid => {
                chart
                    .draw_series(LineSeries::new(pts, style))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            LineKind::Dashed => {
                chart
                    .draw_series(DashedLineSeries::new(pts, 8, 5, style))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
        legend_items.push(LegendItem {
            label: s.metric.label().to_string(),
            color: s.color,
            line: s.line,
        });
    }

    let peak_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    for p in plan.peaks.iter().filter(|p| p.axis == Axis::Primary) {
        chart
            .draw_series(std::iter::once(Text::new(
                p.text.clone(),
                (x_of(p.date), p.value as f64 + p.y_offset),
                peak_style.clone(),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // Lockdown / curfew markers: |-| along the baseline, label above or below.
    let marker_style = BLACK.stroke_width(1);
    for m in &plan.markers {
        let (x0, x1) = (x_of(m.start), x_of(m.end));
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x0, 0.0), (x1, 0.0)],
                marker_style,
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
        chart
            .draw_series([x0, x1].into_iter().map(|x| {
                EmptyElement::at((x, 0.0)) + PathElement::new(vec![(0, -5), (0, 5)], marker_style)
            }))
            .map_err(|e| anyhow!("{:?}", e))?;
        let (dy, vpos) = match m.side {
            LabelSide::Above => (-10, VPos::Bottom),
            LabelSide::Below => (10, VPos::Top),
        };
        let label_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
            .pos(Pos::new(HPos::Center, vpos));
        chart
            .draw_series(std::iter::once(
                EmptyElement::at((x_of(m.label_at), 0.0))
                    + Text::new(m.label, (0, dy), label_style),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // Right axis series
    if plan.has_secondary() {
        chart
            .configure_secondary_axes()
            .y_desc(plan.secondary_desc)
            .y_label_formatter(&y_label_fmt)
            .label_style((FontFamily::SansSerif, LABEL_FONT_PX))
            .axis_desc_style((FontFamily::SansSerif, DESC_FONT_PX))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        for s in plan.series_on(Axis::Secondary) {
            let pts: Vec<(f64, f64)> =
                s.points.iter().map(|(d, v)| (x_of(*d), *v as f64)).collect();
            chart
                .draw_secondary_series(LineSeries::new(pts, s.color.stroke_width(1)))
                .map_err(|e| anyhow!("{:?}", e))?;
            legend_items.push(LegendItem {
                label: s.metric.label().to_string(),
                color: s.color,
                line: s.line,
            });
        }
        for p in plan.peaks.iter().filter(|p| p.axis == Axis::Secondary) {
            chart
                .draw_secondary_series(std::iter::once(Text::new(
                    p.text.clone(),
                    (x_of(p.date), p.value as f64 + p.y_offset),
                    peak_style.clone(),
                )))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    let plot_px = chart.plotting_area().get_pixel_range();
    draw_legend(&root, plot_px, &legend_items, LABEL_FONT_PX)?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_has_margins() {
        let (lo, hi) = padded(0.0, 100.0);
        assert!((lo + 5.0).abs() < 1e-9);
        assert!((hi - 105.0).abs() < 1e-9);
        let (lo, hi) = padded(0.0, 0.0);
        assert!(lo < 0.0 && hi > 0.0);
    }

    fn day(d: u32, hosp: i64, dc_cumul: i64) -> DailyAggregate {
        DailyAggregate {
            date: chrono::NaiveDate::from_ymd_opt(2020, 11, d).unwrap(),
            hosp,
            rea: hosp / 10,
            rad: 0,
            dc_cumul,
            dc_non_cumul: 0,
        }
    }

    #[test]
    fn subset_axis_reaches_the_last_planned_tick() {
        let rows = vec![day(1, 20_000, 9_000), day(2, 32_292, 10_129)];
        let sel = SeriesSelection {
            dc_cumul: true,
            ..SeriesSelection::NONE
        };
        let plan = plan_chart(&rows, &sel).unwrap();
        assert_eq!(plan.y_ticks.values.last(), Some(&30_000));
        let (lo, hi) = primary_y_range(&plan);
        assert!(lo <= 0.0);
        assert!(hi >= 30_000.0, "top {hi} hides planned ticks");
    }

    #[test]
    fn axis_keeps_data_headroom_above_the_ticks() {
        let rows = vec![day(1, 20_000, 9_000), day(2, 32_292, 10_129)];
        let plan = plan_chart(&rows, &SeriesSelection::default()).unwrap();
        let (_, hi) = primary_y_range(&plan);
        assert!(hi > 32_292.0);
    }
}
