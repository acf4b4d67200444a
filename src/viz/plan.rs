//! Decide what goes on the chart, independently of any drawing backend.

use super::types::{Axis, LineKind};
use crate::config::{AREA_LABEL, DAILY_PEAK_LABEL_OFFSET, X_INTERVAL_DAYS, Y_INTERVAL};
use crate::events::{self, Marker};
use crate::models::{DailyAggregate, Metric, SeriesSelection};
use crate::stats::{max_over, peak};
use chrono::{Duration, NaiveDate};
use plotters::style::RGBColor;

/// Columns the subset tick range is computed from, whatever is selected.
const SUBSET_TICK_COLUMNS: [Metric; 3] = [Metric::Hosp, Metric::Rea, Metric::DcCumul];

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSeries {
    pub metric: Metric,
    pub axis: Axis,
    pub line: LineKind,
    pub color: RGBColor,
    pub points: Vec<(NaiveDate, i64)>,
}

/// Text pinned at a peak.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakLabel {
    pub metric: Metric,
    pub axis: Axis,
    pub date: NaiveDate,
    pub value: i64,
    /// Label is drawn at `value + y_offset` (data units).
    pub y_offset: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YTicks {
    pub step: i64,
    pub top: i64,
    pub values: Vec<i64>,
}

impl YTicks {
    /// `0, step, 2*step, ...` up to and including `top`.
    pub fn new(step: i64, top: i64) -> Self {
        let values = if top < 0 {
            Vec::new()
        } else {
            (0..=top).step_by(step.max(1) as usize).collect()
        };
        Self { step, top, values }
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub title: String,
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub series: Vec<PlannedSeries>,
    pub peaks: Vec<PeakLabel>,
    pub x_ticks: Vec<NaiveDate>,
    pub y_ticks: YTicks,
    pub markers: Vec<Marker>,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
    pub secondary_desc: &'static str,
}

impl ChartPlan {
    pub fn has_secondary(&self) -> bool {
        self.series.iter().any(|s| s.axis == Axis::Secondary)
    }

    pub fn series_on(&self, axis: Axis) -> impl Iterator<Item = &PlannedSeries> {
        self.series.iter().filter(move |s| s.axis == axis)
    }
}

/// Color, line kind and axis of each series, and whether its peak is labelled.
pub fn series_style(metric: Metric) -> (RGBColor, LineKind, Axis, bool) {
    match metric {
        Metric::Hosp => (RGBColor(0, 0, 255), LineKind::Solid, Axis::Primary, true),
        Metric::Rea => (RGBColor(255, 0, 0), LineKind::Solid, Axis::Primary, true),
        Metric::Rad => (RGBColor(0, 128, 0), LineKind::Solid, Axis::Primary, false),
        Metric::DcCumul => (RGBColor(0, 0, 0), LineKind::Dashed, Axis::Primary, false),
        Metric::DcNonCumul => (RGBColor(0, 0, 0), LineKind::Solid, Axis::Secondary, true),
    }
}

/// Build the chart plan, or `None` when no figure is drawn.
///
/// The figure only exists when one of the four left-axis series is selected;
/// daily deaths alone do not create it.
pub fn plan_chart(rows: &[DailyAggregate], selection: &SeriesSelection) -> Option<ChartPlan> {
    if !selection.any_primary() {
        return None;
    }
    let first = rows.first()?.date;
    let last = rows.last()?.date;

    let mut series = Vec::new();
    let mut peaks = Vec::new();
    for metric in selection.metrics() {
        let (color, line, axis, labelled) = series_style(metric);
        series.push(PlannedSeries {
            metric,
            axis,
            line,
            color,
            points: rows.iter().map(|r| (r.date, r.value(metric))).collect(),
        });
        if labelled && let Some(p) = peak(rows, metric) {
            peaks.push(PeakLabel {
                metric,
                axis,
                date: p.date,
                value: p.value,
                y_offset: if axis == Axis::Secondary {
                    DAILY_PEAK_LABEL_OFFSET
                } else {
                    0.0
                },
                text: format!("Max {}={}", metric.column(), p.value),
            });
        }
    }

    Some(ChartPlan {
        title: format!(
            "Données hospitalières de la COVID-19 du {first} au {last} | {AREA_LABEL}"
        ),
        first,
        last,
        series,
        peaks,
        x_ticks: x_ticks(first, last),
        y_ticks: y_ticks(rows, selection),
        markers: events::markers(last),
        x_desc: "Mois-Jour",
        y_desc: "Nombre de cas",
        secondary_desc: Metric::DcNonCumul.label(),
    })
}

/// One tick every [`X_INTERVAL_DAYS`] starting on the first day.
pub fn x_ticks(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = first;
    while d <= last {
        out.push(d);
        d += Duration::days(X_INTERVAL_DAYS);
    }
    out
}

/// Left-axis ticks.
///
/// All four primary series: step `2 * Y_INTERVAL` up to the maximum of every
/// column. Otherwise: step `Y_INTERVAL` up to the maximum of hosp, rea and
/// dc_cumul, even if those are not the ones drawn.
pub fn y_ticks(rows: &[DailyAggregate], selection: &SeriesSelection) -> YTicks {
    if selection.all_primary() {
        YTicks::new(Y_INTERVAL * 2, max_over(rows, &Metric::ALL))
    } else {
        YTicks::new(Y_INTERVAL, max_over(rows, &SUBSET_TICK_COLUMNS))
    }
}
