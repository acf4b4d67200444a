use chrono::NaiveDate;
use covid_hospi::events::LabelSide;
use covid_hospi::models::{DailyAggregate, Metric, SeriesSelection};
use covid_hospi::viz::plan::{plan_chart, y_ticks};
use covid_hospi::viz::{Axis, LineKind};

fn ymd(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, m, d).unwrap()
}

fn day(date: NaiveDate, hosp: i64, rea: i64, rad: i64, dc_cumul: i64, dc_non_cumul: i64) -> DailyAggregate {
    DailyAggregate {
        date,
        hosp,
        rea,
        rad,
        dc_cumul,
        dc_non_cumul,
    }
}

fn two_days() -> Vec<DailyAggregate> {
    vec![
        day(ymd(4, 13), 32_292, 6_821, 27_186, 9_588, 574),
        day(ymd(4, 14), 31_305, 6_730, 28_805, 10_129, 541),
    ]
}

fn all_on() -> SeriesSelection {
    SeriesSelection {
        hosp: true,
        rea: true,
        rad: true,
        dc_cumul: true,
        dc_non_cumul: true,
    }
}

#[test]
fn peaks_match_known_extrema() {
    let rows = vec![
        day(ymd(4, 13), 100, 50, 0, 10, 10),
        day(ymd(4, 14), 120, 40, 0, 35, 25),
    ];
    let plan = plan_chart(&rows, &all_on()).unwrap();
    let peak = |m: Metric| plan.peaks.iter().find(|p| p.metric == m).unwrap();

    assert_eq!((peak(Metric::Hosp).date, peak(Metric::Hosp).value), (ymd(4, 14), 120));
    assert_eq!((peak(Metric::Rea).date, peak(Metric::Rea).value), (ymd(4, 13), 50));
    let daily = peak(Metric::DcNonCumul);
    assert_eq!((daily.date, daily.value), (ymd(4, 14), 25));
    assert_eq!(daily.axis, Axis::Secondary);
    assert_eq!(daily.y_offset, 20.0);
    assert_eq!(peak(Metric::Hosp).text, "Max hosp=120");

    // discharged and cumulative deaths are drawn without a peak label
    assert_eq!(plan.peaks.len(), 3);
}

#[test]
fn no_primary_selection_means_no_figure() {
    let rows = two_days();
    assert!(plan_chart(&rows, &SeriesSelection::NONE).is_none());
    let daily_only = SeriesSelection {
        dc_non_cumul: true,
        ..SeriesSelection::NONE
    };
    assert!(plan_chart(&rows, &daily_only).is_none());
}

#[test]
fn all_primary_doubles_tick_spacing() {
    let rows = two_days();
    let full = y_ticks(&rows, &all_on());
    let subset = y_ticks(&rows, &SeriesSelection::default());
    assert_eq!(full.step, 2 * subset.step);
    assert_eq!(full.step, 5000);

    assert_eq!(full.top, 32_292);
    assert_eq!(
        full.values,
        vec![0, 5000, 10_000, 15_000, 20_000, 25_000, 30_000]
    );
    assert_eq!(subset.values.len(), 13);

    // all four primary flags: top covers every column, discharged included
    let rows = vec![day(ymd(5, 1), 1_000, 200, 90_000, 3_000, 12)];
    assert_eq!(y_ticks(&rows, &all_on()).top, 90_000);
}

#[test]
fn subset_ticks_ignore_discharged_column() {
    let rows = vec![day(ymd(5, 1), 1_000, 200, 90_000, 3_000, 12)];
    let rad_only = SeriesSelection {
        rad: true,
        ..SeriesSelection::NONE
    };
    let t = y_ticks(&rows, &rad_only);
    assert_eq!(t.step, 2500);
    assert_eq!(t.top, 3_000);
    assert_eq!(t.values, vec![0, 2500]);
}

#[test]
fn series_follow_selection_and_styles() {
    let rows = two_days();
    let sel = SeriesSelection {
        hosp: false,
        rea: true,
        rad: false,
        dc_cumul: true,
        dc_non_cumul: true,
    };
    let plan = plan_chart(&rows, &sel).unwrap();
    let metrics: Vec<Metric> = plan.series.iter().map(|s| s.metric).collect();
    assert_eq!(metrics, vec![Metric::Rea, Metric::DcCumul, Metric::DcNonCumul]);
    assert_eq!(plan.series[1].line, LineKind::Dashed);
    assert!(plan.has_secondary());
    assert_eq!(plan.series[0].points.len(), 2);
}

#[test]
fn title_and_markers_use_observed_range() {
    let rows = vec![
        day(ymd(3, 18), 1, 1, 1, 1, 1),
        day(ymd(11, 9), 2, 2, 2, 2, 1),
    ];
    let plan = plan_chart(&rows, &SeriesSelection::default()).unwrap();
    assert_eq!(
        plan.title,
        "Données hospitalières de la COVID-19 du 2020-03-18 au 2020-11-09 | France"
    );
    let labels: Vec<&str> = plan.markers.iter().map(|m| m.label).collect();
    assert_eq!(labels, vec!["Confinement 1", "Couvre feu", "Confinement 2"]);
    assert_eq!(plan.markers[2].end, ymd(11, 9));
    assert_eq!(plan.markers[1].side, LabelSide::Below);
    assert_eq!(plan.x_ticks.first(), Some(&ymd(3, 18)));
    assert!(plan.x_ticks.windows(2).all(|w| (w[1] - w[0]).num_days() == 10));
}

#[test]
fn markers_do_not_depend_on_selection() {
    let rows = two_days();
    let a = plan_chart(&rows, &all_on()).unwrap();
    let b = plan_chart(
        &rows,
        &SeriesSelection {
            rad: true,
            ..SeriesSelection::NONE
        },
    )
    .unwrap();
    assert_eq!(a.markers, b.markers);
}
