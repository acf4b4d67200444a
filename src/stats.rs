use crate::models::{DailyAggregate, Metric};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Largest value of a series and the day it was first reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peak {
    pub date: NaiveDate,
    pub value: i64,
}

/// Summary statistics for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub metric: Metric,
    pub count: usize,
    pub min: Option<i64>,
    pub max: Option<Peak>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub last: Option<i64>,
}

/// Global maximum of `metric`; ties resolve to the earliest date.
pub fn peak(rows: &[DailyAggregate], metric: Metric) -> Option<Peak> {
    rows.iter().fold(None, |best: Option<Peak>, r| {
        let v = r.value(metric);
        match best {
            Some(b) if b.value >= v => Some(b),
            _ => Some(Peak {
                date: r.date,
                value: v,
            }),
        }
    })
}

/// Largest value over several series (0 when `rows` is empty).
pub fn max_over(rows: &[DailyAggregate], metrics: &[Metric]) -> i64 {
    metrics
        .iter()
        .filter_map(|m| peak(rows, *m))
        .map(|p| p.value)
        .max()
        .unwrap_or(0)
}

/// Compute statistics for every series.
pub fn summarize(rows: &[DailyAggregate]) -> Vec<Summary> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let mut vals: Vec<i64> = rows.iter().map(|r| r.value(metric)).collect();
            let last = vals.last().copied();
            vals.sort_unstable();
            let count = vals.len();
            let mean = if count > 0 {
                Some(vals.iter().sum::<i64>() as f64 / count as f64)
            } else {
                None
            };
            let median = if count == 0 {
                None
            } else if count % 2 == 1 {
                Some(vals[count / 2] as f64)
            } else {
                Some((vals[count / 2 - 1] + vals[count / 2]) as f64 / 2.0)
            };
            Summary {
                metric,
                count,
                min: vals.first().copied(),
                max: peak(rows, metric),
                mean,
                median,
                last,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32, hosp: i64) -> DailyAggregate {
        DailyAggregate {
            date: NaiveDate::from_ymd_opt(2020, 4, d).unwrap(),
            hosp,
            rea: 0,
            rad: 0,
            dc_cumul: 0,
            dc_non_cumul: 0,
        }
    }

    #[test]
    fn peak_prefers_first_occurrence() {
        let rows = vec![day(1, 3), day(2, 7), day(3, 7), day(4, 1)];
        let p = peak(&rows, Metric::Hosp).unwrap();
        assert_eq!(p.value, 7);
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2020, 4, 2).unwrap());
        assert!(peak(&[], Metric::Hosp).is_none());
    }

    #[test]
    fn summary_median_even_and_odd() {
        let rows = vec![day(1, 1), day(2, 2), day(3, 3), day(4, 4)];
        let s = &summarize(&rows)[0];
        assert_eq!(s.metric, Metric::Hosp);
        assert_eq!(s.count, 4);
        assert_eq!(s.min, Some(1));
        assert_eq!(s.last, Some(4));
        assert!((s.median.unwrap() - 2.5).abs() < 1e-9);

        let s = &summarize(&rows[..3])[0];
        assert_eq!(s.median, Some(2.0));
        assert_eq!(s.mean, Some(2.0));
    }
}
