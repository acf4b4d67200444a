//! National lockdown and curfew periods drawn along the time axis.

use chrono::NaiveDate;

const fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// Where a period ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodEnd {
    On(NaiveDate),
    /// Still ongoing: ends at the last observed day.
    LastObservation,
}

/// Which side of the baseline the label sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedPeriod {
    pub label: &'static str,
    pub start: NaiveDate,
    pub end: PeriodEnd,
    /// Day the label is centred on.
    pub label_at: NaiveDate,
    pub side: LabelSide,
}

pub const PERIODS: [NamedPeriod; 3] = [
    NamedPeriod {
        label: "Confinement 1",
        start: ymd(2020, 3, 18),
        end: PeriodEnd::On(ymd(2020, 5, 10)),
        label_at: ymd(2020, 4, 13),
        side: LabelSide::Above,
    },
    NamedPeriod {
        label: "Couvre feu",
        start: ymd(2020, 10, 17),
        end: PeriodEnd::On(ymd(2020, 10, 29)),
        label_at: ymd(2020, 10, 23),
        side: LabelSide::Below,
    },
    NamedPeriod {
        label: "Confinement 2",
        start: ymd(2020, 10, 29),
        end: PeriodEnd::LastObservation,
        label_at: ymd(2020, 11, 5),
        side: LabelSide::Above,
    },
];

/// A period with its end date pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub label: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label_at: NaiveDate,
    pub side: LabelSide,
}

impl NamedPeriod {
    pub fn resolve(&self, last_observed: NaiveDate) -> Marker {
        Marker {
            label: self.label,
            start: self.start,
            end: match self.end {
                PeriodEnd::On(d) => d,
                PeriodEnd::LastObservation => last_observed,
            },
            label_at: self.label_at,
            side: self.side,
        }
    }
}

/// All markers, given the last day of data.
pub fn markers(last_observed: NaiveDate) -> Vec<Marker> {
    PERIODS.iter().map(|p| p.resolve(last_observed)).collect()
}
