use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw row of the feed: one (day, department, sex) triple.
///
/// Column names are the feed's own. Empty numeric cells deserialize to `None`
/// and count as zero when summed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    pub dep: String,
    pub sexe: u8,
    pub jour: String,
    pub hosp: Option<i64>,
    pub rea: Option<i64>,
    pub rad: Option<i64>,
    pub dc: Option<i64>,
}

/// National totals for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Patients currently hospitalized.
    pub hosp: i64,
    /// Patients currently in resuscitation / intensive care.
    pub rea: i64,
    /// Cumulative discharges.
    pub rad: i64,
    /// Cumulative deaths in hospital.
    pub dc_cumul: i64,
    /// Deaths on that day (first difference of `dc_cumul`).
    pub dc_non_cumul: i64,
}

impl DailyAggregate {
    pub fn value(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Hosp => self.hosp,
            Metric::Rea => self.rea,
            Metric::Rad => self.rad,
            Metric::DcCumul => self.dc_cumul,
            Metric::DcNonCumul => self.dc_non_cumul,
        }
    }
}

/// The five plottable series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    Hosp,
    Rea,
    Rad,
    DcCumul,
    DcNonCumul,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Hosp,
        Metric::Rea,
        Metric::Rad,
        Metric::DcCumul,
        Metric::DcNonCumul,
    ];

    /// Series drawn against the left (case count) axis.
    pub const PRIMARY: [Metric; 4] = [Metric::Hosp, Metric::Rea, Metric::Rad, Metric::DcCumul];

    /// Column name in the aggregate table.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Hosp => "hosp",
            Metric::Rea => "rea",
            Metric::Rad => "rad",
            Metric::DcCumul => "dc_cumul",
            Metric::DcNonCumul => "dc_non_cumul",
        }
    }

    /// Human-readable (French) label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Hosp => "Patients hospitalisés",
            Metric::Rea => "Personnes en réanimation",
            Metric::Rad => "Retours à domicile",
            Metric::DcCumul => "Nombre cumulé de personnes décédées",
            Metric::DcNonCumul => "Nombre de décès par jour",
        }
    }

    pub fn is_primary(self) -> bool {
        !matches!(self, Metric::DcNonCumul)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Which series to draw. Any combination is valid, including none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSelection {
    pub hosp: bool,
    pub rea: bool,
    pub rad: bool,
    pub dc_cumul: bool,
    pub dc_non_cumul: bool,
}

impl SeriesSelection {
    pub const NONE: SeriesSelection = SeriesSelection {
        hosp: false,
        rea: false,
        rad: false,
        dc_cumul: false,
        dc_non_cumul: false,
    };

    pub fn is_selected(&self, metric: Metric) -> bool {
        match metric {
            Metric::Hosp => self.hosp,
            Metric::Rea => self.rea,
            Metric::Rad => self.rad,
            Metric::DcCumul => self.dc_cumul,
            Metric::DcNonCumul => self.dc_non_cumul,
        }
    }

    pub fn set(&mut self, metric: Metric, on: bool) {
        let flag = match metric {
            Metric::Hosp => &mut self.hosp,
            Metric::Rea => &mut self.rea,
            Metric::Rad => &mut self.rad,
            Metric::DcCumul => &mut self.dc_cumul,
            Metric::DcNonCumul => &mut self.dc_non_cumul,
        };
        *flag = on;
    }

    /// True when at least one left-axis series is selected.
    pub fn any_primary(&self) -> bool {
        Metric::PRIMARY.iter().any(|m| self.is_selected(*m))
    }

    /// True when all four left-axis series are selected.
    pub fn all_primary(&self) -> bool {
        Metric::PRIMARY.iter().all(|m| self.is_selected(*m))
    }

    /// Selected metrics in drawing order.
    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL.into_iter().filter(|m| self.is_selected(*m))
    }
}

impl Default for SeriesSelection {
    fn default() -> Self {
        Self {
            hosp: true,
            rea: true,
            rad: false,
            dc_cumul: false,
            dc_non_cumul: true,
        }
    }
}
