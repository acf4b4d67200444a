//! Turn the raw feed into one national row per day.
//!
//! Steps:
//! 1. keep combined-sex rows (`sexe == 0`), dropping department and sex
//! 2. parse `jour` with [`DATE_FORMAT`]
//! 3. sum `hosp`, `rea`, `rad`, `dc` per date (ascending)
//! 4. `dc` becomes `dc_cumul`; `dc_non_cumul` is its first difference,
//!    the day before the first one counting as zero

use crate::api::{Client, Source};
use crate::config::{COMBINED_SEX, DATE_FORMAT, DELIMITER};
use crate::error::{LoadError, Result};
use crate::models::{DailyAggregate, RawRecord};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::collections::BTreeMap;
use std::io::Read;

#[derive(Debug, Default, Clone, Copy)]
struct Sums {
    hosp: i64,
    rea: i64,
    rad: i64,
    dc: i64,
}

/// Fetch the feed from `source` and aggregate it.
pub fn load(client: &Client, source: &Source) -> Result<Vec<DailyAggregate>> {
    let body = client.fetch_text(source)?;
    let out = parse_feed(body.as_bytes())?;
    info!(
        "aggregated {} days from {} to {}",
        out.len(),
        out[0].date,
        out[out.len() - 1].date
    );
    Ok(out)
}

/// Parse and aggregate a feed document.
///
/// Returns [`LoadError::Empty`] when no combined-sex row is present.
pub fn parse_feed<R: Read>(reader: R) -> Result<Vec<DailyAggregate>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut by_day: BTreeMap<NaiveDate, Sums> = BTreeMap::new();
    let (mut seen, mut kept) = (0usize, 0usize);
    for rec in rdr.deserialize::<RawRecord>() {
        let rec = rec?;
        seen += 1;
        if rec.sexe != COMBINED_SEX {
            continue;
        }
        kept += 1;
        let date = parse_day(&rec.jour)?;
        let s = by_day.entry(date).or_default();
        s.hosp += rec.hosp.unwrap_or(0);
        s.rea += rec.rea.unwrap_or(0);
        s.rad += rec.rad.unwrap_or(0);
        s.dc += rec.dc.unwrap_or(0);
    }
    debug!("{seen} rows read, {kept} combined-sex rows kept");

    if by_day.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(with_daily_deaths(by_day))
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|source| LoadError::Date {
        value: s.to_string(),
        format: DATE_FORMAT,
        source,
    })
}

fn with_daily_deaths(by_day: BTreeMap<NaiveDate, Sums>) -> Vec<DailyAggregate> {
    let mut prev_dc = 0i64;
    by_day
        .into_iter()
        .map(|(date, s)| {
            let row = DailyAggregate {
                date,
                hosp: s.hosp,
                rea: s.rea,
                rad: s.rad,
                dc_cumul: s.dc,
                dc_non_cumul: s.dc - prev_dc,
            };
            prev_dc = s.dc;
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "\
dep;sexe;jour;hosp;rea;rad;dc
01;0;2020-03-19;2;0;1;0
01;1;2020-03-19;1;0;1;0
02;0;2020-03-19;10;3;4;2
01;0;2020-03-18;1;0;0;0
02;0;2020-03-18;8;2;2;1
";

    #[test]
    fn groups_by_day_and_filters_sex() {
        let rows = parse_feed(FEED.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2020, 3, 18).unwrap());
        assert_eq!((rows[0].hosp, rows[0].rea, rows[0].rad), (9, 2, 2));
        assert_eq!((rows[1].hosp, rows[1].rea, rows[1].rad), (12, 3, 5));
    }

    #[test]
    fn first_day_keeps_its_cumulative_deaths() {
        let rows = parse_feed(FEED.as_bytes()).unwrap();
        assert_eq!(rows[0].dc_cumul, 1);
        assert_eq!(rows[0].dc_non_cumul, 1);
        assert_eq!(rows[1].dc_cumul, 2);
        assert_eq!(rows[1].dc_non_cumul, 1);
    }

    #[test]
    fn empty_cells_count_as_zero() {
        let feed = "dep;sexe;jour;hosp;rea;rad;dc\n01;0;2020-03-18;;1;;2\n";
        let rows = parse_feed(feed.as_bytes()).unwrap();
        assert_eq!(rows[0].hosp, 0);
        assert_eq!(rows[0].rea, 1);
        assert_eq!(rows[0].dc_cumul, 2);
    }

    #[test]
    fn bad_date_is_reported() {
        let feed = "dep;sexe;jour;hosp;rea;rad;dc\n01;0;18/03/2020;1;1;1;1\n";
        let err = parse_feed(feed.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Date { ref value, .. } if value == "18/03/2020"));
    }

    #[test]
    fn no_combined_rows_is_empty() {
        let feed = "dep;sexe;jour;hosp;rea;rad;dc\n01;1;2020-03-18;1;1;1;1\n";
        assert!(matches!(
            parse_feed(feed.as_bytes()).unwrap_err(),
            LoadError::Empty
        ));
    }
}
