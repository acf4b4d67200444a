use crate::models::DailyAggregate;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save the daily aggregate as CSV with header
/// (`date,hosp,rea,rad,dc_cumul,dc_non_cumul`).
pub fn save_csv<P: AsRef<Path>>(rows: &[DailyAggregate], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the daily aggregate as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rows: &[DailyAggregate], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let rows = vec![DailyAggregate {
            date: NaiveDate::from_ymd_opt(2020, 3, 18).unwrap(),
            hosp: 2972,
            rea: 771,
            rad: 816,
            dc_cumul: 218,
            dc_non_cumul: 218,
        }];
        save_csv(&rows, &csvp).unwrap();
        save_json(&rows, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }
}
