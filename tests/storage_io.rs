use chrono::NaiveDate;
use covid_hospi::models::DailyAggregate;
use covid_hospi::storage;
use std::fs;
use tempfile::tempdir;

fn sample(n: usize) -> Vec<DailyAggregate> {
    let start = NaiveDate::from_ymd_opt(2020, 3, 18).unwrap();
    (0..n)
        .map(|i| DailyAggregate {
            date: start + chrono::Duration::days(i as i64),
            hosp: 1000 + i as i64,
            rea: 200 + i as i64,
            rad: 50 * i as i64,
            dc_cumul: 10 * i as i64,
            dc_non_cumul: if i == 0 { 0 } else { 10 },
        })
        .collect()
}

#[test]
fn save_csv_and_json() {
    let rows = sample(3);
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("days.csv");
    storage::save_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("date,hosp,rea,rad,dc_cumul,dc_non_cumul"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());
    assert!(csv_txt.lines().nth(1).unwrap().starts_with("2020-03-18,1000,200,"));

    let json_path = dir.path().join("days.json");
    storage::save_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(v.as_array().unwrap().len(), rows.len());
    assert_eq!(v[2]["date"], "2020-03-20");
    assert_eq!(v[2]["dc_cumul"], 20);
}

#[test]
fn exported_csv_reads_back() {
    let rows = sample(4);
    let dir = tempdir().unwrap();
    let path = dir.path().join("back.csv");
    storage::save_csv(&rows, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let back: Vec<DailyAggregate> = rdr.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(back, rows);
}
