// src/data.rs
//
// The region dataset as the frontend consumes it: one JSON value per
// region, shaped as the positional triple [data, roomNames, settings].
// Day order and room order are contractual; rooms index into each
// day's outer list by position.

use chrono::{Datelike, Local};
use indexmap::IndexMap;
use serde::Serialize;

use crate::grid::WeekBits;
use crate::scrape::terms::Term;

/// Day label → per-room slot sequences, in first-seen day order.
pub type DayMap = IndexMap<String, Vec<Vec<WeekBits>>>;

/// The frontend's display settings, stamped at build time.
#[derive(Clone, Debug, Serialize)]
pub struct Settings {
    pub start: Vec<i32>,
    pub end: Vec<i32>,
    pub days: usize,
    pub halfhours: bool,
    pub sem: String,
    pub year: String,
    pub updated: String,
}

impl Settings {
    pub fn build(starts: &[i32], ends: &[i32], days: usize, halfhours: bool, term: &Term) -> Self {
        Settings {
            start: starts.to_vec(),
            end: ends.to_vec(),
            days,
            halfhours,
            sem: term.label.clone(),
            year: term.from_date.year().to_string(),
            updated: Local::now().format("%d/%m/%Y").to_string(),
        }
    }
}

/// Serializes as `[data, roomNames, settings]`.
#[derive(Clone, Debug, Serialize)]
pub struct RegionData(pub DayMap, pub Vec<String>, pub Settings);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn term() -> Term {
        Term {
            label: s!("T3"),
            from_week: s!("1"),
            from_date: NaiveDate::from_ymd_opt(2021, 9, 13)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
            to_week: s!("11"),
            to_date: NaiveDate::from_ymd_opt(2021, 11, 28)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
        }
    }

    #[test]
    fn settings_carry_term_metadata() {
        let s = Settings::build(&[9], &[21], 1, false, &term());
        assert_eq!(s.sem, "T3");
        assert_eq!(s.year, "2021");
        assert_eq!(s.start, vec![9]);
        assert_eq!(s.end, vec![21]);
        // dd/mm/yyyy
        assert_eq!(s.updated.len(), 10);
        assert_eq!(&s.updated[2..3], "/");
        assert_eq!(&s.updated[5..6], "/");
    }

    #[test]
    fn region_data_is_a_positional_triple() {
        let mut data = DayMap::new();
        data.insert(s!("mon"), vec![vec![65407], vec![4]]);
        data.insert(s!("tue"), vec![vec![0], vec![0]]);
        let settings = Settings::build(&[9, 9], &[10, 10], 2, false, &term());
        let region = RegionData(data, vec![s!("Room A"), s!("Room B")], settings);

        let v = serde_json::to_value(&region).unwrap();
        let arr = v.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0]["mon"][0][0], 65407);
        assert_eq!(arr[0]["mon"][1][0], 4);
        assert_eq!(arr[1][1], "Room B");
        assert_eq!(arr[2]["days"], 2);
        assert_eq!(arr[2]["sem"], "T3");

        // day order survives the round trip
        let json = serde_json::to_string(&region).unwrap();
        let mon = json.find(r#""mon""#).unwrap();
        let tue = json.find(r#""tue""#).unwrap();
        assert!(mon < tue);
    }
}
