// src/grid/segment.rs

use std::error::Error;

use indexmap::IndexMap;

use super::Row;

/// 24-hour time label as a half-hour float: "9:30" → "9.5", "10:00" → "10".
pub fn normalize_time(label: &str) -> String {
    label.trim().replace(":30", ".5").replace(":00", "")
}

pub fn parse_hour(label: &str) -> Result<f64, Box<dyn Error>> {
    normalize_time(label)
        .parse::<f64>()
        .map_err(|_| format!("Bad time label: {:?}", label).into())
}

/// Day header rows open a new day block; anything starting with a digit
/// is a time row inside the current block.
pub fn is_day_header(label: &str) -> bool {
    normalize_time(label)
        .chars()
        .next()
        .is_some_and(|c| !c.is_ascii_digit())
}

/// Split a table's rows into per-day blocks, keyed by lower-cased day
/// label, in first-seen header order.
///
/// A repeated day header is a site anomaly: warn and restart that day's
/// block. The day keeps its original position, the later rows win.
pub fn segment_days(rows: &[Row]) -> Result<IndexMap<String, Vec<Row>>, Box<dyn Error>> {
    let mut days: IndexMap<String, Vec<Row>> = IndexMap::new();
    let mut current: Option<String> = None;

    for row in rows {
        let label = row.label.trim();
        if label.is_empty() {
            return Err("Booking row with empty label cell".into());
        }

        if is_day_header(label) {
            let day = label.to_lowercase();
            if days.contains_key(&day) {
                logw!("Duplicate day header {day:?}, dropping its earlier rows");
            }
            days.insert(day.clone(), Vec::new());
            current = Some(day);
            continue;
        }

        let Some(day) = current.as_ref() else {
            return Err(format!("Time row {:?} before any day header", label).into());
        };
        if let Some(block) = days.get_mut(day) {
            block.push(row.clone());
        }
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, cells: &[&str]) -> Row {
        Row {
            label: s!(label),
            cells: cells.iter().map(|c| s!(*c)).collect(),
        }
    }

    #[test]
    fn time_labels_normalize() {
        assert_eq!(normalize_time("9:30"), "9.5");
        assert_eq!(normalize_time("10:00"), "10");
        assert_eq!(normalize_time(" 14:30 "), "14.5");
    }

    #[test]
    fn hours_parse_as_floats() {
        assert_eq!(parse_hour("9:30").unwrap(), 9.5);
        assert_eq!(parse_hour("09:00").unwrap(), 9.0);
        assert!(parse_hour("lunch:00").is_err());
    }

    #[test]
    fn headers_vs_time_rows() {
        assert!(is_day_header("Mon"));
        assert!(is_day_header(" Tue "));
        assert!(!is_day_header("9:30"));
        assert!(!is_day_header("10:00"));
    }

    #[test]
    fn blocks_keep_header_order() {
        let rows = vec![
            row("Mon", &["a"]),
            row("9:00", &["x"]),
            row("9:30", &["y"]),
            row("Tue", &["a"]),
            row("10:00", &["z"]),
        ];
        let days = segment_days(&rows).unwrap();
        let keys: Vec<&str> = days.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["mon", "tue"]);
        assert_eq!(days["mon"].len(), 2);
        assert_eq!(days["tue"].len(), 1);
    }

    #[test]
    fn duplicate_header_restarts_block_in_place() {
        let rows = vec![
            row("Mon", &[]),
            row("9:00", &["early"]),
            row("Tue", &[]),
            row("10:00", &["t"]),
            row("Mon", &[]),
            row("11:00", &["late"]),
        ];
        let days = segment_days(&rows).unwrap();
        let keys: Vec<&str> = days.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["mon", "tue"]);
        assert_eq!(days["mon"], vec![row("11:00", &["late"])]);
        assert_eq!(days["tue"], vec![row("10:00", &["t"])]);
    }

    #[test]
    fn time_row_before_header_is_fatal() {
        let rows = vec![row("9:00", &["x"])];
        let err = segment_days(&rows).unwrap_err().to_string();
        assert!(err.contains("before any day header"));
    }

    #[test]
    fn empty_label_is_fatal() {
        let rows = vec![row("Mon", &[]), row("  ", &["x"])];
        assert!(segment_days(&rows).is_err());
    }
}
