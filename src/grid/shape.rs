// src/grid/shape.rs

use std::error::Error;

use super::Row;
use super::WeekBits;
use super::segment::parse_hour;

/// Align a day block to hour boundaries and report its `(start, end)`
/// hours.
///
/// When the day starts on a half hour the site omits the leading
/// half-hour row, which would shift every later slot by one. The first
/// row is duplicated so that pairing stays aligned; the duplicate ORs
/// to the same value as the real row when hours are compacted.
pub fn align_day(rows: &mut Vec<Row>) -> Result<(i32, i32), Box<dyn Error>> {
    if rows.is_empty() {
        return Err("Day block has no time rows".into());
    }
    let start = parse_hour(&rows[0].label)?;
    let end = parse_hour(&rows[rows.len() - 1].label)?;

    if start.fract() != 0.0 {
        let dup = rows[0].clone();
        rows.insert(0, dup);
    }

    Ok((start.floor() as i32, end.ceil() as i32))
}

/// Row-major to column-major. Time rows come in as rows of room cells;
/// the output groups each room's cells in time order. Ragged input
/// means the table shape is broken.
pub fn transpose<T: Clone>(rows: &[Vec<T>]) -> Result<Vec<Vec<T>>, Box<dyn Error>> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let width = first.len();
    let mut out: Vec<Vec<T>> = (0..width).map(|_| Vec::with_capacity(rows.len())).collect();

    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(format!(
                "Ragged booking grid: row {} has {} cells, expected {}",
                i,
                row.len(),
                width
            )
            .into());
        }
        for (j, cell) in row.iter().enumerate() {
            out[j].push(cell.clone());
        }
    }

    Ok(out)
}

/// OR half-hour slot pairs down to whole hours, unless half-hour
/// retention is on.
pub fn compact_hours(slots: Vec<WeekBits>, halfhours: bool) -> Result<Vec<WeekBits>, Box<dyn Error>> {
    if halfhours {
        return Ok(slots);
    }
    if slots.len() % 2 != 0 {
        return Err(format!("Odd slot count {} cannot pair into hours", slots.len()).into());
    }
    Ok(slots.chunks(2).map(|pair| pair[0] | pair[1]).collect())
}
