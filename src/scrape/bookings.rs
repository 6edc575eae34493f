// src/scrape/bookings.rs

use std::error::Error;

use crate::config::consts::{PAGE, ROOM_USAGE};
use crate::core::html::{
    inner_after_open_tag, next_tag_block_ci, opener, slice_between_ci, strip_tags, to_lower,
};
use crate::core::net;
use crate::core::sanitize::normalize_entities;
use crate::data::DayMap;
use crate::grid::cells::{TeachingMask, interpret_cell};
use crate::grid::segment::{is_day_header, segment_days};
use crate::grid::shape::{align_day, compact_hours, transpose};
use crate::grid::{Row, WeekBits};

use super::terms::Term;

const PAYLOAD_DATE_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything one region's booking page yields: the per-day data plus
/// the room names and per-day start/end hours for the settings block.
#[derive(Debug)]
pub struct RegionBundle {
    pub data: DayMap,
    pub rooms: Vec<String>,
    pub starts: Vec<i32>,
    pub ends: Vec<i32>,
}

/// Request the page with the selected rooms' booking grid.
pub fn fetch(rooms: &[String], precincts: &[&str], term: &Term) -> Result<String, Box<dyn Error>> {
    let roomsuits = join!(ROOM_USAGE, "|", &precincts.join(","));
    let from_date = term.from_date.format(PAYLOAD_DATE_FMT).to_string();
    let to_date = term.to_date.format(PAYLOAD_DATE_FMT).to_string();
    let period = format!("{},{},{},{}", term.from_week, from_date, term.to_week, to_date);

    let mut fields: Vec<(&str, &str)> = vec![
        ("view", "View Selected Rooms"),
        ("check_cntrl", "on"),
        ("roomtype", "all"),
        ("roomsize", "all"),
        ("acadorg", "all"),
        ("building", "all"),
        ("roomsuits", &roomsuits),
        ("teachingperiod", &period),
        ("fr_week", &term.from_week),
        ("fr_date", &from_date),
        ("to_week", &term.to_week),
        ("to_date", &to_date),
    ];
    for room in rooms {
        fields.push(("rooms[]", room));
    }

    net::http_post_form(PAGE, &fields)
}

/// Parse a bookings page into one region's dataset.
///
/// The page carries (at least) two `grid`-class tables: the first holds
/// the teaching-week mask, the last is the booking grid itself.
pub fn parse_doc(doc: &str, halfhours: bool) -> Result<RegionBundle, Box<dyn Error>> {
    let tables = grid_tables(doc);
    if tables.len() < 2 {
        return Err(format!(
            "Expected mask and booking tables, found {} grid table(s)",
            tables.len()
        )
        .into());
    }
    let mask = read_teaching_mask(tables[0])?;
    let booking = tables[tables.len() - 1];

    let rows = read_rows(booking);
    let rooms = read_room_names(&rows)?;
    let mut days = segment_days(&rows)?;

    let mut data = DayMap::new();
    let mut starts = Vec::new();
    let mut ends = Vec::new();

    for (day, block) in days.iter_mut() {
        if block.is_empty() {
            logw!("Day {day:?} has a header but no time rows, skipping");
            continue;
        }
        let (start, end) = align_day(block)?;

        let grid: Vec<Vec<String>> = block.iter().map(|r| r.cells.clone()).collect();
        let columns = transpose(&grid)?;
        if columns.len() != rooms.len() {
            return Err(format!(
                "Day {day:?}: {} booking columns for {} rooms",
                columns.len(),
                rooms.len()
            )
            .into());
        }

        let mut per_room: Vec<Vec<WeekBits>> = Vec::with_capacity(columns.len());
        for col in &columns {
            let mut slots = Vec::with_capacity(col.len());
            for cell in col {
                slots.push(interpret_cell(cell, &mask)?);
            }
            per_room.push(compact_hours(slots, halfhours)?);
        }

        data.insert(day.clone(), per_room);
        starts.push(start);
        ends.push(end);
    }

    Ok(RegionBundle { data, rooms, starts, ends })
}

/* ---------------- helpers ---------------- */

fn grid_tables(doc: &str) -> Vec<&str> {
    let mut tables = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(doc, "<table", "</table>", pos) {
        let block = &doc[s..e];
        pos = e;
        let open = to_lower(opener(block));
        if open.contains(r#"class="grid""#) || open.contains("class=grid") {
            tables.push(block);
        }
    }
    tables
}

/// The mask is the last whitespace token of the mask table's first row,
/// e.g. "Teaching weeks: 1111111101111111".
fn read_teaching_mask(table: &str) -> Result<TeachingMask, Box<dyn Error>> {
    let row = slice_between_ci(table, "<tr", "</tr>").ok_or("Mask table has no rows")?;
    let text = strip_tags(normalize_entities(row));
    let bits = text.split_whitespace().last().ok_or("Mask table row is empty")?;
    TeachingMask::parse(bits)
}

/// Flatten the booking table's `<tr>`s: label text plus the raw inner
/// HTML of the booking cells. Cells keep their markup; week spans are
/// read later. The first and last `<td>` of each row (day/time label
/// and decorative filler) are peeled off here.
fn read_rows(table: &str) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut pos = 0usize;

    while let Some((tr_s, tr_e)) = next_tag_block_ci(table, "<tr", "</tr>", pos) {
        let tr = &table[tr_s..tr_e];
        pos = tr_e;

        let mut cells = Vec::new();
        let mut td_pos = 0usize;
        while let Some((td_s, td_e)) = next_tag_block_ci(tr, "<td", "</td>", td_pos) {
            cells.push(inner_after_open_tag(&tr[td_s..td_e]));
            td_pos = td_e;
        }
        if cells.is_empty() {
            continue;
        }

        let label = strip_tags(normalize_entities(&cells[0]));
        let cells = if cells.len() > 2 {
            cells[1..cells.len() - 1].to_vec()
        } else {
            Vec::new()
        };
        rows.push(Row { label, cells });
    }

    rows
}

/// Room names ride on the first day header row, one `<b>`-wrapped name
/// per booking cell.
fn read_room_names(rows: &[Row]) -> Result<Vec<String>, Box<dyn Error>> {
    let header = rows
        .iter()
        .find(|r| is_day_header(&r.label))
        .ok_or("Booking table has no day header row")?;

    let mut names = Vec::with_capacity(header.cells.len());
    for cell in &header.cells {
        let name = match next_tag_block_ci(cell, "<b>", "</b>", 0) {
            Some((s, e)) => strip_tags(normalize_entities(&cell[s..e])),
            None => strip_tags(normalize_entities(cell)),
        };
        names.push(name);
    }
    Ok(names)
}
