// src/grid/cells.rs

use std::error::Error;

use crate::core::html::{attr_in_opener, next_tag_block_ci, opener, strip_tags};
use crate::core::sanitize::normalize_entities;

use super::WeekBits;

/// The term's teaching-week mask, one '0'/'1' digit per week with
/// exactly one '0' for the mid-semester break.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeachingMask {
    bits: String,
    break_ix: usize,
    full: WeekBits,
}

impl TeachingMask {
    pub fn parse(s: &str) -> Result<Self, Box<dyn Error>> {
        let bits = s.trim().to_string();
        if bits.is_empty() {
            return Err("Empty teaching mask".into());
        }
        if let Some(c) = bits.chars().find(|c| *c != '0' && *c != '1') {
            return Err(format!("Teaching mask has a non-binary digit {:?}: {}", c, bits).into());
        }
        let zeros: Vec<usize> = bits
            .char_indices()
            .filter(|(_, c)| *c == '0')
            .map(|(i, _)| i)
            .collect();
        if zeros.len() != 1 {
            return Err(format!(
                "Teaching mask needs exactly one break week, found {}: {}",
                zeros.len(),
                bits
            )
            .into());
        }
        let full = WeekBits::from_str_radix(&bits, 2)
            .map_err(|_| format!("Teaching mask too long: {} weeks", bits.len()))?;
        Ok(TeachingMask { break_ix: zeros[0], bits, full })
    }

    pub fn as_str(&self) -> &str {
        &self.bits
    }

    /// Digit position of the break week.
    pub fn break_index(&self) -> usize {
        self.break_ix
    }

    /// The mask digits read as one binary number; the value a cell that
    /// is booked for the whole term gets.
    pub fn full_term(&self) -> WeekBits {
        self.full
    }
}

/// Read one booking cell into a week bitmask.
///
/// Visibly empty cells are free all term. A booked cell without week
/// annotations counts for every teaching week. Otherwise each `<span
/// title="...">` carries a per-week digit string: digits at break-week
/// positions are excised against the mask, the rest are reversed and
/// read as binary, and all spans are OR'd together.
pub fn interpret_cell(cell: &str, mask: &TeachingMask) -> Result<WeekBits, Box<dyn Error>> {
    let text = strip_tags(normalize_entities(cell));
    if text.is_empty() {
        return Ok(0);
    }

    let mut weeks: Option<WeekBits> = None;
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(cell, "<span", "</span>", pos) {
        let block = &cell[s..e];
        pos = e;
        // Spans without a title are decoration, not week annotations
        let Some(title) = attr_in_opener(opener(block), "title") else {
            continue;
        };
        *weeks.get_or_insert(0) |= span_weeks(&title, mask)?;
    }

    match weeks {
        Some(w) => Ok(w),
        None => Ok(mask.full_term()),
    }
}

/// Keep the title digits that line up with teaching weeks in the mask,
/// reverse them, read as binary.
fn span_weeks(title: &str, mask: &TeachingMask) -> Result<WeekBits, Box<dyn Error>> {
    let kept: String = title
        .chars()
        .zip(mask.as_str().chars())
        .filter(|(_, m)| *m == '1')
        .map(|(t, _)| t)
        .collect();
    let reversed: String = kept.chars().rev().collect();
    WeekBits::from_str_radix(&reversed, 2)
        .map_err(|_| format!("Bad week pattern in booking cell: {:?}", title).into())
}
