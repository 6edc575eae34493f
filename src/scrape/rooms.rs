// src/scrape/rooms.rs

use std::error::Error;

use crate::config::consts::{PAGE, ROOM_USAGE};
use crate::core::html::{attr_in_opener, to_lower};
use crate::core::net;

/// Search for every tutorial/seminar room in the given precincts and
/// return their ids, in page order.
pub fn fetch(precincts: &[&str]) -> Result<Vec<String>, Box<dyn Error>> {
    let mut fields: Vec<(&str, &str)> = vec![("RU[]", ROOM_USAGE)];
    for p in precincts {
        fields.push(("PR[]", p));
    }
    fields.push(("roomsize", "all"));
    fields.push(("building", "all"));
    fields.push(("search_rooms", "Search"));

    let doc = net::http_post_form(PAGE, &fields)?;
    Ok(parse_doc(&doc))
}

/// Room ids live in the values of the `rooms[]` checkboxes. `<input>`
/// is a void tag, so only openers are scanned.
pub fn parse_doc(doc: &str) -> Vec<String> {
    let lc = to_lower(doc);
    let mut ids = Vec::new();
    let mut pos = 0usize;

    while let Some(i) = lc[pos..].find("<input") {
        let start = pos + i;
        let Some(gt) = doc[start..].find('>') else { break };
        let end = start + gt + 1;
        pos = end;

        let tag = &doc[start..end];
        let tag_lc = &lc[start..end];
        let is_checkbox =
            tag_lc.contains(r#"type="checkbox""#) || tag_lc.contains("type=checkbox");
        let is_rooms =
            tag_lc.contains(r#"name="rooms[]""#) || tag_lc.contains("name=rooms[]");
        if !(is_checkbox && is_rooms) {
            continue;
        }

        if let Some(v) = attr_in_opener(tag, "value") {
            ids.push(v);
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_values_in_page_order() {
        let doc = r#"
            <input type="hidden" name="campus" value="KENS">
            <td><input type="checkbox" name="rooms[]" value="K-E4-1001"> Colombo 1001</td>
            <td><input type=checkbox name=rooms[] value=K-G6-113> Quad 113</td>
            <td><input type="checkbox" name="other[]" value="IGNORED"></td>
        "#;
        assert_eq!(parse_doc(doc), vec!["K-E4-1001", "K-G6-113"]);
    }

    #[test]
    fn no_rooms_no_ids() {
        assert!(parse_doc("<html><body>No rooms match</body></html>").is_empty());
    }
}
