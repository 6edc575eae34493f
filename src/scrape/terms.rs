// src/scrape/terms.rs

use std::error::Error;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::config::consts::PAGE;
use crate::core::html::{attr_in_opener, inner_after_open_tag, next_tag_block_ci, opener,
    strip_tags, to_lower};
use crate::core::net;
use crate::core::sanitize::normalize_entities;

/// One teaching period as the page offers it. Week numbers stay raw
/// strings; they go straight back into the booking request.
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub label: String,
    pub from_week: String,
    pub from_date: NaiveDateTime,
    pub to_week: String,
    pub to_date: NaiveDateTime,
}

pub fn fetch() -> Result<String, Box<dyn Error>> {
    net::http_get(PAGE)
}

/// Read the teaching periods out of the `teachingperiod` select box.
/// Option text ends with the term label; the option value packs
/// `from_week,from_date,to_week,to_date`.
pub fn parse_doc(doc: &str) -> Result<Vec<Term>, Box<dyn Error>> {
    let select = find_period_select(doc).ok_or("teachingperiod select not found")?;

    let mut terms = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(select, "<option", "</option>", pos) {
        let block = &select[s..e];
        pos = e;

        let value = attr_in_opener(opener(block), "value")
            .ok_or("teachingperiod option without a value")?;
        let text = strip_tags(normalize_entities(&inner_after_open_tag(block)));
        let label = text
            .split_whitespace()
            .last()
            .ok_or("teachingperiod option without a label")?;

        terms.push(parse_term(label, &value)?);
    }

    if terms.is_empty() {
        return Err("No teaching periods listed".into());
    }
    Ok(terms)
}

/// Pick the term to scrape: an explicit label override if given, else
/// the latest term already under way, else the earliest upcoming one.
pub fn current<'a>(terms: &'a [Term], wanted: Option<&str>) -> Result<&'a Term, Box<dyn Error>> {
    if let Some(w) = wanted {
        return terms
            .iter()
            .find(|t| t.label.eq_ignore_ascii_case(w))
            .ok_or_else(|| {
                let offered: Vec<&str> = terms.iter().map(|t| t.label.as_str()).collect();
                format!("Term {} not offered (page lists: {})", w, offered.join(", ")).into()
            });
    }

    let now = Local::now().naive_local();
    if let Some(t) = terms
        .iter()
        .filter(|t| t.from_date <= now)
        .max_by_key(|t| t.from_date)
    {
        return Ok(t);
    }
    terms
        .iter()
        .min_by_key(|t| t.from_date)
        .ok_or_else(|| "No teaching periods listed".into())
}

/* ---------------- helpers ---------------- */

fn find_period_select(doc: &str) -> Option<&str> {
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(doc, "<select", "</select>", pos) {
        let block = &doc[s..e];
        pos = e;
        let open = to_lower(opener(block));
        if open.contains(r#"id="teachingperiod""#) || open.contains("id=teachingperiod") {
            return Some(block);
        }
    }
    None
}

fn parse_term(label: &str, value: &str) -> Result<Term, Box<dyn Error>> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 4 {
        return Err(format!(
            "Teaching period {} has {} fields, expected 4: {:?}",
            label,
            parts.len(),
            value
        )
        .into());
    }
    Ok(Term {
        label: s!(label),
        from_week: s!(parts[0].trim()),
        from_date: parse_when(parts[1])?,
        to_week: s!(parts[2].trim()),
        to_date: parse_when(parts[3])?,
    })
}

/// The DBA export is loose about datetime shape; accept the forms seen
/// in the wild.
fn parse_when(s: &str) -> Result<NaiveDateTime, Box<dyn Error>> {
    let t = s.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Ok(dt);
        }
    }
    for fmt in ["%d-%b-%Y", "%d-%b-%y", "%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt);
            }
        }
    }
    Err(format!("Bad teaching period date: {:?}", s).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const DOC: &str = r#"
        <form method="post">
          <select name="teachingperiod" id="teachingperiod">
            <option value="1,2021-02-15 00:00:00,11,2021-05-02 00:00:00">Teaching Period T1</option>
            <option value="1,2021-05-31 00:00:00,11,2021-08-15 00:00:00">Teaching Period T2</option>
            <option value="1,2021-09-13 00:00:00,11,2021-11-28 00:00:00">Teaching Period T3</option>
          </select>
        </form>
    "#;

    fn term_at(label: &str, from: NaiveDateTime) -> Term {
        Term {
            label: s!(label),
            from_week: s!("1"),
            from_date: from,
            to_week: s!("11"),
            to_date: from + Duration::weeks(11),
        }
    }

    #[test]
    fn periods_parse_from_select() {
        let terms = parse_doc(DOC).unwrap();
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0].label, "T1");
        assert_eq!(terms[2].label, "T3");
        assert_eq!(terms[1].from_week, "1");
        assert_eq!(terms[1].to_week, "11");
        assert_eq!(
            terms[1].from_date,
            NaiveDate::from_ymd_opt(2021, 5, 31)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap()
        );
    }

    #[test]
    fn other_selects_are_ignored() {
        let doc = join!(r#"<select id="campus"><option value="KENS">Kensington</option></select>"#, DOC);
        let terms = parse_doc(&doc).unwrap();
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn missing_select_is_an_error() {
        assert!(parse_doc("<html></html>").is_err());
    }

    #[test]
    fn short_option_value_is_an_error() {
        let doc = r#"
            <select id="teachingperiod">
              <option value="1,2021-02-15">Teaching Period T1</option>
            </select>
        "#;
        let err = parse_doc(doc).unwrap_err().to_string();
        assert!(err.contains("expected 4"));
    }

    #[test]
    fn date_shapes_accepted() {
        assert!(parse_when("2021-09-13 00:00:00").is_ok());
        assert!(parse_when("2021-09-13").is_ok());
        assert!(parse_when("13-SEP-2021").is_ok());
        assert!(parse_when("13/09/2021").is_ok());
        assert!(parse_when("September 13").is_err());
    }

    #[test]
    fn override_picks_named_term() {
        let terms = parse_doc(DOC).unwrap();
        assert_eq!(current(&terms, Some("t2")).unwrap().label, "T2");
        assert!(current(&terms, Some("T9")).is_err());
    }

    #[test]
    fn latest_started_term_wins() {
        let now = Local::now().naive_local();
        let terms = vec![
            term_at("T1", now - Duration::weeks(30)),
            term_at("T2", now - Duration::weeks(2)),
            term_at("T3", now + Duration::weeks(10)),
        ];
        assert_eq!(current(&terms, None).unwrap().label, "T2");
    }

    #[test]
    fn earliest_upcoming_term_as_fallback() {
        let now = Local::now().naive_local();
        let terms = vec![
            term_at("T2", now + Duration::weeks(12)),
            term_at("T1", now + Duration::weeks(2)),
        ];
        assert_eq!(current(&terms, None).unwrap().label, "T1");
    }

    #[test]
    fn no_terms_is_an_error() {
        assert!(current(&[], None).is_err());
    }
}
