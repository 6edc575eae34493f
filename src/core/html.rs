// src/core/html.rs
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let open = to_lower(open_pat);
    let close = to_lower(close_pat);
    let o = lc.find(&open)?;
    let after = s[o..].find('>')? + o + 1;
    let cr = lc[after..].find(&close)?;
    Some(&s[after..after + cr])
}
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// The opening tag of `block`, including the trailing `>`.
pub fn opener(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..i + 1],
        None => block,
    }
}

/// Value of attribute `name` inside an opening tag. Handles double-quoted,
/// single-quoted and bare values. Case-insensitive on the attribute name.
pub fn attr_in_opener(opener: &str, name: &str) -> Option<String> {
    let lc = to_lower(opener);
    let pat = join!(&to_lower(name), "=");

    // Skip matches glued to a longer attribute name (e.g. data-title=)
    let mut from = 0usize;
    let i = loop {
        let i = lc[from..].find(&pat)? + from;
        let boundary = i == 0 || {
            let prev = lc.as_bytes()[i - 1];
            !prev.is_ascii_alphanumeric() && prev != b'-' && prev != b'_'
        };
        if boundary {
            break i;
        }
        from = i + pat.len();
    };

    let rest = &opener[i + pat.len()..];
    match rest.chars().next()? {
        q @ ('"' | '\'') => {
            let rest = &rest[1..];
            let end = rest.find(q)?;
            Some(rest[..end].to_string())
        }
        _ => {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(rest.len());
            Some(rest[..end].to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_in_opener_quoted_and_bare() {
        let tag = r#"<input type="checkbox" name='rooms[]' value=K-G6-113>"#;
        assert_eq!(attr_in_opener(tag, "type").as_deref(), Some("checkbox"));
        assert_eq!(attr_in_opener(tag, "name").as_deref(), Some("rooms[]"));
        assert_eq!(attr_in_opener(tag, "value").as_deref(), Some("K-G6-113"));
    }

    #[test]
    fn attr_in_opener_skips_longer_names() {
        let tag = r#"<span data-title="nope" title="0010">x</span>"#;
        assert_eq!(attr_in_opener(opener(tag), "title").as_deref(), Some("0010"));
    }

    #[test]
    fn attr_in_opener_missing() {
        assert_eq!(attr_in_opener("<span class=x>", "title"), None);
        assert_eq!(attr_in_opener("<span title=", "title"), None);
    }

    #[test]
    fn opener_cuts_at_first_gt() {
        assert_eq!(opener("<td class=a>inner</td>"), "<td class=a>");
    }

    #[test]
    fn next_tag_block_exact_b() {
        // "<b>" must not match "<br>"
        let s = "a<br><b>Room</b>rest";
        let (bs, be) = next_tag_block_ci(s, "<b>", "</b>", 0).unwrap();
        assert_eq!(&s[bs..be], "<b>Room</b>");
    }
}
