// src/parser/text.rs
use regex::Regex;

/// Trims a string and collapses every internal whitespace run to a single space.
pub fn clean_string(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Flattens a paragraph the way the published standard's prose is compared:
/// embedded newlines are removed outright (not turned into spaces), runs of
/// spaces collapse to one, and the ends are trimmed.
pub fn normalize_paragraph(s: &str) -> String {
    let no_newlines = s.replace('\n', "");
    let mut out = String::with_capacity(no_newlines.len());
    let mut prev_space = false;
    for ch in no_newlines.chars() {
        if ch == ' ' {
            if !prev_space {
                out.push(ch);
            }
            prev_space = true;
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Splits a string at the first match of `re`, returning the text before and
/// after the match. If the pattern never matches, the whole input is returned
/// as the first half and the second half is empty; this never fails.
pub fn split_once_at<'a>(s: &'a str, re: &Regex) -> (&'a str, &'a str) {
    match re.find(s) {
        Some(m) => (&s[..m.start()], &s[m.end()..]),
        None => (s, ""),
    }
}
