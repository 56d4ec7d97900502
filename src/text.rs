//! Word-form normalization
//!
//! Derived surface forms stored on every node: lowercase, simplified,
//! undigitized, and the character-class shape used as a feature value.

/// Placeholder form for hyperlinks
pub const URL_FORM: &str = "#url#";

/// Longest run of one character class kept by [`word_shape`]
pub const SHAPE_MAX_REPEAT: usize = 2;

const BRACKETS: [(&str, &str); 6] = [
    ("-LRB-", "("),
    ("-RRB-", ")"),
    ("-LSB-", "["),
    ("-RSB-", "]"),
    ("-LCB-", "{"),
    ("-RCB-", "}"),
];

const URL_PREFIXES: [&str; 5] = ["http://", "https://", "ftp://", "sftp://", "www."];

#[inline]
pub fn to_lowercase(s: &str) -> String {
    s.to_lowercase()
}

/// Simplified form: hyperlinks collapse to [`URL_FORM`], treebank bracket
/// tokens revert to the bracket itself, runs of a repeated punctuation mark
/// are capped at two, and numbers are undigitized.
pub fn to_simplified_form(s: &str) -> String {
    if is_hyperlink(s) {
        return URL_FORM.to_string();
    }

    let s = revert_bracket(s);
    to_undigitized_form(&collapse_punctuation(s))
}

/// Replace every number (digits, optionally joined by single `.` or `,`
/// between digits) with `0`.
pub fn to_undigitized_form(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        // consume the whole number
        while i < chars.len() {
            if chars[i].is_ascii_digit() {
                i += 1;
            } else if matches!(chars[i], '.' | ',')
                && i + 1 < chars.len()
                && chars[i + 1].is_ascii_digit()
            {
                i += 1;
            } else {
                break;
            }
        }
        out.push('0');
    }

    out
}

/// Character-class rendering: uppercase `A`, lowercase `a`, digit `1`, any
/// other character kept as is; runs of one class longer than `max_repeat`
/// are truncated.
pub fn word_shape(s: &str, max_repeat: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    let mut run = 0;

    for c in s.chars() {
        let class = if c.is_uppercase() {
            'A'
        } else if c.is_lowercase() {
            'a'
        } else if c.is_ascii_digit() {
            '1'
        } else {
            c
        };

        if prev == Some(class) {
            run += 1;
        } else {
            prev = Some(class);
            run = 1;
        }

        if run <= max_repeat {
            out.push(class);
        }
    }

    out
}

fn is_hyperlink(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    URL_PREFIXES.iter().any(|p| lower.starts_with(p) && lower.len() > p.len())
}

fn revert_bracket(s: &str) -> &str {
    BRACKETS
        .iter()
        .find(|(tag, _)| *tag == s)
        .map_or(s, |(_, bracket)| bracket)
}

fn collapse_punctuation(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    let mut run = 0;

    for c in s.chars() {
        if c.is_ascii_punctuation() && prev == Some(c) {
            run += 1;
            if run > 2 {
                continue;
            }
        } else {
            run = 1;
        }
        prev = Some(c);
        out.push(c);
    }

    out
}
