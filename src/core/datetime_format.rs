use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use smallvec::SmallVec;

use super::CellValue;

/// Format used for plotted (machine) date/time values.
pub const MACHINE_DATE_TIME_FORMAT: &str = "YYYY-MM-DD HH:mm:ss";

/// Default user-facing date/time format.
pub const DEFAULT_DISPLAY_DATE_TIME_FORMAT: &str = "DD/MM/YYYY HH:mm";

const NAIVE_TEXT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternPiece {
    Item(&'static str),
    Literal(String),
}

/// Date/time pattern written with moment-style tokens (`YYYY-MM-DD HH:mm`).
///
/// The pattern is compiled once into a chrono strftime string; characters that
/// are not tokens are copied verbatim, and `[...]` escapes literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimePattern {
    strftime: String,
}

impl DateTimePattern {
    #[must_use]
    pub fn compile(pattern: &str) -> Self {
        let pieces = tokenize(pattern);
        let mut strftime = String::with_capacity(pattern.len() * 2);
        for piece in pieces {
            match piece {
                PatternPiece::Item(item) => strftime.push_str(item),
                PatternPiece::Literal(text) => {
                    for ch in text.chars() {
                        if ch == '%' {
                            strftime.push_str("%%");
                        } else {
                            strftime.push(ch);
                        }
                    }
                }
            }
        }
        Self { strftime }
    }

    #[must_use]
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Renders `instant`; an item chrono rejects yields an empty string.
    #[must_use]
    pub fn format(&self, instant: DateTime<Utc>) -> String {
        let mut out = String::new();
        if write!(out, "{}", instant.format(&self.strftime)).is_err() {
            out.clear();
        }
        out
    }
}

// Longest tokens first so `MMMM` wins over `MM`.
const TOKENS: [(&str, &str); 22] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("SSS", "%3f"),
    ("A", "%p"),
    ("a", "%P"),
    ("ZZ", "%z"),
];

fn tokenize(pattern: &str) -> SmallVec<[PatternPiece; 16]> {
    let mut pieces: SmallVec<[PatternPiece; 16]> = SmallVec::new();
    let mut rest = pattern;
    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            if let Some(close) = rest.find(']') {
                push_literal(&mut pieces, &rest[1..close]);
                rest = &rest[close + 1..];
                continue;
            }
        }
        if let Some((token, item)) = TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
            pieces.push(PatternPiece::Item(item));
            rest = &rest[token.len()..];
            continue;
        }
        if ch == 'Z' {
            pieces.push(PatternPiece::Item("%:z"));
            rest = &rest[1..];
            continue;
        }
        push_literal(&mut pieces, &rest[..ch.len_utf8()]);
        rest = &rest[ch.len_utf8()..];
    }
    pieces
}

fn push_literal(pieces: &mut SmallVec<[PatternPiece; 16]>, text: &str) {
    if let Some(PatternPiece::Literal(last)) = pieces.last_mut() {
        last.push_str(text);
    } else {
        pieces.push(PatternPiece::Literal(text.to_owned()));
    }
}

/// Interprets a cell as a UTC instant, if it holds one.
///
/// Numbers are epoch milliseconds; text accepts RFC 3339 and the common
/// `YYYY-MM-DD[ HH:mm[:ss[.SSS]]]` shapes (read as UTC).
#[must_use]
pub fn parse_instant(value: &CellValue) -> Option<DateTime<Utc>> {
    match value {
        CellValue::DateTime(instant) => Some(*instant),
        CellValue::Number(millis) if millis.is_finite() => {
            DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64)
        }
        CellValue::Text(text) => parse_instant_text(text.trim()),
        _ => None,
    }
}

fn parse_instant_text(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_TEXT_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
