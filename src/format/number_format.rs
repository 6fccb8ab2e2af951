use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::aggregator::group_thousands;
use crate::core::value::format_plain_number;
use crate::core::CellValue;

const CORE_CHARS: [char; 6] = ['0', '#', ',', '.', '[', ']'];

const ABBREVIATIONS: [(f64, &str); 4] = [(1e12, "t"), (1e9, "b"), (1e6, "m"), (1e3, "k")];

/// Compiled numeral-style number pattern such as `0,0[.]00` or `0.0%`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberPattern {
    prefix: String,
    suffix: String,
    thousands: bool,
    min_decimals: u32,
    optional_decimals: u32,
    optional_point: bool,
    percent: Option<String>,
    abbreviate: Option<String>,
    explicit_plus: bool,
    parens_for_negative: bool,
}

impl NumberPattern {
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let mut compiled = Self::default();
        let mut body = pattern.to_owned();

        if body.contains('(') {
            compiled.parens_for_negative = true;
            body = body.replace(['(', ')'], "");
        }
        if let Some(rest) = body.strip_prefix('+') {
            compiled.explicit_plus = true;
            body = rest.to_owned();
        }
        if body.contains('%') {
            compiled.percent = Some(if body.contains(" %") { " %" } else { "%" }.to_owned());
            body = body.replace(" %", "").replace('%', "");
        }
        if let Some(index) = find_abbreviation_marker(&body) {
            let spaced = index > 0 && body[..index].ends_with(' ');
            compiled.abbreviate = Some(if spaced { " " } else { "" }.to_owned());
            let start = if spaced { index - 1 } else { index };
            body.replace_range(start..=index, "");
        }

        let core_start = body.find(|ch| CORE_CHARS.contains(&ch)).unwrap_or(body.len());
        let core_end = body
            .rfind(|ch| CORE_CHARS.contains(&ch))
            .map_or(core_start, |index| index + 1);
        compiled.prefix = body[..core_start].to_owned();
        compiled.suffix = body[core_end.max(core_start)..].to_owned();
        let core = &body[core_start..core_end.max(core_start)];

        let (int_part, dec_part) = if let Some((int_part, dec_part)) = core.split_once("[.]") {
            compiled.optional_point = true;
            (int_part, Some(dec_part))
        } else if let Some((int_part, dec_part)) = core.split_once('.') {
            (int_part, Some(dec_part))
        } else {
            (core, None)
        };
        compiled.thousands = int_part.contains(',');
        if let Some(dec_part) = dec_part {
            let (required, optional) = match dec_part.split_once('[') {
                Some((required, optional)) => (required, optional),
                None => (dec_part, ""),
            };
            compiled.min_decimals = count_zeros(required);
            compiled.optional_decimals = count_zeros(optional);
        }
        compiled
    }

    /// Renders `value`; NaN and infinities render as an empty string.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        let mut scaled = if self.percent.is_some() {
            value * 100.0
        } else {
            value
        };
        let mut abbreviation = "";
        if self.abbreviate.is_some() {
            if let Some((scale, label)) = ABBREVIATIONS
                .iter()
                .find(|(scale, _)| scaled.abs() >= *scale)
            {
                scaled /= scale;
                abbreviation = label;
            }
        }

        let precision = self.min_decimals + self.optional_decimals;
        let fixed = round_fixed(scaled.abs(), precision);
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part.to_owned(), frac_part.to_owned()),
            None => (fixed.clone(), String::new()),
        };
        let mut frac_part = frac_part;
        while frac_part.len() > self.min_decimals as usize && frac_part.ends_with('0') {
            frac_part.pop();
        }
        if self.optional_point && frac_part.chars().all(|ch| ch == '0') {
            frac_part.clear();
        }

        let mut number = if self.thousands {
            group_thousands(&int_part, ",")
        } else {
            int_part
        };
        if !frac_part.is_empty() {
            number.push('.');
            number.push_str(&frac_part);
        }

        let is_negative = scaled < 0.0 && fixed.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
        let mut out = String::with_capacity(number.len() + self.prefix.len() + self.suffix.len() + 4);
        if is_negative {
            out.push(if self.parens_for_negative { '(' } else { '-' });
        } else if self.explicit_plus && scaled > 0.0 {
            out.push('+');
        }
        out.push_str(&self.prefix);
        out.push_str(&number);
        if let Some(spacing) = &self.abbreviate {
            if !abbreviation.is_empty() {
                out.push_str(spacing);
                out.push_str(abbreviation);
            }
        }
        if let Some(percent) = &self.percent {
            out.push_str(percent);
        }
        out.push_str(&self.suffix);
        if is_negative && self.parens_for_negative {
            out.push(')');
        }
        out
    }
}

fn find_abbreviation_marker(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, ch) in body.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            'a' if depth == 0 => return Some(index),
            _ => {}
        }
    }
    None
}

fn count_zeros(part: &str) -> u32 {
    part.chars().filter(|ch| *ch == '0').count() as u32
}

pub(crate) fn round_fixed(value: f64, precision: u32) -> String {
    match Decimal::from_f64(value) {
        Some(decimal) => {
            let rounded =
                decimal.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.prec$}", prec = precision as usize)
        }
        None => format!("{value:.prec$}", prec = precision as usize),
    }
}

/// Number formatter built from a user pattern.
///
/// An empty pattern renders values as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormatter {
    pattern: Option<NumberPattern>,
}

impl NumberFormatter {
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: (!pattern.is_empty()).then(|| NumberPattern::parse(pattern)),
        }
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match &self.pattern {
            Some(pattern) => pattern.format(value),
            None => format_plain_number(value),
        }
    }

    /// Formats an optional value; `None` renders as an empty string.
    #[must_use]
    pub fn format_opt(&self, value: Option<f64>) -> String {
        value.map_or_else(String::new, |value| self.format(value))
    }

    /// Formats a cell: numbers through the pattern, text verbatim, null as empty.
    #[must_use]
    pub fn format_cell(&self, value: &CellValue) -> String {
        match value {
            CellValue::Number(number) => self.format(*number),
            CellValue::Null => String::new(),
            other => other.display_text(),
        }
    }
}
