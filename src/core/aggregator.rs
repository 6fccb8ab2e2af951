//! Streaming aggregators used to summarize pivot cells.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Row;
use crate::error::{ChartError, ChartResult};
use crate::format::number_format::round_fixed;

/// Plain `toFixed`-style number formatter used for pivot cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotNumberFormat {
    pub digits_after_decimal: usize,
    pub scaler: f64,
    pub thousands_sep: String,
    pub decimal_sep: String,
    pub prefix: String,
    pub suffix: String,
}

impl Default for PivotNumberFormat {
    fn default() -> Self {
        Self {
            digits_after_decimal: 2,
            scaler: 1.0,
            thousands_sep: ",".to_owned(),
            decimal_sep: ".".to_owned(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl PivotNumberFormat {
    #[must_use]
    pub fn integer() -> Self {
        Self {
            digits_after_decimal: 0,
            ..Self::default()
        }
    }

    /// Formats `value`, rounding halves away from zero; NaN and infinities
    /// render as an empty string.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let scaled = self.scaler * value;
        if !scaled.is_finite() {
            return String::new();
        }
        let digits = u32::try_from(self.digits_after_decimal).unwrap_or(u32::MAX);
        let fixed = round_fixed(scaled, digits);
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (fixed.as_str(), None),
        };
        let mut out = String::with_capacity(fixed.len() + self.prefix.len() + self.suffix.len() + 4);
        out.push_str(&self.prefix);
        out.push_str(&group_thousands(int_part, &self.thousands_sep));
        if let Some(frac_part) = frac_part {
            out.push_str(&self.decimal_sep);
            out.push_str(frac_part);
        }
        out.push_str(&self.suffix);
        out
    }
}

/// Inserts `separator` every three digits of an integer string (sign kept).
pub(crate) fn group_thousands(int_part: &str, separator: &str) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part),
    };
    let mut grouped = String::with_capacity(int_part.len() + digits.len() / 3 * separator.len());
    grouped.push_str(sign);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Accumulates one pivot cell.
pub trait Aggregator {
    fn push(&mut self, record: &Row);
    fn value(&self) -> f64;
    fn formatter(&self) -> &PivotNumberFormat;

    fn formatted_value(&self) -> String {
        self.formatter().format(self.value())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    count: u64,
    format: PivotNumberFormat,
}

impl Count {
    #[must_use]
    pub fn new(format: PivotNumberFormat) -> Self {
        Self { count: 0, format }
    }
}

impl Aggregator for Count {
    fn push(&mut self, _record: &Row) {
        self.count += 1;
    }

    fn value(&self) -> f64 {
        self.count as f64
    }

    fn formatter(&self) -> &PivotNumberFormat {
        &self.format
    }
}

/// Sums the numeric prefix of `attr` across records; unparsable cells are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Sum {
    attr: String,
    sum: f64,
    format: PivotNumberFormat,
}

impl Sum {
    #[must_use]
    pub fn new(attr: impl Into<String>, format: PivotNumberFormat) -> Self {
        Self {
            attr: attr.into(),
            sum: 0.0,
            format,
        }
    }
}

impl Aggregator for Sum {
    fn push(&mut self, record: &Row) {
        if let Some(value) = record.get(&self.attr).and_then(|cell| cell.parse_f64()) {
            if !value.is_nan() {
                self.sum += value;
            }
        }
    }

    fn value(&self) -> f64 {
        self.sum
    }

    fn formatter(&self) -> &PivotNumberFormat {
        &self.format
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatMode {
    Mean,
    Var,
    Stdev,
}

impl FromStr for StatMode {
    type Err = ChartError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "mean" => Ok(Self::Mean),
            "var" => Ok(Self::Var),
            "stdev" => Ok(Self::Stdev),
            other => Err(ChartError::UnsupportedAggregation(other.to_owned())),
        }
    }
}

/// Single-pass mean/variance/standard deviation (Welford).
#[derive(Debug, Clone, PartialEq)]
pub struct RunningStat {
    attr: String,
    mode: StatMode,
    ddof: u32,
    n: f64,
    mean: f64,
    sum_sq: f64,
    format: PivotNumberFormat,
}

impl RunningStat {
    #[must_use]
    pub fn new(
        attr: impl Into<String>,
        mode: StatMode,
        ddof: u32,
        format: PivotNumberFormat,
    ) -> Self {
        Self {
            attr: attr.into(),
            mode,
            ddof,
            n: 0.0,
            mean: 0.0,
            sum_sq: 0.0,
            format,
        }
    }

    /// Builds a running statistic from a mode name such as `"stdev"`.
    pub fn from_mode_name(
        attr: impl Into<String>,
        mode: &str,
        ddof: u32,
        format: PivotNumberFormat,
    ) -> ChartResult<Self> {
        Ok(Self::new(attr, mode.parse()?, ddof, format))
    }

    #[must_use]
    pub fn average(attr: impl Into<String>, format: PivotNumberFormat) -> Self {
        Self::new(attr, StatMode::Mean, 1, format)
    }
}

impl Aggregator for RunningStat {
    fn push(&mut self, record: &Row) {
        let Some(x) = record.get(&self.attr).and_then(|cell| cell.parse_f64()) else {
            return;
        };
        if x.is_nan() {
            return;
        }
        self.n += 1.0;
        if self.n == 1.0 {
            self.mean = x;
        }
        let next_mean = self.mean + (x - self.mean) / self.n;
        self.sum_sq += (x - self.mean) * (x - next_mean);
        self.mean = next_mean;
    }

    fn value(&self) -> f64 {
        if self.mode == StatMode::Mean {
            return if self.n == 0.0 { f64::NAN } else { self.mean };
        }
        let ddof = f64::from(self.ddof);
        if self.n <= ddof {
            return 0.0;
        }
        let variance = self.sum_sq / (self.n - ddof);
        match self.mode {
            StatMode::Var => variance,
            StatMode::Stdev => variance.sqrt(),
            StatMode::Mean => self.mean,
        }
    }

    fn formatter(&self) -> &PivotNumberFormat {
        &self.format
    }
}

/// Looks up one of the named pivot aggregators.
pub fn aggregator_by_name(name: &str, attr: &str) -> ChartResult<Box<dyn Aggregator>> {
    let aggregator: Box<dyn Aggregator> = match name {
        "Count" => Box::new(Count::new(PivotNumberFormat::integer())),
        "Sum" => Box::new(Sum::new(attr, PivotNumberFormat::default())),
        "Average" => Box::new(RunningStat::average(attr, PivotNumberFormat::default())),
        "Variance" => Box::new(RunningStat::new(
            attr,
            StatMode::Var,
            1,
            PivotNumberFormat::default(),
        )),
        "Standard Deviation" => Box::new(RunningStat::new(
            attr,
            StatMode::Stdev,
            1,
            PivotNumberFormat::default(),
        )),
        other => return Err(ChartError::UnsupportedAggregation(other.to_owned())),
    };
    Ok(aggregator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_sign() {
        assert_eq!(group_thousands("-1234567", ","), "-1,234,567");
        assert_eq!(group_thousands("123", ","), "123");
        assert_eq!(group_thousands("1000", " "), "1 000");
    }
}
