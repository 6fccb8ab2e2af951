//! Merging of rows that landed on the same X bucket.

use super::{CellValue, Row};

/// Deep-merges `records` into one row.
///
/// Numeric leaves are summed, nested objects and arrays are merged
/// recursively, and any other leaf (text, bool, null, date/time) takes the
/// last value seen. Date/time leaves are never treated as containers.
#[must_use]
pub fn polymerize<'a, I>(records: I) -> Row
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut merged = Row::new();
    for record in records {
        merge_row_into(&mut merged, record);
    }
    merged
}

/// Merges `source` into `target` with the same rules as [`polymerize`].
pub fn merge_row_into(target: &mut Row, source: &Row) {
    for (key, value) in source {
        let slot = target.entry(key.clone()).or_insert(CellValue::Null);
        merge_value_into(slot, value);
    }
}

fn merge_value_into(slot: &mut CellValue, value: &CellValue) {
    match value {
        CellValue::Object(inner) => {
            if !matches!(slot, CellValue::Object(_)) {
                *slot = CellValue::Object(Row::new());
            }
            if let CellValue::Object(target) = slot {
                merge_row_into(target, inner);
            }
        }
        CellValue::Array(items) => {
            if !matches!(slot, CellValue::Array(_)) {
                *slot = CellValue::Array(Vec::with_capacity(items.len()));
            }
            if let CellValue::Array(target) = slot {
                for (index, item) in items.iter().enumerate() {
                    if index == target.len() {
                        target.push(CellValue::Null);
                    }
                    merge_value_into(&mut target[index], item);
                }
            }
        }
        CellValue::Number(addend) => {
            let augend = slot.as_f64().unwrap_or(0.0);
            *slot = CellValue::Number(augend + addend);
        }
        leaf => *slot = leaf.clone(),
    }
}

/// Sums optional numbers the way [`polymerize`] sums numeric leaves: a
/// missing value on the right resets the total, a missing value on the left
/// counts as zero.
#[must_use]
pub fn merge_optional_sum(acc: Option<f64>, next: Option<f64>) -> Option<f64> {
    next.map(|value| acc.unwrap_or(0.0) + value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_sum_follows_last_seen_rule() {
        assert_eq!(merge_optional_sum(None, Some(2.0)), Some(2.0));
        assert_eq!(merge_optional_sum(Some(1.0), Some(2.0)), Some(3.0));
        assert_eq!(merge_optional_sum(Some(1.0), None), None);
    }
}
