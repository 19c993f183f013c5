//! Sort modes and the comparators behind them.
//!
//! # Design
//! - A sort mode is data: key, label, field, kind, direction.
//! - Text collates case-insensitively with natural digit runs.
//! - Ties fall back to the original position so ordering is stable in both directions.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::listview::Listable;
use crate::record::FieldValue;

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// How field values are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKind {
    /// Case-insensitive natural collation.
    Text,
    /// Numeric when both sides parse, collation otherwise.
    Numeric,
    /// Timestamps; missing or unparseable values sort first.
    Date,
}

/// One entry of a resource's sort menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortMode {
    /// Stable identifier such as `name-asc`.
    pub key: &'static str,
    /// Menu label.
    pub label: &'static str,
    /// Canonical field compared.
    pub field: &'static str,
    /// Comparison kind.
    pub kind: SortKind,
    /// Direction.
    pub direction: SortDirection,
}

impl SortMode {
    /// Ascending mode.
    #[must_use]
    pub const fn asc(
        key: &'static str,
        label: &'static str,
        field: &'static str,
        kind: SortKind,
    ) -> Self {
        Self {
            key,
            label,
            field,
            kind,
            direction: SortDirection::Asc,
        }
    }

    /// Descending mode.
    #[must_use]
    pub const fn desc(
        key: &'static str,
        label: &'static str,
        field: &'static str,
        kind: SortKind,
    ) -> Self {
        Self {
            key,
            label,
            field,
            kind,
            direction: SortDirection::Desc,
        }
    }

    /// Compare two records under this mode, ignoring position.
    #[must_use]
    pub fn compare<T: Listable>(&self, left: &T, right: &T) -> Ordering {
        let ordering = compare_values(left.field(self.field), right.field(self.field), self.kind);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Sort borrowed records; equal keys keep their incoming order.
#[must_use]
pub fn sort_records<'a, T: Listable>(records: Vec<&'a T>, mode: &SortMode) -> Vec<&'a T> {
    let mut indexed: Vec<(usize, &'a T)> = records.into_iter().enumerate().collect();
    indexed.sort_by(|(left_index, left), (right_index, right)| {
        mode.compare(*left, *right)
            .then_with(|| left_index.cmp(right_index))
    });
    indexed.into_iter().map(|(_, record)| record).collect()
}

/// Compare two optional field values.
#[must_use]
pub fn compare_values(
    left: Option<&FieldValue>,
    right: Option<&FieldValue>,
    kind: SortKind,
) -> Ordering {
    let text = |value: Option<&FieldValue>| value.map(FieldValue::as_text).unwrap_or_default();
    match kind {
        SortKind::Text => collate(&text(left), &text(right)),
        SortKind::Numeric => {
            let numbers = (
                left.and_then(FieldValue::as_number),
                right.and_then(FieldValue::as_number),
            );
            match numbers {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => collate(&text(left), &text(right)),
            }
        }
        SortKind::Date => {
            let instant = |value: Option<&FieldValue>| {
                value
                    .and_then(|value| match value {
                        FieldValue::Text(text) => parse_instant_millis(text),
                        _ => None,
                    })
                    .unwrap_or(i64::MIN)
            };
            instant(left).cmp(&instant(right))
        }
    }
}

/// Parse RFC 3339, `YYYY-MM-DD HH:MM:SS`, or `YYYY-MM-DD` into epoch milliseconds.
#[must_use]
pub fn parse_instant_millis(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis());
    }
    let normalized = text.replacen(' ', "T", 1);
    if let Ok(parsed) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|moment| moment.and_utc().timestamp_millis())
}

/// Case-insensitive natural comparison; exact text breaks ties.
#[must_use]
pub fn collate(left: &str, right: &str) -> Ordering {
    natural_cmp(&left.to_lowercase(), &right.to_lowercase()).then_with(|| left.cmp(right))
}

fn natural_cmp(left: &str, right: &str) -> Ordering {
    let mut left_chars = left.chars().peekable();
    let mut right_chars = right.chars().peekable();
    loop {
        match (left_chars.peek().copied(), right_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) if a.is_ascii_digit() && b.is_ascii_digit() => {
                let left_run = take_digits(&mut left_chars);
                let right_run = take_digits(&mut right_chars);
                let ordering = compare_digit_runs(&left_run, &right_run);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(a), Some(b)) => {
                if a != b {
                    return a.cmp(&b);
                }
                left_chars.next();
                right_chars.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(ch) = chars.peek().copied() {
        if !ch.is_ascii_digit() {
            break;
        }
        run.push(ch);
        chars.next();
    }
    run
}

fn compare_digit_runs(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CanonicalRecord;

    fn named(id: i64, name: &str) -> CanonicalRecord {
        CanonicalRecord::new(FieldValue::from(id)).with_field("name", name)
    }

    #[test]
    fn collation_ignores_case_and_orders_digits_naturally() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("item2", "item10"), Ordering::Less);
        assert_eq!(collate("B", "b"), Ordering::Less);
        assert_eq!(collate("a", "a"), Ordering::Equal);
    }

    #[test]
    fn numeric_kind_falls_back_to_text() {
        let ten = FieldValue::from("10");
        let nine = FieldValue::from(9_i64);
        assert_eq!(
            compare_values(Some(&ten), Some(&nine), SortKind::Numeric),
            Ordering::Greater
        );
        let word = FieldValue::from("abc");
        assert_eq!(
            compare_values(Some(&word), Some(&nine), SortKind::Numeric),
            collate("abc", "9")
        );
    }

    #[test]
    fn missing_dates_sort_first() {
        let date = FieldValue::from("2024-06-10");
        assert_eq!(
            compare_values(None, Some(&date), SortKind::Date),
            Ordering::Less
        );
        let later = FieldValue::from("2024-06-10 08:00:00");
        assert_eq!(
            compare_values(Some(&date), Some(&later), SortKind::Date),
            Ordering::Less
        );
    }

    #[test]
    fn instants_parse_in_supported_shapes() {
        assert_eq!(parse_instant_millis("1970-01-01T00:00:01Z"), Some(1_000));
        assert_eq!(parse_instant_millis("1970-01-01 00:00:02"), Some(2_000));
        assert_eq!(parse_instant_millis("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_instant_millis("not a date"), None);
        assert_eq!(parse_instant_millis(""), None);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let records: Vec<CanonicalRecord> = (0..200)
            .map(|index| named(index, if index % 2 == 0 { "same" } else { "Same" }))
            .collect();
        let mode = SortMode::asc("name-asc", "Name", "name", SortKind::Text);
        let sorted = sort_records(records.iter().collect(), &mode);

        let lower: Vec<&FieldValue> = sorted
            .iter()
            .filter(|record| record.display("name") == "same")
            .map(|record| record.id())
            .collect();
        let mut expected = lower.clone();
        expected.sort_by(|a, b| {
            let a = a.as_number().unwrap_or_default();
            let b = b.as_number().unwrap_or_default();
            a.total_cmp(&b)
        });
        assert_eq!(lower, expected);
    }

    #[test]
    fn descending_keeps_ties_in_original_order() {
        let records = vec![named(1, "b"), named(2, "a"), named(3, "b"), named(4, "a")];
        let mode = SortMode::desc("name-desc", "Name", "name", SortKind::Text);
        let ids: Vec<String> = sort_records(records.iter().collect(), &mode)
            .into_iter()
            .map(|record| record.display("id"))
            .collect();
        assert_eq!(ids, vec!["1", "3", "2", "4"]);
    }
}
