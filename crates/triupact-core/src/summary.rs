//! Dashboard summary counts and their positional grouping.
//!
//! # Design
//! - Entries keep server order; groups are fixed index ranges over that order.
//! - Non-numeric counts read as zero rather than failing the whole dashboard.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use triupact_api_models::DashboardSummaryResponse;

use crate::error::ApiError;
use crate::format::humanize_key;

/// Endpoint serving the dashboard counts.
pub const SUMMARY_PATH: &str = "/api/dashboard/summary";

/// Keys promoted to headline cards, with their labels.
pub const HIGHLIGHTS: [(&str, &str); 4] = [
    ("province", "Provinces"),
    ("departments", "Departments"),
    ("users", "Users"),
    ("formResearchPlan", "New research plans"),
];

/// Positional slice of the summary entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SummaryGroup {
    /// Every entry.
    #[default]
    All,
    /// Lookup tables, entries `0..8`.
    Lookups,
    /// Forms, entries `8..15`.
    Forms,
    /// People, entries from `15`.
    People,
}

impl SummaryGroup {
    /// Every group, `All` first.
    pub const ALL: [Self; 4] = [Self::All, Self::Lookups, Self::Forms, Self::People];

    /// Stable key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Lookups => "lookups",
            Self::Forms => "forms",
            Self::People => "people",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Lookups => "Lookups",
            Self::Forms => "Forms",
            Self::People => "People",
        }
    }

    const fn bounds(self) -> (usize, Option<usize>) {
        match self {
            Self::All => (0, None),
            Self::Lookups => (0, Some(8)),
            Self::Forms => (8, Some(15)),
            Self::People => (15, None),
        }
    }
}

impl fmt::Display for SummaryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SummaryGroup {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|group| group.key() == value)
            .ok_or_else(|| format!("unknown summary group '{value}' (all, lookups, forms, people)"))
    }
}

/// One labelled count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Server key.
    pub key: String,
    /// Human label.
    pub label: String,
    /// Count, zero when the server value is not a number.
    pub count: u64,
}

/// Parsed dashboard summary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    entries: Vec<SummaryEntry>,
}

impl Summary {
    /// Build from the wire response.
    #[must_use]
    pub fn from_response(response: &DashboardSummaryResponse) -> Self {
        let entries = response
            .data
            .iter()
            .map(|(key, value)| SummaryEntry {
                key: key.clone(),
                label: humanize_key(key),
                count: count_of(value),
            })
            .collect();
        Self { entries }
    }

    /// Build from a parsed response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the body is not a summary object.
    pub fn from_body(body: &Value) -> Result<Self, ApiError> {
        let response: DashboardSummaryResponse = serde_json::from_value(body.clone())
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(Self::from_response(&response))
    }

    /// Entries in server order.
    #[must_use]
    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    /// Entries of one group; out-of-range groups are empty.
    #[must_use]
    pub fn group(&self, group: SummaryGroup) -> &[SummaryEntry] {
        let (start, end) = group.bounds();
        let len = self.entries.len();
        let start = start.min(len);
        let end = end.map_or(len, |end| end.min(len));
        &self.entries[start..end]
    }

    /// Sum of a group's counts.
    #[must_use]
    pub fn total(&self, group: SummaryGroup) -> u64 {
        self.group(group)
            .iter()
            .fold(0_u64, |sum, entry| sum.saturating_add(entry.count))
    }

    /// Count for a key.
    #[must_use]
    pub fn count(&self, key: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.count)
    }

    /// Headline cards; missing keys read as zero.
    #[must_use]
    pub fn highlights(&self) -> Vec<(&'static str, u64)> {
        HIGHLIGHTS
            .iter()
            .map(|(key, label)| (*label, self.count(key).unwrap_or(0)))
            .collect()
    }

    /// `true` when the server returned no counts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_of(value: &Value) -> u64 {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|n| n.is_finite() && *n > 0.0).map(|n| n as u64))
            .unwrap_or(0),
        Value::String(text) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triupact_test_support::fixtures;

    #[test]
    fn groups_slice_by_position() -> Result<(), ApiError> {
        let summary = Summary::from_body(&fixtures::dashboard_summary())?;
        assert_eq!(summary.entries().len(), 17);
        assert_eq!(summary.group(SummaryGroup::Lookups).len(), 8);
        assert_eq!(summary.group(SummaryGroup::Forms).len(), 7);
        assert_eq!(summary.group(SummaryGroup::People).len(), 2);
        assert_eq!(summary.group(SummaryGroup::All).len(), 17);
        assert_eq!(summary.entries()[0].key, "province");
        Ok(())
    }

    #[test]
    fn short_summaries_leave_later_groups_empty() -> Result<(), ApiError> {
        let summary = Summary::from_body(&json!({"data": {"a": 1, "b": "2", "c": null}}))?;
        assert_eq!(summary.total(SummaryGroup::Lookups), 3);
        assert!(summary.group(SummaryGroup::Forms).is_empty());
        assert!(summary.group(SummaryGroup::People).is_empty());
        Ok(())
    }

    #[test]
    fn highlights_default_to_zero() -> Result<(), ApiError> {
        let summary = Summary::from_body(&json!({"data": {"users": 12}}))?;
        assert_eq!(
            summary.highlights(),
            vec![
                ("Provinces", 0),
                ("Departments", 0),
                ("Users", 12),
                ("New research plans", 0)
            ]
        );
        Ok(())
    }

    #[test]
    fn missing_data_is_empty_and_bad_shapes_fail() {
        assert!(Summary::from_body(&json!({})).is_ok_and(|summary| summary.is_empty()));
        assert!(matches!(
            Summary::from_body(&json!({"data": [1, 2]})),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn groups_parse_from_keys() {
        assert_eq!("Forms".parse::<SummaryGroup>(), Ok(SummaryGroup::Forms));
        assert!("charts".parse::<SummaryGroup>().is_err());
        assert_eq!(SummaryGroup::People.to_string(), "people");
    }
}
