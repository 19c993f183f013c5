//! Map heterogeneous API records onto canonical field names.
//!
//! # Design
//! - Each canonical field lists ordered source keys; the first non-null wins.
//! - Identifiers fall back to the 1-based position when no source is present.
//! - Normalisation never invents placeholders; rendering does.

use std::collections::BTreeSet;

use crate::record::{CanonicalRecord, FieldValue, RawRecord};
use crate::sort::collate;

/// One place a canonical value may come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Value of a single raw key.
    Key(&'static str),
    /// Non-blank values of several keys joined with a space.
    Joined(&'static [&'static str]),
}

/// Canonical field and its ordered fallback chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical field name.
    pub name: &'static str,
    /// Sources tried in order.
    pub sources: &'static [Source],
    /// Trim text values; blank results count as absent.
    pub trim: bool,
}

impl FieldSpec {
    /// Field resolved from the given sources.
    #[must_use]
    pub const fn new(name: &'static str, sources: &'static [Source]) -> Self {
        Self {
            name,
            sources,
            trim: false,
        }
    }

    /// Same field with text trimming enabled.
    #[must_use]
    pub const fn trimmed(self) -> Self {
        Self { trim: true, ..self }
    }
}

/// Per-resource normalisation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Normalizer {
    /// Keys tried for the identifier.
    pub id_sources: &'static [&'static str],
    /// Canonical fields.
    pub fields: &'static [FieldSpec],
    /// Copy every raw key into the canonical record before canonical fields.
    pub keep_raw: bool,
}

impl Normalizer {
    /// Normalise a single record at `index` in the fetched sequence.
    #[must_use]
    pub fn normalize(&self, index: usize, raw: &RawRecord) -> CanonicalRecord {
        let id = self
            .id_sources
            .iter()
            .find_map(|key| present(raw, key, false))
            .unwrap_or_else(|| position_id(index));

        let mut record = CanonicalRecord::new(id);
        if self.keep_raw {
            for (key, value) in raw {
                record.insert(key.clone(), FieldValue::from_json(value));
            }
        }
        for field in self.fields {
            let value = resolve(raw, field).unwrap_or(FieldValue::Null);
            record.insert(field.name, value);
        }
        record
    }

    /// Normalise a whole fetch result, preserving order.
    #[must_use]
    pub fn normalize_all(&self, raw: &[RawRecord]) -> Vec<CanonicalRecord> {
        raw.iter()
            .enumerate()
            .map(|(index, record)| self.normalize(index, record))
            .collect()
    }
}

fn position_id(index: usize) -> FieldValue {
    i64::try_from(index)
        .ok()
        .and_then(|value| value.checked_add(1))
        .map_or(FieldValue::Null, FieldValue::from)
}

fn present(raw: &RawRecord, key: &str, trim: bool) -> Option<FieldValue> {
    let value = raw.get(key).map(FieldValue::from_json)?;
    match value {
        FieldValue::Null => None,
        FieldValue::Text(text) if trim => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| FieldValue::Text(trimmed.to_string()))
        }
        other => Some(other),
    }
}

fn resolve(raw: &RawRecord, field: &FieldSpec) -> Option<FieldValue> {
    field.sources.iter().find_map(|source| match source {
        Source::Key(key) => present(raw, key, field.trim),
        Source::Joined(keys) => {
            let parts: Vec<String> = keys
                .iter()
                .filter_map(|key| present(raw, key, true))
                .map(|value| value.as_text())
                .filter(|text| !text.trim().is_empty())
                .collect();
            (!parts.is_empty()).then(|| FieldValue::Text(parts.join(" ")))
        }
    })
}

/// Column order for records with open-ended keys: preferred keys first,
/// then the rest in collation order. `hidden` keys never become columns.
#[must_use]
pub fn dynamic_columns<'a>(
    keys: impl IntoIterator<Item = &'a str>,
    preferred: &[&str],
    hidden: &[&str],
) -> Vec<String> {
    let seen: BTreeSet<&str> = keys
        .into_iter()
        .filter(|key| !hidden.contains(key))
        .collect();

    let mut columns: Vec<String> = preferred
        .iter()
        .filter(|key| seen.contains(**key))
        .map(|key| (*key).to_string())
        .collect();
    let mut rest: Vec<&str> = seen
        .into_iter()
        .filter(|key| !preferred.contains(key))
        .collect();
    rest.sort_by(|left, right| collate(left, right));
    columns.extend(rest.into_iter().map(str::to_string));
    columns
}
