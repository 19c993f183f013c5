//! Card model for the user directory.

use triupact_core::{CanonicalRecord, FieldValue};
use triupact_core::format::{CellFormat, initials_from_email, render};

const SHORT_ID_LEN: usize = 8;

/// Everything one user card renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserCard {
    /// Stable key for the grid.
    pub key: String,
    /// Avatar initials.
    pub initials: String,
    /// E-mail address, or the placeholder.
    pub email: String,
    /// Raw e-mail for the copy button; empty when absent.
    pub copy_text: String,
    /// Identifier shortened for display.
    pub short_id: String,
    /// Creation date.
    pub created: String,
    /// Last update date.
    pub updated: String,
}

impl UserCard {
    /// Build a card from a normalized user record.
    #[must_use]
    pub fn from_record(record: &CanonicalRecord) -> Self {
        let email = record
            .get("email")
            .filter(|value| !value.is_blank())
            .map(FieldValue::as_text)
            .unwrap_or_default();
        let id = record.id().as_text();
        Self {
            key: id.clone(),
            initials: initials_from_email(&email),
            email: record.display("email"),
            copy_text: email,
            short_id: short_id(&id),
            created: render(record.get("created_at"), CellFormat::ThaiDate),
            updated: render(record.get("updated_at"), CellFormat::ThaiDate),
        }
    }
}

/// First eight characters followed by an ellipsis when longer.
#[must_use]
pub fn short_id(id: &str) -> String {
    if id.chars().count() <= SHORT_ID_LEN {
        return id.to_string();
    }
    let head: String = id.chars().take(SHORT_ID_LEN).collect();
    format!("{head}…")
}
