//! Display helpers for table cells, cards, and the CLI.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

use crate::record::{FieldValue, PLACEHOLDER};
use crate::sort::parse_instant_millis;

const THAI_MONTHS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.",
    "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];
const BUDDHIST_ERA_OFFSET: i32 = 543;
/// Offset of Asia/Bangkok, which observes no daylight saving.
const BANGKOK_OFFSET_SECS: i32 = 7 * 3_600;

/// How a column renders its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellFormat {
    /// Value as-is.
    Plain,
    /// National ID with the middle masked.
    MaskedCard,
    /// Short Thai date with Buddhist-era year.
    ThaiDate,
    /// Number with thousands separators and at most two decimals.
    Money,
    /// Approval flag of an extension request.
    ExtendStatus,
}

/// Render a field value for display.
#[must_use]
pub fn render(value: Option<&FieldValue>, format: CellFormat) -> String {
    let Some(value) = value.filter(|value| !value.is_blank()) else {
        return PLACEHOLDER.to_string();
    };
    match format {
        CellFormat::Plain => value.display(),
        CellFormat::MaskedCard => mask_card(&value.as_text()),
        CellFormat::ThaiDate => thai_short_date(&value.as_text()),
        CellFormat::Money => format_money(value),
        CellFormat::ExtendStatus => extend_status_label(value),
    }
}

/// Keep the first and last two characters of an ID card number.
#[must_use]
pub fn mask_card(card: &str) -> String {
    let chars: Vec<char> = card.trim().chars().collect();
    if chars.is_empty() {
        return PLACEHOLDER.to_string();
    }
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}****{tail}")
}

/// Label for the `extend_status` flag.
#[must_use]
pub fn extend_status_label(value: &FieldValue) -> String {
    match value.as_number() {
        Some(flag) if flag == 1.0 => "approved".to_string(),
        Some(flag) if flag == 0.0 => "not approved".to_string(),
        _ => value.display(),
    }
}

/// `10 มิ.ย. 2567` style date; unparseable input is returned unchanged.
///
/// Instants carrying an offset are shown on the Bangkok calendar; timestamps
/// without one are taken as already local.
#[must_use]
pub fn thai_short_date(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let Some(date) = bangkok_date(trimmed) else {
        return trimmed.to_string();
    };
    let month = usize::try_from(date.month0())
        .ok()
        .and_then(|index| THAI_MONTHS.get(index))
        .copied()
        .unwrap_or_default();
    format!(
        "{} {} {}",
        date.day(),
        month,
        date.year() + BUDDHIST_ERA_OFFSET
    )
}

fn bangkok_date(text: &str) -> Option<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        let bangkok = FixedOffset::east_opt(BANGKOK_OFFSET_SECS)?;
        return Some(parsed.with_timezone(&bangkok).date_naive());
    }
    parse_instant_millis(text)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|moment| moment.date_naive())
}

/// Thousands-separated amount with up to two decimals.
#[must_use]
pub fn format_money(value: &FieldValue) -> String {
    let Some(amount) = value.as_number() else {
        return value.display();
    };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{}", group_thousands(whole))
    } else {
        format!("{sign}{}.{fraction}", group_thousands(whole))
    }
}

/// Insert `,` every three digits of an unsigned integer string.
#[must_use]
pub fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a whole count with separators.
#[must_use]
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// Two upper-cased alphanumerics from the e-mail local part, or `U`.
#[must_use]
pub fn initials_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let initials: String = local
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(2)
        .collect::<String>()
        .to_uppercase();
    if initials.is_empty() {
        "U".to_string()
    } else {
        initials
    }
}

/// Turn `form_research_plan` into `Form research plan`.
#[must_use]
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.trim().chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_masking_keeps_edges() {
        assert_eq!(mask_card("1234567890123"), "12****23");
        assert_eq!(mask_card("1234"), "****");
        assert_eq!(mask_card("12345"), "12****45");
        assert_eq!(mask_card(""), "-");
    }

    #[test]
    fn extend_status_maps_flags() {
        assert_eq!(extend_status_label(&FieldValue::from(1_i64)), "approved");
        assert_eq!(extend_status_label(&FieldValue::from("0")), "not approved");
        assert_eq!(extend_status_label(&FieldValue::from("pending")), "pending");
    }

    #[test]
    fn thai_dates_use_buddhist_era() {
        assert_eq!(thai_short_date("2024-06-10"), "10 มิ.ย. 2567");
        assert_eq!(thai_short_date("2024-01-05T10:00:00Z"), "5 ม.ค. 2567");
        assert_eq!(thai_short_date("soon"), "soon");
    }

    #[test]
    fn thai_dates_follow_the_bangkok_calendar() {
        assert_eq!(thai_short_date("2024-06-09T20:00:00Z"), "10 มิ.ย. 2567");
        assert_eq!(thai_short_date("2024-06-09T20:00:00+07:00"), "9 มิ.ย. 2567");
        assert_eq!(thai_short_date("2024-06-09 20:00:00"), "9 มิ.ย. 2567");
        assert_eq!(thai_short_date("2024-12-31T17:30:00Z"), "1 ม.ค. 2568");
        assert_eq!(thai_short_date(" "), "-");
    }

    #[test]
    fn money_groups_and_trims_decimals() {
        assert_eq!(format_money(&FieldValue::from(1_234_567.5)), "1,234,567.5");
        assert_eq!(format_money(&FieldValue::from("1000")), "1,000");
        assert_eq!(format_money(&FieldValue::from(0.126)), "0.13");
        assert_eq!(format_money(&FieldValue::from(-1500.0)), "-1,500");
        assert_eq!(format_money(&FieldValue::from("n/a")), "n/a");
    }

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_284), "1,284");
        assert_eq!(format_count(23_901_000), "23,901,000");
    }

    #[test]
    fn initials_come_from_local_part() {
        assert_eq!(initials_from_email("john.doe@psu.ac.th"), "JO");
        assert_eq!(initials_from_email("a.b@x"), "AB");
        assert_eq!(initials_from_email("__@x"), "U");
        assert_eq!(initials_from_email(""), "U");
    }

    #[test]
    fn keys_humanize() {
        assert_eq!(humanize_key("form_research_plan"), "Form research plan");
        assert_eq!(humanize_key("roles"), "Roles");
        assert_eq!(humanize_key(""), "");
    }

    #[test]
    fn render_substitutes_placeholder() {
        assert_eq!(render(None, CellFormat::Plain), "-");
        assert_eq!(render(Some(&FieldValue::from("")), CellFormat::Money), "-");
        assert_eq!(
            render(Some(&FieldValue::from("1234567890123")), CellFormat::MaskedCard),
            "12****23"
        );
    }
}
