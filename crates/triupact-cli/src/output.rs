//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use triupact_core::CanonicalRecord;
use triupact_core::format::format_count;
use triupact_core::listview::ListPage;
use triupact_core::resources::{ColumnView, Resource, ResourceSpec};
use triupact_core::session::SessionToken;
use triupact_core::summary::{Summary, SummaryGroup};

use crate::client::{CliError, CliResult};

const COLUMN_GAP: &str = "  ";

/// Pretty-printed JSON.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

/// Left-aligned plain-text table; widths follow the widest cell per column.
pub(crate) fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            let width = cell.chars().count();
            match widths.get_mut(index) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(line(headers));
    lines.extend(rows.iter().map(|row| line(row)));
    lines.join("\n")
}

/// One page of a resource as a table followed by the range line.
pub(crate) fn format_listing(
    spec: &ResourceSpec,
    columns: &[ColumnView],
    page: &ListPage<'_, CanonicalRecord>,
) -> String {
    let mut out = format!("{}\n", spec.title);
    if page.total == 0 {
        out.push_str(if page.raw_total == 0 {
            "no records"
        } else {
            "no records match the query"
        });
        return out;
    }
    let headers: Vec<String> = columns
        .iter()
        .map(|column| column.label.to_uppercase())
        .collect();
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| ResourceSpec::render_cell(record, column))
                .collect()
        })
        .collect();
    out.push_str(&format_table(&headers, &rows));
    out.push_str(&format!(
        "\n{} (page {}/{})",
        page.summary(),
        page.current_page,
        page.total_pages
    ));
    out
}

/// JSON shape of one page.
pub(crate) fn listing_json(
    spec: &ResourceSpec,
    page_size: usize,
    page: &ListPage<'_, CanonicalRecord>,
) -> Value {
    let rows: Vec<Value> = page.rows.iter().map(|record| record.to_json()).collect();
    json!({
        "resource": spec.slug,
        "page": page.current_page,
        "pageSize": page_size,
        "totalPages": page.total_pages,
        "total": page.total,
        "rawTotal": page.raw_total,
        "rows": rows,
    })
}

/// Group entries with a total line and, for `all`, the headline counts.
pub(crate) fn format_summary(summary: &Summary, group: SummaryGroup) -> String {
    if summary.is_empty() {
        return "no summary data".to_string();
    }
    let mut out = String::new();
    if group == SummaryGroup::All {
        let highlights: Vec<String> = summary
            .highlights()
            .into_iter()
            .map(|(label, count)| format!("{label}: {}", format_count(count)))
            .collect();
        out.push_str(&highlights.join(" | "));
        out.push_str("\n\n");
    }
    let rows: Vec<Vec<String>> = summary
        .group(group)
        .iter()
        .map(|entry| vec![entry.label.clone(), format_count(entry.count)])
        .collect();
    out.push_str(&format_table(&["ITEM".to_string(), "COUNT".to_string()], &rows));
    out.push_str(&format!(
        "\ntotal ({}): {}",
        group.label(),
        format_count(summary.total(group))
    ));
    out
}

/// JSON shape of one summary group.
pub(crate) fn summary_json(summary: &Summary, group: SummaryGroup) -> Value {
    let entries: Vec<Value> = summary
        .group(group)
        .iter()
        .map(|entry| json!({"key": entry.key, "label": entry.label, "count": entry.count}))
        .collect();
    json!({
        "group": group.key(),
        "total": summary.total(group),
        "entries": entries,
    })
}

/// Session status lines.
pub(crate) fn format_session(token: Option<&SessionToken>, now: DateTime<Utc>) -> String {
    token.map_or_else(
        || "not signed in".to_string(),
        |token| {
            let remaining = token.remaining(now).as_secs();
            format!(
                "signed in\nexpires: {}\nremaining: {}m {}s",
                token.expires_at.to_rfc3339(),
                remaining / 60,
                remaining % 60
            )
        },
    )
}

/// JSON shape of the session status.
pub(crate) fn session_json(token: Option<&SessionToken>, now: DateTime<Utc>) -> Value {
    json!({
        "authenticated": token.is_some(),
        "expiresAt": token.map(|token| token.expires_at.to_rfc3339()),
        "remainingSecs": token.map(|token| token.remaining(now).as_secs()),
    })
}

/// Resource catalogue rows: slug, endpoint, route, sort keys.
pub(crate) fn catalogue_rows() -> Vec<Vec<String>> {
    Resource::ALL
        .into_iter()
        .map(|resource| {
            let spec = resource.spec();
            vec![
                spec.slug.to_string(),
                spec.title.to_string(),
                spec.endpoint.to_string(),
                resource.route(),
                spec.sort_keys().collect::<Vec<_>>().join(","),
            ]
        })
        .collect()
}

pub(crate) fn format_catalogue() -> String {
    let headers = ["SLUG", "TITLE", "ENDPOINT", "ROUTE", "SORTS"].map(str::to_string);
    format_table(&headers, &catalogue_rows())
}

pub(crate) fn catalogue_json() -> Value {
    let entries: Vec<Value> = Resource::ALL
        .into_iter()
        .map(|resource| {
            let spec = resource.spec();
            json!({
                "slug": spec.slug,
                "title": spec.title,
                "endpoint": spec.endpoint,
                "route": resource.route(),
                "sorts": spec.sort_keys().collect::<Vec<_>>(),
                "pageSize": spec.list.default_page_size,
            })
        })
        .collect();
    Value::Array(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use triupact_core::ListViewState;
    use triupact_test_support::fixtures;

    #[test]
    fn tables_pad_by_character_count() {
        let table = format_table(
            &["NAME".to_string(), "CODE".to_string()],
            &[
                vec!["วิทยาศาสตร์".to_string(), "SCI".to_string()],
                vec!["Arts".to_string(), "ART".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        let code_column = lines[0].find("CODE").unwrap_or_default();
        assert_eq!(lines[2].find("ART"), Some(code_column));
        assert!(lines.iter().all(|line| !line.ends_with(' ')));
    }

    #[test]
    fn listing_shows_range_and_page() {
        let spec = Resource::Departments.spec();
        let mut state = ListViewState::new(&spec.list);
        state.replace_records(spec.normalize(&fixtures::departments()));
        let page = state.project();
        let columns = spec.columns_for(state.records());
        let text = format_listing(spec, &columns, &page);
        assert!(text.starts_with(spec.title));
        assert!(text.ends_with("showing 1-5 of 5 (page 1/1)"));

        state.set_query("no such department");
        let empty = state.project();
        assert!(format_listing(spec, &columns, &empty).ends_with("no records match the query"));
    }

    #[test]
    fn listing_json_reports_paging() {
        let spec = Resource::Users.spec();
        let mut state = ListViewState::new(&spec.list);
        state.replace_records(spec.normalize(&fixtures::users()));
        let value = listing_json(spec, state.page_size(), &state.project());
        assert_eq!(value["resource"], "users");
        assert_eq!(value["total"], 3);
        assert_eq!(value["rows"][0]["email"], "newest@psu.ac.th");
    }

    #[test]
    fn summary_lists_group_and_total() -> anyhow::Result<()> {
        let summary = Summary::from_body(&fixtures::dashboard_summary())?;
        let text = format_summary(&summary, SummaryGroup::People);
        assert!(text.contains("Users"));
        assert!(text.ends_with("total (People): 1,924"));
        assert!(format_summary(&summary, SummaryGroup::All).starts_with("Provinces: 77"));
        let forms = summary_json(&summary, SummaryGroup::Forms);
        assert_eq!(forms["entries"].as_array().map(Vec::len), Some(7));
        assert_eq!(
            format_summary(&Summary::default(), SummaryGroup::All),
            "no summary data"
        );
        Ok(())
    }

    #[test]
    fn session_status_reports_remaining_time() {
        let now = Utc::now();
        let token = SessionToken::new("tok", now + TimeDelta::seconds(125));
        assert!(format_session(Some(&token), now).ends_with("remaining: 2m 5s"));
        assert_eq!(format_session(None, now), "not signed in");
        assert_eq!(
            session_json(None, now),
            json!({"authenticated": false, "expiresAt": null, "remainingSecs": null})
        );
    }

    #[test]
    fn catalogue_covers_every_resource() {
        assert_eq!(catalogue_rows().len(), Resource::ALL.len());
        assert!(format_catalogue().contains("/data/form-extend"));
        assert_eq!(catalogue_json()[0]["slug"], Resource::ALL[0].slug());
    }
}
