use tracing::debug;
use triupact_core::http::extract_list;
use triupact_core::resources::Resource;
use triupact_core::{CanonicalRecord, ListViewState};

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{catalogue_json, format_catalogue, format_listing, listing_json, to_json};

/// Inputs of one `ls` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListRequest {
    pub(crate) resource: String,
    pub(crate) query: String,
    pub(crate) sort: Option<String>,
    pub(crate) page: usize,
    pub(crate) page_size: Option<usize>,
}

pub(crate) async fn handle_list(
    ctx: &AppContext,
    request: &ListRequest,
    output: OutputFormat,
) -> CliResult<()> {
    println!("{}", list_page(ctx, request, output).await?);
    Ok(())
}

async fn list_page(
    ctx: &AppContext,
    request: &ListRequest,
    output: OutputFormat,
) -> CliResult<String> {
    let resource = Resource::from_slug(&request.resource).ok_or_else(|| {
        let known: Vec<&str> = Resource::ALL.iter().map(|resource| resource.slug()).collect();
        CliError::validation(format!(
            "unknown resource '{}' (expected one of: {})",
            request.resource,
            known.join(", ")
        ))
    })?;
    let spec = resource.spec();

    let mut state: ListViewState<CanonicalRecord> = ListViewState::new(&spec.list);
    if let Some(size) = request.page_size {
        if size == 0 {
            return Err(CliError::validation("page size must be at least 1"));
        }
        state.set_page_size(size);
    }
    if let Some(sort) = request.sort.as_deref()
        && !state.set_sort(sort)
    {
        let keys: Vec<&str> = spec.sort_keys().collect();
        return Err(CliError::validation(format!(
            "unknown sort '{sort}' for {} (expected one of: {})",
            spec.slug,
            keys.join(", ")
        )));
    }

    let body = ctx.get_json(spec.endpoint).await?;
    let records = spec.normalize(&extract_list(&body));
    debug!(resource = spec.slug, records = records.len(), "records fetched");
    state.replace_records(records);
    state.set_query(request.query.as_str());
    state.go_to(request.page);

    let page = state.project();
    match output {
        OutputFormat::Table => {
            let columns = spec.columns_for(state.records());
            Ok(format_listing(spec, &columns, &page))
        }
        OutputFormat::Json => to_json(&listing_json(spec, state.page_size(), &page)),
    }
}

pub(crate) fn handle_catalogue(output: OutputFormat) -> CliResult<()> {
    let text = match output {
        OutputFormat::Table => format_catalogue(),
        OutputFormat::Json => to_json(&catalogue_json())?,
    };
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::context_with;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use serde_json::{Value, json};
    use triupact_test_support::fixtures;

    fn request(resource: &str) -> ListRequest {
        ListRequest {
            resource: resource.to_string(),
            query: String::new(),
            sort: None,
            page: 1,
            page_size: None,
        }
    }

    #[tokio::test]
    async fn departments_render_sorted_table() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/departments");
            then.status(200)
                .json_body(fixtures::list_envelope(&fixtures::departments()));
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_with(&server, &dir).expect("context");

        let text = list_page(&ctx, &request("departments"), OutputFormat::Table)
            .await
            .expect("list succeeds");
        mock.assert();
        let rows: Vec<&str> = text.lines().skip(2).take(5).collect();
        assert!(rows[0].contains("arts and humanities"));
        assert!(rows[4].contains("Science"));
        assert!(text.ends_with("showing 1-5 of 5 (page 1/1)"));
    }

    #[tokio::test]
    async fn query_sort_and_paging_apply_to_json_output() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/departments");
            then.status(200).json_body(json!(fixtures::departments()));
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_with(&server, &dir).expect("context");

        let list = ListRequest {
            sort: Some("name-desc".into()),
            page_size: Some(2),
            page: 9,
            ..request("departments")
        };
        let text = list_page(&ctx, &list, OutputFormat::Json)
            .await
            .expect("list succeeds");
        let value: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["page"], 3);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(1));

        let filtered = ListRequest {
            query: "BANGKOK".into(),
            ..request("departments")
        };
        let text = list_page(&ctx, &filtered, OutputFormat::Json)
            .await
            .expect("list succeeds");
        let value: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["total"], 1);
        assert_eq!(value["rawTotal"], 5);
    }

    #[tokio::test]
    async fn unknown_resource_and_sort_are_validation_errors() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/departments");
            then.status(200).json_body(json!([]));
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_with(&server, &dir).expect("context");

        let err = list_page(&ctx, &request("widgets"), OutputFormat::Table)
            .await
            .expect_err("unknown resource");
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("form-research-owner"));

        let bad_sort = ListRequest {
            sort: Some("colour".into()),
            ..request("departments")
        };
        let err = list_page(&ctx, &bad_sort, OutputFormat::Table)
            .await
            .expect_err("unknown sort");
        assert!(err.display_message().contains("name-asc"));

        let zero = ListRequest {
            page_size: Some(0),
            ..request("departments")
        };
        assert!(list_page(&ctx, &zero, OutputFormat::Table).await.is_err());
        mock.assert_calls(0);
    }

    #[tokio::test]
    async fn empty_payload_reports_no_records() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!({"data": []}));
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_with(&server, &dir).expect("context");

        let text = list_page(&ctx, &request("users"), OutputFormat::Table)
            .await
            .expect("list succeeds");
        assert!(text.ends_with("no records"));
    }

    #[tokio::test]
    async fn server_failure_is_operational_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/roles");
            then.status(503);
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_with(&server, &dir).expect("context");

        let err = list_page(&ctx, &request("roles"), OutputFormat::Table)
            .await
            .expect_err("server failure");
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().starts_with("HTTP 503"));
    }

    #[test]
    fn catalogue_renders_in_both_formats() {
        assert!(handle_catalogue(OutputFormat::Table).is_ok());
        assert!(handle_catalogue(OutputFormat::Json).is_ok());
    }
}
