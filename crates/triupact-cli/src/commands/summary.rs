use anyhow::anyhow;
use triupact_core::summary::{SUMMARY_PATH, Summary, SummaryGroup};

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{format_summary, summary_json, to_json};

pub(crate) async fn handle_summary(
    ctx: &AppContext,
    group: SummaryGroup,
    output: OutputFormat,
) -> CliResult<()> {
    println!("{}", render_summary(ctx, group, output).await?);
    Ok(())
}

async fn render_summary(
    ctx: &AppContext,
    group: SummaryGroup,
    output: OutputFormat,
) -> CliResult<String> {
    let body = ctx.get_json(SUMMARY_PATH).await?;
    let summary = Summary::from_body(&body)
        .map_err(|err| CliError::failure(anyhow!("failed to parse dashboard summary: {err}")))?;
    match output {
        OutputFormat::Table => Ok(format_summary(&summary, group)),
        OutputFormat::Json => to_json(&summary_json(&summary, group)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::context_with;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use serde_json::{Value, json};
    use triupact_test_support::fixtures;

    #[tokio::test]
    async fn forms_group_is_rendered_with_total() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path(SUMMARY_PATH);
            then.status(200).json_body(fixtures::dashboard_summary());
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_with(&server, &dir).expect("context");

        let text = render_summary(&ctx, SummaryGroup::Forms, OutputFormat::Json)
            .await
            .expect("summary succeeds");
        mock.assert();
        let value: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["group"], "forms");
        assert_eq!(value["total"], 276);
        assert_eq!(value["entries"][0]["key"], "formResearchPlan");
    }

    #[tokio::test]
    async fn malformed_summary_is_a_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path(SUMMARY_PATH);
            then.status(200).json_body(json!({"data": "nope"}));
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_with(&server, &dir).expect("context");

        let err = render_summary(&ctx, SummaryGroup::All, OutputFormat::Table)
            .await
            .expect_err("bad shape");
        assert_eq!(err.exit_code(), 3);
    }
}
