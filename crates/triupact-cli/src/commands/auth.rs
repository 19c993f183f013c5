use anyhow::anyhow;
use chrono::Utc;
use tracing::info;
use triupact_core::SessionError;
use triupact_core::session::{LOGIN_PATH, SessionToken, login_outcome, validate_credentials};

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{format_session, session_json, to_json};

pub(crate) async fn handle_login(
    ctx: &AppContext,
    email: &str,
    password: Option<String>,
) -> CliResult<()> {
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")
            .map_err(|err| CliError::failure(anyhow!("failed to read password: {err}")))?,
    };
    let token = login(ctx, email, &password).await?;
    println!(
        "signed in; session expires {}",
        token.expires_at.to_rfc3339()
    );
    Ok(())
}

/// Exchange credentials for a session and persist it.
pub(crate) async fn login(
    ctx: &AppContext,
    email: &str,
    password: &str,
) -> CliResult<SessionToken> {
    let request = validate_credentials(email, password)
        .map_err(|err| CliError::validation(err.to_string()))?;
    let (status, body) = ctx.post_json(LOGIN_PATH, &request).await?;
    let token = login_outcome(status, &body).map_err(|err| match err {
        SessionError::Validation(message) | SessionError::Rejected(message) => {
            CliError::validation(message)
        }
        other => CliError::failure(other),
    })?;

    ctx.session.save(&token).map_err(CliError::failure)?;
    info!(email = %request.email, "signed in");
    Ok(token)
}

pub(crate) fn handle_logout(ctx: &AppContext) {
    ctx.session.clear();
    info!(path = %ctx.session.backend().path().display(), "signed out");
    println!("signed out");
}

pub(crate) fn handle_whoami(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    println!("{}", whoami(ctx, output)?);
    Ok(())
}

fn whoami(ctx: &AppContext, output: OutputFormat) -> CliResult<String> {
    let now = Utc::now();
    let token = ctx.session.active(now);
    match output {
        OutputFormat::Table => Ok(format_session(token.as_ref(), now)),
        OutputFormat::Json => to_json(&session_json(token.as_ref(), now)),
    }
}
