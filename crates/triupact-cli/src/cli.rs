//! Argument parsing, logging setup, and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use triupact_core::summary::SummaryGroup;
use triupact_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging, resolve_build_sha,
};
use url::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliDependencies, CliResult, parse_url};
use crate::commands::{auth, resources, summary};
use crate::store::{FileStore, default_session_path};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8888";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    install_logging(&cli);

    let trace_id = Uuid::new_v4().to_string();
    debug!(trace_id, "starting command");
    let deps = match CliDependencies::from_env(cli.timeout, &trace_id) {
        Ok(deps) => deps,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            return err.exit_code();
        }
    };

    match dispatch(cli, &deps).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn install_logging(cli: &Cli) {
    let build_sha = resolve_build_sha();
    let config = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
        build_sha: &build_sha,
    };
    if let Err(err) = init_logging(&config) {
        eprintln!("warning: logging disabled: {err}");
    }
}

async fn dispatch(cli: Cli, deps: &CliDependencies) -> CliResult<()> {
    let session_path = cli.session_file.unwrap_or_else(default_session_path);
    let ctx = AppContext::new(
        deps.client.clone(),
        &cli.api_url,
        FileStore::new(session_path),
    );

    match cli.command {
        Command::Login(args) => auth::handle_login(&ctx, &args.email, args.password).await,
        Command::Logout => {
            auth::handle_logout(&ctx);
            Ok(())
        }
        Command::Whoami => auth::handle_whoami(&ctx, cli.output),
        Command::Ls(args) => resources::handle_list(&ctx, &args.into(), cli.output).await,
        Command::Summary(args) => summary::handle_summary(&ctx, args.group, cli.output).await,
        Command::Resources => resources::handle_catalogue(cli.output),
    }
}

/// Output format for commands that render structured data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser)]
#[command(
    name = "triupact",
    about = "Command-line client for the TriupAct research administration API"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "TRIUPACT_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    api_url: Url,
    #[arg(
        long,
        global = true,
        env = "TRIUPACT_SESSION_FILE",
        help = "Session file (defaults to ~/.triupact/session.json)"
    )]
    session_file: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "TRIUPACT_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[arg(long, global = true, env = "TRIUPACT_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
    #[arg(
        long,
        global = true,
        env = "TRIUPACT_LOG_FORMAT",
        default_value = "auto",
        help = "Log format: json, pretty, or auto"
    )]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session.
    Login(LoginArgs),
    /// Forget the stored session.
    Logout,
    /// Show the stored session.
    Whoami,
    /// List one page of a resource.
    Ls(ListArgs),
    /// Show dashboard counts.
    Summary(SummaryArgs),
    /// List the known resources.
    Resources,
}

#[derive(Args)]
struct LoginArgs {
    #[arg(long, env = "TRIUPACT_EMAIL")]
    email: String,
    #[arg(long, env = "TRIUPACT_PASSWORD", help = "Prompted for when omitted")]
    password: Option<String>,
}

#[derive(Args)]
struct ListArgs {
    #[arg(help = "Resource slug, see `triupact resources`")]
    resource: String,
    #[arg(long, short = 'q', default_value = "")]
    query: String,
    #[arg(long, help = "Sort key; defaults to the resource's first sort")]
    sort: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long, help = "Rows per page; defaults to the resource's page size")]
    page_size: Option<usize>,
}

impl From<ListArgs> for resources::ListRequest {
    fn from(args: ListArgs) -> Self {
        Self {
            resource: args.resource,
            query: args.query,
            sort: args.sort,
            page: args.page,
            page_size: args.page_size,
        }
    }
}

#[derive(Args)]
struct SummaryArgs {
    #[arg(long, default_value = "all", help = "all, lookups, forms, or people")]
    group: SummaryGroup,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let cli = Cli::try_parse_from(["triupact", "resources"]).expect("parses");
        assert_eq!(cli.api_url.as_str(), "http://127.0.0.1:8888/");
        assert_eq!(cli.output, OutputFormat::Table);
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(cli.session_file.is_none());
        assert!(matches!(cli.command, Command::Resources));
    }

    #[test]
    fn list_arguments_parse() {
        let cli = Cli::try_parse_from([
            "triupact",
            "ls",
            "departments",
            "-q",
            "sci",
            "--sort",
            "code-asc",
            "--page",
            "2",
            "--page-size",
            "10",
            "--output",
            "json",
        ])
        .expect("parses");
        assert_eq!(cli.output, OutputFormat::Json);
        let Command::Ls(args) = cli.command else {
            panic!("expected ls");
        };
        let request = resources::ListRequest::from(args);
        assert_eq!(request.resource, "departments");
        assert_eq!(request.query, "sci");
        assert_eq!(request.sort.as_deref(), Some("code-asc"));
        assert_eq!(request.page, 2);
        assert_eq!(request.page_size, Some(10));
    }

    #[test]
    fn summary_group_parses_and_rejects_unknown() {
        let cli =
            Cli::try_parse_from(["triupact", "summary", "--group", "forms"]).expect("parses");
        assert!(matches!(
            cli.command,
            Command::Summary(SummaryArgs {
                group: SummaryGroup::Forms
            })
        ));
        assert!(Cli::try_parse_from(["triupact", "summary", "--group", "charts"]).is_err());
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        assert!(Cli::try_parse_from(["triupact", "--api-url", "not a url", "whoami"]).is_err());
    }

    #[test]
    fn log_format_flag_uses_telemetry_parser() {
        let cli = Cli::try_parse_from(["triupact", "--log-format", "json", "logout"])
            .expect("parses");
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.log_level, DEFAULT_LOG_LEVEL);
    }
}
