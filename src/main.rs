mod cli;

use cli::{Args, Commands};
use npm_trust::adapters::outbound::console::{StderrProgressReporter, StdoutPresenter};
use npm_trust::adapters::outbound::filesystem::JsonPolicyFile;
use npm_trust::adapters::outbound::formatters::TextReportFormatter;
use npm_trust::adapters::outbound::network::NpmWebsiteClient;
use npm_trust::adapters::outbound::package_manager::NpmCli;
use npm_trust::application::dto::AssessmentRequest;
use npm_trust::application::use_cases::AssessDependenciesUseCase;
use npm_trust::ports::outbound::{OutputPresenter, ReportFormatter};
use npm_trust::shared::error::{ExitCode, TrustError};
use npm_trust::shared::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    init_logging();

    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Check { verbose } => check(verbose).await,
    }
}

async fn check(verbose: bool) -> Result<()> {
    let project_path = current_dir()?;

    // Create adapters (Dependency Injection)
    let policy_file = JsonPolicyFile::in_dir(&project_path);
    let npm = NpmCli::new();
    let registry = NpmCli::new();
    let dependents_source = NpmWebsiteClient::new()?;
    let progress_reporter = StderrProgressReporter::new();

    let use_case = AssessDependenciesUseCase::new(
        policy_file,
        npm,
        registry,
        dependents_source,
        progress_reporter,
    );

    let response = use_case
        .execute(AssessmentRequest::new(project_path))
        .await?;

    log::debug!(
        "excluded={} unresolved={} failed_lookups={}",
        response.excluded_count,
        response.unresolved_count,
        response.failed_lookup_count
    );

    let use_colors = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let formatter = TextReportFormatter::new(verbose, use_colors);
    let output = formatter.format(&response.report)?;

    StdoutPresenter::new().present(&output)?;
    Ok(())
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        TrustError::DependencyListingFailed {
            path: PathBuf::from("."),
            details: format!("Failed to determine the working directory: {}", e),
        }
        .into()
    })
}

/// Initialize the `log` backend from `RUST_LOG`, defaulting to warnings only
fn init_logging() {
    let filter = std::env::var("RUST_LOG").unwrap_or_default();
    let show_target = filter.contains("debug") || filter.contains("trace");

    let env = env_logger::Env::default().filter_or("RUST_LOG", "warn");

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(show_target)
        .init();
}
