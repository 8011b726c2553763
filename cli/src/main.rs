//! CLI entrypoint for claim-jury
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use jury_application::{
    CaseOutcome, ConversationLogger, NoProgress, ProgressNotifier, RunDeliberationUseCase,
    RunDocketUseCase,
};
use jury_domain::OutputFormat;
use jury_infrastructure::{ConfigLoader, CsvCaseLoader, FileConfig, JsonlConversationLogger, OpenAiGateway};
use jury_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Fold command-line overrides into the loaded configuration
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(path) = &cli.dataset {
        config.dataset.path = path.clone();
    }
    if let Some(rows) = &cli.rows {
        config.dataset.rows = Some(rows.clone());
        config.dataset.limit = None;
    }
    if let Some(limit) = cli.limit {
        config.dataset.rows = None;
        config.dataset.limit = Some(limit);
    }
    if let Some(column) = &cli.internal_column {
        config.dataset.internal_column = column.clone();
    }
    if let Some(column) = &cli.external_column {
        config.dataset.external_column = column.clone();
    }
    if let Some(model) = &cli.model {
        config.model.name = model.clone();
    }
    if let Some(temperature) = cli.temperature {
        config.model.temperature = temperature;
    }
    if cli.exclude_self {
        config.jury.exclude_self = true;
    }
    if cli.fan_out {
        config.execution.fan_out = true;
    }
    if let Some(concurrency) = cli.concurrency {
        config.execution.max_concurrent_cases = concurrency;
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if let Some(path) = &cli.transcript_log {
        config.output.transcript_log = Some(path.clone());
    }
}

fn print_outcomes(outcomes: &[CaseOutcome], format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(outcomes)),
        OutputFormat::Verdict => {
            for outcome in outcomes {
                println!("{}", ConsoleFormatter::format_outcome(outcome));
            }
            println!("\n{}", ConsoleFormatter::summary(outcomes));
        }
        OutputFormat::Full => {
            for outcome in outcomes {
                match &outcome.result {
                    Ok(result) => println!("\n{}", ConsoleFormatter::format(result)),
                    Err(_) => println!("\n{}", ConsoleFormatter::format_outcome(outcome)),
                }
            }
            println!("\n{}", ConsoleFormatter::summary(outcomes));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&cli, &mut config);

    for issue in config.check()? {
        warn!("{}", issue.message);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = config.output.format.unwrap_or_default();
    let show_progress = !cli.quiet && format != OutputFormat::Json;

    info!("Starting claim-jury");

    // === Dataset ===
    let dataset_path = config.dataset.path.clone();
    let cases = CsvCaseLoader::new(
        config.dataset.internal_column.clone(),
        config.dataset.external_column.clone(),
    )
    .load(&dataset_path, &config.dataset.selection())?;

    if format != OutputFormat::Json {
        println!("Loaded {} cases from {}", cases.len(), dataset_path.display());
    }

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiGateway::from_config(&config.providers.openai)?);
    let params = config.deliberation_params();
    info!(
        "Model: {}, roles: {}, rule: {:?}",
        params.model,
        config.roster().len(),
        params.aggregator
    );

    let cancellation = CancellationToken::new();
    let mut deliberation = RunDeliberationUseCase::new(gateway, config.roster(), params)
        .with_cancellation(cancellation.clone());

    if let Some(path) = &config.output.transcript_log {
        let logger = JsonlConversationLogger::create(path)
            .with_context(|| format!("Cannot open transcript log {}", path.display()))?;
        info!("Transcript log: {}", logger.path().display());
        deliberation = deliberation.with_conversation_logger(Arc::new(logger) as Arc<dyn ConversationLogger>);
    }

    tokio::spawn({
        let cancellation = cancellation.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; cancelling remaining cases");
                cancellation.cancel();
            }
        }
    });

    let docket = RunDocketUseCase::new(deliberation);
    let progress: Box<dyn ProgressNotifier> = match (show_progress, cli.verbose) {
        (false, _) => Box::new(NoProgress),
        (true, 0) => Box::new(ProgressReporter::new()),
        (true, _) => Box::new(SimpleProgress),
    };
    let outcomes = docket.execute_with_progress(&cases, progress.as_ref()).await;

    print_outcomes(&outcomes, format);

    let failed = outcomes.iter().filter(|o| !o.is_decided()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} cases failed", failed, outcomes.len());
    }

    if format != OutputFormat::Json {
        println!("Done.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn merged(args: &[&str]) -> FileConfig {
        let cli = Cli::parse_from(std::iter::once("claim-jury").chain(args.iter().copied()));
        let mut config = FileConfig::default();
        apply_cli_overrides(&cli, &mut config);
        config
    }

    #[test]
    fn test_no_flags_keep_config() {
        assert_eq!(merged(&[]), FileConfig::default());
    }

    #[test]
    fn test_rows_replace_configured_limit() {
        let cli = Cli::parse_from(["claim-jury", "--rows", "3,7"]);
        let mut config = FileConfig::default();
        config.dataset.limit = Some(10);

        apply_cli_overrides(&cli, &mut config);

        assert_eq!(config.dataset.rows, Some(vec![3, 7]));
        assert_eq!(config.dataset.limit, None);
    }

    #[test]
    fn test_limit_replaces_configured_rows() {
        let cli = Cli::parse_from(["claim-jury", "--limit", "5"]);
        let mut config = FileConfig::default();
        config.dataset.rows = Some(vec![1, 2]);

        apply_cli_overrides(&cli, &mut config);

        assert_eq!(config.dataset.rows, None);
        assert_eq!(config.dataset.limit, Some(5));
    }

    #[test]
    fn test_flags_override_config_values() {
        let config = merged(&[
            "data/claims.csv",
            "-m",
            "gpt-4o",
            "--temperature",
            "0",
            "--exclude-self",
            "--fan-out",
            "--concurrency",
            "4",
            "-o",
            "json",
            "--transcript-log",
            "runs/jury.jsonl",
        ]);

        assert_eq!(config.dataset.path, PathBuf::from("data/claims.csv"));
        assert_eq!(config.model.name, "gpt-4o");
        assert_eq!(config.model.temperature, 0.0);
        assert!(config.jury.exclude_self);
        assert!(config.execution.fan_out);
        assert_eq!(config.execution.max_concurrent_cases, 4);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(
            config.output.transcript_log,
            Some(PathBuf::from("runs/jury.jsonl"))
        );
    }

    #[test]
    fn test_unset_switches_do_not_clear_config() {
        let cli = Cli::parse_from(["claim-jury"]);
        let mut config = FileConfig::default();
        config.jury.exclude_self = true;
        config.execution.fan_out = true;

        apply_cli_overrides(&cli, &mut config);

        assert!(config.jury.exclude_self);
        assert!(config.execution.fan_out);
    }
}
