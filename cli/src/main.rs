//! CLI entrypoint for gavel
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use gavel_application::{
    ApplyIntentInput, ApplyIntentUseCase, ExportMinutesUseCase, OpenMeetingInput,
    OpenMeetingUseCase, ProceedingsLogger, QueryMeetingUseCase,
};
use gavel_infrastructure::{ConfigLoader, FileConfig, JsonFileMeetingStore, JsonlProceedingsLogger};
use gavel_presentation::{
    Cli, Command, ConsoleFormatter, JsonFormatter, OutputFormat, OutputFormatter,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Milliseconds since the epoch; the engine never reads the clock itself
fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

#[tokio::main]
async fn main() -> Result<()> {
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
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    for issue in config.validate() {
        warn!("{}", issue.message);
    }

    let Some(command) = cli.command.clone() else {
        bail!("No command given. Run `gavel --help` for the list of actions.");
    };

    // === Dependency Injection ===
    let store_dir = config.storage.resolve_dir();
    info!("Meeting store: {}", store_dir.display());
    let store = Arc::new(JsonFileMeetingStore::new(store_dir));

    let formatter: Box<dyn OutputFormatter> = match cli.output {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };
    let now = now_ms();
    let actor = cli.actor();

    if let Some(intent) = command.to_intent(&actor, now) {
        let mut use_case = ApplyIntentUseCase::new(store.clone());
        if let Some(path) = &config.logging.proceedings {
            match JsonlProceedingsLogger::new(path) {
                Some(logger) => {
                    let logger: Arc<dyn ProceedingsLogger> = Arc::new(logger);
                    use_case = use_case.with_proceedings_logger(logger);
                }
                None => warn!("Proceedings log disabled: cannot open {}", path.display()),
            }
        }

        let output = use_case
            .execute(ApplyIntentInput::new(cli.meeting.clone(), actor, intent, now))
            .await?;
        print!("{}", formatter.format_entries(&output.entries));
        if cli.output == OutputFormat::Json {
            println!();
        }
        return Ok(());
    }

    match command {
        Command::New => {
            let output = OpenMeetingUseCase::new(store)
                .execute(OpenMeetingInput::new(cli.meeting.clone(), config.to_settings()))
                .await?;
            println!("{}", formatter.format_state(&output.state));
        }
        Command::List => {
            let ids = QueryMeetingUseCase::new(store).list().await?;
            match cli.output {
                OutputFormat::Json => println!("{}", JsonFormatter::to_json(&ids)),
                OutputFormat::Text => ids.iter().for_each(|id| println!("{}", id)),
            }
        }
        Command::Show => {
            let state = QueryMeetingUseCase::new(store).state(&cli.meeting, now).await?;
            println!("{}", formatter.format_state(&state));
        }
        Command::Available => {
            let availability = QueryMeetingUseCase::new(store)
                .availability(&cli.meeting, now)
                .await?;
            println!("{}", formatter.format_availability(&availability));
        }
        Command::Minutes => {
            let minutes = ExportMinutesUseCase::new(store).execute(&cli.meeting).await?;
            println!("{}", formatter.format_minutes(&minutes));
        }
        other => bail!("{:?} is not a query", other),
    }

    Ok(())
}
