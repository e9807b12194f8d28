mod actions;
mod client;
mod config;
mod dispatcher;
mod error;
mod types;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::actions::{catalog, ActionKind};
use crate::client::{HttpBackend, StrategyBackend};
use crate::config::{ClientConfig, Locale, DEFAULT_CONFIG_FILE};
use crate::dispatcher::{ActionDispatcher, DispatchOutcome};
use crate::error::DispatchError;
use crate::types::StrategyId;
use crate::ui::{TerminalUi, Ui};

#[derive(Parser)]
#[command(name = "strategy-ctl")]
#[command(author = "Trading Bot")]
#[command(version = "0.1.0")]
#[command(about = "Enable, disable, reset, delete and close positions of trading strategies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Backend base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Value of the user-session cookie (overrides config)
    #[arg(long)]
    session: Option<String>,

    /// Message language, zh-TW or en (overrides config)
    #[arg(long)]
    locale: Option<Locale>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a strategy
    Enable { id: String },
    /// Stop a strategy
    Disable { id: String },
    /// Reset a strategy's position state (asks for confirmation)
    Reset { id: String },
    /// Delete a strategy (asks for confirmation)
    Delete { id: String },
    /// Close a strategy's open position (asks for confirmation)
    ClosePosition { id: String },
    /// Dispatch an action by name or trigger selector, e.g. `.action-reset-strategy`
    Click {
        action: ActionKind,
        id: String,
    },
    /// List the supported actions
    Actions,
    /// Write a default configuration file
    InitConfig {
        /// Output path
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::InitConfig { output, force } => {
            init_config(&output, force)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Actions => {
            let config = load_config(&cli.config, cli.base_url, cli.session, cli.locale)?;
            show_actions(&config);
            Ok(ExitCode::SUCCESS)
        }
        command => {
            let config = load_config(&cli.config, cli.base_url, cli.session, cli.locale)?;
            let (action, id) = match command {
                Commands::Enable { id } => (ActionKind::Enable, id),
                Commands::Disable { id } => (ActionKind::Disable, id),
                Commands::Reset { id } => (ActionKind::Reset, id),
                Commands::Delete { id } => (ActionKind::Delete, id),
                Commands::ClosePosition { id } => (ActionKind::ClosePosition, id),
                Commands::Click { action, id } => (action, id),
                Commands::Actions | Commands::InitConfig { .. } => return Ok(ExitCode::SUCCESS),
            };
            run_action(&config, action, StrategyId::new(id), cli.yes).await
        }
    }
}

fn load_config(
    path: &Path,
    base_url: Option<String>,
    session: Option<String>,
    locale: Option<Locale>,
) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(path)?;
    if let Some(locale) = locale {
        config.locale = locale;
    }
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if let Some(session) = session {
        config.session_cookie = Some(session);
    }
    if let Err(errors) = config.validate() {
        return Err(anyhow!("invalid configuration: {}", errors.join(", ")));
    }
    Ok(config)
}

async fn run_action(config: &ClientConfig, action: ActionKind, id: StrategyId, assume_yes: bool) -> Result<ExitCode> {
    let backend: Arc<dyn StrategyBackend> = Arc::new(
        HttpBackend::from_config(config).context("failed to build HTTP client")?,
    );
    let ui: Arc<dyn Ui> = Arc::new(
        TerminalUi::new(Arc::clone(&backend), config.page_path.clone()).assume_yes(assume_yes),
    );
    let dispatcher = ActionDispatcher::new(backend, ui, config.locale);

    let mut transitions = dispatcher.subscribe();
    let transition_log = tokio::spawn(async move {
        while let Ok(change) = transitions.recv().await {
            debug!("[{} {}] -> {}", change.action, change.strategy, change.state);
            if change.state.is_terminal() {
                break;
            }
        }
    });

    let result = dispatcher.dispatch(action, &id).await;
    let _ = transition_log.await;
    if let Ok(DispatchOutcome::Succeeded { reply }) = &result {
        info!("{} {} done (HTTP {})", action, id, reply.status);
    }
    Ok(ExitCode::from(exit_status(&result)))
}

/// The error modal has already shown the failure; only the status is left.
fn exit_status(result: &std::result::Result<DispatchOutcome, DispatchError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

fn show_actions(config: &ClientConfig) {
    println!(
        "{:<16} {:<26} {:<7} {:<32} {}",
        "ACTION", "TRIGGER", "METHOD", "ENDPOINT", "CONFIRM"
    );
    for descriptor in catalog(config.locale) {
        println!(
            "{:<16} {:<26} {:<7} {:<32} {}",
            descriptor.kind,
            descriptor.trigger_selector,
            descriptor.method,
            descriptor.endpoint_template,
            if descriptor.requires_confirmation {
                descriptor.confirmation_prompt
            } else {
                "-"
            }
        );
    }
}

fn init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            output.display()
        ));
    }

    let contents = ClientConfig::default().to_toml()?;
    std::fs::write(output, contents)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!("Wrote default configuration to {}", output.display());
    Ok(())
}
