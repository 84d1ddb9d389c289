// # tinylink - TinyLink command-line client
//
// This binary is a THIN shell over tinylink-core:
// - DO NOT add link logic here (validation, sorting, not-found handling)
// - All client behavior MUST be in tinylink-core
// - Configuration is via environment variables, optionally from a `.env` file
//
// The binary is responsible for:
// 1. Reading configuration from the environment
// 2. Initializing logging and the runtime
// 3. Wiring the HTTP gateway into the registry, resolver and stats view
// 4. Rendering results to the terminal
//
// ## Configuration
//
// - `TINYLINK_API_URL`: Link store base URL (default http://localhost:5000)
// - `TINYLINK_REDIRECT_URL`: Redirect service base URL (default: API URL)
// - `TINYLINK_SHORT_URL_BASE`: Origin used when printing short URLs (default: redirect URL)
// - `TINYLINK_TIMEOUT_SECS`: Per-request timeout in seconds (default 10)
// - `TINYLINK_LOG_LEVEL`: trace, debug, info, warn, error (default warn)
//
// ## Example
//
// ```bash
// export TINYLINK_API_URL=https://links.example.com
//
// tinylink create https://www.rust-lang.org --code rustlg
// tinylink list --sort clicks --order desc
// tinylink stats rustlg
// ```

mod cli;

use anyhow::Result;
use clap::Parser;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tinylink_core::error::{CREATE_FAILED, DELETE_FAILED};
use tinylink_core::present::{DEFAULT_URL_WIDTH, format_timestamp, truncate_url};
use tinylink_core::traits::{LinkGateway, Navigator};
use tinylink_core::{
    ClientConfig, LinkRegistry, RedirectResolver, RegistryEvent, StatsOutcome, StatsView,
    ViewQuery,
};
use tinylink_gateway_http::HttpLinkGateway;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Commands};

/// Exit codes for different termination scenarios
///
/// - 0: Command succeeded
/// - 1: Configuration or startup error
/// - 2: Command failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TinylinkExitCode {
    /// Command completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// The command ran but did not succeed
    CommandFailed = 2,
}

impl From<TinylinkExitCode> for ExitCode {
    fn from(code: TinylinkExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    client: ClientConfig,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let mut client = ClientConfig::new();

        if let Ok(url) = env::var("TINYLINK_API_URL") {
            client = client.with_api_url(url);
        }
        if let Ok(url) = env::var("TINYLINK_REDIRECT_URL") {
            client = client.with_redirect_url(url);
        }
        if let Ok(base) = env::var("TINYLINK_SHORT_URL_BASE") {
            client = client.with_short_url_base(base);
        }
        if let Ok(raw) = env::var("TINYLINK_TIMEOUT_SECS") {
            let secs = raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("TINYLINK_TIMEOUT_SECS must be a whole number of seconds. Got: {}", raw)
            })?;
            client = client.with_timeout_secs(secs);
        }

        Ok(Self {
            client,
            log_level: env::var("TINYLINK_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.client.validate()?;
        parse_log_level(&self.log_level)?;
        Ok(())
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "TINYLINK_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

fn main() -> ExitCode {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return TinylinkExitCode::ConfigError.into();
        }
    };

    if let Some(ref url) = cli.api_url {
        config.client.api_url = url.clone();
    }

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return TinylinkExitCode::ConfigError.into();
    }

    // Logs go to stderr so command output stays pipeable
    let log_level = parse_log_level(&config.log_level).unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return TinylinkExitCode::ConfigError.into();
    }

    let gateway = match HttpLinkGateway::from_config(&config.client) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return TinylinkExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return TinylinkExitCode::ConfigError.into();
        }
    };

    rt.block_on(run(cli.command, config.client, Arc::new(gateway)))
        .into()
}

/// Run one command against the link store
async fn run(
    command: Commands,
    config: ClientConfig,
    gateway: Arc<dyn LinkGateway>,
) -> TinylinkExitCode {
    let (registry, mut events) = LinkRegistry::new(gateway.clone(), &config);

    let code = match command {
        Commands::List {
            search,
            sort,
            order,
        } => {
            let mut query = ViewQuery::new().search(search);
            if let Some(field) = sort {
                query = query.sort_by(field, order);
            }
            list(&registry, &query, &config).await
        }
        Commands::Create { url, code } => create(&registry, &url, code.as_deref(), &config).await,
        Commands::Delete { code, yes } => delete(&registry, &code, yes).await,
        Commands::Stats { code } => stats(StatsView::new(gateway), &code, &config).await,
        Commands::Open { code } => open(&code, &config),
        Commands::Health => health(gateway.as_ref()).await,
    };

    drain_events(&mut events);
    code
}

async fn list(registry: &LinkRegistry, query: &ViewQuery, config: &ClientConfig) -> TinylinkExitCode {
    if registry.load().await.is_err()
        && let Some(banner) = registry.load_error().await
    {
        eprintln!("{}", banner);
        return TinylinkExitCode::CommandFailed;
    }

    let rows = registry.view(query).await;
    if rows.is_empty() {
        println!("No links found.");
        return TinylinkExitCode::Success;
    }

    println!(
        "{:<10} {:<43} {:>7}  {:<19}  {}",
        "CODE", "TARGET", "CLICKS", "LAST CLICKED", "SHORT URL"
    );
    for record in &rows {
        println!(
            "{:<10} {:<43} {:>7}  {:<19}  {}",
            record.code,
            truncate_url(&record.target_url, DEFAULT_URL_WIDTH),
            record.clicks,
            format_timestamp(record.last_clicked),
            record.short_url(config.short_base()),
        );
    }

    TinylinkExitCode::Success
}

async fn create(
    registry: &LinkRegistry,
    url: &str,
    code: Option<&str>,
    config: &ClientConfig,
) -> TinylinkExitCode {
    match registry.create(url, code).await {
        Ok(record) => {
            println!("Link created successfully!");
            println!("{}", record.short_url(config.short_base()));
            TinylinkExitCode::Success
        }
        Err(e) => {
            eprintln!("{}", e.user_message(CREATE_FAILED));
            TinylinkExitCode::CommandFailed
        }
    }
}

async fn delete(registry: &LinkRegistry, code: &str, yes: bool) -> TinylinkExitCode {
    if !yes {
        match confirm("Are you sure you want to delete this link? [y/N] ").await {
            Ok(true) => {}
            Ok(false) => {
                println!("Cancelled.");
                return TinylinkExitCode::Success;
            }
            Err(e) => {
                error!("Failed to read confirmation: {}", e);
                return TinylinkExitCode::CommandFailed;
            }
        }
    }

    match registry.remove(code).await {
        Ok(()) => {
            println!("Deleted {}", code);
            TinylinkExitCode::Success
        }
        Err(e) => {
            eprintln!("{}", e.user_message(DELETE_FAILED));
            TinylinkExitCode::CommandFailed
        }
    }
}

async fn stats(view: StatsView, code: &str, config: &ClientConfig) -> TinylinkExitCode {
    let outcome = view.fetch(code).await;

    if let Some(message) = outcome.message() {
        eprintln!("{}", message);
        return TinylinkExitCode::CommandFailed;
    }

    for (label, value) in outcome.rows(config.short_base()) {
        println!("{:<14} {}", format!("{}:", label), value);
    }
    TinylinkExitCode::Success
}

fn open(code: &str, config: &ClientConfig) -> TinylinkExitCode {
    let resolver = RedirectResolver::new(config.redirect_base(), PrintNavigator);
    let outcome = resolver.resolve(code);
    debug!("Resolve outcome: {:?}", outcome);
    TinylinkExitCode::Success
}

async fn health(gateway: &dyn LinkGateway) -> TinylinkExitCode {
    match gateway.health_check().await {
        Ok(status) => {
            match status.body {
                serde_json::Value::String(text) => println!("{}", text),
                body => match serde_json::to_string_pretty(&body) {
                    Ok(pretty) => println!("{}", pretty),
                    Err(_) => println!("{}", body),
                },
            }
            TinylinkExitCode::Success
        }
        Err(e) => {
            eprintln!("Health check failed: {}", e);
            TinylinkExitCode::CommandFailed
        }
    }
}

/// Ask a yes/no question on stdin; anything but y/yes is a no
async fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{}", prompt);

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    Ok(is_affirmative(&line))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Log registry events emitted during the command
fn drain_events(events: &mut mpsc::Receiver<RegistryEvent>) {
    while let Ok(event) = events.try_recv() {
        debug!("Registry event: {:?}", event);
    }
}

/// Navigator for a terminal: prints the destination instead of opening it
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, target: &str) {
        println!("Redirecting...");
        println!("{}", target);
    }
}
