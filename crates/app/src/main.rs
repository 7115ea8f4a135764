use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AdminService, AppServices, AttemptService, AuthService, BackendConfig, Clock, HistoryService,
    IdentityProvider,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tryout_core::model::BatchId;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://tryout.sqlite3";
const DEFAULT_BATCH: &str = "batch-1";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBatchId { raw: String },
    InvalidDbUrl { raw: String },
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBatchId { raw } => write!(f, "invalid --batch value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn batches(&self) -> Vec<BatchId> {
        self.services.batches().to_vec()
    }

    fn identity(&self) -> Arc<dyn IdentityProvider> {
        self.services.identity()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn attempts(&self) -> Arc<AttemptService> {
        self.services.attempts()
    }

    fn history(&self) -> Arc<HistoryService> {
        self.services.history()
    }

    fn admin(&self) -> Arc<AdminService> {
        self.services.admin()
    }
}

struct Args {
    db_url: String,
    backend: BackendConfig,
    batches: Vec<BatchId>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [ui] [--db <sqlite_url>] [--api <base_url>] [--admin-url <url>] [--batch <id>]..."
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --api {}", services::api::DEFAULT_API_BASE_URL);
    eprintln!("  --admin-url <api base with /api replaced by /admin>");
    eprintln!("  --batch {DEFAULT_BATCH}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRYOUT_DB_URL, TRYOUT_API_BASE_URL, TRYOUT_ADMIN_URL, TRYOUT_BATCHES (comma-separated)");
    eprintln!("  RUST_LOG (default: info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            _ => None,
        }
    }
}

fn parse_batch(raw: &str) -> Result<BatchId, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidBatchId {
        raw: raw.to_string(),
    })
}

fn batches_from_env(raw: &str) -> Result<Vec<BatchId>, ArgsError> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_batch)
        .collect()
}

impl Args {
    fn parse_ui(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("TRYOUT_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut backend = BackendConfig::from_env();
        let env_batches = match std::env::var("TRYOUT_BATCHES") {
            Ok(raw) => batches_from_env(&raw)?,
            Err(_) => Vec::new(),
        };
        let mut cli_batches = Vec::new();
        let mut admin_override = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api" => {
                    let value = require_value(args, "--api")?;
                    if !value.starts_with("http://") && !value.starts_with("https://") {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    backend = BackendConfig::new(value);
                }
                "--admin-url" => {
                    admin_override = Some(require_value(args, "--admin-url")?);
                }
                "--batch" => {
                    let value = require_value(args, "--batch")?;
                    cli_batches.push(parse_batch(&value)?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if let Some(admin_url) = admin_override {
            backend = backend.with_admin_url(admin_url);
        }
        let batches = if !cli_batches.is_empty() {
            cli_batches
        } else if !env_batches.is_empty() {
            env_batches
        } else {
            vec![BatchId::new(DEFAULT_BATCH)]
        };

        Ok(Self {
            db_url,
            backend,
            batches,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Launching the UI is the default when no subcommand is given.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = match cmd {
        Command::Ui => Args::parse_ui(&mut iter),
    }
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    ensure_cache_dir(&parsed.db_url)?;
    info!(
        db = %parsed.db_url,
        api = %parsed.backend.api_base_url,
        batches = parsed.batches.len(),
        "starting tryout client"
    );
    let services = AppServices::new_sqlite(
        &parsed.db_url,
        parsed.backend,
        Clock::default(),
        parsed.batches,
    )
    .await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // Some desktop setups default new windows to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Tryout")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

/// Creates the directory holding the cache file. The pool creates the file.
fn ensure_cache_dir(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }
    let invalid = || ArgsError::InvalidDbUrl {
        raw: db_url.to_string(),
    };
    let file = db_url
        .strip_prefix("sqlite://")
        .and_then(|rest| rest.split('?').next())
        .filter(|path| !path.is_empty())
        .ok_or_else(invalid)?;
    match std::path::Path::new(file).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)?,
        _ => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
