use anyhow::Context;
use clap::{Parser, Subcommand};
use kpidex::{report, server};
use kpidex_core::{config::Config, Dataset};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kpidex", about = "kpidex: browse and search a KPI knowledge base")]
struct Cli {
    /// KPI JSON document to load instead of the configured one.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Write debug logs to /tmp/kpidex-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print autocomplete labels for a partial query.
    Suggest { query: String },
    /// Print KPIs and use cases matching a query, grouped by industry.
    Search {
        query: String,
        /// Emit the results as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print domains with their industries and page slugs.
    Categories,
    /// Serve the read-only JSON routes.
    Serve {
        /// Address to bind; defaults to `server.bind` from the config.
        #[arg(long)]
        bind: Option<String>,
    },
}

const DEBUG_LOG: &str = "/tmp/kpidex-debug.log";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });
    let dataset = load_dataset(cli.data.as_deref(), &config)?;

    match cli.command {
        None => kpidex_tui::run(&dataset, config),
        Some(Cmd::Suggest { query }) => {
            print!("{}", report::suggestions_text(&kpidex_core::suggest(&query, &dataset)));
            Ok(())
        }
        Some(Cmd::Search { query, json }) => {
            let results = kpidex_core::search(&query, &dataset);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", report::results_text(&query, &results));
            }
            Ok(())
        }
        Some(Cmd::Categories) => {
            print!("{}", report::categories_text(&report::categories(&dataset)));
            Ok(())
        }
        Some(Cmd::Serve { bind }) => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            tokio::runtime::Runtime::new()?.block_on(server::serve(Arc::new(dataset), &bind))
        }
    }
}

/// `--debug` logs to a file so the TUI screen stays clean; `serve` logs to
/// stderr. Other subcommands stay silent.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = |default: &str| {
        EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default))
    };

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)
            .with_context(|| format!("opening {DEBUG_LOG}"))?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter("debug"))
            .init();
        tracing::info!("kpidex debug log started, tail -f {DEBUG_LOG}");
    } else if matches!(cli.command, Some(Cmd::Serve { .. })) {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter("info"))
            .init();
    }
    Ok(())
}

/// `--data` wins over `data.path` from the config; with neither, the
/// embedded sample dataset is used.
fn load_dataset(cli_path: Option<&Path>, config: &Config) -> anyhow::Result<Dataset> {
    match cli_path.or_else(|| config.data.path()) {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("loading dataset from {}", path.display())),
        None => {
            tracing::debug!("no dataset path configured, using the embedded sample");
            Ok(Dataset::sample())
        }
    }
}
