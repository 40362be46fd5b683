//! `netwatch`: live terminal dashboard of network diagnostics.
//!
//! Each diagnostic (bandwidth, latency, ...) is an external command run on
//! its own interval by a background collector. The dashboard redraws the
//! latest output of every probe in a four-quadrant layout at a fixed frame
//! rate until `q`, `Esc`, or `Ctrl+C`.
//!
//! Logs are written to a file (default `/tmp/netwatch.log`) to avoid
//! corrupting the terminal UI.

mod app;
mod event;
mod layout;
mod surface;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use netwatch_core::{CollectorSet, Metric, MetricStore};

use crate::app::Dashboard;
use crate::event::InterruptWatcher;
use crate::tui::Tui;

/// Live terminal dashboard of periodically-run network diagnostics.
#[derive(Parser, Debug)]
#[command(name = "netwatch", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short = 'c', long, env = "NETWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/netwatch.log)
    #[arg(long, default_value = "/tmp/netwatch.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr, that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "netwatch={log_level},netwatch_core={log_level},netwatch_config={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("netwatch.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let config = netwatch_config::load_config(cli.config.as_deref())?;
    if cli.print_config {
        print!("{}", netwatch_config::to_toml(&config)?);
        return Ok(());
    }

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let registry = config.probe_registry()?;
    info!(
        probes = registry.len(),
        frame_ms = config.frame_interval_ms,
        "starting netwatch"
    );
    for metric in Metric::ALL.into_iter().filter(|m| !registry.is_bound(*m)) {
        info!(%metric, "no probe configured, panel stays a placeholder");
    }

    let store = Arc::new(MetricStore::new(Metric::ALL));
    let cancel = CancellationToken::new();

    let mut tui = Tui::new()?;
    tui.enter()?;

    let _watcher = InterruptWatcher::spawn(&cancel);
    let collectors = CollectorSet::spawn(&store, registry, &cancel);
    let mut dashboard = Dashboard::new(Arc::clone(&store), config.frame_interval());

    let result = dashboard.run(&mut tui, collectors, cancel).await;
    tui.exit();
    result
}
