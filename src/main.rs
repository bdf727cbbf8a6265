use anyhow::Result;
use clap::Parser;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

mod config;
mod error;
mod events;
mod services;

use config::Config;
use services::{
    create_hotkey_listener, create_icon_resolver, create_window_activator,
    create_window_enumerator, LogOverlay, Switcher,
};

#[derive(Parser, Debug)]
#[command(name = "tabswitch")]
#[command(about = "Alt+Tab replacement with a forceful window activator")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "tabswitch.toml")]
    config: String,

    /// Dry-run mode (emulated windows and hotkeys, no hooks installed)
    #[arg(long)]
    dry_run: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level)?;

    info!("starting tabswitch v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(Config::load(&args.config)?);
    info!("configuration loaded from: {}", args.config);

    if args.dry_run {
        warn!("dry-run mode - no hooks installed, no real windows touched");
    }

    // Foreground transfers are throttled system-wide by default; zero the
    // lock timeout up front so activation does not fight it.
    #[cfg(windows)]
    if !args.dry_run {
        services::window_activator::reset_foreground_lock_timeout();
    }

    let excluded = Arc::new(RwLock::new(Vec::new()));
    let (event_tx, event_rx) = mpsc::channel(config.hooks.event_queue_depth);

    let enumerator = create_window_enumerator(excluded.clone(), args.dry_run)?;
    let icons = create_icon_resolver(args.dry_run)?;
    let activator = create_window_activator(args.dry_run)?;
    let overlay = Box::new(LogOverlay::new(config.overlay.clone()));
    let hotkey_listener = create_hotkey_listener(config.clone(), event_tx, args.dry_run)?;

    let switcher = Switcher::new(
        enumerator,
        icons,
        activator,
        overlay,
        event_rx,
        excluded,
        config.heartbeat_interval(),
    );

    info!("all components initialized");

    let switcher_handle = tokio::spawn(async move {
        if let Err(e) = switcher.run().await {
            error!("switcher loop failed: {}", e);
        }
    });
    let hotkey_handle = tokio::spawn(async move {
        if let Err(e) = hotkey_listener.run().await {
            error!("hotkey listener failed: {}", e);
        }
    });

    info!("all services running");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("shutdown signal received (Ctrl+C)");
        }
        Err(err) => {
            error!("failed to wait for shutdown signal: {}", err);
        }
    }

    info!("shutting down...");

    hotkey_handle.abort();
    switcher_handle.abort();

    let shutdown_timeout = tokio::time::Duration::from_secs(5);
    let shutdown_result = tokio::time::timeout(shutdown_timeout, async {
        let _ = hotkey_handle.await;
        let _ = switcher_handle.await;
    })
    .await;

    match shutdown_result {
        Ok(_) => info!("all services stopped cleanly"),
        Err(_) => warn!("timed out waiting for services to stop"),
    }

    info!("tabswitch stopped");
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    Ok(())
}
