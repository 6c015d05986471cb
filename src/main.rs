//! ChordTile - Control+Option chord window snapper for macOS
//!
//! Application entry point: logging and configuration, the accessibility
//! permission gate, and the event tap lifecycle.

use chordtile::{
    cli::{run_doctor, ChordTileCli, Commands},
    config::Config,
    logging::{init_logging, LogConfig, LogLevel},
    macos::{
        accessibility::SystemWindowService, display::SystemDisplayService,
        event_tap::spawn_event_tap, permissions,
    },
    services::{ChordPipeline, PressHistory},
    ChordTileError, Result,
};
use clap::Parser;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ChordTileCli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let log_config = resolve_log_config(&config, cli.log_level.as_deref())?;
    init_logging(&log_config).map_err(|err| {
        ChordTileError::ConfigurationError(format!("failed to initialize logging: {err}"))
    })?;

    if let Some(Commands::Doctor) = cli.command {
        return run_doctor();
    }

    info!("ChordTile v{}", env!("CARGO_PKG_VERSION"));

    if !permissions::is_accessibility_permission_granted()? {
        error!("accessibility permission missing, cannot observe keys or move windows");
        eprintln!("{}", permissions::ACCESSIBILITY_GUIDANCE);
        std::process::exit(1);
    }

    let pipeline = Arc::new(ChordPipeline::new(
        PressHistory::new(config.escalation_window()),
        Arc::new(SystemWindowService::new()),
        Arc::new(SystemDisplayService::new()),
    ));

    let tap = spawn_event_tap(pipeline)?;
    info!("ChordTile is ready; Control+Option + arrows or Return move the focused window");

    wait_for_shutdown().await;

    tap.shutdown()?;
    info!("ChordTile shutdown complete");
    Ok(())
}

/// Environment settings first, then the config file, then the CLI flag.
fn resolve_log_config(config: &Config, cli_level: Option<&str>) -> Result<LogConfig> {
    let mut log_config = LogConfig::from_env();
    if let Some(level) = config.log_level() {
        log_config.level = level;
    }
    if let Some(format) = config.log_format() {
        log_config.format = format;
    }
    if let Some(level) = cli_level {
        log_config.level =
            LogLevel::from_str(level).map_err(ChordTileError::ConfigurationError)?;
    }
    Ok(log_config)
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    res = tokio::signal::ctrl_c() => match res {
                        Ok(_) => info!("received SIGINT (Ctrl+C)"),
                        Err(err) => warn!("failed to listen for Ctrl+C: {}", err),
                    },
                    _ = sigterm.recv() => info!("received SIGTERM"),
                }
            }
            Err(err) => {
                warn!("failed to register SIGTERM handler: {}", err);
                if let Err(err) = tokio::signal::ctrl_c().await {
                    warn!("failed to listen for Ctrl+C: {}", err);
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(_) => info!("received Ctrl+C"),
            Err(err) => warn!("failed to listen for Ctrl+C: {}", err),
        }
    }
}
