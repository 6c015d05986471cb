//! Command-line interface for ChordTile

use crate::macos::display::{DisplayService, SystemDisplayService};
use crate::macos::permissions;
use crate::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ChordTile command-line interface
#[derive(Debug, Parser)]
#[command(name = "chordtile")]
#[command(about = "Control+Option chord window snapper for macOS")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct ChordTileCli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands; running without one starts the snapper.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report accessibility permission and display availability
    Doctor,
}

/// Print a short diagnostic report and return an error when the environment
/// cannot support the snapper.
pub fn run_doctor() -> Result<()> {
    let (granted, guidance) = permissions::accessibility_status()?;
    if granted {
        println!("accessibility: granted");
    } else {
        println!("accessibility: NOT granted");
        println!("  {guidance}");
    }

    match SystemDisplayService::new().usable_screen_size() {
        Some(screen) => println!("usable screen: {}x{}", screen.width, screen.height),
        None => println!("usable screen: unavailable"),
    }

    if granted {
        Ok(())
    } else {
        Err(crate::ChordTileError::PermissionDenied(
            "accessibility permission not granted".into(),
        )
        .into())
    }
}
