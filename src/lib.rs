//! ChordTile - Control+Option chord window snapper for macOS
//!
//! ChordTile listens for Control+Option + arrow/Return chords and moves the
//! focused window into a predefined region of the usable screen. A second
//! press of the same chord within two seconds escalates to a wider region.

pub mod cli;
pub mod config;
pub mod logging;
pub mod macos;
pub mod models;
pub mod services;

pub use models::{
    ModifierMask, Point, RawKeyEvent, RecognizedKey, Rect, ScreenSize, Size, WindowPosition,
};
pub use services::{ChordPipeline, FilterDecision, KeyEventFilter, PressHistory, WindowMover};

/// Result type alias for ChordTile operations
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to ChordTile operations
#[derive(thiserror::Error, Debug)]
pub enum ChordTileError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("No frontmost application available")]
    NoFrontmostApplication,

    #[error("Focused window unavailable: {0}")]
    FocusedWindowUnavailable(String),

    #[error("Usable screen size unavailable")]
    ScreenUnavailable,

    #[error("Set position failed: {0}")]
    SetPositionFailed(String),

    #[error("Set size failed: {0}")]
    SetSizeFailed(String),

    #[error("Event tap failure: {0}")]
    EventTapFailure(String),

    #[error("macOS API error: {0}")]
    MacOSAPIError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
