use crate::macos::accessibility::WindowService;
use crate::models::Rect;
use crate::{ChordTileError, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Applies a computed frame to the focused window of the frontmost
/// application. The sole component that reaches outside the process for
/// window manipulation; every failure is absorbed into a `Result` and never
/// retried.
pub struct WindowMover {
    windows: Arc<dyn WindowService>,
}

impl WindowMover {
    pub fn new(windows: Arc<dyn WindowService>) -> Self {
        Self { windows }
    }

    /// Move and resize the focused window to `frame`. Position is set before
    /// size; some window managers reject a size change before the position
    /// settles. Both calls are attempted and reported independently, and
    /// overall success requires both.
    pub fn apply_to_focused(&self, frame: Rect) -> Result<()> {
        let app = self
            .windows
            .frontmost_application()
            .ok_or(ChordTileError::NoFrontmostApplication)?;
        let window = self.windows.focused_window(app)?;

        let position_result = self.windows.set_position(window, frame.origin);
        let size_result = self.windows.set_size(window, frame.size);

        if let Err(err) = &position_result {
            warn!(%err, "set position failed");
        }
        if let Err(err) = &size_result {
            warn!(%err, "set size failed");
        }

        position_result?;
        size_result?;
        info!(
            x = frame.origin.x,
            y = frame.origin.y,
            width = frame.size.width,
            height = frame.size.height,
            "moved focused window"
        );
        Ok(())
    }
}
