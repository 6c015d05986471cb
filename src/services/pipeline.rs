use crate::macos::accessibility::WindowService;
use crate::macos::display::DisplayService;
use crate::models::{RawKeyEvent, WindowPosition};
use crate::services::geometry;
use crate::services::key_filter::{FilterDecision, KeyEventFilter};
use crate::services::placement;
use crate::services::press_history::PressHistory;
use crate::services::window_mover::WindowMover;
use crate::{ChordTileError, Result};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, warn};

/// The complete chord-to-placement pipeline.
///
/// Events arrive one at a time from the tap's run loop; nothing here blocks
/// or suspends, and a classified event runs its move to completion before the
/// next event is processed. The press history is the only mutable state and
/// sits behind a mutex to keep the single-writer discipline even if a host
/// delivers from more than one thread.
pub struct ChordPipeline {
    filter: KeyEventFilter,
    history: Mutex<PressHistory>,
    displays: Arc<dyn DisplayService>,
    mover: WindowMover,
}

impl ChordPipeline {
    pub fn new(
        history: PressHistory,
        windows: Arc<dyn WindowService>,
        displays: Arc<dyn DisplayService>,
    ) -> Self {
        Self {
            filter: KeyEventFilter::new(),
            history: Mutex::new(history),
            displays,
            mover: WindowMover::new(windows),
        }
    }

    /// Handle one key-down. Returns true when the event must be suppressed
    /// (not delivered to the focused application).
    pub fn handle(&self, event: &RawKeyEvent) -> bool {
        match self.filter.classify(event) {
            FilterDecision::PassThrough => false,
            FilterDecision::SwallowRepeat => true,
            FilterDecision::Chord(key) => {
                let escalated = self
                    .history
                    .lock()
                    .expect("poisoned lock")
                    .record_and_classify(key, Instant::now());
                let position = placement::resolve(key, escalated);
                debug!(?key, escalated, ?position, "chord accepted");

                // The press is consumed whether or not the move lands; the
                // history is never rolled back on failure.
                if let Err(err) = self.move_focused(position) {
                    warn!(%err, ?position, "window move abandoned");
                }
                true
            }
        }
    }

    fn move_focused(&self, position: WindowPosition) -> Result<()> {
        // Snapshot the screen at move time; a cached value would go stale
        // when the display arrangement changes between chords.
        let screen = self
            .displays
            .usable_screen_size()
            .ok_or(ChordTileError::ScreenUnavailable)?;
        let frame = geometry::frame_for(position, screen);
        self.mover.apply_to_focused(frame)
    }
}
