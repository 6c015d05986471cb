use crate::models::RecognizedKey;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default double-tap window.
pub const DEFAULT_ESCALATION_WINDOW: Duration = Duration::from_secs(2);

/// The single most recent fresh commit.
#[derive(Debug, Clone, Copy)]
struct CommittedKey {
    key: RecognizedKey,
    at: Instant,
}

/// Tracks the last accepted fresh key commit and classifies escalations.
///
/// At most one commit is stored at a time. An escalation (same key within the
/// window) clears the stored commit, so a third consecutive press always
/// starts a new cycle. Anything else overwrites it as a fresh commit. Callers
/// with concurrent producers must serialize access; the pipeline keeps this
/// behind a mutex.
#[derive(Debug)]
pub struct PressHistory {
    window: Duration,
    last: Option<CommittedKey>,
}

impl Default for PressHistory {
    fn default() -> Self {
        Self::new(DEFAULT_ESCALATION_WINDOW)
    }
}

impl PressHistory {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Record a recognized press and report whether it escalates the previous
    /// one. The press is consumed either way; the caller never rolls back.
    pub fn record_and_classify(&mut self, key: RecognizedKey, now: Instant) -> bool {
        let is_escalation = matches!(
            self.last,
            Some(committed)
                if committed.key == key && now.saturating_duration_since(committed.at) <= self.window
        );

        if is_escalation {
            // Reset state as if no key had been pressed.
            self.last = None;
        } else {
            self.last = Some(CommittedKey { key, at: now });
        }

        debug!(?key, is_escalation, "press recorded");
        is_escalation
    }

    /// The key of the stored commit, if one is pending.
    pub fn pending(&self) -> Option<RecognizedKey> {
        self.last.map(|committed| committed.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_press_within_window_escalates_and_clears() {
        let mut history = PressHistory::default();
        let t = Instant::now();

        assert!(!history.record_and_classify(RecognizedKey::ArrowLeft, t));
        assert!(history.record_and_classify(RecognizedKey::ArrowLeft, t + Duration::from_secs(1)));
        assert_eq!(history.pending(), None);
    }

    #[test]
    fn press_beyond_window_is_a_fresh_commit() {
        let mut history = PressHistory::default();
        let t = Instant::now();

        assert!(!history.record_and_classify(RecognizedKey::ArrowLeft, t));
        assert!(!history.record_and_classify(RecognizedKey::ArrowLeft, t + Duration::from_secs(3)));
        assert_eq!(history.pending(), Some(RecognizedKey::ArrowLeft));
    }

    #[test]
    fn press_exactly_at_window_boundary_escalates() {
        let mut history = PressHistory::default();
        let t = Instant::now();

        assert!(!history.record_and_classify(RecognizedKey::Return, t));
        assert!(history.record_and_classify(RecognizedKey::Return, t + Duration::from_secs(2)));
    }

    #[test]
    fn different_key_never_escalates() {
        let mut history = PressHistory::default();
        let t = Instant::now();

        assert!(!history.record_and_classify(RecognizedKey::ArrowLeft, t));
        assert!(
            !history.record_and_classify(RecognizedKey::ArrowRight, t + Duration::from_millis(100))
        );
        // The mismatched press overwrote the stored commit.
        assert_eq!(history.pending(), Some(RecognizedKey::ArrowRight));
    }

    #[test]
    fn third_press_starts_a_new_cycle() {
        let mut history = PressHistory::default();
        let t = Instant::now();
        let step = Duration::from_millis(500);

        assert!(!history.record_and_classify(RecognizedKey::ArrowLeft, t));
        assert!(history.record_and_classify(RecognizedKey::ArrowLeft, t + step));
        // Cleared by the escalation, so this is fresh again, never a chain.
        assert!(!history.record_and_classify(RecognizedKey::ArrowLeft, t + step * 2));
        assert!(history.record_and_classify(RecognizedKey::ArrowLeft, t + step * 3));
    }

    #[test]
    fn custom_window_is_honored() {
        let mut history = PressHistory::new(Duration::from_millis(250));
        let t = Instant::now();

        assert!(!history.record_and_classify(RecognizedKey::ArrowUp, t));
        assert!(
            !history.record_and_classify(RecognizedKey::ArrowUp, t + Duration::from_millis(500))
        );
    }
}
