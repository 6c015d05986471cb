use crate::models::{ModifierMask, RawKeyEvent, RecognizedKey};
use tracing::trace;

/// Outcome of classifying a raw key event against the chord grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Not ours: deliver to the focused application unchanged.
    PassThrough,
    /// An accepted chord auto-repeating: suppress, but take no action.
    SwallowRepeat,
    /// A fresh press of an accepted chord.
    Chord(RecognizedKey),
}

/// Classifies key events against the managed shortcut grammar: exactly
/// Control+Option held, Command and Shift absent, and a recognized key code.
#[derive(Debug, Default)]
pub struct KeyEventFilter;

impl KeyEventFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, event: &RawKeyEvent) -> FilterDecision {
        let mods = event.modifiers;
        let chord_held = mods.contains(ModifierMask::CONTROL)
            && mods.contains(ModifierMask::OPTION)
            && !mods.contains(ModifierMask::COMMAND)
            && !mods.contains(ModifierMask::SHIFT);

        if !chord_held {
            return FilterDecision::PassThrough;
        }

        match RecognizedKey::from_key_code(event.key_code) {
            None => FilterDecision::PassThrough,
            Some(_) if event.is_repeat => {
                trace!(key_code = event.key_code, "swallowing repeated chord");
                FilterDecision::SwallowRepeat
            }
            Some(key) => FilterDecision::Chord(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord_mods() -> ModifierMask {
        ModifierMask::default()
            .with(ModifierMask::CONTROL)
            .with(ModifierMask::OPTION)
    }

    #[test]
    fn accepts_control_option_arrow() {
        let filter = KeyEventFilter::new();
        let event = RawKeyEvent::new(123, chord_mods(), false);
        assert_eq!(
            filter.classify(&event),
            FilterDecision::Chord(RecognizedKey::ArrowLeft)
        );
    }

    #[test]
    fn rejects_when_command_held_regardless_of_key_or_repeat() {
        let filter = KeyEventFilter::new();
        for key_code in [36, 123, 124, 125, 126, 0] {
            for is_repeat in [false, true] {
                let event = RawKeyEvent::new(
                    key_code,
                    chord_mods().with(ModifierMask::COMMAND),
                    is_repeat,
                );
                assert_eq!(filter.classify(&event), FilterDecision::PassThrough);
            }
        }
    }

    #[test]
    fn rejects_when_shift_held() {
        let filter = KeyEventFilter::new();
        let event = RawKeyEvent::new(124, chord_mods().with(ModifierMask::SHIFT), false);
        assert_eq!(filter.classify(&event), FilterDecision::PassThrough);
    }

    #[test]
    fn rejects_partial_modifier_set() {
        let filter = KeyEventFilter::new();
        let control_only = ModifierMask::default().with(ModifierMask::CONTROL);
        let option_only = ModifierMask::default().with(ModifierMask::OPTION);
        assert_eq!(
            filter.classify(&RawKeyEvent::new(123, control_only, false)),
            FilterDecision::PassThrough
        );
        assert_eq!(
            filter.classify(&RawKeyEvent::new(123, option_only, false)),
            FilterDecision::PassThrough
        );
        assert_eq!(
            filter.classify(&RawKeyEvent::new(123, ModifierMask::default(), false)),
            FilterDecision::PassThrough
        );
    }

    #[test]
    fn passes_through_unmapped_key_even_with_chord_held() {
        let filter = KeyEventFilter::new();
        // 'A' is key code 0 on macOS
        let event = RawKeyEvent::new(0, chord_mods(), false);
        assert_eq!(filter.classify(&event), FilterDecision::PassThrough);
    }

    #[test]
    fn repeated_chord_is_swallowed_without_action() {
        let filter = KeyEventFilter::new();
        let event = RawKeyEvent::new(126, chord_mods(), true);
        assert_eq!(filter.classify(&event), FilterDecision::SwallowRepeat);
    }
}
