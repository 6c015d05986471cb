//! Chord-to-region resolution

use crate::models::{RecognizedKey, WindowPosition};

/// Resolve a recognized key and escalation flag to a target region.
///
/// Up, Down and Return land on the same region whether or not the press is an
/// escalation; only Left and Right widen on a double tap.
pub fn resolve(key: RecognizedKey, escalated: bool) -> WindowPosition {
    match (key, escalated) {
        (RecognizedKey::ArrowLeft, false) => WindowPosition::LeftThird,
        (RecognizedKey::ArrowLeft, true) => WindowPosition::LeftHalf,
        (RecognizedKey::ArrowRight, false) => WindowPosition::RightThird,
        (RecognizedKey::ArrowRight, true) => WindowPosition::RightHalf,
        (RecognizedKey::ArrowUp, _) => WindowPosition::RightTwoThirds,
        (RecognizedKey::ArrowDown, _) => WindowPosition::LeftTwoThirds,
        (RecognizedKey::Return, _) => WindowPosition::Fullscreen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_and_right_widen_on_escalation() {
        assert_eq!(
            resolve(RecognizedKey::ArrowLeft, false),
            WindowPosition::LeftThird
        );
        assert_eq!(
            resolve(RecognizedKey::ArrowLeft, true),
            WindowPosition::LeftHalf
        );
        assert_eq!(
            resolve(RecognizedKey::ArrowRight, false),
            WindowPosition::RightThird
        );
        assert_eq!(
            resolve(RecognizedKey::ArrowRight, true),
            WindowPosition::RightHalf
        );
    }

    #[test]
    fn up_down_return_are_escalation_invariant() {
        for key in [
            RecognizedKey::ArrowUp,
            RecognizedKey::ArrowDown,
            RecognizedKey::Return,
        ] {
            assert_eq!(resolve(key, false), resolve(key, true));
        }
        assert_eq!(
            resolve(RecognizedKey::ArrowUp, true),
            WindowPosition::RightTwoThirds
        );
        assert_eq!(
            resolve(RecognizedKey::ArrowDown, true),
            WindowPosition::LeftTwoThirds
        );
        assert_eq!(
            resolve(RecognizedKey::Return, true),
            WindowPosition::Fullscreen
        );
    }
}
