//! Key events as delivered by the event tap

/// A key the snapper recognizes as part of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizedKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Return,
}

impl RecognizedKey {
    /// Map a macOS virtual key code to a recognized key. Total over i64:
    /// unmapped codes yield `None`.
    pub fn from_key_code(key_code: i64) -> Option<Self> {
        match key_code {
            36 => Some(Self::Return),
            123 => Some(Self::ArrowLeft),
            124 => Some(Self::ArrowRight),
            125 => Some(Self::ArrowDown),
            126 => Some(Self::ArrowUp),
            _ => None,
        }
    }
}

/// Modifier bits carried on a key event, matching the CGEventFlags layout so
/// the raw flags word from the tap can be wrapped without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierMask(u64);

impl ModifierMask {
    pub const SHIFT: u64 = 0x0002_0000;
    pub const CONTROL: u64 = 0x0004_0000;
    pub const OPTION: u64 = 0x0008_0000;
    pub const COMMAND: u64 = 0x0010_0000;

    pub fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, bit: u64) -> bool {
        self.0 & bit != 0
    }

    pub fn with(self, bit: u64) -> Self {
        Self(self.0 | bit)
    }
}

/// A raw key-down as handed to the pipeline by the event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key_code: i64,
    pub modifiers: ModifierMask,
    pub is_repeat: bool,
}

impl RawKeyEvent {
    pub fn new(key_code: i64, modifiers: ModifierMask, is_repeat: bool) -> Self {
        Self {
            key_code,
            modifiers,
            is_repeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_code_lookup_covers_all_recognized_keys() {
        assert_eq!(RecognizedKey::from_key_code(36), Some(RecognizedKey::Return));
        assert_eq!(
            RecognizedKey::from_key_code(123),
            Some(RecognizedKey::ArrowLeft)
        );
        assert_eq!(
            RecognizedKey::from_key_code(124),
            Some(RecognizedKey::ArrowRight)
        );
        assert_eq!(
            RecognizedKey::from_key_code(125),
            Some(RecognizedKey::ArrowDown)
        );
        assert_eq!(
            RecognizedKey::from_key_code(126),
            Some(RecognizedKey::ArrowUp)
        );
    }

    #[test]
    fn unmapped_key_codes_are_not_recognized() {
        for code in [0, 1, 35, 37, 122, 127, -1, i64::MAX] {
            assert_eq!(RecognizedKey::from_key_code(code), None);
        }
    }

    #[test]
    fn modifier_mask_bit_queries() {
        let mask = ModifierMask::default()
            .with(ModifierMask::CONTROL)
            .with(ModifierMask::OPTION);
        assert!(mask.contains(ModifierMask::CONTROL));
        assert!(mask.contains(ModifierMask::OPTION));
        assert!(!mask.contains(ModifierMask::COMMAND));
        assert!(!mask.contains(ModifierMask::SHIFT));
    }
}
