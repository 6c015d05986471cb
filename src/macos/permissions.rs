//! Accessibility permission checks
//!
//! ChordTile needs accessibility trust both to observe key presses and to
//! move other applications' windows. The check never prompts; startup prints
//! guidance and exits when trust is missing.

use crate::Result;

/// Instructions shown when accessibility trust is missing.
pub const ACCESSIBILITY_GUIDANCE: &str = "ChordTile must be trusted by accessibility to observe \
key presses and change window sizes. Go to System Settings -> Privacy & Security -> \
Accessibility and enable ChordTile, then restart it.";

#[cfg(target_os = "macos")]
mod platform {
    use crate::Result;

    #[link(name = "ApplicationServices", kind = "framework")]
    extern "C" {
        fn AXIsProcessTrusted() -> bool;
    }

    pub fn is_accessibility_permission_granted() -> Result<bool> {
        Ok(unsafe { AXIsProcessTrusted() })
    }
}

#[cfg(not(target_os = "macos"))]
mod platform {
    use crate::Result;

    pub fn is_accessibility_permission_granted() -> Result<bool> {
        Ok(std::env::var("CHORDTILE_PERMISSION_ACCESSIBILITY")
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(false))
    }
}

pub use platform::is_accessibility_permission_granted;

/// Convenience wrapper combining the check with its guidance text.
pub fn accessibility_status() -> Result<(bool, &'static str)> {
    let granted = is_accessibility_permission_granted()?;
    Ok((granted, ACCESSIBILITY_GUIDANCE))
}
