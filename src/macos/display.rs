//! Usable screen geometry

use crate::models::ScreenSize;
use std::sync::Mutex;

/// Abstraction over display lookup. Returns `None` when no usable screen can
/// be determined; callers abort the move rather than guess.
pub trait DisplayService: Send + Sync {
    /// Usable size of the main screen, menu bar and dock excluded.
    fn usable_screen_size(&self) -> Option<ScreenSize>;
}

#[cfg(target_os = "macos")]
mod system {
    use super::DisplayService;
    use crate::models::ScreenSize;
    use cocoa::base::{id, nil};
    use cocoa::foundation::NSRect;
    use objc::{class, msg_send, sel, sel_impl};

    /// AppKit-backed display service reading the main screen's visible frame.
    #[derive(Debug, Default)]
    pub struct SystemDisplayService;

    impl SystemDisplayService {
        pub fn new() -> Self {
            Self
        }
    }

    impl DisplayService for SystemDisplayService {
        fn usable_screen_size(&self) -> Option<ScreenSize> {
            unsafe {
                let screen: id = msg_send![class!(NSScreen), mainScreen];
                if screen == nil {
                    return None;
                }
                let frame: NSRect = msg_send![screen, visibleFrame];
                Some(ScreenSize::new(frame.size.width, frame.size.height))
            }
        }
    }
}

#[cfg(not(target_os = "macos"))]
mod system {
    use super::DisplayService;
    use crate::models::ScreenSize;

    /// Placeholder used off-macOS; reports no usable screen.
    #[derive(Debug, Default)]
    pub struct SystemDisplayService;

    impl SystemDisplayService {
        pub fn new() -> Self {
            Self
        }
    }

    impl DisplayService for SystemDisplayService {
        fn usable_screen_size(&self) -> Option<ScreenSize> {
            None
        }
    }
}

pub use system::SystemDisplayService;

/// In-memory display service for tests; the reported size can be swapped
/// mid-test to model display changes between events.
#[derive(Debug)]
pub struct InMemoryDisplayService {
    size: Mutex<Option<ScreenSize>>,
}

impl InMemoryDisplayService {
    pub fn new(size: ScreenSize) -> Self {
        Self {
            size: Mutex::new(Some(size)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            size: Mutex::new(None),
        }
    }

    pub fn set_size(&self, size: Option<ScreenSize>) {
        *self.size.lock().unwrap() = size;
    }
}

impl DisplayService for InMemoryDisplayService {
    fn usable_screen_size(&self) -> Option<ScreenSize> {
        *self.size.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_service_reports_configured_size() {
        let service = InMemoryDisplayService::new(ScreenSize::new(1440.0, 900.0));
        assert_eq!(
            service.usable_screen_size(),
            Some(ScreenSize::new(1440.0, 900.0))
        );

        service.set_size(None);
        assert_eq!(service.usable_screen_size(), None);
    }
}
