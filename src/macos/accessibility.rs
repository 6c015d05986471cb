//! Window manipulation through the Accessibility API

use crate::models::{Point, Rect, Size};
use crate::Result;
use std::sync::Mutex;

/// Handle to the frontmost application as reported by the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppHandle {
    pub pid: i32,
}

/// Opaque handle to a focused window previously fetched from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(pub(crate) u64);

/// Abstraction over the window service: frontmost-application lookup and
/// focused-window manipulation. Position and size are separate calls with
/// independent results on purpose; callers decide how to combine them.
pub trait WindowService: Send + Sync {
    /// The frontmost application, if any.
    fn frontmost_application(&self) -> Option<AppHandle>;

    /// The focused window of the given application.
    fn focused_window(&self, app: AppHandle) -> Result<WindowHandle>;

    /// Move the window's top-left corner.
    fn set_position(&self, window: WindowHandle, origin: Point) -> Result<()>;

    /// Resize the window.
    fn set_size(&self, window: WindowHandle, size: Size) -> Result<()>;
}

#[cfg(target_os = "macos")]
mod system {
    use super::{AppHandle, WindowHandle, WindowService};
    use crate::models::{Point, Size};
    use crate::{ChordTileError, Result};
    use cocoa::base::{id, nil};
    use core_foundation::base::TCFType;
    use core_foundation::string::CFString;
    use core_foundation_sys::base::{CFRelease, CFTypeRef};
    use core_foundation_sys::string::CFStringRef;
    use core_graphics::geometry::{CGPoint, CGSize};
    use objc::{class, msg_send, sel, sel_impl};
    use std::ffi::c_void;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    type AXError = i32;
    type AXValueType = u32;

    const AX_SUCCESS: AXError = 0;
    const AX_VALUE_CGPOINT_TYPE: AXValueType = 1;
    const AX_VALUE_CGSIZE_TYPE: AXValueType = 2;

    #[link(name = "ApplicationServices", kind = "framework")]
    extern "C" {
        fn AXUIElementCreateApplication(pid: i32) -> CFTypeRef;
        fn AXUIElementCopyAttributeValue(
            element: CFTypeRef,
            attribute: CFStringRef,
            value: *mut CFTypeRef,
        ) -> AXError;
        fn AXUIElementSetAttributeValue(
            element: CFTypeRef,
            attribute: CFStringRef,
            value: CFTypeRef,
        ) -> AXError;
        fn AXValueCreate(value_type: AXValueType, value_ptr: *const c_void) -> CFTypeRef;
    }

    /// Owned CF object released on drop.
    struct AxObject(CFTypeRef);

    // AXUIElementRef is a plain CF object; ownership can move across threads.
    unsafe impl Send for AxObject {}

    impl Drop for AxObject {
        fn drop(&mut self) {
            if !self.0.is_null() {
                unsafe { CFRelease(self.0) };
            }
        }
    }

    fn ax_attribute(name: &'static str) -> CFString {
        CFString::from_static_string(name)
    }

    /// Accessibility-backed window service. Keeps the most recently fetched
    /// focused window alive so the position and size calls that follow can
    /// reach it; each `focused_window` call replaces the previous element.
    pub struct SystemWindowService {
        focused: Mutex<Option<(u64, AxObject)>>,
        next_handle: AtomicU64,
    }

    impl SystemWindowService {
        pub fn new() -> Self {
            Self {
                focused: Mutex::new(None),
                next_handle: AtomicU64::new(1),
            }
        }

        fn set_attribute(
            &self,
            window: WindowHandle,
            attribute: &'static str,
            value: AxObject,
        ) -> std::result::Result<(), String> {
            let guard = self.focused.lock().expect("poisoned lock");
            let Some((handle_id, element)) = guard.as_ref() else {
                return Err("no focused window fetched".to_string());
            };
            if *handle_id != window.0 {
                return Err("stale window handle".to_string());
            }

            let err = unsafe {
                AXUIElementSetAttributeValue(
                    element.0,
                    ax_attribute(attribute).as_concrete_TypeRef(),
                    value.0,
                )
            };
            if err == AX_SUCCESS {
                Ok(())
            } else {
                Err(format!("AXError {err}"))
            }
        }
    }

    impl Default for SystemWindowService {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WindowService for SystemWindowService {
        fn frontmost_application(&self) -> Option<AppHandle> {
            unsafe {
                let workspace: id = msg_send![class!(NSWorkspace), sharedWorkspace];
                let app: id = msg_send![workspace, frontmostApplication];
                if app == nil {
                    return None;
                }
                let pid: i32 = msg_send![app, processIdentifier];
                Some(AppHandle { pid })
            }
        }

        fn focused_window(&self, app: AppHandle) -> Result<WindowHandle> {
            let ax_app = unsafe { AXUIElementCreateApplication(app.pid) };
            if ax_app.is_null() {
                return Err(ChordTileError::FocusedWindowUnavailable(format!(
                    "no accessibility element for pid {}",
                    app.pid
                ))
                .into());
            }
            let ax_app = AxObject(ax_app);

            let mut value: CFTypeRef = std::ptr::null();
            let err = unsafe {
                AXUIElementCopyAttributeValue(
                    ax_app.0,
                    ax_attribute("AXFocusedWindow").as_concrete_TypeRef(),
                    &mut value,
                )
            };
            if err != AX_SUCCESS || value.is_null() {
                return Err(ChordTileError::FocusedWindowUnavailable(format!(
                    "AXFocusedWindow lookup failed (AXError {err})"
                ))
                .into());
            }

            let handle_id = self.next_handle.fetch_add(1, Ordering::SeqCst);
            *self.focused.lock().expect("poisoned lock") = Some((handle_id, AxObject(value)));
            Ok(WindowHandle(handle_id))
        }

        fn set_position(&self, window: WindowHandle, origin: Point) -> Result<()> {
            let point = CGPoint::new(origin.x, origin.y);
            let value =
                unsafe { AXValueCreate(AX_VALUE_CGPOINT_TYPE, &point as *const CGPoint as _) };
            if value.is_null() {
                return Err(
                    ChordTileError::SetPositionFailed("AXValue allocation failed".into()).into(),
                );
            }
            self.set_attribute(window, "AXPosition", AxObject(value))
                .map_err(|reason| ChordTileError::SetPositionFailed(reason).into())
        }

        fn set_size(&self, window: WindowHandle, size: Size) -> Result<()> {
            let cg_size = CGSize::new(size.width, size.height);
            let value =
                unsafe { AXValueCreate(AX_VALUE_CGSIZE_TYPE, &cg_size as *const CGSize as _) };
            if value.is_null() {
                return Err(
                    ChordTileError::SetSizeFailed("AXValue allocation failed".into()).into(),
                );
            }
            self.set_attribute(window, "AXSize", AxObject(value))
                .map_err(|reason| ChordTileError::SetSizeFailed(reason).into())
        }
    }
}

#[cfg(not(target_os = "macos"))]
mod system {
    use super::{AppHandle, WindowHandle, WindowService};
    use crate::models::{Point, Size};
    use crate::{ChordTileError, Result};

    /// Placeholder used off-macOS so the crate still builds and tests run
    /// against the in-memory service.
    #[derive(Debug, Default)]
    pub struct SystemWindowService;

    impl SystemWindowService {
        pub fn new() -> Self {
            Self
        }
    }

    impl WindowService for SystemWindowService {
        fn frontmost_application(&self) -> Option<AppHandle> {
            None
        }

        fn focused_window(&self, _app: AppHandle) -> Result<WindowHandle> {
            Err(ChordTileError::MacOSAPIError(
                "window service is only available on macOS".into(),
            )
            .into())
        }

        fn set_position(&self, _window: WindowHandle, _origin: Point) -> Result<()> {
            Err(ChordTileError::MacOSAPIError(
                "window service is only available on macOS".into(),
            )
            .into())
        }

        fn set_size(&self, _window: WindowHandle, _size: Size) -> Result<()> {
            Err(ChordTileError::MacOSAPIError(
                "window service is only available on macOS".into(),
            )
            .into())
        }
    }
}

pub use system::SystemWindowService;

/// In-memory window service modelling a single frontmost application with at
/// most one focused window. Used by unit and integration tests.
#[derive(Debug)]
pub struct InMemoryWindowService {
    state: Mutex<InMemoryState>,
}

#[derive(Debug)]
struct InMemoryState {
    frontmost: Option<AppHandle>,
    focused: Option<Rect>,
    reject_position: bool,
    reject_size: bool,
}

impl InMemoryWindowService {
    /// A frontmost application with a focused window at `frame`.
    pub fn with_focused_window(frame: Rect) -> Self {
        Self {
            state: Mutex::new(InMemoryState {
                frontmost: Some(AppHandle { pid: 100 }),
                focused: Some(frame),
                reject_position: false,
                reject_size: false,
            }),
        }
    }

    /// No frontmost application at all.
    pub fn without_frontmost() -> Self {
        Self {
            state: Mutex::new(InMemoryState {
                frontmost: None,
                focused: None,
                reject_position: false,
                reject_size: false,
            }),
        }
    }

    /// A frontmost application whose focused-window lookup fails.
    pub fn without_focused_window() -> Self {
        Self {
            state: Mutex::new(InMemoryState {
                frontmost: Some(AppHandle { pid: 100 }),
                focused: None,
                reject_position: false,
                reject_size: false,
            }),
        }
    }

    /// Bring back a frontmost application with a focused window at `frame`.
    pub fn restore_frontmost(&self, frame: Rect) {
        let mut state = self.state.lock().unwrap();
        state.frontmost = Some(AppHandle { pid: 100 });
        state.focused = Some(frame);
    }

    pub fn set_reject_position(&self, reject: bool) {
        self.state.lock().unwrap().reject_position = reject;
    }

    pub fn set_reject_size(&self, reject: bool) {
        self.state.lock().unwrap().reject_size = reject;
    }

    /// Current frame of the focused window, if one exists.
    pub fn focused_frame(&self) -> Option<Rect> {
        self.state.lock().unwrap().focused
    }
}

impl WindowService for InMemoryWindowService {
    fn frontmost_application(&self) -> Option<AppHandle> {
        self.state.lock().unwrap().frontmost
    }

    fn focused_window(&self, _app: AppHandle) -> Result<WindowHandle> {
        let state = self.state.lock().unwrap();
        if state.focused.is_some() {
            Ok(WindowHandle(1))
        } else {
            Err(crate::ChordTileError::FocusedWindowUnavailable(
                "application has no focused window".into(),
            )
            .into())
        }
    }

    fn set_position(&self, _window: WindowHandle, origin: Point) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.reject_position {
            return Err(
                crate::ChordTileError::SetPositionFailed("rejected by test fixture".into()).into(),
            );
        }
        if let Some(frame) = state.focused.as_mut() {
            frame.origin = origin;
        }
        Ok(())
    }

    fn set_size(&self, _window: WindowHandle, size: Size) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.reject_size {
            return Err(
                crate::ChordTileError::SetSizeFailed("rejected by test fixture".into()).into(),
            );
        }
        if let Some(frame) = state.focused.as_mut() {
            frame.size = size;
        }
        Ok(())
    }
}
