//! Global key-down interception
//!
//! The tap runs on a dedicated thread with its own run loop. Key-downs are
//! handed to the pipeline one at a time; returning `Drop` from the tap
//! callback is what suppresses delivery to the focused application. If the OS
//! disables the tap (timeout or user input), the process terminates: the core
//! cannot passively continue without its event source.

use crate::services::ChordPipeline;
use crate::{ChordTileError, Result};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::warn;

use platform::TapControl;

/// Handle to the event tap thread. Dropping the handle leaves the tap
/// running; call [`TapHandle::shutdown`] to stop it.
pub struct TapHandle {
    control: Arc<TapControl>,
    join_handle: Option<JoinHandle<()>>,
}

impl TapHandle {
    /// Stop the tap's run loop and wait for the thread to finish.
    pub fn shutdown(mut self) -> Result<()> {
        self.control.stop();
        if let Some(handle) = self.join_handle.take() {
            handle.join().map_err(|_| {
                ChordTileError::EventTapFailure("event tap thread panicked".into())
            })?;
        }
        Ok(())
    }
}

/// Spawn the event tap on its own thread and wait until it is installed.
pub fn spawn_event_tap(pipeline: Arc<ChordPipeline>) -> Result<TapHandle> {
    let control = Arc::new(TapControl::new());
    let (ready_tx, ready_rx) = mpsc::channel();

    let thread_control = control.clone();
    let join_handle = thread::Builder::new()
        .name("chordtile-event-tap".into())
        .spawn(move || platform::run_event_tap(pipeline, ready_tx, thread_control))
        .map_err(|err| {
            ChordTileError::EventTapFailure(format!("failed to spawn tap thread: {err}"))
        })?;

    match ready_rx.recv() {
        Ok(Ok(())) => Ok(TapHandle {
            control,
            join_handle: Some(join_handle),
        }),
        Ok(Err(err)) => {
            let _ = join_handle.join();
            Err(err)
        }
        Err(_) => {
            warn!("event tap thread exited before reporting readiness");
            let _ = join_handle.join();
            Err(ChordTileError::EventTapFailure("tap thread exited early".into()).into())
        }
    }
}

#[cfg(target_os = "macos")]
mod platform {
    use super::*;
    use core_foundation::runloop::{kCFRunLoopCommonModes, CFRunLoop};
    use core_graphics::event::{
        CGEventTap, CGEventTapLocation, CGEventTapOptions, CGEventTapPlacement, CGEventType,
        CallbackResult,
    };
    use crate::models::{ModifierMask, RawKeyEvent};
    use std::process;
    use std::sync::Mutex;
    use tracing::{debug, error};

    // CGEventField constants used by the callback.
    const FIELD_KEYBOARD_EVENT_AUTOREPEAT: u32 = 8;
    const FIELD_KEYBOARD_EVENT_KEYCODE: u32 = 9;

    /// Lets other threads stop the tap's run loop.
    pub(super) struct TapControl {
        run_loop: Mutex<Option<CFRunLoop>>,
    }

    impl TapControl {
        pub(super) fn new() -> Self {
            Self {
                run_loop: Mutex::new(None),
            }
        }

        fn set_run_loop(&self, run_loop: CFRunLoop) {
            *self.run_loop.lock().expect("poisoned lock") = Some(run_loop);
        }

        pub(super) fn stop(&self) {
            if let Some(run_loop) = self.run_loop.lock().expect("poisoned lock").take() {
                run_loop.stop();
            }
        }
    }

    pub(super) fn run_event_tap(
        pipeline: Arc<ChordPipeline>,
        ready: Sender<Result<()>>,
        control: Arc<TapControl>,
    ) {
        debug!("creating event tap");
        let tap = match CGEventTap::new(
            CGEventTapLocation::Session,
            CGEventTapPlacement::HeadInsertEventTap,
            CGEventTapOptions::Default,
            vec![CGEventType::KeyDown],
            move |_proxy, event_type, event| match event_type {
                CGEventType::KeyDown => {
                    let key_code = event.get_integer_value_field(FIELD_KEYBOARD_EVENT_KEYCODE);
                    let is_repeat =
                        event.get_integer_value_field(FIELD_KEYBOARD_EVENT_AUTOREPEAT) != 0;
                    let raw = RawKeyEvent::new(
                        key_code,
                        ModifierMask::new(event.get_flags().bits()),
                        is_repeat,
                    );
                    if pipeline.handle(&raw) {
                        CallbackResult::Drop
                    } else {
                        CallbackResult::Keep
                    }
                }
                CGEventType::TapDisabledByTimeout | CGEventType::TapDisabledByUserInput => {
                    // The sole unrecoverable condition: without the tap the
                    // snapper can no longer see key events.
                    error!(?event_type, "event tap disabled by the OS, exiting");
                    process::exit(1);
                }
                _ => CallbackResult::Keep,
            },
        ) {
            Ok(tap) => tap,
            Err(_) => {
                let _ = ready.send(Err(ChordTileError::EventTapFailure(
                    "unable to create event tap; is accessibility permission granted?".into(),
                )
                .into()));
                return;
            }
        };

        let source = match tap.mach_port().create_runloop_source(0) {
            Ok(source) => source,
            Err(_) => {
                let _ = ready.send(Err(ChordTileError::EventTapFailure(
                    "failed to create run loop source for tap".into(),
                )
                .into()));
                return;
            }
        };

        let run_loop = CFRunLoop::get_current();
        control.set_run_loop(run_loop.clone());
        run_loop.add_source(&source, unsafe { kCFRunLoopCommonModes });
        tap.enable();

        let _ = ready.send(Ok(()));
        debug!("event tap installed, entering run loop");

        CFRunLoop::run_current();

        debug!("event tap run loop exited");
    }
}

#[cfg(not(target_os = "macos"))]
mod platform {
    use super::*;

    pub(super) struct TapControl;

    impl TapControl {
        pub(super) fn new() -> Self {
            Self
        }

        pub(super) fn stop(&self) {}
    }

    pub(super) fn run_event_tap(
        _pipeline: Arc<ChordPipeline>,
        ready: Sender<Result<()>>,
        _control: Arc<TapControl>,
    ) {
        let _ = ready.send(Err(ChordTileError::EventTapFailure(
            "event taps are only available on macOS".into(),
        )
        .into()));
    }
}

#[cfg(all(test, not(target_os = "macos")))]
mod tests {
    use super::*;
    use crate::macos::accessibility::InMemoryWindowService;
    use crate::macos::display::InMemoryDisplayService;
    use crate::models::ScreenSize;
    use crate::services::PressHistory;

    #[test]
    fn spawn_reports_unsupported_platform() {
        let pipeline = Arc::new(ChordPipeline::new(
            PressHistory::default(),
            Arc::new(InMemoryWindowService::without_frontmost()),
            Arc::new(InMemoryDisplayService::new(ScreenSize::new(1280.0, 720.0))),
        ));
        let Err(err) = spawn_event_tap(pipeline) else {
            panic!("spawning a tap off-macOS must fail");
        };
        assert!(err.to_string().contains("only available on macOS"));
    }
}
