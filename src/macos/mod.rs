//! macOS integration layer for ChordTile
//!
//! These modules provide safe, testable abstractions over the macOS
//! Accessibility, AppKit and Core Graphics APIs. The concrete implementations
//! talk to the platform while unit tests rely on in-memory stand-ins.

pub mod accessibility;
pub mod display;
pub mod event_tap;
pub mod permissions;

pub use accessibility::*;
pub use display::*;
pub use event_tap::*;
pub use permissions::*;
