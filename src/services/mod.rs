//! Input recognition and window placement services

pub mod geometry;
pub mod key_filter;
pub mod pipeline;
pub mod placement;
pub mod press_history;
pub mod window_mover;

pub use key_filter::{FilterDecision, KeyEventFilter};
pub use pipeline::ChordPipeline;
pub use press_history::PressHistory;
pub use window_mover::WindowMover;
