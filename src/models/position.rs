//! Screen regions the snapper can move windows into

/// The positions we can move windows into. All are top-anchored and span the
/// full usable height; there is no vertical splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowPosition {
    LeftThird,
    LeftHalf,
    LeftTwoThirds,
    RightThird,
    RightHalf,
    RightTwoThirds,
    Fullscreen,
}
