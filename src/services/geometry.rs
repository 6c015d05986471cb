//! Region-to-rectangle arithmetic

use crate::models::{Point, Rect, ScreenSize, Size, WindowPosition};

/// Compute the absolute frame for a region on the given usable screen.
///
/// Every region is top-anchored and spans the full height. A right-side
/// x offset is computed with the identical fractional expression used as that
/// region's width, so left/right pairs at matching fractions tile without gap
/// or overlap.
pub fn frame_for(position: WindowPosition, screen: ScreenSize) -> Rect {
    let w = screen.width;

    let (x, width) = match position {
        WindowPosition::LeftThird => (0.0, w / 3.0),
        WindowPosition::LeftHalf => (0.0, w / 2.0),
        WindowPosition::LeftTwoThirds => (0.0, w / 3.0 * 2.0),
        WindowPosition::RightThird => (w - w / 3.0, w / 3.0),
        WindowPosition::RightHalf => (w - w / 2.0, w / 2.0),
        WindowPosition::RightTwoThirds => (w - w / 3.0 * 2.0, w / 3.0 * 2.0),
        WindowPosition::Fullscreen => (0.0, w),
    };

    Rect::new(Point::new(x, 0.0), Size::new(width, screen.height))
}
