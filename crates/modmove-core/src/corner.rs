//! Corner selection and the size/position arithmetic of a corner drag.
//!
//! During a resize the corner nearest the cursor is dragged and the two
//! edges opposite to it stay anchored. These are pure functions so they
//! can be tested without any platform window.

use crate::{Point, Rect, Size};

/// The window corner being dragged during a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Whether the dragged corner sits on the window's left edge.
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    /// Whether the dragged corner sits on the window's top edge.
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    /// Whether dragging this corner moves the window origin.
    ///
    /// Only the bottom-right corner leaves the top-left origin in place.
    pub fn moves_origin(self) -> bool {
        self != Self::BottomRight
    }
}

/// Returns the corner of the window's quadrant that contains the mouse.
///
/// A mouse exactly on the vertical or horizontal midline belongs to the
/// right or bottom half respectively.
pub fn closest_corner(window_pos: Point, window_size: Size, mouse: Point) -> Corner {
    let window = Rect::from_parts(window_pos, window_size);

    match (mouse.x < window.center_x(), mouse.y < window.center_y()) {
        (true, true) => Corner::TopLeft,
        (false, true) => Corner::TopRight,
        (true, false) => Corner::BottomLeft,
        (false, false) => Corner::BottomRight,
    }
}

/// Computes the window size a corner drag of `delta` asks for.
///
/// Dragging a left corner rightward shrinks the window, dragging a right
/// corner rightward grows it, and likewise vertically. The result is not
/// floored; the window system applies its own minimum size.
pub fn desired_size(corner: Corner, initial: Size, delta: Point) -> Size {
    let width = if corner.is_left() {
        initial.width - delta.x
    } else {
        initial.width + delta.x
    };
    let height = if corner.is_top() {
        initial.height - delta.y
    } else {
        initial.height + delta.y
    };
    Size::new(width, height)
}

/// Computes the origin that keeps the anchor edges fixed at `actual` size.
///
/// `actual` is the size the window really ended up with, which can be
/// larger than requested when the window enforces a minimum size. Returns
/// `None` for [`Corner::BottomRight`], whose anchors are the origin edges.
pub fn resized_position(
    corner: Corner,
    initial_pos: Point,
    initial_size: Size,
    actual: Size,
) -> Option<Point> {
    let dx = initial_size.width - actual.width;
    let dy = initial_size.height - actual.height;

    match corner {
        Corner::TopLeft => Some(Point::new(initial_pos.x + dx, initial_pos.y + dy)),
        Corner::TopRight => Some(Point::new(initial_pos.x, initial_pos.y + dy)),
        Corner::BottomLeft => Some(Point::new(initial_pos.x + dx, initial_pos.y)),
        Corner::BottomRight => None,
    }
}
