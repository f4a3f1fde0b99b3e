//! Screen-boundary clamping for move and resize deltas.
//!
//! Slow gestures keep the window inside the usable screen frame. Fast
//! gestures are never clamped, which lets a flick push a window past an
//! edge; once outside, a window stays free until it is fully back inside.

use crate::{Corner, Point, Rect, Size};

/// Clamps a move delta so the moved window stays inside `screen`.
///
/// Returns `mouse_delta` untouched when `constrain` is false.
pub fn constrained_move_delta(
    mouse_delta: Point,
    initial_pos: Point,
    window_size: Size,
    screen: &Rect,
    constrain: bool,
) -> Point {
    if !constrain {
        return mouse_delta;
    }

    let min_dx = screen.min_x() - initial_pos.x;
    let max_dx = screen.max_x() - (initial_pos.x + window_size.width);
    let min_dy = screen.min_y() - initial_pos.y;
    let max_dy = screen.max_y() - (initial_pos.y + window_size.height);

    Point::new(
        mouse_delta.x.max(min_dx).min(max_dx),
        mouse_delta.y.max(min_dy).min(max_dy),
    )
}

/// Clamps a resize delta so the dragged corner stays inside `screen`.
///
/// Only the two edges that meet at `corner` are bounded. The opposite
/// edges never limit the drag, so a window already flush against the
/// right edge can still grow leftward from its top-left corner.
pub fn constrained_resize_delta(
    mouse_delta: Point,
    corner: Corner,
    initial_pos: Point,
    initial_size: Size,
    screen: &Rect,
    constrain: bool,
) -> Point {
    if !constrain {
        return mouse_delta;
    }

    let dx = if corner.is_left() {
        mouse_delta.x.max(screen.min_x() - initial_pos.x)
    } else {
        mouse_delta
            .x
            .min(screen.max_x() - (initial_pos.x + initial_size.width))
    };
    let dy = if corner.is_top() {
        mouse_delta.y.max(screen.min_y() - initial_pos.y)
    } else {
        mouse_delta
            .y
            .min(screen.max_y() - (initial_pos.y + initial_size.height))
    };

    Point::new(dx, dy)
}

/// Resizes are clamped whenever the mouse is slower than `threshold`.
pub fn should_constrain_resize(speed: f64, threshold: f64) -> bool {
    speed < threshold
}

/// Decides whether a move should be clamped this tick.
///
/// Fast moves are never clamped. Slow moves are clamped only while the
/// window's current rectangle lies fully inside the screen frame.
pub fn should_constrain_movement(
    speed: f64,
    threshold: f64,
    current: &Rect,
    screen: &Rect,
) -> bool {
    if speed >= threshold {
        return false;
    }
    screen.contains_rect(current)
}
