//! Display lookup for the window being manipulated.
//!
//! Displays are reported in the layout convention (origin at the primary
//! display's bottom-left, y grows upward) while window handles use the
//! window convention (origin at the primary display's top-left, y grows
//! downward). Both conventions share the primary display's top edge, so
//! every display is flipped about that edge, and a display's usable frame
//! is placed from its own insets inside its own full frame.

use crate::{Point, Rect};

/// A physical display as reported by the platform, in layout coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    /// Full display bounds.
    pub frame: Rect,
    /// Bounds minus menu bars, docks and taskbars.
    pub usable: Rect,
    /// Physical pixels per point (1.0 on standard displays, 2.0 on retina).
    pub scale: f64,
    /// Whether this is the primary display.
    pub primary: bool,
}

/// The usable frame of a display in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsableScreen {
    pub frame: Rect,
    pub scale: f64,
}

impl Display {
    /// Converts the full frame into window coordinates.
    ///
    /// `origin_top` is the layout-space y of the primary display's top edge.
    fn window_frame(&self, origin_top: f64) -> Rect {
        Rect::new(
            self.frame.x,
            origin_top - self.frame.max_y(),
            self.frame.width,
            self.frame.height,
        )
    }

    /// Converts the usable frame into window coordinates, relative to the
    /// already converted full frame.
    ///
    /// A degenerate usable frame is replaced by the full frame.
    fn window_usable(&self, window_frame: &Rect) -> Rect {
        if self.usable.width <= 0.0 || self.usable.height <= 0.0 {
            return *window_frame;
        }
        let top_inset = self.frame.max_y() - self.usable.max_y();
        Rect::new(
            self.usable.x,
            window_frame.y + top_inset,
            self.usable.width,
            self.usable.height,
        )
    }

    fn to_usable_screen(&self, origin_top: f64) -> UsableScreen {
        let frame = self.window_frame(origin_top);
        UsableScreen {
            frame: self.window_usable(&frame),
            scale: self.scale,
        }
    }
}

/// Returns the primary display, or the first one if none is flagged.
pub fn primary_display(displays: &[Display]) -> Option<&Display> {
    displays.iter().find(|d| d.primary).or_else(|| displays.first())
}

/// Resolves the usable frame and scale of the display containing `position`.
///
/// `position` is in window coordinates. When it is `None` or lies on no
/// display, the primary display is used. Returns `None` only when
/// `displays` is empty.
pub fn resolve(displays: &[Display], position: Option<Point>) -> Option<UsableScreen> {
    let primary = primary_display(displays)?;
    let origin_top = primary.frame.max_y();

    if let Some(pos) = position {
        let containing = displays
            .iter()
            .find(|d| d.window_frame(origin_top).contains_point(pos));
        if let Some(display) = containing {
            return Some(display.to_usable_screen(origin_top));
        }
    }

    Some(primary.to_usable_screen(origin_top))
}

/// Converts every display's usable frame into window coordinates,
/// keeping the input order.
pub fn usable_screens(displays: &[Display]) -> Vec<UsableScreen> {
    let Some(primary) = primary_display(displays) else {
        return Vec::new();
    };
    let origin_top = primary.frame.max_y();
    displays
        .iter()
        .map(|d| d.to_usable_screen(origin_top))
        .collect()
}
