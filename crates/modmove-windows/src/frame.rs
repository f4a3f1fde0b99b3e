use std::mem;

use modmove_core::{Size, WindowResult};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Dwm::{DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute};
use windows::Win32::UI::WindowsAndMessaging::GetWindowRect;

use crate::window::os_error;

/// The invisible border widths around a window.
///
/// On Windows 10/11, windows have invisible drop-shadow borders that
/// `GetWindowRect` includes but are not visually part of the window.
/// Typical values are ~7px left/right/bottom and 0px top.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderOffset {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BorderOffset {
    /// Extra width the outer rectangle has over the visible one.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Extra height the outer rectangle has over the visible one.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Converts a visible size into the outer `SetWindowPos` extent.
    ///
    /// Corner drags are not floored, so the visible size may be negative.
    /// It is clamped to zero here and Windows then raises the window to
    /// its own minimum through `WM_GETMINMAXINFO`.
    pub fn outer_size(&self, size: Size) -> (i32, i32) {
        let width = size.width.round().max(0.0) as i32;
        let height = size.height.round().max(0.0) as i32;
        (width + self.horizontal(), height + self.vertical())
    }
}

/// Returns the visible bounds of a window using DWM extended frame bounds.
///
/// Falls back to `GetWindowRect` if DWM is unavailable.
pub fn visible_rect(hwnd: HWND) -> WindowResult<RECT> {
    let mut frame = RECT::default();
    // SAFETY: the out pointer and size describe a live RECT.
    let result = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_EXTENDED_FRAME_BOUNDS,
            &mut frame as *mut RECT as *mut _,
            mem::size_of::<RECT>() as u32,
        )
    };

    if result.is_err() {
        unsafe { GetWindowRect(hwnd, &mut frame) }.map_err(os_error)?;
    }

    Ok(frame)
}

/// Computes the invisible border widths by comparing `GetWindowRect`
/// (includes borders) with `DWMWA_EXTENDED_FRAME_BOUNDS` (visible area).
pub fn border_offset(hwnd: HWND) -> WindowResult<BorderOffset> {
    let mut outer = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut outer) }.map_err(os_error)?;
    let visible = visible_rect(hwnd)?;
    Ok(offset_between(&outer, &visible))
}

fn offset_between(outer: &RECT, visible: &RECT) -> BorderOffset {
    BorderOffset {
        left: visible.left - outer.left,
        top: visible.top - outer.top,
        right: outer.right - visible.right,
        bottom: outer.bottom - visible.bottom,
    }
}
