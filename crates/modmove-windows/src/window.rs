use modmove_core::{Point, Size, WindowError, WindowResult};
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::WindowsAndMessaging::{
    BringWindowToTop, GA_ROOT, GWL_EXSTYLE, GetAncestor, GetDesktopWindow, GetShellWindow,
    GetWindowLongPtrW, GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsIconic,
    IsWindow, IsWindowVisible, RealGetWindowClassW, SET_WINDOW_POS_FLAGS, SWP_FRAMECHANGED,
    SWP_NOACTIVATE, SWP_NOCOPYBITS, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetWindowPos,
    WS_EX_TOOLWINDOW, WindowFromPoint,
};

use crate::frame;

/// Maps a Win32 failure to a window error.
pub(crate) fn os_error(e: windows::core::Error) -> WindowError {
    WindowError::Os(e.to_string())
}

/// A top-level window on the Windows platform, wrapping a Win32 `HWND`.
///
/// Geometry is reported and applied in terms of the visible frame, so the
/// invisible resize borders of Windows 10/11 never show up as gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    /// Creates a new `Window` from a raw `HWND`.
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Returns the raw window handle.
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Returns the top-level window under a screen point, if it can be
    /// moved.
    ///
    /// `WindowFromPoint` returns the deepest child control, so the hit is
    /// walked up to its root. The desktop, the shell and tool windows such
    /// as the taskbar are never returned.
    pub fn at_point(point: Point) -> Option<Self> {
        let pt = POINT {
            x: point.x.round() as i32,
            y: point.y.round() as i32,
        };
        // SAFETY: WindowFromPoint and GetAncestor only query window state.
        let root = unsafe {
            let hit = WindowFromPoint(pt);
            if hit.is_invalid() {
                return None;
            }
            GetAncestor(hit, GA_ROOT)
        };
        if root.is_invalid() {
            return None;
        }

        let window = Self::new(root);
        window.is_movable().then_some(window)
    }

    /// Returns whether the handle still refers to a live window.
    pub fn is_alive(&self) -> bool {
        // SAFETY: IsWindow accepts any handle value.
        unsafe { IsWindow(Some(self.hwnd)).as_bool() }
    }

    /// Returns the window title, empty when it has none.
    pub fn title(&self) -> String {
        // SAFETY: the buffer is sized from GetWindowTextLengthW plus the
        // terminator Windows requires.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length <= 0 {
                return String::new();
            }
            let mut buffer = vec![0u16; length as usize + 1];
            let copied = GetWindowTextW(self.hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
        }
    }

    /// Returns the window class name.
    pub fn class(&self) -> String {
        // 256 is the maximum class name length in Win32.
        let mut buffer = [0u16; 256];
        // SAFETY: RealGetWindowClassW writes at most buffer.len() characters.
        let length = unsafe { RealGetWindowClassW(self.hwnd, &mut buffer) };
        String::from_utf16_lossy(&buffer[..length as usize])
    }

    fn is_movable(&self) -> bool {
        // SAFETY: all of these are plain queries on a window handle.
        unsafe {
            if self.hwnd == GetDesktopWindow() || self.hwnd == GetShellWindow() {
                return false;
            }
            if !IsWindowVisible(self.hwnd).as_bool() || IsIconic(self.hwnd).as_bool() {
                return false;
            }
            let ex_style = GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) as u32;
            ex_style & WS_EX_TOOLWINDOW.0 == 0
        }
    }

    /// Chromium and Firefox only repaint after a programmatic resize when
    /// `WM_NCCALCSIZE` fires, which `SWP_FRAMECHANGED` forces.
    fn needs_frame_changed(&self) -> bool {
        let class = self.class();
        class == "Chrome_WidgetWin_1" || class == "MozillaWindowClass"
    }

    fn ensure_alive(&self) -> WindowResult<()> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(WindowError::Gone)
        }
    }

    /// Classifies a failed call: a closed window ends the gesture, any
    /// other failure is reported as-is.
    fn failure(&self, e: windows::core::Error) -> WindowError {
        if self.is_alive() {
            os_error(e)
        } else {
            WindowError::Gone
        }
    }

    fn set_window_pos(
        &self,
        x: i32,
        y: i32,
        cx: i32,
        cy: i32,
        flags: SET_WINDOW_POS_FLAGS,
    ) -> WindowResult<()> {
        // SAFETY: SetWindowPos with a live HWND is safe; a stale handle
        // only makes the call fail.
        unsafe { SetWindowPos(self.hwnd, None, x, y, cx, cy, flags) }.map_err(|e| self.failure(e))
    }
}

impl modmove_core::Window for Window {
    fn position(&self) -> WindowResult<Point> {
        self.ensure_alive()?;
        let frame = frame::visible_rect(self.hwnd)?;
        Ok(Point::new(f64::from(frame.left), f64::from(frame.top)))
    }

    fn size(&self) -> WindowResult<Size> {
        self.ensure_alive()?;
        let frame = frame::visible_rect(self.hwnd)?;
        Ok(Size::new(
            f64::from(frame.right - frame.left),
            f64::from(frame.bottom - frame.top),
        ))
    }

    fn set_position(&self, position: Point) -> WindowResult<()> {
        self.ensure_alive()?;
        let border = frame::border_offset(self.hwnd)?;
        let x = position.x.round() as i32 - border.left;
        let y = position.y.round() as i32 - border.top;

        self.set_window_pos(x, y, 0, 0, SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE)
    }

    fn set_size(&self, size: Size) -> WindowResult<()> {
        self.ensure_alive()?;
        let border = frame::border_offset(self.hwnd)?;
        let (cx, cy) = border.outer_size(size);

        // WM_WINDOWPOSCHANGING is left enabled so the window can enforce its
        // minimum size; the engine reads the real size back afterwards.
        let mut flags = SWP_NOMOVE | SWP_NOZORDER | SWP_NOACTIVATE | SWP_NOCOPYBITS;
        if self.needs_frame_changed() {
            flags |= SWP_FRAMECHANGED;
        }

        modmove_core::log_debug!(
            "set_size 0x{:X}: {}x{} border(L:{} T:{} R:{} B:{})",
            self.hwnd.0 as usize,
            size.width,
            size.height,
            border.left,
            border.top,
            border.right,
            border.bottom
        );
        self.set_window_pos(0, 0, cx, cy, flags)
    }

    fn pid(&self) -> WindowResult<u32> {
        let mut pid = 0u32;
        // SAFETY: pid is a live local for the duration of the call.
        let thread = unsafe { GetWindowThreadProcessId(self.hwnd, Some(&mut pid as *mut u32)) };
        if thread == 0 {
            self.ensure_alive()?;
            return Err(WindowError::Unavailable("process id"));
        }
        Ok(pid)
    }

    fn bring_to_front(&self) -> WindowResult<()> {
        // SAFETY: BringWindowToTop only reorders a window handle.
        unsafe { BringWindowToTop(self.hwnd) }.map_err(|e| self.failure(e))
    }
}
