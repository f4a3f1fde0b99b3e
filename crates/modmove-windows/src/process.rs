use modmove_core::{WindowError, WindowResult};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{AllowSetForegroundWindow, SetForegroundWindow};

/// Brings the process owning `hwnd` to the foreground.
///
/// Windows activates per window, not per process, so the window that was
/// grabbed is the one focused. `AllowSetForegroundWindow` is called first
/// because the foreground lock otherwise rejects focus changes requested
/// by a background process.
pub fn activate(pid: u32, hwnd: HWND) -> WindowResult<()> {
    // SAFETY: both calls take plain values; a stale handle makes them fail.
    unsafe {
        let _ = AllowSetForegroundWindow(pid);
        if SetForegroundWindow(hwnd).as_bool() {
            Ok(())
        } else {
            Err(WindowError::Unavailable("foreground activation"))
        }
    }
}
