//! Ctrl+C signal handler using `SetConsoleCtrlHandler`.

use std::sync::OnceLock;

use windows::Win32::System::Console::{CTRL_C_EVENT, SetConsoleCtrlHandler};

type Callback = Box<dyn Fn() + Send + Sync>;

/// Global callback, written once by `set_handler`, read by the handler.
static CALLBACK: OnceLock<Callback> = OnceLock::new();

/// Registers a Ctrl+C handler that runs `on_ctrl_c`.
///
/// Only the first registration takes effect.
pub fn set_handler(on_ctrl_c: impl Fn() + Send + Sync + 'static) -> windows::core::Result<()> {
    if CALLBACK.set(Box::new(on_ctrl_c)).is_err() {
        return Ok(());
    }
    // SAFETY: handler is a valid `extern "system"` callback for the life
    // of the process.
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if ctrl_type == CTRL_C_EVENT
        && let Some(callback) = CALLBACK.get()
    {
        callback();
        return windows::core::BOOL(1);
    }
    windows::core::BOOL(0)
}
