//! Windows host for the ModMove gesture engine.
//!
//! Everything here talks to Win32 and only builds on Windows targets.
#![cfg(windows)]

/// Ctrl+C handling for the foreground daemon.
pub mod ctrl_c;

/// Foreground daemon wiring hooks to the gesture engine.
pub mod daemon;

/// The [`modmove_core::Desktop`] implementation.
pub mod desktop;

/// Per-monitor DPI awareness and scale lookup.
pub mod dpi;

/// Low-level keyboard and mouse hooks on a message-pump thread.
pub mod event_loop;

/// Invisible border compensation.
pub mod frame;

/// Modifier key and cursor state.
pub mod keys;

/// Display enumeration.
pub mod monitor;

/// Process activation.
pub mod process;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

pub use desktop::WindowsDesktop;
pub use monitor::enumerate_displays;
pub use window::Window;

/// Result type for host setup: hooks, handlers and the daemon loop.
pub type HostResult<T> = Result<T, Box<dyn std::error::Error>>;
