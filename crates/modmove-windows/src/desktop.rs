use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use modmove_core::{Desktop, Display, Modifiers, Point, WindowResult};

use crate::window::Window;
use crate::{keys, monitor, process};

/// The Windows desktop as seen by the gesture engine.
///
/// Motion tracking is a flag shared with the hook thread: the mouse hook
/// stays installed and only forwards samples while the flag is set.
pub struct WindowsDesktop {
    tracking: Arc<AtomicBool>,
}

impl WindowsDesktop {
    pub fn new(tracking: Arc<AtomicBool>) -> Self {
        Self { tracking }
    }
}

impl Desktop for WindowsDesktop {
    type Window = Window;

    fn window_at(&self, point: Point) -> Option<Window> {
        Window::at_point(point)
    }

    fn displays(&self) -> Vec<Display> {
        monitor::enumerate_displays()
    }

    fn modifiers(&self) -> Modifiers {
        keys::held_modifiers()
    }

    fn current_pid(&self) -> u32 {
        std::process::id()
    }

    fn activate_process(&self, pid: u32, window: &Window) -> WindowResult<()> {
        process::activate(pid, window.hwnd())
    }

    fn set_motion_tracking(&mut self, enabled: bool) {
        self.tracking.store(enabled, Ordering::Relaxed);
    }
}
