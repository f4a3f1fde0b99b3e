use crate::{Display, Modifiers, Point, Rect, Size, WindowResult};

/// A foreign on-screen window the engine can move and resize.
///
/// Each platform crate (e.g. `modmove-windows`) provides its own
/// implementation. Every accessor may fail at any time because the
/// owning process can close the window or exit mid-gesture.
pub trait Window {
    /// Returns the top-left corner in window coordinates.
    fn position(&self) -> WindowResult<Point>;

    /// Returns the outer size.
    fn size(&self) -> WindowResult<Size>;

    /// Moves the window so its top-left corner lands on `position`.
    fn set_position(&self, position: Point) -> WindowResult<()>;

    /// Resizes the window, keeping its top-left corner in place.
    ///
    /// The window system may clamp the request to a minimum size, so the
    /// resulting size must be read back with [`Window::size`].
    fn set_size(&self, size: Size) -> WindowResult<()>;

    /// Returns the id of the process that owns the window.
    fn pid(&self) -> WindowResult<u32>;

    /// Raises the window above its siblings.
    fn bring_to_front(&self) -> WindowResult<()>;

    /// Returns the bounding rectangle from one position and one size read.
    fn rect(&self) -> WindowResult<Rect> {
        Ok(Rect::from_parts(self.position()?, self.size()?))
    }
}

/// The desktop services the gesture engine needs from its host.
///
/// The host owns the global input hooks. It reports modifier changes and
/// mouse motion to [`crate::Mover`], and the engine calls back through
/// this trait for everything else.
pub trait Desktop {
    /// The window handle type produced by [`Desktop::window_at`].
    type Window: Window;

    /// Returns the topmost application window at `point`, if any.
    fn window_at(&self, point: Point) -> Option<Self::Window>;

    /// Returns all connected displays in layout coordinates.
    fn displays(&self) -> Vec<Display>;

    /// Returns the modifier keys held right now.
    fn modifiers(&self) -> Modifiers;

    /// Returns this process's id.
    fn current_pid(&self) -> u32;

    /// Brings the UI of process `pid` to the foreground.
    ///
    /// `window` is the window that triggered the activation; platforms
    /// that activate per window rather than per process use it.
    fn activate_process(&self, pid: u32, window: &Self::Window) -> WindowResult<()>;

    /// Starts or stops delivery of mouse motion samples.
    fn set_motion_tracking(&mut self, enabled: bool);
}
