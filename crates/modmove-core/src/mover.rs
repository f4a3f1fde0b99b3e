//! The gesture state machine.
//!
//! The host reports two things: modifier changes, already mapped to a
//! [`GestureMode`], and mouse motion samples. The first sample of a
//! gesture picks the window under the cursor and freezes a
//! [`GestureSnapshot`]; every later sample moves or resizes that window
//! relative to the snapshot.

use std::time::Instant;

use crate::config::{GestureConfig, ModifierConfig};
use crate::{
    Corner, Desktop, Display, GestureMode, Modifiers, Point, Rect, Size, SpeedTracker,
    UsableScreen, Window, WindowError, WindowResult, constraint, corner, screen,
};

/// The frozen reference frame of one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSnapshot {
    pub mouse: Point,
    pub position: Point,
    pub size: Size,
    pub corner: Corner,
    /// Usable frame and scale of the window's display, when any display
    /// is known. Without one the gesture is never clamped.
    pub screen: Option<UsableScreen>,
}

impl GestureSnapshot {
    /// Captures a snapshot from the window's live geometry.
    fn capture<W: Window>(window: &W, mouse: Point, displays: &[Display]) -> WindowResult<Self> {
        let position = window.position()?;
        let size = window.size()?;
        Ok(Self {
            mouse,
            position,
            size,
            corner: corner::closest_corner(position, size, mouse),
            screen: screen::resolve(displays, Some(position)),
        })
    }

    fn scale(&self) -> f64 {
        self.screen.map_or(1.0, |s| s.scale)
    }
}

/// A window bound to the running gesture.
struct Gesture<W> {
    window: W,
    snapshot: GestureSnapshot,
}

/// Drives window moves and resizes from modifier and mouse input.
///
/// All methods run on the host's input thread and return quickly. Errors
/// from the platform never escape: a vanished window ends the gesture and
/// any other failure skips the current sample.
pub struct Mover<D: Desktop> {
    desktop: D,
    gesture_config: GestureConfig,
    primary: Modifiers,
    mode: GestureMode,
    gesture: Option<Gesture<D::Window>>,
    speed: SpeedTracker,
    last_update: Option<Instant>,
    /// Mouse position of the sample behind the window's current geometry.
    last_applied: Option<Point>,
}

impl<D: Desktop> Mover<D> {
    pub fn new(desktop: D, gesture_config: GestureConfig, modifiers: &ModifierConfig) -> Self {
        let speed = SpeedTracker::new(gesture_config.smoothing_weight);
        Self {
            desktop,
            gesture_config,
            primary: modifiers.primary_keys(),
            mode: GestureMode::None,
            gesture: None,
            speed,
            last_update: None,
            last_applied: None,
        }
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// The snapshot of the running gesture, if a window is bound.
    pub fn snapshot(&self) -> Option<&GestureSnapshot> {
        self.gesture.as_ref().map(|g| &g.snapshot)
    }

    /// The current smoothed mouse speed.
    pub fn speed(&self) -> f64 {
        self.speed.speed()
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    /// Reacts to a change of the modifier-derived mode.
    ///
    /// Switching between move and resize keeps the bound window but
    /// re-anchors the snapshot where the window is now, paired with the
    /// sample that put it there, so the window does not jump. Switching to
    /// [`GestureMode::None`] ends the gesture.
    pub fn on_mode_changed(&mut self, mode: GestureMode) {
        if mode == self.mode {
            return;
        }
        crate::log_debug!("Gesture mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.desktop.set_motion_tracking(false);

        if mode == GestureMode::None {
            self.reset();
            return;
        }

        if self.gesture.is_some() {
            self.reanchor();
        }
        self.desktop.set_motion_tracking(true);
    }

    /// Processes one mouse motion sample taken at `timestamp`.
    pub fn on_motion_sample(&mut self, position: Point, timestamp: Instant) {
        if self.mode == GestureMode::None {
            return;
        }

        if self.gesture.is_some() && !self.desktop.modifiers().contains_all(self.primary) {
            // The key release was missed; never leave a window stuck to the cursor.
            crate::log_info!("Modifiers released without notification, ending gesture");
            self.terminate();
            return;
        }

        let Some(snapshot) = self.snapshot().copied() else {
            self.acquire(position, timestamp);
            return;
        };

        let delta = position - snapshot.mouse;
        self.speed.update(position, timestamp, snapshot.scale());

        if let Some(last) = self.last_update
            && timestamp.saturating_duration_since(last) < self.gesture_config.update_interval()
        {
            return;
        }
        self.last_update = Some(timestamp);

        let result = match self.mode {
            GestureMode::Move => self.apply_move(&snapshot, delta),
            GestureMode::Resize => self.apply_resize(&snapshot, delta),
            GestureMode::None => Ok(()),
        };
        if result.is_ok() {
            self.last_applied = Some(position);
        }
        self.handle_result(result);
    }

    /// Binds the window under `mouse` and freezes the gesture snapshot.
    ///
    /// The same sample is used for the lookup and the snapshot, so the
    /// reference point is exactly where the window was picked.
    fn acquire(&mut self, mouse: Point, timestamp: Instant) {
        let Some(window) = self.desktop.window_at(mouse) else {
            crate::log_debug!("No window at ({:.0}, {:.0})", mouse.x, mouse.y);
            return;
        };

        let displays = self.desktop.displays();
        let snapshot = match GestureSnapshot::capture(&window, mouse, &displays) {
            Ok(s) => s,
            Err(e) => {
                crate::log_debug!("Window at ({:.0}, {:.0}) not usable: {e}", mouse.x, mouse.y);
                return;
            }
        };

        let pid = window.pid().ok();
        crate::log_debug!(
            "Got window - pid: {:?}, pos: ({:.0}, {:.0}), size: {:.0}x{:.0}, corner: {:?}, mouse: ({:.0}, {:.0})",
            pid,
            snapshot.position.x,
            snapshot.position.y,
            snapshot.size.width,
            snapshot.size.height,
            snapshot.corner,
            mouse.x,
            mouse.y
        );

        if let Some(pid) = pid
            && pid != self.desktop.current_pid()
            && let Err(e) = self.desktop.activate_process(pid, &window)
        {
            crate::log_warn!("Failed to activate process {pid}: {e}");
        }
        if let Err(e) = window.bring_to_front() {
            crate::log_debug!("Failed to raise window: {e}");
        }

        self.speed.start(mouse, timestamp);
        self.last_update = None;
        self.last_applied = Some(mouse);
        self.gesture = Some(Gesture { window, snapshot });
    }

    /// Re-anchors the running gesture at the window's current geometry.
    ///
    /// The reference mouse is the last sample whose write succeeded, which
    /// is the sample the window's current geometry reflects.
    fn reanchor(&mut self) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        let mouse = self.last_applied.unwrap_or(gesture.snapshot.mouse);
        let displays = self.desktop.displays();
        match GestureSnapshot::capture(&gesture.window, mouse, &displays) {
            Ok(snapshot) => gesture.snapshot = snapshot,
            Err(e) => {
                crate::log_info!("Lost window while switching mode: {e}");
                self.gesture = None;
                self.speed.reset();
                self.last_applied = None;
            }
        }
    }

    fn apply_move(&self, snapshot: &GestureSnapshot, delta: Point) -> WindowResult<()> {
        let Some(gesture) = self.gesture.as_ref() else {
            return Ok(());
        };
        let window = &gesture.window;

        let frame = self.clamp_frame(snapshot);
        let constrain = match frame {
            // Judged against the live rectangle: an escaped window stays free.
            Some(frame) => constraint::should_constrain_movement(
                self.speed.speed(),
                self.gesture_config.speed_threshold,
                &window.rect()?,
                &frame,
            ),
            None => false,
        };

        let delta = constraint::constrained_move_delta(
            delta,
            snapshot.position,
            snapshot.size,
            &frame.unwrap_or_default(),
            constrain,
        );
        window.set_position(snapshot.position + delta)
    }

    /// Applies a corner resize.
    ///
    /// For corners that move the origin the position is committed first,
    /// computed from the desired size, so the window system does not clamp
    /// the new size against the old origin. The size is then read back; if
    /// the window refused to shrink that far, the origin is corrected so
    /// the anchor edges stay put.
    fn apply_resize(&self, snapshot: &GestureSnapshot, delta: Point) -> WindowResult<()> {
        let Some(gesture) = self.gesture.as_ref() else {
            return Ok(());
        };
        let window = &gesture.window;

        let frame = self.clamp_frame(snapshot);
        let constrain = frame.is_some()
            && constraint::should_constrain_resize(
                self.speed.speed(),
                self.gesture_config.speed_threshold,
            );
        let delta = constraint::constrained_resize_delta(
            delta,
            snapshot.corner,
            snapshot.position,
            snapshot.size,
            &frame.unwrap_or_default(),
            constrain,
        );
        let desired = corner::desired_size(snapshot.corner, snapshot.size, delta);

        if !snapshot.corner.moves_origin() {
            return window.set_size(desired);
        }

        if let Some(origin) =
            corner::resized_position(snapshot.corner, snapshot.position, snapshot.size, desired)
        {
            window.set_position(origin)?;
        }
        window.set_size(desired)?;

        let actual = window.size()?;
        if actual != desired
            && let Some(origin) =
                corner::resized_position(snapshot.corner, snapshot.position, snapshot.size, actual)
        {
            window.set_position(origin)?;
        }
        Ok(())
    }

    /// The frame to clamp against, or `None` when clamping is off.
    fn clamp_frame(&self, snapshot: &GestureSnapshot) -> Option<Rect> {
        if !self.gesture_config.constrain_to_screen {
            return None;
        }
        snapshot.screen.map(|s| s.frame)
    }

    fn handle_result(&mut self, result: WindowResult<()>) {
        match result {
            Ok(()) => {}
            Err(WindowError::Gone) => {
                crate::log_info!("Target window disappeared, ending gesture");
                self.terminate();
            }
            Err(e) => crate::log_debug!("Skipping update: {e}"),
        }
    }

    /// Ends the gesture without waiting for a mode change.
    ///
    /// The mode drops to [`GestureMode::None`]; the next modifier report
    /// from the host starts a fresh gesture.
    fn terminate(&mut self) {
        self.desktop.set_motion_tracking(false);
        self.mode = GestureMode::None;
        self.reset();
    }

    fn reset(&mut self) {
        self.gesture = None;
        self.speed.reset();
        self.last_update = None;
        self.last_applied = None;
    }
}

#[cfg(test)]
#[path = "mover_tests.rs"]
mod tests;
