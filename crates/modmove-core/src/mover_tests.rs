use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use super::*;
use crate::Modifier;

const OWN_PID: u32 = 1;
const APP_PID: u32 = 4242;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Call {
    SetPosition(Point),
    SetSize(Size),
}

struct WindowState {
    rect: Rect,
    min_size: Size,
    pid: u32,
    gone: bool,
    failure: Option<WindowError>,
    raised: bool,
    calls: Vec<Call>,
}

impl WindowState {
    fn check(&self) -> WindowResult<()> {
        if self.gone {
            return Err(WindowError::Gone);
        }
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Clone)]
struct FakeWindow(Rc<RefCell<WindowState>>);

impl Window for FakeWindow {
    fn position(&self) -> WindowResult<Point> {
        let state = self.0.borrow();
        if state.gone {
            return Err(WindowError::Gone);
        }
        Ok(state.rect.origin())
    }

    fn size(&self) -> WindowResult<Size> {
        let state = self.0.borrow();
        if state.gone {
            return Err(WindowError::Gone);
        }
        Ok(state.rect.size())
    }

    fn set_position(&self, position: Point) -> WindowResult<()> {
        let mut state = self.0.borrow_mut();
        state.check()?;
        state.calls.push(Call::SetPosition(position));
        state.rect.x = position.x;
        state.rect.y = position.y;
        Ok(())
    }

    fn set_size(&self, size: Size) -> WindowResult<()> {
        let mut state = self.0.borrow_mut();
        state.check()?;
        state.calls.push(Call::SetSize(size));
        state.rect.width = size.width.max(state.min_size.width);
        state.rect.height = size.height.max(state.min_size.height);
        Ok(())
    }

    fn pid(&self) -> WindowResult<u32> {
        Ok(self.0.borrow().pid)
    }

    fn bring_to_front(&self) -> WindowResult<()> {
        self.0.borrow_mut().raised = true;
        Ok(())
    }
}

struct FakeDesktop {
    window: Rc<RefCell<WindowState>>,
    displays: Vec<Display>,
    held: Cell<Modifiers>,
    lookups: Cell<u32>,
    activated: RefCell<Vec<u32>>,
    tracking: bool,
}

impl Desktop for FakeDesktop {
    type Window = FakeWindow;

    fn window_at(&self, point: Point) -> Option<FakeWindow> {
        self.lookups.set(self.lookups.get() + 1);
        self.window
            .borrow()
            .rect
            .contains_point(point)
            .then(|| FakeWindow(Rc::clone(&self.window)))
    }

    fn displays(&self) -> Vec<Display> {
        self.displays.clone()
    }

    fn modifiers(&self) -> Modifiers {
        self.held.get()
    }

    fn current_pid(&self) -> u32 {
        OWN_PID
    }

    fn activate_process(&self, pid: u32, _window: &FakeWindow) -> WindowResult<()> {
        self.activated.borrow_mut().push(pid);
        Ok(())
    }

    fn set_motion_tracking(&mut self, enabled: bool) {
        self.tracking = enabled;
    }
}

/// 1920x1080 primary display with a 40px taskbar at the bottom.
fn full_hd() -> Display {
    Display {
        frame: Rect::new(0.0, 0.0, 1920.0, 1080.0),
        usable: Rect::new(0.0, 40.0, 1920.0, 1040.0),
        scale: 1.0,
        primary: true,
    }
}

fn setup_with(
    rect: Rect,
    displays: Vec<Display>,
    gesture: GestureConfig,
) -> (Mover<FakeDesktop>, Rc<RefCell<WindowState>>) {
    let window = Rc::new(RefCell::new(WindowState {
        rect,
        min_size: Size::new(100.0, 50.0),
        pid: APP_PID,
        gone: false,
        failure: None,
        raised: false,
        calls: Vec::new(),
    }));
    let desktop = FakeDesktop {
        window: Rc::clone(&window),
        displays,
        held: Cell::new(Modifiers::from_keys(&[Modifier::Ctrl, Modifier::Alt])),
        lookups: Cell::new(0),
        activated: RefCell::new(Vec::new()),
        tracking: false,
    };
    let mover = Mover::new(desktop, gesture, &ModifierConfig::default());
    (mover, window)
}

fn setup(rect: Rect) -> (Mover<FakeDesktop>, Rc<RefCell<WindowState>>) {
    setup_with(rect, vec![full_hd()], GestureConfig::default())
}

/// A 400x300 window at (100, 100).
fn standard() -> Rect {
    Rect::new(100.0, 100.0, 400.0, 300.0)
}

fn after(start: Instant, ms: u64) -> Instant {
    start + Duration::from_millis(ms)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// ── Acquisition ─────────────────────────────────────────────────

#[test]
fn samples_are_ignored_without_a_mode() {
    // Arrange
    let (mut mover, window) = setup(standard());

    // Act
    mover.on_motion_sample(pt(200.0, 200.0), Instant::now());

    // Assert
    assert_eq!(mover.desktop().lookups.get(), 0);
    assert!(mover.snapshot().is_none());
    assert!(window.borrow().calls.is_empty());
}

#[test]
fn entering_a_mode_enables_motion_tracking() {
    let (mut mover, _window) = setup(standard());

    mover.on_mode_changed(GestureMode::Move);

    assert_eq!(mover.mode(), GestureMode::Move);
    assert!(mover.desktop().tracking);
}

#[test]
fn lookup_miss_binds_nothing_and_retries_next_sample() {
    // Arrange
    let (mut mover, _window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);

    // Act
    mover.on_motion_sample(pt(1000.0, 900.0), t0);
    let after_miss = mover.snapshot().copied();
    mover.on_motion_sample(pt(200.0, 200.0), after(t0, 10));

    // Assert
    assert!(after_miss.is_none());
    assert_eq!(mover.desktop().lookups.get(), 2);
    assert_eq!(mover.snapshot().map(|s| s.mouse), Some(pt(200.0, 200.0)));
}

#[test]
fn acquisition_snapshots_the_picking_sample() {
    // Arrange
    let (mut mover, window) = setup(standard());
    mover.on_mode_changed(GestureMode::Move);

    // Act
    mover.on_motion_sample(pt(150.0, 380.0), Instant::now());

    // Assert
    let snapshot = mover.snapshot().copied().unwrap();
    assert_eq!(snapshot.mouse, pt(150.0, 380.0));
    assert_eq!(snapshot.position, pt(100.0, 100.0));
    assert_eq!(snapshot.size, Size::new(400.0, 300.0));
    assert_eq!(snapshot.corner, Corner::BottomLeft);
    assert_eq!(
        snapshot.screen.map(|s| s.frame),
        Some(Rect::new(0.0, 0.0, 1920.0, 1040.0))
    );
    assert_eq!(mover.speed(), 0.0);
    assert!(window.borrow().raised);
    assert!(window.borrow().calls.is_empty());
}

#[test]
fn acquisition_activates_foreign_process() {
    let (mut mover, _window) = setup(standard());
    mover.on_mode_changed(GestureMode::Move);

    mover.on_motion_sample(pt(200.0, 200.0), Instant::now());

    assert_eq!(*mover.desktop().activated.borrow(), vec![APP_PID]);
}

#[test]
fn acquisition_skips_activating_own_process() {
    let (mut mover, window) = setup(standard());
    window.borrow_mut().pid = OWN_PID;
    mover.on_mode_changed(GestureMode::Move);

    mover.on_motion_sample(pt(200.0, 200.0), Instant::now());

    assert!(mover.desktop().activated.borrow().is_empty());
    assert!(window.borrow().raised);
}

#[test]
fn vanished_window_is_not_bound() {
    let (mut mover, window) = setup(standard());
    window.borrow_mut().gone = true;
    mover.on_mode_changed(GestureMode::Move);

    mover.on_motion_sample(pt(200.0, 200.0), Instant::now());

    assert!(mover.snapshot().is_none());
    assert_eq!(mover.mode(), GestureMode::Move);
}

// ── Move ────────────────────────────────────────────────────────

#[test]
fn move_follows_the_mouse_delta() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);

    // Act
    mover.on_motion_sample(pt(250.0, 260.0), after(t0, 30));

    // Assert
    assert_eq!(
        window.borrow().calls,
        vec![Call::SetPosition(pt(150.0, 160.0))]
    );
}

#[test]
fn slow_move_is_clamped_to_usable_frame() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);

    // Act
    mover.on_motion_sample(pt(50.0, 1100.0), after(t0, 2000));

    // Assert
    // Left edge stops at 0, bottom edge at the taskbar (1040 - 300).
    assert_eq!(window.borrow().rect.origin(), pt(0.0, 740.0));
}

#[test]
fn fast_flick_escapes_the_screen() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);

    // Act
    // 500px in 20ms: 25000 px/s, smoothed to 2500.
    mover.on_motion_sample(pt(-300.0, 200.0), after(t0, 20));

    // Assert
    assert!(mover.speed() >= 1000.0);
    assert_eq!(window.borrow().rect.origin(), pt(-400.0, 100.0));
}

#[test]
fn escaped_window_stays_free_when_slow() {
    // Arrange
    let gesture = GestureConfig {
        smoothing_weight: 1.0,
        ..GestureConfig::default()
    };
    let (mut mover, window) = setup_with(standard(), vec![full_hd()], gesture);
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    mover.on_motion_sample(pt(-300.0, 200.0), after(t0, 20));

    // Act
    mover.on_motion_sample(pt(-250.0, 200.0), after(t0, 1020));

    // Assert
    assert!(mover.speed() < 1000.0);
    assert_eq!(window.borrow().rect.origin(), pt(-350.0, 100.0));
}

#[test]
fn updates_inside_the_interval_are_dropped() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);

    // Act
    mover.on_motion_sample(pt(201.0, 200.0), after(t0, 5));
    mover.on_motion_sample(pt(202.0, 200.0), after(t0, 15));
    mover.on_motion_sample(pt(203.0, 200.0), after(t0, 30));

    // Assert
    assert_eq!(
        window.borrow().calls,
        vec![
            Call::SetPosition(pt(101.0, 100.0)),
            Call::SetPosition(pt(103.0, 100.0)),
        ]
    );
}

#[test]
fn dropped_samples_still_feed_the_speed() {
    let (mut mover, _window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    mover.on_motion_sample(pt(201.0, 200.0), after(t0, 5));
    let before = mover.speed();

    mover.on_motion_sample(pt(211.0, 200.0), after(t0, 10));

    assert!(mover.speed() > before);
}

#[test]
fn no_displays_means_no_clamping() {
    // Arrange
    let (mut mover, window) = setup_with(standard(), Vec::new(), GestureConfig::default());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);

    // Act
    mover.on_motion_sample(pt(50.0, 200.0), after(t0, 2000));

    // Assert
    assert!(mover.snapshot().unwrap().screen.is_none());
    assert_eq!(window.borrow().rect.origin(), pt(-50.0, 100.0));
}

#[test]
fn clamping_can_be_disabled() {
    let gesture = GestureConfig {
        constrain_to_screen: false,
        ..GestureConfig::default()
    };
    let (mut mover, window) = setup_with(standard(), vec![full_hd()], gesture);
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);

    mover.on_motion_sample(pt(50.0, 200.0), after(t0, 2000));

    assert_eq!(window.borrow().rect.origin(), pt(-50.0, 100.0));
}

// ── Resize ──────────────────────────────────────────────────────

#[test]
fn top_left_resize_sets_position_then_size() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Resize);
    mover.on_motion_sample(pt(120.0, 120.0), t0);

    // Act
    mover.on_motion_sample(pt(170.0, 140.0), after(t0, 1000));

    // Assert
    assert_eq!(
        window.borrow().calls,
        vec![
            Call::SetPosition(pt(150.0, 120.0)),
            Call::SetSize(Size::new(350.0, 280.0)),
        ]
    );
}

#[test]
fn minimum_size_keeps_anchor_edges_fixed() {
    // Arrange
    let (mut mover, window) = setup(standard());
    window.borrow_mut().min_size = Size::new(300.0, 250.0);
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Resize);
    mover.on_motion_sample(pt(120.0, 120.0), t0);

    // Act
    mover.on_motion_sample(pt(270.0, 220.0), after(t0, 1000));

    // Assert
    let rect = window.borrow().rect;
    assert_eq!(rect.size(), Size::new(300.0, 250.0));
    assert_eq!(rect.max_x(), 500.0);
    assert_eq!(rect.max_y(), 400.0);
    assert_eq!(
        window.borrow().calls.last(),
        Some(&Call::SetPosition(pt(200.0, 150.0)))
    );
}

#[test]
fn bottom_right_resize_only_sets_size() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Resize);
    mover.on_motion_sample(pt(480.0, 380.0), t0);

    // Act
    mover.on_motion_sample(pt(500.0, 390.0), after(t0, 1000));

    // Assert
    assert_eq!(
        window.borrow().calls,
        vec![Call::SetSize(Size::new(420.0, 310.0))]
    );
}

#[test]
fn slow_resize_stops_at_the_screen_edge() {
    // Arrange
    let (mut mover, window) = setup(Rect::new(1500.0, 700.0, 400.0, 300.0));
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Resize);
    mover.on_motion_sample(pt(1880.0, 980.0), t0);

    // Act
    mover.on_motion_sample(pt(1980.0, 1080.0), after(t0, 2000));

    // Assert
    assert_eq!(window.borrow().rect.size(), Size::new(420.0, 340.0));
}

// ── Mode changes and termination ────────────────────────────────

#[test]
fn switching_mode_reanchors_without_a_new_lookup() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    mover.on_motion_sample(pt(250.0, 260.0), after(t0, 30));

    // Act
    mover.on_mode_changed(GestureMode::Resize);

    // Assert
    let snapshot = mover.snapshot().copied().unwrap();
    assert_eq!(snapshot.position, pt(150.0, 160.0));
    assert_eq!(snapshot.mouse, pt(250.0, 260.0));
    assert_eq!(snapshot.corner, Corner::TopLeft);
    assert_eq!(mover.desktop().lookups.get(), 1);
    assert!(mover.desktop().tracking);
    assert_eq!(window.borrow().calls.len(), 1);
}

#[test]
fn switching_mode_does_not_move_the_window() {
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    mover.on_motion_sample(pt(250.0, 260.0), after(t0, 30));
    mover.on_mode_changed(GestureMode::Resize);

    mover.on_motion_sample(pt(250.0, 260.0), after(t0, 60));

    assert_eq!(window.borrow().rect, Rect::new(150.0, 160.0, 400.0, 300.0));
}

#[test]
fn switching_mode_twice_keeps_the_window_in_place() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    mover.on_motion_sample(pt(500.0, 500.0), after(t0, 3000));
    mover.on_mode_changed(GestureMode::Resize);
    mover.on_mode_changed(GestureMode::Move);

    // Act
    mover.on_motion_sample(pt(500.0, 500.0), after(t0, 3100));

    // Assert
    assert_eq!(window.borrow().rect.origin(), pt(400.0, 400.0));
}

#[test]
fn switching_mode_anchors_on_the_last_applied_sample() {
    // Arrange: the sample at 3010ms is inside the interval and never written.
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    mover.on_motion_sample(pt(500.0, 500.0), after(t0, 3000));
    mover.on_motion_sample(pt(520.0, 520.0), after(t0, 3010));

    // Act
    mover.on_mode_changed(GestureMode::Resize);
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(520.0, 520.0), after(t0, 3100));

    // Assert
    assert_eq!(mover.snapshot().map(|s| s.mouse), Some(pt(500.0, 500.0)));
    assert_eq!(window.borrow().rect.origin(), pt(420.0, 420.0));
}

#[test]
fn releasing_modifiers_resets_the_gesture() {
    // Arrange
    let (mut mover, _window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    mover.on_motion_sample(pt(260.0, 200.0), after(t0, 30));

    // Act
    mover.on_mode_changed(GestureMode::None);

    // Assert
    assert!(mover.snapshot().is_none());
    assert_eq!(mover.speed(), 0.0);
    assert!(!mover.desktop().tracking);
}

#[test]
fn missed_release_ends_the_gesture() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    mover.desktop().held.set(Modifiers::from_keys(&[Modifier::Ctrl]));

    // Act
    mover.on_motion_sample(pt(260.0, 200.0), after(t0, 30));

    // Assert
    assert_eq!(mover.mode(), GestureMode::None);
    assert!(mover.snapshot().is_none());
    assert!(!mover.desktop().tracking);
    assert!(window.borrow().calls.is_empty());
}

#[test]
fn fresh_press_after_termination_starts_over() {
    let (mut mover, _window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    mover.desktop().held.set(Modifiers::NONE);
    mover.on_motion_sample(pt(260.0, 200.0), after(t0, 30));
    mover.desktop().held.set(Modifiers::from_keys(&[Modifier::Ctrl, Modifier::Alt]));

    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(300.0, 300.0), after(t0, 60));

    assert_eq!(mover.snapshot().map(|s| s.mouse), Some(pt(300.0, 300.0)));
}

#[test]
fn closed_window_ends_the_gesture() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    window.borrow_mut().gone = true;

    // Act
    mover.on_motion_sample(pt(260.0, 200.0), after(t0, 30));

    // Assert
    assert_eq!(mover.mode(), GestureMode::None);
    assert!(mover.snapshot().is_none());
    assert!(!mover.desktop().tracking);
}

#[test]
fn transient_failure_skips_only_that_tick() {
    // Arrange
    let (mut mover, window) = setup(standard());
    let t0 = Instant::now();
    mover.on_mode_changed(GestureMode::Move);
    mover.on_motion_sample(pt(200.0, 200.0), t0);
    window.borrow_mut().failure = Some(WindowError::Unavailable("position"));
    mover.on_motion_sample(pt(210.0, 200.0), after(t0, 30));

    // Act
    window.borrow_mut().failure = None;
    mover.on_motion_sample(pt(220.0, 200.0), after(t0, 60));

    // Assert
    assert_eq!(mover.mode(), GestureMode::Move);
    assert_eq!(window.borrow().rect.origin(), pt(120.0, 100.0));
}
