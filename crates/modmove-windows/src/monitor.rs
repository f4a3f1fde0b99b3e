use std::mem;

use modmove_core::{Display, Rect};
use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};
use windows::core::BOOL;

use crate::dpi;

/// `MONITORINFO::dwFlags` bit set on the primary monitor.
const MONITORINFOF_PRIMARY: u32 = 1;

/// A monitor in Win32 screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct MonitorInfo {
    /// Full monitor bounds.
    pub bounds: RECT,
    /// Bounds minus the taskbar and docked toolbars.
    pub work_area: RECT,
    /// Pixels per point from the effective DPI.
    pub scale: f64,
    pub primary: bool,
}

/// Enumerates all connected monitors.
///
/// Monitors whose info cannot be read are skipped.
pub fn enumerate_monitors() -> Vec<MonitorInfo> {
    let mut handles: Vec<HMONITOR> = Vec::new();

    // SAFETY: EnumDisplayMonitors runs the callback synchronously, so the
    // Vec passed through LPARAM outlives every call.
    unsafe {
        let _ = EnumDisplayMonitors(
            None,
            None,
            Some(monitor_enum_proc),
            LPARAM(&mut handles as *mut _ as isize),
        );
    }

    handles.into_iter().filter_map(monitor_info).collect()
}

/// Enumerates all connected monitors in layout coordinates.
///
/// Win32 places the primary monitor's top-left at the origin with y
/// growing downward. The layout convention measures y upward from the
/// primary monitor's bottom edge, so each rectangle is flipped about it.
pub fn enumerate_displays() -> Vec<Display> {
    to_layout(&enumerate_monitors())
}

unsafe extern "system" fn monitor_enum_proc(
    monitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the Vec pointer passed by enumerate_monitors().
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HMONITOR>) };
    handles.push(monitor);
    BOOL(1)
}

fn monitor_info(monitor: HMONITOR) -> Option<MonitorInfo> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: cbSize is set as the API requires.
    if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        modmove_core::log_warn!("Failed to get monitor info for {:?}", monitor);
        return None;
    }

    Some(MonitorInfo {
        bounds: info.rcMonitor,
        work_area: info.rcWork,
        scale: dpi::scale_for_monitor(monitor),
        primary: info.dwFlags & MONITORINFOF_PRIMARY != 0,
    })
}

/// Converts monitors to displays in layout coordinates.
pub fn to_layout(monitors: &[MonitorInfo]) -> Vec<Display> {
    let Some(primary) = monitors
        .iter()
        .find(|m| m.primary)
        .or_else(|| monitors.first())
    else {
        return Vec::new();
    };
    let flip = primary.bounds.bottom;

    monitors
        .iter()
        .map(|m| Display {
            frame: layout_rect(&m.bounds, flip),
            usable: layout_rect(&m.work_area, flip),
            scale: m.scale,
            primary: m.primary,
        })
        .collect()
}

fn layout_rect(rect: &RECT, flip: i32) -> Rect {
    Rect::new(
        f64::from(rect.left),
        f64::from(flip - rect.bottom),
        f64::from(rect.right - rect.left),
        f64::from(rect.bottom - rect.top),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use modmove_core::{Point, screen};

    fn rect(left: i32, top: i32, right: i32, bottom: i32) -> RECT {
        RECT {
            left,
            top,
            right,
            bottom,
        }
    }

    /// 1920x1080 primary with a bottom taskbar, and a taller 150% monitor
    /// to its right that starts 200px higher.
    fn two_monitors() -> Vec<MonitorInfo> {
        vec![
            MonitorInfo {
                bounds: rect(0, 0, 1920, 1080),
                work_area: rect(0, 0, 1920, 1040),
                scale: 1.0,
                primary: true,
            },
            MonitorInfo {
                bounds: rect(1920, -200, 4480, 1240),
                work_area: rect(1920, -200, 4480, 1192),
                scale: 1.5,
                primary: false,
            },
        ]
    }

    #[test]
    fn primary_sits_at_layout_origin() {
        // Act
        let displays = to_layout(&two_monitors());

        // Assert
        assert_eq!(displays[0].frame, Rect::new(0.0, 0.0, 1920.0, 1080.0));
        assert_eq!(displays[0].usable, Rect::new(0.0, 40.0, 1920.0, 1040.0));
        assert!(displays[0].primary);
    }

    #[test]
    fn resolved_work_area_matches_win32_coordinates() {
        // Arrange
        let displays = to_layout(&two_monitors());

        // Act
        let primary = screen::resolve(&displays, Some(Point::new(100.0, 100.0))).unwrap();
        let secondary = screen::resolve(&displays, Some(Point::new(2000.0, -100.0))).unwrap();

        // Assert
        assert_eq!(primary.frame, Rect::new(0.0, 0.0, 1920.0, 1040.0));
        assert_eq!(secondary.frame, Rect::new(1920.0, -200.0, 2560.0, 1392.0));
        assert_eq!(secondary.scale, 1.5);
    }

    #[test]
    fn no_monitors_yield_no_displays() {
        assert!(to_layout(&[]).is_empty());
    }
}
