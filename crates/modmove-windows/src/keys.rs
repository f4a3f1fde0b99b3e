use modmove_core::{Modifier, Modifiers, Point, WindowResult};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

use crate::window::os_error;

/// Side-specific virtual key codes probed for each modifier.
const PROBES: [(Modifier, [i32; 2]); 4] = [
    (Modifier::Alt, [0xA4, 0xA5]),   // VK_LMENU, VK_RMENU
    (Modifier::Shift, [0xA0, 0xA1]), // VK_LSHIFT, VK_RSHIFT
    (Modifier::Ctrl, [0xA2, 0xA3]),  // VK_LCONTROL, VK_RCONTROL
    (Modifier::Win, [0x5B, 0x5C]),   // VK_LWIN, VK_RWIN
];

/// Maps a virtual key code to the modifier it belongs to.
///
/// Low-level hooks report the side-specific codes (`VK_LCONTROL`, ...),
/// other sources the generic ones; both are accepted.
pub fn modifier_for_vk(vk: u32) -> Option<Modifier> {
    match vk {
        0x10 | 0xA0 | 0xA1 => Some(Modifier::Shift),
        0x11 | 0xA2 | 0xA3 => Some(Modifier::Ctrl),
        0x12 | 0xA4 | 0xA5 => Some(Modifier::Alt),
        0x5B | 0x5C => Some(Modifier::Win),
        _ => None,
    }
}

/// Reads the modifier keys physically held right now.
pub fn held_modifiers() -> Modifiers {
    probe(|_| true)
}

/// Returns the held modifiers once a key event for `vk` is applied.
///
/// Inside a low-level keyboard hook the async key state still reflects
/// the moment *before* the event, so the key itself is left out of the
/// probe and its new state applied on top. Releasing one Ctrl while the
/// other stays down therefore keeps Ctrl held.
pub fn modifiers_after(vk: u32, pressed: bool) -> Modifiers {
    let mut held = probe(|code| code as u32 != vk);
    if pressed && let Some(modifier) = modifier_for_vk(vk) {
        held.insert(modifier);
    }
    held
}

fn probe(include: impl Fn(i32) -> bool) -> Modifiers {
    let mut held = Modifiers::NONE;
    for (modifier, codes) in PROBES {
        // SAFETY: GetAsyncKeyState only reads global key state. The high
        // bit is set while the key is down.
        let down = codes
            .into_iter()
            .filter(|&vk| include(vk))
            .any(|vk| unsafe { GetAsyncKeyState(vk) } < 0);
        if down {
            held.insert(modifier);
        }
    }
    held
}

/// Returns the cursor position in screen pixels.
pub fn cursor_position() -> WindowResult<Point> {
    let mut point = POINT::default();
    // SAFETY: point is a live local.
    unsafe { GetCursorPos(&mut point) }.map_err(os_error)?;
    Ok(Point::new(f64::from(point.x), f64::from(point.y)))
}
