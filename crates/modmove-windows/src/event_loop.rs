use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use modmove_core::{Modifiers, Point};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, KBDLLHOOKSTRUCT, MSG, MSLLHOOKSTRUCT,
    PostThreadMessageW, SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, WH_KEYBOARD_LL,
    WH_MOUSE_LL, WM_KEYDOWN, WM_KEYUP, WM_MOUSEMOVE, WM_QUIT, WM_SYSKEYDOWN, WM_SYSKEYUP,
};

use crate::HostResult;
use crate::keys;

/// Input observed by the global hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The set of held modifier keys changed.
    ModifiersChanged(Modifiers),
    /// The cursor moved while motion tracking was enabled.
    MouseMoved { position: Point, at: Instant },
}

struct HookState {
    on_event: Box<dyn Fn(InputEvent)>,
    tracking: Arc<AtomicBool>,
    held: Cell<Modifiers>,
}

// Hook callbacks run on the thread that installed them, so the state
// lives in a thread-local of the pump thread.
thread_local! {
    static HOOK_STATE: RefCell<Option<HookState>> = const { RefCell::new(None) };
}

/// Starts the input hooks on a new message-pump thread.
///
/// `on_event` runs on the pump thread inside the hook callbacks and must
/// return quickly; Windows silently drops low-level hooks that stall.
/// Mouse motion is only reported while `tracking` is set.
pub fn start<F>(on_event: F, tracking: Arc<AtomicBool>) -> HostResult<EventLoopHandle>
where
    F: Fn(InputEvent) + Send + 'static,
{
    let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();

    let handle = thread::spawn(move || {
        HOOK_STATE.with(|cell| {
            *cell.borrow_mut() = Some(HookState {
                on_event: Box::new(on_event),
                tracking,
                held: Cell::new(keys::held_modifiers()),
            });
        });

        // SAFETY: GetCurrentThreadId has no preconditions.
        let thread_id = unsafe { GetCurrentThreadId() };

        // SAFETY: the hook procedures live for the whole program and are
        // removed below before the thread exits.
        let hooks = unsafe {
            (
                SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), None, 0),
                SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_proc), None, 0),
            )
        };
        let (keyboard, mouse) = match hooks {
            (Ok(keyboard), Ok(mouse)) => (keyboard, mouse),
            (keyboard, mouse) => {
                for hook in [keyboard, mouse].into_iter().flatten() {
                    unsafe {
                        let _ = UnhookWindowsHookEx(hook);
                    }
                }
                let _ = ready_tx.send(Err("failed to install input hooks".to_string()));
                return;
            }
        };

        let _ = ready_tx.send(Ok(thread_id));
        modmove_core::log_debug!("Input hooks installed on thread {thread_id}");

        run_message_pump();

        unsafe {
            let _ = UnhookWindowsHookEx(keyboard);
            let _ = UnhookWindowsHookEx(mouse);
        }
        HOOK_STATE.with(|cell| cell.borrow_mut().take());
        modmove_core::log_debug!("Input hooks removed");
    });

    let thread_id = ready_rx
        .recv()
        .map_err(|_| "event loop thread exited unexpectedly")??;

    Ok(EventLoopHandle { thread_id, handle })
}

/// Handle for controlling the event loop from the daemon.
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Signals the event loop to stop and waits for the thread to finish.
    pub fn stop(self) {
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// Pumps messages until WM_QUIT. Low-level hooks are only called while
/// the installing thread is inside `GetMessageW`.
fn run_message_pump() {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

fn key_transition(message: u32) -> Option<bool> {
    match message {
        WM_KEYDOWN | WM_SYSKEYDOWN => Some(true),
        WM_KEYUP | WM_SYSKEYUP => Some(false),
        _ => None,
    }
}

/// Reports the new modifier set if the key event changed it. Auto-repeat
/// key downs leave the set unchanged and are dropped.
fn on_modifier_key(vk: u32, pressed: bool) {
    HOOK_STATE.with(|cell| {
        let state = cell.borrow();
        let Some(state) = state.as_ref() else {
            return;
        };
        let held = keys::modifiers_after(vk, pressed);
        if held != state.held.get() {
            state.held.set(held);
            (state.on_event)(InputEvent::ModifiersChanged(held));
        }
    });
}

fn on_mouse_move(position: Point) {
    HOOK_STATE.with(|cell| {
        if let Some(state) = cell.borrow().as_ref()
            && state.tracking.load(Ordering::Relaxed)
        {
            (state.on_event)(InputEvent::MouseMoved {
                position,
                at: Instant::now(),
            });
        }
    });
}

unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0
        && let Some(pressed) = key_transition(wparam.0 as u32)
    {
        // SAFETY: for HC_ACTION, lparam points to a KBDLLHOOKSTRUCT.
        let info = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
        if keys::modifier_for_vk(info.vkCode).is_some() {
            on_modifier_key(info.vkCode, pressed);
        }
    }
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}

unsafe extern "system" fn mouse_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 && wparam.0 as u32 == WM_MOUSEMOVE {
        // SAFETY: for HC_ACTION, lparam points to an MSLLHOOKSTRUCT.
        let info = unsafe { &*(lparam.0 as *const MSLLHOOKSTRUCT) };
        on_mouse_move(Point::new(f64::from(info.pt.x), f64::from(info.pt.y)));
    }
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}
