use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;

use modmove_core::{GestureMode, Modifier, Mover, config};

use crate::event_loop::{self, InputEvent};
use crate::{HostResult, WindowsDesktop, ctrl_c, dpi};

/// Internal message type for the main daemon thread.
enum DaemonMsg {
    /// Input from the hook thread.
    Input(InputEvent),
    /// Ctrl+C was pressed.
    Stop,
}

/// Runs ModMove in the foreground until Ctrl+C.
///
/// The hook thread only observes input; every gesture decision and
/// window operation happens on this thread, one message at a time.
pub fn run() -> HostResult<()> {
    dpi::enable_dpi_awareness();
    let config = config::load();
    modmove_core::log::init(&config.logging);

    modmove_core::log_info!("ModMove started (PID: {})", std::process::id());
    modmove_core::log_info!(
        "Config: threshold={}, weight={}, interval={}ms, constrain={}, primary={}, resize={}",
        config.gesture.speed_threshold,
        config.gesture.smoothing_weight,
        config.gesture.update_interval_ms,
        config.gesture.constrain_to_screen,
        describe(&config.modifiers.primary),
        describe(&config.modifiers.resize)
    );

    let (tx, rx) = mpsc::channel::<DaemonMsg>();

    let stop_tx = tx.clone();
    ctrl_c::set_handler(move || {
        let _ = stop_tx.send(DaemonMsg::Stop);
    })?;

    let tracking = Arc::new(AtomicBool::new(false));
    let event_loop = event_loop::start(
        move |event| {
            let _ = tx.send(DaemonMsg::Input(event));
        },
        Arc::clone(&tracking),
    )?;

    let mut mover = Mover::new(
        WindowsDesktop::new(tracking),
        config.gesture.clone(),
        &config.modifiers,
    );

    eprintln!(
        "ModMove running. Hold {} to move, add {} to resize. Press Ctrl+C to stop.",
        describe(&config.modifiers.primary),
        describe(&config.modifiers.resize)
    );

    while let Ok(msg) = rx.recv() {
        match msg {
            DaemonMsg::Input(InputEvent::ModifiersChanged(held)) => {
                mover.on_mode_changed(config.modifiers.mode_for(held));
            }
            DaemonMsg::Input(InputEvent::MouseMoved { position, at }) => {
                mover.on_motion_sample(position, at);
            }
            DaemonMsg::Stop => break,
        }
    }

    mover.on_mode_changed(GestureMode::None);
    event_loop.stop();
    modmove_core::log_info!("ModMove stopped");
    eprintln!("ModMove stopped.");
    Ok(())
}

/// Formats a key combination as `Ctrl+Alt`.
fn describe(keys: &[Modifier]) -> String {
    if keys.is_empty() {
        return "nothing".into();
    }
    keys.iter()
        .map(|key| format!("{key:?}"))
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_combinations_are_joined_with_plus() {
        assert_eq!(describe(&[Modifier::Ctrl, Modifier::Alt]), "Ctrl+Alt");
        assert_eq!(describe(&[Modifier::Shift]), "Shift");
        assert_eq!(describe(&[]), "nothing");
    }
}
