mod loader;
pub mod template;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::{GestureMode, Modifier, Modifiers};

pub use loader::{config_dir, config_path, load, parse, try_load};

/// Top-level configuration for ModMove.
///
/// Loaded from `~/.config/modmove/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gesture tracking parameters.
    pub gesture: GestureConfig,
    /// Which modifier keys start a move or a resize.
    pub modifiers: ModifierConfig,
    /// File logging settings.
    pub logging: LogConfig,
}

/// Gesture tracking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Mouse speed (points per second) at or above which a gesture is
    /// not clamped to the screen.
    pub speed_threshold: f64,
    /// Weight of the latest sample in the smoothed mouse speed (0.01–1.0).
    pub smoothing_weight: f64,
    /// Minimum milliseconds between two window updates.
    pub update_interval_ms: u64,
    /// Whether slow gestures are clamped to the usable screen frame.
    pub constrain_to_screen: bool,
}

/// Modifier keys that drive the gesture mode.
///
/// Holding every `primary` key moves the window under the cursor.
/// Holding the `resize` keys as well resizes it instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierConfig {
    pub primary: Vec<Modifier>,
    pub resize: Vec<Modifier>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            speed_threshold: 1000.0,
            smoothing_weight: crate::speed::DEFAULT_SMOOTHING_WEIGHT,
            update_interval_ms: 20,
            constrain_to_screen: true,
        }
    }
}

impl GestureConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            primary: vec![Modifier::Ctrl, Modifier::Alt],
            resize: vec![Modifier::Shift],
        }
    }
}

impl ModifierConfig {
    /// The keys that must stay held for a gesture to continue.
    pub fn primary_keys(&self) -> Modifiers {
        Modifiers::from_keys(&self.primary)
    }

    /// Maps the held modifier keys to a gesture mode.
    pub fn mode_for(&self, held: Modifiers) -> GestureMode {
        if !held.contains_all(self.primary_keys()) {
            return GestureMode::None;
        }
        let resize = Modifiers::from_keys(&self.resize);
        if !resize.is_empty() && held.contains_all(resize) {
            GestureMode::Resize
        } else {
            GestureMode::Move
        }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    ///
    /// An empty `primary` list would start a gesture on every mouse move,
    /// so it is replaced with the default keys.
    pub fn validate(&mut self) {
        let defaults = GestureConfig::default();
        let gesture = &mut self.gesture;
        if !gesture.speed_threshold.is_finite() {
            gesture.speed_threshold = defaults.speed_threshold;
        }
        gesture.speed_threshold = gesture.speed_threshold.max(1.0);
        if !gesture.smoothing_weight.is_finite() {
            gesture.smoothing_weight = defaults.smoothing_weight;
        }
        gesture.smoothing_weight = gesture.smoothing_weight.clamp(0.01, 1.0);
        gesture.update_interval_ms = gesture.update_interval_ms.min(1000);

        if self.modifiers.primary.is_empty() {
            self.modifiers.primary = ModifierConfig::default().primary;
        }
    }
}
