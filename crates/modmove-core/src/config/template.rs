/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `modmove init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# ModMove configuration
# Location: ~/.config/modmove/config.toml

[gesture]
# Mouse speed in points per second at or above which a move or resize
# is not clamped to the screen. A quick flick lets a window escape an edge.
speed_threshold = 1000.0
# Weight of the latest mouse sample in the smoothed speed (0.01 to 1.0).
smoothing_weight = 0.1
# Minimum milliseconds between two window updates (20 = about 50 per second).
update_interval_ms = 20
# Keep slow moves and resizes inside the usable screen area.
constrain_to_screen = true

[modifiers]
# Hold all of these keys and move the mouse to move the window under it.
# Available: "ctrl", "alt", "shift", "win".
primary = ["ctrl", "alt"]
# Hold these keys as well to resize from the nearest corner instead.
# An empty list disables resizing.
resize = ["shift"]

[logging]
# Enable file logging to ~/.config/modmove/logs/modmove.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
