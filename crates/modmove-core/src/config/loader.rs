use std::io::ErrorKind;
use std::path::PathBuf;

use super::Config;

/// Returns the config directory: `~/.config/modmove/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("modmove"))
}

/// Returns the config file path: `~/.config/modmove/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Parses config file contents and clamps the result to safe ranges.
pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.validate();
    Ok(config)
}

/// Tries to load and parse `config.toml`.
///
/// A missing file yields the defaults. Any other IO or parse failure is
/// returned as an error string naming the file.
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(format!("{}: {e}", path.display())),
    };
    parse(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// If the file exists but can't be read or parsed, prints a warning and
/// returns defaults.
pub fn load() -> Config {
    match try_load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}
