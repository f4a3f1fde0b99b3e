#[cfg(windows)]
pub fn execute() {
    if let Err(e) = modmove_windows::daemon::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
pub fn execute() {
    super::unsupported("run");
}
