pub mod debug;
pub mod init;
pub mod run;

/// Exits with an error on platforms without a host implementation.
#[cfg(not(windows))]
pub fn unsupported(command: &str) -> ! {
    eprintln!("Error: `{command}` is only supported on Windows.");
    std::process::exit(1);
}
