mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "modmove",
    version,
    about = "Move and resize any window by holding modifier keys and moving the mouse"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Run in the foreground until Ctrl+C
    Run,
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Subcommand)]
enum DebugCommands {
    /// List connected displays and their usable frames
    Displays,
    /// Show the window under the cursor as a gesture would pick it
    Window,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Run => commands::run::execute(),
        Commands::Debug { command } => match command {
            DebugCommands::Displays => commands::debug::displays::execute(),
            DebugCommands::Window => commands::debug::window::execute(),
        },
    }
}
