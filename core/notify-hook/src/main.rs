//! notify-hook: tiered notification handler for Claude Code hooks.
//!
//! Called directly by Claude Code hooks configured in ~/.claude/settings.json.
//! Tool-use and stop hooks record session activity; Notification hooks are
//! routed through the configured tiers, with deferred tiers re-checked for
//! idleness by a detached worker process.
//!
//! ## Subcommands
//!
//! - `handle`: Main hook handler, reads JSON from stdin
//! - `delayed-send`: Delayed delivery worker (spawned internally)

mod delayed;
mod handle;
mod logging;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "notify-hook")]
#[command(about = "Tiered notification delivery for Claude Code hooks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle a hook event (reads JSON from stdin)
    Handle,

    /// Delayed delivery worker (spawned by the handle command)
    DelayedSend {
        /// Serialized deferred request
        #[arg(long)]
        payload: String,
    },
}

fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Handle => {
            if let Err(e) = handle::run() {
                tracing::error!(error = %e, "notify-hook handle failed");
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::DelayedSend { payload } => {
            // Fire-and-forget by design: the parent has already exited and
            // nothing can observe a failure here
            delayed::run(&payload);
        }
    }
}
