//! # Cellar CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! - `cli/setup.rs`: clap argument definitions
//! - `cli/commands.rs`: context wiring and per-command handlers
//! - `cli/print.rs`: terminal output (messages, wine lists, zone tables)

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
