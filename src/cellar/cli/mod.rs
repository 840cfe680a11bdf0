//! # CLI Behavior
//!
//! This is **one possible UI client** for cellar, standing in for a chat front
//! end. It is the only place that knows about terminal I/O and exit codes.
//!
//! ## Data Location
//!
//! Everything lives in one directory: `CELLAR_HOME` when set, else the OS data
//! directory. It holds `catalog.json` and, optionally, `cellar.toml`.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` wins; otherwise the
//! configured `log_level` (default `warn`) applies. `-v` raises it to `info`.
//!
//! ## Naked Execution
//!
//! Running `cellar` with no subcommand lists the active wines.

mod commands;
mod print;
mod setup;

pub use commands::run;
