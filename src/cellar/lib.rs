//! # Cellar Architecture
//!
//! Cellar is a **UI-agnostic wine collection library**: a catalog of storage
//! positions and the bottles in them, with the rules for placing, moving and
//! drinking those bottles. The command-line client in this crate is one front
//! end; a chat assistant would be another.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (list numbers, names, W1 → UUIDs)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user operation, returns CmdResult         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (lifecycle.rs, allocator.rs, layout.rs)               │
//! │  - Occupancy state machine, position choice, layout build   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait with atomic transactions                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Occupancy Invariant
//!
//! A position is occupied exactly when one active (unconsumed) wine points at
//! it, and the position records that wine. Every mutation that could break
//! this (add, consume, move, delete) goes through [`lifecycle`] and runs as a
//! single store transaction. `doctor` repairs catalogs broken by other means.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr or exits the process.
//! Outside understanding (label photos, storage descriptions, pairings) comes in
//! through the traits in [`assist`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`lifecycle`]: Add, consume, move/swap, delete
//! - [`allocator`]: Picks a default position for a new wine
//! - [`layout`]: Storage layouts and their validation
//! - [`assist`]: Contracts for the external assistant
//! - [`selector`]: User-facing wine and position references
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`StorageConfig`, `Position`, `Wine`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod allocator;
pub mod api;
pub mod assist;
pub mod commands;
pub mod config;
pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod model;
pub mod selector;
pub mod store;
