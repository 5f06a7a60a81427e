//! # CLI Layer
//!
//! This module is **one possible UI client** for council, not the application
//! itself. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a tracing subscriber
//! - Handles argument parsing
//! - Prompts the operator
//! - Formats output for human consumption
//!
//! One process is one admin session seeded from fixtures. `council shell`
//! keeps a session open for as many actions as the operator likes.
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` and the per-command handlers
//! - `render`: text output (tables, records, dashboard)
//! - `prompt`: dialoguer-backed confirmations
//! - `shell`: the interactive menu session
//! - `styles`: console styles

mod commands;
mod prompt;
mod render;
mod setup;
mod shell;
mod styles;

pub use commands::run;
