//! bidipath CLI library.
//!
//! Subcommand handlers, output formatting, and logging setup for the
//! `bidipath` binary.

pub mod commands;
pub mod logging;
pub mod output;
