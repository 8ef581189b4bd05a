//! CLI module for toolhub - command-line interface and subcommands.
//!
//! With no subcommand the interactive TUI starts; `list`, `run` and
//! `widgets` are one-shot commands that print to stdout.

pub mod commands;

pub use commands::Cli;
