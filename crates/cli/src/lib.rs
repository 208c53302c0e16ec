//! Anchor CLI library: argument parsing, logging setup and command handlers

pub mod args;
pub mod commands;
pub mod logging;
