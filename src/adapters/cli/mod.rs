//! CLI Adapter
//!
//! Command-line interface for the wallet-scout discovery tool.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{
    CliApp, Command, DiscoverCmd, HoldersCmd, NewTokensCmd, PnlCmd, ProfitabilityCmd, TokenCmd,
};
