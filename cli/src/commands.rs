// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! This module defines the strict schema for user input.
//!
//! It serves as the single source of truth for the application's command-line interface.
//! While the *execution* logic for each command resides in its own submodule (e.g., `knock.rs`),
//! the *definition* of the arguments, flags, and help text is centralized here.
//!
//! ## Architectural Role
//!
//! This module performs two key architectural functions:
//!
//! 1.  **Input Normalization**: It uses `clap` to validate user inputs, making sure that necessary
//!     arguments are present and types are correct before the application attempts to run.
//! 2.  **State Translation**: via the `From<&CommandLine> for Config` implementation, it
//!     decouples the external interface (CLI flags) from the internal application state (`Config`).
//!     This allows the core libraries to remain agnostic of the user interface layer.
//!
//! ## Structure
//!
//! The CLI is structured hierarchically:
//!
//! * [`CommandLine`]: The top-level struct containing global flags applicable to the entire process
//!   (logging, formatting, verbosity).
//! * [`Commands`]: An enum representing the specific operation mode.

pub mod knock;
pub mod show;

use clap::{ArgAction, Parser, Subcommand};
use knokk_common::config::Config;

#[derive(Parser)]
#[command(name = "knokk")]
#[command(about = "Sequential TCP port knocker with a persistent target profile.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep logs and colors but hide the banner line
    #[arg(long = "no-banner", global = true)]
    pub no_banner: bool,

    /// Reduce UI visual density (-q: no frames, -qq: bare outcome lines)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Increase logging detail (-v: per-knock logs)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fire the knock sequence at a host
    #[command(alias = "k")]
    Knock {
        /// Target host; omit to knock the saved configuration
        #[arg(value_name = "HOST")]
        host: Option<String>,

        /// Ports to knock, in order
        #[arg(value_name = "PORTS", num_args(0..))]
        ports: Vec<String>,
    },

    /// Display the saved knock configuration
    #[command(alias = "s")]
    Show,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
        }
    }
}
