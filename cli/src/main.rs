// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Knokk CLI Entry Point
//!
//! The binary entry point for Knokk.
//!
//! This module is responsible for bootstrapping the application runtime and managing the
//! global lifecycle of the process. It isolates the command-line interface layer from the
//! core library logic.
//!
//! ## Responsibilities
//!
//! 1.  **Runtime Initialization**: The `#[tokio::main]` attribute initializes the asynchronous
//!     runtime so knock sequences can run off the main task.
//! 2.  **Global State Setup**: Initializes the `tracing` subscriber for logging and configures
//!     terminal output modes (verbosity, quiet mode, banners).
//! 3.  **Configuration Mapping**: Converts raw command-line arguments (parsed via `clap`) into
//!     the internal `Config` struct used by the core libraries.
//! 4.  **Command Dispatch**: Routes execution to the appropriate module in `commands/`.
//! 5.  **Error Boundary**: Acts as the top-level error handler. Any errors propagated up from
//!     subcommands are caught here, logged to the error stream, and converted into a
//!     non-zero `ExitCode`.

mod commands;
mod terminal;

use std::process::ExitCode;

use knokk_common::{config::Config, error};

use crate::{
    commands::{CommandLine, Commands, knock, show},
    terminal::{logging, print::Print},
};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    logging::init_logging(commands.verbosity);

    let cfg = Config::from(&commands);

    let _ = Print::init(&cfg);
    Print::banner();

    let result = match &commands.command {
        Commands::Knock { host, ports } => knock::knock(host.as_deref(), ports).await,
        Commands::Show => show::show(),
    };

    let exit_code = match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e}");
            ExitCode::FAILURE
        }
    };

    Print::end_of_program();

    exit_code
}
