// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

/// Presentation options for a single invocation.
///
/// This is runtime state mapped from CLI flags, not the persisted knock
/// configuration (see [`crate::models::config::KnockConfig`] for that).
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips the startup banner line while keeping logs and colors.
    pub no_banner: bool,

    /// Controls the visual density of the terminal output.
    ///
    /// Mapped from the `-q`/`--quiet` CLI flag.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, colors and framed headers.
    /// * **1**: Reduced styling, no headers.
    /// * **2**: Raw mode. Output is strictly data, suitable for piping.
    pub quiet: u8,
}
