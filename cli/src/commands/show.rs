// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Show Command
//!
//! Renders the saved knock configuration without touching the network.
//! Primarily a sanity check before running a knock from the store: what
//! host is on file, which rows are blank, where the data file lives.

use knokk_common::info;
use knokk_common::models::config::KnockConfig;
use knokk_core::store::ConfigStore;

use crate::terminal::print::Print;

pub fn show() -> anyhow::Result<()> {
    Print::header("saved configuration");

    let store: ConfigStore = ConfigStore::open_default()?;
    let config: KnockConfig = store.load()?;

    info!("Data file: {}", store.file_path().display());
    Print::stored_config(&config);

    Ok(())
}
