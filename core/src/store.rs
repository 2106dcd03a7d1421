// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Configuration Store
//!
//! Persists the [`KnockConfig`] as a single JSON file in the per-user
//! application data directory. A store that has never been written reads
//! back as the first-run default instead of an error; everything else
//! surfaces as a [`StoreError`] so callers can decide how loud to be.

use std::io;
use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use knokk_common::models::config::KnockConfig;

/// File name of the persisted configuration, kept stable across versions
/// so existing installations keep their data.
pub const DATA_FILE_NAME: &str = "port_knocking_data.json";

/// Environment override for the data directory. Mainly for tests and
/// portable installs.
pub const DATA_DIR_ENV: &str = "KNOKK_DATA_DIR";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No usable data directory: {0} is not set")]
    NoDataDir(&'static str),

    #[error("Failed to create {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Malformed configuration in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Handle on the directory holding the knock data file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    data_dir: PathBuf,
}

impl ConfigStore {
    /// A store rooted at an explicit directory. The directory does not
    /// have to exist yet; it is created on the first save.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        ConfigStore {
            data_dir: data_dir.into(),
        }
    }

    /// The store at the platform's per-user application data root.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(ConfigStore::new(default_data_dir()?))
    }

    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE_NAME)
    }

    /// Reads the persisted configuration. A missing file is the first
    /// run and yields [`KnockConfig::default`]; a file that exists but
    /// does not parse is an error, never silently replaced.
    pub fn load(&self) -> Result<KnockConfig, StoreError> {
        let path: PathBuf = self.file_path();
        let raw: String = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(KnockConfig::default());
            }
            Err(e) => return Err(StoreError::Read { path, source: e }),
        };
        serde_json::from_str(&raw).map_err(|e| StoreError::Json { path, source: e })
    }

    /// Writes the configuration, creating the data directory on demand.
    pub fn save(&self, config: &KnockConfig) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::CreateDir {
            path: self.data_dir.clone(),
            source: e,
        })?;

        let path: PathBuf = self.file_path();
        let json: String = serde_json::to_string(config).map_err(|e| StoreError::Json {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, json).map_err(|e| StoreError::Write { path, source: e })
    }
}

/// Resolution order: the [`DATA_DIR_ENV`] override, then the platform
/// convention (`%APPDATA%\knokk` on Windows, `$HOME/.config/knokk`
/// everywhere else).
fn default_data_dir() -> Result<PathBuf, StoreError> {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    #[cfg(windows)]
    return match env::var("APPDATA") {
        Ok(appdata) => Ok(PathBuf::from(appdata).join("knokk")),
        Err(_) => Err(StoreError::NoDataDir("APPDATA")),
    };

    #[cfg(not(windows))]
    return match env::var("HOME") {
        Ok(home) => Ok(PathBuf::from(home).join(".config").join("knokk")),
        Err(_) => Err(StoreError::NoDataDir("HOME")),
    };
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
