// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Knock Configuration
//!
//! The persisted unit of state: one target host plus an ordered list of
//! port entries, kept as the raw text the user supplied. Ports stay
//! strings on purpose. Blank rows are legal placeholders and must survive
//! a save/load cycle byte for byte, so coercion to numbers happens as
//! late as possible via [`KnockConfig::knockable_ports`].

use serde::{Deserialize, Serialize};

use crate::validate;

/// A knock target and its ordered port sequence, exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockConfig {
    pub host: String,
    pub ports: Vec<String>,
}

impl KnockConfig {
    pub fn new(host: impl Into<String>, ports: Vec<String>) -> Self {
        KnockConfig { host: host.into(), ports }
    }

    /// Ports that will actually be knocked, in stored order.
    ///
    /// Blank entries are placeholders and get skipped. Entries that fail
    /// to coerce are skipped as well rather than aborting the run; the
    /// second element of the pair reports how many such entries were
    /// dropped so callers can surface a warning.
    pub fn knockable_ports(&self) -> (Vec<u16>, usize) {
        let mut ports: Vec<u16> = Vec::with_capacity(self.ports.len());
        let mut dropped: usize = 0;
        for entry in &self.ports {
            if entry.is_empty() {
                continue;
            }
            match validate::port_from_text(entry) {
                Some(port) => ports.push(port),
                None => dropped += 1,
            }
        }
        (ports, dropped)
    }
}

impl Default for KnockConfig {
    /// The first-run shape: no host, one blank port row.
    fn default() -> Self {
        KnockConfig {
            host: String::new(),
            ports: vec![String::new()],
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_blank_row() {
        let config = KnockConfig::default();
        assert_eq!(config.host, "");
        assert_eq!(config.ports, vec![String::new()]);
    }

    #[test]
    fn knockable_ports_preserves_order() {
        let config = KnockConfig::new("example.com", vec![
            "7000".to_string(),
            "8000".to_string(),
            "9000".to_string(),
        ]);
        let (ports, dropped) = config.knockable_ports();
        assert_eq!(ports, vec![7000, 8000, 9000]);
        assert_eq!(dropped, 0);
    }

    #[test]
    fn blank_rows_are_skipped_silently() {
        let config = KnockConfig::new("example.com", vec![
            "".to_string(),
            "22".to_string(),
            "".to_string(),
        ]);
        let (ports, dropped) = config.knockable_ports();
        assert_eq!(ports, vec![22]);
        assert_eq!(dropped, 0);
    }

    #[test]
    fn garbage_rows_are_counted_as_dropped() {
        let config = KnockConfig::new("example.com", vec![
            "7000".to_string(),
            "banana".to_string(),
            "0".to_string(),
            "9000".to_string(),
        ]);
        let (ports, dropped) = config.knockable_ports();
        assert_eq!(ports, vec![7000, 9000]);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn duplicate_ports_are_kept() {
        let config = KnockConfig::new("example.com", vec![
            "1000".to_string(),
            "1000".to_string(),
        ]);
        let (ports, _) = config.knockable_ports();
        assert_eq!(ports, vec![1000, 1000]);
    }

    #[test]
    fn serializes_with_host_before_ports() {
        let config = KnockConfig::new("192.168.1.1", vec![
            "1".to_string(),
            "2".to_string(),
            "3".to_string(),
        ]);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"host":"192.168.1.1","ports":["1","2","3"]}"#);
    }

    #[test]
    fn round_trips_blank_rows() {
        let config = KnockConfig::new("example.com", vec![
            "7000".to_string(),
            "".to_string(),
        ]);
        let json = serde_json::to_string(&config).unwrap();
        let restored: KnockConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
