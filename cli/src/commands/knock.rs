// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Knock Command
//!
//! Glue between the parsed CLI input and the core sequencer. The flow
//! mirrors what a user expects from a knock tool: figure out the target
//! (arguments first, saved configuration as the fallback), refuse
//! nonsense before touching the network, then fire the sequence on a
//! worker task and persist whatever was knocked for next time.

use anyhow::{anyhow, bail};

use knokk_common::models::config::KnockConfig;
use knokk_common::models::outcome::KnockOutcome;
use knokk_common::{error, info, validate, warn};
use knokk_core::sequencer;
use knokk_core::store::ConfigStore;

use crate::terminal::print::Print;

pub async fn knock(host: Option<&str>, ports: &[String]) -> anyhow::Result<()> {
    Print::header("performing port knock");

    let store: ConfigStore = ConfigStore::open_default()?;
    let (config, from_store): (KnockConfig, bool) = resolve_input(host, ports, &store)?;

    let outcome: KnockOutcome = run_knock(&store, config, from_store).await?;
    Print::outcome(&outcome);
    Ok(())
}

/// Runs one knock against an already resolved target.
///
/// Validation happens up front with no disk or network I/O; a target
/// that never fires leaves the store untouched. Once the sequence does
/// fire, the configuration is saved whether or not the pattern
/// completed.
async fn run_knock(
    store: &ConfigStore,
    config: KnockConfig,
    from_store: bool,
) -> anyhow::Result<KnockOutcome> {
    if !validate::is_valid_host(&config.host) {
        return Ok(KnockOutcome::InvalidHost);
    }

    let (knock_ports, dropped) = config.knockable_ports();
    if from_store && dropped > 0 {
        let label = if dropped == 1 { "entry" } else { "entries" };
        warn!("Ignoring {dropped} stored {label} with no usable port");
    }
    if knock_ports.is_empty() {
        return Ok(KnockOutcome::NoPorts);
    }

    info!("Knocking {} port(s) on {}", knock_ports.len(), config.host);

    // Sequence and save run on their own task; the caller is never
    // parked on the cumulative timeouts.
    let store: ConfigStore = store.clone();
    let worker = tokio::spawn(async move {
        let outcome: KnockOutcome = sequencer::knock(&config.host, &knock_ports).await;
        let save_result = store.save(&config);
        (outcome, save_result)
    });

    let (outcome, save_result) = worker
        .await
        .map_err(|e| anyhow!("knock worker panicked: {e}"))?;

    if let Err(e) = save_result {
        error!("Failed to persist the configuration: {e}");
    }

    Ok(outcome)
}

/// Ports given on the command line are validated strictly; a typo should
/// stop the run, not silently knock a different pattern. Stored entries
/// are the caller's own history and get filtered later instead.
fn resolve_input(
    host: Option<&str>,
    ports: &[String],
    store: &ConfigStore,
) -> anyhow::Result<(KnockConfig, bool)> {
    match host {
        Some(host) => {
            for port in ports {
                if !validate::is_valid_port_text(port) {
                    bail!("'{port}' is not a valid port (expected 1-65535)");
                }
            }
            Ok((KnockConfig::new(host, ports.to_vec()), false))
        }
        None => {
            let config: KnockConfig = store.load()?;
            info!("Loaded {}", store.file_path().display());
            Ok((config, true))
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
    use tempfile::tempdir;
    use tokio::net::TcpListener;

    /// A port that was bound once and released, so connecting to it gets
    /// an immediate refusal instead of a timeout.
    async fn refused_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        port
    }

    #[tokio::test]
    async fn invalid_hosts_short_circuit_without_saving() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let config = KnockConfig::new("not a host!", vec!["7000".to_string()]);

        let outcome = run_knock(&store, config, false).await.unwrap();

        assert_eq!(outcome, KnockOutcome::InvalidHost);
        assert!(!store.file_path().exists());
    }

    #[tokio::test]
    async fn empty_sequences_short_circuit_without_saving() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let config = KnockConfig::new("192.168.1.1", vec![String::new()]);

        let outcome = run_knock(&store, config, true).await.unwrap();

        assert_eq!(outcome, KnockOutcome::NoPorts);
        assert!(!store.file_path().exists());
    }

    #[tokio::test]
    async fn failed_sequences_still_save_the_configuration() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let config = KnockConfig::new("127.0.0.1", vec![refused_port().await.to_string()]);

        let outcome = run_knock(&store, config.clone(), false).await.unwrap();

        assert!(
            matches!(outcome, KnockOutcome::Failure(_)),
            "A refused port must abort the sequence, got {outcome:?}"
        );
        assert_eq!(store.load().unwrap(), config);
    }

    #[tokio::test]
    async fn successful_sequences_save_the_configuration() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let config = KnockConfig::new("127.0.0.1", vec![port.to_string()]);

        let outcome = run_knock(&store, config.clone(), false).await.unwrap();

        assert_eq!(outcome, KnockOutcome::Success);
        assert_eq!(store.load().unwrap(), config);
    }

    #[tokio::test]
    async fn command_line_ports_are_validated_strictly() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());

        let result = resolve_input(Some("example.com"), &["70a".to_string()], &store);

        assert!(result.is_err());
    }
}
