// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::net::SocketAddr;

use knokk_common::models::config::KnockConfig;
use knokk_common::models::outcome::KnockOutcome;
use knokk_core::sequencer;
use knokk_core::store::ConfigStore;
use tempfile::tempdir;
use tokio::net::TcpListener;

/// A listener that stays alive for the duration of a test, so knocks on
/// its port complete the handshake instead of being refused.
async fn open_port() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind a loopback listener");
    let addr: SocketAddr = listener.local_addr().expect("listener has no address");
    (listener, addr.port())
}

/// A port that was bound once and released, so connecting to it gets an
/// immediate refusal from the OS.
async fn closed_port() -> u16 {
    let (listener, port) = open_port().await;
    drop(listener);
    port
}

#[tokio::test]
async fn test_knock_open_port_succeeds() {
    let (_listener, port) = open_port().await;

    let outcome = sequencer::knock("127.0.0.1", &[port]).await;

    assert_eq!(
        outcome,
        KnockOutcome::Success,
        "A completed handshake must count as a delivered knock"
    );
}

#[tokio::test]
async fn test_knock_sequence_of_open_ports_succeeds() {
    let (_a, port_a) = open_port().await;
    let (_b, port_b) = open_port().await;
    let (_c, port_c) = open_port().await;

    let outcome = sequencer::knock("127.0.0.1", &[port_a, port_b, port_c]).await;

    assert_eq!(outcome, KnockOutcome::Success);
}

#[tokio::test]
async fn test_knock_refused_port_fails() {
    let port = closed_port().await;

    let outcome = sequencer::knock("127.0.0.1", &[port]).await;

    assert!(
        matches!(outcome, KnockOutcome::Failure(_)),
        "A refused connection must abort the sequence, got {outcome:?}"
    );
}

#[tokio::test]
async fn test_knock_aborts_midway_on_refusal() {
    let (_open, open) = open_port().await;
    let closed = closed_port().await;

    let outcome = sequencer::knock("127.0.0.1", &[open, closed, open]).await;

    assert!(
        matches!(outcome, KnockOutcome::Failure(_)),
        "The refusal on the second port must poison the whole run"
    );
}

#[tokio::test]
async fn test_store_round_trips_across_instances() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let config = KnockConfig::new("example.com", vec![
        "7000".to_string(),
        "".to_string(),
        "9000".to_string(),
    ]);

    ConfigStore::new(dir.path()).save(&config)?;
    let restored = ConfigStore::new(dir.path()).load()?;

    assert_eq!(restored, config, "A fresh handle must see the saved state");
    Ok(())
}

#[tokio::test]
async fn test_fresh_store_yields_first_run_default() -> anyhow::Result<()> {
    let dir = tempdir()?;

    let config = ConfigStore::new(dir.path()).load()?;

    assert_eq!(config.host, "");
    assert_eq!(config.ports, vec![String::new()]);
    Ok(())
}

#[tokio::test]
async fn test_knock_then_persist_flow() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let store = ConfigStore::new(dir.path());
    let (_listener, port) = open_port().await;
    let config = KnockConfig::new("127.0.0.1", vec![port.to_string()]);

    let (ports, dropped) = config.knockable_ports();
    assert_eq!(dropped, 0);

    let outcome = sequencer::knock(&config.host, &ports).await;
    store.save(&config)?;

    assert_eq!(outcome, KnockOutcome::Success);
    let restored = ConfigStore::new(dir.path()).load()?;
    assert_eq!(
        restored.ports,
        vec![port.to_string()],
        "The knocked sequence must be on disk for the next run"
    );
    Ok(())
}
