// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Knock Sequencer
//!
//! Fires the configured ports at the target strictly in order, one TCP
//! connection attempt per port. A knock daemon on the other side never
//! answers, so each attempt is expected to time out; the sequencer treats
//! that timeout as a delivered knock and moves on. Any error the OS
//! reports *before* the window closes (refused, unreachable, no route)
//! means the knock pattern is broken and the whole sequence aborts.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{TcpStream, lookup_host};
use tokio::time::timeout;

use knokk_common::models::outcome::KnockOutcome;
use knokk_common::{debug, error};

/// How long a single attempt waits for the handshake. Deliberately far
/// below any realistic RTT: the point of a knock is the SYN leaving the
/// machine, not the connection completing.
pub const KNOCK_TIMEOUT: Duration = Duration::from_millis(10);

/// What happened to one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// The handshake completed inside the window.
    Connected,
    /// The window elapsed without an answer. The expected case when the
    /// far end silently drops the SYN.
    TimedOut,
    /// The OS reported an error before the window closed.
    Failed(String),
}

/// Whether the sequence moves on after an attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Abort(String),
}

/// The knock policy: timeouts and completed connections both count as
/// delivered knocks, everything else poisons the sequence.
pub fn continue_on_timeout(attempt: Attempt) -> Verdict {
    match attempt {
        Attempt::Connected | Attempt::TimedOut => Verdict::Continue,
        Attempt::Failed(reason) => Verdict::Abort(reason),
    }
}

/// A single connection attempt against a resolved address.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn attempt(&self, addr: SocketAddr) -> Attempt;
}

/// The production connector: a TCP connect raced against [`KNOCK_TIMEOUT`].
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    async fn attempt(&self, addr: SocketAddr) -> Attempt {
        match timeout(KNOCK_TIMEOUT, TcpStream::connect(addr)).await {
            Ok(Ok(_stream)) => Attempt::Connected,
            Ok(Err(e)) => Attempt::Failed(e.to_string()),
            Err(_elapsed) => Attempt::TimedOut,
        }
    }
}

/// Drives a knock sequence, strictly sequential and in the given order.
pub struct KnockSequencer<C: Connector> {
    connector: C,
}

impl<C: Connector> KnockSequencer<C> {
    pub fn new(connector: C) -> Self {
        KnockSequencer { connector }
    }

    /// Attempts every port in `ports` against `addr`, in order, one at a
    /// time. Returns after the last port, or at the first attempt the
    /// policy refuses to continue past.
    pub async fn run(&self, addr: IpAddr, ports: &[u16]) -> KnockOutcome {
        for port in ports {
            let target: SocketAddr = SocketAddr::new(addr, *port);
            debug!(verbosity = 1, "Knocking on {target}");
            match continue_on_timeout(self.connector.attempt(target).await) {
                Verdict::Continue => {}
                Verdict::Abort(reason) => {
                    error!(verbosity = 1, "Sequence aborted at {target}: {reason}");
                    return KnockOutcome::Failure(reason);
                }
            }
        }
        KnockOutcome::Success
    }
}

/// Resolves `host` once, then runs the full sequence against the first
/// address it yields. A resolution failure reads the same as any other
/// non-timeout error: the pattern was never delivered.
pub async fn knock(host: &str, ports: &[u16]) -> KnockOutcome {
    let addr: IpAddr = match resolve(host).await {
        Ok(addr) => addr,
        Err(reason) => return KnockOutcome::Failure(reason),
    };
    KnockSequencer::new(TcpConnector).run(addr, ports).await
}

/// Resolution happens up front, never inside the per-port window. A DNS
/// round trip for a domain target would eat the entire window and turn
/// every knock into a false timeout.
async fn resolve(host: &str) -> Result<IpAddr, String> {
    // The port is a placeholder; only the host part matters here.
    match lookup_host((host, 0u16)).await {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => Ok(addr.ip()),
            None => Err(format!("{host} did not resolve to any address")),
        },
        Err(e) => Err(e.to_string()),
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
