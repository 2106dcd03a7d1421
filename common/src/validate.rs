// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Input Validation
//!
//! Pure predicates over the raw text a user can type: target hosts and
//! port numbers. Nothing here resolves names or touches a socket; a "valid"
//! host is one that *could* name a machine, syntactically.

use std::net::IpAddr;

/// Longest domain name the wire format allows.
const MAX_DOMAIN_LEN: usize = 253;
/// Longest single label between dots.
const MAX_LABEL_LEN: usize = 63;

/// Returns `true` iff `s` is an IPv4 literal, an IPv6 literal, or a
/// syntactically valid domain name. The empty string is invalid.
pub fn is_valid_host(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if s.parse::<IpAddr>().is_ok() {
        return true;
    }
    is_domain_name(s)
}

/// Returns `true` if `s` is empty or parses to an integer in 1..=65535.
///
/// Empty text is deliberately valid: the same predicate gates live typing
/// in an entry row, where a cleared row must stay acceptable. Callers
/// validating a final submission have to reject empty rows themselves
/// (usually by discarding them, see
/// [`KnockConfig::knockable_ports`](crate::models::config::KnockConfig::knockable_ports)).
pub fn is_valid_port_text(s: &str) -> bool {
    s.is_empty() || port_from_text(s).is_some()
}

/// Coerces port text to a number, `None` for anything outside 1..=65535
/// or not a number at all.
pub fn port_from_text(s: &str) -> Option<u16> {
    match s.parse::<u16>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

/// Textual domain-name grammar: dot-separated labels of ASCII letters,
/// digits and interior hyphens, two labels minimum. The final label must
/// not be purely numeric, otherwise every malformed IPv4 literal like
/// `999.999.999.999` would sneak through as a "domain".
fn is_domain_name(s: &str) -> bool {
    if s.len() > MAX_DOMAIN_LEN {
        return false;
    }

    let labels: Vec<&str> = s.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    if !labels.iter().all(|label| is_label(label)) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    !tld.bytes().all(|b| b.is_ascii_digit())
}

fn is_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
