// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Knock Outcome
//!
//! The four ways a knock run can end. Note that an unreachable or absent
//! daemon still counts as [`KnockOutcome::Success`]: every attempt either
//! connected or timed out, which is all a fire-and-forget knock can know.

use std::fmt;

/// Terminal state of a single knock run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnockOutcome {
    /// Every port in the sequence was attempted.
    Success,
    /// The configured host failed syntactic validation; nothing was sent.
    InvalidHost,
    /// No usable ports were configured; nothing was sent.
    NoPorts,
    /// An attempt failed with something other than a timeout and the
    /// sequence was abandoned mid-way.
    Failure(String),
}

impl KnockOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, KnockOutcome::Success)
    }
}

impl fmt::Display for KnockOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnockOutcome::Success => write!(f, "port knocking successful"),
            KnockOutcome::InvalidHost => write!(f, "invalid host"),
            KnockOutcome::NoPorts => write!(f, "no ports added"),
            KnockOutcome::Failure(reason) => write!(f, "port knocking failed: {reason}"),
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
    fn only_success_is_success() {
        assert!(KnockOutcome::Success.is_success());
        assert!(!KnockOutcome::InvalidHost.is_success());
        assert!(!KnockOutcome::NoPorts.is_success());
        assert!(!KnockOutcome::Failure("connection refused".to_string()).is_success());
    }

    #[test]
    fn failure_reason_is_displayed() {
        let outcome = KnockOutcome::Failure("connection refused".to_string());
        assert_eq!(outcome.to_string(), "port knocking failed: connection refused");
    }

    #[test]
    fn quiet_labels_are_lowercase_one_liners() {
        assert_eq!(KnockOutcome::Success.to_string(), "port knocking successful");
        assert_eq!(KnockOutcome::InvalidHost.to_string(), "invalid host");
        assert_eq!(KnockOutcome::NoPorts.to_string(), "no ports added");
    }
}
