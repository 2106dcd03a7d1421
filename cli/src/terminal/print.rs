// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::sync::OnceLock;

use anyhow::bail;
use colored::*;
use unicode_width::UnicodeWidthStr;

use knokk_common::config::Config;
use knokk_common::models::config::KnockConfig;
use knokk_common::models::outcome::KnockOutcome;
use knokk_common::{error, success};

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

static PRINT: OnceLock<Print> = OnceLock::new();

type Detail = (String, ColoredString);

#[macro_export]
macro_rules! kprint {
    () => {
        $crate::kprint!("");
    };
    ($($arg:tt)*) => {{
        tracing::info!(
            target: "knokk::print",
            raw_msg = %format_args!($($arg)*)
        );
    }};
}

pub struct Print {
    no_banner: bool,
    q_level: u8,
}

impl Print {
    fn new(cfg: &Config) -> Self {
        Self {
            no_banner: cfg.no_banner,
            q_level: cfg.quiet,
        }
    }

    pub fn init(cfg: &Config) -> anyhow::Result<()> {
        let term = Self::new(cfg);
        if PRINT.set(term).is_err() {
            bail!("terminal has already been initialized")
        }
        Ok(())
    }

    fn get() -> &'static Self {
        PRINT.get().expect("terminal has not been initialized")
    }

    pub fn banner() {
        let p = Self::get();
        if p.no_banner || p.q_level > 0 {
            return;
        }

        let text_content: String = format!("⟦ KNOKK v{} ⟧ ", env!("CARGO_PKG_VERSION"));
        let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
        let text: ColoredString = text_content.bright_green().bold();
        let sep: ColoredString = "═"
            .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
            .bright_black();
        let output: String = format!("{}{}{}", sep, text, sep);

        kprint!("{}", output);
    }

    pub fn header(msg: &str) {
        let p = Self::get();
        if p.q_level > 0 {
            kprint!();
            return;
        }

        let formatted: String = format!("⟦ {} ⟧", msg);
        let msg_len: usize = formatted.chars().count();

        let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
        let left: usize = dash_count / 2;
        let right: usize = dash_count - left;

        let line: ColoredString = format!(
            "{}{}{}",
            "─".repeat(left),
            formatted.to_uppercase().bright_green(),
            "─".repeat(right)
        )
        .bright_black();

        kprint!("{}", line);
    }

    /// Renders the end state of a knock run. At `-q` the framed block
    /// collapses to a log line; at `-qq` to a single plain line, stable
    /// enough to grep in scripts.
    pub fn outcome(outcome: &KnockOutcome) {
        let p = Self::get();
        match p.q_level {
            0 => {
                let line: ColoredString = match outcome {
                    KnockOutcome::Success => "✓ Port Knocking Successful".green().bold(),
                    KnockOutcome::InvalidHost => "✗ Invalid Host".red().bold(),
                    KnockOutcome::NoPorts => "✗ No ports added".red().bold(),
                    KnockOutcome::Failure(_) => "✗ Port Knocking Failed".red().bold(),
                };

                divider();
                centerln(&line);

                if let KnockOutcome::Failure(reason) = outcome {
                    centerln(&reason.as_str().italic().color(colors::TEXT_DEFAULT));
                }
            }
            1 => {
                if outcome.is_success() {
                    success!("{outcome}");
                } else {
                    error!("{outcome}");
                }
            }
            _ => kprint!("{}", outcome),
        }
    }

    /// The saved host and port rows as a tree, blank rows included so the
    /// on-disk shape stays visible.
    pub fn stored_config(config: &KnockConfig) {
        let p = Self::get();
        if p.q_level >= 2 {
            kprint!("{}", config.host);
            for port in &config.ports {
                kprint!("{}", port);
            }
            return;
        }

        let host_value: ColoredString = if config.host.is_empty() {
            "(unset)".italic().color(colors::SEPARATOR)
        } else {
            config.host.as_str().color(colors::PRIMARY)
        };

        let mut details: Vec<Detail> = vec![("Host".to_string(), host_value)];
        for (idx, port) in config.ports.iter().enumerate() {
            let value: ColoredString = if port.is_empty() {
                "(blank)".italic().color(colors::SEPARATOR)
            } else {
                port.as_str().color(colors::SECONDARY)
            };
            details.push((format!("Port {}", idx + 1), value));
        }

        as_tree(details);
    }

    pub fn end_of_program() {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }
        kprint!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR));
    }
}

pub fn divider() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    kprint!("{}", sep);
}

pub fn centerln(msg: &ColoredString) {
    let width: usize = console::measure_text_width(&msg.to_string());
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    kprint!("{}{}", space, msg);
}

pub fn as_tree(details: Vec<Detail>) {
    let padding_width: usize = details.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    for (i, (key, value)) in details.iter().enumerate() {
        let last: bool = i + 1 == details.len();
        let branch: ColoredString = if !last { "├─" } else { "└─" }.bright_black();

        let dots_count: usize = padding_width.saturating_sub(key.len());
        let dots: ColoredString = ".".repeat(dots_count).color(colors::SEPARATOR);

        kprint!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots,
            ":".color(colors::SEPARATOR),
            value
        );
    }
}
