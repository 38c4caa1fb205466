/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: LicenseRef-NvidiaProprietary
 *
 * NVIDIA CORPORATION, its affiliates and licensors retain all intellectual
 * property and proprietary rights in and to this material, related
 * documentation and any modifications thereto. Any use, reproduction,
 * disclosure or distribution of this material and related documentation
 * without an express license agreement from NVIDIA CORPORATION or
 * its affiliates is strictly prohibited.
 */

//! Global command-line options.

use std::env;
use std::ffi::OsStr;

use getopts::{Options, ParsingStyle};
use libipmi::ipmitool::PASSWORD_ENV;
use libipmi::{BMC_ADDRESS, ConnectionConfig};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Run,
    Help,
    Version,
}

#[derive(Debug)]
pub struct Opts {
    pub action: Action,
    pub verbose: bool,
    // words holds the command and its arguments, everything after the
    // first free argument.
    pub words: Vec<String>,
    pub config: ConnectionConfig,
    pub interface_options: Vec<(String, String)>,
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.parsing_style(ParsingStyle::StopAtFirstFree);
    opts.optopt("t", "", "Set target IPMB address", "ADDR");
    opts.optopt("b", "", "Set target channel", "CHANNEL");
    opts.optopt("r", "", "Set target routing", "RTR");
    opts.optflag("h", "", "Show this help");
    opts.optflag("v", "", "Be verbose");
    opts.optflag("V", "", "Print version");
    opts.optopt("I", "", "Set interface", "INTERFACE");
    opts.optopt("H", "", "Set RMCP host", "HOST");
    opts.optopt("U", "", "Set RMCP user", "USER");
    opts.optopt("P", "", "Set RMCP password", "PASSWORD");
    opts.optmulti("o", "", "Set interface specific options", "OPTIONS");
    opts
}

impl Opts {
    pub fn parse<S: AsRef<OsStr>>(args: &[S]) -> Result<Self, CliError> {
        let matches = options()
            .parse(args)
            .map_err(|e| CliError::Options(e.to_string()))?;

        if matches.opt_present("r") {
            return Err(CliError::Options(
                "Option -r (target routing) is not supported".to_string(),
            ));
        }

        let action = if matches.opt_present("h") {
            Action::Help
        } else if matches.opt_present("V") {
            Action::Version
        } else {
            Action::Run
        };

        let mut config = ConnectionConfig::default();
        if let Some(address) = matches.opt_str("t") {
            config.target.address = parse_int(&address).map_err(CliError::Options)?;
        }
        if let Some(channel) = matches.opt_str("b") {
            let channel = parse_int(&channel).map_err(CliError::Options)?;
            config.target.routing = vec![(BMC_ADDRESS, channel)];
        }
        if let Some(interface) = matches.opt_str("I") {
            config.interface = interface.parse().map_err(CliError::Options)?;
        }
        config.host = matches.opt_str("H");
        if let Some(user) = matches.opt_str("U") {
            config.user = user;
        }
        config.password = matches
            .opt_str("P")
            .or_else(|| env::var(PASSWORD_ENV).ok())
            .unwrap_or_default();

        let interface_options = matches
            .opt_strs("o")
            .iter()
            .flat_map(|list| list.split(','))
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.split_once('=')
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .ok_or_else(|| {
                        CliError::Options(format!(
                            "Interface option '{item}' is not of the form name=value"
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            action,
            verbose: matches.opt_present("v"),
            words: matches.free,
            config,
            interface_options,
        })
    }

    /// Applies the `-o` options to the connection configuration. Names the
    /// selected interface does not know are logged and skipped.
    pub fn connection_config(&self) -> Result<ConnectionConfig, CliError> {
        let mut config = self.config.clone();
        for (name, value) in &self.interface_options {
            let known = config
                .apply_interface_option(name, value)
                .map_err(|e| CliError::Options(e.to_string()))?;
            if !known {
                tracing::warn!("unknown option {name}");
            }
        }
        Ok(config)
    }
}

/// Parses an integer literal the way the command line accepts numbers:
/// decimal, or hexadecimal, octal and binary with a `0x`, `0o` or `0b`
/// prefix.
pub fn parse_int<T: TryFrom<u64>>(literal: &str) -> Result<T, String> {
    let (digits, radix) = match literal.get(..2) {
        Some("0x" | "0X") => (&literal[2..], 16),
        Some("0o" | "0O") => (&literal[2..], 8),
        Some("0b" | "0B") => (&literal[2..], 2),
        _ => (literal, 10),
    };
    let value = u64::from_str_radix(digits, radix)
        .map_err(|_| format!("Invalid integer literal '{literal}'"))?;
    T::try_from(value).map_err(|_| format!("Value {literal} is out of range"))
}
