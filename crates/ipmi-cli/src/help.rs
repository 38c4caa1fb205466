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

//! Usage text. Help is looked up by command-word prefix, so `sdr` lists the
//! `sdr` subcommands and an unknown command falls back to the top level.

use std::io::{self, Write};

use libipmi::{INTERFACE_OPTIONS, Interface};

pub struct CommandHelp {
    pub name: &'static str,
    pub arguments: Option<&'static str>,
    pub help: &'static str,
}

impl CommandHelp {
    fn depth(&self) -> usize {
        self.name.split(' ').count()
    }

    fn matches(&self, words: &[&str]) -> bool {
        let segments: Vec<&str> = self.name.split(' ').collect();
        segments.starts_with(words)
    }

    fn synopsis(&self) -> String {
        match self.arguments {
            Some(arguments) => format!("{} {}", self.name, arguments),
            None => self.name.to_string(),
        }
    }
}

pub const COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "raw",
        arguments: Some("[lun <lun>] <netfn> <cmd> [data...]"),
        help: "Send a RAW IPMI request and print response",
    },
    CommandHelp {
        name: "fru",
        arguments: None,
        help: "Print built-in FRU inventory",
    },
    CommandHelp {
        name: "fru print",
        arguments: Some("[<fru-id> [all]]"),
        help: "Print FRU inventory areas",
    },
    CommandHelp {
        name: "sel",
        arguments: None,
        help: "Print System Event Log (SEL)",
    },
    CommandHelp {
        name: "sel list",
        arguments: None,
        help: "List all SEL entries",
    },
    CommandHelp {
        name: "sdr",
        arguments: None,
        help: "Print Sensor Data Repository entries and readings",
    },
    CommandHelp {
        name: "sdr list",
        arguments: None,
        help: "List all SDRs",
    },
    CommandHelp {
        name: "sdr show",
        arguments: Some("<sdr-id>"),
        help: "Show a single SDR and its reading",
    },
    CommandHelp {
        name: "bmc",
        arguments: None,
        help: "Management Controller status and global enables",
    },
    CommandHelp {
        name: "bmc info",
        arguments: None,
        help: "BMC Device ID information",
    },
    CommandHelp {
        name: "bmc reset",
        arguments: Some("<cold|warm>"),
        help: "BMC reset control",
    },
    CommandHelp {
        name: "picmg",
        arguments: None,
        help: "PICMG commands",
    },
    CommandHelp {
        name: "picmg power get",
        arguments: None,
        help: "Request the PICMG power level",
    },
    CommandHelp {
        name: "hpm",
        arguments: None,
        help: "HPM.1 commands",
    },
    CommandHelp {
        name: "hpm cap",
        arguments: None,
        help: "Request the target upgrade capabilities",
    },
    CommandHelp {
        name: "hpm check",
        arguments: Some("<file>"),
        help: "Check the specified HPM.1 file",
    },
    CommandHelp {
        name: "chassis",
        arguments: None,
        help: "Get chassis status and set power state",
    },
    CommandHelp {
        name: "chassis power",
        arguments: Some("<on|off|cycle|reset|diag|soft>"),
        help: "Set power state",
    },
];

const OPTIONS: &str = "\
Options:
  -t <addr>        Set target IPMB address
  -b <channel>     Set target channel
  -r <rtr>         Set target routing (not supported)
  -h               Show this help
  -v               Be verbose
  -V               Print version
  -I <interface>   Set interface (available: aardvark ipmitool)
  -H <host>        Set RMCP host
  -U <user>        Set RMCP user
  -P <password>    Set RMCP password (default: $IPMITOOL_PASSWORD)
  -o <options>     Set interface specific options (name=value, separated
                   by commas, see below for available options).
";

pub fn version() -> String {
    format!("carbide-ipmi v{}", env!("CARGO_PKG_VERSION"))
}

// help_entries picks the entries shown for the given command words: the
// subcommands one level down, else anything deeper, else the words
// themselves.
fn help_entries(words: &[&str]) -> Vec<&'static CommandHelp> {
    let depth = words.len();
    let select = |keep: fn(usize, usize) -> bool| {
        COMMAND_HELP
            .iter()
            .filter(|entry| keep(entry.depth(), depth) && entry.matches(words))
            .collect::<Vec<_>>()
    };

    let mut entries = select(|d, depth| d == depth + 1);
    if entries.is_empty() {
        entries = select(|d, depth| d > depth + 1);
    }
    if entries.is_empty() {
        entries = select(|d, depth| d == depth);
    }
    entries
}

/// Prints the usage for `words`, the command words given on the command
/// line. Without words, or when nothing matches them, the top-level usage
/// with the option summary is printed.
pub fn usage<S: AsRef<str>>(out: &mut dyn Write, words: &[S]) -> io::Result<()> {
    let mut words: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
    let mut entries = help_entries(&words);
    if entries.is_empty() {
        words.clear();
        entries = help_entries(&words);
    }

    if words.is_empty() {
        writeln!(out, "{}", version())?;
        writeln!(out, "usage: carbide-ipmi [options...] <command>")?;
        writeln!(out)?;
        write!(out, "{OPTIONS}")?;
        writeln!(out)?;
        interface_options(out)?;
        writeln!(out, "Commands:")?;
    }

    let width = entries
        .iter()
        .map(|entry| entry.synopsis().len())
        .max()
        .unwrap_or(0);
    for entry in entries {
        writeln!(out, "  {:<width$}   {}", entry.synopsis(), entry.help)?;
    }
    Ok(())
}

fn interface_options(out: &mut dyn Write) -> io::Result<()> {
    for interface in Interface::ALL {
        let options: Vec<(String, &str)> = INTERFACE_OPTIONS
            .iter()
            .filter(|option| option.interface == interface)
            .map(|option| (format!("{}={}", option.name, option.value), option.help))
            .collect();
        if options.is_empty() {
            continue;
        }

        let name = interface.name();
        let mut title = name[..1].to_uppercase();
        title.push_str(&name[1..]);
        writeln!(out, "{title} options:")?;

        let width = options.iter().map(|(spec, _)| spec.len()).max().unwrap_or(0);
        for (spec, help) in &options {
            writeln!(out, "  {spec:<width$}  {help}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
