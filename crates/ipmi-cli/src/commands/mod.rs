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

//! The command table and dispatch. A command is named by one or more words
//! (`chassis power on`); whatever follows the name is passed to its handler.

mod bmc;
mod chassis;
mod fru;
mod hpm;
mod picmg;
mod raw;
mod sdr;
mod sel;

use std::io::Write;

use libipmi::Ipmi;
use libipmi::types::ChassisControl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    BmcInfo,
    BmcColdReset,
    BmcWarmReset,
    SelList,
    SdrList,
    SdrShow,
    FruPrint,
    PicmgPowerGet,
    Raw,
    HpmCapabilities,
    HpmCheck,
    ChassisPower(ChassisControl),
}

pub const COMMANDS: &[(&str, Command)] = &[
    ("bmc info", Command::BmcInfo),
    ("bmc reset cold", Command::BmcColdReset),
    ("bmc reset warm", Command::BmcWarmReset),
    ("sel list", Command::SelList),
    ("sdr list", Command::SdrList),
    ("sdr show", Command::SdrShow),
    ("fru print", Command::FruPrint),
    ("picmg power get", Command::PicmgPowerGet),
    ("raw", Command::Raw),
    ("hpm cap", Command::HpmCapabilities),
    ("hpm check", Command::HpmCheck),
    (
        "chassis power off",
        Command::ChassisPower(ChassisControl::PowerDown),
    ),
    (
        "chassis power on",
        Command::ChassisPower(ChassisControl::PowerUp),
    ),
    (
        "chassis power cycle",
        Command::ChassisPower(ChassisControl::PowerCycle),
    ),
    (
        "chassis power reset",
        Command::ChassisPower(ChassisControl::HardReset),
    ),
    (
        "chassis power diag",
        Command::ChassisPower(ChassisControl::DiagnosticInterrupt),
    ),
    (
        "chassis power soft",
        Command::ChassisPower(ChassisControl::SoftShutdown),
    ),
];

// Invocation is a command found in the table together with the words left
// over for its handler.
#[derive(Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: &'static str,
    pub command: Command,
    pub args: &'a [String],
}

/// Looks the command words up in [`COMMANDS`], longest prefix first.
pub fn resolve(words: &[String]) -> Option<Invocation<'_>> {
    (1..=words.len()).rev().find_map(|n| {
        let candidate = words[..n].join(" ");
        COMMANDS
            .iter()
            .find(|(name, _)| *name == candidate)
            .map(|&(name, command)| Invocation {
                name,
                command,
                args: &words[n..],
            })
    })
}

pub async fn run(
    ipmi: &dyn Ipmi,
    command: Command,
    args: &[String],
    out: &mut dyn Write,
) -> eyre::Result<()> {
    tracing::debug!(?command, ?args, "running command");
    match command {
        Command::BmcInfo => bmc::info(ipmi, out).await,
        Command::BmcColdReset => bmc::cold_reset(ipmi).await,
        Command::BmcWarmReset => bmc::warm_reset(ipmi).await,
        Command::SelList => sel::list(ipmi, out).await,
        Command::SdrList => sdr::list(ipmi, out).await,
        Command::SdrShow => sdr::show(ipmi, args, out).await,
        Command::FruPrint => fru::print(ipmi, args, out).await,
        Command::PicmgPowerGet => picmg::power_get(ipmi, out).await,
        Command::Raw => raw::send(ipmi, args, out).await,
        Command::HpmCapabilities => hpm::capabilities(ipmi, out).await,
        Command::HpmCheck => hpm::check(ipmi, args, out).await,
        Command::ChassisPower(control) => chassis::power(ipmi, control).await,
    }
}
