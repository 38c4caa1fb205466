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

use std::io::Write;

use libipmi::Ipmi;

use crate::error::CliError;
use crate::options::parse_int;

const MAX_LUN: u8 = 0x03;
const MAX_NETFN: u8 = 0x3f;

fn byte(literal: &str) -> Result<u8, CliError> {
    parse_int(literal).map_err(CliError::Argument)
}

// send handles `raw [lun <lun>] <netfn> <cmd> [data...]` and prints the
// whole response, completion code first.
pub async fn send(ipmi: &dyn Ipmi, args: &[String], out: &mut dyn Write) -> eyre::Result<()> {
    let (lun, args) = match args {
        [keyword, lun, rest @ ..] if keyword == "lun" => (byte(lun)?, rest),
        _ => (0, args),
    };
    if lun > MAX_LUN {
        return Err(CliError::Argument(format!("LUN {lun} is out of range (0-3)")).into());
    }

    let [netfn, cmd, data @ ..] = args else {
        return Err(CliError::Usage.into());
    };
    let netfn = byte(netfn)?;
    if netfn > MAX_NETFN {
        return Err(CliError::Argument(format!("NetFn 0x{netfn:02x} is out of range")).into());
    }
    let cmd = byte(cmd)?;
    let data = data
        .iter()
        .map(|d| byte(d))
        .collect::<Result<Vec<u8>, _>>()?;

    let rsp = ipmi.raw_command(lun, netfn, cmd, &data).await?;
    let hex: Vec<String> = rsp.iter().map(|b| format!("{b:02x}")).collect();
    writeln!(out, "{}", hex.join(" "))?;
    Ok(())
}
