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

pub async fn info(ipmi: &dyn Ipmi, out: &mut dyn Write) -> eyre::Result<()> {
    let id = ipmi.get_device_id().await?;

    writeln!(out, "Device ID:          {}", id.device_id)?;
    writeln!(out, "Device Revision:    {}", id.revision)?;
    writeln!(
        out,
        "Firmware Revision:  {}.{}",
        id.major_fw_revision, id.minor_fw_revision
    )?;
    writeln!(
        out,
        "IPMI Version:       {}.{}",
        id.major_ipmi_version, id.minor_ipmi_version
    )?;
    writeln!(
        out,
        "Manufacturer ID:    {0} (0x{0:04x})",
        id.manufacturer_id
    )?;
    writeln!(out, "Product ID:         {0} (0x{0:04x})", id.product_id)?;
    writeln!(out, "Device Available:   {}", u8::from(id.available))?;
    writeln!(out, "Provides SDRs:      {}", u8::from(id.provides_sdrs))?;
    writeln!(out, "Additional Device Support:")?;
    for function in id.supported_functions() {
        writeln!(out, "  {}", function.description())?;
    }
    if let Some(aux) = id.aux {
        writeln!(
            out,
            "Aux Firmware Rev Info:  [{:02x} {:02x} {:02x} {:02x}]",
            aux[0], aux[1], aux[2], aux[3]
        )?;
    }
    Ok(())
}

pub async fn cold_reset(ipmi: &dyn Ipmi) -> eyre::Result<()> {
    ipmi.cold_reset().await?;
    Ok(())
}

pub async fn warm_reset(ipmi: &dyn Ipmi) -> eyre::Result<()> {
    ipmi.warm_reset().await?;
    Ok(())
}
