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

fn custom_records(out: &mut dyn Write, title: &str, records: &[String]) -> std::io::Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    writeln!(out, "  {title}:")?;
    for record in records {
        writeln!(out, "    {record}")?;
    }
    Ok(())
}

pub async fn print(ipmi: &dyn Ipmi, args: &[String], out: &mut dyn Write) -> eyre::Result<()> {
    let fru_id = match args.first() {
        Some(id) => parse_int::<u8>(id).map_err(CliError::Argument)?,
        None => 0,
    };
    let print_all = args.get(1).is_some_and(|arg| arg == "all");

    let inventory = ipmi.get_fru_inventory(fru_id).await?;
    if inventory.is_empty() {
        tracing::info!(fru_id, "FRU has no inventory areas");
    }

    if let Some(area) = &inventory.chassis_info_area {
        writeln!(out, "Chassis Info Area:")?;
        writeln!(out, "  Type:               {}", area.chassis_type)?;
        writeln!(out, "  Part Number:        {}", area.part_number)?;
        writeln!(out, "  Serial Number:      {}", area.serial_number)?;
        custom_records(out, "Custom Chassis Info Records", &area.custom_chassis_info)?;
    }

    if let Some(area) = &inventory.board_info_area {
        writeln!(out, "Board Info Area:")?;
        writeln!(out, "  Mfg. Date / Time:   {}", area.mfg_date)?;
        writeln!(out, "  Manufacturer:       {}", area.manufacturer)?;
        writeln!(out, "  Product Name:       {}", area.product_name)?;
        writeln!(out, "  Serial Number:      {}", area.serial_number)?;
        writeln!(out, "  Part Number:        {}", area.part_number)?;
        writeln!(out, "  FRU File ID:        {}", area.fru_file_id)?;
        custom_records(out, "Custom Board Info Records", &area.custom_mfg_info)?;
    }

    if let Some(area) = &inventory.product_info_area {
        writeln!(out, "Product Info Area:")?;
        writeln!(out, "  Manufacturer:       {}", area.manufacturer)?;
        writeln!(out, "  Name:               {}", area.name)?;
        writeln!(out, "  Part/Model Number:  {}", area.part_number)?;
        writeln!(out, "  Version:            {}", area.version)?;
        writeln!(out, "  Serial Number:      {}", area.serial_number)?;
        writeln!(out, "  Asset:              {}", area.asset_tag)?;
        writeln!(out, "  FRU File ID:        {}", area.fru_file_id)?;
        custom_records(out, "Custom Product Info Records", &area.custom_mfg_info)?;
    }

    if let Some(area) = &inventory.multirecord_area {
        writeln!(out, "Multirecord Area:")?;
        if print_all {
            for record in &area.records {
                writeln!(out, "  {record}")?;
            }
        } else {
            writeln!(out, "  Skipped. Use \"fru print <fru-id> all\"")?;
        }
    }
    Ok(())
}
