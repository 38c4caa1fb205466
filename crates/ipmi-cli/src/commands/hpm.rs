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
use std::path::Path;

use libipmi::Ipmi;

pub async fn capabilities(ipmi: &dyn Ipmi, out: &mut dyn Write) -> eyre::Result<()> {
    let capabilities = ipmi.get_target_upgrade_capabilities().await?;

    for component in capabilities.components {
        let properties = ipmi.get_component_properties(component).await?;
        writeln!(out, "Component ID: {component}")?;
        for property in properties {
            writeln!(out, "  {property}")?;
        }
    }
    Ok(())
}

pub async fn check(ipmi: &dyn Ipmi, args: &[String], out: &mut dyn Write) -> eyre::Result<()> {
    let Some(file) = args.first() else {
        return Ok(());
    };

    let image = ipmi.open_hpm_file(Path::new(file)).await?;
    writeln!(out, "{}", image.header)?;
    for action in &image.actions {
        writeln!(out, "{action}")?;
    }
    Ok(())
}
