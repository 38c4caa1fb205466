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
use libipmi::types::PowerType;

// Power levels are read for FRU 0, the board itself.
const FRU_ID: u8 = 0;

pub async fn power_get(ipmi: &dyn Ipmi, out: &mut dyn Write) -> eyre::Result<()> {
    let level = ipmi.get_power_level(FRU_ID, PowerType::SteadyState).await?;
    writeln!(out, "{level}")?;
    Ok(())
}
