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

use libipmi::Ipmi;
use libipmi::types::ChassisControl;

pub async fn power(ipmi: &dyn Ipmi, control: ChassisControl) -> eyre::Result<()> {
    tracing::info!("Chassis power {control}");
    ipmi.chassis_control(control).await?;
    Ok(())
}
