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

use std::fmt;

use crate::error::{IpmiError, IpmiResult};
use crate::types::hpm::check_picmg_identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerType {
    SteadyState,
    DesiredSteadyState,
    EarlyPower,
    DesiredEarlyPower,
}

impl PowerType {
    pub fn code(self) -> u8 {
        match self {
            PowerType::SteadyState => 0,
            PowerType::DesiredSteadyState => 1,
            PowerType::EarlyPower => 2,
            PowerType::DesiredEarlyPower => 3,
        }
    }
}

// PowerLevel is the decoded PICMG Get Power Level (0x12) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerLevel {
    pub dynamic_reconfiguration: bool,
    pub power_level: u8,
    pub delay_to_stable_power: u8,
    pub power_multiplier: u8,
    pub power_draw: Vec<u8>,
}

impl PowerLevel {
    const WHAT: &'static str = "Get Power Level";

    pub fn from_response(data: &[u8]) -> IpmiResult<Self> {
        check_picmg_identifier(Self::WHAT, data)?;
        if data.len() < 4 {
            return Err(IpmiError::decode(
                Self::WHAT,
                format!("expected at least 4 bytes, got {}", data.len()),
            ));
        }

        Ok(Self {
            dynamic_reconfiguration: data[1] & 0x80 != 0,
            power_level: data[1] & 0x1f,
            delay_to_stable_power: data[2],
            power_multiplier: data[3],
            power_draw: data[4..].to_vec(),
        })
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Dynamic Power Configuration: {}",
            if self.dynamic_reconfiguration { "yes" } else { "no" }
        )?;
        writeln!(f, "Actual Power Level:          {}", self.power_level)?;
        writeln!(f, "Delay To Stable Power:       {}", self.delay_to_stable_power)?;
        writeln!(f, "Power Multiplier:            {}", self.power_multiplier)?;
        let draw = self
            .power_draw
            .iter()
            .enumerate()
            .map(|(level, draw)| format!("{}={}", level + 1, draw))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "Power Draw:                  {draw}")
    }
}
