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
use std::str::FromStr;

use crate::error::{IpmiError, IpmiResult};

// SensorReading is the decoded Get Sensor Reading (NetFn Sensor/Event,
// 0x2d) response. `raw` is None when the BMC flags the reading as
// unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReading {
    pub raw: Option<u8>,
    pub states: u16,
    pub scanning_enabled: bool,
    pub event_messages_enabled: bool,
}

impl SensorReading {
    pub fn from_response(data: &[u8]) -> IpmiResult<Self> {
        if data.len() < 2 {
            return Err(IpmiError::decode(
                "Get Sensor Reading",
                format!("expected at least 2 bytes, got {}", data.len()),
            ));
        }

        let flags = data[1];
        let unavailable = flags & 0x20 != 0;
        let states = u16::from(data.get(2).copied().unwrap_or(0))
            | (u16::from(data.get(3).copied().unwrap_or(0)) << 8);

        Ok(Self {
            raw: (!unavailable).then_some(data[0]),
            states,
            scanning_enabled: flags & 0x40 != 0,
            event_messages_enabled: flags & 0x80 != 0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId {
    pub id: u8,
    pub instance: u8,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.id, self.instance)
    }
}

impl FromStr for EntityId {
    type Err = IpmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IpmiError::Parse(format!("invalid entity id '{s}'"));
        let (id, instance) = s.trim().split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            id: id.parse().map_err(|_| invalid())?,
            instance: instance.parse().map_err(|_| invalid())?,
        })
    }
}

// SdrKind separates sensor records from the locator records that share the
// repository with them. Locator records carry no sensor number of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdrKind {
    Sensor,
    McLocator,
    FruLocator,
    GenericLocator,
}

impl SdrKind {
    pub fn is_sensor(self) -> bool {
        self == SdrKind::Sensor
    }
}

// SdrEntry is one sensor data record as enumerated by the BMC, with the
// reading already converted to engineering units by the protocol engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdrEntry {
    pub name: String,
    pub kind: SdrKind,
    pub sensor_number: u8,
    pub status: String,
    pub entity: EntityId,
    pub reading: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Threshold,
    Discrete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub unr: Option<String>,
    pub ucr: Option<String>,
    pub unc: Option<String>,
    pub lnc: Option<String>,
    pub lcr: Option<String>,
    pub lnr: Option<String>,
}

impl Thresholds {
    // labelled returns the thresholds from upper non-recoverable down to
    // lower non-recoverable.
    pub fn labelled(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("UNR", self.unr.as_deref()),
            ("UCR", self.ucr.as_deref()),
            ("UNC", self.unc.as_deref()),
            ("LNC", self.lnc.as_deref()),
            ("LCR", self.lcr.as_deref()),
            ("LNR", self.lnr.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorDetail {
    pub sensor_id: String,
    pub kind: SensorKind,
    pub reading: Option<String>,
    pub status: Option<String>,
    pub thresholds: Thresholds,
}
