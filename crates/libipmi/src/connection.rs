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
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{IpmiError, IpmiResult};
use crate::ipmitool::IpmitoolConnection;
use crate::types::hpm::ComponentPropertySelector;
use crate::types::{
    ChassisControl, ComponentProperty, DeviceId, FruInventory, HpmImage, PowerLevel, PowerType,
    SdrEntry, SelEntry, SensorDetail, SensorReading, TargetUpgradeCapabilities,
};

/// IPMB address of the BMC itself.
pub const BMC_ADDRESS: u8 = 0x20;

pub mod netfn {
    pub const CHASSIS: u8 = 0x00;
    pub const SENSOR_EVENT: u8 = 0x04;
    pub const APP: u8 = 0x06;
    pub const PICMG: u8 = 0x2c;
}

mod cmd {
    pub const CHASSIS_CONTROL: u8 = 0x02;
    pub const GET_SENSOR_READING: u8 = 0x2d;
    pub const GET_DEVICE_ID: u8 = 0x01;
    pub const COLD_RESET: u8 = 0x02;
    pub const WARM_RESET: u8 = 0x03;
    pub const GET_POWER_LEVEL: u8 = 0x12;
    pub const GET_TARGET_UPGRADE_CAPABILITIES: u8 = 0x2e;
    pub const GET_COMPONENT_PROPERTIES: u8 = 0x2f;
}

/// Ipmi is the set of operations the command-line front end needs from an
/// IPMI protocol engine.
///
/// Implementations provide raw request submission plus the record-oriented
/// queries (SEL, SDR, FRU, HPM.1 image check) whose decoding belongs to the
/// engine. Commands with small fixed-layout responses are provided on top of
/// [`Ipmi::raw_command`].
#[async_trait]
pub trait Ipmi: Send + Sync {
    /// Opens the session to the target, when the transport has one.
    async fn establish_session(&self) -> IpmiResult<()>;

    async fn close_session(&self) -> IpmiResult<()>;

    /// Sends a request and returns the complete response, completion code
    /// first. A non-zero completion code is not an error at this level.
    async fn raw_command(&self, lun: u8, netfn: u8, cmd: u8, data: &[u8]) -> IpmiResult<Vec<u8>>;

    async fn sel_entries(&self) -> IpmiResult<Vec<SelEntry>>;

    async fn sdr_entries(&self) -> IpmiResult<Vec<SdrEntry>>;

    async fn get_sensor_detail(&self, name: &str) -> IpmiResult<SensorDetail>;

    async fn get_fru_inventory(&self, fru_id: u8) -> IpmiResult<FruInventory>;

    async fn open_hpm_file(&self, path: &Path) -> IpmiResult<HpmImage>;

    /// Sends a request on LUN 0 and returns the response data after a zero
    /// completion code.
    async fn send_message(&self, netfn: u8, cmd: u8, data: &[u8]) -> IpmiResult<Vec<u8>> {
        let rsp = self.raw_command(0, netfn, cmd, data).await?;
        match rsp.split_first() {
            None => Err(IpmiError::decode("response", "missing completion code")),
            Some((0, data)) => Ok(data.to_vec()),
            Some((cc, _)) => Err(IpmiError::CompletionCode(*cc)),
        }
    }

    async fn get_device_id(&self) -> IpmiResult<DeviceId> {
        let data = self
            .send_message(netfn::APP, cmd::GET_DEVICE_ID, &[])
            .await?;
        DeviceId::from_response(&data)
    }

    async fn cold_reset(&self) -> IpmiResult<()> {
        self.send_message(netfn::APP, cmd::COLD_RESET, &[]).await?;
        Ok(())
    }

    async fn warm_reset(&self) -> IpmiResult<()> {
        self.send_message(netfn::APP, cmd::WARM_RESET, &[]).await?;
        Ok(())
    }

    async fn chassis_control(&self, control: ChassisControl) -> IpmiResult<()> {
        self.send_message(netfn::CHASSIS, cmd::CHASSIS_CONTROL, &[control.code()])
            .await?;
        Ok(())
    }

    async fn get_sensor_reading(&self, sensor_number: u8) -> IpmiResult<SensorReading> {
        let data = self
            .send_message(netfn::SENSOR_EVENT, cmd::GET_SENSOR_READING, &[sensor_number])
            .await?;
        SensorReading::from_response(&data)
    }

    async fn get_power_level(&self, fru_id: u8, power_type: PowerType) -> IpmiResult<PowerLevel> {
        let data = self
            .send_message(
                netfn::PICMG,
                cmd::GET_POWER_LEVEL,
                &[0x00, fru_id, power_type.code()],
            )
            .await?;
        PowerLevel::from_response(&data)
    }

    async fn get_target_upgrade_capabilities(&self) -> IpmiResult<TargetUpgradeCapabilities> {
        let data = self
            .send_message(netfn::PICMG, cmd::GET_TARGET_UPGRADE_CAPABILITIES, &[0x00])
            .await?;
        TargetUpgradeCapabilities::from_response(&data)
    }

    async fn get_component_property(
        &self,
        component_id: u8,
        selector: ComponentPropertySelector,
    ) -> IpmiResult<ComponentProperty> {
        let data = self
            .send_message(
                netfn::PICMG,
                cmd::GET_COMPONENT_PROPERTIES,
                &[0x00, component_id, selector.code()],
            )
            .await?;
        ComponentProperty::from_response(selector, &data)
    }

    /// Collects every standard property of a component. Properties the
    /// component rejects with a completion code are left out.
    async fn get_component_properties(
        &self,
        component_id: u8,
    ) -> IpmiResult<Vec<ComponentProperty>> {
        let mut properties = Vec::new();
        for selector in ComponentPropertySelector::ALL {
            match self.get_component_property(component_id, selector).await {
                Ok(property) => properties.push(property),
                Err(IpmiError::CompletionCode(cc)) => {
                    tracing::debug!(component_id, ?selector, "property not supported, cc=0x{cc:02x}");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(properties)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interface {
    #[default]
    Ipmitool,
    Aardvark,
}

impl Interface {
    pub const ALL: [Interface; 2] = [Interface::Aardvark, Interface::Ipmitool];

    pub fn name(self) -> &'static str {
        match self {
            Interface::Ipmitool => "ipmitool",
            Interface::Aardvark => "aardvark",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interface {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interface::ALL
            .into_iter()
            .find(|i| i.name() == s)
            .ok_or_else(|| format!("unknown interface '{s}'"))
    }
}

// Target is where requests are addressed: an IPMB address plus the bridging
// path of (address, channel) hops used to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub address: u8,
    pub routing: Vec<(u8, u8)>,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            address: BMC_ADDRESS,
            routing: vec![(BMC_ADDRESS, 0)],
        }
    }
}

impl Target {
    pub fn channel(&self) -> u8 {
        self.routing.last().map(|(_, channel)| *channel).unwrap_or(0)
    }

    pub fn is_bridged(&self) -> bool {
        self.address != BMC_ADDRESS || self.channel() != 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AardvarkOptions {
    pub pullups: Option<bool>,
    pub target_power: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpmitoolOptions {
    // interface is the ipmitool -I value (lan, lanplus, open).
    pub interface: Option<String>,
    pub port: Option<u16>,
    pub cipher_suite: Option<u8>,
    pub path: Option<PathBuf>,
}

/// InterfaceOption describes one `-o name=value` option an interface accepts.
pub struct InterfaceOption {
    pub interface: Interface,
    pub name: &'static str,
    pub value: &'static str,
    pub help: &'static str,
}

pub const INTERFACE_OPTIONS: &[InterfaceOption] = &[
    InterfaceOption {
        interface: Interface::Aardvark,
        name: "pullups",
        value: "<on|off>",
        help: "Enable/disable pullups",
    },
    InterfaceOption {
        interface: Interface::Aardvark,
        name: "power",
        value: "<on|off>",
        help: "Enable/disable target power",
    },
    InterfaceOption {
        interface: Interface::Ipmitool,
        name: "interface",
        value: "<lan|lanplus|open>",
        help: "ipmitool interface (default lanplus with -H, open without)",
    },
    InterfaceOption {
        interface: Interface::Ipmitool,
        name: "port",
        value: "<port>",
        help: "RMCP port",
    },
    InterfaceOption {
        interface: Interface::Ipmitool,
        name: "cipher",
        value: "<suite>",
        help: "RMCP+ cipher suite",
    },
    InterfaceOption {
        interface: Interface::Ipmitool,
        name: "path",
        value: "<file>",
        help: "ipmitool executable",
    },
];

#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub interface: Interface,
    pub target: Target,
    pub host: Option<String>,
    pub user: String,
    pub password: String,
    pub aardvark: AardvarkOptions,
    pub ipmitool: IpmitoolOptions,
    pub timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            interface: Interface::default(),
            target: Target::default(),
            host: None,
            user: String::new(),
            password: String::new(),
            aardvark: AardvarkOptions::default(),
            ipmitool: IpmitoolOptions::default(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("interface", &self.interface)
            .field("target", &self.target)
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("aardvark", &self.aardvark)
            .field("ipmitool", &self.ipmitool)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ConnectionConfig {
    /// Applies one interface-specific option. Returns `Ok(false)` when the
    /// selected interface has no option of that name.
    pub fn apply_interface_option(&mut self, name: &str, value: &str) -> IpmiResult<bool> {
        let invalid = || IpmiError::InvalidOption(format!("invalid value '{value}' for {name}"));

        match (self.interface, name) {
            (Interface::Aardvark, "pullups") => {
                self.aardvark.pullups = Some(parse_on_off(value).ok_or_else(invalid)?);
            }
            (Interface::Aardvark, "power") => {
                self.aardvark.target_power = Some(parse_on_off(value).ok_or_else(invalid)?);
            }
            (Interface::Ipmitool, "interface") => match value {
                "lan" | "lanplus" | "open" => self.ipmitool.interface = Some(value.to_string()),
                _ => return Err(invalid()),
            },
            (Interface::Ipmitool, "port") => {
                self.ipmitool.port = Some(value.parse().map_err(|_| invalid())?);
            }
            (Interface::Ipmitool, "cipher") => {
                self.ipmitool.cipher_suite = Some(value.parse().map_err(|_| invalid())?);
            }
            (Interface::Ipmitool, "path") => {
                self.ipmitool.path = Some(PathBuf::from(value));
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

/// Opens a connection for the configured interface. Session establishment
/// is left to the caller.
pub fn open(config: ConnectionConfig) -> IpmiResult<Box<dyn Ipmi>> {
    tracing::debug!(interface = %config.interface, host = ?config.host, "opening connection");
    match config.interface {
        Interface::Ipmitool => Ok(Box::new(IpmitoolConnection::new(config)?)),
        // The adapter's USB protocol is not implemented here.
        Interface::Aardvark => Err(IpmiError::InterfaceUnavailable(
            Interface::Aardvark.to_string(),
        )),
    }
}
