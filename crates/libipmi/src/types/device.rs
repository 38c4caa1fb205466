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

//! Get Device ID (NetFn App, 0x01) response.

use crate::error::{IpmiError, IpmiResult};

// DeviceFunction is one bit of the "Additional Device Support" field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceFunction {
    Sensor,
    SdrRepository,
    Sel,
    FruInventory,
    IpmbEventReceiver,
    IpmbEventGenerator,
    Bridge,
    Chassis,
}

impl DeviceFunction {
    pub const ALL: [DeviceFunction; 8] = [
        DeviceFunction::Sensor,
        DeviceFunction::SdrRepository,
        DeviceFunction::Sel,
        DeviceFunction::FruInventory,
        DeviceFunction::IpmbEventReceiver,
        DeviceFunction::IpmbEventGenerator,
        DeviceFunction::Bridge,
        DeviceFunction::Chassis,
    ];

    fn mask(self) -> u8 {
        match self {
            DeviceFunction::Sensor => 0x01,
            DeviceFunction::SdrRepository => 0x02,
            DeviceFunction::Sel => 0x04,
            DeviceFunction::FruInventory => 0x08,
            DeviceFunction::IpmbEventReceiver => 0x10,
            DeviceFunction::IpmbEventGenerator => 0x20,
            DeviceFunction::Bridge => 0x40,
            DeviceFunction::Chassis => 0x80,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DeviceFunction::Sensor => "Sensor Device",
            DeviceFunction::SdrRepository => "SDR Repository Device",
            DeviceFunction::Sel => "SEL Device",
            DeviceFunction::FruInventory => "FRU Inventory Device",
            DeviceFunction::IpmbEventReceiver => "IPMB Event Receiver",
            DeviceFunction::IpmbEventGenerator => "IPMB Event Generator",
            DeviceFunction::Bridge => "Bridge",
            DeviceFunction::Chassis => "Chassis Device",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceId {
    pub device_id: u8,
    pub revision: u8,
    pub provides_sdrs: bool,
    pub available: bool,
    pub major_fw_revision: u8,
    pub minor_fw_revision: u8,
    pub major_ipmi_version: u8,
    pub minor_ipmi_version: u8,
    pub manufacturer_id: u32,
    pub product_id: u16,
    pub additional_support: u8,
    pub aux: Option<[u8; 4]>,
}

impl DeviceId {
    const MIN_LEN: usize = 11;

    // from_response decodes the response data that follows the completion
    // code.
    pub fn from_response(data: &[u8]) -> IpmiResult<Self> {
        if data.len() < Self::MIN_LEN {
            return Err(IpmiError::decode(
                "Get Device ID",
                format!("expected at least {} bytes, got {}", Self::MIN_LEN, data.len()),
            ));
        }

        let aux = data
            .get(11..15)
            .map(|aux| [aux[0], aux[1], aux[2], aux[3]]);

        Ok(Self {
            device_id: data[0],
            revision: data[1] & 0x0f,
            provides_sdrs: data[1] & 0x80 != 0,
            // bit 7 set means an update or self-initialization is in progress
            available: data[2] & 0x80 == 0,
            major_fw_revision: data[2] & 0x7f,
            minor_fw_revision: bcd_decode(data[3]),
            major_ipmi_version: data[4] & 0x0f,
            minor_ipmi_version: data[4] >> 4,
            additional_support: data[5],
            manufacturer_id: u32::from_le_bytes([data[6], data[7], data[8] & 0x0f, 0]),
            product_id: u16::from_le_bytes([data[9], data[10]]),
            aux,
        })
    }

    pub fn supports_function(&self, function: DeviceFunction) -> bool {
        self.additional_support & function.mask() != 0
    }

    pub fn supported_functions(&self) -> impl Iterator<Item = DeviceFunction> + '_ {
        DeviceFunction::ALL
            .into_iter()
            .filter(|f| self.supports_function(*f))
    }
}

pub(crate) fn bcd_decode(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0f)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: [u8; 15] = [
        0x20, 0x81, 0x01, 0x12, 0x02, 0x9f, 0x57, 0x01, 0x00, 0x43, 0x00, 0x01, 0x02, 0x03, 0x04,
    ];

    #[test]
    fn test_decode_device_id() {
        let id = DeviceId::from_response(&RESPONSE).unwrap();
        assert_eq!(id.device_id, 0x20);
        assert_eq!(id.revision, 1);
        assert!(id.provides_sdrs);
        assert!(id.available);
        assert_eq!(id.major_fw_revision, 1);
        assert_eq!(id.minor_fw_revision, 12);
        assert_eq!(id.major_ipmi_version, 2);
        assert_eq!(id.minor_ipmi_version, 0);
        assert_eq!(id.manufacturer_id, 0x0157);
        assert_eq!(id.product_id, 0x0043);
        assert_eq!(id.aux, Some([1, 2, 3, 4]));
    }

    #[test]
    fn test_supported_functions() {
        let id = DeviceId::from_response(&RESPONSE).unwrap();
        let functions: Vec<_> = id.supported_functions().collect();
        assert_eq!(
            functions,
            vec![
                DeviceFunction::Sensor,
                DeviceFunction::SdrRepository,
                DeviceFunction::Sel,
                DeviceFunction::FruInventory,
                DeviceFunction::IpmbEventReceiver,
                DeviceFunction::Chassis,
            ]
        );
    }

    #[test]
    fn test_decode_without_aux_and_in_update() {
        let mut data = RESPONSE[..11].to_vec();
        data[2] |= 0x80;
        let id = DeviceId::from_response(&data).unwrap();
        assert_eq!(id.aux, None);
        assert!(!id.available);
        assert_eq!(id.major_fw_revision, 1);
    }

    #[test]
    fn test_decode_short_response() {
        let err = DeviceId::from_response(&RESPONSE[..5]).unwrap_err();
        assert!(matches!(err, IpmiError::Decode { .. }));
    }

    #[test]
    fn test_bcd_decode() {
        assert_eq!(bcd_decode(0x00), 0);
        assert_eq!(bcd_decode(0x09), 9);
        assert_eq!(bcd_decode(0x42), 42);
    }
}
