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

//! HPM.1 upgrade command responses (NetFn PICMG) and the result of checking
//! an HPM.1 image file.

use std::fmt;

use crate::error::{IpmiError, IpmiResult};
use crate::types::device::bcd_decode;

pub const PICMG_IDENTIFIER: u8 = 0x00;

pub(crate) fn check_picmg_identifier(what: &'static str, data: &[u8]) -> IpmiResult<()> {
    match data.first() {
        Some(&PICMG_IDENTIFIER) => Ok(()),
        Some(other) => Err(IpmiError::decode(
            what,
            format!("unexpected PICMG identifier 0x{other:02x}"),
        )),
        None => Err(IpmiError::decode(what, "empty response")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUpgradeCapabilities {
    pub version: u8,
    pub capabilities: u8,
    // timeouts are in units of 5 seconds
    pub upgrade_timeout: u8,
    pub self_test_timeout: u8,
    pub rollback_timeout: u8,
    pub inaccessibility_timeout: u8,
    pub components: Vec<u8>,
}

impl TargetUpgradeCapabilities {
    const WHAT: &'static str = "Get Target Upgrade Capabilities";

    pub fn from_response(data: &[u8]) -> IpmiResult<Self> {
        check_picmg_identifier(Self::WHAT, data)?;
        if data.len() < 8 {
            return Err(IpmiError::decode(
                Self::WHAT,
                format!("expected 8 bytes, got {}", data.len()),
            ));
        }

        let mask = data[7];
        Ok(Self {
            version: data[1],
            capabilities: data[2],
            upgrade_timeout: data[3],
            self_test_timeout: data[4],
            rollback_timeout: data[5],
            inaccessibility_timeout: data[6],
            components: (0..8).filter(|bit| mask & (1 << bit) != 0).collect(),
        })
    }
}

// ComponentPropertySelector picks which property Get Component Properties
// returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentPropertySelector {
    General,
    CurrentVersion,
    Description,
    RollbackVersion,
    DeferredVersion,
}

impl ComponentPropertySelector {
    pub const ALL: [ComponentPropertySelector; 5] = [
        ComponentPropertySelector::General,
        ComponentPropertySelector::CurrentVersion,
        ComponentPropertySelector::Description,
        ComponentPropertySelector::RollbackVersion,
        ComponentPropertySelector::DeferredVersion,
    ];

    pub fn code(self) -> u8 {
        match self {
            ComponentPropertySelector::General => 0,
            ComponentPropertySelector::CurrentVersion => 1,
            ComponentPropertySelector::Description => 2,
            ComponentPropertySelector::RollbackVersion => 3,
            ComponentPropertySelector::DeferredVersion => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackSupport {
    None,
    Automatic,
    Manual,
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralProperties {
    pub rollback: RollbackSupport,
    pub preparation: bool,
    pub comparison: bool,
    pub deferred_activation: bool,
    pub payload_cold_reset_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub aux: [u8; 4],
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02} (aux {:02x} {:02x} {:02x} {:02x})",
            self.major, self.minor, self.aux[0], self.aux[1], self.aux[2], self.aux[3]
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentProperty {
    General(GeneralProperties),
    CurrentVersion(FirmwareVersion),
    Description(String),
    RollbackVersion(FirmwareVersion),
    DeferredVersion(FirmwareVersion),
}

impl ComponentProperty {
    const WHAT: &'static str = "Get Component Properties";

    pub fn from_response(selector: ComponentPropertySelector, data: &[u8]) -> IpmiResult<Self> {
        check_picmg_identifier(Self::WHAT, data)?;
        let payload = &data[1..];

        let property = match selector {
            ComponentPropertySelector::General => {
                let flags = *payload
                    .first()
                    .ok_or_else(|| IpmiError::decode(Self::WHAT, "missing general properties"))?;
                ComponentProperty::General(GeneralProperties {
                    rollback: match flags & 0x03 {
                        0 => RollbackSupport::None,
                        1 => RollbackSupport::Automatic,
                        2 => RollbackSupport::Manual,
                        _ => RollbackSupport::Reserved,
                    },
                    preparation: flags & 0x04 != 0,
                    comparison: flags & 0x08 != 0,
                    deferred_activation: flags & 0x10 != 0,
                    payload_cold_reset_required: flags & 0x20 != 0,
                })
            }
            ComponentPropertySelector::CurrentVersion => {
                ComponentProperty::CurrentVersion(decode_version(payload)?)
            }
            ComponentPropertySelector::Description => {
                let end = payload.iter().position(|b| *b == 0).unwrap_or(payload.len());
                ComponentProperty::Description(
                    String::from_utf8_lossy(&payload[..end]).trim().to_string(),
                )
            }
            ComponentPropertySelector::RollbackVersion => {
                ComponentProperty::RollbackVersion(decode_version(payload)?)
            }
            ComponentPropertySelector::DeferredVersion => {
                ComponentProperty::DeferredVersion(decode_version(payload)?)
            }
        };
        Ok(property)
    }
}

fn decode_version(payload: &[u8]) -> IpmiResult<FirmwareVersion> {
    if payload.len() < 6 {
        return Err(IpmiError::decode(
            ComponentProperty::WHAT,
            format!("expected 6 version bytes, got {}", payload.len()),
        ));
    }
    Ok(FirmwareVersion {
        major: payload[0] & 0x7f,
        minor: bcd_decode(payload[1]),
        aux: [payload[2], payload[3], payload[4], payload[5]],
    })
}

impl fmt::Display for ComponentProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentProperty::General(general) => write!(
                f,
                "General: rollback={:?} preparation={} comparison={} deferred-activation={} payload-cold-reset={}",
                general.rollback,
                general.preparation,
                general.comparison,
                general.deferred_activation,
                general.payload_cold_reset_required
            ),
            ComponentProperty::CurrentVersion(v) => write!(f, "Current version: {v}"),
            ComponentProperty::Description(d) => write!(f, "Description: {d}"),
            ComponentProperty::RollbackVersion(v) => write!(f, "Rollback version: {v}"),
            ComponentProperty::DeferredVersion(v) => write!(f, "Deferred version: {v}"),
        }
    }
}

// HpmImage is the result of checking an HPM.1 upgrade image: a header
// summary and the upgrade actions it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HpmImage {
    pub header: String,
    pub actions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_capabilities() {
        let caps =
            TargetUpgradeCapabilities::from_response(&[0x00, 0x00, 0x2f, 0x0c, 0x06, 0x0c, 0x04, 0x07])
                .unwrap();
        assert_eq!(caps.components, vec![0, 1, 2]);
        assert_eq!(caps.upgrade_timeout, 0x0c);
        assert_eq!(caps.inaccessibility_timeout, 0x04);
    }

    #[test]
    fn test_decode_capabilities_wrong_identifier() {
        let err = TargetUpgradeCapabilities::from_response(&[0x01, 0, 0, 0, 0, 0, 0, 0])
            .unwrap_err();
        assert!(err.to_string().contains("PICMG identifier"));
    }

    #[test]
    fn test_decode_general_properties() {
        let prop =
            ComponentProperty::from_response(ComponentPropertySelector::General, &[0x00, 0x2d])
                .unwrap();
        assert_eq!(
            prop,
            ComponentProperty::General(GeneralProperties {
                rollback: RollbackSupport::Automatic,
                preparation: true,
                comparison: true,
                deferred_activation: false,
                payload_cold_reset_required: true,
            })
        );
    }

    #[test]
    fn test_decode_versions_and_description() {
        let prop = ComponentProperty::from_response(
            ComponentPropertySelector::CurrentVersion,
            &[0x00, 0x01, 0x23, 0xaa, 0xbb, 0xcc, 0xdd],
        )
        .unwrap();
        assert_eq!(prop.to_string(), "Current version: 1.23 (aux aa bb cc dd)");

        let prop = ComponentProperty::from_response(
            ComponentPropertySelector::Description,
            b"\x00IPMC fw\x00\x00\x00\x00\x00",
        )
        .unwrap();
        assert_eq!(prop, ComponentProperty::Description("IPMC fw".to_string()));

        assert!(
            ComponentProperty::from_response(
                ComponentPropertySelector::RollbackVersion,
                &[0x00, 0x01]
            )
            .is_err()
        );
    }
}
