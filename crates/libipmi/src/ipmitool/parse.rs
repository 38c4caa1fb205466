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

//! Parsers for the text ipmitool prints.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{IpmiError, IpmiResult};
use crate::types::{
    BoardInfoArea, ChassisInfoArea, FruInventory, HpmImage, MultirecordArea, ProductInfoArea,
    SdrEntry, SdrKind, SelEntry, SensorDetail, SensorKind, Thresholds,
};

static COMPLETION_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rsp=0x([0-9a-fA-F]{1,2})").expect("valid regex"));

// raw_response parses the hex dump `ipmitool raw` prints for the response
// data (completion code not included).
pub fn raw_response(stdout: &str) -> IpmiResult<Vec<u8>> {
    stdout
        .split_whitespace()
        .map(|token| {
            u8::from_str_radix(token, 16)
                .map_err(|_| IpmiError::Parse(format!("invalid response byte '{token}'")))
        })
        .collect()
}

// completion_code extracts the completion code from a failed raw request,
// e.g. "Unable to send RAW command (channel=0x0 netfn=0x6 lun=0x0 cmd=0x1
// rsp=0xc1): Invalid command".
pub fn completion_code(output: &str) -> Option<u8> {
    COMPLETION_CODE
        .captures(output)
        .and_then(|caps| u8::from_str_radix(&caps[1], 16).ok())
}

fn key_values(output: &str) -> impl Iterator<Item = (&str, &str)> {
    output.lines().filter_map(|line| {
        let (key, value) = line.split_once(':')?;
        Some((key.trim(), value.trim()))
    })
}

fn table_rows(output: &str) -> impl Iterator<Item = Vec<&str>> {
    output
        .lines()
        .filter(|line| line.contains('|'))
        .map(|line| line.split('|').map(str::trim).collect())
}

// sel_list parses `ipmitool sel list`:
//    1 | 04/01/2025 | 10:00:00 | Temperature #0x30 | Upper Critical going high | Asserted
pub fn sel_list(output: &str) -> IpmiResult<Vec<SelEntry>> {
    table_rows(output)
        .map(|fields| {
            if fields.len() < 5 {
                return Err(IpmiError::Parse(format!(
                    "SEL entry has {} fields: {}",
                    fields.len(),
                    fields.join("|")
                )));
            }
            let record_id = u16::from_str_radix(fields[0], 16)
                .map_err(|_| IpmiError::Parse(format!("invalid SEL record id '{}'", fields[0])))?;
            Ok(SelEntry {
                record_id,
                timestamp: format!("{} {}", fields[1], fields[2]),
                sensor: fields[3].to_string(),
                event: fields[4].to_string(),
                direction: fields
                    .get(5)
                    .filter(|d| !d.is_empty())
                    .map(|d| d.to_string()),
            })
        })
        .collect()
}

// sdr_kind tells locator records apart by the description ipmitool prints
// in place of a reading, e.g. "Dynamic MC @ 20h" or "Logical FRU @00h".
fn sdr_kind(reading: &str) -> SdrKind {
    if reading.contains("MC @") {
        SdrKind::McLocator
    } else if reading.contains("FRU @") {
        SdrKind::FruLocator
    } else if reading.starts_with("Generic @") {
        SdrKind::GenericLocator
    } else {
        SdrKind::Sensor
    }
}

// sdr_elist parses `ipmitool sdr elist all`:
//   CPU Temp         | 30h | ok  |  3.1 | 45 degrees C
//   BMC              | 00h | ok  |  7.1 | Dynamic MC @ 20h
pub fn sdr_elist(output: &str) -> IpmiResult<Vec<SdrEntry>> {
    table_rows(output)
        .map(|fields| {
            if fields.len() < 5 {
                return Err(IpmiError::Parse(format!(
                    "SDR entry has {} fields: {}",
                    fields.len(),
                    fields.join("|")
                )));
            }
            let number = fields[1].trim_end_matches('h');
            let sensor_number = u8::from_str_radix(number, 16).map_err(|_| {
                IpmiError::Parse(format!("invalid sensor number '{}'", fields[1]))
            })?;
            Ok(SdrEntry {
                name: fields[0].to_string(),
                kind: sdr_kind(fields[4]),
                sensor_number,
                status: fields[2].to_string(),
                entity: fields[3].parse()?,
                reading: Some(fields[4])
                    .filter(|r| !r.is_empty())
                    .map(str::to_string),
            })
        })
        .collect()
}

fn threshold_value(value: &str) -> Option<String> {
    match value {
        "" | "na" => None,
        other => Some(other.to_string()),
    }
}

// sensor_get parses the detail block of `ipmitool sensor get <name>`.
pub fn sensor_get(output: &str) -> IpmiResult<SensorDetail> {
    let mut sensor_id = None;
    let mut kind = SensorKind::Discrete;
    let mut reading = None;
    let mut status = None;
    let mut thresholds = Thresholds::default();

    for (key, value) in key_values(output) {
        let key = key.to_ascii_lowercase();
        match key.as_str() {
            "sensor id" => sensor_id = Some(value.to_string()),
            "sensor reading" => reading = threshold_value(value),
            "status" => status = Some(value.to_string()),
            "upper non-recoverable" => thresholds.unr = threshold_value(value),
            "upper critical" => thresholds.ucr = threshold_value(value),
            "upper non-critical" => thresholds.unc = threshold_value(value),
            "lower non-critical" => thresholds.lnc = threshold_value(value),
            "lower critical" => thresholds.lcr = threshold_value(value),
            "lower non-recoverable" => thresholds.lnr = threshold_value(value),
            k if k.starts_with("sensor type") => {
                if k.contains("threshold") {
                    kind = SensorKind::Threshold;
                }
            }
            _ => {}
        }
    }

    let sensor_id =
        sensor_id.ok_or_else(|| IpmiError::Parse("sensor detail without Sensor ID".to_string()))?;
    Ok(SensorDetail {
        sensor_id,
        kind,
        reading,
        status,
        thresholds,
    })
}

// fru_print parses `ipmitool fru print <id>`. Fields outside the chassis,
// board and product areas are kept as multirecord lines.
pub fn fru_print(output: &str) -> FruInventory {
    let mut inv = FruInventory::default();

    for (key, value) in key_values(output) {
        let value = value.to_string();
        if let Some(field) = key.strip_prefix("Chassis ") {
            let area = inv
                .chassis_info_area
                .get_or_insert_with(ChassisInfoArea::default);
            match field {
                "Type" => area.chassis_type = value,
                "Part Number" => area.part_number = value,
                "Serial" => area.serial_number = value,
                "Extra" => area.custom_chassis_info.push(value),
                _ => area.custom_chassis_info.push(format!("{field}: {value}")),
            }
        } else if let Some(field) = key.strip_prefix("Board ") {
            let area = inv.board_info_area.get_or_insert_with(BoardInfoArea::default);
            match field {
                "Mfg Date" => area.mfg_date = value,
                "Mfg" => area.manufacturer = value,
                "Product" => area.product_name = value,
                "Serial" => area.serial_number = value,
                "Part Number" => area.part_number = value,
                "FRU ID" => area.fru_file_id = value,
                "Extra" => area.custom_mfg_info.push(value),
                _ => area.custom_mfg_info.push(format!("{field}: {value}")),
            }
        } else if let Some(field) = key.strip_prefix("Product ") {
            let area = inv
                .product_info_area
                .get_or_insert_with(ProductInfoArea::default);
            match field {
                "Manufacturer" => area.manufacturer = value,
                "Name" => area.name = value,
                "Part Number" => area.part_number = value,
                "Version" => area.version = value,
                "Serial" => area.serial_number = value,
                "Asset Tag" => area.asset_tag = value,
                "FRU ID" => area.fru_file_id = value,
                "Extra" => area.custom_mfg_info.push(value),
                _ => area.custom_mfg_info.push(format!("{field}: {value}")),
            }
        } else if key == "FRU Device Description" {
            continue;
        } else {
            inv.multirecord_area
                .get_or_insert_with(MultirecordArea::default)
                .records
                .push(format!("{key}: {value}"));
        }
    }

    inv
}

fn is_separator(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '-' | '=' | '|' | '+' | ' '))
}

// hpm_check splits the `ipmitool hpm check <file>` report into its first
// block (the image header summary) and the lines that follow it.
pub fn hpm_check(output: &str) -> HpmImage {
    let mut lines = output.lines().map(str::trim_end).skip_while(|l| l.trim().is_empty());

    let header = lines
        .by_ref()
        .take_while(|l| !l.trim().is_empty())
        .filter(|l| !is_separator(l))
        .collect::<Vec<_>>()
        .join("\n");

    let actions = lines
        .filter(|l| !is_separator(l))
        .map(|l| l.trim().to_string())
        .collect();

    HpmImage { header, actions }
}
