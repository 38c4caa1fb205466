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

use libipmi::types::{SdrEntry, SensorKind, SensorReading};
use libipmi::{Ipmi, IpmiError};

use crate::error::CliError;
use crate::options::parse_int;

// reading_value is the converted reading to show for a sensor, or "na" when
// the BMC reports the reading as unavailable.
fn reading_value<'a>(reading: &SensorReading, converted: Option<&'a str>) -> &'a str {
    match reading.raw {
        Some(_) => converted.unwrap_or("na"),
        None => "na",
    }
}

pub async fn list(ipmi: &dyn Ipmi, out: &mut dyn Write) -> eyre::Result<()> {
    writeln!(out, "  #  | Device String    | Reading   | State")?;
    writeln!(out, "=====|==================|===========|==========")?;

    for entry in ipmi.sdr_entries().await? {
        if !entry.kind.is_sensor() {
            writeln!(out, " --- | {:<16} |", entry.name)?;
            continue;
        }
        match ipmi.get_sensor_reading(entry.sensor_number).await {
            Ok(reading) => writeln!(
                out,
                " {:3} | {:<16} | {:>9} | 0x{:x}",
                entry.sensor_number,
                entry.name,
                reading_value(&reading, entry.reading.as_deref()),
                reading.states
            )?,
            // One sensor failing does not end the listing.
            Err(e) => match e.completion_code() {
                Some(cc) => writeln!(
                    out,
                    " {:3} | {:<16} | ERR: CC=0x{cc:02x}",
                    entry.sensor_number, entry.name
                )?,
                None => return Err(e.into()),
            },
        }
    }
    Ok(())
}

// find_entry looks a sensor up by number when the id is an integer literal
// and by name otherwise. Locator records have no reading and never match.
fn find_entry(entries: Vec<SdrEntry>, id: &str) -> Option<SdrEntry> {
    let mut sensors = entries.into_iter().filter(|e| e.kind.is_sensor());
    match parse_int::<u8>(id) {
        Ok(number) => sensors.find(|e| e.sensor_number == number),
        Err(_) => sensors.find(|e| e.name == id),
    }
}

pub async fn show(ipmi: &dyn Ipmi, args: &[String], out: &mut dyn Write) -> eyre::Result<()> {
    let [id] = args else {
        return Err(CliError::Usage.into());
    };

    let entry = find_entry(ipmi.sdr_entries().await?, id)
        .ok_or_else(|| IpmiError::SensorNotFound(id.clone()))?;
    let reading = ipmi.get_sensor_reading(entry.sensor_number).await?;
    let detail = ipmi.get_sensor_detail(&entry.name).await?;
    let converted = detail.reading.as_deref().or(entry.reading.as_deref());

    writeln!(out, "Sensor number:    0x{:02x}", entry.sensor_number)?;
    writeln!(out, "Device Id string: {}", entry.name)?;
    writeln!(out, "Entity:           {}", entry.entity)?;
    writeln!(out, "Reading value:    {}", reading_value(&reading, converted))?;
    writeln!(out, "Reading state:    0x{:x}", reading.states)?;
    if detail.kind == SensorKind::Threshold {
        for (label, threshold) in detail.thresholds.labelled() {
            writeln!(
                out,
                "{:<18}{}",
                format!("{label}:"),
                threshold.unwrap_or("na")
            )?;
        }
    }
    Ok(())
}
