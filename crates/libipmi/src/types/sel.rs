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

// SelEntry is one System Event Log record as rendered by the protocol
// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelEntry {
    pub record_id: u16,
    pub timestamp: String,
    pub sensor: String,
    pub event: String,
    pub direction: Option<String>,
}

impl fmt::Display for SelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:04x} | {} | {} | {}",
            self.record_id, self.timestamp, self.sensor, self.event
        )?;
        if let Some(direction) = &self.direction {
            write!(f, " | {direction}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut entry = SelEntry {
            record_id: 0x1a,
            timestamp: "04/01/2025 10:00:00".to_string(),
            sensor: "Temperature #0x30".to_string(),
            event: "Upper Critical going high".to_string(),
            direction: Some("Asserted".to_string()),
        };
        assert_eq!(
            entry.to_string(),
            "0x001a | 04/01/2025 10:00:00 | Temperature #0x30 | Upper Critical going high | Asserted"
        );

        entry.direction = None;
        assert!(entry.to_string().ends_with("going high"));
    }
}
