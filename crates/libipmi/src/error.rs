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

use thiserror::Error;

use crate::cmd::CmdError;

// IpmiError is the error type for every operation on an IPMI connection.
#[derive(Error, Debug)]
pub enum IpmiError {
    #[error("Command returned with completion code 0x{0:02x}")]
    CompletionCode(u8),

    #[error("Command timed out")]
    Timeout,

    #[error("Interrupted")]
    Interrupted,

    #[error("Unable to establish session with {host}: {reason}")]
    Session { host: String, reason: String },

    #[error("Interface '{0}' is not available")]
    InterfaceUnavailable(String),

    #[error("ipmitool not found or not executable")]
    IpmitoolNotFound,

    #[error("{0}")]
    Command(#[from] CmdError),

    #[error("Failed to decode {what} response: {reason}")]
    Decode { what: &'static str, reason: String },

    #[error("Invalid interface option: {0}")]
    InvalidOption(String),

    #[error("Failed to parse ipmitool output: {0}")]
    Parse(String),

    #[error("Sensor not found: {0}")]
    SensorNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IpmiError {
    pub fn decode(what: &'static str, reason: impl fmt::Display) -> Self {
        Self::Decode {
            what,
            reason: reason.to_string(),
        }
    }

    // completion_code returns the IPMI completion code carried by this
    // error, if any.
    pub fn completion_code(&self) -> Option<u8> {
        match self {
            Self::CompletionCode(cc) => Some(*cc),
            _ => None,
        }
    }
}

pub type IpmiResult<T> = Result<T, IpmiError>;
