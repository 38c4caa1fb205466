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

//! Access to a baseboard management controller over IPMI.
//!
//! [`Ipmi`] is the operation surface; [`open`] builds an implementation for
//! a [`ConnectionConfig`]. The only transport shipped here drives the system
//! `ipmitool` program, which owns the RMCP session handling and record
//! decoding.

pub mod cmd;
pub mod connection;
pub mod error;
pub mod ipmitool;
pub mod types;

pub use connection::{
    AardvarkOptions, BMC_ADDRESS, ConnectionConfig, INTERFACE_OPTIONS, Interface,
    InterfaceOption, Ipmi, IpmitoolOptions, Target, open,
};
pub use error::{IpmiError, IpmiResult};
