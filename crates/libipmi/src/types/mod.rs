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

pub mod chassis;
pub mod device;
pub mod fru;
pub mod hpm;
pub mod picmg;
pub mod sel;
pub mod sensor;

pub use chassis::ChassisControl;
pub use device::{DeviceFunction, DeviceId};
pub use fru::{BoardInfoArea, ChassisInfoArea, FruInventory, MultirecordArea, ProductInfoArea};
pub use hpm::{
    ComponentProperty, ComponentPropertySelector, FirmwareVersion, GeneralProperties, HpmImage,
    RollbackSupport, TargetUpgradeCapabilities,
};
pub use picmg::{PowerLevel, PowerType};
pub use sel::SelEntry;
pub use sensor::{
    EntityId, SdrEntry, SdrKind, SensorDetail, SensorKind, SensorReading, Thresholds,
};
