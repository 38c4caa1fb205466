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

//! FRU inventory as reported by the protocol engine. Every field is kept as
//! the text the engine produced; absent fields are empty.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChassisInfoArea {
    pub chassis_type: String,
    pub part_number: String,
    pub serial_number: String,
    pub custom_chassis_info: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardInfoArea {
    pub mfg_date: String,
    pub manufacturer: String,
    pub product_name: String,
    pub serial_number: String,
    pub part_number: String,
    pub fru_file_id: String,
    pub custom_mfg_info: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductInfoArea {
    pub manufacturer: String,
    pub name: String,
    pub part_number: String,
    pub version: String,
    pub serial_number: String,
    pub asset_tag: String,
    pub fru_file_id: String,
    pub custom_mfg_info: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultirecordArea {
    pub records: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FruInventory {
    pub chassis_info_area: Option<ChassisInfoArea>,
    pub board_info_area: Option<BoardInfoArea>,
    pub product_info_area: Option<ProductInfoArea>,
    pub multirecord_area: Option<MultirecordArea>,
}

impl FruInventory {
    pub fn is_empty(&self) -> bool {
        self.chassis_info_area.is_none()
            && self.board_info_area.is_none()
            && self.product_info_area.is_none()
            && self.multirecord_area.is_none()
    }
}
