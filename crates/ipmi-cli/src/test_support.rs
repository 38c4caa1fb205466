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

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use libipmi::types::{FruInventory, HpmImage, SdrEntry, SelEntry, SensorDetail};
use libipmi::{Ipmi, IpmiError, IpmiResult};

// FakeIpmi answers raw requests from a table keyed by (netfn, cmd, data)
// and record queries from canned values. Unknown raw requests time out.
#[derive(Default)]
pub struct FakeIpmi {
    pub responses: HashMap<(u8, u8, Vec<u8>), Vec<u8>>,
    pub sel: Vec<SelEntry>,
    pub sdrs: Vec<SdrEntry>,
    pub details: Vec<SensorDetail>,
    pub fru: FruInventory,
    pub hpm_image: Option<HpmImage>,
    pub requests: Mutex<Vec<(u8, u8, u8, Vec<u8>)>>,
    pub sessions_closed: Arc<AtomicUsize>,
}

impl FakeIpmi {
    pub fn respond(mut self, netfn: u8, cmd: u8, data: &[u8], rsp: &[u8]) -> Self {
        self.responses
            .insert((netfn, cmd, data.to_vec()), rsp.to_vec());
        self
    }

    pub fn requests(&self) -> Vec<(u8, u8, u8, Vec<u8>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Ipmi for FakeIpmi {
    async fn establish_session(&self) -> IpmiResult<()> {
        Ok(())
    }

    async fn close_session(&self) -> IpmiResult<()> {
        self.sessions_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn raw_command(&self, lun: u8, netfn: u8, cmd: u8, data: &[u8]) -> IpmiResult<Vec<u8>> {
        self.requests
            .lock()
            .unwrap()
            .push((lun, netfn, cmd, data.to_vec()));
        self.responses
            .get(&(netfn, cmd, data.to_vec()))
            .cloned()
            .ok_or(IpmiError::Timeout)
    }

    async fn sel_entries(&self) -> IpmiResult<Vec<SelEntry>> {
        Ok(self.sel.clone())
    }

    async fn sdr_entries(&self) -> IpmiResult<Vec<SdrEntry>> {
        Ok(self.sdrs.clone())
    }

    async fn get_sensor_detail(&self, name: &str) -> IpmiResult<SensorDetail> {
        self.details
            .iter()
            .find(|detail| detail.sensor_id == name)
            .cloned()
            .ok_or_else(|| IpmiError::SensorNotFound(name.to_string()))
    }

    async fn get_fru_inventory(&self, fru_id: u8) -> IpmiResult<FruInventory> {
        match fru_id {
            0 => Ok(self.fru.clone()),
            _ => Err(IpmiError::CompletionCode(0xcb)),
        }
    }

    async fn open_hpm_file(&self, path: &Path) -> IpmiResult<HpmImage> {
        self.hpm_image.clone().ok_or_else(|| {
            IpmiError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                path.display().to_string(),
            ))
        })
    }
}
