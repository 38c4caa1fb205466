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

// Drives IpmitoolConnection against a stand-in ipmitool script that
// answers a fixed set of requests.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use libipmi::types::{ChassisControl, PowerType, SdrKind, SensorKind};
use libipmi::{ConnectionConfig, IpmiError, IpmitoolOptions, open};

const SCRIPT: &str = r#"#!/bin/sh
case "$*" in
  *"raw 0x06 0x01")
    if [ -n "$IPMITOOL_PASSWORD" ] && [ "$IPMITOOL_PASSWORD" != "secret" ]; then
      echo "Error: Unable to establish IPMI v2 / RMCP+ session" >&2
      exit 1
    fi
    echo " 20 81 01 12 02 9f 57 01 00 43 00"
    ;;
  *"raw 0x06 0x02")
    echo "Unable to send RAW command (channel=0x0 netfn=0x6 lun=0x0 cmd=0x2 rsp=0xc1): Invalid command" >&2
    exit 1
    ;;
  *"raw 0x06 0x03")
    echo "Unable to send RAW command (channel=0x0 netfn=0x6 lun=0x0 cmd=0x3)" >&2
    exit 1
    ;;
  *"-l 1 raw 0x30 0x01 0xaa")
    echo " 11 22"
    ;;
  *"raw 0x00 0x02 0x05")
    ;;
  *"raw 0x04 0x2d 0x30")
    echo " 2d c0 00 00"
    ;;
  *"raw 0x2c 0x12 0x00 0x00 0x00")
    echo " 00 81 00 0a 05 14"
    ;;
  *"sel list")
    echo "   1 | 04/01/2025 | 10:00:00 | Temperature #0x30 | Upper Critical going high | Asserted"
    ;;
  *"sdr elist all")
    echo "CPU Temp         | 30h | ok  |  3.1 | 45 degrees C"
    echo "PS1 Status       | c8h | ok  | 10.1 | Presence detected"
    echo "BMC              | 00h | ok  |  7.1 | Dynamic MC @ 20h"
    ;;
  *"sensor get CPU Temp")
    echo "Sensor ID              : CPU Temp (0x30)"
    echo " Sensor Type (Threshold)  : Temperature"
    echo " Upper Critical        : 90.000"
    ;;
  *"sensor get"*)
    echo "Sensor data record not found!" >&2
    exit 1
    ;;
  *"fru print 0")
    echo " Board Mfg             : NVIDIA"
    echo " Board Product         : Carrier"
    ;;
  *"hpm check"*)
    echo "Validating firmware image integrity...OK"
    echo ""
    echo "Upgrade component 0"
    ;;
  *)
    echo "unexpected arguments: $*" >&2
    exit 1
    ;;
esac
"#;

struct FakeIpmitool {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

static FAKE_IPMITOOL: LazyLock<FakeIpmitool> = LazyLock::new(|| {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ipmitool");
    {
        let mut file = fs::File::create(&path).expect("create script");
        file.write_all(SCRIPT.as_bytes()).expect("write script");
        file.sync_all().expect("sync script");
    }
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
    FakeIpmitool { _dir: dir, path }
});

fn config() -> ConnectionConfig {
    ConnectionConfig {
        ipmitool: IpmitoolOptions {
            path: Some(FAKE_IPMITOOL.path.clone()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_get_device_id() {
    let ipmi = open(config()).unwrap();
    let id = ipmi.get_device_id().await.unwrap();
    assert_eq!(id.device_id, 0x20);
    assert_eq!(id.manufacturer_id, 0x0157);
}

#[tokio::test]
async fn test_completion_code_is_an_error_for_typed_commands() {
    let ipmi = open(config()).unwrap();
    let err = ipmi.cold_reset().await.unwrap_err();
    assert_eq!(err.completion_code(), Some(0xc1));
}

#[tokio::test]
async fn test_completion_code_is_data_for_raw_commands() {
    let ipmi = open(config()).unwrap();
    let rsp = ipmi.raw_command(0, 0x06, 0x02, &[]).await.unwrap();
    assert_eq!(rsp, vec![0xc1]);
}

#[tokio::test]
async fn test_no_response_is_timeout() {
    let ipmi = open(config()).unwrap();
    let err = ipmi.warm_reset().await.unwrap_err();
    assert!(matches!(err, IpmiError::Timeout));
}

#[tokio::test]
async fn test_raw_with_lun() {
    let ipmi = open(config()).unwrap();
    let rsp = ipmi.raw_command(1, 0x30, 0x01, &[0xaa]).await.unwrap();
    assert_eq!(rsp, vec![0x00, 0x11, 0x22]);
}

#[tokio::test]
async fn test_chassis_and_sensor_and_power() {
    let ipmi = open(config()).unwrap();
    ipmi.chassis_control(ChassisControl::SoftShutdown)
        .await
        .unwrap();

    let reading = ipmi.get_sensor_reading(0x30).await.unwrap();
    assert_eq!(reading.raw, Some(0x2d));

    let level = ipmi.get_power_level(0, PowerType::SteadyState).await.unwrap();
    assert_eq!(level.power_level, 1);
    assert_eq!(level.power_draw, vec![5, 20]);
}

#[tokio::test]
async fn test_record_queries() {
    let ipmi = open(config()).unwrap();

    let sel = ipmi.sel_entries().await.unwrap();
    assert_eq!(sel.len(), 1);
    assert_eq!(sel[0].event, "Upper Critical going high");

    let sdrs = ipmi.sdr_entries().await.unwrap();
    assert_eq!(sdrs.len(), 3);
    assert_eq!(sdrs[1].sensor_number, 0xc8);
    assert_eq!(sdrs[2].kind, SdrKind::McLocator);

    let detail = ipmi.get_sensor_detail("CPU Temp").await.unwrap();
    assert_eq!(detail.kind, SensorKind::Threshold);
    assert_eq!(detail.thresholds.ucr.as_deref(), Some("90.000"));

    let err = ipmi.get_sensor_detail("Fan 9").await.unwrap_err();
    assert!(matches!(err, IpmiError::SensorNotFound(name) if name == "Fan 9"));

    let fru = ipmi.get_fru_inventory(0).await.unwrap();
    assert_eq!(fru.board_info_area.unwrap().product_name, "Carrier");
}

#[tokio::test]
async fn test_hpm_check() {
    let ipmi = open(config()).unwrap();

    let image = tempfile::NamedTempFile::new().unwrap();
    let report = ipmi.open_hpm_file(image.path()).await.unwrap();
    assert_eq!(report.header, "Validating firmware image integrity...OK");
    assert_eq!(report.actions, vec!["Upgrade component 0"]);

    let err = ipmi
        .open_hpm_file(Path::new("/nonexistent/image.hpm"))
        .await
        .unwrap_err();
    assert!(matches!(err, IpmiError::Io(_)));
}

#[tokio::test]
async fn test_session_establishment() {
    let ipmi = open(ConnectionConfig {
        host: Some("10.0.0.5".to_string()),
        user: "admin".to_string(),
        password: "secret".to_string(),
        ..config()
    })
    .unwrap();
    ipmi.establish_session().await.unwrap();
    ipmi.close_session().await.unwrap();

    let ipmi = open(ConnectionConfig {
        host: Some("10.0.0.5".to_string()),
        user: "admin".to_string(),
        password: "wrong".to_string(),
        ..config()
    })
    .unwrap();
    let err = ipmi.establish_session().await.unwrap_err();
    assert!(matches!(err, IpmiError::Session { host, .. } if host == "10.0.0.5"));
}
