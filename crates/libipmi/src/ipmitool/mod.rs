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

//! An [`Ipmi`] implementation that runs the system `ipmitool` program for
//! every request.

pub mod parse;

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use async_trait::async_trait;

use crate::cmd::{CmdError, CmdOutput, TokioCmd};
use crate::connection::{ConnectionConfig, Ipmi};
use crate::error::{IpmiError, IpmiResult};
use crate::types::{FruInventory, HpmImage, SdrEntry, SelEntry, SensorDetail};

// ipmitool reads the password for -E from this variable, which keeps it
// out of the process list.
pub const PASSWORD_ENV: &str = "IPMITOOL_PASSWORD";

const COMMON_PATHS: [&str; 4] = [
    "ipmitool",
    "/usr/bin/ipmitool",
    "/usr/local/bin/ipmitool",
    "/usr/sbin/ipmitool",
];

#[derive(Debug)]
pub struct IpmitoolConnection {
    program: PathBuf,
    config: ConnectionConfig,
}

impl IpmitoolConnection {
    pub fn new(config: ConnectionConfig) -> IpmiResult<Self> {
        let program = match &config.ipmitool.path {
            Some(path) => path.clone(),
            None => Self::find_ipmitool()?,
        };
        tracing::debug!(program = %program.display(), "using ipmitool");
        Ok(Self { program, config })
    }

    // find_ipmitool searches the usual install locations.
    fn find_ipmitool() -> IpmiResult<PathBuf> {
        for path in &COMMON_PATHS {
            if let Ok(status) = Command::new(path)
                .arg("-V")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                && status.success()
            {
                return Ok(PathBuf::from(path));
            }
        }

        Err(IpmiError::IpmitoolNotFound)
    }

    fn interface(&self) -> &str {
        match (&self.config.ipmitool.interface, &self.config.host) {
            (Some(interface), _) => interface,
            (None, Some(_)) => "lanplus",
            (None, None) => "open",
        }
    }

    // global_args builds the options that precede every ipmitool
    // subcommand.
    pub fn global_args(&self) -> Vec<String> {
        let mut args = vec!["-I".to_string(), self.interface().to_string()];

        if let Some(host) = &self.config.host {
            args.extend(["-H".to_string(), host.clone()]);
            if let Some(port) = self.config.ipmitool.port {
                args.extend(["-p".to_string(), port.to_string()]);
            }
            if !self.config.user.is_empty() {
                args.extend(["-U".to_string(), self.config.user.clone()]);
            }
            args.push("-E".to_string());
        }

        if let Some(cipher) = self.config.ipmitool.cipher_suite {
            args.extend(["-C".to_string(), cipher.to_string()]);
        }

        let target = &self.config.target;
        if target.is_bridged() {
            args.extend([
                "-t".to_string(),
                format!("0x{:02x}", target.address),
                "-b".to_string(),
                target.channel().to_string(),
            ]);
        }

        args
    }

    async fn run(&self, args: &[&str]) -> IpmiResult<CmdOutput> {
        let cmd = TokioCmd::new(&self.program)
            .args(self.global_args())
            .args(args)
            .env(PASSWORD_ENV, self.config.password.as_str())
            .timeout(self.config.timeout);

        tracing::debug!("Running command: {}", cmd.pretty_cmd());
        let output = cmd.output_with_timeout().await.map_err(|e| match e {
            CmdError::Timeout(..) => IpmiError::Timeout,
            other => IpmiError::Command(other),
        })?;
        tracing::trace!(?output, "ipmitool finished");
        Ok(output)
    }

    // run_checked returns stdout of a successful run and the classified
    // failure otherwise.
    async fn run_checked(&self, args: &[&str]) -> IpmiResult<String> {
        let output = self.run(args).await?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(self.classify_failure(args, &output))
        }
    }

    fn classify_failure(&self, args: &[&str], output: &CmdOutput) -> IpmiError {
        let text = format!("{}\n{}", output.stderr, output.stdout);

        if let Some(cc) = parse::completion_code(&text) {
            return IpmiError::CompletionCode(cc);
        }
        if text.contains("Unable to establish") || text.contains("Activate Session") {
            return IpmiError::Session {
                host: self.config.host.clone().unwrap_or_default(),
                reason: output.stderr.trim().to_string(),
            };
        }
        // A raw request that got no response at all is reported without a
        // completion code.
        if text.contains("Unable to send RAW command") || text.contains("No response") {
            return IpmiError::Timeout;
        }

        let mut command = Command::new(&self.program);
        command.args(self.global_args()).args(args);
        IpmiError::Command(CmdError::subprocess_error(&command, output))
    }
}

#[async_trait]
impl Ipmi for IpmitoolConnection {
    async fn establish_session(&self) -> IpmiResult<()> {
        let Some(host) = &self.config.host else {
            return Ok(());
        };
        // ipmitool opens a session per invocation; a Get Device ID proves
        // the credentials and cipher suite work before the real command runs.
        self.get_device_id().await.map_err(|e| match e {
            IpmiError::Command(err) => IpmiError::Session {
                host: host.clone(),
                reason: err.to_string(),
            },
            other => other,
        })?;
        tracing::debug!(%host, user = %self.config.user, "session established");
        Ok(())
    }

    async fn close_session(&self) -> IpmiResult<()> {
        if let Some(host) = &self.config.host {
            tracing::debug!(%host, "session closed");
        }
        Ok(())
    }

    async fn raw_command(&self, lun: u8, netfn: u8, cmd: u8, data: &[u8]) -> IpmiResult<Vec<u8>> {
        let mut owned = Vec::with_capacity(data.len() + 5);
        if lun != 0 {
            owned.extend(["-l".to_string(), lun.to_string()]);
        }
        owned.push("raw".to_string());
        owned.extend(
            [netfn, cmd]
                .iter()
                .chain(data)
                .map(|b| format!("0x{b:02x}")),
        );
        let args: Vec<&str> = owned.iter().map(String::as_str).collect();

        let output = self.run(&args).await?;
        if output.success() {
            let mut rsp = vec![0x00];
            rsp.extend(parse::raw_response(&output.stdout)?);
            return Ok(rsp);
        }

        match self.classify_failure(&args, &output) {
            IpmiError::CompletionCode(cc) => Ok(vec![cc]),
            other => Err(other),
        }
    }

    async fn sel_entries(&self) -> IpmiResult<Vec<SelEntry>> {
        let stdout = self.run_checked(&["sel", "list"]).await?;
        parse::sel_list(&stdout)
    }

    async fn sdr_entries(&self) -> IpmiResult<Vec<SdrEntry>> {
        let stdout = self.run_checked(&["sdr", "elist", "all"]).await?;
        parse::sdr_elist(&stdout)
    }

    async fn get_sensor_detail(&self, name: &str) -> IpmiResult<SensorDetail> {
        let output = self.run(&["sensor", "get", name]).await?;
        if !output.success() {
            if output.stderr.contains("not found") || output.stdout.contains("not found") {
                return Err(IpmiError::SensorNotFound(name.to_string()));
            }
            return Err(self.classify_failure(&["sensor", "get", name], &output));
        }
        parse::sensor_get(&output.stdout)
    }

    async fn get_fru_inventory(&self, fru_id: u8) -> IpmiResult<FruInventory> {
        let fru_id = fru_id.to_string();
        let stdout = self.run_checked(&["fru", "print", fru_id.as_str()]).await?;
        Ok(parse::fru_print(&stdout))
    }

    async fn open_hpm_file(&self, path: &Path) -> IpmiResult<HpmImage> {
        // ipmitool's own message for a missing file is not distinguishable
        // from a bad image.
        tokio::fs::metadata(path).await?;
        let path = path.to_string_lossy();
        let stdout = self.run_checked(&["hpm", "check", &*path]).await?;
        Ok(parse::hpm_check(&stdout))
    }
}
