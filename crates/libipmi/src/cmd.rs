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
use std::ffi::OsStr;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

#[derive(thiserror::Error, Debug)]
pub enum CmdError {
    #[error("Error running '{0}': {1:#}")]
    RunError(String, String),
    #[error("'{0}' did not finish within {1:?}")]
    Timeout(String, Duration),
    #[error("Subprocess {0} with arguments {1:?} failed with output: {2}")]
    Subprocess(String, Vec<String>, String),
    #[error("Command {0} with args {1:?} produced output that is not valid UTF8")]
    OutputParse(String, Vec<String>),
}

impl CmdError {
    pub fn subprocess_error(command: &std::process::Command, output: &CmdOutput) -> Self {
        let error_details = if output.stderr.is_empty() {
            output.stdout.clone()
        } else {
            output.stderr.clone()
        };

        Self::Subprocess(
            command.get_program().to_string_lossy().to_string(),
            args_of(command),
            error_details.trim().to_string(),
        )
    }

    pub fn output_parse_error(command: &std::process::Command) -> Self {
        Self::OutputParse(
            command.get_program().to_string_lossy().to_string(),
            args_of(command),
        )
    }
}

fn args_of(command: &std::process::Command) -> Vec<String> {
    command
        .get_args()
        .map(|arg| arg.to_string_lossy().to_string())
        .collect::<Vec<String>>()
}

pub type CmdResult<T> = std::result::Result<T, CmdError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CmdOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a subprocess to completion with a deadline.
///
/// The child is killed if the returned future is dropped before it finishes,
/// which is how an interrupted command tears down its ipmitool process.
#[derive(Debug)]
pub struct TokioCmd {
    command: TokioCommand,
    timeout: Duration,
}

impl TokioCmd {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        let mut command = TokioCommand::new(program);
        command.kill_on_drop(true);
        Self {
            command,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command.args(args);
        self
    }

    pub fn env<K, V>(mut self, key: K, value: V) -> Self
    where
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.command.env(key, value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // output_with_timeout captures stdout, stderr and the exit code. A
    // non-zero exit is not an error here; callers classify it.
    pub async fn output_with_timeout(mut self) -> CmdResult<CmdOutput> {
        let child = self
            .command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CmdError::RunError(self.pretty_cmd(), e.to_string()))?;

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CmdError::Timeout(self.pretty_cmd(), self.timeout))?
            .map_err(|e| CmdError::RunError(self.pretty_cmd(), e.to_string()))?;

        Ok(CmdOutput {
            stdout: String::from_utf8(output.stdout)
                .map_err(|_| CmdError::output_parse_error(self.command.as_std()))?,
            stderr: String::from_utf8(output.stderr)
                .map_err(|_| CmdError::output_parse_error(self.command.as_std()))?,
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    pub fn pretty_cmd(&self) -> String {
        let c = self.command.as_std();
        format!(
            "{} {}",
            c.get_program().to_string_lossy(),
            c.get_args()
                .map(|x| x.to_string_lossy())
                .collect::<Vec<std::borrow::Cow<'_, str>>>()
                .join(" ")
        )
    }
}
