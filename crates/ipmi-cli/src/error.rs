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

use libipmi::IpmiError;
use thiserror::Error;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_OPTIONS: u8 = 2;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Options(String),

    // The command was recognised but its arguments were not; the caller
    // prints the usage for the command.
    #[error("Invalid arguments")]
    Usage,

    #[error("{0}")]
    Argument(String),
}

/// Prints a failed command's error and returns the process exit code.
///
/// Completion codes and timeouts get a one-line message and an interrupted
/// command prints nothing; all three still exit with `EXIT_OK`. Anything
/// else is printed as `Error: ...` and exits with `EXIT_FAILURE`. With
/// `verbose` the whole report, source chain included, is written to `err`.
pub fn report(
    report: &eyre::Report,
    verbose: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> u8 {
    let ipmi_error = report
        .chain()
        .find_map(|cause| cause.downcast_ref::<IpmiError>());

    let (message, code) = match ipmi_error {
        Some(e @ (IpmiError::CompletionCode(_) | IpmiError::Timeout)) => {
            (Some(e.to_string()), EXIT_OK)
        }
        Some(IpmiError::Interrupted) => (None, EXIT_OK),
        _ => (Some(format!("Error: {report}")), EXIT_FAILURE),
    };

    if let Some(message) = message
        && let Err(e) = writeln!(out, "{message}")
    {
        tracing::debug!("failed to write error message: {e}");
    }
    if verbose && let Err(e) = writeln!(err, "{report:?}") {
        tracing::debug!("failed to write error report: {e}");
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reported(err: eyre::Report) -> (u8, String) {
        let mut out = Vec::new();
        let code = report(&err, false, &mut out, &mut std::io::sink());
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_completion_code_message() {
        let (code, out) = reported(IpmiError::CompletionCode(0xc9).into());
        assert_eq!(code, EXIT_OK);
        assert_eq!(out, "Command returned with completion code 0xc9\n");
    }

    #[test]
    fn test_timeout_message() {
        let (code, out) = reported(IpmiError::Timeout.into());
        assert_eq!(code, EXIT_OK);
        assert_eq!(out, "Command timed out\n");
    }

    #[test]
    fn test_interrupt_is_silent() {
        let (code, out) = reported(IpmiError::Interrupted.into());
        assert_eq!(code, EXIT_OK);
        assert!(out.is_empty());
    }

    #[test]
    fn test_wrapped_completion_code() {
        use eyre::WrapErr;

        let result: Result<(), IpmiError> = Err(IpmiError::CompletionCode(0xcb));
        let err = result.wrap_err("reading sensor").unwrap_err();
        let (_, out) = reported(err);
        assert_eq!(out, "Command returned with completion code 0xcb\n");
    }

    #[test]
    fn test_other_errors() {
        let (code, out) = reported(CliError::Argument("invalid integer literal 'x'".into()).into());
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out, "Error: invalid integer literal 'x'\n");
    }

    #[test]
    fn test_verbose_report_goes_to_err() {
        use eyre::WrapErr;

        let result: Result<(), IpmiError> = Err(IpmiError::Timeout);
        let report_err = result.wrap_err("reading sensor").unwrap_err();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = report(&report_err, true, &mut out, &mut err);
        assert_eq!(code, EXIT_OK);
        assert_eq!(String::from_utf8(out).unwrap(), "Command timed out\n");
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("reading sensor"));
        assert!(err.contains("Command timed out"));

        let mut err = Vec::new();
        report(&report_err, false, &mut Vec::new(), &mut err);
        assert!(err.is_empty());
    }
}
