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

mod commands;
mod error;
mod help;
mod options;
#[cfg(test)]
mod test_support;

use std::ffi::OsStr;
use std::io::{self, Write};
use std::process::ExitCode;

use libipmi::{ConnectionConfig, Ipmi, IpmiError, IpmiResult};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

use crate::commands::Invocation;
use crate::error::{CliError, EXIT_FAILURE, EXIT_OK, EXIT_OPTIONS};
use crate::options::{Action, Opts};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Vec<_> = std::env::args_os().skip(1).collect();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let code = run(
        &args,
        &mut stdout,
        &mut stderr,
        init_logging,
        libipmi::open,
        tokio::signal::ctrl_c(),
    )
    .await;
    ExitCode::from(code)
}

// init_logging sends log events to stderr. RUST_LOG takes precedence over
// the -v flag.
fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(env_filter);

    if let Err(e) = tracing_subscriber::registry().with(console_layer).try_init() {
        eprintln!("Failed to initialize logging: {e}");
    }
}

fn usage_exit<S: AsRef<str>>(out: &mut dyn Write, words: &[S], code: u8) -> u8 {
    match help::usage(out, words) {
        Ok(()) => code,
        Err(_) => EXIT_FAILURE,
    }
}

fn option_error(out: &mut dyn Write, error: &CliError) -> u8 {
    if writeln!(out, "{error}").is_err() {
        return EXIT_FAILURE;
    }
    usage_exit::<&str>(out, &[], EXIT_OPTIONS)
}

/// Runs one command line and returns the exit code. `open` builds the
/// connection once the command has been resolved, and the command is
/// abandoned if `interrupt` completes first.
async fn run<S, L, O, I>(
    args: &[S],
    out: &mut dyn Write,
    err: &mut dyn Write,
    init_logging: L,
    open: O,
    interrupt: I,
) -> u8
where
    S: AsRef<OsStr>,
    L: FnOnce(bool),
    O: FnOnce(ConnectionConfig) -> IpmiResult<Box<dyn Ipmi>>,
    I: Future<Output = io::Result<()>>,
{
    let opts = match Opts::parse(args) {
        Ok(opts) => opts,
        Err(e) => return option_error(out, &e),
    };

    match opts.action {
        Action::Help => return usage_exit(out, &opts.words, EXIT_OK),
        Action::Version => {
            return match writeln!(out, "{}", help::version()) {
                Ok(()) => EXIT_OK,
                Err(_) => EXIT_FAILURE,
            };
        }
        Action::Run => {}
    }

    if opts.words.is_empty() {
        return usage_exit::<&str>(out, &[], EXIT_FAILURE);
    }

    init_logging(opts.verbose);

    let Some(invocation) = commands::resolve(&opts.words) else {
        return usage_exit(out, &opts.words, EXIT_FAILURE);
    };

    let config = match opts.connection_config() {
        Ok(config) => config,
        Err(e) => return option_error(out, &e),
    };
    tracing::debug!(?config, "connection configuration");

    match execute(&invocation, config, out, open, interrupt).await {
        Ok(()) => EXIT_OK,
        Err(report) if matches!(report.downcast_ref::<CliError>(), Some(CliError::Usage)) => {
            let name: Vec<&str> = invocation.name.split(' ').collect();
            usage_exit(out, &name, EXIT_FAILURE)
        }
        Err(report) => error::report(&report, opts.verbose, out, err),
    }
}

async fn execute<O, I>(
    invocation: &Invocation<'_>,
    config: ConnectionConfig,
    out: &mut dyn Write,
    open: O,
    interrupt: I,
) -> eyre::Result<()>
where
    O: FnOnce(ConnectionConfig) -> IpmiResult<Box<dyn Ipmi>>,
    I: Future<Output = io::Result<()>>,
{
    let has_session = config.host.is_some();
    let ipmi = open(config)?;

    let result = tokio::select! {
        biased;
        Ok(()) = interrupt => Err(IpmiError::Interrupted.into()),
        result = dispatch(ipmi.as_ref(), invocation, out) => result,
    };

    if has_session && let Err(e) = ipmi.close_session().await {
        tracing::warn!("Failed to close session: {e}");
    }
    result
}

async fn dispatch(
    ipmi: &dyn Ipmi,
    invocation: &Invocation<'_>,
    out: &mut dyn Write,
) -> eyre::Result<()> {
    ipmi.establish_session().await?;
    commands::run(ipmi, invocation.command, invocation.args, out).await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::test_support::FakeIpmi;

    const DEVICE_ID: [u8; 12] = [
        0x00, 0x20, 0x81, 0x01, 0x12, 0x02, 0x9f, 0x57, 0x01, 0x00, 0x43, 0x00,
    ];

    async fn run_until<I>(args: &[&str], ipmi: FakeIpmi, interrupt: I) -> (u8, String)
    where
        I: Future<Output = io::Result<()>>,
    {
        let mut out = Vec::new();
        let code = run(
            args,
            &mut out,
            &mut io::sink(),
            |_| {},
            move |_| Ok(Box::new(ipmi) as Box<dyn Ipmi>),
            interrupt,
        )
        .await;
        (code, String::from_utf8(out).unwrap())
    }

    async fn run_with(args: &[&str], ipmi: FakeIpmi) -> (u8, String) {
        run_until(args, ipmi, std::future::pending::<io::Result<()>>()).await
    }

    async fn run_args(args: &[&str]) -> (u8, String) {
        run_with(args, FakeIpmi::default()).await
    }

    #[tokio::test]
    async fn test_missing_command() {
        let (code, out) = run_args(&[]).await;
        assert_eq!(code, 1);
        assert!(out.contains("usage: carbide-ipmi [options...] <command>"));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let (code, out) = run_args(&["frobnicate"]).await;
        assert_eq!(code, 1);
        assert!(out.contains("Commands:"));

        let (code, out) = run_args(&["bmc", "reset"]).await;
        assert_eq!(code, 1);
        assert_eq!(out, "  bmc reset <cold|warm>   BMC reset control\n");
    }

    #[tokio::test]
    async fn test_option_errors() {
        let (code, out) = run_args(&["-x", "bmc", "info"]).await;
        assert_eq!(code, 2);
        assert!(out.starts_with("Unrecognized option: 'x'\n"));
        assert!(out.contains("Options:"));

        let (code, _) = run_args(&["-o", "port=many", "bmc", "info"]).await;
        assert_eq!(code, 2);

        let (code, _) = run_args(&["-r", "0x20", "bmc", "info"]).await;
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_help_and_version() {
        let (code, out) = run_args(&["-h", "hpm"]).await;
        assert_eq!(code, 0);
        assert!(out.contains("hpm check <file>"));
        assert!(!out.contains("Options:"));

        let (code, out) = run_args(&["-V"]).await;
        assert_eq!(code, 0);
        assert_eq!(out, format!("carbide-ipmi v{}\n", env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_successful_command() {
        let ipmi = FakeIpmi::default().respond(0x06, 0x01, &[], &DEVICE_ID);
        let (code, out) = run_with(&["bmc", "info"], ipmi).await;
        assert_eq!(code, 0);
        assert!(out.starts_with("Device ID:          32\n"));
    }

    #[tokio::test]
    async fn test_completion_code_failure() {
        let ipmi = FakeIpmi::default().respond(0x06, 0x02, &[], &[0xc1]);
        let (code, out) = run_with(&["bmc", "reset", "cold"], ipmi).await;
        assert_eq!(code, 0);
        assert_eq!(out, "Command returned with completion code 0xc1\n");
    }

    #[tokio::test]
    async fn test_timeout_failure() {
        let (code, out) = run_args(&["chassis", "power", "on"]).await;
        assert_eq!(code, 0);
        assert_eq!(out, "Command timed out\n");
    }

    #[tokio::test]
    async fn test_handler_usage() {
        let (code, out) = run_args(&["sdr", "show"]).await;
        assert_eq!(code, 1);
        assert_eq!(out, "  sdr show <sdr-id>   Show a single SDR and its reading\n");
    }

    #[tokio::test]
    async fn test_open_failure() {
        let mut out = Vec::new();
        let code = run(
            &["-I", "aardvark", "bmc", "info"],
            &mut out,
            &mut io::sink(),
            |_| {},
            libipmi::open,
            std::future::pending::<io::Result<()>>(),
        )
        .await;
        assert_eq!(code, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: Interface 'aardvark' is not available\n"
        );
    }

    #[tokio::test]
    async fn test_session_closed_after_command() {
        let ipmi = FakeIpmi::default().respond(0x06, 0x01, &[], &DEVICE_ID);
        let closed = ipmi.sessions_closed.clone();
        let (code, _) = run_with(&["-H", "10.0.0.5", "bmc", "info"], ipmi).await;
        assert_eq!(code, 0);
        assert_eq!(closed.load(Ordering::SeqCst), 1);

        let ipmi = FakeIpmi::default();
        let closed = ipmi.sessions_closed.clone();
        let (code, out) = run_with(&["-H", "10.0.0.5", "bmc", "info"], ipmi).await;
        assert_eq!(code, 0);
        assert_eq!(out, "Command timed out\n");
        assert_eq!(closed.load(Ordering::SeqCst), 1);

        let ipmi = FakeIpmi::default().respond(0x06, 0x01, &[], &DEVICE_ID);
        let closed = ipmi.sessions_closed.clone();
        run_with(&["bmc", "info"], ipmi).await;
        assert_eq!(closed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_interrupt_closes_session() {
        let ipmi = FakeIpmi::default().respond(0x06, 0x01, &[], &DEVICE_ID);
        let closed = ipmi.sessions_closed.clone();
        let (code, out) = run_until(
            &["-H", "10.0.0.5", "bmc", "info"],
            ipmi,
            std::future::ready(Ok::<(), io::Error>(())),
        )
        .await;
        assert_eq!(code, 0);
        assert!(out.is_empty());
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_interrupt_handler_is_ignored() {
        let ipmi = FakeIpmi::default().respond(0x06, 0x01, &[], &DEVICE_ID);
        let (code, out) = run_until(
            &["bmc", "info"],
            ipmi,
            std::future::ready(Err::<(), _>(io::Error::other("no signal handler"))),
        )
        .await;
        assert_eq!(code, 0);
        assert!(out.starts_with("Device ID:          32\n"));
    }
}
