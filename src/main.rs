// SPDX-License-Identifier: MIT

//! Command-line surface for `sdcage`.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use sdcage::{IsolationLevel, LaunchRequest, launch};
use tracing_subscriber::EnvFilter;

/// Run a program in a confined systemd scope, always as the invoking user.
#[derive(Parser, Debug)]
#[command(name = "sdcage", version, about)]
struct Cli {
    /// How isolated the process should be: "strict" or "relaxed".
    #[arg(long, default_value_t)]
    isolation: IsolationLevel,

    /// Whether the spawned process attaches the terminal. Pass false for
    /// GUI programs so they do not hold the shell that launched them.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    tty: bool,

    /// Program to run, resolved via the search path.
    program: OsString,

    /// Arguments for the program, passed through verbatim.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let request = LaunchRequest {
        program: cli.program,
        args: cli.args,
        isolation: cli.isolation,
        attach_tty: cli.tty,
    };

    // launch() returns only on failure; on success the executor has
    // replaced this process and there is no code left to run.
    let err = match launch(&request) {
        Ok(never) => match never {},
        Err(err) => err,
    };
    eprintln!("sdcage: {:#}", anyhow::Error::new(err));
    ExitCode::FAILURE
}
