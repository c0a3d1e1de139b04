//! # SnipIt CLI
//!
//! The binary is thin: argument parsing, rendering and dispatch live in
//! `src/cli/`, and every operation goes through `snipitapp::api::SnipitApi`.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  CLI (crates/snipit/src/cli/)                │
//! │  - clap parsing (setup.rs)                   │
//! │  - dispatch + context wiring (commands.rs)   │
//! │  - terminal output (render.rs)               │
//! └──────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │  snipitapp::api / commands / store           │
//! │  - no stdout, no prompts, no exit codes      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Logging
//!
//! Library diagnostics are emitted with `tracing` and written to stderr.
//! `SNIPIT_LOG` takes an `EnvFilter` directive (`SNIPIT_LOG=snipitapp=debug`);
//! otherwise `-v`/`-vv` raise and `-q` lowers the default `warn` level.

mod cli;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SNIPIT_LOG";

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var(LOG_ENV) {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = cli::setup::parse_cli();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
