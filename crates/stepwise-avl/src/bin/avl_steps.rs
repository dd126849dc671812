//! `avl-steps` — replay key insertions into an AVL tree.
//!
//! Usage:
//!   avl-steps [--format text|json] [--quiet] [-d...] [KEYS...]
//!
//! Keys are read from stdin when none are given on the command line.

use std::io::{self, Read};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stepwise_avl::cli::{parse_keys, run, Args, CliError};

fn main() {
    let args = Args::parse();
    setup_logging(args.debug);

    if let Err(e) = execute(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn execute(args: &Args) -> Result<(), CliError> {
    let keys = if args.keys.is_empty() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        parse_keys(buf.split_whitespace())?
    } else {
        parse_keys(args.keys.iter().map(String::as_str))?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&keys, args.format, args.quiet, &mut out)
}

/// `RUST_LOG` wins over the `-d` count when set.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
