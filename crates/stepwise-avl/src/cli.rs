//! `avl-steps` — replay key insertions one step at a time.
//!
//! Each key goes through the two phases separately: a plain BST insert, then
//! a rebalance. The binary entry point in `src/bin/avl_steps.rs` only wires
//! argument parsing, logging and stdio to the functions here.

use std::io::Write;
use std::num::ParseIntError;

use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

use crate::avl::AvlTree;
use crate::rotation::Rotation;
use crate::snapshot::TreeSnapshot;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid key {token:?}: {source}")]
    InvalidKey {
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

// ── Arguments ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented tree drawings.
    #[default]
    Text,
    /// One JSON object per key.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "avl-steps", version, about = "Insert keys into an AVL tree and show each rotation")]
pub struct Args {
    /// Integer keys to insert, in order. Read from stdin when omitted.
    #[arg(allow_negative_numbers = true)]
    pub keys: Vec<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "AVL_STEPS_FORMAT")]
    pub format: OutputFormat,

    /// Print only the rotation report of each step.
    #[arg(short, long)]
    pub quiet: bool,

    /// Log verbosity on stderr (-d, -dd, -ddd).
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,
}

/// Parses whitespace-separated tokens as `i64` keys.
pub fn parse_keys<'a, I>(tokens: I) -> Result<Vec<i64>, CliError>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .map(|token| {
            token.parse::<i64>().map_err(|source| CliError::InvalidKey {
                token: token.to_string(),
                source,
            })
        })
        .collect()
}

// ── Session ───────────────────────────────────────────────────────────────

/// Outcome of inserting and rebalancing one key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    pub key: i64,
    pub inserted: bool,
    pub rotation: Option<Rotation<i64>>,
    pub tree: TreeSnapshot<i64>,
}

/// Replays `keys` and writes every step to `out`.
pub fn run<W: Write>(
    keys: &[i64],
    format: OutputFormat,
    quiet: bool,
    out: &mut W,
) -> Result<(), CliError> {
    let mut tree = AvlTree::<i64>::new();
    info!(keys = keys.len(), ?format, "replaying keys");

    for &key in keys {
        let inserted = tree.insert(key);
        if format == OutputFormat::Text && !quiet {
            let note = if inserted { "" } else { " (duplicate ignored)" };
            writeln!(out, "insert {key}{note}")?;
            writeln!(out, "{}", tree.print())?;
        }

        let rotation = tree.rebalance();
        debug!(key, inserted, rotated = rotation.is_some(), "step done");

        match format {
            OutputFormat::Json => {
                let step = Step {
                    key,
                    inserted,
                    rotation,
                    tree: tree.snapshot(),
                };
                serde_json::to_writer(&mut *out, &step)?;
                writeln!(out)?;
            }
            OutputFormat::Text if quiet => {
                let report = match (&rotation, inserted) {
                    (Some(rotation), _) => rotation.to_string(),
                    (None, false) => "duplicate ignored".to_string(),
                    (None, true) => "no rotation".to_string(),
                };
                writeln!(out, "{key}: {report}")?;
            }
            OutputFormat::Text => {
                match &rotation {
                    Some(rotation) => writeln!(out, "{rotation}")?,
                    None => writeln!(out, "no rotation")?,
                }
                writeln!(out, "{}", tree.print())?;
                writeln!(out)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
