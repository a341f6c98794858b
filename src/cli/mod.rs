// Keyslot: CLI Module
//
// Operator tool for inspecting and editing the keyring-backed record.
// Subcommands: state, dump, get, set, remove, import, reset.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub use commands::{execute, run, value_from_args};

/// Keyslot: typed access to a single record in the platform credential store.
#[derive(Parser, Debug)]
#[command(name = "keyslot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Service name of the record (overrides KEYSLOT_SERVICE).
    #[arg(long, global = true)]
    pub service: Option<String>,

    /// Account name of the record (overrides KEYSLOT_ACCOUNT).
    #[arg(long, global = true)]
    pub account: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report whether the record exists, without creating it.
    State,

    /// Print the whole attribute mapping as JSON.
    Dump,

    /// Print the value stored under a key.
    Get {
        key: String,
    },

    /// Store a value under a key.
    Set {
        key: String,

        #[command(flatten)]
        value: ValueArgs,
    },

    /// Remove a key from the record.
    Remove {
        key: String,
    },

    /// Replace the whole record with the mapping in a JSON file (as printed by `dump`).
    Import {
        path: PathBuf,
    },

    /// Discard the record and recreate it empty.
    Reset,
}

/// Exactly one value source for `set`.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ValueArgs {
    /// A boolean value.
    #[arg(long = "bool")]
    pub as_bool: Option<bool>,

    /// A string value.
    #[arg(long = "string")]
    pub as_string: Option<String>,

    /// An RFC 3339 timestamp (e.g., "2024-03-01T12:30:00Z").
    #[arg(long = "date")]
    pub as_date: Option<String>,

    /// A tagged JSON value (e.g., '{"kind": "array", "value": []}').
    #[arg(long = "json")]
    pub as_json: Option<String>,
}
