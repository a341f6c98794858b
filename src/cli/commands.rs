// Keyslot: CLI Command Handlers
//
// Each arm of `run` handles one subcommand against a `CredentialRecord`.
// The CLI uses the explicit `try_*` / `lookup_*` API so operators see store
// failures instead of silent defaults.

use std::io::Write;

use chrono::{DateTime, Utc};

use crate::accessor::CredentialRecord;
use crate::backend::RecordStore;
use crate::config::RecordConfig;
use crate::error::KeyslotError;
use crate::record::{AttributeMap, AttributeValue, Lookup, RecordState};

use super::{Cli, Commands, ValueArgs};

/// Execute the parsed CLI against the platform keyring, printing to stdout.
pub fn execute(cli: Cli) -> Result<(), KeyslotError> {
    let mut config = RecordConfig::default().with_env_overrides();
    if let Some(service) = cli.service {
        config.service = service;
    }
    if let Some(account) = cli.account {
        config.account = account;
    }

    let record = CredentialRecord::keyring(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&record, cli.command, &mut out)
}

/// Execute one command against `record`, writing human output to `out`.
pub fn run<S: RecordStore, W: Write>(
    record: &CredentialRecord<S>,
    command: Commands,
    out: &mut W,
) -> Result<(), KeyslotError> {
    match command {
        Commands::State => {
            let state = match record.state()? {
                RecordState::Present => "present",
                RecordState::Absent => "absent",
            };
            writeln!(out, "Record {}: {}", record.id(), state)?;
        }
        Commands::Dump => match record.try_raw_data()? {
            Lookup::Found(attributes) => {
                writeln!(out, "{}", serde_json::to_string_pretty(&attributes)?)?;
            }
            Lookup::NotFound => writeln!(out, "{{}}")?,
            Lookup::DecodeError(reason) => {
                return Err(KeyslotError::Other(format!(
                    "Record {} did not decode: {}",
                    record.id(),
                    reason
                )));
            }
        },
        Commands::Get { key } => match record.lookup_value(&key)? {
            Lookup::Found(value) => {
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            }
            Lookup::NotFound => writeln!(out, "Key not found: {}", key)?,
            Lookup::DecodeError(reason) => {
                return Err(KeyslotError::Other(format!("Could not read '{}': {}", key, reason)));
            }
        },
        Commands::Set { key, value } => {
            let value = value_from_args(&value)?;
            let kind = value.kind();
            record.try_set(&key, value)?;
            writeln!(out, "✓ Stored {} value under '{}'", kind, key)?;
        }
        Commands::Remove { key } => {
            if record.try_remove(&key)? {
                writeln!(out, "✓ Removed '{}'", key)?;
            } else {
                writeln!(out, "Key not found: {}", key)?;
            }
        }
        Commands::Import { path } => {
            let contents = std::fs::read_to_string(&path)?;
            let attributes: AttributeMap = serde_json::from_str(&contents)?;
            record.try_set_raw_data(&attributes)?;
            writeln!(out, "✓ Imported {} keys from {}", attributes.len(), path.display())?;
        }
        Commands::Reset => {
            record.try_reset()?;
            writeln!(out, "✓ Record {} reset", record.id())?;
        }
    }

    Ok(())
}

/// Build the value for `set` from whichever flag was given.
pub fn value_from_args(args: &ValueArgs) -> Result<AttributeValue, KeyslotError> {
    if let Some(b) = args.as_bool {
        return Ok(AttributeValue::Bool(b));
    }
    if let Some(s) = &args.as_string {
        return Ok(AttributeValue::String(s.clone()));
    }
    if let Some(raw) = &args.as_date {
        let date = DateTime::parse_from_rfc3339(raw)
            .map_err(|e| KeyslotError::Other(format!("Invalid date '{}': {}", raw, e)))?;
        return Ok(AttributeValue::Date(date.with_timezone(&Utc)));
    }
    if let Some(raw) = &args.as_json {
        return Ok(serde_json::from_str(raw)?);
    }
    Err(KeyslotError::Other("No value given".to_string()))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
