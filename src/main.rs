// Keyslot: Operator entry point
//
// Parses CLI arguments, initializes structured logging (values stored in
// the record are never logged), and dispatches to the command handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keyslot::cli::{execute, Cli};

fn main() {
    // RUST_LOG=keyslot=debug shows every store call.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keyslot=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
