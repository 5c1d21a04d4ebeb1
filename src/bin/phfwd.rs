//! CLI entry point: a stdin-to-stdout/stderr filter over the command
//! language in `SPEC_FULL.md` §6, matching `original_source/src/main.c`'s
//! argument-free, pipe-shaped invocation.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use phonefwd::interpreter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Compressed-trie phone number forwarding engine")]
struct Args {
    /// Overrides RUST_LOG for this run.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = match args.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("ERROR {e}");
        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match interpreter::run(&input, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out.flush().ok();
            eprintln!("{}", e.render());
            ExitCode::FAILURE
        }
    }
}
