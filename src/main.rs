//! Command host binary for `taskdeck`.
//!
//! Reads one command per line from stdin and delegates to the library.

use std::process::ExitCode;

use clap::Parser;
use taskdeck::cli::{Cli, Repl};
use taskdeck::TaskEngine;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = match cli.load_config().and_then(TaskEngine::new) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let mut repl = Repl::new(engine, cli.json);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let output = repl.execute_line(&line).await;
                for msg in output.stdout {
                    println!("{msg}");
                }
                for msg in output.stderr {
                    eprintln!("{msg}");
                }
                if repl.is_finished() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error reading stdin: {e}");
                return ExitCode::from(1);
            }
        }
    }

    ExitCode::SUCCESS
}
