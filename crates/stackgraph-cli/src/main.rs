//! stackgraph binary

use clap::Parser;
use stackgraph_cli::{execute, load_env_file, Cli};
use stackgraph_config::RawInput;
use std::process::ExitCode;

fn main() -> ExitCode {
    // stdout carries only the artifact
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = load_env_file(cli.env_file.as_deref()).and_then(|()| {
        let raw = RawInput::from_env();
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        execute(&cli.command, &raw, &mut out)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
