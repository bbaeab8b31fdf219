//! Subcommand execution
//!
//! Every command works on a [`RawInput`] handed in by the caller and writes to
//! the given sink, so the process environment and stdout stay in `main`.

use crate::cli::Command;
use anyhow::Context;
use stackgraph_aws::synthesize;
use stackgraph_config::{Configuration, RawInput};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Run one subcommand
///
/// # Errors
/// Configuration or graph errors from synthesis, and I/O errors while writing.
pub fn execute(command: &Command, raw: &RawInput, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Command::Synth { out: path, compact } => synth(raw, path.as_deref(), *compact, out),
        Command::Config => config(raw, out),
        Command::Outputs => outputs(raw, out),
        Command::Graph { dot } => graph(raw, *dot, out),
    }
}

fn synth(
    raw: &RawInput,
    path: Option<&Path>,
    compact: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let stack = synthesize(raw).context("synthesis failed")?;
    let graph = stack.graph();
    let document = if compact {
        graph.to_json_compact()
    } else {
        graph.to_json_pretty()
    };

    match path {
        Some(path) => {
            fs::write(path, format!("{document}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "document written");
        }
        None => writeln!(out, "{document}").context("failed to write document")?,
    }

    tracing::info!(
        declarations = graph.len(),
        outputs = graph.output_count(),
        fingerprint = graph.fingerprint(),
        "synthesis complete"
    );
    Ok(())
}

fn config(raw: &RawInput, out: &mut dyn Write) -> anyhow::Result<()> {
    let configuration = Configuration::resolve(raw).context("invalid configuration")?;
    let rendered = serde_json::to_string_pretty(&configuration.parameters())?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

fn outputs(raw: &RawInput, out: &mut dyn Write) -> anyhow::Result<()> {
    let stack = synthesize(raw).context("synthesis failed")?;
    for output in stack.graph().outputs() {
        writeln!(out, "{} = {}", output.name(), output.expression())?;
    }
    Ok(())
}

fn graph(raw: &RawInput, dot: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let stack = synthesize(raw).context("synthesis failed")?;
    let graph = stack.graph();
    if dot {
        write!(out, "{}", graph.to_dot())?;
        return Ok(());
    }
    for address in graph.creation_order() {
        let section = graph
            .get(address.name())
            .and_then(|d| d.section())
            .map(|s| format!(" [{s}]"))
            .unwrap_or_default();
        writeln!(out, "{address}{section}")?;
    }
    Ok(())
}
