//! stackgraph command line
//!
//! Thin front end over [`stackgraph_aws::synthesize`]: loads an optional
//! dotenv file, reads the environment once, and prints the artifact or one of
//! its inspection views.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::execute;

use anyhow::Context;
use std::path::Path;

/// Load a dotenv file into the process environment
///
/// An explicit path must exist. Without one, `.env` in the working directory
/// is loaded when present. Variables already set are never overridden.
///
/// # Errors
/// The explicit file is missing, or any file found is malformed.
pub fn load_env_file(path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
            tracing::debug!(path = %path.display(), "env file loaded");
            Ok(())
        }
        None => {
            let cwd = std::env::current_dir().context("failed to read working directory")?;
            load_default_env_file(&cwd)
        }
    }
}

/// Load `dir/.env` when it exists
///
/// # Errors
/// The file exists but cannot be read or parsed. Lines before a malformed one
/// may already be applied, so callers must not continue after an error.
pub fn load_default_env_file(dir: &Path) -> anyhow::Result<()> {
    let path = dir.join(".env");
    match dotenvy::from_path(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "env file loaded");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to load {}", path.display())),
    }
}
