//! Extract command - hoist hardcoded Chinese text into label modules.
//!
//! Dry-run by default: scanning, key derivation, and binding resolution all
//! run, but nothing is written; each would-be replacement is reported as
//! `L<line>: '<text>' -> <alias>.<key>`. Use `--apply` to write label stores
//! and rewrite sources.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::super::{args::ExtractCommand, exit_status::ExitStatus, report};
use crate::{config::load_config, core::pipeline::run_batch, discovery::discover_files};

pub fn extract(cmd: ExtractCommand, verbose: bool) -> Result<ExitStatus> {
    let args = &cmd.args;

    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    let mut config = load_config(&cwd)?.config;
    if let Some(root) = &args.common.source_root {
        config.source_root = root.to_string_lossy().into_owned();
    }

    let files: Vec<PathBuf> = if args.paths.is_empty() {
        discover_files(&config, verbose)
    } else {
        args.paths.clone()
    };

    let batch = run_batch(&files, &config, args.apply)?;

    if batch.processed == 0 {
        report::print_no_matches(files.len());
        return Ok(ExitStatus::Success);
    }

    if args.apply {
        for outcome in &batch.outcomes {
            report::print_applied_file(outcome);
        }
        report::print_total(batch.processed);
    } else {
        for outcome in &batch.outcomes {
            let source = fs::read_to_string(&outcome.file_path).ok();
            report::print_dry_run_file(outcome, source.as_deref(), verbose);
        }
        report::print_dry_run_summary(&batch);
    }

    Ok(ExitStatus::Success)
}
