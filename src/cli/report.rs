//! Console output for extraction runs.
//!
//! Separate from core logic so hanlift can be used as a library.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::data::{BatchOutcome, FileOutcome, PlannedReplacement};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Per-file success marker printed in apply mode.
pub fn print_applied_file(outcome: &FileOutcome) {
    println!("  {} {}", SUCCESS_MARK.green(), outcome.file_path.display());
}

/// Final processed-file count.
pub fn print_total(processed: usize) {
    println!();
    println!("Total: {} files processed", processed);
}

/// Dry-run preview for one file: one `L<line>: '<text>' -> <alias>.<key>`
/// row per would-be replacement.
pub fn print_dry_run_file(outcome: &FileOutcome, source: Option<&str>, verbose: bool) {
    println!("{}", outcome.file_path.display().to_string().bold());
    for replacement in &outcome.replacements {
        println!(
            "  L{}: '{}' -> {}.{}",
            replacement.line,
            replacement.text,
            replacement.alias,
            replacement.key.cyan()
        );
        if verbose {
            if let Some(content) = source {
                print_source_context(content, replacement);
            }
        }
    }
}

/// Show the source line with a caret under the literal. The caret column is
/// computed from display width so double-width CJK text lines up.
fn print_source_context(content: &str, replacement: &PlannedReplacement) {
    let Some(line) = content.lines().nth(replacement.line.saturating_sub(1)) else {
        return;
    };
    let Some(byte_col) = line.find(&replacement.text) else {
        return;
    };
    let caret_padding = UnicodeWidthStr::width(&line[..byte_col]);

    println!("     {}", "|".blue());
    println!(
        " {:>3} {} {}",
        replacement.line.to_string().blue(),
        "|".blue(),
        line
    );
    println!(
        "     {} {:>padding$}{}",
        "|".blue(),
        "",
        "^".red(),
        padding = caret_padding
    );
}

/// Print a message when no file held extractable text.
pub fn print_no_matches(file_count: usize) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Scanned {} source {} - nothing to extract",
            file_count,
            if file_count == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Dry-run closing summary with the apply hint.
pub fn print_dry_run_summary(batch: &BatchOutcome) {
    let replacement_count: usize = batch.outcomes.iter().map(|o| o.replacements.len()).sum();
    println!();
    println!(
        "{} {} literal(s) in {} file(s).",
        "Would replace".yellow().bold(),
        replacement_count,
        batch.processed
    );
    println!(
        "Run with {} to write label stores and rewrite sources.",
        "--apply".cyan()
    );
}
