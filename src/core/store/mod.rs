//! Label store parsing and merging.
//!
//! A store file is a TypeScript module holding one or more
//! `export const NAME = { KEY: 'text', ... }` blocks. The engine treats
//! stores as shared and append-only: it reads entries to reuse keys and
//! appends new entries, but never deletes, renames, or reorders anything
//! already there.

pub mod block;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

pub use block::locate_export_block;

/// Store files are TypeScript modules.
pub const STORE_EXTENSION: &str = "ts";

static EXPORT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+const\s+(\w+)\s*=\s*\{").unwrap());
static SINGLE_QUOTED_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*:\s*'((?:[^'\\]|\\.)*)'").unwrap());
static DOUBLE_QUOTED_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)\s*:\s*"((?:[^"\\]|\\.)*)""#).unwrap());

/// First exported name in a store file, if any.
pub fn first_export_name(content: &str) -> Option<String> {
    EXPORT_NAME_REGEX
        .captures(content)
        .map(|caps| caps[1].to_string())
}

/// Extract text -> key entries from the named export.
///
/// An absent export reads as empty. Later entries for a repeated text
/// override earlier ones, so a literal always resolves to its most recent
/// key.
pub fn read_entries(content: &str, export_name: &str) -> HashMap<String, String> {
    let Some((start, end)) = locate_export_block(content, export_name) else {
        return HashMap::new();
    };
    let block = &content[start..end];

    let mut entries = HashMap::new();
    for caps in SINGLE_QUOTED_ENTRY.captures_iter(block) {
        entries.insert(unescape(&caps[2], '\''), caps[1].to_string());
    }
    for caps in DOUBLE_QUOTED_ENTRY.captures_iter(block) {
        entries.insert(unescape(&caps[2], '"'), caps[1].to_string());
    }
    entries
}

/// Reverse of the writer's quote escaping so stored text compares equal to
/// source literals.
fn unescape(value: &str, quote: char) -> String {
    value.replace(&format!("\\{quote}"), &quote.to_string())
}

fn escape(text: &str) -> String {
    text.replace('\'', "\\'")
}

fn entry_lines(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, text) in entries {
        out.push_str(&format!("  {}: '{}',\n", key, escape(text)));
    }
    out
}

fn new_export_block(export_name: &str, entries: &[(String, String)]) -> String {
    format!(
        "export const {} = {{\n{}}}\n",
        export_name,
        entry_lines(entries)
    )
}

/// Merge new key -> text entries into the named export of `store_path`.
///
/// Creates the export block, or the whole file (parent directories
/// included), when absent. Zero entries is a no-op and leaves the file
/// untouched. Existing entries and sibling exports are never altered.
pub fn merge_entries(
    store_path: &Path,
    export_name: &str,
    entries: &[(String, String)],
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    if let Some(parent) = store_path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create store directory: {}", parent.display())
        })?;
    }

    let merged = if store_path.exists() {
        let content = fs::read_to_string(store_path)
            .with_context(|| format!("Failed to read store file: {}", store_path.display()))?;

        match locate_export_block(&content, export_name) {
            Some((_, close)) => {
                let before = content[..close].trim_end();
                let mut insert = String::new();
                if !before.ends_with(',') && !before.ends_with('{') {
                    insert.push(',');
                }
                insert.push('\n');
                insert.push_str(&entry_lines(entries));
                format!("{}{}{}", before, insert, &content[close..])
            }
            None => {
                let mut out = content;
                if !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push('\n');
                out.push_str(&new_export_block(export_name, entries));
                out
            }
        }
    } else {
        new_export_block(export_name, entries)
    };

    fs::write(store_path, merged)
        .with_context(|| format!("Failed to write store file: {}", store_path.display()))
}
