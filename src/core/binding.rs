//! Store binding resolution for source files.
//!
//! A file that already imports a label store keeps using it, including under
//! a renamed alias (`import { LBL as L } from './constants/labels'`). Files
//! with no usable import get a canonical store next to them and an export
//! name derived from the nearest domain-meaningful ancestor directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use regex::Regex;

use crate::config::Config;
use crate::core::data::StoreBinding;
use crate::core::store::{STORE_EXTENSION, first_export_name};
use crate::utils::normalize_path;

/// Fallback export stem when no meaningful ancestor directory name exists.
const FALLBACK_STEM: &str = "PAGE";

/// Determine which store file, export name, and local alias a source file
/// should use.
pub fn resolve_binding(source_path: &Path, content: &str, config: &Config) -> Result<StoreBinding> {
    let source_dir = source_path.parent().unwrap_or(Path::new(""));

    if let Some(binding) = find_import_binding(content, source_dir, config)? {
        return Ok(binding);
    }

    let store_path = source_dir
        .join(&config.store_dir)
        .join(format!("{}.{}", config.store_file_stem, STORE_EXTENSION));

    // An existing store's exported name wins over the freshly computed one.
    let computed = canonical_export_name(source_dir, config);
    let export_name = if store_path.exists() {
        fs::read_to_string(&store_path)
            .ok()
            .and_then(|store_content| first_export_name(&store_content))
            .unwrap_or(computed)
    } else {
        computed
    };

    Ok(StoreBinding {
        local_alias: export_name.clone(),
        export_name,
        store_path,
    })
}

/// Search import statements for one whose module path contains the store
/// file stem. Aliased imports are checked first so the rename is honored.
fn find_import_binding(
    content: &str,
    source_dir: &Path,
    config: &Config,
) -> Result<Option<StoreBinding>> {
    let stem = regex::escape(&config.store_file_stem);

    let aliased = Regex::new(&format!(
        r"import\s+\{{\s*(\w+)\s+as\s+(\w+)\s*\}}\s+from\s+'([^']*{stem}[^']*)'"
    ))?;
    for caps in aliased.captures_iter(content) {
        if let Some(store_path) = resolve_import_path(source_dir, &caps[3]) {
            return Ok(Some(StoreBinding {
                local_alias: caps[2].to_string(),
                export_name: caps[1].to_string(),
                store_path,
            }));
        }
    }

    let plain = Regex::new(&format!(
        r"import\s+\{{[^}}]*?(\w+)\s*\}}\s+from\s+'([^']*{stem}[^']*)'"
    ))?;
    for caps in plain.captures_iter(content) {
        if let Some(store_path) = resolve_import_path(source_dir, &caps[2]) {
            let name = caps[1].to_string();
            return Ok(Some(StoreBinding {
                local_alias: name.clone(),
                export_name: name,
                store_path,
            }));
        }
    }

    Ok(None)
}

/// Resolve an import module path against the source directory, appending the
/// store extension. Only paths that exist on disk produce a binding.
fn resolve_import_path(source_dir: &Path, import_path: &str) -> Option<PathBuf> {
    let resolved = normalize_path(&source_dir.join(format!("{import_path}.{STORE_EXTENSION}")));
    resolved.exists().then_some(resolved)
}

/// Export name from the nearest domain-meaningful ancestor directory.
///
/// Walks up past structural grouping directories (components, sections, ...),
/// strips Next.js route brackets, collapses non-alphanumeric runs to single
/// underscores, uppercases, and appends the store suffix.
fn canonical_export_name(dir: &Path, config: &Config) -> String {
    let mut current = dir;
    let mut name = dir_name(current);
    while config.structural_dirs.iter().any(|s| *s == name) {
        match current.parent() {
            Some(parent) if !dir_name(parent).is_empty() => {
                current = parent;
                name = dir_name(current);
            }
            _ => break,
        }
    }

    let trimmed = name.trim_matches(|c| c == '[' || c == ']');
    let mut ident = String::new();
    let mut last_was_sep = true;
    for c in trimmed.chars() {
        if c.is_ascii_alphanumeric() {
            ident.push(c.to_ascii_uppercase());
            last_was_sep = false;
        } else if !last_was_sep {
            ident.push('_');
            last_was_sep = true;
        }
    }
    let ident = ident.trim_end_matches('_');

    let stem = if ident.is_empty() { FALLBACK_STEM } else { ident };
    format!("{}{}", stem, config.store_suffix)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
