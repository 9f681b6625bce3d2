//! Candidate file discovery.
//!
//! Walks the configured include roots and returns source files for the
//! extraction pipeline: extension-filtered, with label-store files and
//! ignored paths excluded. Results are sorted so batch processing order (and
//! with it key suffix numbering) is stable run-to-run.

use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::Config;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Discover candidate source files under the config's include roots.
pub fn discover_files(config: &Config, verbose: bool) -> Vec<PathBuf> {
    let base_dir = config.source_root.as_str();
    let mut files: Vec<PathBuf> = Vec::new();

    // Separate ignore patterns into literal paths and glob patterns.
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in &config.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(Path::new(base_dir).join(p));
        }
    }

    for dir in include_dirs(base_dir, &config.includes, verbose) {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }
            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_candidate_file(path, config) {
                files.push(path.to_path_buf());
            }
        }
    }

    // Overlapping include roots can visit a file twice.
    files.sort();
    files.dedup();
    files
}

fn include_dirs(base_dir: &str, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![Path::new(base_dir).to_path_buf()];
    }

    let mut dirs = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = Path::new(base_dir).join(inc);
            let pattern_str = full_pattern.to_string_lossy();
            match glob(&pattern_str) {
                Ok(entries) => {
                    for entry in entries.flatten() {
                        if entry.is_dir() {
                            dirs.push(entry);
                        }
                    }
                }
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            inc,
                            e
                        );
                    }
                }
            }
        } else {
            let path = Path::new(base_dir).join(inc);
            if path.exists() {
                dirs.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }
    dirs
}

/// A candidate has a configured source extension and is not itself part of a
/// label store (inside the store directory, or named like a store file).
fn is_candidate_file(path: &Path, config: &Config) -> bool {
    let extension_matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| config.source_extensions.iter().any(|s| s == ext));
    if !extension_matches {
        return false;
    }

    let in_store_dir = path
        .components()
        .any(|c| c.as_os_str().to_str() == Some(config.store_dir.as_str()));
    let named_like_store = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem == config.store_file_stem);

    !in_store_dir && !named_like_store
}
