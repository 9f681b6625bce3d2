//! Common utility functions shared across the codebase.

use std::path::{Component, Path, PathBuf};

/// Checks if a character is a CJK Unified Ideograph (U+4E00..U+9FFF).
pub fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Checks if the text contains at least one CJK Unified Ideograph.
///
/// Returns false for empty strings, Latin-only text, or pure symbols.
///
/// # Examples
///
/// ```
/// use hanlift::utils::contains_cjk;
///
/// assert!(contains_cjk("你好"));
/// assert!(contains_cjk("Hello 世界"));
/// assert!(!contains_cjk("Hello"));
/// assert!(!contains_cjk("123"));
/// assert!(!contains_cjk(""));
/// ```
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Lexically normalize a path, resolving `.` and `..` components without
/// consulting the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            c => parts.push(c),
        }
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}

/// Compute the relative path from `from` (a directory) to `to`, lexically.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = normalize_path(from);
    let to = normalize_path(to);
    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from_parts.len() {
        out.push("..");
    }
    for part in &to_parts[common..] {
        out.push(part.as_os_str());
    }
    out
}
