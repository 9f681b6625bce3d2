//! Source rewriting: literal replacement and import insertion.
//!
//! Replacement is single-shot: for each extraction only the first pattern
//! that matches is applied, and only the first textual occurrence in the
//! file is replaced, mirroring the scanner's dedup-by-text policy.

use std::path::Path;

use anyhow::Result;
use regex::Regex;

use crate::core::data::{Extraction, ExtractionKind, StoreBinding};
use crate::core::store::STORE_EXTENSION;
use crate::utils::relative_path;

/// Replace each extraction's first occurrence with a store reference and
/// insert an import for the alias when the original file does not already
/// mention it.
pub fn rewrite_source(
    content: &str,
    resolved: &[(Extraction, String)],
    binding: &StoreBinding,
    source_path: &Path,
) -> Result<String> {
    let mut modified = content.to_string();

    for (extraction, key) in resolved {
        let reference = format!("{}.{}", binding.local_alias, key);
        modified = replace_extraction(&modified, extraction, &reference)?;
    }

    if !content.contains(binding.local_alias.as_str()) {
        let path = import_path(source_path, &binding.store_path);
        modified = insert_import(&modified, &binding.local_alias, &path);
    }

    Ok(modified)
}

/// Try the kind's replacement patterns in order; apply the first that
/// matches, replacing one occurrence. A literal in a shape no pattern covers
/// is left unchanged.
fn replace_extraction(content: &str, extraction: &Extraction, reference: &str) -> Result<String> {
    let escaped = regex::escape(&extraction.text);

    let attempts: Vec<(String, String)> = match extraction.kind {
        ExtractionKind::ElementText => vec![
            (
                format!(r">(\s*){escaped}(\s*)</"),
                format!(">${{1}}{{{reference}}}${{2}}</"),
            ),
            // Adjacent sibling tag: `<` not followed by `/`. The regex crate
            // has no lookahead, so the following character is captured and
            // re-emitted.
            (
                format!(r">(\s*){escaped}(\s*)<([^/])"),
                format!(">${{1}}{{{reference}}}${{2}}<${{3}}"),
            ),
            (
                format!(r">(\s*){escaped}(\s*)\{{"),
                format!(">${{1}}{{{reference}}}${{2}}{{"),
            ),
            (
                format!(r"(?m)>(\s*){escaped}(\s*)$"),
                format!(">${{1}}{{{reference}}}${{2}}"),
            ),
        ],
        ExtractionKind::ElementTextMultiline => vec![(
            format!(r"(?m)^(\s*){escaped}\s*$"),
            format!("${{1}}{{{reference}}}"),
        )],
        ExtractionKind::AttributeValue => {
            let attr = extraction.attribute.as_deref().unwrap_or_default();
            let attr = regex::escape(attr);
            vec![(
                format!(r#"({attr}\s*=\s*)["']{escaped}["']"#),
                format!("${{1}}{{{reference}}}"),
            )]
        }
    };

    for (pattern, replacement) in &attempts {
        let re = Regex::new(pattern)?;
        if re.is_match(content) {
            return Ok(re.replace(content, replacement.as_str()).into_owned());
        }
    }

    Ok(content.to_string())
}

/// Module path for the import statement: relative to the source file's
/// directory, extension stripped, forward slashes, `./`-prefixed.
fn import_path(source_path: &Path, store_path: &Path) -> String {
    let source_dir = source_path.parent().unwrap_or(Path::new(""));
    let rel = relative_path(source_dir, store_path);

    let mut path = rel.to_string_lossy().replace('\\', "/");
    let suffix = format!(".{STORE_EXTENSION}");
    if let Some(stripped) = path.strip_suffix(&suffix) {
        path = stripped.to_string();
    }
    if !path.starts_with('.') {
        path = format!("./{path}");
    }
    path
}

fn insert_import(content: &str, alias: &str, module_path: &str) -> String {
    let import_line = format!("import {{ {alias} }} from '{module_path}'");

    let lines: Vec<&str> = content.split('\n').collect();
    let insert_at = last_import_line(&lines).map_or(0, |i| i + 1);

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 1);
    out.extend_from_slice(&lines[..insert_at]);
    out.push(&import_line);
    out.extend_from_slice(&lines[insert_at..]);
    out.join("\n")
}

/// Index of the last line of the final top-level import statement. Imports
/// may span multiple lines via brace nesting, so braces are balanced from
/// the statement's first line.
fn last_import_line(lines: &[&str]) -> Option<usize> {
    let mut last = None;
    let mut depth: i64 = 0;
    let mut in_import = false;

    for (i, line) in lines.iter().enumerate() {
        let s = line.trim();
        let balance = s.matches('{').count() as i64 - s.matches('}').count() as i64;
        if s.starts_with("import ") {
            in_import = true;
            depth += balance;
            if depth <= 0 {
                last = Some(i);
                in_import = false;
                depth = 0;
            }
        } else if in_import {
            depth += balance;
            if depth <= 0 {
                last = Some(i);
                in_import = false;
                depth = 0;
            }
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use crate::core::data::{Extraction, ExtractionKind, StoreBinding};
    use crate::core::rewrite::*;

    fn binding() -> StoreBinding {
        StoreBinding {
            local_alias: "FLEET_LABELS".to_string(),
            export_name: "FLEET_LABELS".to_string(),
            store_path: PathBuf::from("/app/src/fleet/constants/labels.ts"),
        }
    }

    fn element(line: usize, text: &str) -> Extraction {
        Extraction {
            line,
            text: text.to_string(),
            kind: ExtractionKind::ElementText,
            attribute: None,
        }
    }

    #[test]
    fn test_replace_closing_tag_text() {
        let content = "import React from 'react'\n<p>確定</p>\n";
        let resolved = vec![(element(2, "確定"), "CONFIRM".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        assert_eq!(
            out,
            "import React from 'react'\nimport { FLEET_LABELS } from './constants/labels'\n<p>{FLEET_LABELS.CONFIRM}</p>\n"
        );
    }

    #[test]
    fn test_replace_text_before_expression() {
        let content = "<span>總計{total}</span>\n";
        let resolved = vec![(element(1, "總計"), "TOTAL".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        assert!(out.contains("<span>{FLEET_LABELS.TOTAL}{total}</span>"));
    }

    #[test]
    fn test_replace_text_at_end_of_line() {
        let content = "<div>標題\n</div>\n";
        let resolved = vec![(element(1, "標題"), "TITLE".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        assert!(out.contains("<div>{FLEET_LABELS.TITLE}\n"));
    }

    #[test]
    fn test_replace_standalone_line_keeps_indent() {
        let content = "<CardTitle>\n        航班資訊\n</CardTitle>\n";
        let extraction = Extraction {
            line: 2,
            text: "航班資訊".to_string(),
            kind: ExtractionKind::ElementTextMultiline,
            attribute: None,
        };
        let resolved = vec![(extraction, "LABEL_11".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        assert!(out.contains("\n        {FLEET_LABELS.LABEL_11}\n"));
    }

    #[test]
    fn test_replace_attribute_value() {
        let content = "<Input placeholder=\"請輸入名稱\" />\n";
        let extraction = Extraction {
            line: 1,
            text: "請輸入名稱".to_string(),
            kind: ExtractionKind::AttributeValue,
            attribute: Some("placeholder".to_string()),
        };
        let resolved = vec![(extraction, "PLEASE_ENTER_7".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        assert!(out.contains("placeholder={FLEET_LABELS.PLEASE_ENTER_7}"));
    }

    #[test]
    fn test_only_first_occurrence_is_replaced() {
        let content = "<p>確定</p>\n<span>確定</span>\n";
        let resolved = vec![(element(1, "確定"), "CONFIRM".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        assert!(out.contains("<p>{FLEET_LABELS.CONFIRM}</p>"));
        assert!(out.contains("<span>確定</span>"));
    }

    #[test]
    fn test_unmatchable_shape_leaves_source_unchanged() {
        // The literal sits in a shape no pattern covers.
        let content = "const x = someFn('確定')\n";
        let resolved = vec![(element(1, "確定"), "CONFIRM".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        assert!(out.contains("someFn('確定')"));
    }

    #[test]
    fn test_no_duplicate_import_when_alias_present() {
        let content = "import { FLEET_LABELS } from './constants/labels'\n<p>確定</p>\n";
        let resolved = vec![(element(2, "確定"), "CONFIRM".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        assert_eq!(out.matches("import { FLEET_LABELS }").count(), 1);
    }

    #[test]
    fn test_import_inserted_after_multiline_import() {
        let content = "import {\n  Card,\n  CardTitle,\n} from '@/components/ui/card'\n\n<p>確定</p>\n";
        let resolved = vec![(element(6, "確定"), "CONFIRM".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines[4], "import { FLEET_LABELS } from './constants/labels'");
    }

    #[test]
    fn test_import_inserted_at_top_without_imports() {
        let content = "<p>確定</p>\n";
        let resolved = vec![(element(1, "確定"), "CONFIRM".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        assert!(out.starts_with("import { FLEET_LABELS } from './constants/labels'\n"));
    }

    #[test]
    fn test_import_path_is_relative_with_dot_prefix() {
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");
        let store = PathBuf::from("/app/src/fleet/constants/labels.ts");
        assert_eq!(import_path(&source, &store), "./constants/labels");

        let shared = PathBuf::from("/app/src/shared/labels.ts");
        assert_eq!(import_path(&source, &shared), "../shared/labels");
    }

    #[test]
    fn test_last_import_line_tracks_braces() {
        let lines = vec![
            "import {",
            "  A,",
            "} from 'a'",
            "import { B } from 'b'",
            "",
            "const x = 1",
        ];
        assert_eq!(last_import_line(&lines), Some(3));
    }

    #[test]
    fn test_regex_metacharacters_in_literal() {
        let content = "<p>金額（含稅）*必填</p>\n";
        let resolved = vec![(element(1, "金額（含稅）*必填"), "AMOUNT_5".to_string())];
        let source = PathBuf::from("/app/src/fleet/FleetPage.tsx");

        let out = rewrite_source(content, &resolved, &binding(), &source).unwrap();

        assert!(out.contains("<p>{FLEET_LABELS.AMOUNT_5}</p>"));
    }
}
