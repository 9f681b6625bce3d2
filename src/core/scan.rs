//! Literal scanning over TSX source lines.
//!
//! The scanner is deliberately heuristic: it works line by line with a fixed
//! set of shape matchers instead of parsing the source. Missed literals are
//! acceptable; false positives are excluded up front by the comment, skip-
//! marker, and generic-syntax filters.

use anyhow::Result;
use regex::Regex;

use crate::config::Config;
use crate::core::data::{Extraction, ExtractionKind};
use crate::utils::contains_cjk;

/// First character of a literal must be a CJK ideograph.
const TEXT_HEAD: &str = r"[\u{4e00}-\u{9fff}]";

/// Interior characters: CJK, word characters, whitespace, and the punctuation
/// that shows up inside display text.
const TEXT_BODY: &str = r"[\u{4e00}-\u{9fff}\w\s（）()、，。：:／/\-·「」【】～~%《》*.…！？]";

/// Line-level literal scanner with matchers compiled once per run.
pub struct Scanner {
    skip_markers: Vec<String>,
    generic_syntax: Regex,
    closing_tag: Regex,
    before_expr: Regex,
    end_of_line: Regex,
    standalone: Regex,
    attribute: Regex,
    attribute_line: Regex,
}

impl Scanner {
    pub fn new(config: &Config) -> Result<Self> {
        let text = format!("{TEXT_HEAD}{TEXT_BODY}*?");
        let attrs = config
            .checked_attributes
            .iter()
            .map(|a| regex::escape(a))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            skip_markers: config.skip_markers.clone(),
            generic_syntax: Regex::new(
                r"Record<|Promise<|Partial<|Array<|Set<|Map<|\.length\s*>",
            )?,
            closing_tag: Regex::new(&format!(r">\s*({text})\s*</"))?,
            before_expr: Regex::new(&format!(r">\s*({text})\s*\{{"))?,
            end_of_line: Regex::new(&format!(r">\s*({text})\s*$"))?,
            standalone: Regex::new(&format!(r"^\s*({text})\s*$"))?,
            attribute: Regex::new(&format!(
                r#"(?:^|[\s{{(])({attrs})\s*=\s*"([^"]*{TEXT_HEAD}[^"]*)""#
            ))?,
            attribute_line: Regex::new(r"^\s+[\w-]+=")?,
        })
    }

    /// Scan one file's text, returning extractions de-duplicated by literal
    /// text (first occurrence wins, order preserved).
    pub fn scan(&self, content: &str) -> Vec<Extraction> {
        let lines: Vec<&str> = content.lines().collect();
        let mut extractions: Vec<Extraction> = Vec::new();
        let mut in_block_comment = false;

        for (i, line) in lines.iter().enumerate() {
            let stripped = line.trim();
            if stripped.contains("/*") {
                in_block_comment = true;
            }
            if stripped.contains("*/") {
                in_block_comment = false;
                continue;
            }
            if in_block_comment || stripped.starts_with("//") || stripped.starts_with('*') {
                continue;
            }
            if self.skip_markers.iter().any(|m| line.contains(m.as_str())) {
                continue;
            }
            if !contains_cjk(line) {
                continue;
            }
            if self.generic_syntax.is_match(line) {
                continue;
            }

            let lineno = i + 1;

            for caps in self.closing_tag.captures_iter(line) {
                push_element_text(&mut extractions, lineno, &caps[1]);
            }
            for caps in self.before_expr.captures_iter(line) {
                push_element_text(&mut extractions, lineno, &caps[1]);
            }
            if let Some(caps) = self.end_of_line.captures(line) {
                push_element_text(&mut extractions, lineno, &caps[1]);
            }

            // A bare literal line counts only when the previous line opened a
            // tag and the next line continues markup.
            if i > 0 {
                if let Some(caps) = self.standalone.captures(line) {
                    let text = caps[1].trim();
                    let prev = lines[i - 1].trim();
                    let next = lines.get(i + 1).map(|l| l.trim()).unwrap_or("");
                    if !text.is_empty()
                        && prev.contains('>')
                        && (next.contains('<') || next.contains('{'))
                    {
                        extractions.push(Extraction {
                            line: lineno,
                            text: text.to_string(),
                            kind: ExtractionKind::ElementTextMultiline,
                            attribute: None,
                        });
                    }
                }
            }

            if line.contains('<')
                || line.contains("className")
                || self.attribute_line.is_match(line)
            {
                for caps in self.attribute.captures_iter(line) {
                    extractions.push(Extraction {
                        line: lineno,
                        text: caps[2].to_string(),
                        kind: ExtractionKind::AttributeValue,
                        attribute: Some(caps[1].to_string()),
                    });
                }
            }
        }

        dedup_by_text(extractions)
    }
}

fn push_element_text(out: &mut Vec<Extraction>, line: usize, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        out.push(Extraction {
            line,
            text: text.to_string(),
            kind: ExtractionKind::ElementText,
            attribute: None,
        });
    }
}

fn dedup_by_text(extractions: Vec<Extraction>) -> Vec<Extraction> {
    let mut seen = std::collections::HashSet::new();
    extractions
        .into_iter()
        .filter(|e| seen.insert(e.text.clone()))
        .collect()
}
