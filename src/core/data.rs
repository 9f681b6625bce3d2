//! Data types shared across the extraction pipeline.

use std::path::PathBuf;

/// Syntactic shape of a discovered literal occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionKind {
    /// Element body text on a single line (`<p>確定</p>`, `>確定{`, `>確定` at
    /// end of line).
    ElementText,
    /// A line consisting solely of literal text between markup lines.
    ElementTextMultiline,
    /// A double-quoted value of a checked JSX attribute.
    AttributeValue,
}

/// One discovered literal occurrence awaiting key assignment and replacement.
///
/// Produced by the scanner for a single file and discarded after that file's
/// rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Source line number (1-indexed).
    pub line: usize,
    /// The literal text, trimmed, never empty.
    pub text: String,
    pub kind: ExtractionKind,
    /// Attribute name, present iff `kind` is `AttributeValue`.
    pub attribute: Option<String>,
}

/// The resolved (alias, export name, store path) triple a source file uses to
/// reference its label store.
///
/// Either discovered from an existing import statement (where the alias may
/// differ from the exported name) or synthesized from the file's location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreBinding {
    /// Identifier used in the source file.
    pub local_alias: String,
    /// Identifier exported by the store file.
    pub export_name: String,
    pub store_path: PathBuf,
}

/// One would-be (or performed) literal replacement, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedReplacement {
    pub line: usize,
    pub text: String,
    pub alias: String,
    pub key: String,
}

/// Result of processing one source file that held extractable text.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub file_path: PathBuf,
    pub replacements: Vec<PlannedReplacement>,
    /// Entries newly added to the store by this file.
    pub new_entries: usize,
    /// Extractions that resolved to a pre-existing store entry.
    pub reused_entries: usize,
    /// False in dry-run mode; no file was touched.
    pub applied: bool,
}

/// Result of a whole batch run.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Number of files that held extractable text.
    pub processed: usize,
    pub outcomes: Vec<FileOutcome>,
}
