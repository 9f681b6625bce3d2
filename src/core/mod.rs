//! Core extraction engine.
//!
//! The engine consumes a list of candidate source files and, per file, runs a
//! synchronous pipeline: scan for Chinese literals, resolve the label-store
//! binding, reuse or derive keys, merge new entries into the store, and
//! rewrite the source to reference them. Files are processed one at a time in
//! the given order so key suffix numbering is stable run-to-run.

pub mod binding;
pub mod data;
pub mod keys;
pub mod pipeline;
pub mod rewrite;
pub mod scan;
pub mod store;

pub use binding::resolve_binding;
pub use data::{BatchOutcome, Extraction, ExtractionKind, FileOutcome, PlannedReplacement, StoreBinding};
pub use keys::{KeyAllocator, KeyTable};
pub use pipeline::{process_file, run_batch};
pub use scan::Scanner;
