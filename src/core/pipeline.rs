//! Per-file orchestration: scan, resolve, merge, rewrite.
//!
//! Files are processed strictly one at a time; the store write and the
//! source write are independent filesystem operations with no rollback
//! between them.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::core::binding::resolve_binding;
use crate::core::data::{BatchOutcome, Extraction, FileOutcome, PlannedReplacement};
use crate::core::keys::{KeyAllocator, KeyTable};
use crate::core::rewrite::rewrite_source;
use crate::core::scan::Scanner;
use crate::core::store::{merge_entries, read_entries};

/// Process a whole batch sequentially. The order of `files` is the
/// processing order; callers sort for run-to-run determinism.
pub fn run_batch(files: &[PathBuf], config: &Config, apply: bool) -> Result<BatchOutcome> {
    let scanner = Scanner::new(config)?;
    let table = KeyTable::default();

    let mut outcomes = Vec::new();
    for path in files {
        if let Some(outcome) = process_file(path, config, &scanner, table, apply)? {
            outcomes.push(outcome);
        }
    }

    Ok(BatchOutcome {
        processed: outcomes.len(),
        outcomes,
    })
}

/// Process one source file.
///
/// Returns `None` when the file is unreadable or holds no extractable text;
/// such files are never written and not counted as processed.
pub fn process_file(
    path: &Path,
    config: &Config,
    scanner: &Scanner,
    table: KeyTable,
    apply: bool,
) -> Result<Option<FileOutcome>> {
    let Ok(content) = fs::read_to_string(path) else {
        return Ok(None);
    };

    let extractions = scanner.scan(&content);
    if extractions.is_empty() {
        return Ok(None);
    }

    let binding = resolve_binding(path, &content, config)?;

    let existing: HashMap<String, String> = match fs::read_to_string(&binding.store_path) {
        Ok(store_content) => read_entries(&store_content, &binding.export_name),
        Err(_) => HashMap::new(),
    };

    // The allocator is scoped to this export's merge: seeded with keys
    // already present, discarded afterwards.
    let mut allocator = KeyAllocator::new(table, existing.values().cloned());
    let mut new_entries: Vec<(String, String)> = Vec::new();
    let mut resolved: Vec<(Extraction, String)> = Vec::new();
    let mut reused = 0;

    for extraction in extractions {
        let key = match existing.get(&extraction.text) {
            Some(key) => {
                reused += 1;
                key.clone()
            }
            None => {
                let key = allocator.allocate(&extraction.text);
                new_entries.push((key.clone(), extraction.text.clone()));
                key
            }
        };
        resolved.push((extraction, key));
    }

    let replacements = resolved
        .iter()
        .map(|(extraction, key)| PlannedReplacement {
            line: extraction.line,
            text: extraction.text.clone(),
            alias: binding.local_alias.clone(),
            key: key.clone(),
        })
        .collect();

    if apply {
        merge_entries(&binding.store_path, &binding.export_name, &new_entries)?;

        let rewritten = rewrite_source(&content, &resolved, &binding, path)?;
        fs::write(path, rewritten)
            .with_context(|| format!("Failed to write source file: {}", path.display()))?;
    }

    Ok(Some(FileOutcome {
        file_path: path.to_path_buf(),
        replacements,
        new_entries: new_entries.len(),
        reused_entries: reused,
        applied: apply,
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::config::Config;
    use crate::core::pipeline::*;

    fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempdir().unwrap();
        let fleet = dir.path().join("fleet");
        fs::create_dir_all(&fleet).unwrap();
        let source = write_source(&fleet, "FleetPage.tsx", "<p>確定</p>\n");

        let batch = run_batch(&[source.clone()], &Config::default(), false).unwrap();

        assert_eq!(batch.processed, 1);
        let outcome = &batch.outcomes[0];
        assert!(!outcome.applied);
        assert_eq!(outcome.replacements.len(), 1);
        assert_eq!(outcome.replacements[0].key, "CONFIRM");
        assert_eq!(outcome.replacements[0].alias, "FLEET_LABELS");

        // Neither the source nor a store file was written.
        assert_eq!(fs::read_to_string(&source).unwrap(), "<p>確定</p>\n");
        assert!(!fleet.join("constants").exists());
    }

    #[test]
    fn test_apply_creates_store_and_rewrites_source() {
        let dir = tempdir().unwrap();
        let fleet = dir.path().join("fleet");
        fs::create_dir_all(&fleet).unwrap();
        let source = write_source(&fleet, "FleetPage.tsx", "<p>確定</p>\n");

        let batch = run_batch(&[source.clone()], &Config::default(), true).unwrap();
        assert_eq!(batch.processed, 1);

        let store = fs::read_to_string(fleet.join("constants").join("labels.ts")).unwrap();
        assert_eq!(store, "export const FLEET_LABELS = {\n  CONFIRM: '確定',\n}\n");

        let rewritten = fs::read_to_string(&source).unwrap();
        assert_eq!(
            rewritten,
            "import { FLEET_LABELS } from './constants/labels'\n<p>{FLEET_LABELS.CONFIRM}</p>\n"
        );
    }

    #[test]
    fn test_second_run_is_noop() {
        let dir = tempdir().unwrap();
        let fleet = dir.path().join("fleet");
        fs::create_dir_all(&fleet).unwrap();
        let source = write_source(&fleet, "FleetPage.tsx", "<p>確定</p>\n<h1>訂單管理</h1>\n");

        run_batch(&[source.clone()], &Config::default(), true).unwrap();
        let after_first = fs::read_to_string(&source).unwrap();
        let store_path = fleet.join("constants").join("labels.ts");
        let store_after_first = fs::read_to_string(&store_path).unwrap();

        let batch = run_batch(&[source.clone()], &Config::default(), true).unwrap();

        assert_eq!(batch.processed, 0);
        assert_eq!(fs::read_to_string(&source).unwrap(), after_first);
        assert_eq!(fs::read_to_string(&store_path).unwrap(), store_after_first);
    }

    #[test]
    fn test_existing_entry_key_is_reused() {
        let dir = tempdir().unwrap();
        let fleet = dir.path().join("fleet");
        let constants = fleet.join("constants");
        fs::create_dir_all(&constants).unwrap();
        fs::write(
            constants.join("labels.ts"),
            "export const FLEET_LABELS = {\n  OK_BUTTON: '確定',\n}\n",
        )
        .unwrap();
        let source = write_source(&fleet, "FleetPage.tsx", "<p>確定</p>\n");

        let batch = run_batch(&[source], &Config::default(), true).unwrap();

        let outcome = &batch.outcomes[0];
        assert_eq!(outcome.reused_entries, 1);
        assert_eq!(outcome.new_entries, 0);
        assert_eq!(outcome.replacements[0].key, "OK_BUTTON");

        // Store is untouched: the merge had zero new entries.
        let store = fs::read_to_string(constants.join("labels.ts")).unwrap();
        assert_eq!(store, "export const FLEET_LABELS = {\n  OK_BUTTON: '確定',\n}\n");
    }

    #[test]
    fn test_aliased_import_merges_into_existing_export() {
        let dir = tempdir().unwrap();
        let orders = dir.path().join("orders");
        let constants = orders.join("constants");
        fs::create_dir_all(&constants).unwrap();
        fs::write(
            constants.join("labels.ts"),
            "export const LBL = {\n  OK: '好',\n}\n",
        )
        .unwrap();
        let source = write_source(
            &orders,
            "OrderPage.tsx",
            "import { LBL as L } from './constants/labels'\n<p>確定</p>\n",
        );

        run_batch(&[source.clone()], &Config::default(), true).unwrap();

        let store = fs::read_to_string(constants.join("labels.ts")).unwrap();
        assert_eq!(
            store,
            "export const LBL = {\n  OK: '好',\n  CONFIRM: '確定',\n}\n"
        );

        let rewritten = fs::read_to_string(&source).unwrap();
        assert!(rewritten.contains("<p>{L.CONFIRM}</p>"));
        // The alias was already in the file, so no import was added.
        assert_eq!(rewritten.matches("import").count(), 1);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.tsx");

        let batch = run_batch(&[missing], &Config::default(), true).unwrap();

        assert_eq!(batch.processed, 0);
        assert!(batch.outcomes.is_empty());
    }

    #[test]
    fn test_file_without_literals_is_not_counted() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path(), "Plain.tsx", "<p>Hello</p>\n");

        let batch = run_batch(&[source.clone()], &Config::default(), true).unwrap();

        assert_eq!(batch.processed, 0);
        assert_eq!(fs::read_to_string(&source).unwrap(), "<p>Hello</p>\n");
    }

    #[test]
    fn test_batch_order_is_input_order() {
        let dir = tempdir().unwrap();
        let a_dir = dir.path().join("alpha");
        let b_dir = dir.path().join("beta");
        fs::create_dir_all(&a_dir).unwrap();
        fs::create_dir_all(&b_dir).unwrap();
        let a = write_source(&a_dir, "A.tsx", "<p>確定</p>\n");
        let b = write_source(&b_dir, "B.tsx", "<p>取消</p>\n");

        let batch = run_batch(&[b.clone(), a.clone()], &Config::default(), false).unwrap();

        assert_eq!(batch.outcomes[0].file_path, b);
        assert_eq!(batch.outcomes[1].file_path, a);
    }
}
