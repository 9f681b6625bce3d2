//! Key derivation for extracted label text.
//!
//! Derivation is deterministic: the same literal always yields the same base
//! key, which is required both for idempotent re-runs and for matching
//! entries already present in a store. Uniqueness within an export is
//! guaranteed separately by [`KeyAllocator`] suffix probing.

use std::collections::HashSet;

/// Modulus applied to the text hash when forming numeric key suffixes.
///
/// The suffix only keeps unrelated keys that share a trigger prefix visually
/// distinct; it is not a collision guarantee.
pub const HASH_MODULUS: u64 = 9999;

/// Common short literals with canonical keys. Exact matches carry no numeric
/// suffix.
const EXACT_KEYS: &[(&str, &str)] = &[
    ("載入中", "LOADING"),
    ("處理中", "PROCESSING"),
    ("請稍候", "PLEASE_WAIT"),
    ("新增", "ADD"),
    ("編輯", "EDIT"),
    ("刪除", "DELETE"),
    ("儲存", "SAVE"),
    ("取消", "CANCEL"),
    ("確認", "CONFIRM"),
    ("確定", "CONFIRM"),
    ("搜尋", "SEARCH"),
    ("匯出", "EXPORT"),
    ("匯入", "IMPORT"),
    ("上傳", "UPLOAD"),
    ("下載", "DOWNLOAD"),
    ("返回", "BACK"),
    ("關閉", "CLOSE"),
    ("提交", "SUBMIT"),
    ("重設", "RESET"),
    ("清除", "CLEAR"),
    ("全部", "ALL"),
    ("預覽", "PREVIEW"),
    ("列印", "PRINT"),
    ("複製", "COPY"),
    ("選擇", "SELECT"),
    ("選填", "OPTIONAL"),
    ("必填", "REQUIRED"),
    ("操作", "ACTIONS"),
    ("設定", "SETTINGS"),
    ("總計", "TOTAL"),
    ("備註", "REMARKS"),
    ("名稱", "NAME"),
    ("標題", "TITLE"),
    ("日期", "DATE"),
    ("時間", "TIME"),
    ("金額", "AMOUNT"),
    ("數量", "QUANTITY"),
    ("狀態", "STATUS"),
    ("類型", "TYPE"),
    ("建立", "CREATE"),
    ("更新", "UPDATE"),
    ("管理", "MANAGE"),
];

/// Ordered substring triggers mapped to semantic prefixes. More specific
/// triggers come first (請選擇 before 選擇) so the first match wins.
const TRIGGER_PREFIXES: &[(&str, &str)] = &[
    ("請選擇", "PLEASE_SELECT"),
    ("請輸入", "PLEASE_ENTER"),
    ("搜尋", "SEARCH"),
    ("新增", "ADD"),
    ("編輯", "EDIT"),
    ("刪除", "DELETE"),
    ("載入", "LOADING"),
    ("處理", "PROCESSING"),
    ("上傳", "UPLOADING"),
    ("儲存", "SAVING"),
    ("找不到", "NOT_FOUND"),
    ("沒有", "NOT_FOUND"),
    ("尚無", "EMPTY"),
    ("暫無", "EMPTY"),
    ("管理", "MANAGE"),
    ("總", "TOTAL"),
    ("選擇", "SELECT"),
    ("確定", "CONFIRM"),
    ("確認", "CONFIRM"),
    ("計算", "CALCULATING"),
    ("計時", "CALCULATING"),
    ("查詢", "QUERYING"),
    ("生成", "GENERATING"),
    ("複製", "COPYING"),
    ("發送", "SENDING"),
    ("設定", "SETTINGS"),
    ("篩選", "FILTER"),
    ("匯出", "EXPORT"),
    ("列印", "PRINT"),
    ("預覽", "PREVIEW"),
    ("例如", "EXAMPLE"),
];

/// FNV-1a 64-bit hash of the literal text.
///
/// Chosen over the standard library hasher because derived keys must not
/// drift between builds or platforms.
pub fn text_hash(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Immutable key-derivation tables: exact literals plus ordered substring
/// triggers.
#[derive(Debug, Clone, Copy)]
pub struct KeyTable {
    exact: &'static [(&'static str, &'static str)],
    triggers: &'static [(&'static str, &'static str)],
}

impl Default for KeyTable {
    fn default() -> Self {
        Self {
            exact: EXACT_KEYS,
            triggers: TRIGGER_PREFIXES,
        }
    }
}

impl KeyTable {
    /// Derive the base key for a literal.
    pub fn derive(&self, text: &str) -> String {
        if let Some((_, key)) = self.exact.iter().find(|(literal, _)| *literal == text) {
            return (*key).to_string();
        }

        let suffix = text_hash(text) % HASH_MODULUS;
        for (trigger, prefix) in self.triggers {
            if text.contains(trigger) {
                return format!("{prefix}_{suffix}");
            }
        }
        format!("LABEL_{suffix}")
    }
}

/// Allocates keys unique within one export block.
///
/// Seeded with the keys already present in the export; lives for a single
/// file's merge and is then discarded.
pub struct KeyAllocator {
    table: KeyTable,
    used: HashSet<String>,
}

impl KeyAllocator {
    pub fn new(table: KeyTable, used: impl IntoIterator<Item = String>) -> Self {
        Self {
            table,
            used: used.into_iter().collect(),
        }
    }

    /// Derive a key for `text`, probing `_1`, `_2`, ... past collisions.
    pub fn allocate(&mut self, text: &str) -> String {
        let base = self.table.derive(text);
        let mut key = base.clone();
        let mut n = 1;
        while self.used.contains(&key) {
            key = format!("{base}_{n}");
            n += 1;
        }
        self.used.insert(key.clone());
        key
    }
}
