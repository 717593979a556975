use crate::domain::model::Record;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// 多語言文字欄位，展開後帶有 `results` 陣列。
pub const LOCALIZED_TEXT_KEY: &str = "to_text";

const METADATA_KEY: &str = "__metadata";

pub const DEFAULT_SKIP_KEYS: [&str; 2] = ["id", "uri"];
pub const DEFAULT_LANGUAGE: &str = "EN";

fn is_skipped(skip_keys: &[String], key: &str) -> bool {
    skip_keys.iter().any(|k| k == key)
}

/// 將一筆巢狀紀錄攤平成 `parent.child` 形式的單層資料列。
///
/// - `skip_keys` 在每一層都生效（預設 `id` / `uri`）。
/// - 巢狀物件遞迴展開，key 以 `.` 串接。
/// - `to_text` 欄位只保留 `language` 與目標語言相符（不分大小寫）的項目，
///   以 `to_text[i].` 為前綴展開並去掉其 `__metadata`；不相符的項目整個丟棄。
/// - 其餘純量與陣列原樣保留在原 key 之下。
pub fn flatten_record(
    record: &Map<String, Value>,
    skip_keys: &[String],
    language: &str,
) -> Map<String, Value> {
    let mut flat = Map::new();

    for (key, value) in record {
        if is_skipped(skip_keys, key) {
            continue;
        }

        if key == LOCALIZED_TEXT_KEY {
            flatten_localized_text(key, value, skip_keys, language, &mut flat);
        } else if let Value::Object(inner) = value {
            flatten_object(inner, key, skip_keys, &mut flat);
        } else {
            flat.insert(key.clone(), value.clone());
        }
    }

    flat
}

fn flatten_object(
    obj: &Map<String, Value>,
    prefix: &str,
    skip_keys: &[String],
    out: &mut Map<String, Value>,
) {
    for (key, value) in obj {
        if is_skipped(skip_keys, key) {
            continue;
        }
        let flat_key = format!("{}.{}", prefix, key);
        match value {
            Value::Object(inner) => flatten_object(inner, &flat_key, skip_keys, out),
            other => {
                out.insert(flat_key, other.clone());
            }
        }
    }
}

/// `to_text` 缺少 `results` 陣列時視為沒有資料，不輸出也不記錄。
fn flatten_localized_text(
    key: &str,
    value: &Value,
    skip_keys: &[String],
    language: &str,
    out: &mut Map<String, Value>,
) {
    let Some(results) = value.get("results").and_then(Value::as_array) else {
        return;
    };

    for (index, entry) in results.iter().enumerate() {
        let Some(entry_obj) = entry.as_object() else {
            continue;
        };

        let matches = entry_obj
            .get("language")
            .and_then(Value::as_str)
            .map(|tag| tag.eq_ignore_ascii_case(language))
            .unwrap_or(false);
        if !matches {
            continue;
        }

        let prefix = format!("{}[{}]", key, index);
        for (entry_key, entry_value) in entry_obj {
            if entry_key == METADATA_KEY || is_skipped(skip_keys, entry_key) {
                continue;
            }
            let flat_key = format!("{}.{}", prefix, entry_key);
            match entry_value {
                Value::Object(inner) => flatten_object(inner, &flat_key, skip_keys, out),
                other => {
                    out.insert(flat_key, other.clone());
                }
            }
        }
    }
}

/// Schema 統一：兩段式。先收集所有資料列的 key 聯集（依首次出現順序），
/// 再把每一列補滿成完整 key 集，缺的欄位填明確的 null。
pub fn unify_rows(rows: Vec<Record>) -> Vec<Record> {
    // Pass 1: the union is only known once every row has been flattened.
    let mut key_set: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for row in &rows {
        for key in row.data.keys() {
            if seen.insert(key.clone()) {
                key_set.push(key.clone());
            }
        }
    }

    // Pass 2: pad every row to the full key set.
    rows.into_iter()
        .map(|row| {
            let mut data = Map::new();
            for key in &key_set {
                data.insert(
                    key.clone(),
                    row.data.get(key).cloned().unwrap_or(Value::Null),
                );
            }
            Record::new(data)
        })
        .collect()
}

pub fn default_skip_keys() -> Vec<String> {
    DEFAULT_SKIP_KEYS.iter().map(|k| k.to_string()).collect()
}
