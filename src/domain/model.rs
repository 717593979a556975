use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 單筆資料列。抽取階段的值可能是巢狀物件或陣列，
/// 攤平之後只剩純量（string / number / bool / null）。
///
/// Key order is insertion order (serde_json `preserve_order`), which later
/// becomes the CSV column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Rows padded to the shared key set (missing fields are explicit null).
    pub records: Vec<Record>,
    pub csv_output: String,
}
