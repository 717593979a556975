use crate::domain::model::{Record, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 管道所需的全部設定，啟動時解析一次後傳入。
pub trait ConfigProvider: Send + Sync {
    /// Fully assembled service URL, e.g. `http://host:port/sap/opu/odata/...`.
    fn service_url(&self) -> String;
    fn username(&self) -> &str;
    fn password(&self) -> &str;
    /// Navigation properties for `$expand`, comma-joined into the query.
    fn expand(&self) -> &[String];
    /// Optional `$filter` expression; `None` fetches the whole entity set.
    fn filter(&self) -> Option<&str>;
    /// Target language for localized-text entries (case-insensitive match).
    fn language(&self) -> &str;
    /// Keys dropped at every nesting level during flattening.
    fn skip_keys(&self) -> &[String];
    fn output_path(&self) -> &str;
    /// File / object key name for the exported CSV.
    fn output_file(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
