use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::run_log::RunLog;
use std::sync::Arc;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    run_log: Arc<RunLog>,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P, run_log: Arc<RunLog>) -> Self {
        Self { pipeline, run_log }
    }

    /// 跑完整條管道。回傳 `Ok(Some(path))` 表示輸出成功；
    /// 空結果與 sink 寫入失敗都以 `Ok(None)` 收場，不往上拋。
    pub async fn run(&self) -> Result<Option<String>> {
        self.run_log.record("Starting ETL process");

        // Extract（分頁抓取已在管道內處理部分失敗）
        let raw_data = self.pipeline.extract().await?;
        self.run_log
            .record(format!("Extracted {} records", raw_data.len()));

        if raw_data.is_empty() {
            self.run_log.record("No data retrieved");
            return Ok(None);
        }

        // Transform
        let transformed = self.pipeline.transform(raw_data).await?;
        self.run_log
            .record(format!("Transformed {} records", transformed.records.len()));

        // Load：儲存失敗只記錄，不讓整個 run 變成錯誤。
        match self.pipeline.load(transformed).await {
            Ok(output_path) => {
                self.run_log
                    .record(format!("Data has been saved to {}", output_path));
                Ok(Some(output_path))
            }
            Err(e) => {
                self.run_log.record(format!("Failed to write output: {}", e));
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Record, TransformResult};
    use crate::utils::error::EtlError;
    use serde_json::json;

    struct StubPipeline {
        records: Vec<Record>,
        fail_load: bool,
    }

    impl StubPipeline {
        fn with_records(count: usize) -> Self {
            let records = (0..count)
                .map(|i| {
                    Record::new(
                        json!({"iobjName": format!("IOBJ{}", i)})
                            .as_object()
                            .unwrap()
                            .clone(),
                    )
                })
                .collect();
            Self {
                records,
                fail_load: false,
            }
        }

        fn empty() -> Self {
            Self {
                records: vec![],
                fail_load: false,
            }
        }

        fn failing_load(mut self) -> Self {
            self.fail_load = true;
            self
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<Record>> {
            Ok(self.records.clone())
        }

        async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
            Ok(TransformResult {
                records: data,
                csv_output: "iobjName\nIOBJ0\n".to_string(),
            })
        }

        async fn load(&self, _result: TransformResult) -> Result<String> {
            if self.fail_load {
                return Err(EtlError::StorageError {
                    message: "upload failed".to_string(),
                });
            }
            Ok("out/hierarchy_data.csv".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_returns_output_path_on_success() {
        let engine = EtlEngine::new(StubPipeline::with_records(2), RunLog::shared(None));

        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, Some("out/hierarchy_data.csv".to_string()));
    }

    #[tokio::test]
    async fn test_run_skips_sink_when_no_data_retrieved() {
        let run_log = RunLog::shared(None);
        let engine = EtlEngine::new(StubPipeline::empty(), run_log.clone());

        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, None);
        assert!(run_log
            .lines()
            .iter()
            .any(|line| line.contains("No data retrieved")));
    }

    #[tokio::test]
    async fn test_run_swallows_sink_failure() {
        let run_log = RunLog::shared(None);
        let engine = EtlEngine::new(
            StubPipeline::with_records(1).failing_load(),
            run_log.clone(),
        );

        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, None);
        assert!(run_log
            .lines()
            .iter()
            .any(|line| line.contains("Failed to write output")));
    }
}
