#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use odata_mirror::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use odata_mirror::core::{etl::EtlEngine, pipeline::OdataPipeline};
#[cfg(feature = "lambda")]
use odata_mirror::utils::run_log::RunLog;
#[cfg(feature = "lambda")]
use odata_mirror::utils::validation::Validate;
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub s3_bucket: Option<String>,
    pub s3_prefix: Option<String>,
    pub filter: Option<String>,
    pub language: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub message: String,
    pub output_path: Option<String>,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Starting OData mirror Lambda function");

    // 事件可覆寫部分環境設定
    if let Some(bucket) = &event.payload.s3_bucket {
        std::env::set_var("S3_BUCKET", bucket);
    }
    if let Some(prefix) = &event.payload.s3_prefix {
        std::env::set_var("S3_PREFIX", prefix);
    }
    if let Some(filter) = &event.payload.filter {
        std::env::set_var("FILTER", filter);
    }
    if let Some(language) = &event.payload.language {
        std::env::set_var("LANGUAGE", language);
    }

    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    lambda_config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    // 創建AWS配置和S3客戶端
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    // 創建存儲和管道
    let run_log = RunLog::shared(None);
    let storage = S3Storage::new(
        s3_client,
        lambda_config.s3_bucket.clone(),
        lambda_config.s3_prefix.clone(),
    );
    let pipeline = OdataPipeline::new(storage, lambda_config, run_log.clone());

    let engine = EtlEngine::new(pipeline, run_log);
    let output_path = engine
        .run()
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let message = match &output_path {
        Some(path) => format!("Export uploaded to {}", path),
        None => "Run finished without output".to_string(),
    };

    tracing::info!("OData mirror Lambda function completed");
    Ok(Response {
        message,
        output_path,
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    odata_mirror::utils::logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
