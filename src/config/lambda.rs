#[cfg(feature = "lambda")]
use crate::config::DEFAULT_SERVICE_PATH;
#[cfg(feature = "lambda")]
use crate::core::{ConfigProvider, Storage};
#[cfg(feature = "lambda")]
use crate::utils::error::{EtlError, Result};
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub host: String,
    pub port: u16,
    pub service_path: String,
    pub username: String,
    pub password: String,
    pub expand: Vec<String>,
    pub filter: Option<String>,
    pub language: String,
    pub skip_keys: Vec<String>,
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub s3_region: String,
    pub output_file: String,
}

#[cfg(feature = "lambda")]
fn required_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| EtlError::MissingConfigError {
        field: name.to_string(),
    })
}

#[cfg(feature = "lambda")]
fn csv_env(name: &str, default: &str) -> Vec<String> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    /// 設定只在啟動時讀一次；缺少必要值直接讓整個 run 失敗。
    pub fn from_env() -> Result<Self> {
        let filter = env::var("FILTER").unwrap_or_else(|_| "iobjName eq '0GL_ACCOUNT'".to_string());

        Ok(Self {
            host: required_env("SERVICE_HOST")?,
            port: env::var("SERVICE_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| EtlError::ConfigError {
                    message: "SERVICE_PORT must be a number".to_string(),
                })?,
            service_path: env::var("SERVICE_PATH")
                .unwrap_or_else(|_| DEFAULT_SERVICE_PATH.to_string()),
            username: required_env("SAP_USERNAME")?,
            password: required_env("SAP_PASSWORD")?,
            expand: csv_env("EXPAND", "to_iobj,to_lastChangedBy,to_text,to_version"),
            filter: if filter.is_empty() { None } else { Some(filter) },
            language: env::var("LANGUAGE").unwrap_or_else(|_| "EN".to_string()),
            skip_keys: csv_env("SKIP_KEYS", "id,uri"),
            s3_bucket: required_env("S3_BUCKET")?,
            s3_prefix: env::var("S3_PREFIX").unwrap_or_else(|_| "hierarchy".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
            output_file: env::var("OUTPUT_FILE")
                .unwrap_or_else(|_| "hierarchy_data.csv".to_string()),
        })
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    fn service_url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.service_path)
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn expand(&self) -> &[String] {
        &self.expand
    }

    fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn skip_keys(&self) -> &[String] {
        &self.skip_keys
    }

    fn output_path(&self) -> &str {
        &self.s3_prefix
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_non_empty_string("host", &self.host)?;
        validate_port("port", self.port)?;
        validate_url("service_url", &self.service_url())?;
        validate_non_empty_string("username", &self.username)?;
        validate_non_empty_string("language", &self.language)?;
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validate_aws_region("s3_region", &self.s3_region)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

#[cfg(feature = "lambda")]
fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    crate::utils::validation::validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

/// S3 物件 sink。匯出固定是 CSV，content-type 一律 text/csv。
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    prefix: String,
}

#[cfg(feature = "lambda")]
impl S3Storage {
    pub fn new(client: S3Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
        }
    }

    fn object_key(&self, path: &str) -> String {
        if self.prefix.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.prefix.trim_end_matches('/'), path)
        }
    }
}

#[cfg(feature = "lambda")]
impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(self.object_key(path))
            .send()
            .await
            .map_err(|e| EtlError::StorageError {
                message: format!("Failed to read from S3: {}", e),
            })?;

        let data = resp.body.collect().await.map_err(|e| EtlError::StorageError {
            message: format!("Failed to collect S3 data: {}", e),
        })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let key = self.object_key(path);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type("text/csv")
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| EtlError::StorageError {
                message: format!("Failed to upload s3://{}/{}: {}", self.bucket, key, e),
            })?;

        Ok(())
    }
}
