#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_SERVICE_PATH: &str =
    "/sap/opu/odata/sap/RV_C_IOBJ_HIERARCHY_CDS/Rv_C_Iobj_Hierarchy";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "odata-mirror")]
#[command(about = "Mirror a SAP OData CDS view into a flat CSV export")]
pub struct CliConfig {
    /// OData service host
    #[arg(long, env = "SERVICE_HOST")]
    pub host: String,

    #[arg(long, env = "SERVICE_PORT", default_value = "8000")]
    pub port: u16,

    #[arg(long, default_value = DEFAULT_SERVICE_PATH)]
    pub service_path: String,

    #[arg(long, env = "SAP_USERNAME")]
    pub username: String,

    #[arg(long, env = "SAP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Navigation properties for $expand
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "to_iobj,to_lastChangedBy,to_text,to_version"
    )]
    pub expand: Vec<String>,

    /// $filter expression; pass an empty string to fetch the whole entity set
    #[arg(long, default_value = "iobjName eq '0GL_ACCOUNT'")]
    pub filter: String,

    /// Target language for localized texts
    #[arg(long, default_value = "EN")]
    pub language: String,

    /// Keys dropped at every nesting level while flattening
    #[arg(long, value_delimiter = ',', default_value = "id,uri")]
    pub skip_keys: Vec<String>,

    #[arg(long, default_value = "./data")]
    pub output_path: String,

    #[arg(long, default_value = "hierarchy_data.csv")]
    pub output_file: String,

    /// Append the buffered run log to this file at the end of the run
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
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
        if self.filter.is_empty() {
            None
        } else {
            Some(&self.filter)
        }
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn skip_keys(&self) -> &[String] {
        &self.skip_keys
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_port("port", self.port)?;
        validation::validate_url("service_url", &self.service_url())?;
        validation::validate_non_empty_string("username", &self.username)?;
        validation::validate_non_empty_string("password", &self.password)?;
        validation::validate_non_empty_string("language", &self.language)?;
        validation::validate_non_empty_string("output_file", &self.output_file)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            host: "10.0.0.1".to_string(),
            port: 8000,
            service_path: DEFAULT_SERVICE_PATH.to_string(),
            username: "extract_user".to_string(),
            password: "secret".to_string(),
            expand: vec!["to_text".to_string()],
            filter: "iobjName eq '0GL_ACCOUNT'".to_string(),
            language: "EN".to_string(),
            skip_keys: vec!["id".to_string(), "uri".to_string()],
            output_path: "./data".to_string(),
            output_file: "hierarchy_data.csv".to_string(),
            log_file: None,
            verbose: false,
        }
    }

    #[test]
    fn test_service_url_is_assembled_from_host_port_and_path() {
        let config = base_config();
        assert_eq!(
            config.service_url(),
            format!("http://10.0.0.1:8000{}", DEFAULT_SERVICE_PATH)
        );
    }

    #[test]
    fn test_empty_filter_means_no_filter() {
        let mut config = base_config();
        config.filter = String::new();
        assert_eq!(config.filter(), None);
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_credentials() {
        let mut config = base_config();
        config.password = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
